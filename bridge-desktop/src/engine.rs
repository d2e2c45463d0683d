//! Playback resource backed by rodio.
//!
//! rodio's `OutputStream` is not `Send`, so the stream and the active `Sink`
//! live on a dedicated thread. The async trait methods send a request over a
//! channel and await the reply on a oneshot.

use async_trait::async_trait;
use bridge_traits::{
    error::{BridgeError, Result},
    playback::PlaybackResource,
};
use bytes::Bytes;
use core_async::sync::oneshot;
use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink};
use std::io::Cursor;
use std::path::Path;
use std::sync::mpsc;
use std::thread;
use tracing::{debug, warn};

enum Op {
    Load(Bytes),
    Play,
    Pause,
    Stop,
    Status,
    Volume,
    SetVolume(f32),
}

enum Reply {
    Done,
    Playing(bool),
    Volume(f32),
}

struct Request {
    op: Op,
    reply: oneshot::Sender<Result<Reply>>,
}

/// State owned by the output thread.
struct Engine {
    _stream: OutputStream,
    handle: OutputStreamHandle,
    sink: Option<Sink>,
    volume: f32,
}

impl Engine {
    fn open() -> Result<Self> {
        let (stream, handle) = OutputStream::try_default()
            .map_err(|e| BridgeError::NotAvailable(format!("Failed to open audio output: {}", e)))?;
        Ok(Self {
            _stream: stream,
            handle,
            sink: None,
            volume: 1.0,
        })
    }

    fn apply(&mut self, op: Op) -> Result<Reply> {
        match op {
            Op::Load(data) => {
                let source = Decoder::new(Cursor::new(data))
                    .map_err(|e| BridgeError::Decode(e.to_string()))?;
                if let Some(previous) = self.sink.take() {
                    previous.stop();
                }
                let sink = Sink::try_new(&self.handle).map_err(|e| {
                    BridgeError::OperationFailed(format!("Failed to create audio sink: {}", e))
                })?;
                // Loaded items wait for an explicit play
                sink.pause();
                sink.set_volume(self.volume);
                sink.append(source);
                self.sink = Some(sink);
                Ok(Reply::Done)
            }
            Op::Play => match &self.sink {
                Some(sink) => {
                    sink.play();
                    Ok(Reply::Done)
                }
                None => Err(BridgeError::OperationFailed(
                    "Nothing loaded to play".to_string(),
                )),
            },
            Op::Pause => {
                if let Some(sink) = &self.sink {
                    sink.pause();
                }
                Ok(Reply::Done)
            }
            Op::Stop => {
                if let Some(sink) = self.sink.take() {
                    sink.stop();
                }
                Ok(Reply::Done)
            }
            Op::Status => Ok(Reply::Playing(
                self.sink
                    .as_ref()
                    .map(|sink| !sink.is_paused() && !sink.empty())
                    .unwrap_or(false),
            )),
            Op::Volume => Ok(Reply::Volume(self.volume)),
            Op::SetVolume(volume) => {
                self.volume = volume.clamp(0.0, 1.0);
                if let Some(sink) = &self.sink {
                    sink.set_volume(self.volume);
                }
                Ok(Reply::Done)
            }
        }
    }
}

/// [`PlaybackResource`] playing through the default output device.
///
/// Dropping the resource closes the request channel, which ends the output
/// thread and releases the device.
pub struct RodioPlaybackResource {
    requests: mpsc::Sender<Request>,
}

impl RodioPlaybackResource {
    /// Open the default output device on a new thread.
    ///
    /// Blocks until the device is open (or failed to open).
    pub fn open_default() -> Result<Self> {
        let (requests, inbox) = mpsc::channel::<Request>();
        let (ready_tx, ready_rx) = mpsc::sync_channel::<Result<()>>(1);

        thread::Builder::new()
            .name("rodio-output".to_string())
            .spawn(move || {
                let mut engine = match Engine::open() {
                    Ok(engine) => {
                        let _ = ready_tx.send(Ok(()));
                        engine
                    }
                    Err(e) => {
                        let _ = ready_tx.send(Err(e));
                        return;
                    }
                };

                while let Ok(Request { op, reply }) = inbox.recv() {
                    let _ = reply.send(engine.apply(op));
                }
                debug!("Audio output thread exiting");
            })?;

        ready_rx.recv().map_err(|_| {
            BridgeError::NotAvailable("Audio output thread exited during startup".to_string())
        })??;

        debug!("Opened default audio output");
        Ok(Self { requests })
    }

    async fn request(&self, op: Op) -> Result<Reply> {
        let (reply, response) = oneshot::channel();
        self.requests
            .send(Request { op, reply })
            .map_err(|_| BridgeError::NotAvailable("Audio output thread is gone".to_string()))?;
        response
            .await
            .map_err(|_| BridgeError::NotAvailable("Audio output thread dropped the request".to_string()))?
    }

    async fn run(&self, op: Op) -> Result<()> {
        self.request(op).await.map(|_| ())
    }
}

#[async_trait]
impl PlaybackResource for RodioPlaybackResource {
    async fn load_file(&self, path: &Path) -> Result<()> {
        let data = core_async::fs::read(path).await?;
        debug!(path = %path.display(), bytes = data.len(), "Loading audio file");
        self.load_buffer(Bytes::from(data)).await
    }

    async fn load_buffer(&self, data: Bytes) -> Result<()> {
        if data.is_empty() {
            return Err(BridgeError::Decode("Audio buffer is empty".to_string()));
        }
        self.run(Op::Load(data)).await
    }

    async fn play(&self) -> Result<()> {
        self.run(Op::Play).await
    }

    async fn pause(&self) -> Result<()> {
        self.run(Op::Pause).await
    }

    async fn stop(&self) -> Result<()> {
        self.run(Op::Stop).await
    }

    async fn is_playing(&self) -> Result<bool> {
        match self.request(Op::Status).await? {
            Reply::Playing(playing) => Ok(playing),
            _ => Err(BridgeError::OperationFailed("Unexpected status reply".to_string())),
        }
    }

    async fn volume(&self) -> Result<f32> {
        match self.request(Op::Volume).await? {
            Reply::Volume(volume) => Ok(volume),
            _ => Err(BridgeError::OperationFailed("Unexpected volume reply".to_string())),
        }
    }

    async fn set_volume(&self, volume: f32) -> Result<()> {
        if !(0.0..=1.0).contains(&volume) {
            warn!(volume, "Clamping out-of-range volume");
        }
        self.run(Op::SetVolume(volume)).await
    }
}
