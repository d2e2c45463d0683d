//! # Playlist Demo
//!
//! Plays the files given on the command line, in order, through the default
//! audio device. With no arguments two short generated tones are played from
//! memory instead.
//!
//! Run with: `cargo run --example playlist_demo --package core-playback -- a.mp3 b.flac`
//!
//! Track-scoped log records from the orchestrator are also mirrored to stderr
//! as a one-line ticker through a [`LoggerSink`].

use anyhow::Context;
use bridge_desktop::{LoftyMediaInspector, RodioPlaybackResource};
use bridge_traits::log::{LogLevel, LoggerSink, PlaybackLogRecord};
use core_playback::{PlaylistOrchestrator, Track};
use core_runtime::config::PlaylistConfig;
use core_runtime::events::PlaylistEvent;
use core_runtime::logging::{init_logging, LoggingConfig};
use std::sync::Arc;
use tracing::{info, warn};

const SAMPLE_RATE: u32 = 44_100;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let logging = LoggingConfig::default().with_logger_sink(Arc::new(TrackTicker));
    init_logging(logging).context("failed to initialise logging")?;

    let resource = RodioPlaybackResource::open_default().context("no audio output device")?;
    let playlist = PlaylistOrchestrator::builder(
        Arc::new(resource),
        Arc::new(LoftyMediaInspector::new()),
    )
    .config(PlaylistConfig::builder().initial_volume(0.6).build()?)
    .build()
    .await?;

    let tracks: Vec<Track> = match std::env::args().skip(1).collect::<Vec<_>>() {
        paths if paths.is_empty() => vec![
            Track::buffer(tone_wav(440.0, 1.5)),
            Track::buffer(tone_wav(660.0, 1.5)),
        ],
        paths => paths.into_iter().map(Track::from).collect(),
    };

    let loaded = playlist.load_tracks(tracks).await?;
    if loaded == 0 {
        anyhow::bail!("none of the given tracks could be loaded");
    }

    playlist.on_track_start(|index, track| {
        info!("Now playing #{}: {}", index + 1, track.label(index));
    });

    let mut events = playlist.subscribe();
    playlist.play_current_track().await?;

    loop {
        match events.recv().await {
            Ok(PlaylistEvent::PlaylistEnded { total_tracks }) => {
                info!(total_tracks, "Playlist finished");
                break;
            }
            Ok(PlaylistEvent::Error { index, message }) => {
                warn!(?index, %message, "Playback error");
                break;
            }
            Ok(event) => info!(event = event.description(), "Event"),
            Err(e) => {
                warn!(error = %e, "Event stream closed");
                break;
            }
        }
    }

    playlist.dispose().await?;
    Ok(())
}

/// Prints one line per orchestrator record that names a track.
struct TrackTicker;

impl LoggerSink for TrackTicker {
    fn accept(&self, record: PlaybackLogRecord) {
        if !record.target.starts_with("core_playback") || !record.is_track_scoped() {
            return;
        }
        let position = record
            .index
            .map(|index| format!("#{}", index + 1))
            .unwrap_or_else(|| "--".to_string());
        let track = record.track.as_deref().unwrap_or("");
        eprintln!(
            "[{} {:>5}] {} {} {}",
            record.at.format("%H:%M:%S"),
            record.level.as_str(),
            position,
            record.message,
            track
        );
    }

    fn min_level(&self) -> LogLevel {
        LogLevel::Info
    }
}

/// 16-bit mono PCM sine wave wrapped in a minimal RIFF header.
fn tone_wav(frequency: f32, seconds: f32) -> Vec<u8> {
    let frames = (SAMPLE_RATE as f32 * seconds) as u32;
    let data_len = frames * 2;

    let mut wav = Vec::with_capacity(44 + data_len as usize);
    wav.extend_from_slice(b"RIFF");
    wav.extend_from_slice(&(36 + data_len).to_le_bytes());
    wav.extend_from_slice(b"WAVEfmt ");
    wav.extend_from_slice(&16u32.to_le_bytes());
    wav.extend_from_slice(&1u16.to_le_bytes()); // PCM
    wav.extend_from_slice(&1u16.to_le_bytes()); // mono
    wav.extend_from_slice(&SAMPLE_RATE.to_le_bytes());
    wav.extend_from_slice(&(SAMPLE_RATE * 2).to_le_bytes());
    wav.extend_from_slice(&2u16.to_le_bytes());
    wav.extend_from_slice(&16u16.to_le_bytes());
    wav.extend_from_slice(b"data");
    wav.extend_from_slice(&data_len.to_le_bytes());

    for n in 0..frames {
        let t = n as f32 / SAMPLE_RATE as f32;
        let sample = (2.0 * std::f32::consts::PI * frequency * t).sin() * 0.3;
        wav.extend_from_slice(&((sample * i16::MAX as f32) as i16).to_le_bytes());
    }
    wav
}
