//! # Playlist Orchestrator
//!
//! Sequential playback of a track list through a single, non-reentrant
//! [`PlaybackResource`].
//!
//! ## Overview
//!
//! Three kinds of triggers compete for the resource:
//!
//! - automatic advance after a track completes (detected by the
//!   [`CompletionMonitor`])
//! - transport commands (`play`, `next`, `pause`, `stop`, ...)
//! - track list mutation (`load_tracks`, `add_track`, `remove_track`)
//!
//! ## Synchronization
//!
//! - Load+start sequences hold the `busy` guard, an async mutex taken with
//!   `try_lock`. A second request while it is held is dropped, not queued.
//! - Navigation first waits (bounded) for the guard to become free, then
//!   proceeds regardless.
//! - All other state sits behind a synchronous mutex that is never held
//!   across an `.await`.
//! - Every armed monitor gets a new generation. Completion signals from an
//!   older generation, or arriving while `stopping` is set, are ignored.
//! - Every stop bumps the stop epoch. An automatic advance carries the epoch
//!   it was scheduled under and is dropped once a stop has moved it on.
//!
//! ## Usage
//!
//! ```ignore
//! use core_playback::PlaylistOrchestrator;
//! use std::sync::Arc;
//!
//! let playlist = PlaylistOrchestrator::builder(resource, inspector)
//!     .build()
//!     .await?;
//!
//! playlist.on_playlist_end(|| tracing::info!("All done"));
//! playlist.load_tracks(["intro.wav", "outro.mp3"]).await?;
//! playlist.play_current_track().await?;
//! ```

use crate::error::{PlaylistError, Result};
use crate::monitor::{CompletionHandler, CompletionMonitor, CompletionSignal, PollingMonitor};
use crate::notifier::{EventNotifier, ListenerKind};
use crate::status::{PlaylistPhase, PlaylistStatus, TrackEndReason};
use crate::store::{index_after_removal, validate_track, TrackStore};
use crate::track::Track;
use bridge_traits::playback::{MediaInspector, PlaybackResource};
use bridge_traits::BridgeError;
use core_async::sync::Mutex as AsyncMutex;
use core_async::time::{sleep, wait_until};
use core_runtime::config::PlaylistConfig;
use core_runtime::events::{EventBus, EventStream, PlaylistEvent};
use core_runtime::logging::display_file_name;
use parking_lot::Mutex;
use std::fmt;
use std::sync::{Arc, Weak};
use tracing::{debug, error, info, warn};

/// The track currently loaded in the resource.
///
/// Kept separately from the store so that end notifications name the track
/// that actually stopped even after the list was mutated.
#[derive(Debug, Clone)]
struct ActiveTrack {
    index: usize,
    track: Track,
}

#[derive(Debug)]
struct PlaylistState {
    tracks: TrackStore,
    current_index: usize,
    playing: bool,
    looping: bool,
    stopping: bool,
    phase: PlaylistPhase,
    active: Option<ActiveTrack>,
    generation: u64,
    /// Bumped by every halt; pending automatic advances compare against it.
    stop_epoch: u64,
    /// The list was replaced under a loaded track: the next advance plays
    /// `current_index` instead of stepping past it.
    restart_from_current: bool,
    /// `pause` arrived while a track was loading.
    pause_requested: bool,
    volume: f32,
    disposed: bool,
}

struct Inner {
    resource: Arc<dyn PlaybackResource>,
    inspector: Arc<dyn MediaInspector>,
    monitor: Arc<dyn CompletionMonitor>,
    notifier: EventNotifier,
    config: PlaylistConfig,
    state: Mutex<PlaylistState>,
    busy: AsyncMutex<()>,
}

enum Advance {
    Play,
    End {
        total: usize,
        interrupted: Option<ActiveTrack>,
    },
}

enum Commit {
    Discard,
    Play(u64),
    Paused,
}

enum ResumeAction {
    Nothing,
    Unpause(usize),
    Start,
}

/// Sequential playlist player. Cheap to clone; clones share all state.
#[derive(Clone)]
pub struct PlaylistOrchestrator {
    inner: Arc<Inner>,
}

impl PlaylistOrchestrator {
    pub fn builder(
        resource: Arc<dyn PlaybackResource>,
        inspector: Arc<dyn MediaInspector>,
    ) -> PlaylistOrchestratorBuilder {
        PlaylistOrchestratorBuilder {
            resource,
            inspector,
            config: PlaylistConfig::default(),
            monitor: None,
            event_bus: None,
        }
    }

    // ------------------------------------------------------------------
    // Track list
    // ------------------------------------------------------------------

    /// Replace the track list, dropping items that fail validation.
    ///
    /// Returns the number of accepted tracks. Resets the current index to 0
    /// and leaves whatever is playing untouched. When that track finishes,
    /// or on the next `next_track`, the new list starts from its first track.
    pub async fn load_tracks<I, T>(&self, items: I) -> Result<usize>
    where
        I: IntoIterator<Item = T>,
        T: Into<Track>,
    {
        self.ensure_live()?;

        let mut accepted = Vec::new();
        for item in items {
            let track = item.into();
            match validate_track(self.inner.inspector.as_ref(), &track, accepted.len()).await {
                Ok(()) => accepted.push(track),
                Err(e) => warn!(error = %e, "Skipping track"),
            }
        }

        let count = accepted.len();
        {
            let mut state = self.inner.state.lock();
            state.tracks.replace(accepted);
            state.current_index = 0;
            state.restart_from_current = state.active.is_some();
            if state.phase == PlaylistPhase::Ended {
                state.phase = PlaylistPhase::Idle;
            }
        }

        info!(tracks = count, "Loaded playlist");
        Ok(count)
    }

    /// Validate and append one track. Returns the new length.
    pub async fn add_track(&self, item: impl Into<Track>) -> Result<usize> {
        self.ensure_live()?;
        let track = item.into();
        let position = self.len();
        validate_track(self.inner.inspector.as_ref(), &track, position).await?;

        let len = self.inner.state.lock().tracks.push(track);
        debug!(tracks = len, "Added track");
        Ok(len)
    }

    /// Remove the track at `index`, returning it. Out-of-range is `Ok(None)`.
    ///
    /// Removing the loaded track stops it. The index then refers to the
    /// following track, clamped to the end of the list.
    pub async fn remove_track(&self, index: usize) -> Result<Option<Track>> {
        self.ensure_live()?;

        let (removed, interrupted) = {
            let mut guard = self.inner.state.lock();
            let state = &mut *guard;
            let Some(removed) = state.tracks.remove(index) else {
                return Ok(None);
            };

            let was_current = index == state.current_index;
            let new_len = state.tracks.len();
            state.current_index = index_after_removal(state.current_index, index, new_len);

            let loaded_here = state.active.as_ref().is_some_and(|active| active.index == index);
            let interrupted = if was_current && loaded_here {
                state.stopping = true;
                state.playing = false;
                state.phase = PlaylistPhase::Idle;
                state.active.take()
            } else {
                if let Some(active) = state.active.as_mut() {
                    if active.index > index {
                        active.index -= 1;
                    }
                }
                None
            };
            (removed, interrupted)
        };

        if let Some(active) = interrupted {
            self.inner.monitor.disarm();
            if let Err(e) = self.inner.resource.stop().await {
                warn!(error = %e, "Failed to stop removed track");
            }
            self.inner
                .notifier
                .track_ended(active.index, &active.track, TrackEndReason::Manual);
        }

        info!(index, remaining = self.len(), "Removed track");
        Ok(Some(removed))
    }

    // ------------------------------------------------------------------
    // Transport
    // ------------------------------------------------------------------

    /// Load and start the track at the current index.
    ///
    /// Returns `Ok(())` without doing anything when another load is in
    /// progress.
    pub async fn play_current_track(&self) -> Result<()> {
        self.start_current(None).await
    }

    /// Advance to the next track, wrapping when looping.
    ///
    /// Past the last track with looping off the playlist ends: nothing is
    /// played, the index stays on the last track.
    pub async fn next_track(&self) -> Result<()> {
        self.ensure_live()?;
        self.advance(None).await
    }

    /// Shared by `next_track` and the completion path. With `expected_epoch`
    /// set, a stop since scheduling cancels the advance.
    async fn advance(&self, expected_epoch: Option<u64>) -> Result<()> {
        self.wait_for_idle().await;

        let (advance, epoch) = {
            let mut state = self.inner.state.lock();
            if expected_epoch.is_some_and(|epoch| epoch != state.stop_epoch) {
                debug!("Stopped since completion, dropping automatic advance");
                return Ok(());
            }
            if state.tracks.is_empty() {
                return Err(PlaylistError::EmptyPlaylist);
            }
            let next = state.current_index + 1;
            let advance = if state.restart_from_current {
                state.restart_from_current = false;
                debug!(index = state.current_index, "Starting replaced playlist");
                Advance::Play
            } else if next < state.tracks.len() {
                state.current_index = next;
                Advance::Play
            } else if state.looping {
                info!("Looping playlist");
                state.current_index = 0;
                Advance::Play
            } else {
                state.current_index = state.tracks.last_index();
                state.phase = PlaylistPhase::Ended;
                let interrupted = if state.playing { state.active.take() } else { None };
                state.playing = false;
                Advance::End {
                    total: state.tracks.len(),
                    interrupted,
                }
            };
            (advance, state.stop_epoch)
        };

        match advance {
            Advance::Play => {
                sleep(self.inner.config.transition_delay()).await;
                self.start_current(Some(epoch)).await
            }
            Advance::End { total, interrupted } => {
                self.inner.monitor.disarm();
                if let Some(active) = interrupted {
                    if let Err(e) = self.inner.resource.stop().await {
                        warn!(error = %e, "Failed to stop last track");
                    }
                    self.inner
                        .notifier
                        .track_ended(active.index, &active.track, TrackEndReason::Manual);
                }
                info!(tracks = total, "End of playlist reached");
                self.inner.notifier.playlist_ended(total);
                Ok(())
            }
        }
    }

    /// Step back one track (stopping at the first) and play it.
    pub async fn previous_track(&self) -> Result<()> {
        self.ensure_live()?;
        self.wait_for_idle().await;
        {
            let mut state = self.inner.state.lock();
            state.current_index = state.current_index.saturating_sub(1);
        }
        self.play_current_track().await
    }

    /// Jump to `index` (0-based) and play it.
    pub async fn go_to_track(&self, index: usize) -> Result<()> {
        self.ensure_live()?;
        self.check_index(index)?;
        self.wait_for_idle().await;
        {
            let mut state = self.inner.state.lock();
            let len = state.tracks.len();
            if index >= len {
                return Err(PlaylistError::IndexOutOfRange { index, len });
            }
            state.current_index = index;
        }
        self.play_current_track().await
    }

    /// Pause output, keeping the track loaded.
    pub async fn pause(&self) -> Result<()> {
        self.ensure_live()?;

        // Drop `playing` before the resource goes quiet so a poll landing in
        // between is not read as completion
        let paused_index = {
            let mut guard = self.inner.state.lock();
            let state = &mut *guard;
            let was_playing = state.playing;
            state.playing = false;
            if state.phase == PlaylistPhase::Loading {
                state.pause_requested = true;
                debug!(index = state.current_index, "Pause during load, holding track paused");
            }
            match &state.active {
                Some(active) if was_playing => {
                    state.phase = PlaylistPhase::Paused;
                    Some(active.index)
                }
                _ => None,
            }
        };
        self.inner.monitor.disarm();

        if let Err(e) = self.inner.resource.pause().await {
            return Err(self.report_resource_error(paused_index, e));
        }

        if let Some(index) = paused_index {
            info!(index, "Paused");
            self.inner.notifier.publish(PlaylistEvent::Paused { index });
        }
        Ok(())
    }

    /// Resume a paused track, or start the current one if nothing is loaded.
    pub async fn resume(&self) -> Result<()> {
        self.ensure_live()?;
        self.wait_for_idle().await;

        let action = {
            let state = self.inner.state.lock();
            if state.playing || state.tracks.is_empty() {
                ResumeAction::Nothing
            } else {
                match &state.active {
                    Some(active) => ResumeAction::Unpause(active.index),
                    None => ResumeAction::Start,
                }
            }
        };

        match action {
            ResumeAction::Nothing => Ok(()),
            ResumeAction::Start => self.play_current_track().await,
            ResumeAction::Unpause(index) => {
                if let Err(e) = self.inner.resource.play().await {
                    return Err(self.report_resource_error(Some(index), e));
                }
                let generation = {
                    let mut state = self.inner.state.lock();
                    state.stopping = false;
                    state.playing = true;
                    state.phase = PlaylistPhase::Playing;
                    state.generation += 1;
                    state.generation
                };
                self.arm_monitor(generation);
                info!(index, "Resumed");
                self.inner.notifier.publish(PlaylistEvent::Resumed { index });
                Ok(())
            }
        }
    }

    /// Stop playback and rewind to the first track.
    pub async fn stop(&self) -> Result<()> {
        self.ensure_live()?;
        self.halt(true).await;
        info!("Stopped");
        self.inner.notifier.publish(PlaylistEvent::Stopped);
        Ok(())
    }

    /// `stop` followed by `next_track`. Since stop rewinds, this lands on
    /// the second track.
    pub async fn skip(&self) -> Result<()> {
        self.stop().await?;
        self.next_track().await
    }

    /// Stop playback, clear tracks and listeners, and refuse further calls.
    pub async fn dispose(&self) -> Result<()> {
        if self.inner.state.lock().disposed {
            return Ok(());
        }
        self.halt(false).await;
        {
            let mut state = self.inner.state.lock();
            state.tracks.clear();
            state.current_index = 0;
            state.phase = PlaylistPhase::Idle;
            state.disposed = true;
        }
        self.inner.notifier.clear();
        info!("Playlist disposed");
        Ok(())
    }

    // ------------------------------------------------------------------
    // Settings and accessors
    // ------------------------------------------------------------------

    pub fn set_loop(&self, enabled: bool) {
        self.inner.state.lock().looping = enabled;
        info!(enabled, "Loop mode changed");
    }

    pub fn is_looping(&self) -> bool {
        self.inner.state.lock().looping
    }

    /// Set output volume in `0.0..=1.0`.
    pub async fn set_volume(&self, volume: f32) -> Result<()> {
        self.ensure_live()?;
        if !(0.0..=1.0).contains(&volume) {
            return Err(PlaylistError::InvalidVolume(volume));
        }
        self.inner.resource.set_volume(volume).await?;
        self.inner.state.lock().volume = volume;
        debug!(volume, "Volume set");
        Ok(())
    }

    /// Current volume as reported by the resource.
    pub async fn volume(&self) -> Result<f32> {
        Ok(self.inner.resource.volume().await?)
    }

    pub fn status(&self) -> PlaylistStatus {
        let busy = self.inner.busy.try_lock().is_err();
        let state = self.inner.state.lock();
        PlaylistStatus {
            phase: state.phase,
            current_index: state.current_index,
            track_count: state.tracks.len(),
            current_track: state
                .tracks
                .get(state.current_index)
                .map(|track| track.label(state.current_index)),
            playing: state.playing,
            looping: state.looping,
            busy,
            stopping: state.stopping,
            volume: state.volume,
            disposed: state.disposed,
        }
    }

    pub fn current_index(&self) -> usize {
        self.inner.state.lock().current_index
    }

    pub fn current_track(&self) -> Option<Track> {
        let state = self.inner.state.lock();
        state.tracks.get(state.current_index).cloned()
    }

    pub fn tracks(&self) -> Vec<Track> {
        self.inner.state.lock().tracks.to_vec()
    }

    pub fn len(&self) -> usize {
        self.inner.state.lock().tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.state.lock().tracks.is_empty()
    }

    pub fn is_playing(&self) -> bool {
        self.inner.state.lock().playing
    }

    pub fn phase(&self) -> PlaylistPhase {
        self.inner.state.lock().phase
    }

    pub fn config(&self) -> &PlaylistConfig {
        &self.inner.config
    }

    // ------------------------------------------------------------------
    // Listeners and events
    // ------------------------------------------------------------------

    pub fn on_track_start<F>(&self, listener: F)
    where
        F: Fn(usize, &Track) + Send + Sync + 'static,
    {
        self.inner.notifier.on_track_start(listener);
    }

    pub fn on_track_end<F>(&self, listener: F)
    where
        F: Fn(usize, &Track, TrackEndReason) + Send + Sync + 'static,
    {
        self.inner.notifier.on_track_end(listener);
    }

    pub fn on_playlist_end<F>(&self, listener: F)
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.inner.notifier.on_playlist_end(listener);
    }

    pub fn remove_listeners(&self, kind: ListenerKind) {
        self.inner.notifier.remove_listeners(kind);
    }

    /// Subscribe to the event bus. Past events are not replayed.
    pub fn subscribe(&self) -> EventStream {
        self.inner.notifier.bus().stream()
    }

    pub fn event_bus(&self) -> &EventBus {
        self.inner.notifier.bus()
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    fn ensure_live(&self) -> Result<()> {
        if self.inner.state.lock().disposed {
            return Err(PlaylistError::Disposed);
        }
        Ok(())
    }

    fn check_index(&self, index: usize) -> Result<()> {
        let len = self.len();
        if index >= len {
            return Err(PlaylistError::IndexOutOfRange { index, len });
        }
        Ok(())
    }

    /// Wait up to the idle timeout for the busy guard, then carry on anyway.
    async fn wait_for_idle(&self) {
        let busy = &self.inner.busy;
        if busy.try_lock().is_ok() {
            return;
        }

        debug!("Operation in progress, waiting for idle");
        let config = &self.inner.config;
        let idle = wait_until(
            || busy.try_lock().is_ok(),
            config.idle_poll(),
            config.idle_timeout(),
        )
        .await;
        if !idle {
            warn!(
                timeout_ms = config.idle_timeout_ms,
                "Timed out waiting for idle, proceeding"
            );
        }
    }

    async fn start_current(&self, expected_epoch: Option<u64>) -> Result<()> {
        self.ensure_live()?;
        let Ok(_busy) = self.inner.busy.try_lock() else {
            debug!("Operation in progress, ignoring duplicate play request");
            return Ok(());
        };
        self.load_and_start(expected_epoch).await
    }

    /// Body of `start_current`; the caller holds the busy guard.
    async fn load_and_start(&self, expected_epoch: Option<u64>) -> Result<()> {
        let (index, track, previous, was_playing) = {
            let mut state = self.inner.state.lock();
            if expected_epoch.is_some_and(|epoch| epoch != state.stop_epoch) {
                debug!("Stopped during transition, not starting track");
                return Ok(());
            }
            if state.tracks.is_empty() {
                return Err(PlaylistError::EmptyPlaylist);
            }
            let index = state.current_index.min(state.tracks.last_index());
            state.current_index = index;
            let track = state.tracks.get(index).cloned().ok_or(PlaylistError::EmptyPlaylist)?;

            let was_playing = state.playing;
            state.stopping = false;
            state.restart_from_current = false;
            state.pause_requested = false;
            state.playing = false;
            state.phase = PlaylistPhase::Loading;
            (index, track, state.active.take(), was_playing)
        };
        self.inner.monitor.disarm();

        let total = self.len();
        info!(
            index,
            "Playing track {}/{}: {}",
            index + 1,
            total,
            track.label(index)
        );

        if let Some(previous) = previous {
            if was_playing {
                if let Err(e) = self.inner.resource.stop().await {
                    warn!(error = %e, "Failed to stop previous track");
                }
            }
            self.inner
                .notifier
                .track_ended(previous.index, &previous.track, TrackEndReason::Manual);
            if was_playing {
                sleep(self.inner.config.settle_delay()).await;
            }
        }

        let loaded = match &track {
            Track::File { path } => self.inner.resource.load_file(path).await,
            Track::Buffer { data } => self.inner.resource.load_buffer(data.clone()).await,
        };
        if let Err(e) = loaded {
            error!(index, error = %e, "Failed to load track");
            return Err(self.fail_start(index, e));
        }

        if let Track::File { path } = &track {
            match self.inner.inspector.metadata(path).await {
                Ok(meta) => info!(
                    file = %display_file_name(path),
                    codec = ?meta.codec,
                    duration_secs = ?meta.duration_secs(),
                    sample_rate = ?meta.sample_rate,
                    channels = ?meta.channels,
                    title = ?meta.title,
                    "Track info"
                ),
                Err(e) => debug!(file = %display_file_name(path), error = %e, "No track metadata"),
            }
        } else {
            debug!(index, "Track info: [memory buffer]");
        }

        if let Err(e) = self.inner.resource.play().await {
            error!(index, error = %e, "Failed to start track");
            return Err(self.fail_start(index, e));
        }

        let commit = {
            let mut state = self.inner.state.lock();
            if state.stopping || state.disposed {
                Commit::Discard
            } else {
                state.active = Some(ActiveTrack {
                    index,
                    track: track.clone(),
                });
                if state.pause_requested {
                    state.pause_requested = false;
                    state.playing = false;
                    state.phase = PlaylistPhase::Paused;
                    Commit::Paused
                } else {
                    state.playing = true;
                    state.phase = PlaylistPhase::Playing;
                    state.generation += 1;
                    Commit::Play(state.generation)
                }
            }
        };

        match commit {
            Commit::Discard => {
                debug!(index, "Stopped during load, discarding track");
                if let Err(e) = self.inner.resource.stop().await {
                    warn!(error = %e, "Failed to stop discarded track");
                }
            }
            Commit::Paused => {
                self.inner.notifier.track_started(index, &track);
                if let Err(e) = self.inner.resource.pause().await {
                    return Err(self.report_resource_error(Some(index), e));
                }
                info!(index, "Paused");
                self.inner.notifier.publish(PlaylistEvent::Paused { index });
            }
            Commit::Play(generation) => {
                self.inner.notifier.track_started(index, &track);
                self.arm_monitor(generation);
            }
        }
        Ok(())
    }

    fn fail_start(&self, index: usize, err: BridgeError) -> PlaylistError {
        {
            let mut state = self.inner.state.lock();
            state.playing = false;
            state.active = None;
            state.phase = PlaylistPhase::Idle;
        }
        self.report_resource_error(Some(index), err)
    }

    fn report_resource_error(&self, index: Option<usize>, err: BridgeError) -> PlaylistError {
        self.inner.notifier.publish(PlaylistEvent::Error {
            index,
            message: err.to_string(),
        });
        PlaylistError::Resource(err)
    }

    /// Tear down the active track. The busy guard is RAII-owned by whichever
    /// call holds it, so there is nothing to force-release here.
    async fn halt(&self, rewind: bool) {
        let interrupted = {
            let mut state = self.inner.state.lock();
            state.stopping = true;
            state.stop_epoch += 1;
            state.restart_from_current = false;
            state.pause_requested = false;
            state.phase = PlaylistPhase::Stopping;
            state.playing = false;
            if rewind {
                state.current_index = 0;
            }
            state.active.take()
        };
        self.inner.monitor.disarm();

        if let Err(e) = self.inner.resource.stop().await {
            warn!(error = %e, "Error stopping playback");
        }

        if let Some(active) = interrupted {
            self.inner
                .notifier
                .track_ended(active.index, &active.track, TrackEndReason::Manual);
        }

        let mut state = self.inner.state.lock();
        if state.phase == PlaylistPhase::Stopping {
            state.phase = PlaylistPhase::Idle;
        }
    }

    fn arm_monitor(&self, generation: u64) {
        let weak: Weak<Inner> = Arc::downgrade(&self.inner);
        let handler: CompletionHandler = Arc::new(move |signal| {
            if let Some(inner) = weak.upgrade() {
                PlaylistOrchestrator { inner }.on_completion_signal(signal);
            }
        });
        self.inner
            .monitor
            .arm(Arc::clone(&self.inner.resource), generation, handler);
    }

    /// Runs on the monitor task; never awaits.
    fn on_completion_signal(&self, signal: CompletionSignal) {
        let (finished, epoch) = {
            let mut state = self.inner.state.lock();
            if signal.generation() != state.generation || !state.playing || state.stopping {
                debug!(
                    generation = signal.generation(),
                    current = state.generation,
                    "Ignoring stale completion signal"
                );
                return;
            }
            state.playing = false;
            state.phase = PlaylistPhase::Idle;
            (state.active.take(), state.stop_epoch)
        };

        match signal {
            CompletionSignal::Finished { generation } => {
                if let Some(active) = finished {
                    debug!(index = active.index, generation, "Track completed");
                    self.inner
                        .notifier
                        .track_ended(active.index, &active.track, TrackEndReason::Completed);
                }

                // Advance on a fresh task, never from inside the poll loop
                let playlist = self.clone();
                core_async::spawn(async move {
                    if let Err(e) = playlist.advance(Some(epoch)).await {
                        warn!(error = %e, "Automatic advance failed");
                    }
                });
            }
            CompletionSignal::Failed { message, .. } => {
                error!(error = %message, "Playback monitor failed, playback halted");
                self.inner.notifier.publish(PlaylistEvent::Error {
                    index: finished.map(|active| active.index),
                    message,
                });
            }
        }
    }
}

impl fmt::Debug for PlaylistOrchestrator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlaylistOrchestrator")
            .field("status", &self.status())
            .finish()
    }
}

/// Builder for [`PlaylistOrchestrator`].
pub struct PlaylistOrchestratorBuilder {
    resource: Arc<dyn PlaybackResource>,
    inspector: Arc<dyn MediaInspector>,
    config: PlaylistConfig,
    monitor: Option<Arc<dyn CompletionMonitor>>,
    event_bus: Option<EventBus>,
}

impl PlaylistOrchestratorBuilder {
    pub fn config(mut self, config: PlaylistConfig) -> Self {
        self.config = config;
        self
    }

    /// Replace the default [`PollingMonitor`].
    pub fn monitor(mut self, monitor: Arc<dyn CompletionMonitor>) -> Self {
        self.monitor = Some(monitor);
        self
    }

    /// Publish on an existing bus instead of a private one.
    pub fn event_bus(mut self, bus: EventBus) -> Self {
        self.event_bus = Some(bus);
        self
    }

    /// Validate the configuration and apply the initial volume.
    pub async fn build(self) -> Result<PlaylistOrchestrator> {
        self.config.validate()?;

        self.resource.set_volume(self.config.initial_volume).await?;

        let monitor: Arc<dyn CompletionMonitor> = match self.monitor {
            Some(monitor) => monitor,
            None => Arc::new(PollingMonitor::new(self.config.poll_interval())),
        };
        let bus = self
            .event_bus
            .unwrap_or_else(|| EventBus::new(self.config.event_buffer_size));

        let state = PlaylistState {
            tracks: TrackStore::new(),
            current_index: 0,
            playing: false,
            looping: self.config.looping,
            stopping: false,
            phase: PlaylistPhase::Idle,
            active: None,
            generation: 0,
            stop_epoch: 0,
            restart_from_current: false,
            pause_requested: false,
            volume: self.config.initial_volume,
            disposed: false,
        };

        Ok(PlaylistOrchestrator {
            inner: Arc::new(Inner {
                resource: self.resource,
                inspector: self.inspector,
                monitor,
                notifier: EventNotifier::new(bus),
                config: self.config,
                state: Mutex::new(state),
                busy: AsyncMutex::new(()),
            }),
        })
    }
}
