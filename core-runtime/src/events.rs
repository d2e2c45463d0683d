//! # Event Bus System
//!
//! Broadcasts playlist lifecycle events to any number of independent
//! subscribers over `tokio::sync::broadcast`.
//!
//! ## Overview
//!
//! - **Event Types**: [`PlaylistEvent`] and [`TrackEndReason`]
//! - **EventBus**: Central broadcast channel for publishing events
//! - **EventStream**: Wrapper for consuming events with filtering
//!
//! ```text
//! ┌──────────────┐    emit     ┌───────────┐   subscribe   ┌────────────┐
//! │ Orchestrator ├────────────>│ EventBus  ├──────────────>│ Subscriber │
//! └──────────────┘             │ (broadcast│               └────────────┘
//! ┌──────────────┐    emit     │  channel) │   subscribe   ┌────────────┐
//! │   Monitor    ├────────────>│           ├──────────────>│ Subscriber │
//! └──────────────┘             └───────────┘               └────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use core_runtime::events::{EventBus, PlaylistEvent};
//!
//! # #[tokio::main]
//! # async fn main() {
//! let bus = EventBus::new(16);
//! let mut sub = bus.subscribe();
//!
//! bus.emit(PlaylistEvent::PlaylistEnded { total_tracks: 3 }).ok();
//! assert_eq!(sub.recv().await.unwrap(), PlaylistEvent::PlaylistEnded { total_tracks: 3 });
//! # }
//! ```
//!
//! ## Error Handling
//!
//! - **`RecvError::Lagged(n)`**: the subscriber fell behind and missed `n`
//!   events. Non-fatal; keep receiving.
//! - **`RecvError::Closed`**: every sender is gone. Treat as shutdown.
//!
//! Emitting with no subscribers returns an error that publishers normally
//! ignore.

use core_async::sync::broadcast;
use serde::{Deserialize, Serialize};
use std::fmt;

pub use core_async::sync::broadcast::error::{RecvError, SendError};
pub use core_async::sync::broadcast::Receiver;

/// Default buffer size for the event bus channel.
pub const DEFAULT_EVENT_BUFFER_SIZE: usize = 100;

// ============================================================================
// Playlist Event Types
// ============================================================================

/// Why a track stopped producing audio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrackEndReason {
    /// The resource ran out of audio on its own.
    Completed,
    /// A transport command or list mutation interrupted the track.
    Manual,
}

impl fmt::Display for TrackEndReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrackEndReason::Completed => f.write_str("completed"),
            TrackEndReason::Manual => f.write_str("manual"),
        }
    }
}

/// Events published by the playlist orchestrator.
///
/// Tracks are identified by position and label; raw buffer contents never
/// travel over the bus.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "event")]
pub enum PlaylistEvent {
    /// A track was loaded and started.
    TrackStarted { index: usize, track: String },
    /// A track stopped producing audio.
    TrackEnded {
        index: usize,
        track: String,
        reason: TrackEndReason,
    },
    /// The last track completed and looping is off.
    PlaylistEnded { total_tracks: usize },
    /// Output paused on the given track.
    Paused { index: usize },
    /// Output resumed on the given track.
    Resumed { index: usize },
    /// Playback was stopped and the position reset.
    Stopped,
    /// A load, play, or status query failed.
    Error {
        index: Option<usize>,
        message: String,
    },
}

impl PlaylistEvent {
    /// Returns a human-readable description of the event.
    pub fn description(&self) -> &str {
        match self {
            PlaylistEvent::TrackStarted { .. } => "Track started",
            PlaylistEvent::TrackEnded {
                reason: TrackEndReason::Completed,
                ..
            } => "Track completed",
            PlaylistEvent::TrackEnded { .. } => "Track interrupted",
            PlaylistEvent::PlaylistEnded { .. } => "Playlist finished",
            PlaylistEvent::Paused { .. } => "Playback paused",
            PlaylistEvent::Resumed { .. } => "Playback resumed",
            PlaylistEvent::Stopped => "Playback stopped",
            PlaylistEvent::Error { .. } => "Playback error",
        }
    }

    /// Returns the severity level of the event.
    pub fn severity(&self) -> EventSeverity {
        match self {
            PlaylistEvent::Error { .. } => EventSeverity::Error,
            PlaylistEvent::TrackStarted { .. } | PlaylistEvent::PlaylistEnded { .. } => {
                EventSeverity::Info
            }
            _ => EventSeverity::Debug,
        }
    }

    /// Index of the track the event refers to, if any.
    pub fn index(&self) -> Option<usize> {
        match self {
            PlaylistEvent::TrackStarted { index, .. }
            | PlaylistEvent::TrackEnded { index, .. }
            | PlaylistEvent::Paused { index }
            | PlaylistEvent::Resumed { index } => Some(*index),
            PlaylistEvent::Error { index, .. } => *index,
            PlaylistEvent::PlaylistEnded { .. } | PlaylistEvent::Stopped => None,
        }
    }
}

/// Event severity levels for filtering and logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EventSeverity {
    /// Debug-level events (verbose)
    Debug,
    /// Informational events
    Info,
    /// Warning events
    Warning,
    /// Error events
    Error,
}

// ============================================================================
// Event Bus
// ============================================================================

/// Central broadcast channel for [`PlaylistEvent`]s.
///
/// Cloning the bus yields another handle to the same channel.
#[derive(Clone)]
pub struct EventBus {
    sender: broadcast::Sender<PlaylistEvent>,
}

impl EventBus {
    /// Creates a new event bus with the specified buffer size.
    ///
    /// When a subscriber falls behind by more than `capacity` events it
    /// receives `RecvError::Lagged`.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Publishes an event to all subscribers.
    ///
    /// Returns the number of subscribers that received the event, or an error
    /// if there are none.
    pub fn emit(&self, event: PlaylistEvent) -> Result<usize, SendError<PlaylistEvent>> {
        self.sender.send(event)
    }

    /// Creates a new subscriber. Past events are not replayed.
    pub fn subscribe(&self) -> Receiver<PlaylistEvent> {
        self.sender.subscribe()
    }

    /// Creates a new [`EventStream`] subscriber.
    pub fn stream(&self) -> EventStream {
        EventStream::new(self.subscribe())
    }

    /// Returns the number of active subscribers.
    ///
    /// ```rust
    /// use core_runtime::events::EventBus;
    ///
    /// let event_bus = EventBus::new(100);
    /// assert_eq!(event_bus.subscriber_count(), 0);
    ///
    /// let _subscriber = event_bus.subscribe();
    /// assert_eq!(event_bus.subscriber_count(), 1);
    /// ```
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_EVENT_BUFFER_SIZE)
    }
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("subscriber_count", &self.subscriber_count())
            .finish()
    }
}

// ============================================================================
// Event Stream Wrapper
// ============================================================================

type EventFilter = Box<dyn Fn(&PlaylistEvent) -> bool + Send + Sync>;

/// A wrapper around `broadcast::Receiver` with optional filtering.
///
/// ```rust
/// use core_runtime::events::{EventBus, EventSeverity};
///
/// let bus = EventBus::new(16);
/// let errors = bus.stream().filter(|event| event.severity() >= EventSeverity::Error);
/// ```
pub struct EventStream {
    receiver: Receiver<PlaylistEvent>,
    filter: Option<EventFilter>,
}

impl EventStream {
    pub fn new(receiver: Receiver<PlaylistEvent>) -> Self {
        Self {
            receiver,
            filter: None,
        }
    }

    /// Only events matching `predicate` will be returned.
    pub fn filter<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&PlaylistEvent) -> bool + Send + Sync + 'static,
    {
        self.filter = Some(Box::new(predicate));
        self
    }

    fn accepts(&self, event: &PlaylistEvent) -> bool {
        self.filter.as_ref().map_or(true, |filter| filter(event))
    }

    /// Receives the next event that passes the filter.
    ///
    /// # Errors
    ///
    /// Returns `RecvError::Lagged(n)` if the subscriber fell behind by `n` events.
    /// Returns `RecvError::Closed` if all senders have been dropped.
    pub async fn recv(&mut self) -> Result<PlaylistEvent, RecvError> {
        loop {
            let event = self.receiver.recv().await?;
            if self.accepts(&event) {
                return Ok(event);
            }
        }
    }

    /// Attempts to receive an event without waiting.
    ///
    /// Returns `None` if no matching event is currently available.
    pub fn try_recv(&mut self) -> Option<Result<PlaylistEvent, RecvError>> {
        loop {
            match self.receiver.try_recv() {
                Ok(event) => {
                    if self.accepts(&event) {
                        return Some(Ok(event));
                    }
                }
                Err(broadcast::error::TryRecvError::Empty) => return None,
                Err(broadcast::error::TryRecvError::Lagged(n)) => {
                    return Some(Err(RecvError::Lagged(n)))
                }
                Err(broadcast::error::TryRecvError::Closed) => return Some(Err(RecvError::Closed)),
            }
        }
    }

    /// Drains every matching event currently buffered.
    ///
    /// Lag notifications are skipped.
    pub fn drain(&mut self) -> Vec<PlaylistEvent> {
        let mut events = Vec::new();
        while let Some(result) = self.try_recv() {
            if let Ok(event) = result {
                events.push(event);
            }
        }
        events
    }
}

impl fmt::Debug for EventStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventStream")
            .field("has_filter", &self.filter.is_some())
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================
