//! Listener registry for playlist lifecycle callbacks.
//!
//! Typed callbacks are kept per kind and invoked in registration order.
//! Every notification is mirrored onto the runtime [`EventBus`] so
//! subscribers that prefer a stream see the same sequence.

use crate::track::Track;
use core_runtime::events::{EventBus, PlaylistEvent, TrackEndReason};
use parking_lot::RwLock;
use std::fmt;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;
use tracing::error;

pub type TrackStartListener = Arc<dyn Fn(usize, &Track) + Send + Sync>;
pub type TrackEndListener = Arc<dyn Fn(usize, &Track, TrackEndReason) + Send + Sync>;
pub type PlaylistEndListener = Arc<dyn Fn() + Send + Sync>;

/// Listener categories, used to remove all listeners of one kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListenerKind {
    TrackStart,
    TrackEnd,
    PlaylistEnd,
}

pub struct EventNotifier {
    track_start: RwLock<Vec<TrackStartListener>>,
    track_end: RwLock<Vec<TrackEndListener>>,
    playlist_end: RwLock<Vec<PlaylistEndListener>>,
    bus: EventBus,
}

impl EventNotifier {
    pub fn new(bus: EventBus) -> Self {
        Self {
            track_start: RwLock::new(Vec::new()),
            track_end: RwLock::new(Vec::new()),
            playlist_end: RwLock::new(Vec::new()),
            bus,
        }
    }

    pub fn bus(&self) -> &EventBus {
        &self.bus
    }

    pub fn on_track_start<F>(&self, listener: F)
    where
        F: Fn(usize, &Track) + Send + Sync + 'static,
    {
        self.track_start.write().push(Arc::new(listener));
    }

    pub fn on_track_end<F>(&self, listener: F)
    where
        F: Fn(usize, &Track, TrackEndReason) + Send + Sync + 'static,
    {
        self.track_end.write().push(Arc::new(listener));
    }

    pub fn on_playlist_end<F>(&self, listener: F)
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.playlist_end.write().push(Arc::new(listener));
    }

    pub fn remove_listeners(&self, kind: ListenerKind) {
        match kind {
            ListenerKind::TrackStart => self.track_start.write().clear(),
            ListenerKind::TrackEnd => self.track_end.write().clear(),
            ListenerKind::PlaylistEnd => self.playlist_end.write().clear(),
        }
    }

    pub fn clear(&self) {
        self.remove_listeners(ListenerKind::TrackStart);
        self.remove_listeners(ListenerKind::TrackEnd);
        self.remove_listeners(ListenerKind::PlaylistEnd);
    }

    pub fn listener_count(&self, kind: ListenerKind) -> usize {
        match kind {
            ListenerKind::TrackStart => self.track_start.read().len(),
            ListenerKind::TrackEnd => self.track_end.read().len(),
            ListenerKind::PlaylistEnd => self.playlist_end.read().len(),
        }
    }

    pub fn track_started(&self, index: usize, track: &Track) {
        // Snapshot so listeners may (un)register from inside a callback
        let listeners = self.track_start.read().clone();
        for listener in listeners {
            guarded("track_start", || listener(index, track));
        }
        self.publish(PlaylistEvent::TrackStarted {
            index,
            track: track.label(index),
        });
    }

    pub fn track_ended(&self, index: usize, track: &Track, reason: TrackEndReason) {
        let listeners = self.track_end.read().clone();
        for listener in listeners {
            guarded("track_end", || listener(index, track, reason));
        }
        self.publish(PlaylistEvent::TrackEnded {
            index,
            track: track.label(index),
            reason,
        });
    }

    pub fn playlist_ended(&self, total_tracks: usize) {
        let listeners = self.playlist_end.read().clone();
        for listener in listeners {
            guarded("playlist_end", || listener());
        }
        self.publish(PlaylistEvent::PlaylistEnded { total_tracks });
    }

    /// Emit on the bus only. Having no subscribers is not an error.
    pub fn publish(&self, event: PlaylistEvent) {
        let _ = self.bus.emit(event);
    }
}

impl fmt::Debug for EventNotifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventNotifier")
            .field("track_start", &self.listener_count(ListenerKind::TrackStart))
            .field("track_end", &self.listener_count(ListenerKind::TrackEnd))
            .field("playlist_end", &self.listener_count(ListenerKind::PlaylistEnd))
            .field("bus", &self.bus)
            .finish()
    }
}

/// A panicking listener is logged and skipped; the rest still run.
fn guarded(kind: &str, call: impl FnOnce()) {
    if catch_unwind(AssertUnwindSafe(call)).is_err() {
        error!(listener = kind, "Playlist listener panicked");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;

    #[test]
    fn test_listeners_receive_in_order_and_bus_mirrors() {
        let notifier = EventNotifier::new(EventBus::new(8));
        let mut stream = notifier.bus().stream();
        let seen = Arc::new(Mutex::new(Vec::new()));

        let s = seen.clone();
        notifier.on_track_start(move |index, track| s.lock().push(format!("start {} {}", index, track.label(index))));
        let s = seen.clone();
        notifier.on_track_end(move |index, _, reason| s.lock().push(format!("end {} {}", index, reason)));
        let s = seen.clone();
        notifier.on_playlist_end(move || s.lock().push("done".to_string()));

        let track = Track::buffer(vec![1, 2, 3]);
        notifier.track_started(0, &track);
        notifier.track_ended(0, &track, TrackEndReason::Completed);
        notifier.playlist_ended(1);

        assert_eq!(
            *seen.lock(),
            vec!["start 0 Buffer Track #1", "end 0 completed", "done"]
        );
        let events = stream.drain();
        assert_eq!(events.len(), 3);
        assert_eq!(
            events[0],
            PlaylistEvent::TrackStarted {
                index: 0,
                track: "Buffer Track #1".into()
            }
        );
    }

    #[test]
    fn test_remove_listeners_by_kind() {
        let notifier = EventNotifier::new(EventBus::default());
        notifier.on_track_start(|_, _| {});
        notifier.on_track_start(|_, _| {});
        notifier.on_playlist_end(|| {});
        assert_eq!(notifier.listener_count(ListenerKind::TrackStart), 2);

        notifier.remove_listeners(ListenerKind::TrackStart);
        assert_eq!(notifier.listener_count(ListenerKind::TrackStart), 0);
        assert_eq!(notifier.listener_count(ListenerKind::PlaylistEnd), 1);

        notifier.clear();
        assert_eq!(notifier.listener_count(ListenerKind::PlaylistEnd), 0);
    }

    #[test]
    fn test_panicking_listener_does_not_block_others() {
        let notifier = EventNotifier::new(EventBus::default());
        let calls = Arc::new(Mutex::new(0));
        notifier.on_playlist_end(|| panic!("listener bug"));
        let c = calls.clone();
        notifier.on_playlist_end(move || *c.lock() += 1);

        notifier.playlist_ended(3);
        assert_eq!(*calls.lock(), 1);
    }

    #[test]
    fn test_listener_can_register_during_dispatch() {
        let notifier = Arc::new(EventNotifier::new(EventBus::default()));
        let inner = notifier.clone();
        notifier.on_playlist_end(move || inner.on_playlist_end(|| {}));

        notifier.playlist_ended(0);
        assert_eq!(notifier.listener_count(ListenerKind::PlaylistEnd), 2);
    }
}
