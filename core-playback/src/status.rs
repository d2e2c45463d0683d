//! Orchestrator phases and the read-only status snapshot.

use serde::{Deserialize, Serialize};

pub use core_runtime::events::TrackEndReason;

/// Lifecycle phase of the orchestrator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaylistPhase {
    /// Nothing loaded, or the last load failed.
    #[default]
    Idle,
    /// A load+start sequence holds the single-flight guard.
    Loading,
    Playing,
    Paused,
    /// A stop is tearing down the active track.
    Stopping,
    /// The last track finished with looping off.
    Ended,
}

/// Point-in-time view of the orchestrator.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlaylistStatus {
    pub phase: PlaylistPhase,
    pub current_index: usize,
    pub track_count: usize,
    /// Label of the track at `current_index`.
    pub current_track: Option<String>,
    pub playing: bool,
    pub looping: bool,
    pub busy: bool,
    pub stopping: bool,
    pub volume: f32,
    pub disposed: bool,
}
