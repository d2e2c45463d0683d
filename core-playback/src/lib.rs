//! # Playlist Playback Module
//!
//! Sequential playback of a list of audio tracks through one playback
//! resource.
//!
//! ## Overview
//!
//! This module handles:
//! - Track list storage and validation before admission
//! - Transport control (play, pause, resume, stop, skip, navigation)
//! - Completion detection and automatic advance, with optional looping
//! - Listener callbacks and broadcast events for track and playlist boundaries

pub mod error;
pub mod monitor;
pub mod notifier;
pub mod orchestrator;
pub mod status;
pub mod store;
pub mod track;

pub use error::{PlaylistError, Result};
pub use monitor::{CompletionHandler, CompletionMonitor, CompletionSignal, PollingMonitor};
pub use notifier::{EventNotifier, ListenerKind};
pub use orchestrator::{PlaylistOrchestrator, PlaylistOrchestratorBuilder};
pub use status::{PlaylistPhase, PlaylistStatus, TrackEndReason};
pub use store::{index_after_removal, validate_track, TrackStore};
pub use track::Track;
