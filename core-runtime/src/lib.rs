//! # Core Runtime Module
//!
//! Runtime infrastructure shared by the playlist crates:
//! - Logging and tracing setup ([`logging`])
//! - Orchestrator configuration ([`config`])
//! - The playlist event bus ([`events`])

pub mod config;
pub mod error;
pub mod events;
pub mod logging;

pub use config::{PlaylistConfig, PlaylistConfigBuilder};
pub use error::{Error, Result};
pub use events::{EventBus, EventSeverity, EventStream, PlaylistEvent, TrackEndReason};
