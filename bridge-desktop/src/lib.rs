//! # Desktop Bridge Implementations
//!
//! Default implementations of the playback bridge traits for desktop
//! platforms (macOS, Windows, Linux).
//!
//! ## Overview
//!
//! - `PlaybackResource` using `rodio` on the default output device
//! - `MediaInspector` using `lofty` for container probing
//!
//! ## Usage
//!
//! ```ignore
//! use bridge_desktop::{LoftyMediaInspector, RodioPlaybackResource};
//! use std::sync::Arc;
//!
//! let resource = Arc::new(RodioPlaybackResource::open_default()?);
//! let inspector = Arc::new(LoftyMediaInspector::new());
//! // Hand both to the playlist orchestrator builder
//! ```

mod engine;
mod inspector;

pub use engine::RodioPlaybackResource;
pub use inspector::{LoftyMediaInspector, DEFAULT_EXTENSIONS};
