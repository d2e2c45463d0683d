//! # Host Bridge Traits
//!
//! Capability traits the playlist core consumes and each host implements.
//!
//! ## Overview
//!
//! The core never talks to an audio device or parses a container itself. It
//! drives a [`PlaybackResource`](playback::PlaybackResource) and asks a
//! [`MediaInspector`](playback::MediaInspector) which files are acceptable.
//! Hosts hand concrete implementations to the orchestrator at construction.
//!
//! ## Traits
//!
//! ### Playback
//! - [`PlaybackResource`](playback::PlaybackResource) - Single-item audio output with load/play/pause/stop
//! - [`MediaInspector`](playback::MediaInspector) - Extension support and container metadata
//!
//! ### Utilities
//! - [`LoggerSink`](log::LoggerSink) - Receive playlist log records in the host
//!
//! ## Platform Requirements
//!
//! | Platform | Implementation Crate | Status |
//! |----------|---------------------|--------|
//! | Desktop  | `bridge-desktop`    | ✅ Available |
//! | Tests    | in-crate fakes      | ✅ Available |
//!
//! ## Error Handling
//!
//! All bridge traits use [`BridgeError`](error::BridgeError). Implementations
//! should convert engine-specific errors into it and include the offending
//! path or format in the message.
//!
//! ## Thread Safety
//!
//! Bridge traits require `Send + Sync` on native targets (see
//! [`platform`]) so a single resource can be shared between the orchestrator
//! and its completion monitor task.
//!
//! ## Examples
//!
//! ```ignore
//! use bridge_traits::playback::PlaybackResource;
//! use bridge_traits::error::Result;
//! use async_trait::async_trait;
//! use bytes::Bytes;
//! use std::path::Path;
//!
//! pub struct SilentResource;
//!
//! #[async_trait]
//! impl PlaybackResource for SilentResource {
//!     async fn load_file(&self, _path: &Path) -> Result<()> { Ok(()) }
//!     async fn load_buffer(&self, _data: Bytes) -> Result<()> { Ok(()) }
//!     async fn play(&self) -> Result<()> { Ok(()) }
//!     async fn pause(&self) -> Result<()> { Ok(()) }
//!     async fn stop(&self) -> Result<()> { Ok(()) }
//!     async fn is_playing(&self) -> Result<bool> { Ok(false) }
//!     async fn volume(&self) -> Result<f32> { Ok(1.0) }
//!     async fn set_volume(&self, _volume: f32) -> Result<()> { Ok(()) }
//! }
//! ```

pub mod error;
pub mod log;
pub mod platform;
pub mod playback;

pub use error::BridgeError;

// Re-export commonly used types
pub use playback::{AudioCodec, MediaDescriptor, MediaInspector, PlaybackResource};
pub use log::{LogLevel, LoggerSink, PlaybackLogRecord};
