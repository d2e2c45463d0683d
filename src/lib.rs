//! Workspace facade crate.
//!
//! Re-exports the playlist core so hosts can depend on `playlist-workspace`
//! alone. The `desktop` feature (on by default) adds the rodio/lofty bridge
//! implementations.

pub use core_playback as playback;
pub use core_runtime as runtime;

#[cfg(feature = "desktop")]
pub use bridge_desktop as desktop;
