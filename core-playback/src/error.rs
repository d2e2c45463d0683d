//! # Playlist Error Types

use bridge_traits::BridgeError;
use thiserror::Error;

/// Errors surfaced by the playlist orchestrator.
#[derive(Error, Debug)]
pub enum PlaylistError {
    /// A track was rejected before entering the playlist (missing file,
    /// unsupported extension, empty buffer).
    #[error("Invalid track {track}: {reason}")]
    Validation { track: String, reason: String },

    #[error("Track index {index} out of range (playlist has {len} tracks)")]
    IndexOutOfRange { index: usize, len: usize },

    /// Playback was requested with no tracks loaded.
    #[error("No tracks loaded")]
    EmptyPlaylist,

    /// The playback resource failed. Orchestrator state has already been
    /// reset when this is returned.
    #[error("Playback resource error: {0}")]
    Resource(#[from] BridgeError),

    #[error("Invalid volume: {0} (must be between 0.0 and 1.0)")]
    InvalidVolume(f32),

    #[error("Playlist has been disposed")]
    Disposed,

    #[error(transparent)]
    Config(#[from] core_runtime::Error),
}

impl PlaylistError {
    pub(crate) fn validation(track: impl Into<String>, reason: impl Into<String>) -> Self {
        PlaylistError::Validation {
            track: track.into(),
            reason: reason.into(),
        }
    }

    /// Returns `true` if the error came from track validation.
    pub fn is_validation(&self) -> bool {
        matches!(self, PlaylistError::Validation { .. })
    }

    /// Returns `true` if the error originated in the playback resource.
    pub fn is_resource(&self) -> bool {
        matches!(self, PlaylistError::Resource(_))
    }
}

/// Result type for playlist operations.
pub type Result<T> = std::result::Result<T, PlaylistError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = PlaylistError::validation("a.xyz", "unsupported format");
        assert_eq!(err.to_string(), "Invalid track a.xyz: unsupported format");
        assert!(err.is_validation());

        let err = PlaylistError::IndexOutOfRange { index: 5, len: 3 };
        assert_eq!(
            err.to_string(),
            "Track index 5 out of range (playlist has 3 tracks)"
        );

        let err: PlaylistError = BridgeError::Decode("bad header".into()).into();
        assert!(err.is_resource());
        assert!(err.to_string().contains("bad header"));
    }
}
