//! Track validation against the filesystem and an inspector.

use bridge_traits::error::Result as BridgeResult;
use bridge_traits::playback::{MediaDescriptor, MediaInspector};
use core_playback::{validate_track, PlaylistError, Track};
use std::path::Path;
use tempfile::TempDir;

/// Accepts a fixed extension list; never asked for metadata here.
struct ExtensionInspector(&'static [&'static str]);

#[async_trait::async_trait]
impl MediaInspector for ExtensionInspector {
    fn is_format_supported(&self, extension: &str) -> bool {
        self.0.contains(&extension)
    }

    async fn metadata(&self, path: &Path) -> BridgeResult<MediaDescriptor> {
        Err(bridge_traits::BridgeError::Unsupported(path.display().to_string()))
    }
}

const AUDIO: ExtensionInspector = ExtensionInspector(&["mp3", "wav", "flac"]);

fn fixture(dir: &TempDir, name: &str) -> Track {
    let path = dir.path().join(name);
    std::fs::write(&path, b"RIFF").unwrap();
    Track::file(path)
}

fn reason(err: PlaylistError) -> String {
    match err {
        PlaylistError::Validation { reason, .. } => reason,
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_existing_supported_file_is_accepted() {
    let dir = tempfile::tempdir().unwrap();
    let track = fixture(&dir, "intro.wav");
    assert!(validate_track(&AUDIO, &track, 0).await.is_ok());
}

#[tokio::test]
async fn test_extension_check_is_case_insensitive() {
    let dir = tempfile::tempdir().unwrap();
    let track = fixture(&dir, "LOUD.FLAC");
    assert!(validate_track(&AUDIO, &track, 0).await.is_ok());
}

#[tokio::test]
async fn test_unsupported_extension_is_rejected_before_lookup() {
    let dir = tempfile::tempdir().unwrap();
    let track = fixture(&dir, "cover.jpg");
    let err = validate_track(&AUDIO, &track, 0).await.unwrap_err();
    assert_eq!(reason(err), "unsupported format or invalid extension");

    let bare = Track::file(dir.path().join("README"));
    let err = validate_track(&AUDIO, &bare, 0).await.unwrap_err();
    assert_eq!(reason(err), "unsupported format or invalid extension");
}

#[tokio::test]
async fn test_missing_file_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let track = Track::file(dir.path().join("gone.mp3"));
    let err = validate_track(&AUDIO, &track, 0).await.unwrap_err();
    assert_eq!(reason(err), "file not found");
}

#[tokio::test]
async fn test_directory_is_not_a_track() {
    let dir = tempfile::tempdir().unwrap();
    let nested = dir.path().join("album.mp3");
    std::fs::create_dir(&nested).unwrap();
    let err = validate_track(&AUDIO, &Track::file(nested), 0).await.unwrap_err();
    assert_eq!(reason(err), "file not found");
}

#[tokio::test]
async fn test_buffer_tracks_skip_extension_checks() {
    assert!(validate_track(&AUDIO, &Track::buffer(vec![0u8; 16]), 3).await.is_ok());

    let err = validate_track(&AUDIO, &Track::buffer(Vec::new()), 3).await.unwrap_err();
    assert_eq!(err.to_string(), "Invalid track Buffer Track #4: buffer is empty");
}
