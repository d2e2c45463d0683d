//! Playback bridge traits and supporting audio types.
//!
//! The playlist core drives exactly one audio engine through
//! [`PlaybackResource`] and consults a [`MediaInspector`] to decide which files
//! it is willing to queue. Neither trait decodes anything in the core; hosts
//! supply concrete implementations (see `bridge-desktop`).

use crate::{error::Result, platform::PlatformSendSync};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Supported audio codec identifiers.
///
/// Use [`AudioCodec::Other`] for codecs not explicitly listed here.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioCodec {
    Mp3,
    Flac,
    Vorbis,
    Wav,
    /// Codec is unknown or not yet mapped to a dedicated variant.
    Unknown,
    /// Vendor- or platform-specific codec.
    Other(String),
}

impl AudioCodec {
    /// Map a file extension (without the dot, any case) to a codec.
    pub fn from_extension(extension: &str) -> Self {
        match extension.to_ascii_lowercase().as_str() {
            "mp3" => AudioCodec::Mp3,
            "flac" => AudioCodec::Flac,
            "ogg" | "oga" => AudioCodec::Vorbis,
            "wav" | "wave" => AudioCodec::Wav,
            "" => AudioCodec::Unknown,
            other => AudioCodec::Other(other.to_string()),
        }
    }
}

/// Descriptive metadata for a media file.
///
/// Only used for logging; every field is optional because inspectors report
/// what the container exposes and nothing more.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MediaDescriptor {
    pub codec: Option<AudioCodec>,
    pub duration: Option<Duration>,
    pub sample_rate: Option<u32>,
    pub channels: Option<u8>,
    /// Average bitrate in kbps.
    pub bitrate: Option<u32>,
    pub title: Option<String>,
    pub artist: Option<String>,
}

impl MediaDescriptor {
    pub fn new(codec: AudioCodec) -> Self {
        Self {
            codec: Some(codec),
            ..Self::default()
        }
    }

    pub fn with_duration(mut self, duration: Option<Duration>) -> Self {
        self.duration = duration;
        self
    }

    /// Total duration in whole seconds, when known.
    pub fn duration_secs(&self) -> Option<u64> {
        self.duration.map(|d| d.as_secs())
    }
}

/// A single audio output the playlist core drives.
///
/// The resource holds at most one loaded item. It offers no completion
/// callback; callers discover the end of an item by sampling
/// [`is_playing`](PlaybackResource::is_playing).
///
/// Implementations must make `play`, `pause` and `stop` idempotent. Loading a
/// new item replaces whatever was loaded before.
#[cfg_attr(target_arch = "wasm32", async_trait::async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait::async_trait)]
pub trait PlaybackResource: PlatformSendSync {
    /// Load an audio file. Fails if the file is unreadable or malformed.
    async fn load_file(&self, path: &Path) -> Result<()>;

    /// Load an in-memory encoded audio buffer.
    async fn load_buffer(&self, data: Bytes) -> Result<()>;

    /// Start or resume output of the loaded item.
    async fn play(&self) -> Result<()>;

    /// Pause output, keeping the loaded item and its position.
    async fn pause(&self) -> Result<()>;

    /// Stop output and discard the loaded item.
    async fn stop(&self) -> Result<()>;

    /// Whether audio is currently being produced.
    async fn is_playing(&self) -> Result<bool>;

    /// Current output volume in `0.0..=1.0`.
    async fn volume(&self) -> Result<f32>;

    /// Set output volume. Values are normalized to `0.0..=1.0`.
    async fn set_volume(&self, volume: f32) -> Result<()>;
}

/// Format support and metadata lookup for media files.
#[cfg_attr(target_arch = "wasm32", async_trait::async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait::async_trait)]
pub trait MediaInspector: PlatformSendSync {
    /// Whether files with `extension` (no leading dot, any case) can be played.
    fn is_format_supported(&self, extension: &str) -> bool;

    /// Read container metadata for `path`.
    async fn metadata(&self, path: &Path) -> Result<MediaDescriptor>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BridgeError;
    use mockall::mock;
    use std::path::PathBuf;

    mock! {
        pub Inspector {}

        #[async_trait::async_trait]
        impl MediaInspector for Inspector {
            fn is_format_supported(&self, extension: &str) -> bool;
            async fn metadata(&self, path: &Path) -> Result<MediaDescriptor>;
        }
    }

    #[test]
    fn codec_from_extension_is_case_insensitive() {
        assert_eq!(AudioCodec::from_extension("MP3"), AudioCodec::Mp3);
        assert_eq!(AudioCodec::from_extension("oga"), AudioCodec::Vorbis);
        assert_eq!(AudioCodec::from_extension("Wav"), AudioCodec::Wav);
        assert_eq!(AudioCodec::from_extension(""), AudioCodec::Unknown);
        assert_eq!(
            AudioCodec::from_extension("xyz"),
            AudioCodec::Other("xyz".to_string())
        );
    }

    #[test]
    fn descriptor_duration_secs() {
        let descriptor = MediaDescriptor::new(AudioCodec::Flac)
            .with_duration(Some(Duration::from_millis(61_900)));
        assert_eq!(descriptor.duration_secs(), Some(61));
        assert_eq!(MediaDescriptor::default().duration_secs(), None);
    }

    #[test]
    fn descriptor_serializes_codec_lowercase() {
        let descriptor = MediaDescriptor::new(AudioCodec::Mp3);
        let json = serde_json::to_value(&descriptor).unwrap();
        assert_eq!(json["codec"], "mp3");
    }

    #[tokio::test]
    async fn inspector_is_object_safe() {
        let mut mock = MockInspector::new();
        mock.expect_is_format_supported()
            .returning(|ext| ext.eq_ignore_ascii_case("wav"));
        mock.expect_metadata()
            .returning(|_| Err(BridgeError::Unsupported("no tags".into())));

        let inspector: Box<dyn MediaInspector> = Box::new(mock);
        assert!(inspector.is_format_supported("WAV"));
        assert!(!inspector.is_format_supported("txt"));
        assert!(inspector
            .metadata(&PathBuf::from("/tmp/a.wav"))
            .await
            .is_err());
    }
}
