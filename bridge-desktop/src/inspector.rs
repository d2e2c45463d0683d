//! Media inspector backed by `lofty`.

use async_trait::async_trait;
use bridge_traits::{
    error::{BridgeError, Result},
    playback::{AudioCodec, MediaDescriptor, MediaInspector},
};
use lofty::config::ParseOptions;
use lofty::file::{AudioFile, FileType, TaggedFileExt};
use lofty::probe::Probe;
use lofty::tag::Accessor;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Extensions rodio can decode with its default features.
pub const DEFAULT_EXTENSIONS: &[&str] = &["mp3", "wav", "flac", "ogg", "oga"];

/// Checks extensions against a whitelist and reads container properties and
/// tags with `lofty`.
#[derive(Debug, Clone)]
pub struct LoftyMediaInspector {
    extensions: Vec<String>,
    parse_options: ParseOptions,
}

impl LoftyMediaInspector {
    pub fn new() -> Self {
        Self::with_extensions(DEFAULT_EXTENSIONS.iter().copied())
    }

    /// Restrict or extend the accepted extensions. Matching ignores case.
    pub fn with_extensions<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            extensions: extensions
                .into_iter()
                .map(|ext| ext.as_ref().trim_start_matches('.').to_ascii_lowercase())
                .collect(),
            parse_options: ParseOptions::new(),
        }
    }

    fn codec_for(file_type: FileType) -> AudioCodec {
        match file_type {
            FileType::Mpeg => AudioCodec::Mp3,
            FileType::Flac => AudioCodec::Flac,
            FileType::Vorbis => AudioCodec::Vorbis,
            FileType::Wav => AudioCodec::Wav,
            other => AudioCodec::Other(format!("{:?}", other).to_ascii_lowercase()),
        }
    }

    fn probe(path: &Path, parse_options: ParseOptions) -> Result<MediaDescriptor> {
        let tagged_file = Probe::open(path)
            .map_err(|e| BridgeError::Decode(format!("Failed to open {}: {}", path.display(), e)))?
            .options(parse_options)
            .guess_file_type()?
            .read()
            .map_err(|e| BridgeError::Decode(format!("Failed to parse {}: {}", path.display(), e)))?;

        let properties = tagged_file.properties();
        let duration = properties.duration();

        let mut descriptor = MediaDescriptor::new(Self::codec_for(tagged_file.file_type()))
            .with_duration((!duration.is_zero()).then_some(duration));
        descriptor.bitrate = properties.audio_bitrate();
        descriptor.sample_rate = properties.sample_rate();
        descriptor.channels = properties.channels();

        if let Some(tag) = tagged_file.primary_tag().or_else(|| tagged_file.first_tag()) {
            descriptor.title = tag.title().map(|s| s.trim().to_string());
            descriptor.artist = tag.artist().map(|s| s.trim().to_string());
        }

        Ok(descriptor)
    }
}

impl Default for LoftyMediaInspector {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MediaInspector for LoftyMediaInspector {
    fn is_format_supported(&self, extension: &str) -> bool {
        let extension = extension.trim_start_matches('.');
        self.extensions
            .iter()
            .any(|known| known.eq_ignore_ascii_case(extension))
    }

    async fn metadata(&self, path: &Path) -> Result<MediaDescriptor> {
        let owned: PathBuf = path.to_path_buf();
        let parse_options = self.parse_options;
        let descriptor = core_async::task::spawn_blocking(move || Self::probe(&owned, parse_options))
            .await
            .map_err(|e| BridgeError::OperationFailed(format!("Metadata task failed: {}", e)))??;

        debug!(
            path = %path.display(),
            duration_secs = ?descriptor.duration_secs(),
            "Read media metadata"
        );
        Ok(descriptor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_extensions() {
        let inspector = LoftyMediaInspector::new();
        assert!(inspector.is_format_supported("mp3"));
        assert!(inspector.is_format_supported("WAV"));
        assert!(inspector.is_format_supported(".flac"));
        assert!(!inspector.is_format_supported("txt"));
        assert!(!inspector.is_format_supported(""));
    }

    #[test]
    fn test_custom_extensions() {
        let inspector = LoftyMediaInspector::with_extensions([".OGG"]);
        assert!(inspector.is_format_supported("ogg"));
        assert!(!inspector.is_format_supported("mp3"));
    }

    #[test]
    fn test_codec_mapping() {
        assert_eq!(LoftyMediaInspector::codec_for(FileType::Wav), AudioCodec::Wav);
        assert_eq!(LoftyMediaInspector::codec_for(FileType::Mpeg), AudioCodec::Mp3);
        assert!(matches!(
            LoftyMediaInspector::codec_for(FileType::Aac),
            AudioCodec::Other(_)
        ));
    }

    #[tokio::test]
    async fn test_metadata_missing_file() {
        let inspector = LoftyMediaInspector::new();
        let result = inspector.metadata(Path::new("/definitely/not/here.wav")).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_metadata_rejects_garbage() {
        let mut file = tempfile::Builder::new().suffix(".wav").tempfile().unwrap();
        file.write_all(b"this is not a riff header").unwrap();

        let inspector = LoftyMediaInspector::new();
        assert!(inspector.metadata(file.path()).await.is_err());
    }
}
