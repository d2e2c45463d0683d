//! Track descriptors.

use bytes::Bytes;
use std::fmt;
use std::path::{Path, PathBuf};

/// One playlist item: a file on disk or an encoded audio buffer in memory.
///
/// Cloning is cheap; buffer contents are reference counted.
#[derive(Clone, PartialEq, Eq)]
pub enum Track {
    File { path: PathBuf },
    Buffer { data: Bytes },
}

impl Track {
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Track::File { path: path.into() }
    }

    pub fn buffer(data: impl Into<Bytes>) -> Self {
        Track::Buffer { data: data.into() }
    }

    /// Human-readable label for logs and events.
    ///
    /// Files use their path. Buffers are named by 1-based `position` since
    /// their bytes never leave the core.
    pub fn label(&self, position: usize) -> String {
        match self {
            Track::File { path } => path.display().to_string(),
            Track::Buffer { .. } => format!("Buffer Track #{}", position + 1),
        }
    }

    /// Lowercased extension of a file track, without the dot.
    pub fn extension(&self) -> Option<String> {
        match self {
            Track::File { path } => path
                .extension()
                .and_then(|ext| ext.to_str())
                .map(|ext| ext.to_ascii_lowercase()),
            Track::Buffer { .. } => None,
        }
    }

    pub fn path(&self) -> Option<&Path> {
        match self {
            Track::File { path } => Some(path),
            Track::Buffer { .. } => None,
        }
    }

    pub fn is_buffer(&self) -> bool {
        matches!(self, Track::Buffer { .. })
    }
}

// Buffers print their size only.
impl fmt::Debug for Track {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Track::File { path } => f.debug_struct("File").field("path", path).finish(),
            Track::Buffer { data } => f.debug_struct("Buffer").field("len", &data.len()).finish(),
        }
    }
}

impl From<PathBuf> for Track {
    fn from(path: PathBuf) -> Self {
        Track::file(path)
    }
}

impl From<&Path> for Track {
    fn from(path: &Path) -> Self {
        Track::file(path)
    }
}

impl From<&str> for Track {
    fn from(path: &str) -> Self {
        Track::file(path)
    }
}

impl From<String> for Track {
    fn from(path: String) -> Self {
        Track::file(path)
    }
}

impl From<Bytes> for Track {
    fn from(data: Bytes) -> Self {
        Track::buffer(data)
    }
}

impl From<Vec<u8>> for Track {
    fn from(data: Vec<u8>) -> Self {
        Track::buffer(data)
    }
}
