//! Async filesystem probes re-exported from the underlying runtime.
//!
//! The playlist core only needs to check for existence and read small files,
//! so that is all this module exposes.

pub use tokio::fs::{metadata, read, try_exists};

use std::path::Path;

/// Returns `true` when `path` exists and is a regular file.
///
/// Permission errors and dangling links are reported as "not a file" rather
/// than propagated; callers use this for validation, not for I/O.
pub async fn is_file(path: impl AsRef<Path>) -> bool {
    match metadata(path.as_ref()).await {
        Ok(meta) => meta.is_file(),
        Err(_) => false,
    }
}
