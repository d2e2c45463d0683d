//! Ordered track storage and admission checks.
//!
//! [`TrackStore`] is plain data; it holds no locks and knows nothing about
//! playback. The orchestrator owns one behind its state mutex and is
//! responsible for keeping its current index consistent with
//! [`index_after_removal`].

use crate::error::{PlaylistError, Result};
use crate::track::Track;
use bridge_traits::playback::MediaInspector;

/// Ordered sequence of tracks in playback order.
#[derive(Debug, Clone, Default)]
pub struct TrackStore {
    tracks: Vec<Track>,
}

impl TrackStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole sequence.
    pub fn replace(&mut self, tracks: Vec<Track>) {
        self.tracks = tracks;
    }

    /// Append a track and return the new length.
    pub fn push(&mut self, track: Track) -> usize {
        self.tracks.push(track);
        self.tracks.len()
    }

    /// Remove the track at `index`. Out-of-range indices leave the store untouched.
    pub fn remove(&mut self, index: usize) -> Option<Track> {
        (index < self.tracks.len()).then(|| self.tracks.remove(index))
    }

    pub fn get(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn clear(&mut self) {
        self.tracks.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &Track> {
        self.tracks.iter()
    }

    /// Cloned snapshot of the sequence.
    pub fn to_vec(&self) -> Vec<Track> {
        self.tracks.clone()
    }

    /// Largest valid index, or 0 when empty.
    pub fn last_index(&self) -> usize {
        self.tracks.len().saturating_sub(1)
    }
}

/// Where the current index should point after removing `removed`.
///
/// Removing an earlier track shifts the current one down by one. Removing the
/// current track leaves the index on its successor, clamped to the new end.
///
/// ```
/// use core_playback::store::index_after_removal;
///
/// // [A, B, C] playing C, remove A: C is now at 1
/// assert_eq!(index_after_removal(2, 0, 2), 1);
/// // [A, B, C] playing C, remove C: clamp to B
/// assert_eq!(index_after_removal(2, 2, 2), 1);
/// ```
pub fn index_after_removal(current: usize, removed: usize, new_len: usize) -> usize {
    let shifted = if removed < current { current - 1 } else { current };
    shifted.min(new_len.saturating_sub(1))
}

/// Check that a track may enter the playlist.
///
/// File tracks need an extension the inspector accepts and an existing
/// regular file. Buffer tracks must be non-empty. `position` is only used to
/// label the track in the error.
pub async fn validate_track(
    inspector: &dyn MediaInspector,
    track: &Track,
    position: usize,
) -> Result<()> {
    let label = track.label(position);
    match track {
        Track::File { path } => {
            let supported = track
                .extension()
                .map(|ext| inspector.is_format_supported(&ext))
                .unwrap_or(false);
            if !supported {
                return Err(PlaylistError::validation(
                    label,
                    "unsupported format or invalid extension",
                ));
            }
            if !core_async::fs::is_file(path).await {
                return Err(PlaylistError::validation(label, "file not found"));
            }
            Ok(())
        }
        Track::Buffer { data } => {
            if data.is_empty() {
                return Err(PlaylistError::validation(label, "buffer is empty"));
            }
            Ok(())
        }
    }
}
