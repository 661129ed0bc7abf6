use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Identifier of a track inside the catalog. Stable for the process lifetime.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(transparent)]
pub struct TrackId(pub u32);

/// One playlist entry. Immutable after the catalog is built.
#[derive(Debug, Clone, Deserialize)]
pub struct Track {
    pub id: TrackId,
    pub title: String,
    pub artist: String,
    pub album: String,
    /// Display string only; the playable duration comes from the audio backend.
    pub duration_label: String,
    pub cover_url: String,
    /// Audio file path, resolved against the configured music directory at startup.
    pub source: PathBuf,
}

/// The fixed, ordered list of playable tracks.
///
/// Next/previous are defined over catalog order and wrap at both ends, so
/// every id produced here resolves back into the catalog.
#[derive(Debug, Clone)]
pub struct Catalog {
    tracks: Vec<Track>,
}

impl Catalog {
    /// Build a catalog from an ordered list of tracks. Must not be empty.
    pub fn new(tracks: Vec<Track>) -> Self {
        assert!(!tracks.is_empty(), "catalog must contain at least one track");
        Self { tracks }
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// Look up a track by id.
    pub fn get(&self, id: TrackId) -> Option<&Track> {
        self.tracks.iter().find(|t| t.id == id)
    }

    pub fn contains(&self, id: TrackId) -> bool {
        self.get(id).is_some()
    }

    /// Position of `id` in catalog order.
    pub fn position(&self, id: TrackId) -> Option<usize> {
        self.tracks.iter().position(|t| t.id == id)
    }

    pub fn first_id(&self) -> TrackId {
        self.tracks[0].id
    }

    pub fn last_id(&self) -> TrackId {
        self.tracks[self.tracks.len() - 1].id
    }

    /// Track id at `index` in catalog order.
    pub fn id_at(&self, index: usize) -> Option<TrackId> {
        self.tracks.get(index).map(|t| t.id)
    }

    /// The id following `id` in catalog order, wrapping last -> first.
    /// Unknown ids resolve to the first track.
    pub fn next_after(&self, id: TrackId) -> TrackId {
        match self.position(id) {
            Some(pos) => self.tracks[(pos + 1) % self.tracks.len()].id,
            None => self.first_id(),
        }
    }

    /// The id preceding `id` in catalog order, wrapping first -> last.
    /// Unknown ids resolve to the first track.
    pub fn previous_before(&self, id: TrackId) -> TrackId {
        match self.position(id) {
            Some(0) => self.last_id(),
            Some(pos) => self.tracks[pos - 1].id,
            None => self.first_id(),
        }
    }

    /// Re-anchor relative `source` paths under `base`. Absolute paths and a
    /// missing base are left untouched.
    pub fn resolved_against(mut self, base: Option<&Path>) -> Self {
        if let Some(base) = base {
            for track in &mut self.tracks {
                if track.source.is_relative() {
                    track.source = base.join(&track.source);
                }
            }
        }
        self
    }
}
