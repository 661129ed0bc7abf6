//! Audio-backend types: commands, notifications, shared playback info and
//! the `Transport` seam the state machine talks through.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use thiserror::Error;

use crate::catalog::TrackId;

/// Commands accepted by the audio thread.
#[derive(Debug)]
pub enum AudioCmd {
    /// Load the given track into a fresh, paused sink.
    Load(TrackId),
    /// Resume the loaded track.
    Play,
    /// Pause the loaded track.
    Pause,
    /// Rebuild the sink at the given offset, preserving pause state.
    SeekTo(Duration),
    /// Set the output volume as a fraction in `0.0..=1.0`.
    SetVolume(f32),
    /// Quit the audio thread, fading out over `fade_out_ms` milliseconds.
    Quit { fade_out_ms: u64 },
}

/// Notifications emitted by the audio thread.
///
/// Each carries the id of the track it originated from; the state machine
/// discards notifications for a track that is no longer current.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum AudioEvent {
    /// The backend learned the authoritative duration of `track`.
    DurationKnown { track: TrackId, duration: Duration },
    /// `track` played to completion.
    Ended { track: TrackId },
    /// `track` could not be opened or decoded.
    LoadFailed { track: TrackId },
}

/// Runtime playback information shared with the UI.
#[derive(Debug, Clone)]
pub struct PlaybackInfo {
    /// Track currently loaded in the backend (if any).
    pub track: Option<TrackId>,
    /// Elapsed playback time for the loaded track.
    pub elapsed: Duration,
    /// Whether the backend is actually producing audio.
    pub playing: bool,
}

impl Default for PlaybackInfo {
    fn default() -> Self {
        Self {
            track: None,
            elapsed: Duration::ZERO,
            playing: false,
        }
    }
}

pub type PlaybackHandle = Arc<Mutex<PlaybackInfo>>;

/// Commands the playback state machine issues to its audio backend.
///
/// `AudioHandle` forwards them to the audio thread; tests substitute a
/// recording implementation.
pub trait Transport {
    fn load(&self, track: TrackId);
    fn play(&self);
    fn pause(&self);
    fn seek_to(&self, position: Duration);
    fn set_volume(&self, volume: f32);
}

/// Failure to turn a track source into a playable sink.
#[derive(Debug, Error)]
pub enum AudioError {
    #[error("failed to open {path}: {source}")]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to decode {path}: {source}")]
    Decode {
        path: PathBuf,
        source: rodio::decoder::DecoderError,
    },
}
