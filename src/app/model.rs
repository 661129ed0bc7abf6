//! Playback state machine: `Player` and `PlaybackState`.
//!
//! `Player` owns the catalog, the single mutable `PlaybackState` record and
//! the view cursor. Views and control surfaces call its operations and read
//! snapshots; they never write fields directly. Playback itself is delegated
//! to a `Transport` implementation (the audio thread in production, a
//! recorder in tests).

use std::time::Duration;

use rand::Rng;

use crate::audio::Transport;
use crate::catalog::{Catalog, Track, TrackId};

/// Skip direction for `Player::advance`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Direction {
    Next,
    Previous,
}

/// The single owned record of playback state.
#[derive(Debug, Clone)]
pub struct PlaybackState {
    /// Current track; always resolves to exactly one catalog entry.
    pub current: TrackId,
    /// Playback intent. May disagree with the backend after a load failure.
    pub playing: bool,
    /// Mirror of the backend's elapsed time for the current track.
    pub position: Duration,
    /// Authoritative only once the backend has reported it.
    pub duration: Option<Duration>,
    /// Output volume, clamped to 0..=100 on every write.
    pub volume_percent: u8,
    pub shuffle: bool,
    pub repeat: bool,
}

/// The playback state machine.
pub struct Player {
    catalog: Catalog,
    state: PlaybackState,
    transport: Box<dyn Transport>,

    /// View cursor over the playlist; independent of the current track.
    pub selected: TrackId,
}

impl Player {
    /// Create a player positioned on the first catalog track, paused.
    pub fn new(catalog: Catalog, transport: Box<dyn Transport>) -> Self {
        let first = catalog.first_id();
        Self {
            state: PlaybackState {
                current: first,
                playing: false,
                position: Duration::ZERO,
                duration: None,
                volume_percent: 50,
                shuffle: false,
                repeat: false,
            },
            selected: first,
            catalog,
            transport,
        }
    }

    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// The catalog entry for the current track.
    pub fn current_track(&self) -> &Track {
        self.catalog
            .get(self.state.current)
            .expect("current track id always resolves to a catalog entry")
    }

    /// Make `id` the current track and reset the position to zero.
    ///
    /// Unknown ids are a caller contract violation and are ignored. The load
    /// command is issued first, so a follow-up play command only takes
    /// effect once the backend has prepared the new source.
    pub fn select_track(&mut self, id: TrackId) {
        if !self.catalog.contains(id) {
            return;
        }

        self.state.current = id;
        self.state.position = Duration::ZERO;
        self.state.duration = None;
        self.selected = id;

        self.transport.load(id);
        if self.state.playing {
            self.transport.play();
        }
    }

    /// Flip playback intent and tell the backend.
    pub fn toggle_playback(&mut self) {
        self.state.playing = !self.state.playing;
        if self.state.playing {
            self.transport.play();
        } else {
            self.transport.pause();
        }
    }

    /// Skip to the adjacent track in catalog order, wrapping at both ends.
    ///
    /// With shuffle on, `Next` picks a uniformly random catalog track
    /// instead (reselecting the current one is allowed). `Previous` is
    /// always sequential.
    pub fn advance(&mut self, direction: Direction) {
        let target = match direction {
            Direction::Next if self.state.shuffle => self.random_id(),
            Direction::Next => self.catalog.next_after(self.state.current),
            Direction::Previous => self.catalog.previous_before(self.state.current),
        };
        self.select_track(target);
    }

    /// Backend notification: the current track played to completion.
    ///
    /// Repeat wins over shuffle: it restarts the same track. Otherwise this
    /// behaves exactly like `advance(Next)`.
    pub fn on_track_ended(&mut self, track: TrackId) {
        if track != self.state.current {
            return;
        }

        if self.state.repeat {
            self.state.position = Duration::ZERO;
            self.transport.seek_to(Duration::ZERO);
            self.transport.play();
            return;
        }

        self.advance(Direction::Next);
    }

    /// Seek to `target`, clamped to the known duration.
    ///
    /// An unknown duration clamps to zero, so scrubbing before metadata
    /// arrives is inert. The position itself is not updated here; the
    /// backend remains the source of truth and reports it back.
    pub fn seek(&mut self, target: Duration) {
        let max = self.state.duration.unwrap_or(Duration::ZERO);
        self.transport.seek_to(target.min(max));
    }

    /// Relative seek by `secs` from the last reported position.
    pub fn seek_by(&mut self, secs: i64) {
        let delta = Duration::from_secs(secs.unsigned_abs());
        let target = if secs < 0 {
            self.state.position.saturating_sub(delta)
        } else {
            self.state.position.saturating_add(delta)
        };
        self.seek(target);
    }

    /// Store the clamped volume and forward the fraction to the backend.
    pub fn set_volume(&mut self, percent: i32) {
        let clamped = percent.clamp(0, 100) as u8;
        self.state.volume_percent = clamped;
        self.transport.set_volume(f32::from(clamped) / 100.0);
    }

    /// Adjust volume by `step` percentage points.
    pub fn volume_by(&mut self, step: i32) {
        self.set_volume(i32::from(self.state.volume_percent) + step);
    }

    pub fn toggle_shuffle(&mut self) {
        self.state.shuffle = !self.state.shuffle;
    }

    pub fn toggle_repeat(&mut self) {
        self.state.repeat = !self.state.repeat;
    }

    /// Backend notification: elapsed time for `track`.
    pub fn on_position(&mut self, track: TrackId, position: Duration) {
        if track != self.state.current {
            return;
        }
        self.state.position = position;
    }

    /// Backend notification: authoritative duration for `track`.
    pub fn on_duration_known(&mut self, track: TrackId, duration: Duration) {
        if track != self.state.current {
            return;
        }
        self.state.duration = Some(duration);
    }

    /// Backend notification: `track` could not be loaded.
    ///
    /// Silent degradation: intent reverts to paused, nothing is retried.
    pub fn on_load_failed(&mut self, track: TrackId) {
        if track != self.state.current {
            return;
        }
        self.state.playing = false;
    }

    /// Move the view cursor down one row, wrapping.
    pub fn select_next_row(&mut self) {
        self.selected = self.catalog.next_after(self.selected);
    }

    /// Move the view cursor up one row, wrapping.
    pub fn select_prev_row(&mut self) {
        self.selected = self.catalog.previous_before(self.selected);
    }

    pub fn select_first(&mut self) {
        self.selected = self.catalog.first_id();
    }

    pub fn select_last(&mut self) {
        self.selected = self.catalog.last_id();
    }

    fn random_id(&self) -> TrackId {
        let index = rand::rng().random_range(0..self.catalog.len());
        self.catalog.id_at(index).expect("index is within the catalog")
    }
}
