use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;
use std::time::Duration;

use super::*;
use crate::audio::Transport;
use crate::catalog::{Catalog, Track, TrackId};

#[derive(Debug, Clone, PartialEq)]
enum Cmd {
    Load(TrackId),
    Play,
    Pause,
    SeekTo(Duration),
    SetVolume(f32),
}

type CmdLog = Rc<RefCell<Vec<Cmd>>>;

struct Recorder {
    log: CmdLog,
}

impl Recorder {
    fn new() -> (Box<dyn Transport>, CmdLog) {
        let log: CmdLog = Rc::new(RefCell::new(Vec::new()));
        (Box::new(Recorder { log: log.clone() }), log)
    }
}

impl Transport for Recorder {
    fn load(&self, track: TrackId) {
        self.log.borrow_mut().push(Cmd::Load(track));
    }

    fn play(&self) {
        self.log.borrow_mut().push(Cmd::Play);
    }

    fn pause(&self) {
        self.log.borrow_mut().push(Cmd::Pause);
    }

    fn seek_to(&self, position: Duration) {
        self.log.borrow_mut().push(Cmd::SeekTo(position));
    }

    fn set_volume(&self, volume: f32) {
        self.log.borrow_mut().push(Cmd::SetVolume(volume));
    }
}

fn t(id: u32) -> Track {
    Track {
        id: TrackId(id),
        title: format!("Track {id}"),
        artist: "Artist".into(),
        album: "Album".into(),
        duration_label: "0:00".into(),
        cover_url: String::new(),
        source: PathBuf::from(format!("track-{id}.mp3")),
    }
}

fn catalog(n: u32) -> Catalog {
    Catalog::new((1..=n).map(t).collect())
}

fn player(n: u32) -> (Player, CmdLog) {
    let (transport, log) = Recorder::new();
    (Player::new(catalog(n), transport), log)
}

#[test]
fn new_player_starts_on_first_track_paused() {
    let (player, log) = player(5);
    assert_eq!(player.state().current, TrackId(1));
    assert!(!player.state().playing);
    assert_eq!(player.state().position, Duration::ZERO);
    assert_eq!(player.state().duration, None);
    assert_eq!(player.state().volume_percent, 50);
    assert!(log.borrow().is_empty());
}

#[test]
fn select_track_resets_position_and_loads() {
    let (mut player, log) = player(5);
    player.on_duration_known(TrackId(1), Duration::from_secs(100));
    player.on_position(TrackId(1), Duration::from_secs(42));

    player.select_track(TrackId(2));

    assert_eq!(player.state().current, TrackId(2));
    assert_eq!(player.state().position, Duration::ZERO);
    assert_eq!(player.state().duration, None);
    assert_eq!(*log.borrow(), vec![Cmd::Load(TrackId(2))]);
}

#[test]
fn select_track_replays_when_playing() {
    let (mut player, log) = player(5);
    player.toggle_playback();
    player.select_track(TrackId(3));

    assert_eq!(
        *log.borrow(),
        vec![Cmd::Play, Cmd::Load(TrackId(3)), Cmd::Play]
    );
}

#[test]
fn select_track_with_unknown_id_is_a_noop() {
    let (mut player, log) = player(5);
    player.select_track(TrackId(99));

    assert_eq!(player.state().current, TrackId(1));
    assert!(log.borrow().is_empty());
}

#[test]
fn advance_next_cycles_in_catalog_order() {
    let (mut player, _log) = player(5);

    let mut seen = Vec::new();
    for _ in 0..5 {
        player.advance(Direction::Next);
        seen.push(player.state().current.0);
    }
    assert_eq!(seen, vec![2, 3, 4, 5, 1]);
}

#[test]
fn advance_next_wraps_last_to_first() {
    let (mut player, _log) = player(5);
    player.select_track(TrackId(5));
    player.advance(Direction::Next);
    assert_eq!(player.state().current, TrackId(1));
}

#[test]
fn advance_previous_wraps_first_to_last() {
    let (mut player, _log) = player(5);
    player.advance(Direction::Previous);
    assert_eq!(player.state().current, TrackId(5));
}

#[test]
fn advance_previous_inverts_advance_next() {
    let (mut player, _log) = player(5);
    for start in 1..=5u32 {
        player.select_track(TrackId(start));
        player.advance(Direction::Next);
        player.advance(Direction::Previous);
        assert_eq!(player.state().current, TrackId(start));
    }
}

#[test]
fn advancing_catalog_length_times_returns_to_start() {
    for n in [1u32, 2, 5] {
        let (mut player, _log) = player(n);
        let start = player.state().current;
        for _ in 0..n {
            player.advance(Direction::Next);
        }
        assert_eq!(player.state().current, start, "catalog of size {n}");
    }
}

#[test]
fn shuffled_next_stays_inside_the_catalog() {
    let (mut player, _log) = player(5);
    player.toggle_shuffle();

    for _ in 0..50 {
        player.advance(Direction::Next);
        assert!(player.catalog().contains(player.state().current));
        assert_eq!(player.state().position, Duration::ZERO);
    }
}

#[test]
fn previous_is_sequential_even_when_shuffled() {
    let (mut player, _log) = player(5);
    player.select_track(TrackId(3));
    player.toggle_shuffle();

    player.advance(Direction::Previous);
    assert_eq!(player.state().current, TrackId(2));
}

#[test]
fn ended_with_repeat_restarts_the_same_track() {
    let (mut player, log) = player(5);
    player.toggle_playback();
    player.on_duration_known(TrackId(1), Duration::from_secs(90));
    player.on_position(TrackId(1), Duration::from_secs(90));
    player.toggle_repeat();

    player.on_track_ended(TrackId(1));

    assert_eq!(player.state().current, TrackId(1));
    assert_eq!(player.state().position, Duration::ZERO);
    assert!(player.state().playing);
    let log = log.borrow();
    assert_eq!(
        &log[log.len() - 2..],
        &[Cmd::SeekTo(Duration::ZERO), Cmd::Play]
    );
}

#[test]
fn repeat_wins_over_shuffle_on_track_end() {
    let (mut player, _log) = player(5);
    player.select_track(TrackId(4));
    player.toggle_shuffle();
    player.toggle_repeat();

    player.on_track_ended(TrackId(4));
    assert_eq!(player.state().current, TrackId(4));
}

#[test]
fn ended_without_repeat_advances_and_keeps_playing() {
    let (mut player, log) = player(5);
    player.toggle_playback();
    player.select_track(TrackId(2));

    player.on_track_ended(TrackId(2));

    assert_eq!(player.state().current, TrackId(3));
    assert!(player.state().playing);
    let log = log.borrow();
    assert_eq!(&log[log.len() - 2..], &[Cmd::Load(TrackId(3)), Cmd::Play]);
}

#[test]
fn stale_ended_notification_is_discarded() {
    let (mut player, log) = player(5);
    player.select_track(TrackId(2));
    log.borrow_mut().clear();

    player.on_track_ended(TrackId(1));

    assert_eq!(player.state().current, TrackId(2));
    assert!(log.borrow().is_empty());
}

#[test]
fn stale_duration_and_position_are_discarded() {
    let (mut player, _log) = player(5);
    player.select_track(TrackId(2));

    player.on_duration_known(TrackId(1), Duration::from_secs(100));
    player.on_position(TrackId(1), Duration::from_secs(10));

    assert_eq!(player.state().duration, None);
    assert_eq!(player.state().position, Duration::ZERO);
}

#[test]
fn set_volume_clamps_to_percent_range() {
    let (mut player, log) = player(5);

    player.set_volume(150);
    assert_eq!(player.state().volume_percent, 100);

    player.set_volume(-5);
    assert_eq!(player.state().volume_percent, 0);

    player.set_volume(72);
    assert_eq!(player.state().volume_percent, 72);

    assert_eq!(
        *log.borrow(),
        vec![
            Cmd::SetVolume(1.0),
            Cmd::SetVolume(0.0),
            Cmd::SetVolume(0.72)
        ]
    );
}

#[test]
fn volume_by_steps_and_saturates() {
    let (mut player, _log) = player(5);
    player.set_volume(95);
    player.volume_by(10);
    assert_eq!(player.state().volume_percent, 100);
    player.volume_by(-30);
    assert_eq!(player.state().volume_percent, 70);
}

#[test]
fn seek_clamps_to_reported_duration() {
    let (mut player, log) = player(5);
    player.on_duration_known(TrackId(1), Duration::from_secs(100));

    player.seek(Duration::from_secs(150));
    player.seek(Duration::from_secs(50));

    assert_eq!(
        *log.borrow(),
        vec![
            Cmd::SeekTo(Duration::from_secs(100)),
            Cmd::SeekTo(Duration::from_secs(50))
        ]
    );
}

#[test]
fn seek_with_unknown_duration_clamps_to_zero() {
    let (mut player, log) = player(5);
    player.seek(Duration::from_secs(10));
    assert_eq!(*log.borrow(), vec![Cmd::SeekTo(Duration::ZERO)]);
}

#[test]
fn seek_does_not_update_position_optimistically() {
    let (mut player, _log) = player(5);
    player.on_duration_known(TrackId(1), Duration::from_secs(100));
    player.on_position(TrackId(1), Duration::from_secs(10));

    player.seek(Duration::from_secs(60));
    assert_eq!(player.state().position, Duration::from_secs(10));
}

#[test]
fn seek_by_is_relative_to_the_reported_position() {
    let (mut player, log) = player(5);
    player.on_duration_known(TrackId(1), Duration::from_secs(100));
    player.on_position(TrackId(1), Duration::from_secs(3));

    player.seek_by(-10);
    player.seek_by(30);

    assert_eq!(
        *log.borrow(),
        vec![
            Cmd::SeekTo(Duration::ZERO),
            Cmd::SeekTo(Duration::from_secs(33))
        ]
    );
}

#[test]
fn toggle_playback_flips_intent_and_commands_backend() {
    let (mut player, log) = player(5);

    player.toggle_playback();
    assert!(player.state().playing);
    player.toggle_playback();
    assert!(!player.state().playing);

    assert_eq!(*log.borrow(), vec![Cmd::Play, Cmd::Pause]);
}

#[test]
fn shuffle_and_repeat_toggles_have_no_transport_side_effect() {
    let (mut player, log) = player(5);

    player.toggle_shuffle();
    player.toggle_repeat();
    player.toggle_shuffle();
    player.toggle_repeat();

    assert!(log.borrow().is_empty());
}

#[test]
fn load_failure_reverts_playing_intent() {
    let (mut player, _log) = player(5);
    player.toggle_playback();
    assert!(player.state().playing);

    player.on_load_failed(TrackId(1));
    assert!(!player.state().playing);
}

#[test]
fn stale_load_failure_is_discarded() {
    let (mut player, _log) = player(5);
    player.toggle_playback();
    player.select_track(TrackId(2));

    player.on_load_failed(TrackId(1));
    assert!(player.state().playing);
}

#[test]
fn cursor_rows_wrap_in_both_directions() {
    let (mut player, _log) = player(3);

    player.select_prev_row();
    assert_eq!(player.selected, TrackId(3));
    player.select_next_row();
    assert_eq!(player.selected, TrackId(1));

    player.select_last();
    assert_eq!(player.selected, TrackId(3));
    player.select_first();
    assert_eq!(player.selected, TrackId(1));
}

#[test]
fn select_track_moves_the_cursor_with_it() {
    let (mut player, _log) = player(5);
    player.select_track(TrackId(4));
    assert_eq!(player.selected, TrackId(4));
}
