use std::sync::mpsc;
use std::time::Duration;

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::{Direction, Player};
use crate::audio::{AudioEvent, AudioPlayer};
use crate::catalog::TrackId;
use crate::config;
use crate::mpris::{ControlCmd, MprisHandle};
use crate::ui;

use super::mpris_sync::update_mpris;

/// State tracked by the runtime event loop across iterations.
pub struct EventLoopState {
    /// Internal two-key prefix state used for `gg` handling.
    pub pending_gg: bool,
    /// Hit areas from the most recent draw, for mouse dispatch.
    pub areas: ui::UiAreas,
    /// Last-known current track as emitted to MPRIS.
    pub last_mpris_track: Option<TrackId>,
    /// Last-known playing intent as emitted to MPRIS.
    pub last_mpris_playing: bool,
    /// Last duration emitted in MPRIS metadata.
    pub last_mpris_duration: Option<Duration>,
}

impl EventLoopState {
    /// Construct a new `EventLoopState` seeded from `player`.
    pub fn new(player: &Player) -> Self {
        Self {
            pending_gg: false,
            areas: ui::UiAreas::default(),
            last_mpris_track: None,
            last_mpris_playing: player.state().playing,
            last_mpris_duration: None,
        }
    }
}

/// Main terminal event loop: applies backend notifications to the state
/// machine, handles input, draws the UI and keeps MPRIS in sync. Returns
/// `Ok(())` when shutdown is requested.
pub fn run(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    player: &mut Player,
    audio_player: &AudioPlayer,
    mpris: &MprisHandle,
    control_tx: &mpsc::Sender<ControlCmd>,
    control_rx: &mpsc::Receiver<ControlCmd>,
    state: &mut EventLoopState,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        // Apply backend notifications; the appliers discard stale track ids.
        while let Some(ev) = audio_player.try_recv_event() {
            match ev {
                AudioEvent::DurationKnown { track, duration } => {
                    player.on_duration_known(track, duration);
                }
                AudioEvent::Ended { track } => player.on_track_ended(track),
                AudioEvent::LoadFailed { track } => player.on_load_failed(track),
            }
        }

        // Mirror the backend's elapsed time for the loaded track.
        {
            let handle = audio_player.playback_handle();
            if let Ok(info) = handle.lock() {
                if let Some(track) = info.track {
                    player.on_position(track, info.elapsed);
                }
            }
        }

        // Keep MPRIS in sync regardless of where the change came from
        // (keyboard, mouse, media keys, auto-advance).
        let (current, playing, duration) = {
            let s = player.state();
            (s.current, s.playing, s.duration)
        };
        if Some(current) != state.last_mpris_track
            || playing != state.last_mpris_playing
            || duration != state.last_mpris_duration
        {
            update_mpris(mpris, player);
            state.last_mpris_track = Some(current);
            state.last_mpris_playing = playing;
            state.last_mpris_duration = duration;
        }

        terminal.draw(|f| {
            state.areas = ui::draw(f, player, &settings.ui, &settings.controls);
        })?;

        while let Ok(cmd) = control_rx.try_recv() {
            if handle_control_cmd(cmd, settings, player, audio_player) {
                return Ok(());
            }
        }

        if event::poll(Duration::from_millis(50))? {
            match event::read()? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if handle_key_event(key, settings, player, audio_player, control_tx) {
                        break;
                    }
                    if !matches!(key.code, KeyCode::Char('g')) {
                        state.pending_gg = false;
                    } else if state.pending_gg {
                        state.pending_gg = false;
                        player.select_first();
                    } else {
                        state.pending_gg = true;
                    }
                }
                Event::Mouse(mouse) => {
                    state.pending_gg = false;
                    handle_mouse_event(mouse, player, state);
                }
                _ => {}
            }
        }
    }

    Ok(())
}

/// Handle one MPRIS control command; `true` requests shutdown.
fn handle_control_cmd(
    cmd: ControlCmd,
    settings: &config::Settings,
    player: &mut Player,
    audio_player: &AudioPlayer,
) -> bool {
    match cmd {
        ControlCmd::Quit => {
            audio_player.quit_softly(Duration::from_millis(settings.audio.quit_fade_out_ms));
            return true;
        }
        ControlCmd::Play => {
            if !player.state().playing {
                player.toggle_playback();
            }
        }
        ControlCmd::Pause => {
            if player.state().playing {
                player.toggle_playback();
            }
        }
        ControlCmd::PlayPause => {
            player.toggle_playback();
        }
        ControlCmd::Stop => {
            if player.state().playing {
                player.toggle_playback();
            }
            player.seek(Duration::ZERO);
        }
        ControlCmd::Next => {
            player.advance(Direction::Next);
        }
        ControlCmd::Prev => {
            player.advance(Direction::Previous);
        }
    }

    false
}

/// Handle one key press; `true` requests shutdown.
fn handle_key_event(
    key: KeyEvent,
    settings: &config::Settings,
    player: &mut Player,
    audio_player: &AudioPlayer,
    control_tx: &mpsc::Sender<ControlCmd>,
) -> bool {
    match key.code {
        KeyCode::Char('q') => {
            audio_player.quit_softly(Duration::from_millis(settings.audio.quit_fade_out_ms));
            return true;
        }
        KeyCode::Char('s') => {
            player.toggle_shuffle();
        }
        KeyCode::Char('r') => {
            player.toggle_repeat();
        }
        KeyCode::Char('G') => {
            player.select_last();
        }
        KeyCode::Char('j') | KeyCode::Down => {
            player.select_next_row();
        }
        KeyCode::Char('k') | KeyCode::Up => {
            player.select_prev_row();
        }
        KeyCode::Enter => {
            player.select_track(player.selected);
        }
        KeyCode::Char('p') | KeyCode::Char(' ') => {
            // Behave like MPRIS PlayPause.
            let _ = control_tx.send(ControlCmd::PlayPause);
        }
        KeyCode::Char('l') => {
            let _ = control_tx.send(ControlCmd::Next);
        }
        KeyCode::Char('h') => {
            let _ = control_tx.send(ControlCmd::Prev);
        }
        KeyCode::Char('L') | KeyCode::Right => {
            let secs = settings.controls.scrub_seconds.min(i64::MAX as u64) as i64;
            player.seek_by(secs);
        }
        KeyCode::Char('H') | KeyCode::Left => {
            let secs = settings.controls.scrub_seconds.min(i64::MAX as u64) as i64;
            player.seek_by(-secs);
        }
        KeyCode::Char('=') | KeyCode::Char('+') => {
            player.volume_by(i32::from(settings.controls.volume_step));
        }
        KeyCode::Char('-') => {
            player.volume_by(-i32::from(settings.controls.volume_step));
        }
        _ => {}
    }

    false
}

/// Route a mouse event through the drawn hit areas.
fn handle_mouse_event(mouse: MouseEvent, player: &mut Player, state: &EventLoopState) {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            // Selection view: a playlist click selects that track.
            let list = state.areas.playlist;
            let in_list = list.x <= mouse.column && mouse.column < list.x + list.width;
            if in_list {
                if let Some(row) = ui::row_hit(mouse.row, list, player.catalog().len()) {
                    if let Some(id) = player.catalog().id_at(row) {
                        player.select_track(id);
                    }
                    return;
                }
            }

            // Scrub view: a progress-bar click seeks proportionally.
            let bar = state.areas.progress;
            if bar.y <= mouse.row && mouse.row < bar.y + bar.height {
                if let Some(target) = ui::seek_target(mouse.column, bar, player.state().duration) {
                    player.seek(target);
                }
            }
        }
        MouseEventKind::ScrollUp => player.select_prev_row(),
        MouseEventKind::ScrollDown => player.select_next_row(),
        _ => {}
    }
}
