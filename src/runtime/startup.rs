use crate::app::Player;
use crate::config;

/// Apply configured playback defaults through the machine's own operations.
pub fn apply_playback_defaults(player: &mut Player, settings: &config::Settings) {
    if settings.playback.shuffle {
        player.toggle_shuffle();
    }
    if settings.playback.repeat {
        player.toggle_repeat();
    }
    player.set_volume(i32::from(settings.playback.volume_percent));

    // Load the first track into the backend, paused, so play starts instantly.
    let first = player.state().current;
    player.select_track(first);
}
