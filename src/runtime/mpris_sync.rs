use crate::app::Player;
use crate::mpris::{MprisHandle, PlaybackStatus};

pub fn update_mpris(mpris: &MprisHandle, player: &Player) {
    let state = player.state();

    mpris.set_track_metadata(
        Some(state.current),
        Some(player.current_track()),
        state.duration,
    );
    mpris.set_playback(if state.playing {
        PlaybackStatus::Playing
    } else {
        PlaybackStatus::Paused
    });
}
