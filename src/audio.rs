//! Audio backend: the transport delegate the playback state machine drives.
//!
//! A dedicated thread owns the rodio output stream and at most one sink. It
//! accepts `AudioCmd`s over a channel, publishes elapsed/playing through a
//! shared `PlaybackHandle` and reports discrete notifications (duration
//! known, track ended, load failed) over an `AudioEvent` channel. Track
//! selection policy lives in the state machine, not here.

mod player;
mod sink;
mod thread;
mod types;

pub use player::{AudioHandle, AudioPlayer};
pub use types::{AudioCmd, AudioError, AudioEvent, PlaybackHandle, PlaybackInfo, Transport};
