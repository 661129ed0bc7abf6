//! Application module: the playback state machine driving the player.
//!
//! `Player` lives in `app::model` and owns the catalog, the playback state
//! and the view cursor; every mutation flows through its operations.

mod model;

pub use model::*;

#[cfg(test)]
mod tests;
