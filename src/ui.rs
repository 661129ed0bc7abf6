//! UI rendering for the terminal user interface.
//!
//! `render` draws the playlist sidebar, now-playing panel, progress and
//! volume gauges with `ratatui` and reports the drawn hit areas; `scrub`
//! holds the pure click-to-seek and fill-ratio math.

mod render;
mod scrub;

pub use render::{UiAreas, draw};
pub use scrub::{progress_ratio, row_hit, seek_target};
