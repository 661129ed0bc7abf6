//! Pure math behind the scrub and selection views.
//!
//! Kept free of widget state so the proportional seek and fill logic can be
//! tested without a terminal.

use std::time::Duration;

use ratatui::layout::Rect;

/// Fraction of the track already played, in `0.0..=1.0`.
///
/// An unknown or zero duration renders as 0 instead of dividing by zero.
pub fn progress_ratio(position: Duration, duration: Option<Duration>) -> f64 {
    match duration {
        Some(d) if !d.is_zero() => (position.as_secs_f64() / d.as_secs_f64()).clamp(0.0, 1.0),
        _ => 0.0,
    }
}

/// Translate a click column inside the progress area into a seek target:
/// `(click_offset / width) * duration`.
///
/// Returns `None` for clicks outside the area or while the duration is
/// still unknown (there is nothing meaningful to seek into yet).
pub fn seek_target(column: u16, area: Rect, duration: Option<Duration>) -> Option<Duration> {
    let duration = duration.filter(|d| !d.is_zero())?;
    if area.width == 0 || column < area.x || column >= area.x + area.width {
        return None;
    }

    let offset = f64::from(column - area.x);
    Some(duration.mul_f64(offset / f64::from(area.width)))
}

/// Translate a click row inside the playlist area into a row index,
/// `None` for clicks outside the area or below the last of `rows` entries.
pub fn row_hit(row: u16, area: Rect, rows: usize) -> Option<usize> {
    if area.height == 0 || row < area.y || row >= area.y + area.height {
        return None;
    }

    let index = usize::from(row - area.y);
    (index < rows).then_some(index)
}
