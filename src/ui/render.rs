use std::time::Duration;

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Gauge, List, ListItem, ListState, Padding, Paragraph, Wrap},
};

use crate::app::Player;
use crate::config::{ControlsSettings, TimeField, UiSettings};

use super::scrub::progress_ratio;

/// Hit areas of the interactive widgets, as drawn this frame.
///
/// The event loop maps mouse clicks through these: one playlist row per
/// catalog entry, one progress cell per gauge column.
#[derive(Debug, Copy, Clone, Default)]
pub struct UiAreas {
    pub playlist: Rect,
    pub progress: Rect,
}

/// Format a `Duration` as `MM:SS`.
fn format_mmss(d: Duration) -> String {
    let secs = d.as_secs();
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// Build the time label shown on the progress gauge per `UiSettings`.
pub(super) fn time_text(
    position: Duration,
    duration: Option<Duration>,
    ui: &UiSettings,
) -> String {
    let mut parts: Vec<String> = Vec::new();
    for f in &ui.time_fields {
        match f {
            TimeField::Elapsed => parts.push(format_mmss(position)),
            TimeField::Total => {
                if let Some(t) = duration {
                    parts.push(format_mmss(t));
                }
            }
            TimeField::Remaining => {
                if let Some(t) = duration {
                    parts.push(format!("-{}", format_mmss(t.saturating_sub(position))));
                }
            }
        }
    }

    if parts.is_empty() {
        format_mmss(position)
    } else {
        parts.join(&ui.time_separator)
    }
}

fn controls_text(controls: &ControlsSettings) -> String {
    format!(
        "[j/k] up/down | [enter] select | [space/p] play/pause | [h/l] prev/next | \
         [H/L] scrub -/+{}s | [-/=] volume -/+{} | [s] shuffle | [r] repeat | \
         [gg/G] top/bottom | [q] quit | mouse: click a track or the progress bar",
        controls.scrub_seconds, controls.volume_step
    )
}

/// Render the entire UI into `frame` from a `Player` snapshot.
pub fn draw(
    frame: &mut Frame,
    player: &Player,
    ui_settings: &UiSettings,
    controls_settings: &ControlsSettings,
) -> UiAreas {
    let state = player.state();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(3),
        ])
        .split(frame.area());

    // Header
    let header = Paragraph::new(ui_settings.header_text.as_str())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" dacapo ")
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(header, chunks[0]);

    let main = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(42), Constraint::Min(1)])
        .split(chunks[1]);

    // Playlist sidebar: one row per catalog entry, current track marked.
    let playlist_block = Block::default().borders(Borders::ALL).title(" playlist ");
    let playlist_inner = playlist_block.inner(main[0]);

    let items: Vec<ListItem> = player
        .catalog()
        .tracks()
        .iter()
        .map(|t| {
            let marker = if t.id == state.current { "> " } else { "  " };
            let line = format!("{}{} - {}  [{}]", marker, t.artist, t.title, t.duration_label);
            let item = ListItem::new(line);
            if t.id == state.current {
                item.style(
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                )
            } else {
                item
            }
        })
        .collect();

    let list = List::new(items)
        .block(playlist_block)
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
    let mut list_state = ListState::default();
    list_state.select(player.catalog().position(player.selected));
    frame.render_stateful_widget(list, main[0], &mut list_state);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(7),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
        ])
        .split(main[1]);

    // Now playing
    let track = player.current_track();
    let now_playing = format!(
        "{}\n{}\n{}\n\ncover: {}",
        track.title, track.artist, track.album, track.cover_url
    );
    let now_playing = Paragraph::new(now_playing)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" now playing ")
                .padding(Padding {
                    left: 1,
                    right: 1,
                    top: 1,
                    bottom: 0,
                }),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(now_playing, right[0]);

    // Progress (scrub view)
    let progress_block = Block::default().borders(Borders::ALL).title(" progress ");
    let progress_inner = progress_block.inner(right[1]);
    let progress = Gauge::default()
        .block(progress_block)
        .gauge_style(Style::default().fg(Color::Green))
        .ratio(progress_ratio(state.position, state.duration))
        .label(time_text(state.position, state.duration, ui_settings));
    frame.render_widget(progress, right[1]);

    // Volume
    let volume = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title(" volume "))
        .gauge_style(Style::default().fg(Color::Cyan))
        .ratio(f64::from(state.volume_percent) / 100.0)
        .label(format!("{}%", state.volume_percent));
    frame.render_widget(volume, right[2]);

    // Status
    let status = [
        if state.playing { "Playing" } else { "Paused" }.to_string(),
        format!("Shuffle: {}", if state.shuffle { "ON" } else { "OFF" }),
        format!("Repeat: {}", if state.repeat { "ON" } else { "OFF" }),
    ]
    .join("  |  ");
    let status = Paragraph::new(status).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" status ")
            .padding(Padding {
                left: 1,
                right: 0,
                top: 0,
                bottom: 0,
            }),
    );
    frame.render_widget(status, right[3]);

    // Footer
    let footer = Paragraph::new(controls_text(controls_settings))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" controls ")
                .padding(Padding {
                    left: 1,
                    right: 0,
                    top: 0,
                    bottom: 0,
                }),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(footer, chunks[2]);

    UiAreas {
        playlist: playlist_inner,
        progress: progress_inner,
    }
}
