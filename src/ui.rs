//! UI rendering helpers for the terminal user interface.
//!
//! Everything drawn here comes from `App`; the view never touches the player.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Style, Stylize},
    widgets::{BarChart, Block, Borders, Gauge, Padding, Paragraph, Wrap},
};
use std::{collections::BTreeMap, sync::LazyLock, time::Duration};

use crate::app::App;
use crate::config::{ControlsSettings, RefreshSettings};
use crate::player::PlaybackState;

static CONTROLS_MAP: LazyLock<BTreeMap<&'static str, &'static str>> = LazyLock::new(|| {
    let mut map = BTreeMap::new();
    map.insert("enter/p", "play");
    map.insert("space", "pause/resume");
    map.insert("s", "stop");
    map.insert("0-9", "jump to tenth");
    map.insert("n", "next file");
    map.insert("+/-", "volume");
    // H/L is filled dynamically from config.
    map.insert("q", "quit");
    map
});

/// Render the controls help text, incorporating scrub seconds.
fn controls_text(scrub_seconds: u64) -> String {
    let order = ["enter/p", "space", "s", "H/L", "0-9", "n", "+/-", "q"];
    order
        .iter()
        .filter_map(|k| {
            if *k == "H/L" {
                Some(format!("[H/L] scrub -/+{}s", scrub_seconds))
            } else {
                CONTROLS_MAP.get(*k).map(|v| format!("[{}] {}", k, v))
            }
        })
        .collect::<Vec<String>>()
        .join(" | ")
}

/// Format a `Duration` as `MM:SS`.
pub fn format_mmss(d: Duration) -> String {
    let secs = d.as_secs();
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

fn state_label(state: PlaybackState) -> &'static str {
    match state {
        PlaybackState::Stopped => "Stopped",
        PlaybackState::Playing => "Playing",
        PlaybackState::Paused => "Paused",
    }
}

/// The status box line: state, song, volume and the last message.
fn status_text(app: &App) -> String {
    let mut parts: Vec<String> = vec![state_label(app.playback).to_string()];

    match &app.now_playing {
        Some(song) => parts.push(format!("Song: {}", song)),
        None => parts.push("No track loaded".to_string()),
    }
    if let Some(i) = app.cursor {
        parts.push(format!("File {}/{}", i + 1, app.candidates.len()));
    }
    parts.push(format!("Vol: {:.0}%", app.volume * 100.0));

    if let Some(msg) = &app.status {
        parts.push(msg.clone());
    }
    parts.join(" • ")
}

/// Render the entire UI into the provided `frame`.
pub fn draw(
    frame: &mut Frame,
    app: &App,
    refresh: &RefreshSettings,
    controls_settings: &ControlsSettings,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(3),
            Constraint::Length(4),
        ])
        .split(frame.area());

    let status = Paragraph::new(status_text(app))
        .block(
            Block::bordered()
                .padding(Padding {
                    left: 1,
                    right: 0,
                    top: 0,
                    bottom: 0,
                })
                .title(" playhead ")
                .title_alignment(Alignment::Center),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(status, chunks[0]);

    // Bars are unlabeled; an empty frame renders as an empty chart.
    let data: Vec<(&str, u64)> = app.bars.iter().map(|&v| ("", v)).collect();
    let bars = BarChart::default()
        .block(Block::default().borders(Borders::ALL).title(" visualizer "))
        .data(data.as_slice())
        .bar_width(1)
        .bar_gap(1)
        .max(refresh.bar_max.max(refresh.bar_min))
        .bar_style(Style::default().cyan());
    frame.render_widget(bars, chunks[1]);

    let progress = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title(" progress "))
        .ratio(app.progress_ratio())
        .label(format!(
            "{} / {}",
            format_mmss(app.elapsed),
            format_mmss(app.total)
        ));
    frame.render_widget(progress, chunks[2]);

    let footer = Paragraph::new(controls_text(controls_settings.scrub_seconds))
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
    frame.render_widget(footer, chunks[3]);
}
