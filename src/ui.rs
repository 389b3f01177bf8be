//! UI rendering helpers for the terminal user interface.
//!
//! This module contains functions to render the TUI using `ratatui`.

use std::time::Duration;

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Modifier, Style},
    widgets::{Block, Borders, Gauge, List, ListItem, Padding, Paragraph, Wrap},
};

use crate::app::{App, Mode};
use crate::audio::PlaybackSession;
use crate::config::UiSettings;

const CONTROLS_TEXT: &str = "[j/k] up/down | [gg/G] top/bottom | [enter] play | [space/p] pause/resume | \
     [s] stop | [f] like | [J/K] move clip | [d] delete | [i] import | [t] tone | [q] quit";

/// Format a `Duration` as `MM:SS`.
fn format_mmss(d: Duration) -> String {
    let secs = d.as_secs();
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// Status-box text: either the active prompt, or playback/library info.
fn status_text(app: &App, session: &PlaybackSession) -> String {
    match app.mode {
        Mode::ConfirmDelete => {
            let name = app
                .selected_clip()
                .map(|c| c.display.as_str())
                .unwrap_or("?");
            return format!("Delete {name}? [y/n]");
        }
        Mode::ImportPrompt => {
            return format!("Import path: {}▌ (enter imports, esc cancels)", app.input);
        }
        Mode::ToneMenu => {
            let name = app
                .selected_clip()
                .map(|c| c.display.as_str())
                .unwrap_or("?");
            return format!("Set {name} as: [r]ingtone / [n]otification / [a]larm (esc cancels)");
        }
        Mode::Normal => {}
    }

    let mut parts: Vec<String> = Vec::new();

    match session.index {
        Some(idx) => {
            let state = if session.playing { "Playing" } else { "Paused" };
            let name = app
                .clips
                .get(idx)
                .map(|c| c.display.as_str())
                .unwrap_or("?");
            parts.push(format!("{state}: {name}"));
        }
        None => parts.push("Stopped".to_string()),
    }

    let liked_count = app.liked.iter().filter(|&&l| l).count();
    parts.push(format!("Clips: {} ({} liked)", app.clips.len(), liked_count));

    if let Some(msg) = &app.status {
        parts.push(msg.clone());
    }

    parts.join(" • ")
}

/// Progress-box label: elapsed/total, or a placeholder without a duration.
fn progress_label(session: &PlaybackSession) -> String {
    if session.index.is_some() && !session.total.is_zero() {
        format!(
            "{} / {}",
            format_mmss(session.elapsed),
            format_mmss(session.total)
        )
    } else if session.index.is_some() {
        format_mmss(session.elapsed)
    } else {
        "--:--".to_string()
    }
}

/// Render the entire UI into the provided `frame`.
pub fn draw(frame: &mut Frame, app: &App, session: &PlaybackSession, ui_settings: &UiSettings) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
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
                .title(" soundpad ")
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(header, chunks[0]);

    // Status box
    let status = Paragraph::new(status_text(app, session))
        .block(
            Block::bordered()
                .padding(Padding {
                    left: 1,
                    right: 0,
                    top: 0,
                    bottom: 0,
                })
                .title(" status "),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(status, chunks[1]);

    // Progress gauge fed directly by the session's progress fraction.
    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title(" progress "))
        .ratio(f64::from(session.progress.clamp(0.0, 1.0)))
        .label(progress_label(session));
    frame.render_widget(gauge, chunks[2]);

    // Clip list
    {
        let items: Vec<ListItem> = app
            .clips
            .iter()
            .enumerate()
            .map(|(i, clip)| {
                let marker = if app.liked.get(i).copied().unwrap_or(false) {
                    ui_settings.liked_marker.as_str()
                } else {
                    " "
                };
                let line = if ui_settings.show_kind {
                    format!("{marker} {} [{}]", clip.display, clip.kind.label())
                } else {
                    format!("{marker} {}", clip.display)
                };
                ListItem::new(line)
            })
            .collect();

        let list = List::new(items)
            .block(Block::default().borders(Borders::ALL).title(" clips "))
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .highlight_symbol("> ");
        let mut state = ratatui::widgets::ListState::default();
        if app.has_clips() {
            state.select(Some(app.selected));
        }
        frame.render_stateful_widget(list, chunks[3], &mut state);
    }

    // Footer
    let footer = Paragraph::new(CONTROLS_TEXT)
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
    frame.render_widget(footer, chunks[4]);
}
