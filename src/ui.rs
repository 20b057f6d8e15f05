//! UI rendering helpers for the terminal user interface.
//!
//! This module contains functions to render the TUI using `ratatui`. It never
//! touches the playback engine: the runtime samples it into a
//! [`PlaybackView`] before each frame.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Clear, Gauge, List, ListItem, ListState, Padding, Paragraph, Wrap},
};
use std::{collections::BTreeMap, sync::LazyLock, time::Duration};

use crate::app::{App, Focus, Popup};
use crate::audio::PlaybackState;
use crate::config::UiSettings;
use crate::library::{Track, UNKNOWN_ARTIST};

static CONTROLS_MAP: LazyLock<BTreeMap<&'static str, &'static str>> = LazyLock::new(|| {
    let mut map = BTreeMap::new();
    map.insert("j/k", "up/down");
    map.insert("gg/G", "top/bottom");
    map.insert("tab", "switch list");
    map.insert("enter", "open/play");
    map.insert("space/p", "play/pause");
    map.insert("s", "stop");
    map.insert("h/l", "prev/next song");
    map.insert("-/+", "volume");
    map.insert("n", "new playlist");
    map.insert("R", "rename");
    map.insert("d", "delete playlist");
    map.insert("a/A", "add songs/path");
    map.insert("x", "remove song");
    map.insert("r", "loop mode");
    map.insert("K", "metadata");
    map.insert("q", "quit");
    map
});

/// Render the controls help text.
fn controls_text() -> String {
    // Keep the rendered order stable and human-friendly.
    let order = [
        "j/k", "gg/G", "tab", "enter", "space/p", "s", "h/l", "-/+", "n", "R", "d", "a/A", "x",
        "r", "K", "q",
    ];
    order
        .iter()
        .filter_map(|k| CONTROLS_MAP.get(k).map(|v| format!("[{k}] {v}")))
        .collect::<Vec<String>>()
        .join(" | ")
}

/// What the engine looked like when the frame was prepared.
#[derive(Debug, Clone, Default)]
pub struct PlaybackView {
    pub state: PlaybackState,
    pub elapsed: Duration,
    pub duration: Option<Duration>,
    pub volume: u8,
    pub track: Option<Track>,
}

impl PlaybackView {
    /// Fraction of the track played, 0.0 when the length is unknown.
    fn progress(&self) -> f64 {
        match self.duration {
            Some(d) if !d.is_zero() => (self.elapsed.as_secs_f64() / d.as_secs_f64()).min(1.0),
            _ => 0.0,
        }
    }
}

/// Format a `Duration` as `MM:SS`.
fn format_mmss(d: Duration) -> String {
    let secs = d.as_secs();
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// Compute a centered rectangle with given size constrained to `r`.
fn centered_rect_sized(mut width: u16, mut height: u16, r: Rect) -> Rect {
    width = width.min(r.width.saturating_sub(2)).max(10);
    height = height.min(r.height.saturating_sub(2)).max(5);

    let x = r.x + (r.width.saturating_sub(width) / 2);
    let y = r.y + (r.height.saturating_sub(height) / 2);
    Rect {
        x,
        y,
        width,
        height,
    }
}

/// Format an optional duration, rounding up partial seconds, showing total seconds.
fn format_duration_mmss_ceil(d: Option<Duration>) -> String {
    let Some(d) = d else {
        return "-".to_string();
    };

    let mut total_secs = d.as_secs();
    if d.subsec_nanos() > 0 {
        total_secs = total_secs.saturating_add(1);
    }

    let minutes = total_secs / 60;
    let seconds = total_secs % 60;
    format!("{}:{:02} ({}s)", minutes, seconds, total_secs)
}

fn padded_block(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .title(title)
        .padding(Padding {
            left: 1,
            right: 0,
            top: 0,
            bottom: 0,
        })
}

fn focus_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    }
}

/// Keep the selected row visible, centering it when the list is long.
fn visible_window(total: usize, height: usize, selected: usize) -> (usize, usize) {
    if total <= height || height == 0 {
        return (0, total);
    }
    let half = height / 2;
    let mut start = selected.saturating_sub(half);
    if start + height > total {
        start = total - height;
    }
    (start, start + height)
}

/// Render the entire UI into the provided `frame`.
///
/// `rows` are the open playlist's track labels, in store order.
pub fn draw(
    frame: &mut Frame,
    app: &App,
    rows: &[String],
    playback: &PlaybackView,
    ui_settings: &UiSettings,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(8),
            Constraint::Length(4),
        ])
        .split(frame.area());

    // Header
    let header = Paragraph::new(ui_settings.header_text.as_str())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" jukebox ")
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(header, chunks[0]);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(chunks[1]);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(8), Constraint::Min(3)])
        .split(columns[0]);
    draw_playlists(frame, app, left[0]);
    draw_tracks(frame, app, rows, left[1]);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(3),
        ])
        .split(columns[1]);
    draw_now_playing(frame, app, playback, &right);

    let footer = Paragraph::new(controls_text())
        .block(padded_block(" controls "))
        .wrap(Wrap { trim: true });
    frame.render_widget(footer, chunks[2]);

    draw_popup(frame, app, chunks[1]);
}

fn draw_playlists(frame: &mut Frame, app: &App, area: Rect) {
    let items: Vec<ListItem> = app
        .store
        .names()
        .map(|name| {
            let count = app.store.tracks(name).len();
            let mut label = format!("{name} ({count})");
            if app.now_playing.as_deref() == Some(name) {
                label.push_str(" ♪");
            }
            let style = if name == app.open_playlist {
                Style::default().add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            ListItem::new(label).style(style)
        })
        .collect();

    let focused = app.focus == Focus::Playlists;
    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(focus_style(focused))
                .title(" playlists "),
        )
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");
    let mut state = ListState::default();
    state.select(Some(app.playlist_cursor));
    frame.render_stateful_widget(list, area, &mut state);
}

fn draw_tracks(frame: &mut Frame, app: &App, rows: &[String], area: Rect) {
    // Only build ListItems for the visible window.
    let total = rows.len();
    let height = area.height.saturating_sub(2) as usize;
    let (start, end) = visible_window(total, height, app.selected);
    let playing = app.playing_index_in_open();

    let items: Vec<ListItem> = rows[start..end]
        .iter()
        .enumerate()
        .map(|(offset, row)| {
            let i = start + offset;
            let label = format!("{:>3}. {row}", i + 1);
            if playing == Some(i) {
                ListItem::new(label).style(Style::default().fg(Color::Green))
            } else {
                ListItem::new(label)
            }
        })
        .collect();

    let focused = app.focus == Focus::Tracks;
    let title = format!(" tracks: {} ", app.open_playlist);
    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(focus_style(focused))
                .title(title),
        )
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");
    let mut state = ListState::default();
    if total > 0 {
        state.select(Some(app.selected - start));
    }
    frame.render_stateful_widget(list, area, &mut state);
}

fn draw_now_playing(frame: &mut Frame, app: &App, playback: &PlaybackView, areas: &[Rect]) {
    let text = match (&playback.track, playback.state) {
        (Some(t), PlaybackState::Playing | PlaybackState::Paused) => format!(
            "{}\n{}\n{}",
            t.title,
            t.artist_or_unknown(),
            t.album.as_deref().unwrap_or("-")
        ),
        _ => format!("-\n{UNKNOWN_ARTIST}\n-"),
    };
    let now = Paragraph::new(text)
        .block(padded_block(" now playing "))
        .wrap(Wrap { trim: true });
    frame.render_widget(now, areas[0]);

    let total = playback
        .duration
        .map(format_mmss)
        .unwrap_or_else(|| "--:--".to_string());
    let progress = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title(" progress "))
        .gauge_style(Style::default().fg(Color::Cyan))
        .ratio(playback.progress())
        .label(format!("{} / {}", format_mmss(playback.elapsed), total));
    frame.render_widget(progress, areas[1]);

    let volume = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title(" volume "))
        .gauge_style(Style::default().fg(Color::Magenta))
        .percent(u16::from(playback.volume.min(100)))
        .label(format!("{}%", playback.volume));
    frame.render_widget(volume, areas[2]);

    let mut parts: Vec<String> = vec![
        format!("PLAYBACK: {}", app.loop_mode.label()),
        match playback.state {
            PlaybackState::Playing => "Playing".to_string(),
            PlaybackState::Paused => "Paused".to_string(),
            PlaybackState::Stopped => "Stopped".to_string(),
        },
    ];
    if let Some(msg) = &app.status {
        parts.push(msg.clone());
    }
    let status = Paragraph::new(parts.join(" • "))
        .block(padded_block(" status "))
        .wrap(Wrap { trim: true });
    frame.render_widget(status, areas[3]);
}

/// Overlay the open popup, if any, over the main area.
fn draw_popup(frame: &mut Frame, app: &App, area: Rect) {
    let (title, body, height) = match &app.popup {
        Popup::None => return,
        Popup::Error(msg) => (" error (any key closes) ".to_string(), msg.clone(), 6),
        Popup::Input { purpose, buffer } => (
            purpose.title().to_string(),
            format!("{}\n> {buffer}_", purpose.prompt()),
            5,
        ),
        Popup::Confirm(action) => (" confirm ".to_string(), action.question(), 5),
        Popup::Metadata => {
            let track = app
                .open_tracks()
                .get(app.selected)
                .and_then(|p| app.metadata.get(p));
            let meta = if let Some(track) = track {
                format!(
                    "Title: {}\nArtist: {}\nAlbum: {}\nDuration: {}\nPath: {}",
                    track.title,
                    track.artist.as_deref().unwrap_or("-"),
                    track.album.as_deref().unwrap_or("-"),
                    format_duration_mmss_ceil(track.duration),
                    track.path.display()
                )
            } else {
                "No track selected".to_string()
            };
            (" metadata (K closes) ".to_string(), meta, 9)
        }
    };

    let popup_area = centered_rect_sized(72, height, area);
    frame.render_widget(Clear, popup_area);
    let paragraph = Paragraph::new(body)
        .block(padded_block(&title))
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, popup_area);
}
