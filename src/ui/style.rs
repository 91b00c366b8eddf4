use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders};

use crate::app::{App, EntryKind};

// ── Colour constants ──────────────────────────────────────────────────
pub const COLOR_STREAMING: Color = Color::Green;
pub const COLOR_ERROR: Color = Color::Red;
pub const COLOR_PROCESSING: Color = Color::Yellow;
pub const COLOR_IDLE: Color = Color::DarkGray;
pub const COLOR_LABEL: Color = Color::Cyan;

// ── Icon constants ────────────────────────────────────────────────────
pub const ICON_STREAMING: &str = "●";
pub const ICON_IDLE: &str = "○";
pub const ICON_ERROR: &str = "✗";
pub const ICON_SENT: &str = "→";
pub const SPINNER: [&str; 4] = ["◐", "◓", "◑", "◒"];

// ── Helpers ───────────────────────────────────────────────────────────

pub fn entry_color(kind: EntryKind) -> Color {
    match kind {
        EntryKind::Sent => COLOR_LABEL,
        EntryKind::Streaming => COLOR_STREAMING,
        EntryKind::Idle => COLOR_IDLE,
        EntryKind::Error => COLOR_ERROR,
        EntryKind::Info => Color::White,
    }
}

pub fn entry_icon(kind: EntryKind) -> &'static str {
    match kind {
        EntryKind::Sent => ICON_SENT,
        EntryKind::Streaming => ICON_STREAMING,
        EntryKind::Idle => ICON_IDLE,
        EntryKind::Error => ICON_ERROR,
        EntryKind::Info => "·",
    }
}

/// Icon and colour for the stream indicator.
pub fn stream_indicator(app: &App) -> (&'static str, Color) {
    if app.processing {
        (SPINNER[app.tick % SPINNER.len()], COLOR_PROCESSING)
    } else if app.streaming {
        (ICON_STREAMING, COLOR_STREAMING)
    } else if app.last_error.is_some() {
        (ICON_ERROR, COLOR_ERROR)
    } else {
        (ICON_IDLE, COLOR_IDLE)
    }
}

pub fn make_block(title: &str, highlighted: bool) -> Block<'_> {
    let style = if highlighted {
        Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(style)
}
