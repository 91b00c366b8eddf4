use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::app::App;
use crate::ui::overlay::draw_help_overlay;
use crate::ui::panels::{draw_log, draw_settings, draw_status};

const HINTS: [(&str, &str); 6] = [
    ("t", "toggle"),
    ("s/x/c", "start/stop/check"),
    ("p/d/n", "print events"),
    ("a", "auto-start"),
    ("?", "help"),
    ("q", "quit"),
];

pub fn draw(frame: &mut Frame, app: &App) {
    let size = frame.area();

    // Status (top) | settings + log | key hints
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6),
            Constraint::Min(5),
            Constraint::Length(1),
        ])
        .split(size);

    let middle = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(vertical[1]);

    draw_status(frame, app, vertical[0]);
    draw_settings(frame, app, middle[0]);
    draw_log(frame, app, middle[1]);
    frame.render_widget(Paragraph::new(hint_line()), vertical[2]);

    if app.show_help {
        draw_help_overlay(frame, size);
    }
}

fn hint_line() -> Line<'static> {
    let mut spans = Vec::new();
    for (key, action) in HINTS {
        spans.push(Span::styled(
            format!(" {key} "),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::styled(
            format!("{action} "),
            Style::default().fg(Color::DarkGray),
        ));
    }
    Line::from(spans)
}
