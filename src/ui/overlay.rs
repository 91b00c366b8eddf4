use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::ui::style::{COLOR_IDLE, COLOR_LABEL};

const KEYS: [(&str, &str); 10] = [
    ("t / Enter", "toggle stream"),
    ("s", "start stream"),
    ("x", "stop stream"),
    ("c", "check stream"),
    ("p", "send PrintStarted"),
    ("d", "send PrintDone"),
    ("n", "send PrintCancelled"),
    ("a", "toggle auto-start"),
    ("?", "this help"),
    ("q / Ctrl+C", "quit"),
];

const POPUP_WIDTH: u16 = 40;

/// Key reference popup; any key dismisses it.
pub fn draw_help_overlay(frame: &mut Frame, area: Rect) {
    let popup = popup_area(area, POPUP_WIDTH, KEYS.len() as u16 + 2);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(COLOR_LABEL))
        .title(" Keys ")
        .title_bottom(
            Line::from(" any key closes ")
                .alignment(Alignment::Center)
                .style(Style::default().fg(COLOR_IDLE)),
        );

    let lines: Vec<Line> = KEYS
        .iter()
        .map(|(key, action)| {
            Line::from(vec![
                Span::styled(
                    format!(" {key:<12}"),
                    Style::default()
                        .fg(COLOR_LABEL)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw(*action),
            ])
        })
        .collect();

    frame.render_widget(Clear, popup);
    frame.render_widget(Paragraph::new(lines).block(block), popup);
}

fn popup_area(area: Rect, width: u16, height: u16) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(area);
    let [popup] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(row);
    popup
}
