use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{List, ListItem};

use crate::app::App;
use crate::ui::style::{COLOR_IDLE, entry_color, entry_icon, make_block};

/// Truncate a string to at most `max` characters, appending "…" if shortened.
fn truncate_chars(s: &str, max: usize) -> String {
    let char_count = s.chars().count();
    if char_count <= max || max == 0 {
        return s.to_string();
    }
    let truncated: String = s.chars().take(max.saturating_sub(1)).collect();
    format!("{truncated}…")
}

pub fn draw_log(frame: &mut Frame, app: &App, area: Rect) {
    let block = make_block(" Notifications ", false);

    if app.log.is_empty() {
        let item = ListItem::new(Line::from(Span::styled(
            "Waiting for the plugin to report",
            Style::default().fg(Color::DarkGray),
        )));
        frame.render_widget(List::new(vec![item]).block(block), area);
        return;
    }

    let inner_width = area.width.saturating_sub(2) as usize;
    let visible = area.height.saturating_sub(2) as usize;
    let skip = app.log.len().saturating_sub(visible);

    let items: Vec<ListItem> = app
        .log
        .iter()
        .skip(skip)
        .map(|entry| {
            let stamp = format!("{:>7.1}s ", entry.at.as_secs_f64());
            let color = entry_color(entry.kind);
            // "1234.5s ● " prefix.
            let budget = inner_width.saturating_sub(stamp.chars().count() + 2);

            ListItem::new(Line::from(vec![
                Span::styled(stamp, Style::default().fg(COLOR_IDLE)),
                Span::styled(
                    format!("{} ", entry_icon(entry.kind)),
                    Style::default().fg(color),
                ),
                Span::styled(truncate_chars(&entry.text, budget), Style::default().fg(color)),
            ]))
        })
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}
