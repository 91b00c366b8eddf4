use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};

use crate::app::App;
use crate::ui::style::{COLOR_ERROR, COLOR_IDLE, COLOR_LABEL, make_block, stream_indicator};

pub fn draw_status(frame: &mut Frame, app: &App, area: Rect) {
    let block = make_block(" Stream ", app.streaming);
    let (icon, color) = stream_indicator(app);

    let state = if app.processing {
        "working…"
    } else if app.streaming {
        "STREAMING"
    } else {
        "not streaming"
    };

    let button = if app.streaming {
        "[ Stop stream ]"
    } else {
        "[ Start stream ]"
    };

    let mut lines = vec![
        Line::from(vec![
            Span::styled(
                format!("{icon} {state}"),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ),
            Span::raw("   "),
            Span::styled(
                button,
                Style::default()
                    .fg(if app.processing { COLOR_IDLE } else { COLOR_LABEL })
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::styled("container ", Style::default().fg(COLOR_IDLE)),
            Span::raw(app.settings.docker_container.as_str()),
            Span::styled("   image ", Style::default().fg(COLOR_IDLE)),
            Span::raw(app.settings.docker_image.as_str()),
        ]),
    ];

    if let Some(error) = &app.last_error {
        lines.push(Line::from(Span::styled(
            error.as_str(),
            Style::default().fg(COLOR_ERROR),
        )));
    }

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}
