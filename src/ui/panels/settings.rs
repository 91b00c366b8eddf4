use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};

use webcamstreamer::stream::{FilterChain, gop_size};

use crate::app::App;
use crate::ui::style::{COLOR_IDLE, COLOR_LABEL, COLOR_STREAMING, make_block};

/// Hide the stream key, which is the last path segment of the ingest URL.
fn mask_stream_url(url: &str) -> String {
    match url.rsplit_once('/') {
        Some((base, key)) if !key.is_empty() && base.contains("://") && !base.ends_with('/') => {
            format!("{base}/{}", "•".repeat(key.chars().count().min(8)))
        }
        _ => url.to_string(),
    }
}

fn row(label: &str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{label:<12}"), Style::default().fg(COLOR_LABEL)),
        Span::raw(value),
    ])
}

fn on_off(value: bool) -> &'static str {
    if value { "on" } else { "off" }
}

pub fn draw_settings(frame: &mut Frame, app: &App, area: Rect) {
    let block = make_block(" Settings ", false);
    let s = &app.settings;

    let mut lines = vec![
        row("webcam", s.webcam_url.clone()),
        row("stream", mask_stream_url(&s.stream_url)),
        row("frame rate", s.frame_rate.to_string()),
        row("keyframes", format!("every {} frames", gop_size(s.frame_rate))),
        row("filter", FilterChain::from_webcam(&s.webcam).to_string()),
        row("image", s.docker_image.clone()),
        row("container", s.docker_container.clone()),
    ];
    if !s.embed_url.is_empty() {
        lines.push(row("embed", s.embed_url.clone()));
    }
    lines.push(Line::from(vec![
        Span::styled(format!("{:<12}", "auto-start"), Style::default().fg(COLOR_LABEL)),
        Span::styled(
            on_off(s.auto_start),
            Style::default()
                .fg(if s.auto_start { COLOR_STREAMING } else { COLOR_IDLE })
                .add_modifier(Modifier::BOLD),
        ),
    ]));

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stream_key_is_masked() {
        assert_eq!(
            mask_stream_url("rtmp://a.rtmp.youtube.com/live2/abcd-efgh"),
            "rtmp://a.rtmp.youtube.com/live2/••••••••"
        );
    }

    #[test]
    fn short_key_keeps_its_length() {
        assert_eq!(mask_stream_url("rtmp://host/app/key"), "rtmp://host/app/•••");
    }

    #[test]
    fn url_without_key_is_unchanged() {
        assert_eq!(mask_stream_url("rtmp://host/"), "rtmp://host/");
        assert_eq!(mask_stream_url("rtmp://host"), "rtmp://host");
        assert_eq!(mask_stream_url(""), "");
    }
}
