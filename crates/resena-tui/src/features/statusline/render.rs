//! Status line view.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use super::{StatusLine, Tone};
use crate::common::truncate_with_ellipsis;

/// Renders the current notice, or `hints` when there is none.
pub fn render_status_line(frame: &mut Frame, status: &StatusLine, hints: &str, area: Rect) {
    let width = usize::from(area.width);
    let line = match status.notice() {
        Some(notice) => {
            let color = match notice.tone {
                Tone::Info => Color::Cyan,
                Tone::Success => Color::Green,
                Tone::Error => Color::Red,
            };
            Line::from(Span::styled(
                truncate_with_ellipsis(&notice.text, width),
                Style::default().fg(color),
            ))
        }
        None => Line::from(Span::styled(
            truncate_with_ellipsis(hints, width),
            Style::default().fg(Color::DarkGray),
        )),
    };
    frame.render_widget(Paragraph::new(line), area);
}
