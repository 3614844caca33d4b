//! Pure view functions.
//!
//! Everything here takes `&AppState`, draws to a ratatui `Frame` and never
//! mutates state.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::state::{AppState, View};
use crate::statusline::render_status_line;
use crate::{catalog, credentials};

const HEADER_HEIGHT: u16 = 1;
const STATUS_HEIGHT: u16 = 1;

const SPINNER_FRAMES: &[&str] = &["◐", "◓", "◑", "◒"];
/// Ticks per spinner frame.
const SPINNER_SPEED_DIVISOR: usize = 6;

const CREDENTIAL_HINTS: &str = "Enter enviar · Ctrl+R cambiar modo · Esc salir";
const CATALOG_HINTS: &str =
    "Tab panel · Enter seleccionar/enviar · r/Ctrl+R recargar · Ctrl+L cerrar sesión · q salir";

/// Renders the whole screen.
pub fn render(app: &AppState, frame: &mut Frame) {
    let area = frame.area();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Min(1),
            Constraint::Length(STATUS_HEIGHT),
        ])
        .split(area);

    render_header(frame, app, chunks[0]);
    let hints = match app.view() {
        View::Credentials => {
            credentials::render_credentials(frame, app, chunks[1]);
            CREDENTIAL_HINTS
        }
        View::Catalog => {
            catalog::render_catalog(frame, app, chunks[1]);
            CATALOG_HINTS
        }
    };
    render_status_line(frame, &app.status, hints, chunks[2]);
}

fn render_header(frame: &mut Frame, app: &AppState, area: Rect) {
    let mut spans = vec![
        Span::styled(
            " Reseña ",
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(" {}", app.base_url),
            Style::default().fg(Color::DarkGray),
        ),
    ];
    if let Some(username) = app.session.username() {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            format!("@{username}"),
            Style::default().fg(Color::Yellow),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

pub(crate) fn spinner_glyph(spinner_frame: usize) -> &'static str {
    SPINNER_FRAMES[(spinner_frame / SPINNER_SPEED_DIVISOR) % SPINNER_FRAMES.len()]
}

/// A `width` x `height` rect centered in `area`, shrunk to fit.
pub(crate) fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

/// Clears `area`, draws a titled border and returns the inner rect.
pub(crate) fn render_panel(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    color: Color,
    focused: bool,
) -> Rect {
    frame.render_widget(Clear, area);
    let border = if focused {
        Style::default().fg(color)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border)
        .title(format!(" {title} "))
        .title_style(Style::default().fg(color).add_modifier(Modifier::BOLD));
    let inner = block.inner(area);
    frame.render_widget(block, area);
    inner
}

/// `label` padded to `label_width` columns, followed by the field value.
pub(crate) fn field_line(
    label: &str,
    label_width: u16,
    value: &str,
    focused: bool,
) -> Line<'static> {
    let label_style = if focused {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    };
    Line::from(vec![
        Span::styled(
            format!("{label:<width$}", width = usize::from(label_width)),
            label_style,
        ),
        Span::raw(value.to_string()),
    ])
}
