//! Credential form view.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use super::{CredentialField, Mode};
use crate::common::TaskKind;
use crate::render::{centered_rect, field_line, render_panel, spinner_glyph};
use crate::state::AppState;

const FORM_WIDTH: u16 = 56;
const LABEL_WIDTH: u16 = 12;

pub fn render_credentials(frame: &mut Frame, app: &AppState, area: Rect) {
    let form = &app.credentials;
    let fields = form.fields();
    // fields + blank + progress line + blank + hint
    let height = fields.len() as u16 + 6;
    let popup = centered_rect(area, FORM_WIDTH, height);
    let inner = render_panel(frame, popup, form.mode.title(), Color::Cyan, true);

    let mut lines: Vec<Line<'static>> = Vec::new();
    for field in fields {
        let input = form.field(*field);
        let shown = if *field == CredentialField::Password {
            input.masked()
        } else {
            input.value().to_string()
        };
        lines.push(field_line(
            field.label(),
            LABEL_WIDTH,
            &shown,
            *field == form.focus,
        ));
    }

    lines.push(Line::from(""));
    let kind = match form.mode {
        Mode::Login => TaskKind::Login,
        Mode::Register => TaskKind::Register,
    };
    if app.tasks.is_running(kind) {
        lines.push(Line::from(Span::styled(
            format!("{} Enviando...", spinner_glyph(app.spinner_frame)),
            Style::default().fg(Color::Yellow),
        )));
    } else {
        lines.push(Line::from(""));
    }
    lines.push(Line::from(""));
    let toggle_hint = match form.mode {
        Mode::Login => "Ctrl+R registrarse",
        Mode::Register => "Ctrl+R volver a login",
    };
    lines.push(Line::from(Span::styled(
        format!("Enter enviar · Tab cambiar campo · {toggle_hint} · Esc salir"),
        Style::default().fg(Color::DarkGray),
    )));

    frame.render_widget(Paragraph::new(lines), inner);

    if let Some(row) = fields.iter().position(|f| *f == form.focus) {
        let input = form.field(form.focus);
        let masked = form.focus == CredentialField::Password;
        let x = inner
            .x
            .saturating_add(LABEL_WIDTH)
            .saturating_add(input.cursor_column(masked));
        let y = inner.y + row as u16;
        if x < inner.right() {
            frame.set_cursor_position((x, y));
        }
    }
}
