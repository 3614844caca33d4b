//! Catalog view.
//!
//! ```text
//! ┌ Películas ───────────┐┌ Reseñas: Alien ──────────────┐
//! │> Alien  1979  89  8.1 ││ ana · 9/10 · 2024-03-01 10:00│
//! │  Heat   1995  76   -  ││   Una obra maestra           │
//! └───────────────────────┘└──────────────────────────────┘
//! ┌ Nueva película ───────┐┌ Nueva reseña ────────────────┐
//! └───────────────────────┘└──────────────────────────────┘
//! ```

use std::rc::Rc;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{List, ListItem, ListState, Paragraph, Wrap};
use resena_core::api::{Movie, Review};
use resena_core::messages;
use unicode_width::UnicodeWidthStr;

use super::{Focus, MovieField, ReviewField};
use crate::common::{TaskKind, dash_or, truncate_with_ellipsis};
use crate::render::{field_line, render_panel, spinner_glyph};
use crate::state::AppState;

const FORM_HEIGHT: u16 = 6;
const LABEL_WIDTH: u16 = 12;

pub fn render_catalog(frame: &mut Frame, app: &AppState, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(5), Constraint::Length(FORM_HEIGHT)])
        .split(area);
    let top = halves(rows[0]);
    let bottom = halves(rows[1]);

    render_movies(frame, app, top[0]);
    render_reviews(frame, app, top[1]);
    render_movie_form(frame, app, bottom[0]);
    render_review_form(frame, app, bottom[1]);
}

fn halves(area: Rect) -> Rc<[Rect]> {
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(area)
}

fn title_with_spinner(app: &AppState, title: &str, kind: TaskKind) -> String {
    if app.tasks.is_running(kind) {
        format!("{title} {}", spinner_glyph(app.spinner_frame))
    } else {
        title.to_string()
    }
}

fn render_movies(frame: &mut Frame, app: &AppState, area: Rect) {
    let catalog = &app.catalog;
    let focused = catalog.focus == Focus::Movies;
    let title = title_with_spinner(app, "Películas", TaskKind::MovieList);
    let inner = render_panel(frame, area, &title, Color::Cyan, focused);

    if catalog.movies.is_empty() {
        let text = if app.tasks.is_running(TaskKind::MovieList) {
            messages::LOADING
        } else {
            messages::NO_MOVIES
        };
        frame.render_widget(
            Paragraph::new(Span::styled(text, Style::default().fg(Color::DarkGray))),
            inner,
        );
        return;
    }

    let width = usize::from(inner.width);
    let items: Vec<ListItem> = catalog
        .movies
        .iter()
        .map(|movie| {
            let marker = if catalog.selected == Some(movie.id) {
                "● "
            } else {
                "  "
            };
            ListItem::new(movie_row(marker, movie, width))
        })
        .collect();

    let highlight = if focused {
        Style::default()
            .bg(Color::DarkGray)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().add_modifier(Modifier::BOLD)
    };
    let list = List::new(items).highlight_style(highlight);
    let mut list_state = ListState::default().with_selected(Some(catalog.cursor));
    frame.render_stateful_widget(list, inner, &mut list_state);
}

/// `marker title ... year  metascore  userscore`, right columns fixed width.
fn movie_row(marker: &str, movie: &Movie, width: usize) -> Line<'static> {
    let numbers = format!(
        " {:>4} {:>3} {:>4}",
        dash_or(movie.year),
        dash_or(movie.metascore),
        dash_or(movie.userscore.map(|score| format!("{score:.1}"))),
    );
    let title_width = width.saturating_sub(marker.width() + numbers.width());
    let title = truncate_with_ellipsis(&movie.title, title_width);
    let padding = title_width.saturating_sub(title.width());
    Line::from(vec![
        Span::styled(marker.to_string(), Style::default().fg(Color::Green)),
        Span::raw(title),
        Span::raw(" ".repeat(padding)),
        Span::styled(numbers, Style::default().fg(Color::Gray)),
    ])
}

fn render_reviews(frame: &mut Frame, app: &AppState, area: Rect) {
    let catalog = &app.catalog;
    let heading = match catalog.selected_movie() {
        Some(movie) => format!("Reseñas: {}", movie.title),
        None => "Reseñas".to_string(),
    };
    let title = title_with_spinner(app, &heading, TaskKind::ReviewList);
    let inner = render_panel(frame, area, &title, Color::Magenta, false);

    let placeholder = if catalog.selected.is_none() {
        Some(messages::SELECT_MOVIE)
    } else if catalog.reviews.is_empty() && app.tasks.is_running(TaskKind::ReviewList) {
        Some(messages::LOADING)
    } else if catalog.reviews.is_empty() {
        Some(messages::NO_REVIEWS)
    } else {
        None
    };
    if let Some(text) = placeholder {
        frame.render_widget(
            Paragraph::new(Span::styled(text, Style::default().fg(Color::DarkGray))),
            inner,
        );
        return;
    }

    let lines: Vec<Line<'static>> = catalog.reviews.iter().flat_map(review_lines).collect();
    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
}

fn review_lines(review: &Review) -> Vec<Line<'static>> {
    let mut header = vec![
        Span::styled(
            review.user.clone(),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!(" · {}/10", dash_or(review.puntuacion))),
    ];
    if let Some(created) = review.created_at_display() {
        header.push(Span::styled(
            format!(" · {created}"),
            Style::default().fg(Color::DarkGray),
        ));
    }
    vec![
        Line::from(header),
        Line::from(format!("  {}", review.comment)),
        Line::from(""),
    ]
}

fn render_movie_form(frame: &mut Frame, app: &AppState, area: Rect) {
    let form = &app.catalog.movie_form;
    let focused = app.catalog.focus == Focus::MovieForm;
    let title = title_with_spinner(app, "Nueva película", TaskKind::MovieCreate);
    let inner = render_panel(frame, area, &title, Color::Green, focused);

    let lines: Vec<Line<'static>> = MovieField::ALL
        .iter()
        .map(|field| {
            field_line(
                field.label(),
                LABEL_WIDTH,
                form.field(*field).value(),
                focused && form.focus == *field,
            )
        })
        .collect();
    frame.render_widget(Paragraph::new(lines), inner);

    if focused && let Some(row) = MovieField::ALL.iter().position(|f| *f == form.focus) {
        let x = inner
            .x
            .saturating_add(LABEL_WIDTH)
            .saturating_add(form.field(form.focus).cursor_column(false));
        if x < inner.right() {
            frame.set_cursor_position((x, inner.y + row as u16));
        }
    }
}

fn render_review_form(frame: &mut Frame, app: &AppState, area: Rect) {
    let catalog = &app.catalog;
    let form = &catalog.review_form;
    let focused = catalog.focus == Focus::ReviewForm;
    let title = title_with_spinner(app, "Nueva reseña", TaskKind::ReviewCreate);
    let inner = render_panel(frame, area, &title, Color::Green, focused);

    let movie = catalog
        .selected_movie()
        .map_or_else(|| "-".to_string(), |movie| movie.title.clone());
    let score = format!("◀ {} ▶", form.score);
    let lines = vec![
        field_line("Película", LABEL_WIDTH, &movie, false),
        field_line(
            "Comentario",
            LABEL_WIDTH,
            form.comment.value(),
            focused && form.focus == ReviewField::Comment,
        ),
        field_line(
            "Puntuación",
            LABEL_WIDTH,
            &score,
            focused && form.focus == ReviewField::Score,
        ),
    ];
    frame.render_widget(Paragraph::new(lines), inner);

    if focused && form.focus == ReviewField::Comment {
        let x = inner
            .x
            .saturating_add(LABEL_WIDTH)
            .saturating_add(form.comment.cursor_column(false));
        if x < inner.right() {
            frame.set_cursor_position((x, inner.y + 1));
        }
    }
}

#[cfg(test)]
mod tests {
    use resena_core::api::MovieId;

    use super::*;

    fn alien() -> Movie {
        Movie {
            id: MovieId(1),
            title: "Alien: el octavo pasajero".to_string(),
            year: Some(1979),
            metascore: Some(89),
            userscore: Some(8.4),
        }
    }

    #[test]
    fn test_movie_row_fills_width_with_wide_marker() {
        let selected = movie_row("● ", &alien(), 40);
        let plain = movie_row("  ", &alien(), 40);
        assert_eq!(selected.width(), 40);
        assert_eq!(plain.width(), 40);
    }
}
