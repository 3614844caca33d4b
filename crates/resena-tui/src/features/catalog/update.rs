//! Catalog reducer.
//!
//! Reads go out without a token; writes take the session token. Every
//! successful write is followed by a re-fetch of the affected list.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use resena_core::api::{ApiResult, Movie, MovieId, Review, ServiceMessage};
use resena_core::forms::{self, Field};
use resena_core::messages;

use super::{CatalogState, Focus, MovieField, ReviewField};
use crate::common::TaskKind;
use crate::effects::UiEffect;
use crate::state::AppState;

const PAGE: isize = 10;

pub fn handle_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Char('l') if ctrl => return logout(app),
        KeyCode::Char('r') if ctrl => return refresh(app),
        KeyCode::Tab => {
            app.catalog.focus = app.catalog.focus.next();
            return vec![];
        }
        KeyCode::BackTab => {
            app.catalog.focus = app.catalog.focus.prev();
            return vec![];
        }
        _ => {}
    }

    match app.catalog.focus {
        Focus::Movies => handle_list_key(app, key),
        Focus::MovieForm => handle_movie_form_key(app, key),
        Focus::ReviewForm => handle_review_form_key(app, key),
    }
}

fn handle_list_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    let catalog = &mut app.catalog;
    match key.code {
        KeyCode::Char('q') => return vec![UiEffect::Quit],
        KeyCode::Char('r') => return refresh(app),
        KeyCode::Up | KeyCode::Char('k') => catalog.move_cursor(-1),
        KeyCode::Down | KeyCode::Char('j') => catalog.move_cursor(1),
        KeyCode::PageUp => catalog.move_cursor(-PAGE),
        KeyCode::PageDown => catalog.move_cursor(PAGE),
        KeyCode::Home => catalog.cursor = 0,
        KeyCode::End => catalog.move_cursor(isize::MAX),
        KeyCode::Enter => {
            if let Some(id) = catalog.cursor_movie().map(|movie| movie.id) {
                return select_movie(app, id);
            }
        }
        _ => {}
    }
    vec![]
}

fn handle_movie_form_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    let form = &mut app.catalog.movie_form;
    match key.code {
        KeyCode::Esc => app.catalog.focus = Focus::Movies,
        KeyCode::Enter => return submit_movie(app),
        KeyCode::Up => form.focus_prev(),
        KeyCode::Down => form.focus_next(),
        _ => {
            form.focused_mut().handle_key(&key);
        }
    }
    vec![]
}

fn handle_review_form_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    let form = &mut app.catalog.review_form;
    match (key.code, form.focus) {
        (KeyCode::Esc, _) => app.catalog.focus = Focus::Movies,
        (KeyCode::Enter, _) => return submit_review(app),
        (KeyCode::Up | KeyCode::Down, _) => form.toggle_focus(),
        (KeyCode::Right | KeyCode::Char('+'), ReviewField::Score) => {
            form.score = form.score.increment();
        }
        (KeyCode::Left | KeyCode::Char('-'), ReviewField::Score) => {
            form.score = form.score.decrement();
        }
        (_, ReviewField::Comment) => {
            form.comment.handle_key(&key);
        }
        (_, ReviewField::Score) => {}
    }
    vec![]
}

pub fn handle_paste(app: &mut AppState, text: &str) {
    let catalog = &mut app.catalog;
    match catalog.focus {
        Focus::Movies => {}
        Focus::MovieForm => catalog.movie_form.focused_mut().insert_str(text),
        Focus::ReviewForm => {
            if catalog.review_form.focus == ReviewField::Comment {
                catalog.review_form.comment.insert_str(text);
            }
        }
    }
}

/// Issues `GET /movies`, superseding any list fetch still in flight.
pub fn start_fetch_movies(app: &mut AppState) -> Vec<UiEffect> {
    let (task, mut effects) = app.begin_task(TaskKind::MovieList);
    effects.push(UiEffect::FetchMovies { task });
    effects
}

fn start_fetch_reviews(app: &mut AppState, movie_id: MovieId) -> Vec<UiEffect> {
    let (task, mut effects) = app.begin_task(TaskKind::ReviewList);
    effects.push(UiEffect::FetchReviews { task, movie_id });
    effects
}

/// Local selection change followed by a review fetch for `movie_id`.
pub fn select_movie(app: &mut AppState, movie_id: MovieId) -> Vec<UiEffect> {
    app.catalog.select(movie_id);
    start_fetch_reviews(app, movie_id)
}

/// Re-fetches the movies and, if a movie is selected, its reviews.
pub fn refresh(app: &mut AppState) -> Vec<UiEffect> {
    let mut effects = start_fetch_movies(app);
    if let Some(movie_id) = app.catalog.selected {
        effects.extend(start_fetch_reviews(app, movie_id));
    }
    effects
}

pub fn submit_movie(app: &mut AppState) -> Vec<UiEffect> {
    let Some(token) = app.session.token().cloned() else {
        app.status.error(messages::NOT_LOGGED_IN);
        return vec![];
    };
    let form = &mut app.catalog.movie_form;
    match forms::parse_new_movie(
        form.title.value(),
        form.year.value(),
        form.metascore.value(),
    ) {
        Ok(movie) => {
            let (task, mut effects) = app.begin_task(TaskKind::MovieCreate);
            effects.push(UiEffect::CreateMovie { task, token, movie });
            effects
        }
        Err(err) => {
            form.focus = match err.field {
                Field::Year => MovieField::Year,
                Field::Metascore => MovieField::Metascore,
                _ => MovieField::Title,
            };
            app.status.error(err.to_string());
            vec![]
        }
    }
}

pub fn submit_review(app: &mut AppState) -> Vec<UiEffect> {
    let Some(token) = app.session.token().cloned() else {
        app.status.error(messages::NOT_LOGGED_IN);
        return vec![];
    };
    let selected = app.catalog.selected;
    let form = &mut app.catalog.review_form;
    match forms::parse_new_review(selected, form.comment.value(), form.score) {
        Ok(review) => {
            let (task, mut effects) = app.begin_task(TaskKind::ReviewCreate);
            effects.push(UiEffect::CreateReview {
                task,
                token,
                review,
            });
            effects
        }
        Err(err) => {
            if err.field == Field::Comment {
                form.focus = ReviewField::Comment;
            }
            app.status.error(err.to_string());
            vec![]
        }
    }
}

pub fn handle_movies_result(app: &mut AppState, result: ApiResult<Vec<Movie>>) {
    match result {
        Ok(movies) => app.catalog.replace_movies(movies),
        Err(err) => {
            tracing::warn!(kind = %err.kind(), error = %err, "failed to load movies");
            app.status.error(messages::MOVIES_LOAD_FAILED);
        }
    }
}

pub fn handle_movie_created(
    app: &mut AppState,
    result: ApiResult<ServiceMessage>,
) -> Vec<UiEffect> {
    match result {
        Ok(message) => {
            app.status.success(message.or(messages::MOVIE_CREATED));
            app.catalog.movie_form.clear();
            start_fetch_movies(app)
        }
        Err(err) => {
            tracing::debug!(kind = %err.kind(), error = %err, "movie creation failed");
            app.status
                .error(err.user_message(messages::MOVIE_CREATE_FAILED));
            vec![]
        }
    }
}

pub fn handle_reviews_result(
    app: &mut AppState,
    movie_id: MovieId,
    result: ApiResult<Vec<Review>>,
) {
    if app.catalog.selected != Some(movie_id) {
        tracing::debug!(%movie_id, "reviews for a movie that is no longer selected");
        return;
    }
    match result {
        Ok(reviews) => app.catalog.reviews = reviews,
        Err(err) => {
            tracing::warn!(%movie_id, kind = %err.kind(), error = %err, "failed to load reviews");
            app.status.error(messages::REVIEWS_LOAD_FAILED);
        }
    }
}

/// Re-fetches the reviews only while `movie_id` is still the selection, so
/// the fetch never replaces one issued for a newer selection.
pub fn handle_review_created(
    app: &mut AppState,
    movie_id: MovieId,
    result: ApiResult<ServiceMessage>,
) -> Vec<UiEffect> {
    match result {
        Ok(message) => {
            app.status.success(message.or(messages::REVIEW_CREATED));
            app.catalog.review_form.comment.clear();
            if app.catalog.selected == Some(movie_id) {
                start_fetch_reviews(app, movie_id)
            } else {
                vec![]
            }
        }
        Err(err) => {
            tracing::debug!(kind = %err.kind(), error = %err, "review creation failed");
            app.status
                .error(err.user_message(messages::REVIEW_CREATE_FAILED));
            vec![]
        }
    }
}

/// Clears the session, abandons every request and forgets the catalog.
pub fn logout(app: &mut AppState) -> Vec<UiEffect> {
    let effects = app.abandon_all_tasks();
    app.session.on_logout();
    app.catalog = CatalogState::default();
    app.credentials.password.clear();
    app.status.info(messages::LOGGED_OUT);
    tracing::info!("logged out");
    effects
}
