//! TUI reducer (update function).
//!
//! All state mutations happen here. The runtime calls `update(app, event)`
//! and executes the returned effects.
//!
//! Request completions pass through the task slot of their kind first: a
//! completion whose id is no longer the slot's latest is dropped before it
//! can touch any state.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::common::{TaskCompleted, TaskKind, TaskStarted};
use crate::effects::UiEffect;
use crate::events::{TaskResult, UiEvent};
use crate::state::{AppState, View};
use crate::{catalog, credentials};

/// The main reducer function.
pub fn update(app: &mut AppState, event: UiEvent) -> Vec<UiEffect> {
    match event {
        UiEvent::Tick => {
            if app.tasks.is_any_running() {
                app.spinner_frame = app.spinner_frame.wrapping_add(1);
            }
            vec![]
        }
        UiEvent::Terminal(term_event) => handle_terminal_event(app, term_event),
        UiEvent::TaskStarted { kind, started } => handle_task_started(app, kind, started),
        UiEvent::TaskCompleted { kind, completed } => handle_task_completed(app, kind, completed),
    }
}

fn handle_terminal_event(app: &mut AppState, event: Event) -> Vec<UiEffect> {
    match event {
        Event::Key(key) if key.kind != KeyEventKind::Release => handle_key(app, key),
        Event::Paste(text) => {
            app.status.clear();
            match app.view() {
                View::Credentials => credentials::handle_paste(app, &text),
                View::Catalog => catalog::handle_paste(app, &text),
            }
            vec![]
        }
        _ => vec![],
    }
}

fn handle_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return vec![UiEffect::Quit];
    }

    // Any key dismisses the previous notice.
    app.status.clear();

    match app.view() {
        View::Credentials => credentials::handle_key(app, key),
        View::Catalog => catalog::handle_key(app, key),
    }
}

fn handle_task_started(app: &mut AppState, kind: TaskKind, started: TaskStarted) -> Vec<UiEffect> {
    if app.tasks.state_mut(kind).on_started(&started) {
        return vec![];
    }
    // Superseded before it even reported in.
    started
        .cancel
        .map(|token| UiEffect::CancelTask { kind, token })
        .into_iter()
        .collect()
}

fn handle_task_completed(
    app: &mut AppState,
    kind: TaskKind,
    completed: TaskCompleted<TaskResult>,
) -> Vec<UiEffect> {
    if !app.tasks.state_mut(kind).finish_if_active(completed.id) {
        tracing::debug!(?kind, id = completed.id.0, "dropping stale response");
        return vec![];
    }

    match completed.result {
        TaskResult::Login { username, result } => {
            credentials::handle_login_result(app, username, result)
        }
        TaskResult::Register(result) => {
            credentials::handle_register_result(app, result);
            vec![]
        }
        TaskResult::Movies(result) => {
            catalog::handle_movies_result(app, result);
            vec![]
        }
        TaskResult::MovieCreated(result) => catalog::handle_movie_created(app, result),
        TaskResult::Reviews { movie_id, result } => {
            catalog::handle_reviews_result(app, movie_id, result);
            vec![]
        }
        TaskResult::ReviewCreated { movie_id, result } => {
            catalog::handle_review_created(app, movie_id, result)
        }
        TaskResult::Cancelled => vec![],
    }
}
