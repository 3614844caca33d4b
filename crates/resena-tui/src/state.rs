//! Application state composition.
//!
//! ```text
//! AppState
//! ├── session: Session          (token + username, drives the view)
//! ├── credentials: CredentialsState (login/register form)
//! ├── catalog: CatalogState     (movies, reviews, creation forms)
//! ├── status: StatusLine        (last result message)
//! ├── task_seq: TaskSeq         (request id generator)
//! └── tasks: Tasks              (latest request id per slot)
//! ```
//!
//! Only the reducer mutates this.

use resena_core::session::Session;

use crate::catalog::CatalogState;
use crate::common::{TaskId, TaskKind, TaskSeq, Tasks};
use crate::credentials::CredentialsState;
use crate::effects::UiEffect;
use crate::statusline::StatusLine;

/// Top-level screen, derived from the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Credentials,
    Catalog,
}

#[derive(Debug, Default)]
pub struct AppState {
    pub should_quit: bool,
    pub session: Session,
    pub credentials: CredentialsState,
    pub catalog: CatalogState,
    pub status: StatusLine,
    pub task_seq: TaskSeq,
    pub tasks: Tasks,
    pub spinner_frame: usize,
    /// Service base URL, shown in the header.
    pub base_url: String,
}

impl AppState {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    pub fn view(&self) -> View {
        if self.session.is_authenticated() {
            View::Catalog
        } else {
            View::Credentials
        }
    }

    /// Allocates a request id and makes it the latest one for `kind`.
    ///
    /// Returns the id plus a cancel effect for the superseded request, if it
    /// had already reported a cancel token.
    pub fn begin_task(&mut self, kind: TaskKind) -> (TaskId, Vec<UiEffect>) {
        let id = self.task_seq.next_id();
        let superseded = self.tasks.state_mut(kind).begin(id);
        let effects = superseded
            .map(|token| UiEffect::CancelTask { kind, token })
            .into_iter()
            .collect();
        (id, effects)
    }

    /// Forgets every in-flight request, cancelling those that can be.
    pub fn abandon_all_tasks(&mut self) -> Vec<UiEffect> {
        TaskKind::ALL
            .iter()
            .filter_map(|kind| {
                self.tasks
                    .state_mut(*kind)
                    .clear()
                    .map(|token| UiEffect::CancelTask { kind: *kind, token })
            })
            .collect()
    }
}
