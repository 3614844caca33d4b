//! UI effect types.
//!
//! Effects are commands returned by the reducer that the runtime executes.
//! The reducer never performs I/O itself: it records the request in its task
//! slot and returns an effect carrying the already validated payload.

use resena_core::api::{MovieId, NewMovie, NewReview};
use resena_core::forms::{Credentials, Registration};
use resena_core::session::Token;
use tokio_util::sync::CancellationToken;

use crate::common::{TaskId, TaskKind};

#[derive(Debug)]
pub enum UiEffect {
    /// Quit the application.
    Quit,

    Login {
        task: TaskId,
        credentials: Credentials,
    },
    Register {
        task: TaskId,
        registration: Registration,
    },
    FetchMovies {
        task: TaskId,
    },
    /// Authenticated write; `token` comes from the session.
    CreateMovie {
        task: TaskId,
        token: Token,
        movie: NewMovie,
    },
    FetchReviews {
        task: TaskId,
        movie_id: MovieId,
    },
    /// Authenticated write; `token` comes from the session.
    CreateReview {
        task: TaskId,
        token: Token,
        review: NewReview,
    },

    /// Abandon an in-flight request. The runtime calls `cancel()` on the token.
    CancelTask {
        kind: TaskKind,
        token: CancellationToken,
    },
}
