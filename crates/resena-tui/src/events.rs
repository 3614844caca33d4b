//! UI event types.
//!
//! Everything the reducer reacts to: terminal input, timer ticks and the
//! lifecycle of async requests.

use crossterm::event::Event;
use resena_core::api::{ApiResult, LoginOutcome, Movie, MovieId, Review, ServiceMessage};

use crate::common::{TaskCompleted, TaskKind, TaskStarted};

#[derive(Debug)]
pub enum UiEvent {
    /// Timer tick for animations.
    Tick,
    /// Terminal input (keys, paste, resize).
    Terminal(Event),
    TaskStarted {
        kind: TaskKind,
        started: TaskStarted,
    },
    TaskCompleted {
        kind: TaskKind,
        completed: TaskCompleted<TaskResult>,
    },
}

/// Outcome of one request, produced by the runtime handlers.
#[derive(Debug)]
pub enum TaskResult {
    Login {
        /// Username typed in the form, used when the service doesn't echo one.
        username: String,
        result: ApiResult<LoginOutcome>,
    },
    Register(ApiResult<ServiceMessage>),
    Movies(ApiResult<Vec<Movie>>),
    MovieCreated(ApiResult<ServiceMessage>),
    Reviews {
        movie_id: MovieId,
        result: ApiResult<Vec<Review>>,
    },
    ReviewCreated {
        movie_id: MovieId,
        result: ApiResult<ServiceMessage>,
    },
    /// The request was abandoned through its cancel token.
    Cancelled,
}
