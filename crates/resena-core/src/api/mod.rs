//! HTTP client for the movie-review service.
//!
//! The service owns authentication, persistence and validation. This module
//! only maps its endpoints onto typed calls:
//!
//! | Call | Endpoint | Auth |
//! |------|----------|------|
//! | `login` | `POST /login` | - |
//! | `register` | `POST /register` | - |
//! | `list_movies` | `GET /movies` | - |
//! | `create_movie` | `POST /movies` | Bearer |
//! | `list_reviews` | `GET /reviews/movie/{id}` | - |
//! | `create_review` | `POST /reviews` | Bearer |

mod client;
mod error;
mod types;

pub use client::{ApiClient, DEFAULT_BASE_URL, USER_AGENT};
pub use error::{ApiError, ApiErrorKind, ApiResult};
pub use types::{
    LoginOutcome, Movie, MovieId, NewMovie, NewReview, Review, ReviewId, Score, ServiceMessage,
};
