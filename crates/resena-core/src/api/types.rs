//! Wire types for the movie-review service.

use std::fmt;

use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::session::Token;

/// Service-assigned movie identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MovieId(pub i64);

impl fmt::Display for MovieId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Service-assigned review identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReviewId(pub i64);

/// A movie as listed by `GET /movies`.
///
/// `year` and `metascore` are nullable columns on the service side, so they
/// are optional here even though creation always sends them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub id: MovieId,
    pub title: String,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub metascore: Option<i32>,
    #[serde(default)]
    pub userscore: Option<f64>,
}

/// A review as listed by `GET /reviews/movie/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub id: ReviewId,
    pub user: String,
    pub comment: String,
    #[serde(default)]
    pub puntuacion: Option<i32>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl Review {
    /// Formats `created_at` as `YYYY-MM-DD HH:MM`.
    ///
    /// The service emits naive ISO-8601 timestamps; RFC 3339 is accepted too.
    /// Unparseable values are returned as-is.
    pub fn created_at_display(&self) -> Option<String> {
        let raw = self.created_at.as_deref()?;
        if let Ok(ts) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
            return Some(ts.format("%Y-%m-%d %H:%M").to_string());
        }
        if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
            return Some(ts.format("%Y-%m-%d %H:%M").to_string());
        }
        Some(raw.to_string())
    }
}

/// Review score (puntuación), always within `1..=10`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Score(u8);

impl Score {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 10;
    pub const DEFAULT: u8 = 5;

    /// Creates a score, clamping to the valid range.
    pub fn new(value: u8) -> Self {
        Self(value.clamp(Self::MIN, Self::MAX))
    }

    pub fn value(self) -> u8 {
        self.0
    }

    #[must_use]
    pub fn increment(self) -> Self {
        Self::new(self.0.saturating_add(1))
    }

    #[must_use]
    pub fn decrement(self) -> Self {
        Self::new(self.0.saturating_sub(1))
    }
}

impl Default for Score {
    fn default() -> Self {
        Self(Self::DEFAULT)
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Validated body for `POST /movies`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewMovie {
    pub title: String,
    pub year: i32,
    pub metascore: i32,
}

/// Validated body for `POST /reviews`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewReview {
    pub movie_id: MovieId,
    pub comment: String,
    pub puntuacion: Score,
}

/// Successful login: the issued token plus the username to display.
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub token: Token,
    /// Username echoed by the service, if it sends one.
    pub username: Option<String>,
}

/// The `{ "msg": "..." }` body the service uses for confirmations and errors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceMessage {
    #[serde(default)]
    pub msg: Option<String>,
}

impl ServiceMessage {
    /// Returns the service message, or `fallback` when none was sent.
    pub fn or<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.msg
            .as_deref()
            .filter(|msg| !msg.trim().is_empty())
            .unwrap_or(fallback)
    }
}

/// Raw `POST /login` response body.
#[derive(Debug, Deserialize)]
pub(crate) struct LoginResponse {
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct LoginRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct RegisterRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
    pub email: &'a str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_movie_tolerates_null_columns() {
        let json = r#"{"id": 3, "title": "Alien", "year": null, "metascore": 89}"#;
        let movie: Movie = serde_json::from_str(json).unwrap();
        assert_eq!(movie.id, MovieId(3));
        assert_eq!(movie.year, None);
        assert_eq!(movie.metascore, Some(89));
        assert_eq!(movie.userscore, None);
    }

    #[test]
    fn test_review_created_at_display() {
        let review = Review {
            id: ReviewId(1),
            user: "ana".to_string(),
            comment: "Muy buena".to_string(),
            puntuacion: Some(8),
            created_at: Some("2024-05-01T18:42:13.123456".to_string()),
        };
        assert_eq!(
            review.created_at_display().as_deref(),
            Some("2024-05-01 18:42")
        );
    }

    #[test]
    fn test_review_created_at_unparseable_kept_raw() {
        let review = Review {
            id: ReviewId(1),
            user: "ana".to_string(),
            comment: "ok".to_string(),
            puntuacion: None,
            created_at: Some("ayer".to_string()),
        };
        assert_eq!(review.created_at_display().as_deref(), Some("ayer"));
    }

    #[test]
    fn test_score_clamps_to_range() {
        assert_eq!(Score::new(0).value(), 1);
        assert_eq!(Score::new(42).value(), 10);
        assert_eq!(Score::default().value(), 5);
        assert_eq!(Score::new(10).increment().value(), 10);
        assert_eq!(Score::new(1).decrement().value(), 1);
    }

    #[test]
    fn test_new_review_wire_shape() {
        let review = NewReview {
            movie_id: MovieId(7),
            comment: "Genial".to_string(),
            puntuacion: Score::new(9),
        };
        let value = serde_json::to_value(&review).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"movie_id": 7, "comment": "Genial", "puntuacion": 9})
        );
    }

    #[test]
    fn test_service_message_fallback() {
        let empty = ServiceMessage::default();
        assert_eq!(empty.or("fallback"), "fallback");
        let blank = ServiceMessage {
            msg: Some("  ".to_string()),
        };
        assert_eq!(blank.or("fallback"), "fallback");
        let msg = ServiceMessage {
            msg: Some("Película creada".to_string()),
        };
        assert_eq!(msg.or("fallback"), "Película creada");
    }
}
