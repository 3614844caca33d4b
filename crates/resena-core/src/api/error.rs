//! Structured errors for service calls.

use std::fmt;

use serde_json::Value;

use crate::forms::ValidationError;
use crate::messages;

pub type ApiResult<T> = Result<T, ApiError>;

/// Error category, used for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorKind {
    Network,
    Service,
    Validation,
}

impl fmt::Display for ApiErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiErrorKind::Network => write!(f, "network"),
            ApiErrorKind::Service => write!(f, "service_error"),
            ApiErrorKind::Validation => write!(f, "validation"),
        }
    }
}

/// Failure of a call to the movie-review service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Connection failure, timeout, or a response body that could not be read.
    /// `detail` is for logs only and never shown to the user.
    Network { detail: String },
    /// Non-2xx response. `message` is the body's `msg` field, when present.
    Service { status: u16, message: Option<String> },
    /// Client-side check failed; the request was never sent.
    Validation(ValidationError),
}

impl ApiError {
    pub fn network(detail: impl fmt::Display) -> Self {
        ApiError::Network {
            detail: detail.to_string(),
        }
    }

    /// Builds a service error from an HTTP status and raw response body.
    ///
    /// Any JSON object with a string `msg` field yields that message; every
    /// other body (empty, HTML, JSON without `msg`) yields `None`.
    pub fn from_status(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<Value>(body)
            .ok()
            .and_then(|json| json.get("msg").and_then(Value::as_str).map(str::to_string))
            .filter(|msg| !msg.trim().is_empty());
        ApiError::Service { status, message }
    }

    pub fn kind(&self) -> ApiErrorKind {
        match self {
            ApiError::Network { .. } => ApiErrorKind::Network,
            ApiError::Service { .. } => ApiErrorKind::Service,
            ApiError::Validation(_) => ApiErrorKind::Validation,
        }
    }

    /// Text for the status line.
    ///
    /// Network failures always show the generic connection message; service
    /// errors show the service's message verbatim, or `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ApiError::Network { .. } => messages::CONNECTION_FAILED.to_string(),
            ApiError::Service {
                message: Some(msg), ..
            } => msg.clone(),
            ApiError::Service { message: None, .. } => fallback.to_string(),
            ApiError::Validation(err) => err.to_string(),
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Network { detail } => write!(f, "network error: {detail}"),
            ApiError::Service {
                status,
                message: Some(msg),
            } => write!(f, "HTTP {status}: {msg}"),
            ApiError::Service {
                status,
                message: None,
            } => write!(f, "HTTP {status}"),
            ApiError::Validation(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::Validation(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::{Field, Problem};

    #[test]
    fn test_from_status_extracts_msg() {
        let err = ApiError::from_status(401, r#"{"msg": "bad credentials"}"#);
        assert_eq!(
            err,
            ApiError::Service {
                status: 401,
                message: Some("bad credentials".to_string()),
            }
        );
        assert_eq!(err.user_message("Error en login"), "bad credentials");
    }

    #[test]
    fn test_from_status_without_msg_uses_fallback() {
        for body in ["", "<html>oops</html>", r#"{"error": "x"}"#, r#"{"msg": 5}"#] {
            let err = ApiError::from_status(500, body);
            assert_eq!(
                err,
                ApiError::Service {
                    status: 500,
                    message: None
                },
                "body: {body}"
            );
            assert_eq!(err.user_message("Error en login"), "Error en login");
        }
    }

    #[test]
    fn test_network_error_hides_detail() {
        let err = ApiError::network("connection refused (os error 111)");
        assert_eq!(err.kind(), ApiErrorKind::Network);
        assert_eq!(err.user_message("ignored"), messages::CONNECTION_FAILED);
        assert!(err.to_string().contains("connection refused"));
    }

    #[test]
    fn test_validation_error_message() {
        let err = ApiError::from(ValidationError::new(Field::Year, Problem::Required));
        assert_eq!(err.kind(), ApiErrorKind::Validation);
        assert_eq!(err.user_message("ignored"), "El campo año es obligatorio");
    }
}
