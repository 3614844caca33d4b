//! CLI command handlers.

pub mod auth;
pub mod config;
pub mod movies;
pub mod reviews;
pub mod tui;

use anyhow::{Result, anyhow};
use resena_core::api::ApiError;
use resena_core::session::Token;

/// Turns an API failure into the message the interactive client would show.
/// The technical detail only goes to the log.
fn api_failure(err: &ApiError, fallback: &str) -> anyhow::Error {
    tracing::debug!(kind = %err.kind(), error = %err, "request failed");
    anyhow!(err.user_message(fallback))
}

fn parse_token(raw: &str) -> Result<Token> {
    Token::new(raw).ok_or_else(|| anyhow!("The access token is empty; run `resena login` first"))
}
