//! Session state: the bearer token and the logged-in username.
//!
//! A `Session` lives as long as the process and is never written to disk.
//! It is owned by whoever composes the application and handed down by
//! reference; there is no global session.

use std::fmt;

/// Opaque bearer credential issued at login.
///
/// Cannot be empty, so holding a `Token` is enough to authorize a write.
/// `Debug` never prints the value.
#[derive(Clone, PartialEq, Eq)]
pub struct Token(String);

impl Token {
    /// Returns `None` for an empty or whitespace-only token.
    pub fn new(raw: impl Into<String>) -> Option<Self> {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Token(***)")
    }
}

#[derive(Debug, Clone, Default)]
pub struct Session {
    token: Option<Token>,
    username: Option<String>,
}

impl Session {
    pub fn on_login(&mut self, token: Token, username: impl Into<String>) {
        self.token = Some(token);
        self.username = Some(username.into());
    }

    pub fn on_logout(&mut self) {
        self.token = None;
        self.username = None;
    }

    pub fn token(&self) -> Option<&Token> {
        self.token.as_ref()
    }

    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }
}
