use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;

use super::error::{ApiError, ApiResult};
use super::types::{
    LoginOutcome, LoginRequest, LoginResponse, Movie, MovieId, NewMovie, NewReview,
    RegisterRequest, Review, ServiceMessage,
};
use crate::forms::{Credentials, Registration};
use crate::session::Token;

/// Base URL used when neither config nor environment provide one.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000/api";

/// User-Agent header sent with every request.
pub const USER_AGENT: &str = concat!("resena/", env!("CARGO_PKG_VERSION"));

/// Client for the movie-review service.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
}

impl ApiClient {
    /// Creates a client rooted at `base_url` (e.g. `http://127.0.0.1:5000/api`).
    ///
    /// `timeout` applies per request; `None` waits indefinitely.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = reqwest::Client::builder().user_agent(USER_AGENT);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().context("Failed to build HTTP client")?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `POST /login`. A 2xx answer without `access_token` counts as a
    /// service error with no message.
    pub async fn login(&self, credentials: &Credentials) -> ApiResult<LoginOutcome> {
        let body = LoginRequest {
            username: &credentials.username,
            password: &credentials.password,
        };
        let builder = self.http.post(self.url("/login")).json(&body);
        let (status, response): (u16, LoginResponse) = self.send_json(builder).await?;

        let token = response.access_token.and_then(Token::new).ok_or_else(|| {
            tracing::warn!(status, "login response did not include an access token");
            ApiError::Service {
                status,
                message: None,
            }
        })?;
        Ok(LoginOutcome {
            token,
            username: response.username.filter(|name| !name.trim().is_empty()),
        })
    }

    /// `POST /register`.
    pub async fn register(&self, registration: &Registration) -> ApiResult<ServiceMessage> {
        let body = RegisterRequest {
            username: &registration.credentials.username,
            password: &registration.credentials.password,
            email: &registration.email,
        };
        let builder = self.http.post(self.url("/register")).json(&body);
        self.send_message(builder).await
    }

    /// `GET /movies`.
    pub async fn list_movies(&self) -> ApiResult<Vec<Movie>> {
        let builder = self.http.get(self.url("/movies"));
        let (_, movies) = self.send_json(builder).await?;
        Ok(movies)
    }

    /// `POST /movies` with the bearer token.
    pub async fn create_movie(&self, token: &Token, movie: &NewMovie) -> ApiResult<ServiceMessage> {
        let builder = self
            .http
            .post(self.url("/movies"))
            .bearer_auth(token.as_str())
            .json(movie);
        self.send_message(builder).await
    }

    /// `GET /reviews/movie/{movie_id}`.
    pub async fn list_reviews(&self, movie_id: MovieId) -> ApiResult<Vec<Review>> {
        let builder = self
            .http
            .get(self.url(&format!("/reviews/movie/{movie_id}")));
        let (_, reviews) = self.send_json(builder).await?;
        Ok(reviews)
    }

    /// `POST /reviews` with the bearer token.
    pub async fn create_review(
        &self,
        token: &Token,
        review: &NewReview,
    ) -> ApiResult<ServiceMessage> {
        let builder = self
            .http
            .post(self.url("/reviews"))
            .bearer_auth(token.as_str())
            .json(review);
        self.send_message(builder).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Sends the request and returns the status and body of a 2xx response.
    async fn send(&self, builder: RequestBuilder) -> ApiResult<(u16, String)> {
        let request = builder.build().map_err(ApiError::network)?;
        let method = request.method().clone();
        let url = request.url().clone();
        tracing::debug!(%method, %url, "sending request");

        let response = self.http.execute(request).await.map_err(|err| {
            tracing::warn!(%method, %url, error = %err, "request failed");
            ApiError::network(err)
        })?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(ApiError::network)?;

        if !(200..300).contains(&status) {
            let err = ApiError::from_status(status, &body);
            tracing::warn!(%method, %url, status, error = %err, "service returned an error");
            return Err(err);
        }
        tracing::debug!(%method, %url, status, "request succeeded");
        Ok((status, body))
    }

    async fn send_json<T: DeserializeOwned>(&self, builder: RequestBuilder) -> ApiResult<(u16, T)> {
        let (status, body) = self.send(builder).await?;
        let parsed = serde_json::from_str(&body)
            .map_err(|err| ApiError::network(format!("invalid response body: {err}")))?;
        Ok((status, parsed))
    }

    /// Create and register endpoints answer with `{msg}`, but an empty or
    /// non-JSON success body is still a success.
    async fn send_message(&self, builder: RequestBuilder) -> ApiResult<ServiceMessage> {
        let (_, body) = self.send(builder).await?;
        Ok(serde_json::from_str(&body).unwrap_or_default())
    }
}
