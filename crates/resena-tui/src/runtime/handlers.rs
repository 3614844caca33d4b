//! Effect handlers: one async function per request kind.
//!
//! Handlers perform the HTTP call and return a `TaskResult`. They never
//! touch `AppState`; the runtime forwards their result to the reducer.

use resena_core::api::{ApiClient, MovieId, NewMovie, NewReview};
use resena_core::forms::{Credentials, Registration};
use resena_core::session::Token;
use tokio_util::sync::CancellationToken;

use crate::events::TaskResult;

pub async fn login(client: ApiClient, credentials: Credentials) -> TaskResult {
    let result = client.login(&credentials).await;
    TaskResult::Login {
        username: credentials.username,
        result,
    }
}

pub async fn register(client: ApiClient, registration: Registration) -> TaskResult {
    TaskResult::Register(client.register(&registration).await)
}

pub async fn fetch_movies(client: ApiClient, cancel: Option<CancellationToken>) -> TaskResult {
    let cancel = cancel.unwrap_or_default();
    tokio::select! {
        () = cancel.cancelled() => TaskResult::Cancelled,
        result = client.list_movies() => TaskResult::Movies(result),
    }
}

pub async fn create_movie(client: ApiClient, token: Token, movie: NewMovie) -> TaskResult {
    TaskResult::MovieCreated(client.create_movie(&token, &movie).await)
}

pub async fn fetch_reviews(
    client: ApiClient,
    movie_id: MovieId,
    cancel: Option<CancellationToken>,
) -> TaskResult {
    let cancel = cancel.unwrap_or_default();
    tokio::select! {
        () = cancel.cancelled() => TaskResult::Cancelled,
        result = client.list_reviews(movie_id) => TaskResult::Reviews { movie_id, result },
    }
}

pub async fn create_review(client: ApiClient, token: Token, review: NewReview) -> TaskResult {
    let movie_id = review.movie_id;
    let result = client.create_review(&token, &review).await;
    TaskResult::ReviewCreated { movie_id, result }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use resena_core::api::{ApiError, Score};
    use serde_json::json;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    async fn client(server: &MockServer) -> ApiClient {
        ApiClient::new(&format!("{}/api", server.uri()), None).unwrap()
    }

    #[tokio::test]
    async fn test_login_keeps_typed_username() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/login"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"access_token": "T"})))
            .mount(&server)
            .await;

        let credentials = Credentials::parse("ana", "pw").unwrap();
        match login(client(&server).await, credentials).await {
            TaskResult::Login { username, result } => {
                assert_eq!(username, "ana");
                assert_eq!(result.unwrap().token.as_str(), "T");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_cancelled_fetch_reports_cancelled() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/movies"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!([]))
                    .set_delay(Duration::from_secs(5)),
            )
            .mount(&server)
            .await;

        let cancel = CancellationToken::new();
        cancel.cancel();
        let result = fetch_movies(client(&server).await, Some(cancel)).await;
        assert!(matches!(result, TaskResult::Cancelled));
    }

    #[tokio::test]
    async fn test_fetch_reviews_tags_movie() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/reviews/movie/3"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"id": 1, "user": "ana", "comment": "buena", "puntuacion": 8}
            ])))
            .mount(&server)
            .await;

        match fetch_reviews(client(&server).await, MovieId(3), None).await {
            TaskResult::Reviews { movie_id, result } => {
                assert_eq!(movie_id, MovieId(3));
                assert_eq!(result.unwrap().len(), 1);
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_create_review_sends_bearer_token() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/reviews"))
            .and(header("authorization", "Bearer T"))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({"msg": "ok"})))
            .expect(1)
            .mount(&server)
            .await;

        let review = NewReview {
            movie_id: MovieId(9),
            comment: "genial".to_string(),
            puntuacion: Score::default(),
        };
        let token = Token::new("T").unwrap();
        match create_review(client(&server).await, token, review).await {
            TaskResult::ReviewCreated { movie_id, result } => {
                assert_eq!(movie_id, MovieId(9));
                assert_eq!(result.unwrap().msg.as_deref(), Some("ok"));
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_create_movie_surfaces_service_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/movies"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({"msg": "Faltan datos"})))
            .mount(&server)
            .await;

        let movie = NewMovie {
            title: "Alien".to_string(),
            year: 1979,
            metascore: 89,
        };
        let token = Token::new("T").unwrap();
        match create_movie(client(&server).await, token, movie).await {
            TaskResult::MovieCreated(Err(ApiError::Service { status, message })) => {
                assert_eq!(status, 400);
                assert_eq!(message.as_deref(), Some("Faltan datos"));
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
