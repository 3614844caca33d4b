//! Commands against a stubbed movie-review service.

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn temp_home() -> TempDir {
    TempDir::new().expect("create temp resena home")
}

fn can_bind_localhost() -> bool {
    std::net::TcpListener::bind("127.0.0.1:0").is_ok()
}

fn api_url(server: &MockServer) -> String {
    format!("{}/api", server.uri())
}

#[tokio::test]
async fn test_login_prints_token() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let home = temp_home();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/login"))
        .and(body_json(json!({"username": "ana", "password": "pw"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"access_token": "T"})))
        .expect(1)
        .mount(&server)
        .await;

    cargo_bin_cmd!("resena")
        .env("RESENA_HOME", home.path())
        .env("RESENA_BASE_URL", api_url(&server))
        .args(["login", "--username", "ana", "--password", "pw"])
        .assert()
        .success()
        .stdout("T\n")
        .stderr(predicate::str::contains("Login exitoso!"));
}

#[tokio::test]
async fn test_login_rejection_shows_service_message() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let home = temp_home();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/login"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"msg": "bad credentials"})))
        .mount(&server)
        .await;

    cargo_bin_cmd!("resena")
        .env("RESENA_HOME", home.path())
        .env("RESENA_BASE_URL", api_url(&server))
        .args(["login", "-u", "ana", "-p", "nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("bad credentials"));
}

#[tokio::test]
async fn test_movies_list_prints_table() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let home = temp_home();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/movies"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "title": "Alien", "year": 1979, "metascore": 89, "userscore": 8.4},
            {"id": 2, "title": "Heat", "year": null, "metascore": null}
        ])))
        .mount(&server)
        .await;

    cargo_bin_cmd!("resena")
        .env("RESENA_HOME", home.path())
        .args(["--base-url", &api_url(&server), "movies", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Alien"))
        .stdout(predicate::str::contains("Heat"))
        .stdout(predicate::str::contains("8.4"));
}

#[tokio::test]
async fn test_movies_add_sends_bearer_token() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let home = temp_home();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/movies"))
        .and(header("authorization", "Bearer T"))
        .and(body_json(json!({"title": "Alien", "year": 1979, "metascore": 89})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"msg": "Película agregada"})))
        .expect(1)
        .mount(&server)
        .await;

    cargo_bin_cmd!("resena")
        .env("RESENA_HOME", home.path())
        .env("RESENA_BASE_URL", api_url(&server))
        .env("RESENA_TOKEN", "T")
        .args([
            "movies",
            "add",
            "--title",
            "Alien",
            "--year",
            "1979",
            "--metascore",
            "89",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Película agregada"));
}

#[tokio::test]
async fn test_invalid_movie_never_reaches_service() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let home = temp_home();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/movies"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    cargo_bin_cmd!("resena")
        .env("RESENA_HOME", home.path())
        .env("RESENA_BASE_URL", api_url(&server))
        .args([
            "movies",
            "add",
            "--title",
            "Alien",
            "--year",
            "1979",
            "--metascore",
            "abc",
            "--token",
            "T",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("El campo metascore debe ser numérico"));
}

#[tokio::test]
async fn test_reviews_list_for_movie() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let home = temp_home();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/reviews/movie/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 3, "user": "ana", "comment": "Terror puro", "puntuacion": 9,
             "created_at": "2024-03-01T10:15:42"}
        ])))
        .mount(&server)
        .await;

    cargo_bin_cmd!("resena")
        .env("RESENA_HOME", home.path())
        .env("RESENA_BASE_URL", api_url(&server))
        .args(["reviews", "list", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Terror puro"))
        .stdout(predicate::str::contains("9/10"))
        .stdout(predicate::str::contains("2024-03-01 10:15"));
}

#[test]
fn test_unreachable_service_shows_connection_error() {
    let home = temp_home();

    cargo_bin_cmd!("resena")
        .env("RESENA_HOME", home.path())
        // Port 9 (discard) is closed on test machines.
        .env("RESENA_BASE_URL", "http://127.0.0.1:9/api")
        .args(["movies", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error al conectar con el servidor"));
}
