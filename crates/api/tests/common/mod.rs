//! Shared helpers for HTTP-level integration tests.
//!
//! Tests drive the real router through `tower::ServiceExt::oneshot`, so the
//! full middleware stack (auth extractors included) is exercised without a
//! TCP listener. Every request that should be authenticated carries a
//! `Bearer` API key minted through [`seed_key`].

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use encore_api::config::ServerConfig;
use encore_api::router::build_app_router;
use encore_api::state::AppState;
use encore_core::api_keys::generate_api_key;
use encore_core::types::DbId;
use encore_db::models::user::CreateUser;
use encore_db::repositories::{ApiKeyRepo, UserRepo};
use encore_hooks::Notifier;

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:5173` as CORS origin (matching the dev default),
/// a 30-second request timeout and no upstream catalog.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        catalog_url: None,
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool.
///
/// Shares [`build_app_router`] with `main.rs`, so integration tests exercise
/// the same middleware stack (CORS, request ID, timeout, tracing, panic
/// recovery) that production uses. The notifier has no mailer attached;
/// notices fall back to journal entries.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let notifier = Notifier::new(pool.clone(), None);
    let state = AppState::new(pool, Arc::new(config.clone()), notifier);
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Seeding
// ---------------------------------------------------------------------------

/// Seed a user with the given role plus an active API key for them.
///
/// Returns the user id and the plaintext key. The email is derived from the
/// role, so seed each role at most once per test database.
pub async fn seed_key(pool: &PgPool, role: &str) -> (DbId, String) {
    let input = CreateUser {
        display_name: format!("Test {role}"),
        email: format!("{role}@example.com"),
        role: Some(role.to_string()),
        phone: None,
    };
    let user = UserRepo::create(pool, &input)
        .await
        .expect("failed to seed user");

    let generated = generate_api_key();
    ApiKeyRepo::create(pool, "test", &generated.prefix, &generated.hash, user.id)
        .await
        .expect("failed to seed api key");

    (user.id, generated.plaintext)
}

/// Seed an admin user and return their API key.
pub async fn seed_admin(pool: &PgPool) -> String {
    seed_key(pool, "admin").await.1
}

/// Seed an employee user and return their API key.
pub async fn seed_employee(pool: &PgPool) -> String {
    seed_key(pool, "employee").await.1
}

/// Seed a client user and return their id and API key.
pub async fn seed_client(pool: &PgPool) -> (DbId, String) {
    seed_key(pool, "client").await
}

/// Create an event for the given client through the API and return its id.
///
/// The event starts in the default `unattended` status with the playlist
/// open and no per-event limit.
pub async fn seed_event(pool: &PgPool, key: &str, client_id: DbId) -> i64 {
    let app = build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        "/api/v1/events",
        serde_json::json!({
            "event_date": "2026-06-20",
            "client_id": client_id,
            "package_cost_cents": 50_000,
            "deposit_cents": 10_000,
        }),
        key,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"]["id"]
        .as_i64()
        .expect("created event id")
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

/// Send an unauthenticated GET request.
pub async fn get(app: Router, path: &str) -> Response {
    let request = Request::builder()
        .method("GET")
        .uri(path)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send a GET request with a Bearer API key.
pub async fn get_auth(app: Router, path: &str, key: &str) -> Response {
    let request = Request::builder()
        .method("GET")
        .uri(path)
        .header(header::AUTHORIZATION, format!("Bearer {key}"))
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send an unauthenticated POST request with a JSON body.
pub async fn post_json(app: Router, path: &str, body: serde_json::Value) -> Response {
    let request = Request::builder()
        .method("POST")
        .uri(path)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send a POST request with a JSON body and a Bearer API key.
pub async fn post_json_auth(
    app: Router,
    path: &str,
    body: serde_json::Value,
    key: &str,
) -> Response {
    let request = Request::builder()
        .method("POST")
        .uri(path)
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::AUTHORIZATION, format!("Bearer {key}"))
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send a PUT request with a JSON body and a Bearer API key.
pub async fn put_json_auth(
    app: Router,
    path: &str,
    body: serde_json::Value,
    key: &str,
) -> Response {
    let request = Request::builder()
        .method("PUT")
        .uri(path)
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::AUTHORIZATION, format!("Bearer {key}"))
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send a DELETE request with a Bearer API key.
pub async fn delete_auth(app: Router, path: &str, key: &str) -> Response {
    let request = Request::builder()
        .method("DELETE")
        .uri(path)
        .header(header::AUTHORIZATION, format!("Bearer {key}"))
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

// ---------------------------------------------------------------------------
// Response helpers
// ---------------------------------------------------------------------------

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).expect("response body was not valid JSON")
}

/// Collect a response body as a UTF-8 string (CSV and print exports).
pub async fn body_text(response: Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).expect("response body was not valid UTF-8")
}
