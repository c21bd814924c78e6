//! Integration tests for API key authentication, role enforcement, and the
//! admin key management endpoints.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, delete_auth, get, get_auth, post_json, post_json_auth, put_json_auth, seed_admin,
    seed_client, seed_employee,
};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Authentication
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn missing_authorization_header_returns_401(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/events").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Missing Authorization header");
}

#[sqlx::test(migrations = "../../migrations")]
async fn non_bearer_authorization_returns_401(pool: PgPool) {
    let key = seed_admin(&pool).await;

    let app = common::build_test_app(pool);
    let request = axum::http::Request::builder()
        .method("GET")
        .uri("/api/v1/events")
        .header("authorization", format!("Basic {key}"))
        .body(axum::body::Body::empty())
        .unwrap();
    let response = tower::ServiceExt::oneshot(app, request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../migrations")]
async fn unknown_api_key_returns_401(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/v1/events", "not-a-real-key").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Invalid or revoked API key");
}

#[sqlx::test(migrations = "../../migrations")]
async fn revoked_api_key_returns_401(pool: PgPool) {
    let admin_key = seed_admin(&pool).await;

    // Mint a second key and revoke it through the API.
    let app = common::build_test_app(pool.clone());
    let created = post_json_auth(
        app,
        "/api/v1/admin/api-keys",
        serde_json::json!({"label": "doomed"}),
        &admin_key,
    )
    .await;
    assert_eq!(created.status(), StatusCode::CREATED);
    let created = body_json(created).await;
    let key_id = created["data"]["id"].as_i64().unwrap();
    let plaintext = created["data"]["plaintext_key"].as_str().unwrap().to_string();

    // The fresh key works.
    let app = common::build_test_app(pool.clone());
    let response = get_auth(app, "/api/v1/events", &plaintext).await;
    assert_eq!(response.status(), StatusCode::OK);

    let app = common::build_test_app(pool.clone());
    let response = delete_auth(app, &format!("/api/v1/admin/api-keys/{key_id}"), &admin_key).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    // And now it does not.
    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/v1/events", &plaintext).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// ---------------------------------------------------------------------------
// Role enforcement
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn client_cannot_access_staff_routes(pool: PgPool) {
    let (_, client_key) = seed_client(&pool).await;

    let app = common::build_test_app(pool.clone());
    let response = get_auth(app, "/api/v1/users", &client_key).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/v1/transactions", &client_key).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../../migrations")]
async fn employee_cannot_access_admin_routes(pool: PgPool) {
    let employee_key = seed_employee(&pool).await;

    let app = common::build_test_app(pool.clone());
    let response = get_auth(app, "/api/v1/admin/api-keys", &employee_key).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let app = common::build_test_app(pool);
    let response = put_json_auth(
        app,
        "/api/v1/settings/company_name",
        serde_json::json!("New Name"),
        &employee_key,
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../../migrations")]
async fn employee_can_access_staff_routes(pool: PgPool) {
    let employee_key = seed_employee(&pool).await;

    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/v1/events", &employee_key).await;
    assert_eq!(response.status(), StatusCode::OK);
}

// ---------------------------------------------------------------------------
// API key management
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn created_key_plaintext_is_shown_exactly_once(pool: PgPool) {
    let admin_key = seed_admin(&pool).await;

    let app = common::build_test_app(pool.clone());
    let created = post_json_auth(
        app,
        "/api/v1/admin/api-keys",
        serde_json::json!({"label": "integration"}),
        &admin_key,
    )
    .await;
    assert_eq!(created.status(), StatusCode::CREATED);
    let created = body_json(created).await;

    let plaintext = created["data"]["plaintext_key"].as_str().unwrap();
    let prefix = created["data"]["key_prefix"].as_str().unwrap();
    assert!(plaintext.starts_with(prefix));
    assert_eq!(plaintext.len(), 48);

    // The listing exposes the prefix but never the plaintext or the hash.
    let app = common::build_test_app(pool);
    let listed = get_auth(app, "/api/v1/admin/api-keys", &admin_key).await;
    assert_eq!(listed.status(), StatusCode::OK);
    let listed = body_json(listed).await;

    let entry = listed["data"]
        .as_array()
        .unwrap()
        .iter()
        .find(|k| k["label"] == "integration")
        .expect("created key must be listed");
    assert_eq!(entry["key_prefix"], prefix);
    assert!(entry.get("plaintext_key").is_none());
    assert!(entry.get("key_hash").is_none());
}

#[sqlx::test(migrations = "../../migrations")]
async fn create_key_rejects_blank_label(pool: PgPool) {
    let admin_key = seed_admin(&pool).await;

    let app = common::build_test_app(pool);
    let response = post_json_auth(
        app,
        "/api/v1/admin/api-keys",
        serde_json::json!({"label": ""}),
        &admin_key,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../migrations")]
async fn revoking_unknown_key_returns_404(pool: PgPool) {
    let admin_key = seed_admin(&pool).await;

    let app = common::build_test_app(pool);
    let response = delete_auth(app, "/api/v1/admin/api-keys/999999", &admin_key).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../migrations")]
async fn unauthenticated_key_creation_is_rejected(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/admin/api-keys",
        serde_json::json!({"label": "sneaky"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
