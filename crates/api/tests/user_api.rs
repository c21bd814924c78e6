//! Integration tests for the user management endpoints.

mod common;

use axum::http::StatusCode;
use common::{body_json, get_auth, post_json_auth, put_json_auth, seed_employee};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Create and read
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn create_user_defaults_to_client_role(pool: PgPool) {
    let staff_key = seed_employee(&pool).await;

    let app = common::build_test_app(pool);
    let response = post_json_auth(
        app,
        "/api/v1/users",
        serde_json::json!({
            "display_name": "Jamie Couple",
            "email": "jamie@example.com",
        }),
        &staff_key,
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["role"], "client");
    assert_eq!(json["data"]["email"], "jamie@example.com");
}

#[sqlx::test(migrations = "../../migrations")]
async fn create_user_rejects_bad_email_and_bad_role(pool: PgPool) {
    let staff_key = seed_employee(&pool).await;

    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        "/api/v1/users",
        serde_json::json!({"display_name": "X", "email": "not-an-email"}),
        &staff_key,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let app = common::build_test_app(pool);
    let response = post_json_auth(
        app,
        "/api/v1/users",
        serde_json::json!({
            "display_name": "X",
            "email": "x@example.com",
            "role": "superuser",
        }),
        &staff_key,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Unknown role: 'superuser'");
}

#[sqlx::test(migrations = "../../migrations")]
async fn duplicate_email_returns_409(pool: PgPool) {
    let staff_key = seed_employee(&pool).await;

    for _ in 0..2 {
        let app = common::build_test_app(pool.clone());
        let response = post_json_auth(
            app,
            "/api/v1/users",
            serde_json::json!({
                "display_name": "Dupe",
                "email": "dupe@example.com",
            }),
            &staff_key,
        )
        .await;
        if response.status() == StatusCode::CREATED {
            continue;
        }
        assert_eq!(response.status(), StatusCode::CONFLICT);
        return;
    }
    panic!("second create with the same email must conflict");
}

#[sqlx::test(migrations = "../../migrations")]
async fn list_users_filters_by_role(pool: PgPool) {
    let staff_key = seed_employee(&pool).await;

    let app = common::build_test_app(pool.clone());
    let response = get_auth(app, "/api/v1/users?role=employee", &staff_key).await;
    let json = body_json(response).await;
    let users = json["data"].as_array().unwrap();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0]["role"], "employee");

    // The seed migration ships one admin, so the unfiltered list has both.
    let app = common::build_test_app(pool.clone());
    let response = get_auth(app, "/api/v1/users", &staff_key).await;
    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 2);

    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/v1/users?role=wizard", &staff_key).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Update
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn update_user_changes_role(pool: PgPool) {
    let staff_key = seed_employee(&pool).await;

    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        "/api/v1/users",
        serde_json::json!({
            "display_name": "Promoted",
            "email": "promoted@example.com",
        }),
        &staff_key,
    )
    .await;
    let id = body_json(response).await["data"]["id"].as_i64().unwrap();

    let app = common::build_test_app(pool);
    let response = put_json_auth(
        app,
        &format!("/api/v1/users/{id}"),
        serde_json::json!({"role": "employee"}),
        &staff_key,
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["role"], "employee");
    assert_eq!(json["data"]["display_name"], "Promoted");
}

#[sqlx::test(migrations = "../../migrations")]
async fn update_missing_user_returns_404(pool: PgPool) {
    let staff_key = seed_employee(&pool).await;

    let app = common::build_test_app(pool);
    let response = put_json_auth(
        app,
        "/api/v1/users/999999",
        serde_json::json!({"display_name": "Ghost"}),
        &staff_key,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
