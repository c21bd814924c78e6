//! Integration tests for the per-event journal endpoints.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, get_auth, post_json_auth, seed_client, seed_employee, seed_event,
};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Appending
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn staff_can_append_entries(pool: PgPool) {
    let staff_key = seed_employee(&pool).await;
    let (client_id, _) = seed_client(&pool).await;
    let event_id = seed_event(&pool, &staff_key, client_id).await;

    let app = common::build_test_app(pool);
    let response = post_json_auth(
        app,
        &format!("/api/v1/events/{event_id}/journal"),
        serde_json::json!({"content": "Client rang about timings."}),
        &staff_key,
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["content"], "Client rang about timings.");
    // Omitted visibility defaults to admin.
    assert_eq!(json["data"]["visibility"], "admin");
    assert!(json["data"]["author_id"].is_number());
}

#[sqlx::test(migrations = "../../migrations")]
async fn clients_cannot_append(pool: PgPool) {
    let staff_key = seed_employee(&pool).await;
    let (client_id, client_key) = seed_client(&pool).await;
    let event_id = seed_event(&pool, &staff_key, client_id).await;

    let app = common::build_test_app(pool);
    let response = post_json_auth(
        app,
        &format!("/api/v1/events/{event_id}/journal"),
        serde_json::json!({"content": "I would like a refund."}),
        &client_key,
    )
    .await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../../migrations")]
async fn unknown_visibility_tag_returns_400(pool: PgPool) {
    let staff_key = seed_employee(&pool).await;
    let (client_id, _) = seed_client(&pool).await;
    let event_id = seed_event(&pool, &staff_key, client_id).await;

    let app = common::build_test_app(pool);
    let response = post_json_auth(
        app,
        &format!("/api/v1/events/{event_id}/journal"),
        serde_json::json!({"content": "x", "visibility": "secret"}),
        &staff_key,
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../migrations")]
async fn append_to_missing_event_returns_404(pool: PgPool) {
    let staff_key = seed_employee(&pool).await;

    let app = common::build_test_app(pool);
    let response = post_json_auth(
        app,
        "/api/v1/events/999999/journal",
        serde_json::json!({"content": "ghost"}),
        &staff_key,
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Listing and visibility
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn clients_only_see_client_visible_entries(pool: PgPool) {
    let staff_key = seed_employee(&pool).await;
    let (client_id, client_key) = seed_client(&pool).await;
    let event_id = seed_event(&pool, &staff_key, client_id).await;

    for (content, vis) in [
        ("Internal pricing note.", "admin"),
        ("Setup starts at five.", "employee"),
        ("Your quote is attached.", "client"),
    ] {
        let app = common::build_test_app(pool.clone());
        let response = post_json_auth(
            app,
            &format!("/api/v1/events/{event_id}/journal"),
            serde_json::json!({"content": content, "visibility": vis}),
            &staff_key,
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    // Staff see everything (three appended plus the creation entry).
    let app = common::build_test_app(pool.clone());
    let response = get_auth(
        app,
        &format!("/api/v1/events/{event_id}/journal"),
        &staff_key,
    )
    .await;
    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 4);

    // The client gets only the client-tagged entry, even when they ask
    // for an admin filter.
    for url in [
        format!("/api/v1/events/{event_id}/journal"),
        format!("/api/v1/events/{event_id}/journal?visibility=admin"),
    ] {
        let app = common::build_test_app(pool.clone());
        let response = get_auth(app, &url, &client_key).await;
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        let entries = json["data"].as_array().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0]["content"], "Your quote is attached.");
    }
}

#[sqlx::test(migrations = "../../migrations")]
async fn staff_can_filter_by_visibility(pool: PgPool) {
    let staff_key = seed_employee(&pool).await;
    let (client_id, _) = seed_client(&pool).await;
    let event_id = seed_event(&pool, &staff_key, client_id).await;

    let app = common::build_test_app(pool.clone());
    post_json_auth(
        app,
        &format!("/api/v1/events/{event_id}/journal"),
        serde_json::json!({"content": "Crew only.", "visibility": "employee"}),
        &staff_key,
    )
    .await;

    let app = common::build_test_app(pool.clone());
    let response = get_auth(
        app,
        &format!("/api/v1/events/{event_id}/journal?visibility=employee"),
        &staff_key,
    )
    .await;
    let json = body_json(response).await;
    let entries = json["data"].as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["visibility"], "employee");

    // A bogus filter tag is rejected for staff rather than ignored.
    let app = common::build_test_app(pool);
    let response = get_auth(
        app,
        &format!("/api/v1/events/{event_id}/journal?visibility=secret"),
        &staff_key,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
