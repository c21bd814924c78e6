//! Integration tests for the guest playlist endpoints.
//!
//! Playlist writes are open to clients (the guest-facing flow), while the
//! bulk and export operations stay staff-side.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, body_text, delete_auth, get_auth, post_json_auth, seed_client, seed_employee,
    seed_event,
};
use sqlx::PgPool;

async fn add_song(
    pool: &PgPool,
    key: &str,
    event_id: i64,
    song: &str,
    category_id: Option<i16>,
) -> serde_json::Value {
    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        &format!("/api/v1/events/{event_id}/playlist"),
        serde_json::json!({
            "song": song,
            "artist": "Test Artist",
            "category_id": category_id,
        }),
        key,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await
}

// ---------------------------------------------------------------------------
// Adding entries
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn client_can_add_a_song(pool: PgPool) {
    let staff_key = seed_employee(&pool).await;
    let (client_id, client_key) = seed_client(&pool).await;
    let event_id = seed_event(&pool, &staff_key, client_id).await;

    let json = add_song(&pool, &client_key, event_id, "Dancing Queen", Some(1)).await;
    assert_eq!(json["data"]["song"], "Dancing Queen");
    assert_eq!(json["data"]["event_id"], event_id);
    assert_eq!(json["data"]["category_id"], 1);
}

#[sqlx::test(migrations = "../../migrations")]
async fn adding_to_a_closed_playlist_returns_403(pool: PgPool) {
    let staff_key = seed_employee(&pool).await;
    let (client_id, client_key) = seed_client(&pool).await;

    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        "/api/v1/events",
        serde_json::json!({
            "event_date": "2026-06-20",
            "client_id": client_id,
            "playlist_enabled": false,
        }),
        &staff_key,
    )
    .await;
    let event_id = body_json(response).await["data"]["id"].as_i64().unwrap();

    let app = common::build_test_app(pool);
    let response = post_json_auth(
        app,
        &format!("/api/v1/events/{event_id}/playlist"),
        serde_json::json!({"song": "Locked Out"}),
        &client_key,
    )
    .await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let json = body_json(response).await;
    assert_eq!(json["error"], "The playlist for this event is closed");
}

#[sqlx::test(migrations = "../../migrations")]
async fn playlist_limit_is_enforced(pool: PgPool) {
    let staff_key = seed_employee(&pool).await;
    let (client_id, client_key) = seed_client(&pool).await;

    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        "/api/v1/events",
        serde_json::json!({
            "event_date": "2026-06-20",
            "client_id": client_id,
            "playlist_limit": 1,
        }),
        &staff_key,
    )
    .await;
    let event_id = body_json(response).await["data"]["id"].as_i64().unwrap();

    add_song(&pool, &client_key, event_id, "First In", None).await;

    let app = common::build_test_app(pool);
    let response = post_json_auth(
        app,
        &format!("/api/v1/events/{event_id}/playlist"),
        serde_json::json!({"song": "One Too Many"}),
        &client_key,
    )
    .await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Playlist limit of 1 entries reached");
}

#[sqlx::test(migrations = "../../migrations")]
async fn blank_song_returns_400(pool: PgPool) {
    let staff_key = seed_employee(&pool).await;
    let (client_id, client_key) = seed_client(&pool).await;
    let event_id = seed_event(&pool, &staff_key, client_id).await;

    let app = common::build_test_app(pool);
    let response = post_json_auth(
        app,
        &format!("/api/v1/events/{event_id}/playlist"),
        serde_json::json!({"song": ""}),
        &client_key,
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Listing and ordering
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn default_listing_groups_by_category(pool: PgPool) {
    let staff_key = seed_employee(&pool).await;
    let (client_id, client_key) = seed_client(&pool).await;
    let event_id = seed_event(&pool, &staff_key, client_id).await;

    // Category 2 is the seeded "First Dance", 1 is "General".
    add_song(&pool, &client_key, event_id, "Opener", Some(1)).await;
    add_song(&pool, &client_key, event_id, "Our Song", Some(2)).await;

    let app = common::build_test_app(pool);
    let response = get_auth(
        app,
        &format!("/api/v1/events/{event_id}/playlist"),
        &client_key,
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let groups = json["data"].as_array().unwrap();
    assert_eq!(groups.len(), 2);
    // Groups come back sorted by category name ascending.
    assert_eq!(groups[0]["category"], "First Dance");
    assert_eq!(groups[0]["entries"][0]["song"], "Our Song");
    assert_eq!(groups[1]["category"], "General");
}

#[sqlx::test(migrations = "../../migrations")]
async fn listing_can_be_flat_sorted_by_song(pool: PgPool) {
    let staff_key = seed_employee(&pool).await;
    let (client_id, client_key) = seed_client(&pool).await;
    let event_id = seed_event(&pool, &staff_key, client_id).await;

    add_song(&pool, &client_key, event_id, "Zebra", None).await;
    add_song(&pool, &client_key, event_id, "Aardvark", None).await;

    let app = common::build_test_app(pool);
    let response = get_auth(
        app,
        &format!("/api/v1/events/{event_id}/playlist?order_by=song"),
        &client_key,
    )
    .await;

    let json = body_json(response).await;
    let entries = json["data"].as_array().unwrap();
    assert_eq!(entries[0]["song"], "Aardvark");
    assert_eq!(entries[1]["song"], "Zebra");
}

#[sqlx::test(migrations = "../../migrations")]
async fn listing_a_missing_event_is_empty_not_404(pool: PgPool) {
    let staff_key = seed_employee(&pool).await;

    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/v1/events/999999/playlist", &staff_key).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 0);
}

// ---------------------------------------------------------------------------
// Removal
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn remove_entry_then_404_on_repeat(pool: PgPool) {
    let staff_key = seed_employee(&pool).await;
    let (client_id, client_key) = seed_client(&pool).await;
    let event_id = seed_event(&pool, &staff_key, client_id).await;

    let json = add_song(&pool, &client_key, event_id, "Short Lived", None).await;
    let entry_id = json["data"]["id"].as_i64().unwrap();

    let app = common::build_test_app(pool.clone());
    let response = delete_auth(
        app,
        &format!("/api/v1/events/{event_id}/playlist/{entry_id}"),
        &client_key,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let app = common::build_test_app(pool);
    let response = delete_auth(
        app,
        &format!("/api/v1/events/{event_id}/playlist/{entry_id}"),
        &client_key,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../migrations")]
async fn bulk_delete_is_staff_only(pool: PgPool) {
    let staff_key = seed_employee(&pool).await;
    let (client_id, client_key) = seed_client(&pool).await;
    let event_id = seed_event(&pool, &staff_key, client_id).await;

    add_song(&pool, &client_key, event_id, "One", None).await;
    add_song(&pool, &client_key, event_id, "Two", None).await;

    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        &format!("/api/v1/events/{event_id}/playlist/bulk-delete"),
        serde_json::json!({}),
        &client_key,
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let app = common::build_test_app(pool);
    let response = post_json_auth(
        app,
        &format!("/api/v1/events/{event_id}/playlist/bulk-delete"),
        serde_json::json!({}),
        &staff_key,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["removed"], 2);
}

// ---------------------------------------------------------------------------
// Export and print
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn export_playlist_is_a_csv_attachment(pool: PgPool) {
    let staff_key = seed_employee(&pool).await;
    let (client_id, client_key) = seed_client(&pool).await;
    let event_id = seed_event(&pool, &staff_key, client_id).await;
    add_song(&pool, &client_key, event_id, "Exported", Some(2)).await;

    let app = common::build_test_app(pool.clone());
    let response = get_auth(
        app,
        &format!("/api/v1/events/{event_id}/playlist/export"),
        &staff_key,
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let disposition = response
        .headers()
        .get("content-disposition")
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(disposition.contains(&format!("encore-playlist-{event_id}.csv")));

    let body = body_text(response).await;
    assert!(body.starts_with("\"song\",\"artist\",\"category\",\"added_by\",\"notes\",\"added_at\""));
    assert!(body.contains("\"Exported\""));
    assert!(body.contains("\"First Dance\""));

    // Clients cannot pull the export.
    let app = common::build_test_app(pool);
    let response = get_auth(
        app,
        &format!("/api/v1/events/{event_id}/playlist/export"),
        &client_key,
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../../migrations")]
async fn print_view_renders_grouped_text(pool: PgPool) {
    let staff_key = seed_employee(&pool).await;
    let (client_id, client_key) = seed_client(&pool).await;
    let event_id = seed_event(&pool, &staff_key, client_id).await;
    add_song(&pool, &client_key, event_id, "Printable", Some(2)).await;

    let app = common::build_test_app(pool);
    let response = get_auth(
        app,
        &format!("/api/v1/events/{event_id}/playlist/print"),
        &staff_key,
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get("content-type").unwrap(),
        "text/plain; charset=utf-8"
    );
    let body = body_text(response).await;
    assert!(body.contains("First Dance\n"));
    assert!(body.contains("  Printable by Test Artist"));
}

// ---------------------------------------------------------------------------
// Categories
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn seeded_categories_are_listed(pool: PgPool) {
    let (_, client_key) = seed_client(&pool).await;

    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/v1/playlist-categories", &client_key).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let names: Vec<&str> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["name"].as_str().unwrap())
        .collect();
    assert!(names.contains(&"General"));
    assert!(names.contains(&"First Dance"));
    assert!(names.contains(&"Do Not Play"));
}

#[sqlx::test(migrations = "../../migrations")]
async fn creating_a_category_requires_admin(pool: PgPool) {
    let admin_key = common::seed_admin(&pool).await;
    let employee_key = seed_employee(&pool).await;

    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        "/api/v1/playlist-categories",
        serde_json::json!({"name": "Requests", "sort_order": 10}),
        &employee_key,
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let app = common::build_test_app(pool);
    let response = post_json_auth(
        app,
        "/api/v1/playlist-categories",
        serde_json::json!({"name": "Requests", "sort_order": 10}),
        &admin_key,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["name"], "Requests");
}
