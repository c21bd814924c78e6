//! Integration tests for the settings store endpoints.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, get_auth, post_json_auth, put_json_auth, seed_admin, seed_employee,
};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Listing
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn seeded_settings_are_listed(pool: PgPool) {
    let staff_key = seed_employee(&pool).await;

    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/v1/settings", &staff_key).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let settings = json["data"].as_array().unwrap();

    let company = settings
        .iter()
        .find(|s| s["key"] == "company_name")
        .expect("company_name must be seeded");
    assert_eq!(company["value"], "Encore Events");

    let journal = settings
        .iter()
        .find(|s| s["key"] == "journal_on_save")
        .expect("journal_on_save must be seeded");
    assert_eq!(journal["value"], true);
}

// ---------------------------------------------------------------------------
// Upsert
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn put_setting_overwrites_and_creates(pool: PgPool) {
    let admin_key = seed_admin(&pool).await;

    // Overwrite a seeded value.
    let app = common::build_test_app(pool.clone());
    let response = put_json_auth(
        app,
        "/api/v1/settings/company_name",
        serde_json::json!("Midnight Sounds"),
        &admin_key,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["value"], "Midnight Sounds");

    // Create a brand new key with a structured value.
    let app = common::build_test_app(pool.clone());
    let response = put_json_auth(
        app,
        "/api/v1/settings/booking_hours",
        serde_json::json!({"open": 9, "close": 23}),
        &admin_key,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["value"]["close"], 23);
}

#[sqlx::test(migrations = "../../migrations")]
async fn put_setting_rejects_blank_key(pool: PgPool) {
    let admin_key = seed_admin(&pool).await;

    let app = common::build_test_app(pool);
    let response = put_json_auth(
        app,
        "/api/v1/settings/%20",
        serde_json::json!(1),
        &admin_key,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Export / import
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn export_returns_a_json_attachment(pool: PgPool) {
    let admin_key = seed_admin(&pool).await;

    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/v1/settings/export", &admin_key).await;

    assert_eq!(response.status(), StatusCode::OK);
    let disposition = response
        .headers()
        .get("content-disposition")
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(disposition.contains("encore-settings.json"));

    let json = body_json(response).await;
    assert_eq!(json["currency"], "GBP");
    assert_eq!(json["default_playlist_limit"], 0);
}

#[sqlx::test(migrations = "../../migrations")]
async fn import_upserts_every_pair(pool: PgPool) {
    let admin_key = seed_admin(&pool).await;

    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        "/api/v1/settings/import",
        serde_json::json!({
            "currency": "EUR",
            "new_from_import": [1, 2, 3],
        }),
        &admin_key,
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["imported"], 2);

    // Both pairs landed.
    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/v1/settings/export", &admin_key).await;
    let json = body_json(response).await;
    assert_eq!(json["currency"], "EUR");
    assert_eq!(json["new_from_import"][2], 3);
}
