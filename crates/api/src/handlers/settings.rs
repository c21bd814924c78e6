//! Settings handlers.
//!
//! Settings are string-keyed JSON values, so `PUT /settings/{key}` takes
//! the raw new value as its body (a JSON string, number, or boolean).
//! Export and import round-trip the whole key→value object for backup.

use axum::extract::{Path, State};
use axum::http::header;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;
use serde_json::json;

use encore_db::repositories::SettingsRepo;
use encore_hooks::{hooks, HookEvent};

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireAdmin, RequireStaff};
use crate::response::DataResponse;
use crate::state::AppState;

/// Response for the settings import endpoint.
#[derive(Debug, Serialize)]
pub struct ImportResponse {
    pub imported: usize,
}

/// GET /api/v1/settings
pub async fn list_settings(
    _user: RequireStaff,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let settings = SettingsRepo::all(&state.pool).await?;
    Ok(Json(DataResponse { data: settings }))
}

/// PUT /api/v1/settings/{key}
///
/// Set one setting to the JSON value in the body.
pub async fn put_setting(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(key): Path<String>,
    Json(value): Json<serde_json::Value>,
) -> AppResult<impl IntoResponse> {
    if key.trim().is_empty() || key.len() > 200 {
        return Err(AppError::BadRequest("Invalid setting key".into()));
    }

    let setting = SettingsRepo::upsert(&state.pool, &key, &value).await?;

    state.bus.publish(
        HookEvent::new(hooks::SETTINGS_UPDATED)
            .with_actor(Some(admin.user_id))
            .with_payload(json!({ "key": key })),
    );

    tracing::info!(key = %setting.key, user_id = admin.user_id, "Setting updated");
    Ok(Json(DataResponse { data: setting }))
}

/// GET /api/v1/settings/export
///
/// Download every setting as one key→value JSON object.
pub async fn export_settings(
    _admin: RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let settings = SettingsRepo::all(&state.pool).await?;
    let map: serde_json::Map<String, serde_json::Value> = settings
        .into_iter()
        .map(|s| (s.key, s.value))
        .collect();

    Ok((
        [(
            header::CONTENT_DISPOSITION,
            "attachment; filename=\"encore-settings.json\"",
        )],
        Json(serde_json::Value::Object(map)),
    ))
}

/// POST /api/v1/settings/import
///
/// Upsert every key in the posted object. The whole import is atomic.
pub async fn import_settings(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(values): Json<serde_json::Map<String, serde_json::Value>>,
) -> AppResult<impl IntoResponse> {
    let imported = SettingsRepo::upsert_many(&state.pool, &values).await?;

    state.bus.publish(
        HookEvent::new(hooks::SETTINGS_UPDATED)
            .with_actor(Some(admin.user_id))
            .with_payload(json!({ "imported": imported })),
    );

    tracing::info!(imported, user_id = admin.user_id, "Settings imported");
    Ok(Json(DataResponse {
        data: ImportResponse { imported },
    }))
}
