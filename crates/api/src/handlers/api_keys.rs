//! Admin handlers for API key management.
//!
//! All endpoints require the admin role via [`RequireAdmin`].
//! The plaintext key is returned **only** on creation; subsequent queries
//! expose only the `key_prefix` for identification.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use validator::Validate;

use encore_core::api_keys::generate_api_key;
use encore_core::error::CoreError;
use encore_core::types::DbId;
use encore_db::models::api_key::{ApiKeyCreatedResponse, ApiKeyResponse, CreateApiKey};
use encore_db::repositories::ApiKeyRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::response::{created, DataResponse};
use crate::state::AppState;

/// POST /api/v1/admin/api-keys
///
/// Generate a new API key owned by the calling admin. The plaintext key
/// is returned exactly once.
pub async fn create_api_key(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateApiKey>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;

    let generated = generate_api_key();
    let key = ApiKeyRepo::create(
        &state.pool,
        input.label.trim(),
        &generated.prefix,
        &generated.hash,
        admin.user_id,
    )
    .await?;

    tracing::info!(
        api_key_id = key.id,
        key_prefix = %key.key_prefix,
        user_id = admin.user_id,
        "API key created",
    );

    let response = ApiKeyCreatedResponse {
        id: key.id,
        label: key.label,
        key_prefix: key.key_prefix,
        plaintext_key: generated.plaintext,
        user_id: key.user_id,
        created_at: key.created_at,
    };

    Ok(created(response))
}

/// GET /api/v1/admin/api-keys
///
/// List all API keys. Shows prefix only, never the full key.
pub async fn list_api_keys(
    _admin: RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let keys: Vec<ApiKeyResponse> = ApiKeyRepo::list(&state.pool)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(Json(DataResponse { data: keys }))
}

/// DELETE /api/v1/admin/api-keys/{id}
///
/// Revoke a key. Revocation is a timestamp, not a delete, and a key
/// cannot be un-revoked.
pub async fn revoke_api_key(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let revoked = ApiKeyRepo::revoke(&state.pool, id).await?;
    if !revoked {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "api key",
            id,
        }));
    }

    tracing::info!(api_key_id = id, user_id = admin.user_id, "API key revoked");
    Ok(StatusCode::NO_CONTENT)
}
