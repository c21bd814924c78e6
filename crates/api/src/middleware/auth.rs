//! API key authentication extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use encore_core::api_keys::hash_api_key;
use encore_core::error::CoreError;
use encore_core::types::DbId;
use encore_db::repositories::{ApiKeyRepo, UserRepo};

use crate::error::AppError;
use crate::state::AppState;

/// The key owner, resolved from `Authorization: Bearer <api-key>`.
///
/// The presented key is hashed and matched against stored digests; a
/// plaintext key never reaches the database. Revoked keys fail the
/// lookup, and each successful authentication stamps the key's
/// `last_used_at`. Taking `AuthUser` as a handler parameter is what makes
/// a route require authentication.
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// The key owner's internal database id.
    pub user_id: DbId,
    /// The key owner's role name (`"admin"`, `"employee"`, `"client"`).
    pub role: String,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized(
                    "Missing Authorization header".into(),
                ))
            })?;

        let key = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid Authorization format. Expected: Bearer <api key>".into(),
            ))
        })?;

        let hash = hash_api_key(key);
        let api_key = ApiKeyRepo::find_active_by_hash(&state.pool, &hash)
            .await?
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized("Invalid or revoked API key".into()))
            })?;

        let user = UserRepo::find_by_id(&state.pool, api_key.user_id)
            .await?
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized("Key owner no longer exists".into()))
            })?;

        // Best-effort usage stamp; an error here must not fail the request.
        if let Err(e) = ApiKeyRepo::touch_last_used(&state.pool, api_key.id).await {
            tracing::warn!(key_id = api_key.id, error = %e, "Failed to stamp key usage");
        }

        Ok(AuthUser {
            user_id: user.id,
            role: user.role,
        })
    }
}
