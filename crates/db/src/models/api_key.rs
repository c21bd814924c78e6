//! API key model and DTOs.

use encore_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Full API key row from the `api_keys` table.
///
/// Contains the key hash -- never serialize this to API responses
/// directly. Use [`ApiKeyResponse`] for external-facing output.
#[derive(Debug, Clone, FromRow)]
pub struct ApiKey {
    pub id: DbId,
    pub label: String,
    pub key_prefix: String,
    pub key_hash: String,
    pub user_id: DbId,
    pub revoked_at: Option<Timestamp>,
    pub last_used_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

impl ApiKey {
    pub fn is_revoked(&self) -> bool {
        self.revoked_at.is_some()
    }
}

/// Safe API key representation for listings (no hash).
#[derive(Debug, Clone, Serialize)]
pub struct ApiKeyResponse {
    pub id: DbId,
    pub label: String,
    pub key_prefix: String,
    pub user_id: DbId,
    pub revoked_at: Option<Timestamp>,
    pub last_used_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

impl From<ApiKey> for ApiKeyResponse {
    fn from(key: ApiKey) -> Self {
        Self {
            id: key.id,
            label: key.label,
            key_prefix: key.key_prefix,
            user_id: key.user_id,
            revoked_at: key.revoked_at,
            last_used_at: key.last_used_at,
            created_at: key.created_at,
        }
    }
}

/// Creation response carrying the plaintext key. Returned exactly once;
/// afterwards only the prefix identifies the key.
#[derive(Debug, Serialize)]
pub struct ApiKeyCreatedResponse {
    pub id: DbId,
    pub label: String,
    pub key_prefix: String,
    pub plaintext_key: String,
    pub user_id: DbId,
    pub created_at: Timestamp,
}

/// DTO for creating an API key.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateApiKey {
    #[validate(length(min = 1, max = 100))]
    pub label: String,
}
