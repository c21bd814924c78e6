//! Repository for the `api_keys` table.
//!
//! Only key hashes are stored; authentication hashes the presented key
//! and looks it up here. Revocation is a timestamp, never a delete, so
//! the audit trail of which key existed survives.

use encore_core::types::DbId;
use sqlx::PgPool;

use crate::models::api_key::ApiKey;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, label, key_prefix, key_hash, user_id, revoked_at, last_used_at, created_at";

/// Provides CRUD operations for API keys.
pub struct ApiKeyRepo;

impl ApiKeyRepo {
    /// Store a freshly generated key, returning the created row.
    pub async fn create(
        pool: &PgPool,
        label: &str,
        key_prefix: &str,
        key_hash: &str,
        user_id: DbId,
    ) -> Result<ApiKey, sqlx::Error> {
        let query = format!(
            "INSERT INTO api_keys (label, key_prefix, key_hash, user_id)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ApiKey>(&query)
            .bind(label)
            .bind(key_prefix)
            .bind(key_hash)
            .bind(user_id)
            .fetch_one(pool)
            .await
    }

    /// Look up a non-revoked key by its hash. This is the auth hot path.
    pub async fn find_active_by_hash(
        pool: &PgPool,
        key_hash: &str,
    ) -> Result<Option<ApiKey>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM api_keys WHERE key_hash = $1 AND revoked_at IS NULL"
        );
        sqlx::query_as::<_, ApiKey>(&query)
            .bind(key_hash)
            .fetch_optional(pool)
            .await
    }

    /// Stamp `last_used_at`. Best-effort bookkeeping on the auth path.
    pub async fn touch_last_used(pool: &PgPool, id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE api_keys SET last_used_at = NOW(), updated_at = NOW() WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// List all keys, newest first, revoked ones included.
    pub async fn list(pool: &PgPool) -> Result<Vec<ApiKey>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM api_keys ORDER BY created_at DESC, id DESC");
        sqlx::query_as::<_, ApiKey>(&query).fetch_all(pool).await
    }

    /// Revoke a key. Returns `true` if the key existed and was live.
    pub async fn revoke(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE api_keys SET revoked_at = NOW(), updated_at = NOW()
             WHERE id = $1 AND revoked_at IS NULL",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Total number of keys ever created. Zero means first startup, which
    /// triggers the bootstrap admin key.
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM api_keys")
            .fetch_one(pool)
            .await
    }
}
