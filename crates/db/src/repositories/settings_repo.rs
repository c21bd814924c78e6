//! Repository for the `settings` table.
//!
//! Values are JSON so one table can hold strings, numbers, and booleans.
//! The typed getters fall back to a caller-supplied default when the key
//! is missing or holds the wrong JSON type, so a mangled setting can
//! never wedge the tasks that read it.

use sqlx::PgPool;

use crate::models::setting::Setting;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "key, value, updated_at";

/// Provides read and upsert operations for settings.
pub struct SettingsRepo;

impl SettingsRepo {
    /// Fetch one setting's raw JSON value.
    pub async fn get(pool: &PgPool, key: &str) -> Result<Option<serde_json::Value>, sqlx::Error> {
        sqlx::query_scalar("SELECT value FROM settings WHERE key = $1")
            .bind(key)
            .fetch_optional(pool)
            .await
    }

    /// Fetch a string setting, falling back to `default`.
    pub async fn get_string(
        pool: &PgPool,
        key: &str,
        default: &str,
    ) -> Result<String, sqlx::Error> {
        let value = Self::get(pool, key).await?;
        Ok(value
            .as_ref()
            .and_then(|v| v.as_str())
            .unwrap_or(default)
            .to_string())
    }

    /// Fetch an integer setting, falling back to `default`.
    pub async fn get_i64(pool: &PgPool, key: &str, default: i64) -> Result<i64, sqlx::Error> {
        let value = Self::get(pool, key).await?;
        Ok(value.as_ref().and_then(|v| v.as_i64()).unwrap_or(default))
    }

    /// Fetch a boolean setting, falling back to `default`.
    pub async fn get_bool(pool: &PgPool, key: &str, default: bool) -> Result<bool, sqlx::Error> {
        let value = Self::get(pool, key).await?;
        Ok(value.as_ref().and_then(|v| v.as_bool()).unwrap_or(default))
    }

    /// List every setting in key order.
    pub async fn all(pool: &PgPool) -> Result<Vec<Setting>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM settings ORDER BY key ASC");
        sqlx::query_as::<_, Setting>(&query).fetch_all(pool).await
    }

    /// Insert or replace one setting, returning the stored row.
    pub async fn upsert(
        pool: &PgPool,
        key: &str,
        value: &serde_json::Value,
    ) -> Result<Setting, sqlx::Error> {
        let query = format!(
            "INSERT INTO settings (key, value) VALUES ($1, $2)
             ON CONFLICT (key) DO UPDATE SET value = EXCLUDED.value, updated_at = NOW()
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Setting>(&query)
            .bind(key)
            .bind(value)
            .fetch_one(pool)
            .await
    }

    /// Upsert a whole key→value object atomically. Used by the settings
    /// import endpoint. Returns the number of keys written.
    pub async fn upsert_many(
        pool: &PgPool,
        values: &serde_json::Map<String, serde_json::Value>,
    ) -> Result<usize, sqlx::Error> {
        let mut tx = pool.begin().await?;
        for (key, value) in values {
            sqlx::query(
                "INSERT INTO settings (key, value) VALUES ($1, $2)
                 ON CONFLICT (key) DO UPDATE SET value = EXCLUDED.value, updated_at = NOW()",
            )
            .bind(key)
            .bind(value)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;
        Ok(values.len())
    }
}
