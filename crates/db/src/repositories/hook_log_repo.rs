//! Repository for the `hook_log` table.

use sqlx::PgPool;

use crate::models::hook_log::{HookLogEntry, HookLogFilter};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, hook, entity, entity_id, actor_id, payload, created_at";

/// Provides insert and list operations for the hook log.
pub struct HookLogRepo;

impl HookLogRepo {
    /// Record one published hook event.
    pub async fn insert(
        pool: &PgPool,
        hook: &str,
        entity: Option<&str>,
        entity_id: Option<i64>,
        actor_id: Option<i64>,
        payload: &serde_json::Value,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO hook_log (hook, entity, entity_id, actor_id, payload)
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(hook)
        .bind(entity)
        .bind(entity_id)
        .bind(actor_id)
        .bind(payload)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// List hook log entries with optional filters, newest first.
    pub async fn list(
        pool: &PgPool,
        filter: &HookLogFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<HookLogEntry>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM hook_log
             WHERE ($1::text IS NULL OR hook = $1)
               AND ($2::text IS NULL OR entity = $2)
               AND ($3::bigint IS NULL OR entity_id = $3)
             ORDER BY created_at DESC, id DESC
             LIMIT $4 OFFSET $5"
        );
        sqlx::query_as::<_, HookLogEntry>(&query)
            .bind(filter.hook.as_deref())
            .bind(filter.entity.as_deref())
            .bind(filter.entity_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Count entries for one hook name. Used by tests and diagnostics.
    pub async fn count_for_hook(pool: &PgPool, hook: &str) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM hook_log WHERE hook = $1")
            .bind(hook)
            .fetch_one(pool)
            .await
    }
}
