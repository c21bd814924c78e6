//! Repository for the `journal_entries` table.
//!
//! Append-only by construction: there is no update or delete here, and
//! none should be added. The journal is the audit trail the workflow
//! engine and the scheduled tasks write their history into.

use encore_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::journal::{JournalEntry, NewJournalEntry};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, event_id, author_id, content, visibility, created_at";

/// Provides append and list operations for journal entries.
pub struct JournalRepo;

impl JournalRepo {
    /// Append one journal entry.
    pub async fn append(pool: &PgPool, entry: &NewJournalEntry) -> Result<JournalEntry, sqlx::Error> {
        let mut conn = pool.acquire().await?;
        Self::append_conn(&mut conn, entry).await
    }

    /// Append inside an existing transaction. Used by the workflow writes
    /// in `EventRepo` so the journal commits with the event change.
    pub async fn append_conn(
        conn: &mut PgConnection,
        entry: &NewJournalEntry,
    ) -> Result<JournalEntry, sqlx::Error> {
        let query = format!(
            "INSERT INTO journal_entries (event_id, author_id, content, visibility)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, JournalEntry>(&query)
            .bind(entry.event_id)
            .bind(entry.author_id)
            .bind(&entry.content)
            .bind(&entry.visibility)
            .fetch_one(conn)
            .await
    }

    /// List an event's journal in chronological order, optionally
    /// restricted to one visibility tag.
    pub async fn list_for_event(
        pool: &PgPool,
        event_id: DbId,
        visibility: Option<&str>,
    ) -> Result<Vec<JournalEntry>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM journal_entries
             WHERE event_id = $1 AND ($2::text IS NULL OR visibility = $2)
             ORDER BY created_at ASC, id ASC"
        );
        sqlx::query_as::<_, JournalEntry>(&query)
            .bind(event_id)
            .bind(visibility)
            .fetch_all(pool)
            .await
    }

    /// Number of journal entries recorded for an event.
    pub async fn count_for_event(pool: &PgPool, event_id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM journal_entries WHERE event_id = $1")
            .bind(event_id)
            .fetch_one(pool)
            .await
    }
}
