//! Repository for the `playlist_entries` and `playlist_categories` tables.
//!
//! Entries come back in insertion (creation) order; all further ordering
//! and grouping is pure logic in `encore_core::playlist`.

use encore_core::types::DbId;
use sqlx::PgPool;

use crate::models::playlist::{
    CreatePlaylistEntry, PlaylistCategory, PlaylistEntry, PlaylistEntryDetail,
};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, event_id, song, artist, category_id, notes, \
                       added_by_user_id, added_by_name, created_at, updated_at";

/// Detail projection with the category and adder names resolved.
const DETAIL_COLUMNS: &str = "pe.id, pe.event_id, pe.song, \
     COALESCE(pe.artist, '') AS artist, \
     COALESCE(pc.name, '') AS category, \
     COALESCE(pe.added_by_name, u.display_name, '') AS added_by, \
     pe.notes, pe.created_at";

/// Provides CRUD operations for playlist entries and categories.
pub struct PlaylistRepo;

impl PlaylistRepo {
    /// Add an entry to an event's playlist, returning the created row.
    pub async fn create(
        pool: &PgPool,
        event_id: DbId,
        input: &CreatePlaylistEntry,
    ) -> Result<PlaylistEntry, sqlx::Error> {
        let query = format!(
            "INSERT INTO playlist_entries
                (event_id, song, artist, category_id, notes, added_by_user_id, added_by_name)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PlaylistEntry>(&query)
            .bind(event_id)
            .bind(&input.song)
            .bind(&input.artist)
            .bind(input.category_id)
            .bind(&input.notes)
            .bind(input.added_by_user_id)
            .bind(&input.added_by_name)
            .fetch_one(pool)
            .await
    }

    /// Find one entry by id, scoped to its event.
    pub async fn find_entry(
        pool: &PgPool,
        event_id: DbId,
        entry_id: DbId,
    ) -> Result<Option<PlaylistEntry>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM playlist_entries WHERE id = $1 AND event_id = $2"
        );
        sqlx::query_as::<_, PlaylistEntry>(&query)
            .bind(entry_id)
            .bind(event_id)
            .fetch_optional(pool)
            .await
    }

    /// List an event's entries with names resolved, in insertion order.
    ///
    /// A nonexistent event id simply yields an empty list.
    pub async fn list_for_event(
        pool: &PgPool,
        event_id: DbId,
    ) -> Result<Vec<PlaylistEntryDetail>, sqlx::Error> {
        let query = format!(
            "SELECT {DETAIL_COLUMNS}
             FROM playlist_entries pe
             LEFT JOIN playlist_categories pc ON pc.id = pe.category_id
             LEFT JOIN users u ON u.id = pe.added_by_user_id
             WHERE pe.event_id = $1
             ORDER BY pe.created_at ASC, pe.id ASC"
        );
        sqlx::query_as::<_, PlaylistEntryDetail>(&query)
            .bind(event_id)
            .fetch_all(pool)
            .await
    }

    /// Number of entries on an event's playlist, for the limit check.
    pub async fn count_for_event(pool: &PgPool, event_id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM playlist_entries WHERE event_id = $1")
            .bind(event_id)
            .fetch_one(pool)
            .await
    }

    /// Remove one entry. Returns `true` if a row was removed.
    pub async fn delete(
        pool: &PgPool,
        event_id: DbId,
        entry_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("DELETE FROM playlist_entries WHERE id = $1 AND event_id = $2")
                .bind(entry_id)
                .bind(event_id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Remove every entry on an event's playlist. Returns the removed count.
    pub async fn delete_all_for_event(pool: &PgPool, event_id: DbId) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM playlist_entries WHERE event_id = $1")
            .bind(event_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }

    // -----------------------------------------------------------------------
    // Categories
    // -----------------------------------------------------------------------

    /// List the configured playlist categories in their display order.
    pub async fn list_categories(pool: &PgPool) -> Result<Vec<PlaylistCategory>, sqlx::Error> {
        sqlx::query_as::<_, PlaylistCategory>(
            "SELECT id, name, sort_order, created_at, updated_at
             FROM playlist_categories
             ORDER BY sort_order ASC, id ASC",
        )
        .fetch_all(pool)
        .await
    }

    /// Add a playlist category. Names are unique.
    pub async fn create_category(
        pool: &PgPool,
        name: &str,
        sort_order: i32,
    ) -> Result<PlaylistCategory, sqlx::Error> {
        sqlx::query_as::<_, PlaylistCategory>(
            "INSERT INTO playlist_categories (name, sort_order)
             VALUES ($1, $2)
             RETURNING id, name, sort_order, created_at, updated_at",
        )
        .bind(name)
        .bind(sort_order)
        .fetch_one(pool)
        .await
    }
}
