//! Playlist category and entry models.

use encore_core::playlist::PlaylistRecord;
use encore_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Row from the `playlist_categories` lookup table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PlaylistCategory {
    pub id: i16,
    pub name: String,
    pub sort_order: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Raw row from the `playlist_entries` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PlaylistEntry {
    pub id: DbId,
    pub event_id: DbId,
    pub song: String,
    pub artist: Option<String>,
    pub category_id: Option<i16>,
    pub notes: Option<String>,
    pub added_by_user_id: Option<DbId>,
    pub added_by_name: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Entry row with the category name and adder display name resolved by
/// LEFT JOIN. This is the shape the aggregator works on.
#[derive(Debug, Clone, FromRow)]
pub struct PlaylistEntryDetail {
    pub id: DbId,
    pub event_id: DbId,
    pub song: String,
    /// Empty string when the entry has no artist.
    pub artist: String,
    /// Empty string when the entry has no resolvable category.
    pub category: String,
    /// Free-text guest name, or the linked user's display name, or empty.
    pub added_by: String,
    pub notes: Option<String>,
    pub created_at: Timestamp,
}

impl From<PlaylistEntryDetail> for PlaylistRecord {
    fn from(row: PlaylistEntryDetail) -> Self {
        PlaylistRecord {
            id: row.id,
            event_id: row.event_id,
            song: row.song,
            artist: row.artist,
            added_by: row.added_by,
            category: row.category,
            notes: row.notes,
            created_at: row.created_at,
        }
    }
}

/// DTO for adding a playlist entry.
#[derive(Debug, Deserialize, Validate)]
pub struct CreatePlaylistEntry {
    #[validate(length(min = 1, max = 300))]
    pub song: String,
    #[validate(length(max = 300))]
    pub artist: Option<String>,
    pub category_id: Option<i16>,
    pub notes: Option<String>,
    pub added_by_user_id: Option<DbId>,
    /// Guest name for entries added on a client's behalf.
    #[validate(length(max = 200))]
    pub added_by_name: Option<String>,
}
