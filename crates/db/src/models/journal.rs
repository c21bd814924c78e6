//! Journal entry model.
//!
//! The journal is an append-only audit trail per event. There is no
//! update or delete DTO on purpose.

use encore_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Visibility tags matching the `ck_journal_entries_visibility` constraint.
/// The presentation layer filters on these; they impose no ordering here.
pub mod visibility {
    pub const CLIENT: &str = "client";
    pub const EMPLOYEE: &str = "employee";
    pub const ADMIN: &str = "admin";

    pub fn is_valid(tag: &str) -> bool {
        matches!(tag, CLIENT | EMPLOYEE | ADMIN)
    }
}

/// Full journal row from the `journal_entries` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct JournalEntry {
    pub id: DbId,
    pub event_id: DbId,
    /// `None` means the system wrote the entry (engine or scheduled task).
    pub author_id: Option<DbId>,
    pub content: String,
    pub visibility: String,
    pub created_at: Timestamp,
}

/// Internal insert shape used by the engine, the tasks, and the API.
#[derive(Debug, Clone)]
pub struct NewJournalEntry {
    pub event_id: DbId,
    pub author_id: Option<DbId>,
    pub content: String,
    pub visibility: String,
}

impl NewJournalEntry {
    /// System-authored entry with the default admin visibility.
    pub fn system(event_id: DbId, content: impl Into<String>) -> Self {
        Self {
            event_id,
            author_id: None,
            content: content.into(),
            visibility: visibility::ADMIN.to_string(),
        }
    }
}

/// DTO for a manually posted journal note.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateJournalEntry {
    #[validate(length(min = 1, max = 10_000))]
    pub content: String,
    /// Defaults to `admin` when omitted.
    pub visibility: Option<String>,
}
