//! Playlist aggregation.
//!
//! Pure ordering and grouping over playlist rows the repository has already
//! fetched (category name and adder display name resolved by join). The
//! grouped form feeds the playlist endpoints, the CSV export, and the
//! employee notification email.

use serde::{Deserialize, Serialize};

use crate::types::{DbId, Timestamp};

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// One playlist row as the presentation layer sees it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlaylistRecord {
    pub id: DbId,
    pub event_id: DbId,
    pub song: String,
    pub artist: String,
    /// Display name of whoever added the entry (client or employee).
    pub added_by: String,
    /// Resolved category name; empty when the entry has no category.
    pub category: String,
    pub notes: Option<String>,
    pub created_at: Timestamp,
}

// ---------------------------------------------------------------------------
// Ordering
// ---------------------------------------------------------------------------

/// Field the playlist view is ordered by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaylistOrder {
    #[default]
    Category,
    Artist,
    Song,
    AddedBy,
    Date,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

fn sort_key(entry: &PlaylistRecord, order: PlaylistOrder) -> String {
    match order {
        PlaylistOrder::Category => entry.category.to_lowercase(),
        PlaylistOrder::Artist => entry.artist.to_lowercase(),
        PlaylistOrder::Song => entry.song.to_lowercase(),
        PlaylistOrder::AddedBy => entry.added_by.to_lowercase(),
        PlaylistOrder::Date => entry.created_at.to_rfc3339(),
    }
}

/// Flat sort for the non-category orderings. The sort is stable, so equal
/// keys keep insertion order under both directions.
pub fn sort_entries(
    mut entries: Vec<PlaylistRecord>,
    order: PlaylistOrder,
    direction: SortDirection,
) -> Vec<PlaylistRecord> {
    match direction {
        SortDirection::Asc => entries.sort_by(|a, b| sort_key(a, order).cmp(&sort_key(b, order))),
        SortDirection::Desc => entries.sort_by(|a, b| sort_key(b, order).cmp(&sort_key(a, order))),
    }
    entries
}

// ---------------------------------------------------------------------------
// Grouping
// ---------------------------------------------------------------------------

/// One category bucket of the grouped view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryGroup {
    /// Category name; empty for entries with no resolvable category.
    pub category: String,
    pub entries: Vec<PlaylistRecord>,
}

/// Group entries by category name.
///
/// Categories are sorted by name with `direction` applied; entries inside a
/// group keep insertion (creation) order. `known_categories` supplies the
/// configured category list so `include_empty` can surface categories
/// nobody has used yet.
pub fn group_by_category(
    entries: Vec<PlaylistRecord>,
    known_categories: &[String],
    direction: SortDirection,
    include_empty: bool,
) -> Vec<CategoryGroup> {
    let mut groups: Vec<CategoryGroup> = Vec::new();
    if include_empty {
        for name in known_categories {
            groups.push(CategoryGroup {
                category: name.clone(),
                entries: Vec::new(),
            });
        }
    }

    for entry in entries {
        match groups.iter_mut().find(|g| g.category == entry.category) {
            Some(group) => group.entries.push(entry),
            None => groups.push(CategoryGroup {
                category: entry.category.clone(),
                entries: vec![entry],
            }),
        }
    }

    if !include_empty {
        groups.retain(|g| !g.entries.is_empty());
    }

    match direction {
        SortDirection::Asc => {
            groups.sort_by(|a, b| a.category.to_lowercase().cmp(&b.category.to_lowercase()))
        }
        SortDirection::Desc => {
            groups.sort_by(|a, b| b.category.to_lowercase().cmp(&a.category.to_lowercase()))
        }
    }
    groups
}

// ---------------------------------------------------------------------------
// Text rendering
// ---------------------------------------------------------------------------

/// Plain-text rendering of the grouped playlist, used by the print view and
/// the employee notification email.
pub fn format_playlist_text(groups: &[CategoryGroup]) -> String {
    let mut out = String::new();
    for group in groups {
        if !out.is_empty() {
            out.push('\n');
        }
        if group.category.is_empty() {
            out.push_str("(no category)\n");
        } else {
            out.push_str(&group.category);
            out.push('\n');
        }
        if group.entries.is_empty() {
            out.push_str("  (none)\n");
        }
        for entry in &group.entries {
            out.push_str(&format!("  {} by {}", entry.song, entry.artist));
            if let Some(notes) = entry.notes.as_deref().filter(|n| !n.is_empty()) {
                out.push_str(&format!(" ({notes})"));
            }
            out.push_str(&format!(" [added by {}]\n", entry.added_by));
        }
    }
    out
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
