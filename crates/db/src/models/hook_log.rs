//! Hook log model.
//!
//! Every event published on the hook bus is recorded here by the
//! persistence subscriber. `entity`/`entity_id` is a polymorphic soft
//! reference, so the table carries no foreign keys.

use encore_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// One persisted hook event.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct HookLogEntry {
    pub id: DbId,
    pub hook: String,
    pub entity: Option<String>,
    pub entity_id: Option<DbId>,
    pub actor_id: Option<DbId>,
    pub payload: serde_json::Value,
    pub created_at: Timestamp,
}

/// Optional filters for the hook log listing, combined with AND.
#[derive(Debug, Default)]
pub struct HookLogFilter {
    /// Exact hook name, e.g. `event.status.approved`.
    pub hook: Option<String>,
    pub entity: Option<String>,
    pub entity_id: Option<DbId>,
}
