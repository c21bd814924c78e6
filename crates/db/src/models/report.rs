//! Reporting aggregate rows.

use serde::Serialize;
use sqlx::FromRow;

/// Event count for one status.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct StatusCount {
    pub status_id: i16,
    pub name: String,
    pub count: i64,
}

/// Income/expense totals for one transaction type.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TransactionTypeTotals {
    pub type_id: i16,
    pub name: String,
    pub income_cents: i64,
    pub expense_cents: i64,
    pub count: i64,
}

/// Whole-period money summary assembled from the per-type rows.
#[derive(Debug, Clone, Serialize)]
pub struct TransactionReport {
    pub income_cents: i64,
    pub expense_cents: i64,
    pub net_cents: i64,
    pub types: Vec<TransactionTypeTotals>,
}

/// Playlist entry count for one category. An empty name is the
/// uncategorized bucket.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CategoryCount {
    pub category: String,
    pub entry_count: i64,
}
