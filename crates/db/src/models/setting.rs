//! Settings model.
//!
//! Settings are string-keyed JSON values; the column types let a setting
//! hold a string, number, or boolean without schema churn. Well-known
//! keys are seeded by the migrations.

use encore_core::types::Timestamp;
use serde::Serialize;
use sqlx::FromRow;

/// Well-known setting keys the application itself reads.
pub mod keys {
    pub const COMPANY_NAME: &str = "company_name";
    pub const CURRENCY: &str = "currency";
    pub const DEFAULT_QUOTE_TEMPLATE: &str = "default_quote_template";
    pub const DEFAULT_PLAYLIST_LIMIT: &str = "default_playlist_limit";
    pub const BALANCE_REMINDER_DAYS: &str = "balance_reminder_days";
    pub const PLAYLIST_NOTIFY_DAYS: &str = "playlist_notify_days";
    pub const ENQUIRY_LAPSE_DAYS: &str = "enquiry_lapse_days";
    pub const JOURNAL_ON_SAVE: &str = "journal_on_save";
}

/// One settings row.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Setting {
    pub key: String,
    pub value: serde_json::Value,
    pub updated_at: Timestamp,
}
