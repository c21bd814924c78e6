//! Transaction and transaction-type models.

use chrono::NaiveDate;
use encore_core::pricing::Cents;
use encore_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Direction tags matching the `ck_transactions_direction` constraint.
pub mod direction {
    pub const INCOME: &str = "income";
    pub const EXPENSE: &str = "expense";

    pub fn is_valid(tag: &str) -> bool {
        matches!(tag, INCOME | EXPENSE)
    }
}

/// Status tags matching the `ck_transactions_status` constraint.
/// A status change is plain bookkeeping; nothing cascades from it.
pub mod status {
    pub const COMPLETED: &str = "completed";
    pub const PENDING: &str = "pending";
    pub const CANCELLED: &str = "cancelled";
    pub const FAILED: &str = "failed";

    pub fn is_valid(tag: &str) -> bool {
        matches!(tag, COMPLETED | PENDING | CANCELLED | FAILED)
    }
}

/// Row from the `transaction_types` lookup table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TransactionType {
    pub id: i16,
    pub name: String,
}

/// Full transaction row from the `transactions` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Transaction {
    pub id: DbId,
    /// Kept nullable so deleting an event leaves its money trail intact.
    pub event_id: Option<DbId>,
    pub direction: String,
    pub status: String,
    pub type_id: i16,
    pub amount_cents: Cents,
    pub source: Option<String>,
    pub description: Option<String>,
    pub txn_date: NaiveDate,
    pub created_by: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for recording a transaction.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateTransaction {
    pub event_id: Option<DbId>,
    /// `income` or `expense`.
    pub direction: String,
    /// Defaults to `completed` when omitted.
    pub status: Option<String>,
    pub type_id: i16,
    #[validate(range(min = 0))]
    pub amount_cents: Cents,
    #[validate(length(max = 200))]
    pub source: Option<String>,
    pub description: Option<String>,
    /// Defaults to today when omitted.
    pub txn_date: Option<NaiveDate>,
}

/// DTO for updating a transaction. All fields are optional.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateTransaction {
    pub status: Option<String>,
    pub type_id: Option<i16>,
    #[validate(range(min = 0))]
    pub amount_cents: Option<Cents>,
    #[validate(length(max = 200))]
    pub source: Option<String>,
    pub description: Option<String>,
    pub txn_date: Option<NaiveDate>,
}

/// Optional filters for the transaction listing, combined with AND.
#[derive(Debug, Default)]
pub struct TransactionFilter {
    pub event_id: Option<DbId>,
    pub type_id: Option<i16>,
    pub direction: Option<String>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}
