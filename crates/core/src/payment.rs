//! Deposit and balance payment planning.
//!
//! The two payment flags on an event are one-shot: marking an amount paid
//! records an income transaction, a journal line, and a hook exactly once.
//! Repeating the request or clearing the flag must never produce another
//! transaction. [`plan`] encodes that guard so the engine only has to
//! execute what the plan says.

use serde::Deserialize;

use crate::types::DbId;

// ---------------------------------------------------------------------------
// Request
// ---------------------------------------------------------------------------

/// Requested payment flag changes. `None` leaves a flag untouched.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct PaymentUpdate {
    #[serde(default)]
    pub deposit_paid: Option<bool>,
    #[serde(default)]
    pub balance_paid: Option<bool>,
}

// ---------------------------------------------------------------------------
// Fields
// ---------------------------------------------------------------------------

/// Which of the two payment amounts a plan step refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentField {
    Deposit,
    Balance,
}

impl PaymentField {
    pub fn label(self) -> &'static str {
        match self {
            PaymentField::Deposit => "Deposit",
            PaymentField::Balance => "Balance",
        }
    }

    /// Seeded `transaction_types` row the income transaction is filed under.
    pub fn transaction_type_id(self) -> i16 {
        match self {
            PaymentField::Deposit => 1,
            PaymentField::Balance => 2,
        }
    }

    pub fn hook_name(self) -> &'static str {
        match self {
            PaymentField::Deposit => "event.payment.deposit",
            PaymentField::Balance => "event.payment.balance",
        }
    }
}

// ---------------------------------------------------------------------------
// Plan
// ---------------------------------------------------------------------------

/// What a single flag change requires of the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentAction {
    /// Flag goes true: set it, record the transaction, journal, publish.
    MarkPaid,
    /// Flag goes false: set it and journal. No transaction is reversed.
    ClearPaid,
    /// No-op: not requested, or requested value equals the current flag.
    None,
}

/// Planned actions for both flags of one event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaymentPlan {
    pub deposit: PaymentAction,
    pub balance: PaymentAction,
}

impl PaymentPlan {
    pub fn is_noop(&self) -> bool {
        self.deposit == PaymentAction::None && self.balance == PaymentAction::None
    }
}

fn plan_field(currently_paid: bool, requested: Option<bool>) -> PaymentAction {
    match requested {
        Some(true) if !currently_paid => PaymentAction::MarkPaid,
        Some(false) if currently_paid => PaymentAction::ClearPaid,
        _ => PaymentAction::None,
    }
}

/// Plan flag changes against the event's current `deposit_paid` and
/// `balance_paid` values.
pub fn plan(deposit_paid: bool, balance_paid: bool, update: PaymentUpdate) -> PaymentPlan {
    PaymentPlan {
        deposit: plan_field(deposit_paid, update.deposit_paid),
        balance: plan_field(balance_paid, update.balance_paid),
    }
}

// ---------------------------------------------------------------------------
// Journal wording
// ---------------------------------------------------------------------------

pub fn paid_message(field: PaymentField, formatted_amount: &str) -> String {
    format!("{} of {} marked as paid.", field.label(), formatted_amount)
}

pub fn cleared_message(field: PaymentField) -> String {
    format!("{} payment flag cleared.", field.label())
}

/// Description on the income transaction row itself.
pub fn transaction_description(field: PaymentField, event_id: DbId) -> String {
    format!("{} payment for event {}.", field.label(), event_id)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn update(deposit: Option<bool>, balance: Option<bool>) -> PaymentUpdate {
        PaymentUpdate {
            deposit_paid: deposit,
            balance_paid: balance,
        }
    }

    // -- One-shot guard ----------------------------------------------------

    #[test]
    fn unpaid_to_paid_marks() {
        let p = plan(false, false, update(Some(true), None));
        assert_eq!(p.deposit, PaymentAction::MarkPaid);
        assert_eq!(p.balance, PaymentAction::None);
    }

    #[test]
    fn repeated_mark_is_noop() {
        let p = plan(true, false, update(Some(true), None));
        assert_eq!(p.deposit, PaymentAction::None);
        assert!(p.is_noop());
    }

    #[test]
    fn paid_to_cleared_plans_no_transaction() {
        let p = plan(true, true, update(None, Some(false)));
        assert_eq!(p.balance, PaymentAction::ClearPaid);
        assert_eq!(p.deposit, PaymentAction::None);
    }

    #[test]
    fn clearing_an_unpaid_flag_is_noop() {
        let p = plan(false, false, update(Some(false), Some(false)));
        assert!(p.is_noop());
    }

    #[test]
    fn omitted_flags_stay_untouched() {
        let p = plan(true, false, update(None, None));
        assert!(p.is_noop());
    }

    #[test]
    fn both_flags_plan_independently() {
        let p = plan(true, false, update(Some(false), Some(true)));
        assert_eq!(p.deposit, PaymentAction::ClearPaid);
        assert_eq!(p.balance, PaymentAction::MarkPaid);
    }

    // -- Bookkeeping metadata ----------------------------------------------

    #[test]
    fn fields_map_to_seeded_transaction_types() {
        assert_eq!(PaymentField::Deposit.transaction_type_id(), 1);
        assert_eq!(PaymentField::Balance.transaction_type_id(), 2);
    }

    #[test]
    fn hook_names() {
        assert_eq!(PaymentField::Deposit.hook_name(), "event.payment.deposit");
        assert_eq!(PaymentField::Balance.hook_name(), "event.payment.balance");
    }

    #[test]
    fn journal_wording() {
        assert_eq!(
            paid_message(PaymentField::Deposit, "\u{a3}150.00"),
            "Deposit of \u{a3}150.00 marked as paid."
        );
        assert_eq!(
            cleared_message(PaymentField::Balance),
            "Balance payment flag cleared."
        );
        assert_eq!(
            transaction_description(PaymentField::Balance, 9),
            "Balance payment for event 9."
        );
    }
}
