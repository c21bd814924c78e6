//! Event pricing arithmetic.
//!
//! All monetary amounts are integer cents. The stored `price_total_cents`
//! column is always derived server-side from the cost parts; client input
//! for the total is ignored.

use serde::{Deserialize, Serialize};

/// Monetary amount in integer cents.
pub type Cents = i64;

// ---------------------------------------------------------------------------
// Breakdown
// ---------------------------------------------------------------------------

/// Cost parts an event price is derived from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceBreakdown {
    pub package_cents: Cents,
    pub addons_cents: Cents,
    pub travel_cents: Cents,
    pub additional_cents: Cents,
    pub discount_cents: Cents,
}

impl PriceBreakdown {
    /// Derived total: sum of the cost parts minus the discount.
    pub fn total(&self) -> Cents {
        self.package_cents + self.addons_cents + self.travel_cents + self.additional_cents
            - self.discount_cents
    }
}

/// Outstanding balance after the deposit. Never negative; an over-sized
/// deposit leaves a zero balance rather than a credit.
pub fn balance_due(total: Cents, deposit: Cents) -> Cents {
    (total - deposit).max(0)
}

// ---------------------------------------------------------------------------
// Display
// ---------------------------------------------------------------------------

/// Symbol for an ISO currency code from the `currency` setting.
/// Unrecognized codes fall back to the code itself plus a space.
pub fn currency_symbol(code: &str) -> String {
    match code {
        "GBP" => "\u{a3}".to_string(),
        "USD" | "AUD" | "CAD" | "NZD" => "$".to_string(),
        "EUR" => "\u{20ac}".to_string(),
        "JPY" => "\u{a5}".to_string(),
        other => format!("{other} "),
    }
}

/// Render cents as a symbol-prefixed decimal amount, e.g. `£150.00`.
pub fn format_cents(cents: Cents, symbol: &str) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.unsigned_abs();
    format!("{sign}{symbol}{}.{:02}", abs / 100, abs % 100)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
