//! Event entity model and DTOs.
//!
//! The event row is the central business record: booking details, the
//! price breakdown in integer cents, payment flags, playlist settings,
//! and the one-shot stamps the scheduled tasks rely on.

use chrono::{NaiveDate, NaiveTime};
use encore_core::pricing::{Cents, PriceBreakdown};
use encore_core::status::{EventStatus, StatusId};
use encore_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Full event row from the `events` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Event {
    pub id: DbId,
    pub status_id: StatusId,
    pub event_date: NaiveDate,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub setup_time: Option<NaiveTime>,
    pub client_id: DbId,
    pub primary_employee_id: Option<DbId>,
    pub venue_id: Option<DbId>,
    pub venue_name: Option<String>,
    pub venue_address: Option<String>,
    pub package_cost_cents: Cents,
    pub addons_cost_cents: Cents,
    pub travel_cost_cents: Cents,
    pub additional_cost_cents: Cents,
    pub discount_cents: Cents,
    /// Always derived server-side from the cost parts.
    pub price_total_cents: Cents,
    pub deposit_cents: Cents,
    pub deposit_paid: bool,
    pub balance_paid: bool,
    pub playlist_enabled: bool,
    /// 0 means unlimited.
    pub playlist_limit: i32,
    pub client_notes: Option<String>,
    pub employee_notes: Option<String>,
    pub admin_notes: Option<String>,
    pub balance_reminder_sent_at: Option<Timestamp>,
    pub playlist_notified_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Event {
    /// Typed view of `status_id`. `None` only if the row carries an id
    /// outside the seeded status table, which the FK prevents.
    pub fn status(&self) -> Option<EventStatus> {
        EventStatus::from_id(self.status_id)
    }

    pub fn breakdown(&self) -> PriceBreakdown {
        PriceBreakdown {
            package_cents: self.package_cost_cents,
            addons_cents: self.addons_cost_cents,
            travel_cents: self.travel_cost_cents,
            additional_cents: self.additional_cost_cents,
            discount_cents: self.discount_cents,
        }
    }

    /// Outstanding balance after the deposit, floored at zero.
    pub fn balance_cents(&self) -> Cents {
        encore_core::pricing::balance_due(self.price_total_cents, self.deposit_cents)
    }
}

/// DTO for creating a new event.
///
/// `price_total_cents` is intentionally absent: the total is derived from
/// the cost parts on insert and on every update.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateEvent {
    /// Defaults to `unattended` when omitted.
    pub status_id: Option<StatusId>,
    pub event_date: NaiveDate,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub setup_time: Option<NaiveTime>,
    pub client_id: DbId,
    pub primary_employee_id: Option<DbId>,
    pub venue_id: Option<DbId>,
    #[validate(length(max = 200))]
    pub venue_name: Option<String>,
    pub venue_address: Option<String>,
    #[serde(default)]
    pub package_cost_cents: Cents,
    #[serde(default)]
    pub addons_cost_cents: Cents,
    #[serde(default)]
    pub travel_cost_cents: Cents,
    #[serde(default)]
    pub additional_cost_cents: Cents,
    #[serde(default)]
    pub discount_cents: Cents,
    #[serde(default)]
    pub deposit_cents: Cents,
    pub playlist_enabled: Option<bool>,
    pub playlist_limit: Option<i32>,
    pub client_notes: Option<String>,
    pub employee_notes: Option<String>,
    pub admin_notes: Option<String>,
}

impl CreateEvent {
    pub fn breakdown(&self) -> PriceBreakdown {
        PriceBreakdown {
            package_cents: self.package_cost_cents,
            addons_cents: self.addons_cost_cents,
            travel_cents: self.travel_cost_cents,
            additional_cents: self.additional_cost_cents,
            discount_cents: self.discount_cents,
        }
    }
}

/// DTO for updating an existing event. All fields are optional.
///
/// Status and payment flags are deliberately absent: status moves through
/// the transition engine and payment flags through the payment endpoint.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateEvent {
    pub event_date: Option<NaiveDate>,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub setup_time: Option<NaiveTime>,
    pub primary_employee_id: Option<DbId>,
    pub venue_id: Option<DbId>,
    #[validate(length(max = 200))]
    pub venue_name: Option<String>,
    pub venue_address: Option<String>,
    pub package_cost_cents: Option<Cents>,
    pub addons_cost_cents: Option<Cents>,
    pub travel_cost_cents: Option<Cents>,
    pub additional_cost_cents: Option<Cents>,
    pub discount_cents: Option<Cents>,
    pub deposit_cents: Option<Cents>,
    pub playlist_enabled: Option<bool>,
    pub playlist_limit: Option<i32>,
    pub client_notes: Option<String>,
    pub employee_notes: Option<String>,
    pub admin_notes: Option<String>,
}

/// Optional filters for the event listing, combined with AND.
#[derive(Debug, Default)]
pub struct EventFilter {
    pub status_id: Option<StatusId>,
    pub client_id: Option<DbId>,
    pub employee_id: Option<DbId>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

/// Flattened row for the events CSV export: status, client, and venue
/// names resolved by join.
#[derive(Debug, Clone, FromRow)]
pub struct EventExportRow {
    pub id: DbId,
    pub event_date: NaiveDate,
    pub status: String,
    pub client_name: String,
    pub client_email: String,
    /// Linked venue name, inline venue name, or empty.
    pub venue: String,
    pub price_total_cents: Cents,
    pub deposit_cents: Cents,
    pub deposit_paid: bool,
    pub balance_paid: bool,
}

/// Additional staffing row from the `event_employees` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct EventEmployee {
    pub id: DbId,
    pub event_id: DbId,
    pub employee_id: DbId,
    pub role_label: String,
    pub wage_cents: Cents,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for assigning an employee to an event.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateEventEmployee {
    pub employee_id: DbId,
    #[validate(length(min = 1, max = 100))]
    pub role_label: String,
    #[serde(default)]
    pub wage_cents: Cents,
}
