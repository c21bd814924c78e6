//! Event lifecycle statuses.
//!
//! Each variant's discriminant matches the 1-based seed order of the
//! `event_statuses` lookup table. The wire-level tag (`"enquiry"`,
//! `"approved"`, ...) is what the HTTP API accepts and returns; the label
//! is what journal entries and reports display.

use std::fmt;

/// Status ID type matching SMALLINT/SMALLSERIAL in the database.
pub type StatusId = i16;

/// Lifecycle status of an event.
///
/// Any status may transition to any other; "terminal" is descriptive
/// (reporting, task eligibility), not an enforcement rule.
#[repr(i16)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventStatus {
    /// New enquiry nobody has looked at yet.
    Unattended = 1,
    /// Enquiry being worked; a quote may have been sent.
    Enquiry = 2,
    /// Contract issued and awaiting client signature.
    Contract = 3,
    /// Booking confirmed.
    Approved = 4,
    /// Event has taken place.
    Completed = 5,
    /// Booking cancelled after confirmation.
    Cancelled = 6,
    /// Enquiry turned down by the business.
    Rejected = 7,
    /// Enquiry lapsed without converting.
    Failed = 8,
}

/// All statuses in seed order.
pub const ALL_STATUSES: &[EventStatus] = &[
    EventStatus::Unattended,
    EventStatus::Enquiry,
    EventStatus::Contract,
    EventStatus::Approved,
    EventStatus::Completed,
    EventStatus::Cancelled,
    EventStatus::Rejected,
    EventStatus::Failed,
];

impl EventStatus {
    /// Return the database status ID.
    pub fn id(self) -> StatusId {
        self as StatusId
    }

    /// The wire-level tag used in API payloads and hook names.
    pub fn tag(self) -> &'static str {
        match self {
            EventStatus::Unattended => "unattended",
            EventStatus::Enquiry => "enquiry",
            EventStatus::Contract => "contract",
            EventStatus::Approved => "approved",
            EventStatus::Completed => "completed",
            EventStatus::Cancelled => "cancelled",
            EventStatus::Rejected => "rejected",
            EventStatus::Failed => "failed",
        }
    }

    /// Human-readable label used in journal entries.
    pub fn label(self) -> &'static str {
        match self {
            EventStatus::Unattended => "Unattended",
            EventStatus::Enquiry => "Enquiry",
            EventStatus::Contract => "Contract",
            EventStatus::Approved => "Approved",
            EventStatus::Completed => "Completed",
            EventStatus::Cancelled => "Cancelled",
            EventStatus::Rejected => "Rejected",
            EventStatus::Failed => "Failed",
        }
    }

    /// Whether the status ends the event lifecycle.
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            EventStatus::Completed
                | EventStatus::Cancelled
                | EventStatus::Rejected
                | EventStatus::Failed
        )
    }

    /// Resolve a status from its database ID.
    pub fn from_id(id: StatusId) -> Option<Self> {
        ALL_STATUSES.iter().copied().find(|s| s.id() == id)
    }

    /// Resolve a status from its wire tag.
    pub fn from_tag(tag: &str) -> Option<Self> {
        ALL_STATUSES.iter().copied().find(|s| s.tag() == tag)
    }
}

impl From<EventStatus> for StatusId {
    fn from(value: EventStatus) -> Self {
        value as StatusId
    }
}

impl fmt::Display for EventStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_ids_match_seed_data() {
        assert_eq!(EventStatus::Unattended.id(), 1);
        assert_eq!(EventStatus::Enquiry.id(), 2);
        assert_eq!(EventStatus::Contract.id(), 3);
        assert_eq!(EventStatus::Approved.id(), 4);
        assert_eq!(EventStatus::Completed.id(), 5);
        assert_eq!(EventStatus::Cancelled.id(), 6);
        assert_eq!(EventStatus::Rejected.id(), 7);
        assert_eq!(EventStatus::Failed.id(), 8);
    }

    #[test]
    fn terminal_statuses() {
        assert!(!EventStatus::Unattended.is_terminal());
        assert!(!EventStatus::Enquiry.is_terminal());
        assert!(!EventStatus::Contract.is_terminal());
        assert!(!EventStatus::Approved.is_terminal());
        assert!(EventStatus::Completed.is_terminal());
        assert!(EventStatus::Cancelled.is_terminal());
        assert!(EventStatus::Rejected.is_terminal());
        assert!(EventStatus::Failed.is_terminal());
    }

    #[test]
    fn round_trip_through_id() {
        for status in ALL_STATUSES {
            assert_eq!(EventStatus::from_id(status.id()), Some(*status));
        }
    }

    #[test]
    fn round_trip_through_tag() {
        for status in ALL_STATUSES {
            assert_eq!(EventStatus::from_tag(status.tag()), Some(*status));
        }
    }

    #[test]
    fn unknown_id_and_tag_resolve_to_none() {
        assert_eq!(EventStatus::from_id(0), None);
        assert_eq!(EventStatus::from_id(99), None);
        assert_eq!(EventStatus::from_tag("archived"), None);
        assert_eq!(EventStatus::from_tag(""), None);
    }

    #[test]
    fn display_uses_label() {
        assert_eq!(EventStatus::Enquiry.to_string(), "Enquiry");
    }
}
