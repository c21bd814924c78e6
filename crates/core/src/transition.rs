//! Status transition planning.
//!
//! [`plan`] is the pure half of the status engine: given the current and
//! requested status plus the caller's [`TransitionOptions`], it decides
//! which client notice (if any) is due, whether the balance-reminder stamp
//! must be cleared, and what the journal entry should record. Executing the
//! plan (database write, email, hook publish) is `encore-hooks`' job.
//!
//! Any status may move to any other status. The source workflow never
//! enforced an allow-list and that permissiveness is deliberate here too;
//! `is_terminal` is reporting metadata, not a gate.

use crate::status::EventStatus;
use crate::types::DbId;

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

/// Caller-supplied knobs for a transition request.
#[derive(Debug, Clone)]
pub struct TransitionOptions {
    /// When false, no client email is sent for this transition.
    pub client_notices: bool,
    /// Template override for non-quote notices.
    pub email_template: Option<DbId>,
    /// Template override for the quotation notice.
    pub quote_template: Option<DbId>,
    /// Recorded in the journal when rejecting an enquiry.
    pub reject_reason: Option<String>,
}

impl Default for TransitionOptions {
    fn default() -> Self {
        Self {
            client_notices: true,
            email_template: None,
            quote_template: None,
            reject_reason: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Notices
// ---------------------------------------------------------------------------

/// Client-facing notice a transition can trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    /// Quotation sent when an event enters `enquiry`.
    Quote,
    /// Contract review request sent when an event enters `contract`.
    ContractReview,
    /// Booking confirmation sent when an event enters `approved`.
    BookingConfirmed,
    /// Cancellation notice sent when an event enters `cancelled`.
    Cancelled,
}

impl NoticeKind {
    /// Slug of the default template for this notice.
    pub fn template_slug(self) -> &'static str {
        match self {
            NoticeKind::Quote => "quote",
            NoticeKind::ContractReview => "contract-review",
            NoticeKind::BookingConfirmed => "booking-confirmed",
            NoticeKind::Cancelled => "event-cancelled",
        }
    }

    /// Journal suffix recorded after the notice was actually sent.
    pub fn sent_note(self) -> &'static str {
        match self {
            NoticeKind::Quote => " Quotation emailed to client.",
            NoticeKind::ContractReview => " Contract review notice emailed to client.",
            NoticeKind::BookingConfirmed => " Booking confirmation emailed to client.",
            NoticeKind::Cancelled => " Cancellation notice emailed to client.",
        }
    }
}

// ---------------------------------------------------------------------------
// Plan
// ---------------------------------------------------------------------------

/// Everything a status change must do besides writing the new status id.
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionPlan {
    pub from: EventStatus,
    pub to: EventStatus,
    /// Client notice due for this transition, already filtered by the
    /// caller's `client_notices` flag.
    pub notice: Option<NoticeKind>,
    /// Template id override for `notice`, when the caller supplied one.
    pub template_override: Option<DbId>,
    /// Clear `balance_reminder_sent_at` so the reminder task picks the
    /// event up again (set when completing an event with an unpaid balance).
    pub clear_balance_reminder: bool,
    /// Reason recorded in the journal when rejecting.
    pub reject_reason: Option<String>,
}

impl TransitionPlan {
    /// True when the plan is journal-only (no notice, no bookkeeping).
    pub fn is_side_effect_free(&self) -> bool {
        self.notice.is_none() && !self.clear_balance_reminder
    }
}

/// Decide what a transition from `from` to `to` must do.
///
/// A same-status request plans nothing: the engine records a plain journal
/// entry and stops. `balance_paid` is the event's current balance flag,
/// needed to decide balance-reminder eligibility when completing.
pub fn plan(
    from: EventStatus,
    to: EventStatus,
    balance_paid: bool,
    opts: &TransitionOptions,
) -> TransitionPlan {
    if from == to {
        return TransitionPlan {
            from,
            to,
            notice: None,
            template_override: None,
            clear_balance_reminder: false,
            reject_reason: None,
        };
    }

    let notice = if opts.client_notices {
        match to {
            EventStatus::Enquiry => Some(NoticeKind::Quote),
            EventStatus::Contract => Some(NoticeKind::ContractReview),
            EventStatus::Approved => Some(NoticeKind::BookingConfirmed),
            EventStatus::Cancelled => Some(NoticeKind::Cancelled),
            _ => None,
        }
    } else {
        None
    };

    let template_override = match notice {
        Some(NoticeKind::Quote) => opts.quote_template,
        Some(_) => opts.email_template,
        None => None,
    };

    TransitionPlan {
        from,
        to,
        notice,
        template_override,
        clear_balance_reminder: to == EventStatus::Completed && !balance_paid,
        reject_reason: if to == EventStatus::Rejected {
            opts.reject_reason.clone()
        } else {
            None
        },
    }
}

// ---------------------------------------------------------------------------
// Journal wording
// ---------------------------------------------------------------------------

/// Journal entry content for an executed transition.
///
/// `notice_sent` reflects what actually happened, not what was planned;
/// a failed email must not be journalled as sent.
pub fn journal_message(plan: &TransitionPlan, notice_sent: bool) -> String {
    let mut message = format!("Status changed from {} to {}.", plan.from, plan.to);
    if let Some(reason) = &plan.reject_reason {
        message.push_str(&format!(" Reason: {reason}"));
    }
    if notice_sent {
        if let Some(kind) = plan.notice {
            message.push_str(kind.sent_note());
        }
    }
    message
}

/// Journal entry content when the requested status equals the current one.
pub fn unchanged_message(status: EventStatus) -> String {
    format!("Event saved; status remains {status}.")
}

/// Journal entry content written once when an event is created.
pub fn created_message(status: EventStatus) -> String {
    format!("Event created with status {status}.")
}

/// Journal entry content for a plain detail edit (no status change).
pub fn updated_message() -> &'static str {
    "Event details updated."
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
