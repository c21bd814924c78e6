//! Status transition and payment execution.
//!
//! [`StatusEngine`] turns the pure plans from `encore_core::transition`
//! and `encore_core::payment` into effects: the client notice goes out
//! first (best-effort), then the status or flag change and its journal
//! entry are persisted in one database transaction, then the hook is
//! published. Journalling after the send attempt is what lets the entry
//! record whether the email actually went out.

use std::sync::Arc;

use encore_core::payment::{self, PaymentAction, PaymentField, PaymentUpdate};
use encore_core::pricing::{currency_symbol, format_cents, Cents};
use encore_core::status::{EventStatus, StatusId};
use encore_core::transition::{self, TransitionOptions};
use encore_core::types::DbId;
use encore_db::models::event::Event;
use encore_db::models::journal::{visibility, NewJournalEntry};
use encore_db::models::setting::keys;
use encore_db::models::transaction::{direction, CreateTransaction};
use encore_db::repositories::{EventRepo, JournalRepo, SettingsRepo};
use sqlx::PgPool;

use crate::bus::{hooks, HookBus, HookEvent};
use crate::notices::Notifier;

// ---------------------------------------------------------------------------
// Errors and outcomes
// ---------------------------------------------------------------------------

/// Failure modes of the engine operations.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("event {id} not found")]
    EventNotFound { id: DbId },

    /// The row carries a status id outside the seeded table. The foreign
    /// key makes this unreachable short of a corrupted seed.
    #[error("event {id} carries unknown status id {status_id}")]
    CorruptStatus { id: DbId, status_id: StatusId },

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

/// Result of a transition request.
#[derive(Debug)]
pub enum TransitionOutcome {
    /// Requested status equals the current one; a plain journal entry was
    /// appended and nothing else happened.
    Unchanged(Event),

    /// The status changed. `notice_sent` records whether a client email
    /// actually went out for this transition.
    Transitioned {
        event: Event,
        from: EventStatus,
        to: EventStatus,
        notice_sent: bool,
    },
}

impl TransitionOutcome {
    pub fn event(&self) -> &Event {
        match self {
            TransitionOutcome::Unchanged(event) => event,
            TransitionOutcome::Transitioned { event, .. } => event,
        }
    }

    pub fn into_event(self) -> Event {
        match self {
            TransitionOutcome::Unchanged(event) => event,
            TransitionOutcome::Transitioned { event, .. } => event,
        }
    }
}

// ---------------------------------------------------------------------------
// StatusEngine
// ---------------------------------------------------------------------------

/// Executes status transitions and payment flag changes for events.
#[derive(Clone)]
pub struct StatusEngine {
    pool: PgPool,
    bus: Arc<HookBus>,
    notifier: Notifier,
}

impl StatusEngine {
    pub fn new(pool: PgPool, bus: Arc<HookBus>, notifier: Notifier) -> Self {
        Self {
            pool,
            bus,
            notifier,
        }
    }

    /// Journal and announce a freshly created event.
    pub async fn record_created(
        &self,
        event: &Event,
        actor: Option<DbId>,
    ) -> Result<(), EngineError> {
        let status = self.status_of(event)?;
        JournalRepo::append(
            &self.pool,
            &NewJournalEntry {
                event_id: event.id,
                author_id: actor,
                content: transition::created_message(status),
                visibility: visibility::ADMIN.to_string(),
            },
        )
        .await?;

        self.bus.publish(
            HookEvent::new(hooks::EVENT_CREATED)
                .with_entity("event", event.id)
                .with_actor(actor)
                .with_payload(serde_json::json!({
                    "status": status.tag(),
                    "event_date": event.event_date,
                })),
        );
        Ok(())
    }

    /// Move an event to `new_status`.
    ///
    /// A same-status request appends a journal entry and returns
    /// [`TransitionOutcome::Unchanged`] without any notice or hook.
    pub async fn transition(
        &self,
        event_id: DbId,
        new_status: EventStatus,
        opts: &TransitionOptions,
        actor: Option<DbId>,
    ) -> Result<TransitionOutcome, EngineError> {
        let event = self.load(event_id).await?;
        let from = self.status_of(&event)?;

        if from == new_status {
            JournalRepo::append(
                &self.pool,
                &NewJournalEntry {
                    event_id,
                    author_id: actor,
                    content: transition::unchanged_message(from),
                    visibility: visibility::ADMIN.to_string(),
                },
            )
            .await?;
            return Ok(TransitionOutcome::Unchanged(event));
        }

        let plan = transition::plan(from, new_status, event.balance_paid, opts);

        let notice_sent = match plan.notice {
            Some(kind) => {
                self.notifier
                    .send_client_notice(&event, kind, plan.template_override)
                    .await
            }
            None => false,
        };

        let journal = NewJournalEntry {
            event_id,
            author_id: actor,
            content: transition::journal_message(&plan, notice_sent),
            visibility: visibility::ADMIN.to_string(),
        };
        let updated = EventRepo::apply_transition(
            &self.pool,
            event_id,
            new_status.id(),
            plan.clear_balance_reminder,
            &journal,
        )
        .await?;

        tracing::info!(
            event_id,
            from = from.tag(),
            to = new_status.tag(),
            notice_sent,
            "Event status changed"
        );

        self.bus.publish(
            HookEvent::new(hooks::event_status(new_status))
                .with_entity("event", event_id)
                .with_actor(actor)
                .with_payload(serde_json::json!({
                    "from": from.tag(),
                    "to": new_status.tag(),
                    "notice_sent": notice_sent,
                })),
        );

        Ok(TransitionOutcome::Transitioned {
            event: updated,
            from,
            to: new_status,
            notice_sent,
        })
    }

    /// Apply deposit/balance flag changes with one-shot bookkeeping.
    ///
    /// Marking a flag paid records an income transaction and a journal
    /// entry and publishes the payment hook, exactly once; repeating the
    /// request is a no-op. Clearing a flag journals the change without
    /// reversing any transaction.
    pub async fn apply_payment(
        &self,
        event_id: DbId,
        update: PaymentUpdate,
        actor: Option<DbId>,
    ) -> Result<Event, EngineError> {
        let event = self.load(event_id).await?;
        let plan = payment::plan(event.deposit_paid, event.balance_paid, update);
        if plan.is_noop() {
            return Ok(event);
        }

        let currency = SettingsRepo::get_string(&self.pool, keys::CURRENCY, "GBP").await?;
        let symbol = currency_symbol(&currency);

        let mut transactions: Vec<CreateTransaction> = Vec::new();
        let mut journals: Vec<NewJournalEntry> = Vec::new();
        let mut marked: Vec<(PaymentField, Cents)> = Vec::new();
        let mut set_deposit = None;
        let mut set_balance = None;

        for (field, action) in [
            (PaymentField::Deposit, plan.deposit),
            (PaymentField::Balance, plan.balance),
        ] {
            let flag = match field {
                PaymentField::Deposit => &mut set_deposit,
                PaymentField::Balance => &mut set_balance,
            };
            match action {
                PaymentAction::MarkPaid => {
                    let amount = match field {
                        PaymentField::Deposit => event.deposit_cents,
                        PaymentField::Balance => event.balance_cents(),
                    };
                    transactions.push(CreateTransaction {
                        event_id: Some(event_id),
                        direction: direction::INCOME.to_string(),
                        status: None,
                        type_id: field.transaction_type_id(),
                        amount_cents: amount,
                        source: None,
                        description: Some(payment::transaction_description(field, event_id)),
                        txn_date: None,
                    });
                    journals.push(NewJournalEntry {
                        event_id,
                        author_id: actor,
                        content: payment::paid_message(field, &format_cents(amount, &symbol)),
                        visibility: visibility::ADMIN.to_string(),
                    });
                    marked.push((field, amount));
                    *flag = Some(true);
                }
                PaymentAction::ClearPaid => {
                    journals.push(NewJournalEntry {
                        event_id,
                        author_id: actor,
                        content: payment::cleared_message(field),
                        visibility: visibility::ADMIN.to_string(),
                    });
                    *flag = Some(false);
                }
                PaymentAction::None => {}
            }
        }

        let updated = EventRepo::apply_payment(
            &self.pool,
            event_id,
            set_deposit,
            set_balance,
            &transactions,
            &journals,
            actor,
        )
        .await?;

        for (field, amount) in marked {
            tracing::info!(event_id, field = field.label(), amount_cents = amount, "Payment recorded");
            self.bus.publish(
                HookEvent::new(field.hook_name())
                    .with_entity("event", event_id)
                    .with_actor(actor)
                    .with_payload(serde_json::json!({"amount_cents": amount})),
            );
        }

        Ok(updated)
    }

    // -----------------------------------------------------------------------
    // Internals
    // -----------------------------------------------------------------------

    async fn load(&self, event_id: DbId) -> Result<Event, EngineError> {
        EventRepo::find_by_id(&self.pool, event_id)
            .await?
            .ok_or(EngineError::EventNotFound { id: event_id })
    }

    fn status_of(&self, event: &Event) -> Result<EventStatus, EngineError> {
        event.status().ok_or(EngineError::CorruptStatus {
            id: event.id,
            status_id: event.status_id,
        })
    }
}
