//! In-process hook bus backed by a `tokio::sync::broadcast` channel.
//!
//! [`HookBus`] is the publish/subscribe hub the rest of the system fires
//! domain hooks through. It is shared as `Arc<HookBus>` across the
//! application; anything can subscribe, and publishing never blocks on or
//! fails because of subscribers.

use chrono::{DateTime, Utc};
use encore_core::status::EventStatus;
use encore_core::types::DbId;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

// ---------------------------------------------------------------------------
// Hook names
// ---------------------------------------------------------------------------

/// Well-known hook names.
///
/// Status transitions use a per-status name built by
/// [`event_status`]; everything else is a fixed constant.
pub mod hooks {
    use super::EventStatus;

    pub const EVENT_CREATED: &str = "event.created";
    pub const EVENT_PAYMENT_DEPOSIT: &str = "event.payment.deposit";
    pub const EVENT_PAYMENT_BALANCE: &str = "event.payment.balance";
    pub const PLAYLIST_ENTRY_ADDED: &str = "playlist.entry.added";
    pub const PLAYLIST_ENTRY_REMOVED: &str = "playlist.entry.removed";
    pub const TRANSACTION_RECORDED: &str = "transaction.recorded";
    pub const SETTINGS_UPDATED: &str = "settings.updated";

    /// Hook name for a transition into `status`, e.g. `event.status.approved`.
    pub fn event_status(status: EventStatus) -> String {
        format!("event.status.{}", status.tag())
    }
}

// ---------------------------------------------------------------------------
// HookEvent
// ---------------------------------------------------------------------------

/// A domain hook fired somewhere in the system.
///
/// Constructed via [`HookEvent::new`] and enriched with the builder methods
/// [`with_entity`](HookEvent::with_entity), [`with_actor`](HookEvent::with_actor),
/// and [`with_payload`](HookEvent::with_payload).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HookEvent {
    /// Dot-separated hook name, e.g. `"event.status.approved"`.
    pub hook: String,

    /// Entity kind the hook concerns (e.g. `"event"`, `"transaction"`).
    pub entity: Option<String>,

    /// Database id of that entity.
    pub entity_id: Option<DbId>,

    /// User that triggered the hook, if any. `None` for system actions.
    pub actor_id: Option<DbId>,

    /// Free-form JSON payload carrying hook-specific data.
    pub payload: serde_json::Value,

    /// When the hook was fired (UTC).
    pub timestamp: DateTime<Utc>,
}

impl HookEvent {
    /// Create a new hook event carrying only its name.
    pub fn new(hook: impl Into<String>) -> Self {
        Self {
            hook: hook.into(),
            entity: None,
            entity_id: None,
            actor_id: None,
            payload: serde_json::Value::Object(Default::default()),
            timestamp: Utc::now(),
        }
    }

    /// Attach the entity the hook concerns.
    pub fn with_entity(mut self, entity: impl Into<String>, entity_id: DbId) -> Self {
        self.entity = Some(entity.into());
        self.entity_id = Some(entity_id);
        self
    }

    /// Attach the acting user. `None` leaves the event system-attributed.
    pub fn with_actor(mut self, actor_id: Option<DbId>) -> Self {
        self.actor_id = actor_id;
        self
    }

    /// Set the JSON payload.
    pub fn with_payload(mut self, payload: serde_json::Value) -> Self {
        self.payload = payload;
        self
    }
}

// ---------------------------------------------------------------------------
// HookBus
// ---------------------------------------------------------------------------

/// Default buffer capacity for the broadcast channel.
const DEFAULT_CAPACITY: usize = 1024;

/// In-process fan-out hook bus.
///
/// Wraps a [`broadcast::Sender`] so any number of subscribers can
/// independently receive every published [`HookEvent`].
pub struct HookBus {
    sender: broadcast::Sender<HookEvent>,
}

impl HookBus {
    /// Create a bus with a specific channel capacity.
    ///
    /// When the buffer is full the oldest un-consumed events are dropped
    /// and slow receivers observe a `RecvError::Lagged`.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish an event to all current subscribers.
    ///
    /// With zero subscribers the event is silently dropped; the
    /// persistence subscriber (when running) is what makes hooks durable.
    pub fn publish(&self, event: HookEvent) {
        // Ignore the SendError, it only means there are zero receivers.
        let _ = self.sender.send(event);
    }

    /// Subscribe to all events published on this bus.
    pub fn subscribe(&self) -> broadcast::Receiver<HookEvent> {
        self.sender.subscribe()
    }
}

impl Default for HookBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
