//! Encore hook bus and workflow orchestration.
//!
//! This crate wires the pure workflow rules from `encore-core` to the
//! database and the outside world:
//!
//! - [`HookBus`] — in-process publish/subscribe hub backed by
//!   `tokio::sync::broadcast`.
//! - [`HookEvent`] — the canonical hook envelope.
//! - [`HookPersistence`] — background service that durably writes every
//!   published hook to the `hook_log` table.
//! - [`Notifier`] — templated email notices over SMTP.
//! - [`StatusEngine`] — status transitions, payments and journalling.
//! - [`TaskRunner`] — periodic maintenance tasks.

pub mod bus;
pub mod engine;
pub mod mailer;
pub mod notices;
pub mod persistence;
pub mod tasks;

pub use bus::{hooks, HookBus, HookEvent};
pub use engine::{EngineError, StatusEngine, TransitionOutcome};
pub use mailer::{EmailConfig, Mailer};
pub use notices::Notifier;
pub use persistence::HookPersistence;
pub use tasks::{TaskError, TaskReport, TaskRunner};
