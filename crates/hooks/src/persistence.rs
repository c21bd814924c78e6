//! Durable hook capture.
//!
//! [`HookPersistence`] subscribes to the [`HookBus`](crate::bus::HookBus)
//! broadcast channel and writes every received [`HookEvent`] to the
//! `hook_log` table. It runs as a long-lived background task and shuts
//! down when the bus sender is dropped.

use encore_db::repositories::HookLogRepo;
use sqlx::PgPool;
use tokio::sync::broadcast;

use crate::bus::HookEvent;

/// Background service that persists hook events to the database.
pub struct HookPersistence;

impl HookPersistence {
    /// Run the persistence loop.
    ///
    /// Persists every event received on `receiver`. The loop tolerates
    /// lag (skipped events are logged, not fatal) and exits when the
    /// channel closes, i.e. when the [`HookBus`](crate::bus::HookBus) is
    /// dropped at shutdown.
    pub async fn run(pool: PgPool, mut receiver: broadcast::Receiver<HookEvent>) {
        loop {
            match receiver.recv().await {
                Ok(event) => {
                    if let Err(e) = Self::persist(&pool, &event).await {
                        tracing::error!(
                            error = %e,
                            hook = %event.hook,
                            "Failed to persist hook event"
                        );
                    }
                }
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::warn!(
                        skipped = n,
                        "Hook persistence lagged, some events were not recorded"
                    );
                }
                Err(broadcast::error::RecvError::Closed) => {
                    tracing::info!("Hook bus closed, persistence shutting down");
                    break;
                }
            }
        }
    }

    /// Write a single event to the `hook_log` table.
    async fn persist(pool: &PgPool, event: &HookEvent) -> Result<(), sqlx::Error> {
        HookLogRepo::insert(
            pool,
            &event.hook,
            event.entity.as_deref(),
            event.entity_id,
            event.actor_id,
            &event.payload,
        )
        .await?;
        Ok(())
    }
}
