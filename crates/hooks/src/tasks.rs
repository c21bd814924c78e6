//! Periodic maintenance tasks.
//!
//! [`TaskRunner`] sweeps hourly as a background task and also exposes
//! [`run_once`](TaskRunner::run_once) so the admin endpoint and tests can
//! drive a single task deterministically. Each task is idempotent per
//! sweep: the transition tasks move events to a status the query then
//! excludes, and the email tasks stamp a column only after a send.

use std::time::Duration;

use chrono::Utc;
use encore_core::playlist::{self, PlaylistRecord, SortDirection};
use encore_core::status::EventStatus;
use encore_core::transition::TransitionOptions;
use encore_db::models::setting::keys;
use encore_db::repositories::{EventRepo, PlaylistRepo, SettingsRepo};
use serde::Serialize;
use sqlx::PgPool;
use tokio_util::sync::CancellationToken;

use crate::engine::StatusEngine;
use crate::notices::Notifier;

/// How often the runner sweeps all tasks.
const TASK_SWEEP_INTERVAL: Duration = Duration::from_secs(3600);

/// Task names accepted by [`TaskRunner::run_once`].
pub mod names {
    pub const COMPLETE_EVENTS: &str = "complete-events";
    pub const FAIL_ENQUIRIES: &str = "fail-enquiries";
    pub const BALANCE_REMINDER: &str = "balance-reminder";
    pub const PLAYLIST_NOTIFY: &str = "playlist-notify";

    /// All tasks in sweep order.
    pub const ALL: &[&str] = &[
        COMPLETE_EVENTS,
        FAIL_ENQUIRIES,
        BALANCE_REMINDER,
        PLAYLIST_NOTIFY,
    ];
}

/// Outcome of one task run.
#[derive(Debug, Clone, Serialize)]
pub struct TaskReport {
    pub task: &'static str,
    /// Events the task acted on in this run.
    pub processed: usize,
}

/// Failure modes of a task run.
#[derive(Debug, thiserror::Error)]
pub enum TaskError {
    #[error("unknown task '{0}'")]
    UnknownTask(String),

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

// ---------------------------------------------------------------------------
// TaskRunner
// ---------------------------------------------------------------------------

/// Background service running the periodic maintenance tasks.
#[derive(Clone)]
pub struct TaskRunner {
    pool: PgPool,
    engine: StatusEngine,
    notifier: Notifier,
}

impl TaskRunner {
    pub fn new(pool: PgPool, engine: StatusEngine, notifier: Notifier) -> Self {
        Self {
            pool,
            engine,
            notifier,
        }
    }

    /// Run the hourly sweep loop until the cancellation token fires.
    pub async fn run(&self, cancel: CancellationToken) {
        let mut interval = tokio::time::interval(TASK_SWEEP_INTERVAL);
        tracing::info!(
            sweep_interval_secs = TASK_SWEEP_INTERVAL.as_secs(),
            "Task runner started"
        );

        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    tracing::info!("Task runner shutting down");
                    break;
                }
                _ = interval.tick() => self.run_all().await,
            }
        }
    }

    /// Run every task once, logging failures without aborting the sweep.
    pub async fn run_all(&self) {
        for name in names::ALL {
            match self.run_once(name).await {
                Ok(report) if report.processed > 0 => {
                    tracing::info!(task = name, processed = report.processed, "Task completed");
                }
                Ok(_) => {}
                Err(e) => tracing::error!(task = name, error = %e, "Task failed"),
            }
        }
    }

    /// Run a single task by name.
    pub async fn run_once(&self, name: &str) -> Result<TaskReport, TaskError> {
        match name {
            names::COMPLETE_EVENTS => self.complete_events().await,
            names::FAIL_ENQUIRIES => self.fail_enquiries().await,
            names::BALANCE_REMINDER => self.balance_reminder().await,
            names::PLAYLIST_NOTIFY => self.playlist_notify().await,
            _ => Err(TaskError::UnknownTask(name.to_string())),
        }
    }

    // -----------------------------------------------------------------------
    // Tasks
    // -----------------------------------------------------------------------

    /// Move approved events whose date has passed to `completed`.
    async fn complete_events(&self) -> Result<TaskReport, TaskError> {
        let today = Utc::now().date_naive();
        let due = EventRepo::list_dated_before(&self.pool, EventStatus::Approved.id(), today).await?;

        let silent = TransitionOptions {
            client_notices: false,
            ..TransitionOptions::default()
        };
        let mut processed = 0;
        for event in due {
            match self
                .engine
                .transition(event.id, EventStatus::Completed, &silent, None)
                .await
            {
                Ok(_) => processed += 1,
                Err(e) => {
                    tracing::error!(event_id = event.id, error = %e, "Failed to complete event");
                }
            }
        }
        Ok(TaskReport {
            task: names::COMPLETE_EVENTS,
            processed,
        })
    }

    /// Move enquiries that never converted to `failed`.
    async fn fail_enquiries(&self) -> Result<TaskReport, TaskError> {
        let days = SettingsRepo::get_i64(&self.pool, keys::ENQUIRY_LAPSE_DAYS, 14).await?;
        let cutoff = Utc::now() - chrono::Duration::days(days);
        let stale =
            EventRepo::list_created_before(&self.pool, EventStatus::Enquiry.id(), cutoff).await?;

        let silent = TransitionOptions {
            client_notices: false,
            ..TransitionOptions::default()
        };
        let mut processed = 0;
        for event in stale {
            match self
                .engine
                .transition(event.id, EventStatus::Failed, &silent, None)
                .await
            {
                Ok(_) => processed += 1,
                Err(e) => {
                    tracing::error!(event_id = event.id, error = %e, "Failed to lapse enquiry");
                }
            }
        }
        Ok(TaskReport {
            task: names::FAIL_ENQUIRIES,
            processed,
        })
    }

    /// Remind clients of unpaid balances on completed events, once each.
    async fn balance_reminder(&self) -> Result<TaskReport, TaskError> {
        let days = SettingsRepo::get_i64(&self.pool, keys::BALANCE_REMINDER_DAYS, 3).await?;
        let cutoff = Utc::now().date_naive() - chrono::Duration::days(days);
        let due =
            EventRepo::list_balance_reminder_due(&self.pool, EventStatus::Completed.id(), cutoff)
                .await?;

        let mut processed = 0;
        for event in due {
            // Stamp only after a send so an outage retries next sweep.
            if self.notifier.send_balance_reminder(&event).await {
                EventRepo::stamp_balance_reminder(&self.pool, event.id).await?;
                processed += 1;
            }
        }
        Ok(TaskReport {
            task: names::BALANCE_REMINDER,
            processed,
        })
    }

    /// Send upcoming events' playlists to their primary employee, once each.
    async fn playlist_notify(&self) -> Result<TaskReport, TaskError> {
        let days = SettingsRepo::get_i64(&self.pool, keys::PLAYLIST_NOTIFY_DAYS, 7).await?;
        let today = Utc::now().date_naive();
        let until = today + chrono::Duration::days(days);
        let due = EventRepo::list_playlist_notify_due(
            &self.pool,
            EventStatus::Approved.id(),
            today,
            until,
        )
        .await?;

        let mut processed = 0;
        for event in due {
            let records: Vec<PlaylistRecord> = PlaylistRepo::list_for_event(&self.pool, event.id)
                .await?
                .into_iter()
                .map(Into::into)
                .collect();
            let groups = playlist::group_by_category(records, &[], SortDirection::Asc, false);
            let text = playlist::format_playlist_text(&groups);

            if self.notifier.send_playlist_notification(&event, &text).await {
                EventRepo::stamp_playlist_notified(&self.pool, event.id).await?;
                processed += 1;
            }
        }
        Ok(TaskReport {
            task: names::PLAYLIST_NOTIFY,
            processed,
        })
    }
}
