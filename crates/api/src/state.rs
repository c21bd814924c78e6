use std::sync::Arc;

use encore_hooks::{HookBus, Notifier, StatusEngine, TaskRunner};
use sqlx::PgPool;

use crate::catalog::CatalogClient;
use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: PgPool,
    /// Server configuration (accessed by middleware and handlers).
    pub config: Arc<ServerConfig>,
    /// In-process hook bus for publishing domain hooks.
    pub bus: Arc<HookBus>,
    /// Status engine orchestrating transitions and payment bookkeeping.
    pub engine: StatusEngine,
    /// Scheduled task runner, also invoked by the manual-run endpoint.
    pub tasks: TaskRunner,
    /// Extension catalog client with its in-memory cache.
    pub catalog: Arc<CatalogClient>,
}

impl AppState {
    /// Assemble the full application state from a pool and config.
    ///
    /// Builds the hook bus, notifier, engine, and task runner wiring that
    /// both `main` and the integration tests share.
    pub fn new(pool: PgPool, config: Arc<ServerConfig>, notifier: Notifier) -> Self {
        let bus = Arc::new(HookBus::default());
        let engine = StatusEngine::new(pool.clone(), Arc::clone(&bus), notifier.clone());
        let tasks = TaskRunner::new(pool.clone(), engine.clone(), notifier);
        let catalog = Arc::new(CatalogClient::new(config.catalog_url.clone()));
        Self {
            pool,
            config,
            bus,
            engine,
            tasks,
            catalog,
        }
    }
}
