//! Route definitions for the `/admin` resource.
//!
//! API key management, scheduled task control and the hook audit log.
//! Every handler behind this router requires the `admin` role.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{api_keys, hook_log, tasks};
use crate::state::AppState;

/// Routes mounted at `/admin`.
///
/// ```text
/// GET    /api-keys           -> list_api_keys
/// POST   /api-keys           -> create_api_key
/// DELETE /api-keys/{id}      -> revoke_api_key
/// GET    /tasks              -> list_tasks
/// POST   /tasks/{name}/run   -> run_task
/// GET    /hook-log           -> list_hook_log
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/api-keys",
            get(api_keys::list_api_keys).post(api_keys::create_api_key),
        )
        .route(
            "/api-keys/{id}",
            axum::routing::delete(api_keys::revoke_api_key),
        )
        .route("/tasks", get(tasks::list_tasks))
        .route("/tasks/{name}/run", post(tasks::run_task))
        .route("/hook-log", get(hook_log::list_hook_log))
}
