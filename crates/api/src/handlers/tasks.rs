//! Admin handlers for the scheduled maintenance tasks.
//!
//! The `TaskRunner` sweeps hourly on its own; these endpoints exist so
//! an operator can list the tasks and force one through immediately.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;

use encore_hooks::tasks::names;

use crate::error::AppResult;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/admin/tasks
pub async fn list_tasks(_admin: RequireAdmin) -> AppResult<impl IntoResponse> {
    Ok(Json(DataResponse { data: names::ALL }))
}

/// POST /api/v1/admin/tasks/{name}/run
///
/// Run one task to completion and report how many rows it processed.
/// Unknown task names are a 404.
pub async fn run_task(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> AppResult<impl IntoResponse> {
    let report = state.tasks.run_once(&name).await?;

    tracing::info!(
        task = %report.task,
        processed = report.processed,
        user_id = admin.user_id,
        "Task run manually",
    );

    Ok(Json(DataResponse { data: report }))
}
