//! Admin handler for browsing the persisted hook log.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use encore_core::pagination::{clamp_limit, clamp_offset, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT};
use encore_core::types::DbId;
use encore_db::models::hook_log::HookLogFilter;
use encore_db::repositories::HookLogRepo;

use crate::error::AppResult;
use crate::middleware::rbac::RequireAdmin;
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// Filter query for the hook log listing.
#[derive(Debug, Default, Deserialize)]
pub struct HookLogParams {
    /// Exact hook name, e.g. `event.status.approved`.
    pub hook: Option<String>,
    pub entity: Option<String>,
    pub entity_id: Option<DbId>,
}

/// GET /api/v1/admin/hook-log
///
/// Persisted hook events, newest first.
pub async fn list_hook_log(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Query(params): Query<HookLogParams>,
    Query(page): Query<PaginationParams>,
) -> AppResult<impl IntoResponse> {
    let filter = HookLogFilter {
        hook: params.hook,
        entity: params.entity,
        entity_id: params.entity_id,
    };
    let limit = clamp_limit(page.limit, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT);
    let offset = clamp_offset(page.offset);
    let entries = HookLogRepo::list(&state.pool, &filter, limit, offset).await?;
    Ok(Json(DataResponse { data: entries }))
}
