//! Reporting handlers. Read-only aggregates; the heavy lifting is SQL in
//! `ReportRepo`.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;

use encore_db::repositories::ReportRepo;

use crate::error::AppResult;
use crate::middleware::rbac::RequireStaff;
use crate::query::DateRangeParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/reports/event-status
///
/// Event counts per lifecycle status, every status included.
pub async fn event_status_report(
    _user: RequireStaff,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let counts = ReportRepo::events_by_status(&state.pool).await?;
    Ok(Json(DataResponse { data: counts }))
}

/// GET /api/v1/reports/transactions
///
/// Income/expense totals in cents, overall and per type, over an
/// optional inclusive date range. Only completed transactions count.
pub async fn transaction_report(
    _user: RequireStaff,
    State(state): State<AppState>,
    Query(range): Query<DateRangeParams>,
) -> AppResult<impl IntoResponse> {
    let report = ReportRepo::transaction_totals(&state.pool, range.from, range.to).await?;
    Ok(Json(DataResponse { data: report }))
}

/// GET /api/v1/reports/playlists
///
/// Playlist entry counts per category across all events.
pub async fn playlist_report(
    _user: RequireStaff,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let counts = ReportRepo::playlist_by_category(&state.pool).await?;
    Ok(Json(DataResponse { data: counts }))
}
