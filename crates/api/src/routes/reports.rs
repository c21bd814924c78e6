//! Route definitions for the `/reports` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::reports;
use crate::state::AppState;

/// Routes mounted at `/reports`.
///
/// ```text
/// GET    /event-status   -> event_status_report
/// GET    /transactions   -> transaction_report (?from=&to=)
/// GET    /playlists      -> playlist_report
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/event-status", get(reports::event_status_report))
        .route("/transactions", get(reports::transaction_report))
        .route("/playlists", get(reports::playlist_report))
}
