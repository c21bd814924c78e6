//! Route definitions for the `/settings` resource.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::settings;
use crate::state::AppState;

/// Routes mounted at `/settings`.
///
/// `/export` and `/import` are static segments, so they never collide with
/// the `/{key}` parameter route.
///
/// ```text
/// GET    /         -> list_settings
/// PUT    /{key}    -> put_setting (admin only)
/// GET    /export   -> export_settings (admin only, JSON download)
/// POST   /import   -> import_settings (admin only)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(settings::list_settings))
        .route("/export", get(settings::export_settings))
        .route("/import", post(settings::import_settings))
        .route("/{key}", put(settings::put_setting))
}
