//! Route definitions for the `/extensions` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::extensions;
use crate::state::AppState;

/// Routes mounted at `/extensions`.
///
/// ```text
/// GET    /catalog   -> get_catalog (admin only)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/catalog", get(extensions::get_catalog))
}
