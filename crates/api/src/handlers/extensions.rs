//! Extension catalog handler.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;

use crate::error::AppResult;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/extensions/catalog
///
/// The advertised add-on products. Always succeeds: an unreachable or
/// malformed catalog reads as empty.
pub async fn get_catalog(
    _admin: RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let products = state.catalog.products().await;
    Ok(Json(DataResponse { data: products }))
}
