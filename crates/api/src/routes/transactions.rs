//! Route definitions for the `/transactions` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::transactions;
use crate::state::AppState;

/// Routes mounted at `/transactions`.
///
/// The static `/types` route is registered alongside `/{id}`; axum matches
/// static segments before path parameters.
///
/// ```text
/// GET    /        -> list_transactions
/// POST   /        -> create_transaction
/// GET    /types   -> list_transaction_types
/// GET    /{id}    -> get_transaction
/// PUT    /{id}    -> update_transaction
/// DELETE /{id}    -> delete_transaction
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(transactions::list_transactions).post(transactions::create_transaction),
        )
        .route("/types", get(transactions::list_transaction_types))
        .route(
            "/{id}",
            get(transactions::get_transaction)
                .put(transactions::update_transaction)
                .delete(transactions::delete_transaction),
        )
}
