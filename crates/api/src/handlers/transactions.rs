//! Transaction handlers.
//!
//! Manual income/expense bookkeeping. The automatic deposit/balance
//! transactions are written by the payment engine, not here, but they
//! appear in the same listing.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use serde_json::json;
use validator::Validate;

use encore_core::error::CoreError;
use encore_core::pagination::{clamp_limit, clamp_offset, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT};
use encore_core::types::DbId;
use encore_db::models::transaction::{
    direction, status, CreateTransaction, TransactionFilter, UpdateTransaction,
};
use encore_db::repositories::TransactionRepo;
use encore_hooks::{hooks, HookEvent};

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireStaff;
use crate::query::{DateRangeParams, PaginationParams};
use crate::response::{created, DataResponse};
use crate::state::AppState;

/// Filter query for the transaction listing.
#[derive(Debug, Default, Deserialize)]
pub struct TransactionListParams {
    pub event_id: Option<DbId>,
    pub type_id: Option<i16>,
    /// `income` or `expense`.
    pub direction: Option<String>,
}

fn check_direction(tag: &str) -> AppResult<()> {
    if !direction::is_valid(tag) {
        return Err(AppError::BadRequest(format!("Unknown direction: '{tag}'")));
    }
    Ok(())
}

fn check_status(tag: &str) -> AppResult<()> {
    if !status::is_valid(tag) {
        return Err(AppError::BadRequest(format!(
            "Unknown transaction status: '{tag}'"
        )));
    }
    Ok(())
}

/// GET /api/v1/transactions
pub async fn list_transactions(
    _user: RequireStaff,
    State(state): State<AppState>,
    Query(params): Query<TransactionListParams>,
    Query(range): Query<DateRangeParams>,
    Query(page): Query<PaginationParams>,
) -> AppResult<impl IntoResponse> {
    if let Some(tag) = &params.direction {
        check_direction(tag)?;
    }
    let filter = TransactionFilter {
        event_id: params.event_id,
        type_id: params.type_id,
        direction: params.direction,
        from: range.from,
        to: range.to,
    };
    let limit = clamp_limit(page.limit, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT);
    let offset = clamp_offset(page.offset);
    let transactions = TransactionRepo::list(&state.pool, &filter, limit, offset).await?;
    Ok(Json(DataResponse { data: transactions }))
}

/// POST /api/v1/transactions
///
/// Record a transaction and announce it on the hook bus.
pub async fn create_transaction(
    RequireStaff(user): RequireStaff,
    State(state): State<AppState>,
    Json(input): Json<CreateTransaction>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    check_direction(&input.direction)?;
    if let Some(tag) = &input.status {
        check_status(tag)?;
    }

    let transaction = TransactionRepo::create(&state.pool, &input, Some(user.user_id)).await?;

    state.bus.publish(
        HookEvent::new(hooks::TRANSACTION_RECORDED)
            .with_entity("transaction", transaction.id)
            .with_actor(Some(user.user_id))
            .with_payload(json!({
                "direction": transaction.direction,
                "type_id": transaction.type_id,
                "amount_cents": transaction.amount_cents,
            })),
    );

    tracing::info!(
        transaction_id = transaction.id,
        direction = %transaction.direction,
        amount_cents = transaction.amount_cents,
        user_id = user.user_id,
        "Transaction recorded",
    );

    Ok(created(transaction))
}

/// GET /api/v1/transactions/types
pub async fn list_transaction_types(
    _user: RequireStaff,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let types = TransactionRepo::list_types(&state.pool).await?;
    Ok(Json(DataResponse { data: types }))
}

/// GET /api/v1/transactions/{id}
pub async fn get_transaction(
    _user: RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let transaction = TransactionRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "transaction",
            id,
        }))?;
    Ok(Json(DataResponse { data: transaction }))
}

/// PUT /api/v1/transactions/{id}
///
/// Status changes here are plain bookkeeping; nothing cascades.
pub async fn update_transaction(
    RequireStaff(user): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateTransaction>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    if let Some(tag) = &input.status {
        check_status(tag)?;
    }

    let transaction = TransactionRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "transaction",
            id,
        }))?;

    tracing::info!(transaction_id = id, user_id = user.user_id, "Transaction updated");
    Ok(Json(DataResponse { data: transaction }))
}

/// DELETE /api/v1/transactions/{id}
pub async fn delete_transaction(
    RequireStaff(user): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let deleted = TransactionRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "transaction",
            id,
        }));
    }

    tracing::info!(transaction_id = id, user_id = user.user_id, "Transaction deleted");
    Ok(StatusCode::NO_CONTENT)
}
