//! User handlers.
//!
//! Clients and employees live in one table distinguished by `role`.
//! There is no delete endpoint: users with history (events, journal
//! authorship, transactions) must stay resolvable.

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use validator::Validate;

use encore_core::error::CoreError;
use encore_core::pagination::{clamp_limit, clamp_offset, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT};
use encore_core::types::DbId;
use encore_db::models::user::{roles, CreateUser, UpdateUser};
use encore_db::repositories::UserRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireStaff;
use crate::query::PaginationParams;
use crate::response::{created, DataResponse};
use crate::state::AppState;

/// Filter query for the user listing.
#[derive(Debug, Default, Deserialize)]
pub struct UserListParams {
    /// Restrict to one role (`admin`, `employee`, `client`).
    pub role: Option<String>,
}

fn check_role(role: &str) -> AppResult<()> {
    if !matches!(role, roles::ADMIN | roles::EMPLOYEE | roles::CLIENT) {
        return Err(AppError::BadRequest(format!("Unknown role: '{role}'")));
    }
    Ok(())
}

/// GET /api/v1/users
pub async fn list_users(
    _user: RequireStaff,
    State(state): State<AppState>,
    Query(params): Query<UserListParams>,
    Query(page): Query<PaginationParams>,
) -> AppResult<impl IntoResponse> {
    if let Some(role) = &params.role {
        check_role(role)?;
    }
    let limit = clamp_limit(page.limit, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT);
    let offset = clamp_offset(page.offset);
    let users = UserRepo::list(&state.pool, params.role.as_deref(), limit, offset).await?;
    Ok(Json(DataResponse { data: users }))
}

/// POST /api/v1/users
///
/// Create a user. The role defaults to `client`; emails are unique.
pub async fn create_user(
    RequireStaff(actor): RequireStaff,
    State(state): State<AppState>,
    Json(input): Json<CreateUser>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    if let Some(role) = &input.role {
        check_role(role)?;
    }

    let user = UserRepo::create(&state.pool, &input).await?;

    tracing::info!(
        user_id = user.id,
        role = %user.role,
        created_by = actor.user_id,
        "User created",
    );

    Ok(created(user))
}

/// GET /api/v1/users/{id}
pub async fn get_user(
    _user: RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let user = UserRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "user", id }))?;
    Ok(Json(DataResponse { data: user }))
}

/// PUT /api/v1/users/{id}
pub async fn update_user(
    RequireStaff(actor): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateUser>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    if let Some(role) = &input.role {
        check_role(role)?;
    }

    let user = UserRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "user", id }))?;

    tracing::info!(user_id = id, updated_by = actor.user_id, "User updated");
    Ok(Json(DataResponse { data: user }))
}
