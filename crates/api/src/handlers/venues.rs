//! Venue handlers.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use validator::Validate;

use encore_core::error::CoreError;
use encore_core::pagination::{clamp_limit, clamp_offset, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT};
use encore_core::types::DbId;
use encore_db::models::venue::{CreateVenue, UpdateVenue};
use encore_db::repositories::VenueRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireStaff;
use crate::query::PaginationParams;
use crate::response::{created, DataResponse};
use crate::state::AppState;

/// GET /api/v1/venues
pub async fn list_venues(
    _user: RequireStaff,
    State(state): State<AppState>,
    Query(page): Query<PaginationParams>,
) -> AppResult<impl IntoResponse> {
    let limit = clamp_limit(page.limit, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT);
    let offset = clamp_offset(page.offset);
    let venues = VenueRepo::list(&state.pool, limit, offset).await?;
    Ok(Json(DataResponse { data: venues }))
}

/// POST /api/v1/venues
pub async fn create_venue(
    RequireStaff(user): RequireStaff,
    State(state): State<AppState>,
    Json(input): Json<CreateVenue>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    let venue = VenueRepo::create(&state.pool, &input).await?;

    tracing::info!(venue_id = venue.id, user_id = user.user_id, "Venue created");
    Ok(created(venue))
}

/// GET /api/v1/venues/{id}
pub async fn get_venue(
    _user: RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let venue = VenueRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "venue", id }))?;
    Ok(Json(DataResponse { data: venue }))
}

/// PUT /api/v1/venues/{id}
pub async fn update_venue(
    RequireStaff(user): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateVenue>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    let venue = VenueRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "venue", id }))?;

    tracing::info!(venue_id = id, user_id = user.user_id, "Venue updated");
    Ok(Json(DataResponse { data: venue }))
}

/// DELETE /api/v1/venues/{id}
///
/// Fails with a conflict while any event still points at the venue.
pub async fn delete_venue(
    RequireStaff(user): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let deleted = VenueRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound { entity: "venue", id }));
    }

    tracing::info!(venue_id = id, user_id = user.user_id, "Venue deleted");
    Ok(StatusCode::NO_CONTENT)
}
