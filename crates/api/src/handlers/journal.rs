//! Per-event journal handlers.
//!
//! The journal is append-only; there are no update or delete endpoints.
//! Clients only ever see entries tagged `client`, whatever filter they
//! ask for.

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use validator::Validate;

use encore_core::error::CoreError;
use encore_core::types::DbId;
use encore_db::models::journal::{visibility, CreateJournalEntry, NewJournalEntry};
use encore_db::models::user::roles;
use encore_db::repositories::{EventRepo, JournalRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireStaff;
use crate::response::{created, DataResponse};
use crate::state::AppState;

/// Filter query for the journal listing.
#[derive(Debug, Default, Deserialize)]
pub struct JournalListParams {
    /// Visibility tag to restrict to (`client`, `employee`, `admin`).
    pub visibility: Option<String>,
}

/// GET /api/v1/events/{id}/journal
pub async fn list_journal(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Query(params): Query<JournalListParams>,
) -> AppResult<impl IntoResponse> {
    EventRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "event", id }))?;

    let filter = if user.role == roles::CLIENT {
        Some(visibility::CLIENT.to_string())
    } else {
        if let Some(tag) = &params.visibility {
            if !visibility::is_valid(tag) {
                return Err(AppError::BadRequest(format!("Unknown visibility: '{tag}'")));
            }
        }
        params.visibility
    };

    let entries = JournalRepo::list_for_event(&state.pool, id, filter.as_deref()).await?;
    Ok(Json(DataResponse { data: entries }))
}

/// POST /api/v1/events/{id}/journal
///
/// Append a manual note to the event's journal.
pub async fn add_journal_entry(
    RequireStaff(user): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<CreateJournalEntry>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    EventRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "event", id }))?;

    let tag = input
        .visibility
        .unwrap_or_else(|| visibility::ADMIN.to_string());
    if !visibility::is_valid(&tag) {
        return Err(AppError::BadRequest(format!("Unknown visibility: '{tag}'")));
    }

    let entry = JournalRepo::append(
        &state.pool,
        &NewJournalEntry {
            event_id: id,
            author_id: Some(user.user_id),
            content: input.content,
            visibility: tag,
        },
    )
    .await?;

    tracing::info!(event_id = id, user_id = user.user_id, "Journal entry added");
    Ok(created(entry))
}
