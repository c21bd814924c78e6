//! Notice template handlers.
//!
//! Templates are the email bodies the notifier renders, addressed by
//! slug. Deleting one that a setting still points at does not break
//! anything: the send just logs "template missing" and reports unsent.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use validator::Validate;

use encore_core::error::CoreError;
use encore_core::types::DbId;
use encore_db::models::template::{CreateTemplate, UpdateTemplate};
use encore_db::repositories::TemplateRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireStaff;
use crate::response::{created, DataResponse};
use crate::state::AppState;

/// GET /api/v1/templates
pub async fn list_templates(
    _user: RequireStaff,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let templates = TemplateRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: templates }))
}

/// POST /api/v1/templates
///
/// Create a template. Slugs are unique.
pub async fn create_template(
    RequireStaff(user): RequireStaff,
    State(state): State<AppState>,
    Json(input): Json<CreateTemplate>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    let template = TemplateRepo::create(&state.pool, &input).await?;

    tracing::info!(
        template_id = template.id,
        slug = %template.slug,
        user_id = user.user_id,
        "Template created",
    );

    Ok(created(template))
}

/// GET /api/v1/templates/{id}
pub async fn get_template(
    _user: RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let template = TemplateRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "template",
            id,
        }))?;
    Ok(Json(DataResponse { data: template }))
}

/// PUT /api/v1/templates/{id}
pub async fn update_template(
    RequireStaff(user): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateTemplate>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    let template = TemplateRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "template",
            id,
        }))?;

    tracing::info!(template_id = id, user_id = user.user_id, "Template updated");
    Ok(Json(DataResponse { data: template }))
}

/// DELETE /api/v1/templates/{id}
pub async fn delete_template(
    RequireStaff(user): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let deleted = TemplateRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "template",
            id,
        }));
    }

    tracing::info!(template_id = id, user_id = user.user_id, "Template deleted");
    Ok(StatusCode::NO_CONTENT)
}
