//! Event CRUD, status, payment, and staffing handlers.
//!
//! Events are the central record. Status changes and payment flags never
//! touch columns directly: they go through the [`StatusEngine`] so
//! notices, journal entries, transactions, and hooks stay consistent.
//!
//! [`StatusEngine`]: encore_hooks::StatusEngine

use axum::extract::{Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use encore_core::csv;
use encore_core::error::CoreError;
use encore_core::pagination::{clamp_limit, clamp_offset, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT};
use encore_core::payment::PaymentUpdate;
use encore_core::status::EventStatus;
use encore_core::transition::{updated_message, TransitionOptions};
use encore_core::types::DbId;
use encore_db::models::event::{
    CreateEvent, CreateEventEmployee, Event, EventFilter, UpdateEvent,
};
use encore_db::models::journal::NewJournalEntry;
use encore_db::models::setting::keys;
use encore_db::repositories::{EventRepo, JournalRepo, SettingsRepo};
use encore_hooks::TransitionOutcome;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireStaff;
use crate::query::PaginationParams;
use crate::response::{created, DataResponse};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response shapes
// ---------------------------------------------------------------------------

/// Filter query for the event listing and CSV export.
#[derive(Debug, Default, Deserialize)]
pub struct EventListParams {
    /// Status wire tag, e.g. `enquiry`.
    pub status: Option<String>,
    pub client_id: Option<DbId>,
    pub employee_id: Option<DbId>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl EventListParams {
    fn into_filter(self) -> AppResult<EventFilter> {
        let status_id = match &self.status {
            Some(tag) => Some(
                EventStatus::from_tag(tag)
                    .ok_or_else(|| AppError::BadRequest(format!("Unknown status: '{tag}'")))?
                    .id(),
            ),
            None => None,
        };
        Ok(EventFilter {
            status_id,
            client_id: self.client_id,
            employee_id: self.employee_id,
            from: self.from,
            to: self.to,
        })
    }
}

/// Body for `POST /events/{id}/status`.
#[derive(Debug, Deserialize)]
pub struct ChangeStatusRequest {
    /// Target status wire tag, e.g. `approved`.
    pub status: String,
    /// Suppress the client notice for this change.
    #[serde(default)]
    pub suppress_notices: bool,
    /// Template id overriding the notice template.
    pub email_template: Option<DbId>,
    /// Template id overriding the quote template.
    pub quote_template: Option<DbId>,
    /// Recorded in the journal when rejecting.
    pub reject_reason: Option<String>,
}

/// Response for `POST /events/{id}/status`.
#[derive(Debug, Serialize)]
pub struct StatusChangeResponse {
    /// `false` when the event was already in the requested status.
    pub changed: bool,
    pub from: Option<String>,
    pub to: String,
    /// Whether a client notice actually went out.
    pub notice_sent: bool,
    pub event: Event,
}

impl From<TransitionOutcome> for StatusChangeResponse {
    fn from(outcome: TransitionOutcome) -> Self {
        match outcome {
            TransitionOutcome::Unchanged(event) => {
                let to = event
                    .status()
                    .map(|s| s.tag().to_string())
                    .unwrap_or_default();
                Self {
                    changed: false,
                    from: None,
                    to,
                    notice_sent: false,
                    event,
                }
            }
            TransitionOutcome::Transitioned {
                event,
                from,
                to,
                notice_sent,
            } => Self {
                changed: true,
                from: Some(from.tag().to_string()),
                to: to.tag().to_string(),
                notice_sent,
                event,
            },
        }
    }
}

// ---------------------------------------------------------------------------
// CRUD handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/events
///
/// List events with optional status/client/employee/date filters.
pub async fn list_events(
    _user: RequireStaff,
    State(state): State<AppState>,
    Query(params): Query<EventListParams>,
    Query(page): Query<PaginationParams>,
) -> AppResult<impl IntoResponse> {
    let filter = params.into_filter()?;
    let limit = clamp_limit(page.limit, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT);
    let offset = clamp_offset(page.offset);
    let events = EventRepo::list(&state.pool, &filter, limit, offset).await?;
    Ok(Json(DataResponse { data: events }))
}

/// POST /api/v1/events
///
/// Log a new event. The status defaults to `unattended`; the price total
/// is derived server-side from the cost parts.
pub async fn create_event(
    RequireStaff(user): RequireStaff,
    State(state): State<AppState>,
    Json(input): Json<CreateEvent>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    let status = match input.status_id {
        Some(id) => EventStatus::from_id(id)
            .ok_or_else(|| AppError::BadRequest(format!("Unknown status id: {id}")))?,
        None => EventStatus::Unattended,
    };

    let event = EventRepo::create(&state.pool, &input, status.id()).await?;
    state.engine.record_created(&event, Some(user.user_id)).await?;

    tracing::info!(
        event_id = event.id,
        status = %status,
        user_id = user.user_id,
        "Event created",
    );

    Ok(created(event))
}

/// GET /api/v1/events/export
///
/// CSV export of the (filtered) event list.
pub async fn export_events(
    _user: RequireStaff,
    State(state): State<AppState>,
    Query(params): Query<EventListParams>,
) -> AppResult<impl IntoResponse> {
    let filter = params.into_filter()?;
    let rows = EventRepo::export_rows(&state.pool, &filter).await?;

    let header = [
        "id",
        "event_date",
        "status",
        "client_name",
        "client_email",
        "venue",
        "price_total_cents",
        "deposit_cents",
        "deposit_paid",
        "balance_paid",
    ];
    let data: Vec<Vec<String>> = rows
        .iter()
        .map(|r| {
            vec![
                r.id.to_string(),
                r.event_date.to_string(),
                r.status.clone(),
                r.client_name.clone(),
                r.client_email.clone(),
                r.venue.clone(),
                r.price_total_cents.to_string(),
                r.deposit_cents.to_string(),
                r.deposit_paid.to_string(),
                r.balance_paid.to_string(),
            ]
        })
        .collect();

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"encore-events.csv\"",
            ),
        ],
        csv::csv_document(&header, &data),
    ))
}

/// GET /api/v1/events/{id}
pub async fn get_event(
    _user: RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let event = EventRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "event", id }))?;
    Ok(Json(DataResponse { data: event }))
}

/// PUT /api/v1/events/{id}
///
/// Update event details. Status and payment flags are rejected here by
/// the DTO shape; they have their own endpoints. When the
/// `journal_on_save` setting is on, the save itself is journalled.
pub async fn update_event(
    RequireStaff(user): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateEvent>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    let event = EventRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "event", id }))?;

    if SettingsRepo::get_bool(&state.pool, keys::JOURNAL_ON_SAVE, true).await? {
        JournalRepo::append(&state.pool, &NewJournalEntry::system(id, updated_message()))
            .await?;
    }

    tracing::info!(event_id = id, user_id = user.user_id, "Event updated");
    Ok(Json(DataResponse { data: event }))
}

/// DELETE /api/v1/events/{id}
///
/// Hard-delete an event. Only permitted while the event is `unattended`;
/// anything further into the lifecycle must be cancelled or rejected
/// instead so the paper trail survives.
pub async fn delete_event(
    RequireStaff(user): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    EventRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "event", id }))?;

    let deleted =
        EventRepo::delete_if_status(&state.pool, id, EventStatus::Unattended.id()).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::Conflict(
            "Only unattended events can be deleted".into(),
        )));
    }

    tracing::info!(event_id = id, user_id = user.user_id, "Event deleted");
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Status and payments
// ---------------------------------------------------------------------------

/// POST /api/v1/events/{id}/status
///
/// Move the event to a new status through the transition engine.
/// Requesting the current status is a journalled no-op.
pub async fn change_status(
    RequireStaff(user): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<ChangeStatusRequest>,
) -> AppResult<impl IntoResponse> {
    let status = EventStatus::from_tag(&input.status)
        .ok_or_else(|| AppError::BadRequest(format!("Unknown status: '{}'", input.status)))?;

    let opts = TransitionOptions {
        client_notices: !input.suppress_notices,
        email_template: input.email_template,
        quote_template: input.quote_template,
        reject_reason: input.reject_reason,
    };
    let outcome = state
        .engine
        .transition(id, status, &opts, Some(user.user_id))
        .await?;

    Ok(Json(DataResponse {
        data: StatusChangeResponse::from(outcome),
    }))
}

/// POST /api/v1/events/{id}/payments
///
/// Mark or clear the deposit/balance paid flags. Marking is one-shot:
/// the income transaction is recorded only on the Due→Paid edge.
pub async fn apply_payments(
    RequireStaff(user): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<PaymentUpdate>,
) -> AppResult<impl IntoResponse> {
    let event = state
        .engine
        .apply_payment(id, input, Some(user.user_id))
        .await?;
    Ok(Json(DataResponse { data: event }))
}

// ---------------------------------------------------------------------------
// Staffing
// ---------------------------------------------------------------------------

/// GET /api/v1/events/{id}/employees
pub async fn list_event_employees(
    _user: RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    EventRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "event", id }))?;
    let employees = EventRepo::list_employees(&state.pool, id).await?;
    Ok(Json(DataResponse { data: employees }))
}

/// POST /api/v1/events/{id}/employees
///
/// Assign an additional employee to the event. Each employee can be
/// assigned at most once per event.
pub async fn add_event_employee(
    RequireStaff(user): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<CreateEventEmployee>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    EventRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "event", id }))?;

    let assignment = EventRepo::add_employee(&state.pool, id, &input).await?;

    tracing::info!(
        event_id = id,
        employee_id = input.employee_id,
        user_id = user.user_id,
        "Employee assigned to event",
    );

    Ok(created(assignment))
}

/// DELETE /api/v1/events/{id}/employees/{employee_id}
pub async fn remove_event_employee(
    RequireStaff(user): RequireStaff,
    State(state): State<AppState>,
    Path((id, employee_id)): Path<(DbId, DbId)>,
) -> AppResult<impl IntoResponse> {
    let removed = EventRepo::remove_employee(&state.pool, id, employee_id).await?;
    if !removed {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "event employee",
            id: employee_id,
        }));
    }

    tracing::info!(
        event_id = id,
        employee_id,
        user_id = user.user_id,
        "Employee removed from event",
    );

    Ok(StatusCode::NO_CONTENT)
}
