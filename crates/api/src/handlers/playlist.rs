//! Playlist handlers.
//!
//! Reads are tolerant: listing the playlist of a nonexistent event is an
//! empty result, not a 404, because guest-facing pages poll it freely.
//! Writes respect the event's `playlist_enabled` flag and entry limit.

use axum::extract::{Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::json;
use validator::Validate;

use encore_core::csv;
use encore_core::error::CoreError;
use encore_core::playlist::{self, PlaylistOrder, PlaylistRecord, SortDirection};
use encore_core::types::DbId;
use encore_db::models::playlist::CreatePlaylistEntry;
use encore_db::models::setting::keys;
use encore_db::repositories::{EventRepo, PlaylistRepo, SettingsRepo};
use encore_hooks::{hooks, HookEvent};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::{RequireAdmin, RequireStaff};
use crate::response::{created, DataResponse};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response shapes
// ---------------------------------------------------------------------------

/// Ordering query for the playlist listing.
#[derive(Debug, Default, Deserialize)]
pub struct PlaylistQuery {
    #[serde(default)]
    pub order_by: PlaylistOrder,
    #[serde(default)]
    pub direction: SortDirection,
    /// Include categories with no entries (category ordering only).
    #[serde(default)]
    pub include_empty: bool,
}

/// Response for the bulk delete endpoint.
#[derive(Debug, Serialize)]
pub struct RemovedResponse {
    pub removed: u64,
}

/// Body for `POST /playlist-categories`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCategoryRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[serde(default)]
    pub sort_order: i32,
}

// ---------------------------------------------------------------------------
// Entry handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/events/{id}/playlist
///
/// The playlist ordered per the query: category ordering returns groups,
/// any other field returns a flat sorted list.
pub async fn get_playlist(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Query(params): Query<PlaylistQuery>,
) -> AppResult<Response> {
    let records: Vec<PlaylistRecord> = PlaylistRepo::list_for_event(&state.pool, id)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    match params.order_by {
        PlaylistOrder::Category => {
            let known: Vec<String> = PlaylistRepo::list_categories(&state.pool)
                .await?
                .into_iter()
                .map(|c| c.name)
                .collect();
            let groups = playlist::group_by_category(
                records,
                &known,
                params.direction,
                params.include_empty,
            );
            Ok(Json(DataResponse { data: groups }).into_response())
        }
        order => {
            let entries = playlist::sort_entries(records, order, params.direction);
            Ok(Json(DataResponse { data: entries }).into_response())
        }
    }
}

/// POST /api/v1/events/{id}/playlist
///
/// Add a song. Rejected when the event's playlist is disabled or full.
/// The effective limit is the event's own when set, otherwise the
/// `default_playlist_limit` setting; zero means unlimited.
pub async fn add_playlist_entry(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(mut input): Json<CreatePlaylistEntry>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    let event = EventRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "event", id }))?;

    if !event.playlist_enabled {
        return Err(AppError::Core(CoreError::Forbidden(
            "The playlist for this event is closed".into(),
        )));
    }

    let limit = if event.playlist_limit > 0 {
        i64::from(event.playlist_limit)
    } else {
        SettingsRepo::get_i64(&state.pool, keys::DEFAULT_PLAYLIST_LIMIT, 0).await?
    };
    if limit > 0 {
        let count = PlaylistRepo::count_for_event(&state.pool, id).await?;
        if count >= limit {
            return Err(AppError::Core(CoreError::Conflict(format!(
                "Playlist limit of {limit} entries reached"
            ))));
        }
    }

    if input.added_by_user_id.is_none() {
        input.added_by_user_id = Some(user.user_id);
    }
    let entry = PlaylistRepo::create(&state.pool, id, &input).await?;

    state.bus.publish(
        HookEvent::new(hooks::PLAYLIST_ENTRY_ADDED)
            .with_entity("playlist_entry", entry.id)
            .with_actor(Some(user.user_id))
            .with_payload(json!({ "event_id": id, "song": entry.song })),
    );

    tracing::info!(event_id = id, entry_id = entry.id, "Playlist entry added");
    Ok(created(entry))
}

/// DELETE /api/v1/events/{id}/playlist/{entry_id}
pub async fn remove_playlist_entry(
    user: AuthUser,
    State(state): State<AppState>,
    Path((id, entry_id)): Path<(DbId, DbId)>,
) -> AppResult<impl IntoResponse> {
    let entry = PlaylistRepo::find_entry(&state.pool, id, entry_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "playlist entry",
            id: entry_id,
        }))?;

    PlaylistRepo::delete(&state.pool, id, entry_id).await?;

    state.bus.publish(
        HookEvent::new(hooks::PLAYLIST_ENTRY_REMOVED)
            .with_entity("playlist_entry", entry_id)
            .with_actor(Some(user.user_id))
            .with_payload(json!({ "event_id": id, "song": entry.song })),
    );

    tracing::info!(event_id = id, entry_id, "Playlist entry removed");
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/events/{id}/playlist/bulk-delete
///
/// Clear the whole playlist for an event.
pub async fn clear_playlist(
    RequireStaff(user): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    EventRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "event", id }))?;

    let removed = PlaylistRepo::delete_all_for_event(&state.pool, id).await?;

    state.bus.publish(
        HookEvent::new(hooks::PLAYLIST_ENTRY_REMOVED)
            .with_entity("event", id)
            .with_actor(Some(user.user_id))
            .with_payload(json!({ "event_id": id, "removed": removed })),
    );

    tracing::info!(event_id = id, removed, "Playlist cleared");
    Ok(Json(DataResponse {
        data: RemovedResponse { removed },
    }))
}

// ---------------------------------------------------------------------------
// Export and print
// ---------------------------------------------------------------------------

/// GET /api/v1/events/{id}/playlist/export
///
/// CSV export of an event's playlist in insertion order.
pub async fn export_playlist(
    _user: RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let entries = PlaylistRepo::list_for_event(&state.pool, id).await?;

    let header = ["song", "artist", "category", "added_by", "notes", "added_at"];
    let data: Vec<Vec<String>> = entries
        .iter()
        .map(|e| {
            vec![
                e.song.clone(),
                e.artist.clone(),
                e.category.clone(),
                e.added_by.clone(),
                e.notes.clone().unwrap_or_default(),
                e.created_at.to_rfc3339(),
            ]
        })
        .collect();

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"encore-playlist-{id}.csv\""),
            ),
        ],
        csv::csv_document(&header, &data),
    ))
}

/// GET /api/v1/events/{id}/playlist/print
///
/// Plain-text playlist grouped by category, for a printable set list.
pub async fn print_playlist(
    _user: RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let records: Vec<PlaylistRecord> = PlaylistRepo::list_for_event(&state.pool, id)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    let known: Vec<String> = PlaylistRepo::list_categories(&state.pool)
        .await?
        .into_iter()
        .map(|c| c.name)
        .collect();

    let groups = playlist::group_by_category(records, &known, SortDirection::Asc, false);
    let text = playlist::format_playlist_text(&groups);

    Ok((
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        text,
    ))
}

// ---------------------------------------------------------------------------
// Categories
// ---------------------------------------------------------------------------

/// GET /api/v1/playlist-categories
pub async fn list_categories(
    _user: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let categories = PlaylistRepo::list_categories(&state.pool).await?;
    Ok(Json(DataResponse { data: categories }))
}

/// POST /api/v1/playlist-categories
///
/// Add a playlist category. Names are unique.
pub async fn create_category(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateCategoryRequest>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    let category =
        PlaylistRepo::create_category(&state.pool, input.name.trim(), input.sort_order).await?;

    tracing::info!(
        category_id = category.id,
        name = %category.name,
        user_id = admin.user_id,
        "Playlist category created",
    );

    Ok(created(category))
}
