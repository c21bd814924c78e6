//! Route definitions for the `/events` resource.
//!
//! Events are the aggregate root: journal entries, employee assignments and
//! the guest playlist are all addressed through the owning event.

use axum::routing::{delete, get, post};
use axum::Router;

use crate::handlers::{events, journal, playlist};
use crate::state::AppState;

/// Routes mounted at `/events`.
///
/// ```text
/// GET    /                              -> list_events
/// POST   /                              -> create_event
/// GET    /export                        -> export_events (CSV)
/// GET    /{id}                          -> get_event
/// PUT    /{id}                          -> update_event
/// DELETE /{id}                          -> delete_event (unattended only)
/// POST   /{id}/status                   -> change_status
/// POST   /{id}/payments                 -> apply_payments
/// GET    /{id}/journal                  -> list_journal
/// POST   /{id}/journal                  -> add_journal_entry
/// GET    /{id}/employees                -> list_event_employees
/// POST   /{id}/employees                -> add_event_employee
/// DELETE /{id}/employees/{employee_id}  -> remove_event_employee
/// GET    /{id}/playlist                 -> get_playlist
/// POST   /{id}/playlist                 -> add_playlist_entry
/// DELETE /{id}/playlist/{entry_id}      -> remove_playlist_entry
/// POST   /{id}/playlist/bulk-delete     -> clear_playlist
/// GET    /{id}/playlist/export          -> export_playlist (CSV)
/// GET    /{id}/playlist/print           -> print_playlist (plain text)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(events::list_events).post(events::create_event))
        .route("/export", get(events::export_events))
        .route(
            "/{id}",
            get(events::get_event)
                .put(events::update_event)
                .delete(events::delete_event),
        )
        .route("/{id}/status", post(events::change_status))
        .route("/{id}/payments", post(events::apply_payments))
        .route(
            "/{id}/journal",
            get(journal::list_journal).post(journal::add_journal_entry),
        )
        .route(
            "/{id}/employees",
            get(events::list_event_employees).post(events::add_event_employee),
        )
        .route(
            "/{id}/employees/{employee_id}",
            delete(events::remove_event_employee),
        )
        .route(
            "/{id}/playlist",
            get(playlist::get_playlist).post(playlist::add_playlist_entry),
        )
        .route(
            "/{id}/playlist/{entry_id}",
            delete(playlist::remove_playlist_entry),
        )
        .route("/{id}/playlist/bulk-delete", post(playlist::clear_playlist))
        .route("/{id}/playlist/export", get(playlist::export_playlist))
        .route("/{id}/playlist/print", get(playlist::print_playlist))
}

/// Routes mounted at `/playlist-categories`.
///
/// ```text
/// GET    /   -> list_categories
/// POST   /   -> create_category (admin only)
/// ```
pub fn category_router() -> Router<AppState> {
    Router::new().route(
        "/",
        get(playlist::list_categories).post(playlist::create_category),
    )
}
