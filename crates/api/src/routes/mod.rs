pub mod admin;
pub mod events;
pub mod extensions;
pub mod health;
pub mod reports;
pub mod settings;
pub mod templates;
pub mod transactions;
pub mod users;
pub mod venues;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /events                                  list, create
/// /events/export                           CSV export
/// /events/{id}                             get, update, delete
/// /events/{id}/status                      change status (POST)
/// /events/{id}/payments                    record deposit/balance (POST)
/// /events/{id}/journal                     list, append
/// /events/{id}/employees                   list, assign
/// /events/{id}/employees/{employee_id}     unassign (DELETE)
/// /events/{id}/playlist                    list, add entry
/// /events/{id}/playlist/{entry_id}         remove entry (DELETE)
/// /events/{id}/playlist/bulk-delete        clear playlist (POST)
/// /events/{id}/playlist/export             CSV export
/// /events/{id}/playlist/print              printable text
///
/// /playlist-categories                     list, create (create is admin only)
///
/// /users                                   list, create (staff only)
/// /users/{id}                              get, update
///
/// /venues                                  list, create (staff only)
/// /venues/{id}                             get, update, delete
///
/// /transactions                            list, record (staff only)
/// /transactions/types                      list transaction types
/// /transactions/{id}                       get, update, delete
///
/// /templates                               list, create (staff only)
/// /templates/{id}                          get, update, delete
///
/// /settings                                list (staff only)
/// /settings/{key}                          upsert (PUT, admin only)
/// /settings/export                         JSON download (admin only)
/// /settings/import                         bulk upsert (POST, admin only)
///
/// /reports/event-status                    events per status (staff only)
/// /reports/transactions                    income/expense totals (staff only)
/// /reports/playlists                       playlist counts per category (staff only)
///
/// /admin/api-keys                          list, create (admin only)
/// /admin/api-keys/{id}                     revoke (DELETE)
/// /admin/tasks                             list task names (admin only)
/// /admin/tasks/{name}/run                  run one task now (POST)
/// /admin/hook-log                          hook audit trail (admin only)
///
/// /extensions/catalog                      upstream add-on catalog (admin only)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Events and their nested journal, employee and playlist resources.
        .nest("/events", events::router())
        // Playlist categories are shared across events.
        .nest("/playlist-categories", events::category_router())
        // Clients, employees and admins.
        .nest("/users", users::router())
        // Venue directory.
        .nest("/venues", venues::router())
        // Income and expense ledger.
        .nest("/transactions", transactions::router())
        // Email and quote templates.
        .nest("/templates", templates::router())
        // Key/value configuration store.
        .nest("/settings", settings::router())
        // Aggregate reporting.
        .nest("/reports", reports::router())
        // API keys, scheduled tasks and the hook audit log.
        .nest("/admin", admin::router())
        // Upstream add-on catalog.
        .nest("/extensions", extensions::router())
}
