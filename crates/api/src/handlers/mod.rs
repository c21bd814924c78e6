//! HTTP handler implementations, one module per resource.

pub mod api_keys;
pub mod events;
pub mod extensions;
pub mod hook_log;
pub mod journal;
pub mod playlist;
pub mod reports;
pub mod settings;
pub mod tasks;
pub mod templates;
pub mod transactions;
pub mod users;
pub mod venues;
