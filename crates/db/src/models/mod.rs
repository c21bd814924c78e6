//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches

pub mod api_key;
pub mod event;
pub mod hook_log;
pub mod journal;
pub mod playlist;
pub mod report;
pub mod setting;
pub mod template;
pub mod transaction;
pub mod user;
pub mod venue;
