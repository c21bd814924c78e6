//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod api_key_repo;
pub mod event_repo;
pub mod hook_log_repo;
pub mod journal_repo;
pub mod playlist_repo;
pub mod report_repo;
pub mod settings_repo;
pub mod template_repo;
pub mod transaction_repo;
pub mod user_repo;
pub mod venue_repo;

pub use api_key_repo::ApiKeyRepo;
pub use event_repo::EventRepo;
pub use hook_log_repo::HookLogRepo;
pub use journal_repo::JournalRepo;
pub use playlist_repo::PlaylistRepo;
pub use report_repo::ReportRepo;
pub use settings_repo::SettingsRepo;
pub use template_repo::TemplateRepo;
pub use transaction_repo::TransactionRepo;
pub use user_repo::UserRepo;
pub use venue_repo::VenueRepo;
