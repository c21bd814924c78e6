//! Pure domain logic for the Encore booking platform.
//!
//! Everything in this crate is synchronous and free of I/O so it can be
//! exercised by plain unit tests and shared by the persistence, hook, and
//! API layers:
//!
//! - [`status`] — the event lifecycle statuses and their seed-table ids.
//! - [`transition`] — the status transition planner (which notices and
//!   bookkeeping a status change triggers).
//! - [`payment`] — deposit/balance one-shot payment planning.
//! - [`pricing`] — integer-cents price arithmetic and display formatting.
//! - [`playlist`] — playlist ordering, category grouping, and text output.
//! - [`template`] — `{placeholder}` substitution for notice templates.
//! - [`csv`] — the quoted/CRLF CSV dialect used by the export endpoints.
//! - [`catalog`] — extension catalog manifest types and cache freshness.
//! - [`api_keys`] — API key generation and hashing.

pub mod api_keys;
pub mod catalog;
pub mod csv;
pub mod error;
pub mod pagination;
pub mod payment;
pub mod playlist;
pub mod pricing;
pub mod status;
pub mod template;
pub mod transition;
pub mod types;
