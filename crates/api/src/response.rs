//! Response envelope types shared by the API handlers.
//!
//! Every JSON endpoint wraps its payload as `{ "data": ... }`. The only
//! responses outside the envelope are the download endpoints (event CSV,
//! playlist CSV, settings snapshot), which return attachments built with
//! `Response::builder()` in their handlers.

use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

/// The `{ "data": T }` envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// A `201 Created` response carrying the stored row in the envelope.
pub fn created<T: Serialize>(data: T) -> (StatusCode, Json<DataResponse<T>>) {
    (StatusCode::CREATED, Json(DataResponse { data }))
}
