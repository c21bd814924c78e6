//! Notice template model and DTOs.

use encore_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Full template row from the `templates` table. Bodies carry
/// `{placeholder}` tags filled at send time.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Template {
    pub id: DbId,
    pub slug: String,
    pub subject: String,
    pub body: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a template.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateTemplate {
    #[validate(length(min = 1, max = 100))]
    pub slug: String,
    #[validate(length(min = 1, max = 300))]
    pub subject: String,
    #[validate(length(min = 1))]
    pub body: String,
}

/// DTO for updating a template. All fields are optional.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateTemplate {
    #[validate(length(min = 1, max = 100))]
    pub slug: Option<String>,
    #[validate(length(min = 1, max = 300))]
    pub subject: Option<String>,
    #[validate(length(min = 1))]
    pub body: Option<String>,
}
