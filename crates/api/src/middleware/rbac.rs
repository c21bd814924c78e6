//! Role gate extractors.
//!
//! Authorization is three-tiered: plain [`AuthUser`] admits any
//! authenticated user (the client-portal reads), [`RequireStaff`] admits
//! employees and admins (day-to-day operations), and [`RequireAdmin`]
//! admits admins only (configuration and credentials). A handler states
//! its tier in the signature:
//!
//! ```ignore
//! async fn staff_only(RequireStaff(user): RequireStaff) -> AppResult<Json<()>> {
//!     Ok(Json(()))
//! }
//! ```

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use encore_core::error::CoreError;
use encore_db::models::user::roles;

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

fn forbid_unless(user: AuthUser, allowed: &[&str], needed: &str) -> Result<AuthUser, AppError> {
    if allowed.contains(&user.role.as_str()) {
        Ok(user)
    } else {
        Err(AppError::Core(CoreError::Forbidden(format!(
            "{needed} role required"
        ))))
    }
}

/// Admits only the `admin` role; everyone else gets 403.
pub struct RequireAdmin(pub AuthUser);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        forbid_unless(user, &[roles::ADMIN], "Admin").map(RequireAdmin)
    }
}

/// Admits staff (`employee` or `admin`); clients get 403.
pub struct RequireStaff(pub AuthUser);

impl FromRequestParts<AppState> for RequireStaff {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        forbid_unless(user, &[roles::ADMIN, roles::EMPLOYEE], "Staff").map(RequireStaff)
    }
}
