//! Role-gated extractors.
//!
//! Each wraps [`AuthUser`]. A valid token with the wrong role is a 403;
//! a missing or invalid token stays a 401.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use hrm_core::error::CoreError;
use hrm_core::roles::UserRole;

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

async fn require_role(
    parts: &mut Parts,
    state: &AppState,
    role: UserRole,
) -> Result<AuthUser, AppError> {
    let user = AuthUser::from_request_parts(parts, state).await?;
    if user.role != role {
        return Err(AppError::Core(CoreError::Forbidden(format!(
            "{role} role required"
        ))));
    }
    Ok(user)
}

/// Admin-only endpoints.
///
/// ```ignore
/// async fn approve(RequireAdmin(admin): RequireAdmin) -> AppResult<StatusCode> { .. }
/// ```
pub struct RequireAdmin(pub AuthUser);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        require_role(parts, state, UserRole::Admin).await.map(RequireAdmin)
    }
}

/// Endpoints an employee acts on for themselves (meeting and leave
/// requests).
pub struct RequireEmployee(pub AuthUser);

impl FromRequestParts<AppState> for RequireEmployee {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        require_role(parts, state, UserRole::Employee)
            .await
            .map(RequireEmployee)
    }
}

/// Any signed-in user, unassigned ones included.
pub struct RequireAuth(pub AuthUser);

impl FromRequestParts<AppState> for RequireAuth {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        AuthUser::from_request_parts(parts, state).await.map(RequireAuth)
    }
}
