//! `/auth`: self-registration and the access/refresh token lifecycle.
//!
//! Registration only creates an account. Which role it ends up with, and
//! whether an employee or admin record is attached, is decided by an admin
//! through `/users` and `/employees` / `/admins`.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use hrm_core::error::CoreError;
use hrm_core::roles::UserRole;
use hrm_core::status::resolve;
use hrm_core::types::DbId;
use hrm_db::models::session::NewSession;
use hrm_db::models::user::{CreateUser, User, UserResponse};
use hrm_db::repositories::{SessionRepo, UserRepo};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::auth::jwt::RefreshToken;
use crate::auth::password::{hash_password, validate_password, verify_password};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 200))]
    pub full_name: String,
    #[validate(email)]
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Body of a successful login or refresh.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    /// Seconds until `access_token` expires.
    pub expires_in: i64,
    pub user: UserResponse,
}

fn unauthorized(message: &str) -> AppError {
    AppError::Core(CoreError::Unauthorized(message.to_string()))
}

pub(crate) fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

pub(crate) async fn find_user(state: &AppState, id: DbId) -> AppResult<User> {
    UserRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))
}

/// Sign an access token for `user` and pair it with `refresh`.
fn auth_response(state: &AppState, user: &User, refresh: RefreshToken) -> AppResult<AuthResponse> {
    let jwt = &state.config.jwt;
    let role = resolve(user.role_id, UserRole::from_id, "role")?;
    let access_token = jwt
        .issue_access_token(user.id, role)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    Ok(AuthResponse {
        access_token,
        refresh_token: refresh.plaintext,
        expires_in: jwt.access_ttl().num_seconds(),
        user: UserResponse::from(user),
    })
}

/// POST /api/v1/auth/register
///
/// The account starts unassigned and unverified.
pub async fn register(
    State(state): State<AppState>,
    Json(input): Json<RegisterRequest>,
) -> AppResult<(StatusCode, Json<UserResponse>)> {
    input.validate()?;
    validate_password(&input.password)?;

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            full_name: input.full_name.trim().to_string(),
            email: normalize_email(&input.email),
            password_hash,
        },
    )
    .await?;

    tracing::info!(user_id = user.id, "User registered");
    Ok((StatusCode::CREATED, Json(UserResponse::from(&user))))
}

/// POST /api/v1/auth/login
///
/// Unknown email and wrong password are indistinguishable to the caller.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    const REJECTED: &str = "Invalid email or password";

    let user = UserRepo::find_by_email(&state.pool, &normalize_email(&input.email))
        .await?
        .ok_or_else(|| unauthorized(REJECTED))?;

    let matches = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !matches {
        tracing::warn!(user_id = user.id, "Failed login attempt");
        return Err(unauthorized(REJECTED));
    }

    let refresh = RefreshToken::generate();
    SessionRepo::create(
        &state.pool,
        &NewSession {
            user_id: user.id,
            refresh_token_hash: refresh.hash.clone(),
            expires_at: Utc::now() + state.config.jwt.refresh_ttl(),
        },
    )
    .await?;

    tracing::info!(user_id = user.id, role = %user.role, "User logged in");
    Ok(Json(auth_response(&state, &user, refresh)?))
}

/// POST /api/v1/auth/refresh
///
/// Single-use refresh tokens: the presented session is revoked and a new
/// one issued, so replaying a token is a 401. The access token carries the
/// user's current role, which is how role changes reach existing sessions.
pub async fn refresh(
    State(state): State<AppState>,
    Json(input): Json<RefreshRequest>,
) -> AppResult<Json<AuthResponse>> {
    let next = RefreshToken::generate();
    let session = SessionRepo::rotate(
        &state.pool,
        &RefreshToken::digest(&input.refresh_token),
        &next.hash,
        Utc::now() + state.config.jwt.refresh_ttl(),
    )
    .await?
    .ok_or_else(|| unauthorized("Invalid or expired refresh token"))?;

    let user = UserRepo::find_by_id(&state.pool, session.user_id)
        .await?
        .ok_or_else(|| unauthorized("User no longer exists"))?;

    Ok(Json(auth_response(&state, &user, next)?))
}

/// POST /api/v1/auth/logout
///
/// Revokes every refresh session of the caller. Access tokens already
/// issued stay valid until they expire.
pub async fn logout(State(state): State<AppState>, user: AuthUser) -> AppResult<StatusCode> {
    let revoked = SessionRepo::revoke_all_for_user(&state.pool, user.user_id).await?;
    tracing::info!(user_id = user.user_id, revoked, "User logged out");
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emails_are_trimmed_and_lowercased() {
        assert_eq!(normalize_email("  Ada@Example.COM "), "ada@example.com");
    }
}
