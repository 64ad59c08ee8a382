//! Handlers for the `/users` resource: listing, role assignment, and the
//! registration-completion checks.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use hrm_core::error::CoreError;
use hrm_core::roles::UserRole;
use hrm_core::status::resolve;
use hrm_core::types::DbId;
use hrm_db::models::user::{User, UserResponse};
use hrm_db::repositories::UserRepo;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::handlers::auth::find_user;
use crate::middleware::rbac::{RequireAdmin, RequireAuth};
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `PUT /users/{id}/role`.
#[derive(Debug, Deserialize)]
pub struct SetRoleRequest {
    pub role: String,
}

/// Request body for `PUT /users/me/profile-picture`. `null` clears it.
#[derive(Debug, Deserialize, Validate)]
pub struct ProfilePictureRequest {
    #[validate(url)]
    pub profile_picture_url: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RoleResponse {
    pub user_id: DbId,
    pub role: UserRole,
}

#[derive(Debug, Serialize)]
pub struct AvailabilityResponse {
    pub user_id: DbId,
    /// `true` while the user is unassigned and owns no extension row.
    pub available: bool,
}

/// Load the user an extension row is about to be attached to.
///
/// The user must hold `role` and must not own an employee or admin row yet.
pub(crate) async fn find_linkable_user(
    state: &AppState,
    id: DbId,
    role: UserRole,
) -> AppResult<User> {
    let user = find_user(state, id).await?;
    if user.role_id != role.id() {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "User {} has role '{}'; an {role} record requires role '{role}'",
            user.id, user.role
        ))));
    }
    if UserRepo::has_extension_row(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "User {id} already has an employee or admin record"
        ))));
    }
    Ok(user)
}

/// GET /api/v1/users
pub async fn list_users(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> AppResult<Json<DataResponse<Vec<UserResponse>>>> {
    let users = UserRepo::list(&state.pool).await?;
    Ok(Json(DataResponse {
        data: users.iter().map(UserResponse::from).collect(),
    }))
}

/// GET /api/v1/users/unlinked
///
/// Users that own neither an employee nor an admin record yet.
pub async fn list_unlinked(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> AppResult<Json<DataResponse<Vec<UserResponse>>>> {
    let users = UserRepo::list_unlinked(&state.pool).await?;
    Ok(Json(DataResponse {
        data: users.iter().map(UserResponse::from).collect(),
    }))
}

/// GET /api/v1/users/{id}
pub async fn get_user(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<UserResponse>>> {
    let user = find_user(&state, id).await?;
    Ok(Json(DataResponse {
        data: UserResponse::from(&user),
    }))
}

/// GET /api/v1/users/{id}/role
pub async fn get_user_role(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<RoleResponse>>> {
    let role_id = UserRepo::get_role_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))?;
    let role = resolve(role_id, UserRole::from_id, "role")?;

    Ok(Json(DataResponse {
        data: RoleResponse { user_id: id, role },
    }))
}

/// PUT /api/v1/users/{id}/role
///
/// The role label is validated before anything is written. Existing
/// employee/admin rows are not reconciled.
pub async fn set_user_role(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<SetRoleRequest>,
) -> AppResult<Json<DataResponse<UserResponse>>> {
    let role = UserRole::parse(&input.role)?;

    let user = UserRepo::set_role(&state.pool, id, role.id())
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))?;

    tracing::info!(user_id = id, role = %role, by = admin.user_id, "User role set");
    Ok(Json(DataResponse {
        data: UserResponse::from(&user),
    }))
}

/// GET /api/v1/users/{id}/availability
///
/// Whether the user can still be turned into an employee or admin.
pub async fn get_availability(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<AvailabilityResponse>>> {
    let role_id = UserRepo::get_role_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))?;
    let role = resolve(role_id, UserRole::from_id, "role")?;

    let available = match role {
        UserRole::Unassigned => {
            role.registration_available(UserRepo::has_extension_row(&state.pool, id).await?)
        }
        UserRole::Employee | UserRole::Admin => false,
    };

    Ok(Json(DataResponse {
        data: AvailabilityResponse {
            user_id: id,
            available,
        },
    }))
}

/// POST /api/v1/users/{id}/verify
pub async fn verify_user(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !UserRepo::set_verified(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::NotFound { entity: "User", id }));
    }
    tracing::info!(user_id = id, "User verified");
    Ok(StatusCode::NO_CONTENT)
}

/// PUT /api/v1/users/me/profile-picture
pub async fn update_my_profile_picture(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Json(input): Json<ProfilePictureRequest>,
) -> AppResult<Json<DataResponse<UserResponse>>> {
    input.validate()?;

    let updated = UserRepo::update_profile_picture(
        &state.pool,
        user.user_id,
        input.profile_picture_url.as_deref(),
    )
    .await?
    .ok_or(AppError::Core(CoreError::NotFound {
        entity: "User",
        id: user.user_id,
    }))?;

    Ok(Json(DataResponse {
        data: UserResponse::from(&updated),
    }))
}
