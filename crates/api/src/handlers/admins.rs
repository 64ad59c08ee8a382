//! Handlers for the `/admins` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use hrm_core::error::CoreError;
use hrm_core::roles::UserRole;
use hrm_core::types::DbId;
use hrm_db::models::admin::{Admin, CreateAdmin, UpdateAdmin};
use hrm_db::repositories::AdminRepo;

use crate::error::{AppError, AppResult};
use crate::handlers::users::find_linkable_user;
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::{RequireAdmin, RequireAuth};
use crate::response::DataResponse;
use crate::state::AppState;

/// Load an admin record or fail with 404.
pub(crate) async fn find_admin(state: &AppState, id: DbId) -> AppResult<Admin> {
    AdminRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Admin", id }))
}

/// The admin record owned by the calling user.
pub(crate) async fn caller_admin(state: &AppState, user: &AuthUser) -> AppResult<Admin> {
    AdminRepo::find_by_user_id(&state.pool, user.user_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Forbidden(
                "No admin record is linked to this user".into(),
            ))
        })
}

/// POST /api/v1/admins
///
/// Link an admin record to a user whose role is already `admin` and who
/// owns no extension row yet.
pub async fn create_admin(
    State(state): State<AppState>,
    RequireAdmin(_caller): RequireAdmin,
    Json(input): Json<CreateAdmin>,
) -> AppResult<(StatusCode, Json<DataResponse<Admin>>)> {
    let user = find_linkable_user(&state, input.user_id, UserRole::Admin).await?;

    let admin = AdminRepo::create(&state.pool, &input).await?;
    tracing::info!(admin_id = admin.id, user_id = user.id, "Admin created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: admin })))
}

/// GET /api/v1/admins
pub async fn list_admins(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
) -> AppResult<Json<DataResponse<Vec<Admin>>>> {
    let admins = AdminRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: admins }))
}

/// GET /api/v1/admins/{id}
pub async fn get_admin(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Admin>>> {
    let admin = find_admin(&state, id).await?;
    Ok(Json(DataResponse { data: admin }))
}

/// PUT /api/v1/admins/{id}
pub async fn update_admin(
    State(state): State<AppState>,
    RequireAdmin(_caller): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateAdmin>,
) -> AppResult<Json<DataResponse<Admin>>> {
    let admin = AdminRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Admin", id }))?;
    Ok(Json(DataResponse { data: admin }))
}

/// DELETE /api/v1/admins/{id}
pub async fn delete_admin(
    State(state): State<AppState>,
    RequireAdmin(_caller): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !AdminRepo::delete(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::NotFound { entity: "Admin", id }));
    }
    tracing::info!(admin_id = id, "Admin deleted");
    Ok(StatusCode::NO_CONTENT)
}
