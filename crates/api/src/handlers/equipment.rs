//! Handlers for equipment categories and equipment items, including
//! assignment to employees.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use hrm_core::equipment::validate_condition;
use hrm_core::error::CoreError;
use hrm_core::types::DbId;
use hrm_db::models::equipment::{
    CreateEquipment, CreateEquipmentCategory, Equipment, EquipmentCategory, UpdateEquipment,
    UpdateEquipmentCategory,
};
use hrm_db::repositories::{EquipmentCategoryRepo, EquipmentRepo};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::handlers::employees::find_employee;
use crate::middleware::rbac::{RequireAdmin, RequireAuth};
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AssignRequest {
    pub employee_id: DbId,
}

fn category_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "EquipmentCategory",
        id,
    })
}

fn equipment_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Equipment",
        id,
    })
}

fn require_non_empty(field: &str, value: &str) -> AppResult<()> {
    if value.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(format!(
            "{field} must not be empty"
        ))));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Categories
// ---------------------------------------------------------------------------

/// POST /api/v1/equipment-categories
pub async fn create_category(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Json(input): Json<CreateEquipmentCategory>,
) -> AppResult<(StatusCode, Json<DataResponse<EquipmentCategory>>)> {
    require_non_empty("name", &input.name)?;
    let category = EquipmentCategoryRepo::create(&state.pool, &input).await?;
    tracing::info!(category_id = category.id, name = %category.name, "Equipment category created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: category })))
}

/// GET /api/v1/equipment-categories
pub async fn list_categories(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
) -> AppResult<Json<DataResponse<Vec<EquipmentCategory>>>> {
    let categories = EquipmentCategoryRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: categories }))
}

/// GET /api/v1/equipment-categories/{id}
pub async fn get_category(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<EquipmentCategory>>> {
    let category = EquipmentCategoryRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| category_not_found(id))?;
    Ok(Json(DataResponse { data: category }))
}

/// PUT /api/v1/equipment-categories/{id}
pub async fn update_category(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateEquipmentCategory>,
) -> AppResult<Json<DataResponse<EquipmentCategory>>> {
    if let Some(name) = &input.name {
        require_non_empty("name", name)?;
    }
    let category = EquipmentCategoryRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| category_not_found(id))?;
    Ok(Json(DataResponse { data: category }))
}

/// DELETE /api/v1/equipment-categories/{id}
pub async fn delete_category(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !EquipmentCategoryRepo::delete(&state.pool, id).await? {
        return Err(category_not_found(id));
    }
    tracing::info!(category_id = id, "Equipment category deleted");
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Equipment
// ---------------------------------------------------------------------------

/// POST /api/v1/equipment
pub async fn create_equipment(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Json(input): Json<CreateEquipment>,
) -> AppResult<(StatusCode, Json<DataResponse<Equipment>>)> {
    require_non_empty("name", &input.name)?;
    require_non_empty("serial_number", &input.serial_number)?;
    if let Some(condition) = &input.condition {
        validate_condition(condition)?;
    }

    let equipment = EquipmentRepo::create(&state.pool, &input).await?;
    tracing::info!(
        equipment_id = equipment.id,
        serial_number = %equipment.serial_number,
        "Equipment created",
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: equipment })))
}

/// GET /api/v1/equipment
pub async fn list_equipment(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
) -> AppResult<Json<DataResponse<Vec<Equipment>>>> {
    let equipment = EquipmentRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: equipment }))
}

/// GET /api/v1/equipment/employee/{id}
pub async fn list_by_employee(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path(employee_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<Equipment>>>> {
    let equipment = EquipmentRepo::list_by_employee(&state.pool, employee_id).await?;
    Ok(Json(DataResponse { data: equipment }))
}

/// GET /api/v1/equipment/{id}
pub async fn get_equipment(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Equipment>>> {
    let equipment = EquipmentRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| equipment_not_found(id))?;
    Ok(Json(DataResponse { data: equipment }))
}

/// PUT /api/v1/equipment/{id}
pub async fn update_equipment(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateEquipment>,
) -> AppResult<Json<DataResponse<Equipment>>> {
    if let Some(condition) = &input.condition {
        validate_condition(condition)?;
    }
    let equipment = EquipmentRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| equipment_not_found(id))?;
    Ok(Json(DataResponse { data: equipment }))
}

/// PUT /api/v1/equipment/{id}/assign
pub async fn assign_equipment(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<AssignRequest>,
) -> AppResult<Json<DataResponse<Equipment>>> {
    find_employee(&state, input.employee_id).await?;
    let equipment = EquipmentRepo::assign(&state.pool, id, input.employee_id)
        .await?
        .ok_or_else(|| equipment_not_found(id))?;
    tracing::info!(equipment_id = id, employee_id = input.employee_id, "Equipment assigned");
    Ok(Json(DataResponse { data: equipment }))
}

/// PUT /api/v1/equipment/{id}/unassign
pub async fn unassign_equipment(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Equipment>>> {
    let equipment = EquipmentRepo::unassign(&state.pool, id)
        .await?
        .ok_or_else(|| equipment_not_found(id))?;
    tracing::info!(equipment_id = id, "Equipment unassigned");
    Ok(Json(DataResponse { data: equipment }))
}

/// DELETE /api/v1/equipment/{id}
pub async fn delete_equipment(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !EquipmentRepo::delete(&state.pool, id).await? {
        return Err(equipment_not_found(id));
    }
    tracing::info!(equipment_id = id, "Equipment deleted");
    Ok(StatusCode::NO_CONTENT)
}
