//! Handlers for leave types, leave requests and leave balances.
//!
//! Approving a request debits the employee's balance for that leave type
//! by the inclusive day count; reopening an approved request credits it
//! back. The status write and the balance write are separate statements.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use hrm_core::error::CoreError;
use hrm_core::leave::{
    balance_delta, ensure_sufficient_balance, requested_days, validate_remaining_days,
};
use hrm_core::status::{resolve, LeaveStatus};
use hrm_core::types::{Date, DbId};
use hrm_core::workflow::ensure_transition;
use hrm_db::models::leave::{
    CreateLeaveRequest, CreateLeaveType, LeaveBalance, LeaveRequest, LeaveType, UpdateLeaveType,
    UpsertLeaveBalance,
};
use hrm_db::repositories::{LeaveBalanceRepo, LeaveRequestRepo, LeaveTypeRepo};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::handlers::employees::{caller_employee, ensure_self_or_admin, find_employee};
use crate::middleware::rbac::{RequireAdmin, RequireAuth, RequireEmployee};
use crate::query::StatusFilter;
use crate::response::DataResponse;
use crate::state::AppState;

/* --------------------------------------------------------------------------
Leave types
-------------------------------------------------------------------------- */

fn leave_type_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "LeaveType",
        id,
    })
}

fn validate_leave_type_name(name: &str) -> AppResult<()> {
    if name.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "name must not be empty".into(),
        )));
    }
    Ok(())
}

/// POST /api/v1/leave-types
pub async fn create_leave_type(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Json(input): Json<CreateLeaveType>,
) -> AppResult<(StatusCode, Json<DataResponse<LeaveType>>)> {
    validate_leave_type_name(&input.name)?;
    validate_remaining_days(input.default_days)?;

    let leave_type = LeaveTypeRepo::create(&state.pool, &input).await?;
    tracing::info!(leave_type_id = leave_type.id, name = %leave_type.name, "Leave type created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: leave_type })))
}

/// GET /api/v1/leave-types
pub async fn list_leave_types(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
) -> AppResult<Json<DataResponse<Vec<LeaveType>>>> {
    let leave_types = LeaveTypeRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: leave_types }))
}

/// GET /api/v1/leave-types/{id}
pub async fn get_leave_type(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<LeaveType>>> {
    let leave_type = LeaveTypeRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| leave_type_not_found(id))?;
    Ok(Json(DataResponse { data: leave_type }))
}

/// PUT /api/v1/leave-types/{id}
pub async fn update_leave_type(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateLeaveType>,
) -> AppResult<Json<DataResponse<LeaveType>>> {
    if let Some(name) = &input.name {
        validate_leave_type_name(name)?;
    }
    if let Some(days) = input.default_days {
        validate_remaining_days(days)?;
    }

    let leave_type = LeaveTypeRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| leave_type_not_found(id))?;
    Ok(Json(DataResponse { data: leave_type }))
}

/// DELETE /api/v1/leave-types/{id}
///
/// A type still referenced by requests or balances is a 409.
pub async fn delete_leave_type(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !LeaveTypeRepo::delete(&state.pool, id).await? {
        return Err(leave_type_not_found(id));
    }
    tracing::info!(leave_type_id = id, "Leave type deleted");
    Ok(StatusCode::NO_CONTENT)
}

/* --------------------------------------------------------------------------
Leave requests
-------------------------------------------------------------------------- */

#[derive(Debug, Deserialize)]
pub struct SubmitLeaveRequest {
    pub leave_type_id: DbId,
    pub start_date: Date,
    pub end_date: Date,
    pub reason: Option<String>,
}

fn request_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "LeaveRequest",
        id,
    })
}

/// Move a request to `next`, applying the balance change that goes with it.
///
/// A debit is checked against the current balance before anything is
/// written. With no balance row for the leave type, no balance is touched.
async fn transition_request(
    state: &AppState,
    id: DbId,
    next: LeaveStatus,
) -> AppResult<LeaveRequest> {
    let existing = LeaveRequestRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| request_not_found(id))?;
    let current = resolve(existing.status_id, LeaveStatus::from_id, "leave status")?;
    ensure_transition(current, next)?;

    let delta = balance_delta(current, next, existing.days);
    if delta < 0 {
        let balance =
            LeaveBalanceRepo::find(&state.pool, existing.employee_id, existing.leave_type_id)
                .await?;
        if let Some(balance) = balance {
            ensure_sufficient_balance(balance.remaining_days, existing.days)?;
        }
    }

    let updated = LeaveRequestRepo::set_status(&state.pool, id, next.id())
        .await?
        .ok_or_else(|| request_not_found(id))?;

    if delta != 0 {
        let adjusted = LeaveBalanceRepo::adjust(
            &state.pool,
            existing.employee_id,
            existing.leave_type_id,
            delta,
        )
        .await?;
        match adjusted {
            Some(balance) => tracing::info!(
                employee_id = existing.employee_id,
                leave_type_id = existing.leave_type_id,
                delta,
                remaining_days = balance.remaining_days,
                "Leave balance adjusted",
            ),
            None => tracing::warn!(
                leave_request_id = id,
                employee_id = existing.employee_id,
                leave_type_id = existing.leave_type_id,
                delta,
                "Leave balance not adjusted: no balance row for this leave type",
            ),
        }
    }

    tracing::info!(leave_request_id = id, from = %current, to = %next, "Leave request status changed");
    Ok(updated)
}

/// POST /api/v1/leave-requests
pub async fn create_leave_request(
    State(state): State<AppState>,
    RequireEmployee(user): RequireEmployee,
    Json(input): Json<SubmitLeaveRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<LeaveRequest>>)> {
    let days = requested_days(input.start_date, input.end_date)?;
    let employee = caller_employee(&state, &user).await?;
    LeaveTypeRepo::find_by_id(&state.pool, input.leave_type_id)
        .await?
        .ok_or_else(|| leave_type_not_found(input.leave_type_id))?;

    let request = LeaveRequestRepo::create(
        &state.pool,
        &CreateLeaveRequest {
            employee_id: employee.id,
            leave_type_id: input.leave_type_id,
            start_date: input.start_date,
            end_date: input.end_date,
            reason: input.reason,
        },
    )
    .await?;

    tracing::info!(
        leave_request_id = request.id,
        employee_id = employee.id,
        days,
        "Leave requested",
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: request })))
}

/// GET /api/v1/leave-requests?status=
pub async fn list_leave_requests(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Query(filter): Query<StatusFilter>,
) -> AppResult<Json<DataResponse<Vec<LeaveRequest>>>> {
    let status = filter.parse_with(LeaveStatus::parse)?;
    let requests = LeaveRequestRepo::list(&state.pool, status.map(LeaveStatus::id)).await?;
    Ok(Json(DataResponse { data: requests }))
}

/// GET /api/v1/leave-requests/employee/{id}
pub async fn list_by_employee(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(employee_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<LeaveRequest>>>> {
    ensure_self_or_admin(&state, &user, employee_id).await?;
    let requests = LeaveRequestRepo::list_by_employee(&state.pool, employee_id).await?;
    Ok(Json(DataResponse { data: requests }))
}

/// GET /api/v1/leave-requests/{id}
pub async fn get_leave_request(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<LeaveRequest>>> {
    let request = LeaveRequestRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| request_not_found(id))?;
    ensure_self_or_admin(&state, &user, request.employee_id).await?;
    Ok(Json(DataResponse { data: request }))
}

/// PUT /api/v1/leave-requests/{id}/approve
pub async fn approve_leave_request(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<LeaveRequest>>> {
    let request = transition_request(&state, id, LeaveStatus::Approved).await?;
    Ok(Json(DataResponse { data: request }))
}

/// PUT /api/v1/leave-requests/{id}/reject
pub async fn reject_leave_request(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<LeaveRequest>>> {
    let request = transition_request(&state, id, LeaveStatus::Rejected).await?;
    Ok(Json(DataResponse { data: request }))
}

/// PUT /api/v1/leave-requests/{id}/pending
pub async fn reopen_leave_request(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<LeaveRequest>>> {
    let request = transition_request(&state, id, LeaveStatus::Pending).await?;
    Ok(Json(DataResponse { data: request }))
}

/// DELETE /api/v1/leave-requests/{id}
///
/// Deleting does not credit back an approved request's days.
pub async fn delete_leave_request(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !LeaveRequestRepo::delete(&state.pool, id).await? {
        return Err(request_not_found(id));
    }
    tracing::info!(leave_request_id = id, "Leave request deleted");
    Ok(StatusCode::NO_CONTENT)
}

/* --------------------------------------------------------------------------
Leave balances
-------------------------------------------------------------------------- */

/// GET /api/v1/leave-balances/employee/{id}
pub async fn list_balances(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(employee_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<LeaveBalance>>>> {
    ensure_self_or_admin(&state, &user, employee_id).await?;
    let balances = LeaveBalanceRepo::list_by_employee(&state.pool, employee_id).await?;
    Ok(Json(DataResponse { data: balances }))
}

/// PUT /api/v1/leave-balances
///
/// Set the remaining days an employee holds for one leave type.
pub async fn upsert_balance(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Json(input): Json<UpsertLeaveBalance>,
) -> AppResult<Json<DataResponse<LeaveBalance>>> {
    validate_remaining_days(input.remaining_days)?;
    find_employee(&state, input.employee_id).await?;
    LeaveTypeRepo::find_by_id(&state.pool, input.leave_type_id)
        .await?
        .ok_or_else(|| leave_type_not_found(input.leave_type_id))?;

    let balance = LeaveBalanceRepo::upsert(&state.pool, &input).await?;
    tracing::info!(
        employee_id = balance.employee_id,
        leave_type_id = balance.leave_type_id,
        remaining_days = balance.remaining_days,
        "Leave balance set",
    );
    Ok(Json(DataResponse { data: balance }))
}
