//! Handlers for the `/pay-cycles` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use hrm_core::error::CoreError;
use hrm_core::payroll::validate_pay_cycle;
use hrm_core::types::DbId;
use hrm_db::models::pay_cycle::{CreatePayCycle, PayCycle, UpdatePayCycle};
use hrm_db::repositories::PayCycleRepo;

use crate::error::{AppError, AppResult};
use crate::handlers::employees::{ensure_self_or_admin, find_employee};
use crate::middleware::rbac::{RequireAdmin, RequireAuth};
use crate::response::DataResponse;
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "PayCycle",
        id,
    })
}

async fn find_pay_cycle(state: &AppState, id: DbId) -> AppResult<PayCycle> {
    PayCycleRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))
}

/// POST /api/v1/pay-cycles
pub async fn create_pay_cycle(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Json(input): Json<CreatePayCycle>,
) -> AppResult<(StatusCode, Json<DataResponse<PayCycle>>)> {
    validate_pay_cycle(
        input.period_start,
        input.period_end,
        input.gross_cents,
        input.net_cents,
    )?;
    find_employee(&state, input.employee_id).await?;

    let cycle = PayCycleRepo::create(&state.pool, &input).await?;
    tracing::info!(pay_cycle_id = cycle.id, employee_id = cycle.employee_id, "Pay cycle created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: cycle })))
}

/// GET /api/v1/pay-cycles
pub async fn list_pay_cycles(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> AppResult<Json<DataResponse<Vec<PayCycle>>>> {
    let cycles = PayCycleRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: cycles }))
}

/// GET /api/v1/pay-cycles/employee/{id}
///
/// Admins see any employee's cycles; employees only their own.
pub async fn list_by_employee(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(employee_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<PayCycle>>>> {
    ensure_self_or_admin(&state, &user, employee_id).await?;
    let cycles = PayCycleRepo::list_by_employee(&state.pool, employee_id).await?;
    Ok(Json(DataResponse { data: cycles }))
}

/// GET /api/v1/pay-cycles/{id}
pub async fn get_pay_cycle(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<PayCycle>>> {
    let cycle = find_pay_cycle(&state, id).await?;
    ensure_self_or_admin(&state, &user, cycle.employee_id).await?;
    Ok(Json(DataResponse { data: cycle }))
}

/// PUT /api/v1/pay-cycles/{id}
///
/// Omitted fields keep their stored values; the merged cycle is validated.
pub async fn update_pay_cycle(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<UpdatePayCycle>,
) -> AppResult<Json<DataResponse<PayCycle>>> {
    let existing = find_pay_cycle(&state, id).await?;
    validate_pay_cycle(
        input.period_start.unwrap_or(existing.period_start),
        input.period_end.unwrap_or(existing.period_end),
        input.gross_cents.unwrap_or(existing.gross_cents),
        input.net_cents.unwrap_or(existing.net_cents),
    )?;

    let cycle = PayCycleRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse { data: cycle }))
}

/// PUT /api/v1/pay-cycles/{id}/paid
pub async fn mark_paid(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<PayCycle>>> {
    let cycle = PayCycleRepo::mark_paid(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    tracing::info!(pay_cycle_id = id, "Pay cycle marked paid");
    Ok(Json(DataResponse { data: cycle }))
}

/// DELETE /api/v1/pay-cycles/{id}
pub async fn delete_pay_cycle(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !PayCycleRepo::delete(&state.pool, id).await? {
        return Err(not_found(id));
    }
    tracing::info!(pay_cycle_id = id, "Pay cycle deleted");
    Ok(StatusCode::NO_CONTENT)
}
