//! Handlers for the `/employees` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use hrm_core::error::CoreError;
use hrm_core::payroll::validate_salary;
use hrm_core::roles::UserRole;
use hrm_core::types::DbId;
use hrm_db::models::employee::{CreateEmployee, Employee, UpdateEmployee};
use hrm_db::repositories::EmployeeRepo;

use crate::error::{AppError, AppResult};
use crate::handlers::users::find_linkable_user;
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::{RequireAdmin, RequireAuth};
use crate::response::DataResponse;
use crate::state::AppState;

/* --------------------------------------------------------------------------
Helpers
-------------------------------------------------------------------------- */

/// Load an employee or fail with 404.
pub(crate) async fn find_employee(state: &AppState, id: DbId) -> AppResult<Employee> {
    EmployeeRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Employee",
            id,
        }))
}

/// The employee record owned by the calling user.
pub(crate) async fn caller_employee(state: &AppState, user: &AuthUser) -> AppResult<Employee> {
    EmployeeRepo::find_by_user_id(&state.pool, user.user_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Forbidden(
                "No employee record is linked to this user".into(),
            ))
        })
}

/// Admins may read any employee's records; employees only their own.
pub(crate) async fn ensure_self_or_admin(
    state: &AppState,
    user: &AuthUser,
    employee_id: DbId,
) -> AppResult<()> {
    if user.is_admin() {
        return Ok(());
    }
    let own = EmployeeRepo::find_by_user_id(&state.pool, user.user_id).await?;
    match own {
        Some(employee) if employee.id == employee_id => Ok(()),
        _ => Err(AppError::Core(CoreError::Forbidden(
            "Employees may only access their own records".into(),
        ))),
    }
}

/* --------------------------------------------------------------------------
Handlers
-------------------------------------------------------------------------- */

/// POST /api/v1/employees
///
/// Link an employee record to a user whose role is already `employee` and
/// who owns no extension row yet.
pub async fn create_employee(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Json(input): Json<CreateEmployee>,
) -> AppResult<(StatusCode, Json<DataResponse<Employee>>)> {
    validate_salary(input.salary_cents)?;

    let user = find_linkable_user(&state, input.user_id, UserRole::Employee).await?;

    let employee = EmployeeRepo::create(&state.pool, &input).await?;
    tracing::info!(employee_id = employee.id, user_id = user.id, "Employee created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: employee })))
}

/// GET /api/v1/employees
pub async fn list_employees(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
) -> AppResult<Json<DataResponse<Vec<Employee>>>> {
    let employees = EmployeeRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: employees }))
}

/// GET /api/v1/employees/{id}
pub async fn get_employee(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Employee>>> {
    let employee = find_employee(&state, id).await?;
    Ok(Json(DataResponse { data: employee }))
}

/// PUT /api/v1/employees/{id}
pub async fn update_employee(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateEmployee>,
) -> AppResult<Json<DataResponse<Employee>>> {
    if let Some(salary) = input.salary_cents {
        validate_salary(salary)?;
    }

    let employee = EmployeeRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Employee",
            id,
        }))?;
    Ok(Json(DataResponse { data: employee }))
}

/// DELETE /api/v1/employees/{id}
pub async fn delete_employee(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !EmployeeRepo::delete(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Employee",
            id,
        }));
    }
    tracing::info!(employee_id = id, "Employee deleted");
    Ok(StatusCode::NO_CONTENT)
}
