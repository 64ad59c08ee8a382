use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use hrm_calendar::CalendarError;
use hrm_core::error::CoreError;
use serde::Serialize;

/// Error type returned by every HTTP handler.
///
/// Domain failures arrive as [`CoreError`]; storage and calendar failures
/// keep their source error so the mapping below can inspect it.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error(transparent)]
    Calendar(#[from] CalendarError),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

pub type AppResult<T> = Result<T, AppError>;

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::Core(CoreError::Validation(errors.to_string()))
    }
}

/// JSON body of every error response: `{ "error": "...", "code": "..." }`.
#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
    code: &'static str,
}

const INTERNAL_MESSAGE: &str = "An internal error occurred";

/// Human-readable messages for the unique constraints a client can trip.
const UNIQUE_MESSAGES: &[(&str, &str)] = &[
    ("uq_users_email", "Email is already registered"),
    ("uq_employees_user_id", "User already has an employee record"),
    ("uq_admins_user_id", "User already has an admin record"),
    ("uq_user_extension", "User already has an employee or admin record"),
    ("uq_leave_types_name", "A leave type with this name already exists"),
    ("uq_leave_balances_employee_type", "Balance already exists for this leave type"),
    ("uq_equipment_categories_name", "An equipment category with this name already exists"),
    ("uq_equipment_serial_number", "Serial number is already registered"),
];

impl AppError {
    fn status_and_body(&self) -> (StatusCode, ErrorBody) {
        let (status, code, error) = match self {
            AppError::Core(core) => classify_core(core),
            AppError::Database(err) => classify_sqlx_error(err),
            AppError::Calendar(err) => classify_calendar_error(err),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                internal()
            }
        };
        (status, ErrorBody { error, code })
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = self.status_and_body();
        (status, Json(body)).into_response()
    }
}

fn internal() -> (StatusCode, &'static str, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        INTERNAL_MESSAGE.to_string(),
    )
}

fn classify_core(err: &CoreError) -> (StatusCode, &'static str, String) {
    match err {
        CoreError::NotFound { entity, id } => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            format!("{entity} with id {id} not found"),
        ),
        CoreError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
        CoreError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
        CoreError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone()),
        CoreError::Forbidden(msg) => (StatusCode::FORBIDDEN, "FORBIDDEN", msg.clone()),
        CoreError::Internal(msg) => {
            tracing::error!(error = %msg, "Internal core error");
            internal()
        }
    }
}

/// Map Postgres constraint violations onto client errors.
///
/// Unique violations on `uq_*` constraints and every foreign key violation
/// are 409; check violations are 400. Anything else is logged and hidden
/// behind a 500.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, &'static str, String) {
    let sqlx::Error::Database(db_err) = err else {
        if matches!(err, sqlx::Error::RowNotFound) {
            return (
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
                "Resource not found".to_string(),
            );
        }
        tracing::error!(error = %err, "Database error");
        return internal();
    };

    let constraint = db_err.constraint().unwrap_or("unknown");
    match db_err.code().as_deref() {
        Some("23505") if constraint.starts_with("uq_") => {
            let message = UNIQUE_MESSAGES
                .iter()
                .find(|(name, _)| *name == constraint)
                .map(|(_, message)| message.to_string())
                .unwrap_or_else(|| format!("Duplicate value violates {constraint}"));
            (StatusCode::CONFLICT, "CONFLICT", message)
        }
        Some("23503") => (
            StatusCode::CONFLICT,
            "CONFLICT",
            format!("Record is missing a referenced row or is still referenced ({constraint})"),
        ),
        Some("23514") => (
            StatusCode::BAD_REQUEST,
            "VALIDATION_ERROR",
            format!("Value violates check constraint: {constraint}"),
        ),
        _ => {
            tracing::error!(error = %db_err, "Database error");
            internal()
        }
    }
}

/// Provider "not found" is a 404; every other provider failure is a 400.
fn classify_calendar_error(err: &CalendarError) -> (StatusCode, &'static str, String) {
    match err {
        CalendarError::NotFound(id) => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            format!("Calendar event {id} not found"),
        ),
        other => {
            tracing::warn!(error = %other, "Calendar provider error");
            (StatusCode::BAD_REQUEST, "CALENDAR_ERROR", other.to_string())
        }
    }
}
