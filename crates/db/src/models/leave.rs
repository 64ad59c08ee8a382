//! Leave types, requests, and balances.

use hrm_core::status::StatusId;
use hrm_core::types::{Date, DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

// ---------------------------------------------------------------------------
// Leave types
// ---------------------------------------------------------------------------

/// A row from the `leave_types` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct LeaveType {
    pub id: DbId,
    pub name: String,
    pub default_days: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a leave type.
#[derive(Debug, Deserialize)]
pub struct CreateLeaveType {
    pub name: String,
    #[serde(default)]
    pub default_days: i32,
}

/// DTO for updating a leave type. All fields are optional.
#[derive(Debug, Deserialize)]
pub struct UpdateLeaveType {
    pub name: Option<String>,
    pub default_days: Option<i32>,
}

// ---------------------------------------------------------------------------
// Leave requests
// ---------------------------------------------------------------------------

/// A row from `leave_requests` with the employee name, leave type name,
/// status label, and inclusive day count joined in.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct LeaveRequest {
    pub id: DbId,
    pub employee_id: DbId,
    pub employee_name: String,
    pub leave_type_id: DbId,
    pub leave_type: String,
    pub start_date: Date,
    pub end_date: Date,
    pub days: i32,
    pub reason: Option<String>,
    pub status_id: StatusId,
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for submitting a leave request.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateLeaveRequest {
    pub employee_id: DbId,
    pub leave_type_id: DbId,
    pub start_date: Date,
    pub end_date: Date,
    pub reason: Option<String>,
}

// ---------------------------------------------------------------------------
// Leave balances
// ---------------------------------------------------------------------------

/// A row from `leave_balances` with the leave type name joined in.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct LeaveBalance {
    pub id: DbId,
    pub employee_id: DbId,
    pub leave_type_id: DbId,
    pub leave_type: String,
    pub remaining_days: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for setting an employee's remaining days for a leave type.
#[derive(Debug, Deserialize)]
pub struct UpsertLeaveBalance {
    pub employee_id: DbId,
    pub leave_type_id: DbId,
    pub remaining_days: i32,
}
