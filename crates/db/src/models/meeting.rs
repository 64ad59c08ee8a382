//! Meeting request rows and DTOs.

use hrm_core::status::StatusId;
use hrm_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from `meetings` with display names and the status label joined in.
/// `admin_id` and `admin_name` stay empty until an admin confirms.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Meeting {
    pub id: DbId,
    pub employee_id: DbId,
    pub employee_name: String,
    pub admin_id: Option<DbId>,
    pub admin_name: Option<String>,
    pub purpose: String,
    pub start_time: Option<Timestamp>,
    pub end_time: Option<Timestamp>,
    pub location: Option<String>,
    pub is_online: bool,
    pub meeting_link: Option<String>,
    pub calendar_event_id: Option<String>,
    pub status_id: StatusId,
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for a new employee-initiated request.
#[derive(Debug, Clone)]
pub struct CreateMeeting {
    pub employee_id: DbId,
    pub purpose: String,
    pub start_time: Option<Timestamp>,
    pub end_time: Option<Timestamp>,
}

/// Schedule details an admin supplies when confirming.
#[derive(Debug, Clone)]
pub struct ConfirmMeeting {
    pub admin_id: DbId,
    pub start_time: Timestamp,
    pub end_time: Timestamp,
    pub location: Option<String>,
    pub is_online: bool,
    pub meeting_link: Option<String>,
}
