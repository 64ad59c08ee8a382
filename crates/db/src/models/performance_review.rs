//! Performance review (PRM) rows and DTOs.

use hrm_core::status::StatusId;
use hrm_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from `performance_reviews` with admin/employee display names and
/// the status label joined in.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PerformanceReview {
    pub id: DbId,
    pub admin_id: DbId,
    pub admin_name: String,
    pub employee_id: DbId,
    pub employee_name: String,
    pub start_time: Option<Timestamp>,
    pub end_time: Option<Timestamp>,
    pub location: Option<String>,
    pub is_online: bool,
    pub meeting_link: Option<String>,
    pub rating: Option<i16>,
    pub comment: Option<String>,
    pub document_url: Option<String>,
    pub calendar_event_id: Option<String>,
    pub status_id: StatusId,
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Every writable column of a review. Used for both insert and the
/// full-record overwrite.
#[derive(Debug, Clone)]
pub struct PerformanceReviewFields {
    pub admin_id: DbId,
    pub employee_id: DbId,
    pub start_time: Option<Timestamp>,
    pub end_time: Option<Timestamp>,
    pub location: Option<String>,
    pub is_online: bool,
    pub meeting_link: Option<String>,
    pub rating: Option<i16>,
    pub comment: Option<String>,
    pub document_url: Option<String>,
    pub status_id: StatusId,
}
