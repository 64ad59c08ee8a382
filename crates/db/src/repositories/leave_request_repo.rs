//! Repository for the `leave_requests` table.

use hrm_core::status::{LeaveStatus, StatusId};
use hrm_core::types::DbId;
use sqlx::PgPool;

use crate::models::leave::{CreateLeaveRequest, LeaveRequest};

const ORDER_BY: &str = "ORDER BY lr.start_date ASC, lr.id ASC";

fn select_from(source: &str) -> String {
    format!(
        "SELECT lr.id, lr.employee_id, u.full_name AS employee_name, \
                lr.leave_type_id, lt.name AS leave_type, lr.start_date, lr.end_date, \
                (lr.end_date - lr.start_date + 1) AS days, lr.reason, \
                lr.status_id, s.name AS status, lr.created_at, lr.updated_at
         FROM {source} lr
         JOIN employees e ON e.id = lr.employee_id
         JOIN users u ON u.id = e.user_id
         JOIN leave_types lt ON lt.id = lr.leave_type_id
         JOIN leave_statuses s ON s.id = lr.status_id"
    )
}

/// Provides CRUD and status operations for leave requests.
pub struct LeaveRequestRepo;

impl LeaveRequestRepo {
    /// Insert a new request with status `pending`.
    pub async fn create(
        pool: &PgPool,
        input: &CreateLeaveRequest,
    ) -> Result<LeaveRequest, sqlx::Error> {
        let query = format!(
            "WITH inserted AS (
                INSERT INTO leave_requests
                    (employee_id, leave_type_id, start_date, end_date, reason, status_id)
                VALUES ($1, $2, $3, $4, $5, $6)
                RETURNING *
             ) {}",
            select_from("inserted")
        );
        sqlx::query_as::<_, LeaveRequest>(&query)
            .bind(input.employee_id)
            .bind(input.leave_type_id)
            .bind(input.start_date)
            .bind(input.end_date)
            .bind(&input.reason)
            .bind(LeaveStatus::Pending.id())
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<LeaveRequest>, sqlx::Error> {
        let query = format!("{} WHERE lr.id = $1", select_from("leave_requests"));
        sqlx::query_as::<_, LeaveRequest>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List requests, optionally restricted to one status.
    pub async fn list(
        pool: &PgPool,
        status_id: Option<StatusId>,
    ) -> Result<Vec<LeaveRequest>, sqlx::Error> {
        let query = format!(
            "{} WHERE ($1::smallint IS NULL OR lr.status_id = $1) {ORDER_BY}",
            select_from("leave_requests")
        );
        sqlx::query_as::<_, LeaveRequest>(&query)
            .bind(status_id)
            .fetch_all(pool)
            .await
    }

    pub async fn list_by_employee(
        pool: &PgPool,
        employee_id: DbId,
    ) -> Result<Vec<LeaveRequest>, sqlx::Error> {
        let query = format!(
            "{} WHERE lr.employee_id = $1 {ORDER_BY}",
            select_from("leave_requests")
        );
        sqlx::query_as::<_, LeaveRequest>(&query)
            .bind(employee_id)
            .fetch_all(pool)
            .await
    }

    /// Set the status column. Returns `None` if the row does not exist.
    pub async fn set_status(
        pool: &PgPool,
        id: DbId,
        status_id: StatusId,
    ) -> Result<Option<LeaveRequest>, sqlx::Error> {
        let query = format!(
            "WITH updated AS (
                UPDATE leave_requests SET status_id = $2 WHERE id = $1 RETURNING *
             ) {}",
            select_from("updated")
        );
        sqlx::query_as::<_, LeaveRequest>(&query)
            .bind(id)
            .bind(status_id)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM leave_requests WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
