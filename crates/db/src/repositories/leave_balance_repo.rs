//! Repository for the `leave_balances` table.
//!
//! A balance row is optional: an employee with no row for a leave type is
//! not tracked for that type.

use hrm_core::types::DbId;
use sqlx::PgPool;

use crate::models::leave::{LeaveBalance, UpsertLeaveBalance};

fn select_from(source: &str) -> String {
    format!(
        "SELECT lb.id, lb.employee_id, lb.leave_type_id, lt.name AS leave_type, \
                lb.remaining_days, lb.created_at, lb.updated_at
         FROM {source} lb
         JOIN leave_types lt ON lt.id = lb.leave_type_id"
    )
}

pub struct LeaveBalanceRepo;

impl LeaveBalanceRepo {
    /// The balance for one employee and leave type, if tracked.
    pub async fn find(
        pool: &PgPool,
        employee_id: DbId,
        leave_type_id: DbId,
    ) -> Result<Option<LeaveBalance>, sqlx::Error> {
        let query = format!(
            "{} WHERE lb.employee_id = $1 AND lb.leave_type_id = $2",
            select_from("leave_balances")
        );
        sqlx::query_as::<_, LeaveBalance>(&query)
            .bind(employee_id)
            .bind(leave_type_id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list_by_employee(
        pool: &PgPool,
        employee_id: DbId,
    ) -> Result<Vec<LeaveBalance>, sqlx::Error> {
        let query = format!(
            "{} WHERE lb.employee_id = $1 ORDER BY lt.name ASC",
            select_from("leave_balances")
        );
        sqlx::query_as::<_, LeaveBalance>(&query)
            .bind(employee_id)
            .fetch_all(pool)
            .await
    }

    /// Insert or replace the remaining days for one employee and type.
    pub async fn upsert(
        pool: &PgPool,
        input: &UpsertLeaveBalance,
    ) -> Result<LeaveBalance, sqlx::Error> {
        let query = format!(
            "WITH upserted AS (
                INSERT INTO leave_balances (employee_id, leave_type_id, remaining_days)
                VALUES ($1, $2, $3)
                ON CONFLICT ON CONSTRAINT uq_leave_balances_employee_type
                DO UPDATE SET remaining_days = EXCLUDED.remaining_days
                RETURNING *
             ) {}",
            select_from("upserted")
        );
        sqlx::query_as::<_, LeaveBalance>(&query)
            .bind(input.employee_id)
            .bind(input.leave_type_id)
            .bind(input.remaining_days)
            .fetch_one(pool)
            .await
    }

    /// Add `delta` (negative to deduct) to an existing balance.
    ///
    /// Returns `None` when the employee has no balance row for the type.
    pub async fn adjust(
        pool: &PgPool,
        employee_id: DbId,
        leave_type_id: DbId,
        delta: i32,
    ) -> Result<Option<LeaveBalance>, sqlx::Error> {
        let query = format!(
            "WITH updated AS (
                UPDATE leave_balances SET remaining_days = remaining_days + $3
                WHERE employee_id = $1 AND leave_type_id = $2
                RETURNING *
             ) {}",
            select_from("updated")
        );
        sqlx::query_as::<_, LeaveBalance>(&query)
            .bind(employee_id)
            .bind(leave_type_id)
            .bind(delta)
            .fetch_optional(pool)
            .await
    }
}
