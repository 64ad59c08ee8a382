//! Repository for the `leave_types` table.

use hrm_core::types::DbId;
use sqlx::PgPool;

use crate::models::leave::{CreateLeaveType, LeaveType, UpdateLeaveType};

const COLUMNS: &str = "id, name, default_days, created_at, updated_at";

/// Provides CRUD operations for leave types.
pub struct LeaveTypeRepo;

impl LeaveTypeRepo {
    pub async fn create(pool: &PgPool, input: &CreateLeaveType) -> Result<LeaveType, sqlx::Error> {
        let query = format!(
            "INSERT INTO leave_types (name, default_days) VALUES ($1, $2) RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, LeaveType>(&query)
            .bind(&input.name)
            .bind(input.default_days)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<LeaveType>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM leave_types WHERE id = $1");
        sqlx::query_as::<_, LeaveType>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list(pool: &PgPool) -> Result<Vec<LeaveType>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM leave_types ORDER BY name ASC");
        sqlx::query_as::<_, LeaveType>(&query).fetch_all(pool).await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateLeaveType,
    ) -> Result<Option<LeaveType>, sqlx::Error> {
        let query = format!(
            "UPDATE leave_types SET
                name = COALESCE($2, name),
                default_days = COALESCE($3, default_days)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, LeaveType>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(input.default_days)
            .fetch_optional(pool)
            .await
    }

    /// Delete a leave type. Fails with a foreign key violation while any
    /// request still references it.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM leave_types WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
