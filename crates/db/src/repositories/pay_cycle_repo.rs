//! Repository for the `pay_cycles` table.

use hrm_core::types::DbId;
use sqlx::PgPool;

use crate::models::pay_cycle::{CreatePayCycle, PayCycle, UpdatePayCycle};

const COLUMNS: &str = "id, employee_id, period_start, period_end, pay_date, gross_cents, \
                       net_cents, is_paid, created_at, updated_at";

pub struct PayCycleRepo;

impl PayCycleRepo {
    pub async fn create(pool: &PgPool, input: &CreatePayCycle) -> Result<PayCycle, sqlx::Error> {
        let query = format!(
            "INSERT INTO pay_cycles
                (employee_id, period_start, period_end, pay_date, gross_cents, net_cents)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PayCycle>(&query)
            .bind(input.employee_id)
            .bind(input.period_start)
            .bind(input.period_end)
            .bind(input.pay_date)
            .bind(input.gross_cents)
            .bind(input.net_cents)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<PayCycle>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM pay_cycles WHERE id = $1");
        sqlx::query_as::<_, PayCycle>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list(pool: &PgPool) -> Result<Vec<PayCycle>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM pay_cycles ORDER BY pay_date DESC, id DESC");
        sqlx::query_as::<_, PayCycle>(&query).fetch_all(pool).await
    }

    /// Pay history for one employee, most recent first.
    pub async fn list_by_employee(
        pool: &PgPool,
        employee_id: DbId,
    ) -> Result<Vec<PayCycle>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM pay_cycles WHERE employee_id = $1 \
             ORDER BY pay_date DESC, id DESC"
        );
        sqlx::query_as::<_, PayCycle>(&query)
            .bind(employee_id)
            .fetch_all(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdatePayCycle,
    ) -> Result<Option<PayCycle>, sqlx::Error> {
        let query = format!(
            "UPDATE pay_cycles SET
                period_start = COALESCE($2, period_start),
                period_end = COALESCE($3, period_end),
                pay_date = COALESCE($4, pay_date),
                gross_cents = COALESCE($5, gross_cents),
                net_cents = COALESCE($6, net_cents)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PayCycle>(&query)
            .bind(id)
            .bind(input.period_start)
            .bind(input.period_end)
            .bind(input.pay_date)
            .bind(input.gross_cents)
            .bind(input.net_cents)
            .fetch_optional(pool)
            .await
    }

    pub async fn mark_paid(pool: &PgPool, id: DbId) -> Result<Option<PayCycle>, sqlx::Error> {
        let query =
            format!("UPDATE pay_cycles SET is_paid = true WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, PayCycle>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM pay_cycles WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
