//! Repository for the `employees` table.

use hrm_core::types::DbId;
use sqlx::PgPool;

use crate::models::employee::{CreateEmployee, Employee, UpdateEmployee};

fn select_from(source: &str) -> String {
    format!(
        "SELECT e.id, e.user_id, u.full_name, u.email, e.job_title, e.department, \
                e.salary_cents, e.hire_date, e.phone, e.created_at, e.updated_at
         FROM {source} e
         JOIN users u ON u.id = e.user_id"
    )
}

/// Provides CRUD operations for employees.
pub struct EmployeeRepo;

impl EmployeeRepo {
    /// Insert a new employee row, returning it with the user's details.
    ///
    /// Fails with a `uq_user_extension` violation if the user already has
    /// an employee or admin row.
    pub async fn create(pool: &PgPool, input: &CreateEmployee) -> Result<Employee, sqlx::Error> {
        let query = format!(
            "WITH inserted AS (
                INSERT INTO employees (user_id, job_title, department, salary_cents, hire_date, phone)
                VALUES ($1, $2, $3, $4, $5, $6)
                RETURNING *
             ) {}",
            select_from("inserted")
        );
        sqlx::query_as::<_, Employee>(&query)
            .bind(input.user_id)
            .bind(&input.job_title)
            .bind(&input.department)
            .bind(input.salary_cents)
            .bind(input.hire_date)
            .bind(&input.phone)
            .fetch_one(pool)
            .await
    }

    /// Find an employee by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Employee>, sqlx::Error> {
        let query = format!("{} WHERE e.id = $1", select_from("employees"));
        sqlx::query_as::<_, Employee>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find the employee row owned by a user.
    pub async fn find_by_user_id(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Option<Employee>, sqlx::Error> {
        let query = format!("{} WHERE e.user_id = $1", select_from("employees"));
        sqlx::query_as::<_, Employee>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// List all employees ordered by name.
    pub async fn list(pool: &PgPool) -> Result<Vec<Employee>, sqlx::Error> {
        let query = format!("{} ORDER BY u.full_name ASC, e.id ASC", select_from("employees"));
        sqlx::query_as::<_, Employee>(&query).fetch_all(pool).await
    }

    /// Update an employee. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateEmployee,
    ) -> Result<Option<Employee>, sqlx::Error> {
        let query = format!(
            "WITH updated AS (
                UPDATE employees SET
                    job_title = COALESCE($2, job_title),
                    department = COALESCE($3, department),
                    salary_cents = COALESCE($4, salary_cents),
                    hire_date = COALESCE($5, hire_date),
                    phone = COALESCE($6, phone)
                WHERE id = $1
                RETURNING *
             ) {}",
            select_from("updated")
        );
        sqlx::query_as::<_, Employee>(&query)
            .bind(id)
            .bind(&input.job_title)
            .bind(&input.department)
            .bind(input.salary_cents)
            .bind(input.hire_date)
            .bind(&input.phone)
            .fetch_optional(pool)
            .await
    }

    /// Delete an employee row. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM employees WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
