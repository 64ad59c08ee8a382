//! Repository for the `equipment` table.

use hrm_core::types::DbId;
use sqlx::PgPool;

use crate::models::equipment::{CreateEquipment, Equipment, UpdateEquipment};

fn select_from(source: &str) -> String {
    format!(
        "SELECT eq.id, eq.name, eq.serial_number, eq.condition, \
                eq.category_id, c.name AS category_name, \
                eq.employee_id, u.full_name AS employee_name, eq.assigned_at, \
                eq.created_at, eq.updated_at
         FROM {source} eq
         LEFT JOIN equipment_categories c ON c.id = eq.category_id
         LEFT JOIN employees e ON e.id = eq.employee_id
         LEFT JOIN users u ON u.id = e.user_id"
    )
}

/// Provides CRUD and assignment operations for equipment.
pub struct EquipmentRepo;

impl EquipmentRepo {
    /// Register an item. `condition` must already be validated; `None`
    /// falls back to the column default.
    pub async fn create(pool: &PgPool, input: &CreateEquipment) -> Result<Equipment, sqlx::Error> {
        let query = format!(
            "WITH inserted AS (
                INSERT INTO equipment (name, serial_number, condition, category_id)
                VALUES ($1, $2, COALESCE($3, 'good'), $4)
                RETURNING *
             ) {}",
            select_from("inserted")
        );
        sqlx::query_as::<_, Equipment>(&query)
            .bind(&input.name)
            .bind(&input.serial_number)
            .bind(&input.condition)
            .bind(input.category_id)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Equipment>, sqlx::Error> {
        let query = format!("{} WHERE eq.id = $1", select_from("equipment"));
        sqlx::query_as::<_, Equipment>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list(pool: &PgPool) -> Result<Vec<Equipment>, sqlx::Error> {
        let query = format!("{} ORDER BY eq.id ASC", select_from("equipment"));
        sqlx::query_as::<_, Equipment>(&query).fetch_all(pool).await
    }

    /// Items currently assigned to an employee.
    pub async fn list_by_employee(
        pool: &PgPool,
        employee_id: DbId,
    ) -> Result<Vec<Equipment>, sqlx::Error> {
        let query = format!(
            "{} WHERE eq.employee_id = $1 ORDER BY eq.id ASC",
            select_from("equipment")
        );
        sqlx::query_as::<_, Equipment>(&query)
            .bind(employee_id)
            .fetch_all(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateEquipment,
    ) -> Result<Option<Equipment>, sqlx::Error> {
        let query = format!(
            "WITH updated AS (
                UPDATE equipment SET
                    name = COALESCE($2, name),
                    serial_number = COALESCE($3, serial_number),
                    condition = COALESCE($4, condition),
                    category_id = COALESCE($5, category_id)
                WHERE id = $1
                RETURNING *
             ) {}",
            select_from("updated")
        );
        sqlx::query_as::<_, Equipment>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.serial_number)
            .bind(&input.condition)
            .bind(input.category_id)
            .fetch_optional(pool)
            .await
    }

    /// Hand an item to an employee, stamping `assigned_at`.
    pub async fn assign(
        pool: &PgPool,
        id: DbId,
        employee_id: DbId,
    ) -> Result<Option<Equipment>, sqlx::Error> {
        let query = format!(
            "WITH updated AS (
                UPDATE equipment SET employee_id = $2, assigned_at = NOW()
                WHERE id = $1
                RETURNING *
             ) {}",
            select_from("updated")
        );
        sqlx::query_as::<_, Equipment>(&query)
            .bind(id)
            .bind(employee_id)
            .fetch_optional(pool)
            .await
    }

    /// Return an item to stock.
    pub async fn unassign(pool: &PgPool, id: DbId) -> Result<Option<Equipment>, sqlx::Error> {
        let query = format!(
            "WITH updated AS (
                UPDATE equipment SET employee_id = NULL, assigned_at = NULL
                WHERE id = $1
                RETURNING *
             ) {}",
            select_from("updated")
        );
        sqlx::query_as::<_, Equipment>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM equipment WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
