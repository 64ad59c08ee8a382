//! Repository for the `admins` table.

use hrm_core::types::DbId;
use sqlx::PgPool;

use crate::models::admin::{Admin, CreateAdmin, UpdateAdmin};

fn select_from(source: &str) -> String {
    format!(
        "SELECT a.id, a.user_id, u.full_name, u.email, a.position, a.department, a.phone, \
                a.created_at, a.updated_at
         FROM {source} a
         JOIN users u ON u.id = a.user_id"
    )
}

/// Provides CRUD operations for admins.
pub struct AdminRepo;

impl AdminRepo {
    /// Insert a new admin row, returning it with the user's details.
    pub async fn create(pool: &PgPool, input: &CreateAdmin) -> Result<Admin, sqlx::Error> {
        let query = format!(
            "WITH inserted AS (
                INSERT INTO admins (user_id, position, department, phone)
                VALUES ($1, $2, $3, $4)
                RETURNING *
             ) {}",
            select_from("inserted")
        );
        sqlx::query_as::<_, Admin>(&query)
            .bind(input.user_id)
            .bind(&input.position)
            .bind(&input.department)
            .bind(&input.phone)
            .fetch_one(pool)
            .await
    }

    /// Find an admin by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Admin>, sqlx::Error> {
        let query = format!("{} WHERE a.id = $1", select_from("admins"));
        sqlx::query_as::<_, Admin>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find the admin row owned by a user.
    pub async fn find_by_user_id(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Option<Admin>, sqlx::Error> {
        let query = format!("{} WHERE a.user_id = $1", select_from("admins"));
        sqlx::query_as::<_, Admin>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// List all admins ordered by name.
    pub async fn list(pool: &PgPool) -> Result<Vec<Admin>, sqlx::Error> {
        let query = format!("{} ORDER BY u.full_name ASC, a.id ASC", select_from("admins"));
        sqlx::query_as::<_, Admin>(&query).fetch_all(pool).await
    }

    /// Update an admin. Only non-`None` fields in `input` are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateAdmin,
    ) -> Result<Option<Admin>, sqlx::Error> {
        let query = format!(
            "WITH updated AS (
                UPDATE admins SET
                    position = COALESCE($2, position),
                    department = COALESCE($3, department),
                    phone = COALESCE($4, phone)
                WHERE id = $1
                RETURNING *
             ) {}",
            select_from("updated")
        );
        sqlx::query_as::<_, Admin>(&query)
            .bind(id)
            .bind(&input.position)
            .bind(&input.department)
            .bind(&input.phone)
            .fetch_optional(pool)
            .await
    }

    /// Delete an admin row. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM admins WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
