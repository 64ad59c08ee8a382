//! Repository for the `users` table.

use hrm_core::status::StatusId;
use hrm_core::types::DbId;
use sqlx::PgPool;

use crate::models::user::{CreateUser, User};

/// Build the user projection over `source`, which is either the table
/// itself or a data-modifying CTE that returned full rows.
fn select_from(source: &str) -> String {
    format!(
        "SELECT u.id, u.full_name, u.email, u.password_hash, u.role_id, r.name AS role, \
                u.profile_picture_url, u.is_verified, u.created_at, u.updated_at
         FROM {source} u
         JOIN roles r ON r.id = u.role_id"
    )
}

/// Provides CRUD and role operations for users.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateUser) -> Result<User, sqlx::Error> {
        let query = format!(
            "WITH inserted AS (
                INSERT INTO users (full_name, email, password_hash)
                VALUES ($1, $2, $3)
                RETURNING *
             ) {}",
            select_from("inserted")
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.full_name)
            .bind(&input.email)
            .bind(&input.password_hash)
            .fetch_one(pool)
            .await
    }

    /// Find a user by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("{} WHERE u.id = $1", select_from("users"));
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a user by email. Emails are stored lowercased.
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
        let query = format!("{} WHERE u.email = $1", select_from("users"));
        sqlx::query_as::<_, User>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// List all users ordered by ID.
    pub async fn list(pool: &PgPool) -> Result<Vec<User>, sqlx::Error> {
        let query = format!("{} ORDER BY u.id ASC", select_from("users"));
        sqlx::query_as::<_, User>(&query).fetch_all(pool).await
    }

    /// Return the stored role ID for a user, or `None` if the user is missing.
    pub async fn get_role_id(pool: &PgPool, id: DbId) -> Result<Option<StatusId>, sqlx::Error> {
        let row: Option<(StatusId,)> = sqlx::query_as("SELECT role_id FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(row.map(|(role_id,)| role_id))
    }

    /// Overwrite a user's role. Returns `None` if no row with `id` exists.
    pub async fn set_role(
        pool: &PgPool,
        id: DbId,
        role_id: StatusId,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!(
            "WITH updated AS (
                UPDATE users SET role_id = $2 WHERE id = $1 RETURNING *
             ) {}",
            select_from("updated")
        );
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .bind(role_id)
            .fetch_optional(pool)
            .await
    }

    /// Users that own neither an employee nor an admin row.
    pub async fn list_unlinked(pool: &PgPool) -> Result<Vec<User>, sqlx::Error> {
        let query = format!(
            "{} WHERE NOT EXISTS (SELECT 1 FROM employees e WHERE e.user_id = u.id)
               AND NOT EXISTS (SELECT 1 FROM admins a WHERE a.user_id = u.id)
             ORDER BY u.id ASC",
            select_from("users")
        );
        sqlx::query_as::<_, User>(&query).fetch_all(pool).await
    }

    /// Whether the user owns an employee or admin row.
    pub async fn has_extension_row(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let (exists,): (bool,) = sqlx::query_as(
            "SELECT EXISTS (SELECT 1 FROM employees WHERE user_id = $1)
                 OR EXISTS (SELECT 1 FROM admins WHERE user_id = $1)",
        )
        .bind(id)
        .fetch_one(pool)
        .await?;
        Ok(exists)
    }

    /// Whether any user currently holds the given role.
    pub async fn any_with_role(pool: &PgPool, role_id: StatusId) -> Result<bool, sqlx::Error> {
        let (exists,): (bool,) =
            sqlx::query_as("SELECT EXISTS (SELECT 1 FROM users WHERE role_id = $1)")
                .bind(role_id)
                .fetch_one(pool)
                .await?;
        Ok(exists)
    }

    /// Mark a user's email as verified. Returns `true` if the row was updated.
    pub async fn set_verified(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE users SET is_verified = true WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Replace the profile picture URL. Returns `None` if the user is missing.
    pub async fn update_profile_picture(
        pool: &PgPool,
        id: DbId,
        url: Option<&str>,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!(
            "WITH updated AS (
                UPDATE users SET profile_picture_url = $2 WHERE id = $1 RETURNING *
             ) {}",
            select_from("updated")
        );
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .bind(url)
            .fetch_optional(pool)
            .await
    }
}
