//! Repository for the `calendar_tokens` table.

use hrm_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::models::calendar_token::{CalendarToken, UpsertCalendarToken};

const COLUMNS: &str =
    "id, admin_id, access_token, refresh_token, expires_at, scope, created_at, updated_at";

/// Stores one OAuth grant per admin.
pub struct CalendarTokenRepo;

impl CalendarTokenRepo {
    pub async fn find_by_admin(
        pool: &PgPool,
        admin_id: DbId,
    ) -> Result<Option<CalendarToken>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM calendar_tokens WHERE admin_id = $1");
        sqlx::query_as::<_, CalendarToken>(&query)
            .bind(admin_id)
            .fetch_optional(pool)
            .await
    }

    /// Store a fresh grant, replacing any previous one for the admin.
    pub async fn upsert(
        pool: &PgPool,
        input: &UpsertCalendarToken,
    ) -> Result<CalendarToken, sqlx::Error> {
        let query = format!(
            "INSERT INTO calendar_tokens (admin_id, access_token, refresh_token, expires_at, scope)
             VALUES ($1, $2, $3, $4, $5)
             ON CONFLICT ON CONSTRAINT uq_calendar_tokens_admin_id DO UPDATE SET
                access_token = EXCLUDED.access_token,
                refresh_token = EXCLUDED.refresh_token,
                expires_at = EXCLUDED.expires_at,
                scope = EXCLUDED.scope
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CalendarToken>(&query)
            .bind(input.admin_id)
            .bind(&input.access_token)
            .bind(&input.refresh_token)
            .bind(input.expires_at)
            .bind(&input.scope)
            .fetch_one(pool)
            .await
    }

    /// Replace the access token after a refresh grant. The refresh token
    /// is kept unless the provider rotated it.
    pub async fn update_access_token(
        pool: &PgPool,
        admin_id: DbId,
        access_token: &str,
        refresh_token: Option<&str>,
        expires_at: Timestamp,
    ) -> Result<Option<CalendarToken>, sqlx::Error> {
        let query = format!(
            "UPDATE calendar_tokens SET
                access_token = $2,
                refresh_token = COALESCE($3, refresh_token),
                expires_at = $4
             WHERE admin_id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CalendarToken>(&query)
            .bind(admin_id)
            .bind(access_token)
            .bind(refresh_token)
            .bind(expires_at)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, admin_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM calendar_tokens WHERE admin_id = $1")
            .bind(admin_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
