//! Repository for the `meetings` table.

use hrm_core::status::{MeetingStatus, StatusId};
use hrm_core::types::DbId;
use sqlx::PgPool;

use crate::models::meeting::{ConfirmMeeting, CreateMeeting, Meeting};

const ORDER_BY: &str = "ORDER BY m.start_time ASC NULLS LAST, m.id ASC";

fn select_from(source: &str) -> String {
    format!(
        "SELECT m.id, m.employee_id, eu.full_name AS employee_name, \
                m.admin_id, au.full_name AS admin_name, m.purpose, \
                m.start_time, m.end_time, m.location, m.is_online, m.meeting_link, \
                m.calendar_event_id, m.status_id, s.name AS status, m.created_at, m.updated_at
         FROM {source} m
         JOIN employees e ON e.id = m.employee_id
         JOIN users eu ON eu.id = e.user_id
         LEFT JOIN admins a ON a.id = m.admin_id
         LEFT JOIN users au ON au.id = a.user_id
         JOIN meeting_statuses s ON s.id = m.status_id"
    )
}

/// Provides CRUD and workflow operations for meetings.
pub struct MeetingRepo;

impl MeetingRepo {
    /// Insert a new request with status `requested`.
    pub async fn create(pool: &PgPool, input: &CreateMeeting) -> Result<Meeting, sqlx::Error> {
        let query = format!(
            "WITH inserted AS (
                INSERT INTO meetings (employee_id, purpose, start_time, end_time, status_id)
                VALUES ($1, $2, $3, $4, $5)
                RETURNING *
             ) {}",
            select_from("inserted")
        );
        sqlx::query_as::<_, Meeting>(&query)
            .bind(input.employee_id)
            .bind(&input.purpose)
            .bind(input.start_time)
            .bind(input.end_time)
            .bind(MeetingStatus::Requested.id())
            .fetch_one(pool)
            .await
    }

    /// Find a meeting by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Meeting>, sqlx::Error> {
        let query = format!("{} WHERE m.id = $1", select_from("meetings"));
        sqlx::query_as::<_, Meeting>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List meetings, optionally restricted to one status.
    pub async fn list(
        pool: &PgPool,
        status_id: Option<StatusId>,
    ) -> Result<Vec<Meeting>, sqlx::Error> {
        let query = format!(
            "{} WHERE ($1::smallint IS NULL OR m.status_id = $1) {ORDER_BY}",
            select_from("meetings")
        );
        sqlx::query_as::<_, Meeting>(&query)
            .bind(status_id)
            .fetch_all(pool)
            .await
    }

    /// Meetings requested by an employee, optionally restricted to one status.
    pub async fn list_by_employee(
        pool: &PgPool,
        employee_id: DbId,
        status_id: Option<StatusId>,
    ) -> Result<Vec<Meeting>, sqlx::Error> {
        let query = format!(
            "{} WHERE m.employee_id = $1
                 AND ($2::smallint IS NULL OR m.status_id = $2)
             {ORDER_BY}",
            select_from("meetings")
        );
        sqlx::query_as::<_, Meeting>(&query)
            .bind(employee_id)
            .bind(status_id)
            .fetch_all(pool)
            .await
    }

    /// Meetings handled by an admin, optionally restricted to one status.
    pub async fn list_by_admin(
        pool: &PgPool,
        admin_id: DbId,
        status_id: Option<StatusId>,
    ) -> Result<Vec<Meeting>, sqlx::Error> {
        let query = format!(
            "{} WHERE m.admin_id = $1
                 AND ($2::smallint IS NULL OR m.status_id = $2)
             {ORDER_BY}",
            select_from("meetings")
        );
        sqlx::query_as::<_, Meeting>(&query)
            .bind(admin_id)
            .bind(status_id)
            .fetch_all(pool)
            .await
    }

    /// Fill in the schedule and mark the meeting confirmed.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn confirm(
        pool: &PgPool,
        id: DbId,
        input: &ConfirmMeeting,
    ) -> Result<Option<Meeting>, sqlx::Error> {
        let query = format!(
            "WITH updated AS (
                UPDATE meetings SET
                    admin_id = $2,
                    start_time = $3,
                    end_time = $4,
                    location = $5,
                    is_online = $6,
                    meeting_link = $7,
                    status_id = $8
                WHERE id = $1
                RETURNING *
             ) {}",
            select_from("updated")
        );
        sqlx::query_as::<_, Meeting>(&query)
            .bind(id)
            .bind(input.admin_id)
            .bind(input.start_time)
            .bind(input.end_time)
            .bind(&input.location)
            .bind(input.is_online)
            .bind(&input.meeting_link)
            .bind(MeetingStatus::Confirmed.id())
            .fetch_optional(pool)
            .await
    }

    /// Mark the meeting rejected, recording which admin decided.
    pub async fn reject(
        pool: &PgPool,
        id: DbId,
        admin_id: DbId,
    ) -> Result<Option<Meeting>, sqlx::Error> {
        let query = format!(
            "WITH updated AS (
                UPDATE meetings SET admin_id = $2, status_id = $3 WHERE id = $1 RETURNING *
             ) {}",
            select_from("updated")
        );
        sqlx::query_as::<_, Meeting>(&query)
            .bind(id)
            .bind(admin_id)
            .bind(MeetingStatus::Rejected.id())
            .fetch_optional(pool)
            .await
    }

    /// Store (or clear) the external calendar event ID.
    pub async fn set_calendar_event_id(
        pool: &PgPool,
        id: DbId,
        event_id: Option<&str>,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE meetings SET calendar_event_id = $2 WHERE id = $1")
            .bind(id)
            .bind(event_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete a meeting. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM meetings WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
