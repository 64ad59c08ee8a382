//! Repository for the `performance_reviews` table.
//!
//! Every read joins through admins/employees to users so callers get
//! display names without a second round trip.

use hrm_core::status::StatusId;
use hrm_core::types::{Date, DbId};
use sqlx::PgPool;

use crate::models::performance_review::{PerformanceReview, PerformanceReviewFields};

/// Default ordering: scheduled reviews first by start time, then by ID.
const ORDER_BY: &str = "ORDER BY pr.start_time ASC NULLS LAST, pr.id ASC";

fn select_from(source: &str) -> String {
    format!(
        "SELECT pr.id, pr.admin_id, au.full_name AS admin_name, \
                pr.employee_id, eu.full_name AS employee_name, \
                pr.start_time, pr.end_time, pr.location, pr.is_online, pr.meeting_link, \
                pr.rating, pr.comment, pr.document_url, pr.calendar_event_id, \
                pr.status_id, s.name AS status, pr.created_at, pr.updated_at
         FROM {source} pr
         JOIN admins a ON a.id = pr.admin_id
         JOIN users au ON au.id = a.user_id
         JOIN employees e ON e.id = pr.employee_id
         JOIN users eu ON eu.id = e.user_id
         JOIN performance_review_statuses s ON s.id = pr.status_id"
    )
}

/// Provides CRUD and query operations for performance reviews.
pub struct PerformanceReviewRepo;

impl PerformanceReviewRepo {
    /// Insert a new review, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &PerformanceReviewFields,
    ) -> Result<PerformanceReview, sqlx::Error> {
        let query = format!(
            "WITH inserted AS (
                INSERT INTO performance_reviews
                    (admin_id, employee_id, start_time, end_time, location, is_online,
                     meeting_link, rating, comment, document_url, status_id)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
                RETURNING *
             ) {}",
            select_from("inserted")
        );
        sqlx::query_as::<_, PerformanceReview>(&query)
            .bind(input.admin_id)
            .bind(input.employee_id)
            .bind(input.start_time)
            .bind(input.end_time)
            .bind(&input.location)
            .bind(input.is_online)
            .bind(&input.meeting_link)
            .bind(input.rating)
            .bind(&input.comment)
            .bind(&input.document_url)
            .bind(input.status_id)
            .fetch_one(pool)
            .await
    }

    /// Find a review by ID.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<PerformanceReview>, sqlx::Error> {
        let query = format!("{} WHERE pr.id = $1", select_from("performance_reviews"));
        sqlx::query_as::<_, PerformanceReview>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List every review.
    pub async fn list(pool: &PgPool) -> Result<Vec<PerformanceReview>, sqlx::Error> {
        let query = format!("{} {ORDER_BY}", select_from("performance_reviews"));
        sqlx::query_as::<_, PerformanceReview>(&query)
            .fetch_all(pool)
            .await
    }

    /// Reviews owned by `admin_id` whose start time falls on `day` (UTC).
    pub async fn list_by_admin_and_date(
        pool: &PgPool,
        admin_id: DbId,
        day: Date,
    ) -> Result<Vec<PerformanceReview>, sqlx::Error> {
        let query = format!(
            "{} WHERE pr.admin_id = $1
                 AND (pr.start_time AT TIME ZONE 'UTC')::date = $2
             {ORDER_BY}",
            select_from("performance_reviews")
        );
        sqlx::query_as::<_, PerformanceReview>(&query)
            .bind(admin_id)
            .bind(day)
            .fetch_all(pool)
            .await
    }

    /// Every review owned by an admin.
    pub async fn list_by_admin(
        pool: &PgPool,
        admin_id: DbId,
    ) -> Result<Vec<PerformanceReview>, sqlx::Error> {
        let query = format!(
            "{} WHERE pr.admin_id = $1 {ORDER_BY}",
            select_from("performance_reviews")
        );
        sqlx::query_as::<_, PerformanceReview>(&query)
            .bind(admin_id)
            .fetch_all(pool)
            .await
    }

    /// Every review of an employee.
    pub async fn list_by_employee(
        pool: &PgPool,
        employee_id: DbId,
    ) -> Result<Vec<PerformanceReview>, sqlx::Error> {
        let query = format!(
            "{} WHERE pr.employee_id = $1 {ORDER_BY}",
            select_from("performance_reviews")
        );
        sqlx::query_as::<_, PerformanceReview>(&query)
            .bind(employee_id)
            .fetch_all(pool)
            .await
    }

    /// Reviews whose status equals `status_id` exactly.
    pub async fn list_by_status(
        pool: &PgPool,
        status_id: StatusId,
    ) -> Result<Vec<PerformanceReview>, sqlx::Error> {
        let query = format!(
            "{} WHERE pr.status_id = $1 {ORDER_BY}",
            select_from("performance_reviews")
        );
        sqlx::query_as::<_, PerformanceReview>(&query)
            .bind(status_id)
            .fetch_all(pool)
            .await
    }

    /// Overwrite every writable column of one review.
    ///
    /// The stored calendar event ID is left alone. Returns `None` if no row
    /// with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &PerformanceReviewFields,
    ) -> Result<Option<PerformanceReview>, sqlx::Error> {
        let query = format!(
            "WITH updated AS (
                UPDATE performance_reviews SET
                    admin_id = $2,
                    employee_id = $3,
                    start_time = $4,
                    end_time = $5,
                    location = $6,
                    is_online = $7,
                    meeting_link = $8,
                    rating = $9,
                    comment = $10,
                    document_url = $11,
                    status_id = $12
                WHERE id = $1
                RETURNING *
             ) {}",
            select_from("updated")
        );
        sqlx::query_as::<_, PerformanceReview>(&query)
            .bind(id)
            .bind(input.admin_id)
            .bind(input.employee_id)
            .bind(input.start_time)
            .bind(input.end_time)
            .bind(&input.location)
            .bind(input.is_online)
            .bind(&input.meeting_link)
            .bind(input.rating)
            .bind(&input.comment)
            .bind(&input.document_url)
            .bind(input.status_id)
            .fetch_optional(pool)
            .await
    }

    /// Record a rating and comment.
    pub async fn set_rating(
        pool: &PgPool,
        id: DbId,
        rating: i16,
        comment: Option<&str>,
    ) -> Result<Option<PerformanceReview>, sqlx::Error> {
        let query = format!(
            "WITH updated AS (
                UPDATE performance_reviews SET rating = $2, comment = COALESCE($3, comment)
                WHERE id = $1
                RETURNING *
             ) {}",
            select_from("updated")
        );
        sqlx::query_as::<_, PerformanceReview>(&query)
            .bind(id)
            .bind(rating)
            .bind(comment)
            .fetch_optional(pool)
            .await
    }

    /// Set the status column.
    pub async fn set_status(
        pool: &PgPool,
        id: DbId,
        status_id: StatusId,
    ) -> Result<Option<PerformanceReview>, sqlx::Error> {
        let query = format!(
            "WITH updated AS (
                UPDATE performance_reviews SET status_id = $2 WHERE id = $1 RETURNING *
             ) {}",
            select_from("updated")
        );
        sqlx::query_as::<_, PerformanceReview>(&query)
            .bind(id)
            .bind(status_id)
            .fetch_optional(pool)
            .await
    }

    /// Store (or clear) the external calendar event ID.
    pub async fn set_calendar_event_id(
        pool: &PgPool,
        id: DbId,
        event_id: Option<&str>,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE performance_reviews SET calendar_event_id = $2 WHERE id = $1")
            .bind(id)
            .bind(event_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete a review. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM performance_reviews WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
