//! Handlers for the `/performance-reviews` resource (PRM).

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use hrm_calendar::EventInput;
use hrm_core::error::CoreError;
use hrm_core::review::{validate_comment, validate_rating, validate_window};
use hrm_core::status::{resolve, ReviewStatus};
use hrm_core::types::{DbId, Timestamp};
use hrm_core::workflow::ensure_transition;
use hrm_db::models::performance_review::{PerformanceReview, PerformanceReviewFields};
use hrm_db::repositories::PerformanceReviewRepo;
use serde::Deserialize;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::handlers::admins::find_admin;
use crate::handlers::calendar::{discard_event, put_event};
use crate::handlers::employees::find_employee;
use crate::middleware::rbac::{RequireAdmin, RequireAuth};
use crate::query::ReviewListParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// Body for create and the full-record overwrite. `status` defaults to
/// `pending`. `sync_calendar` writes the scheduled review to the admin's
/// calendar and needs both `start_time` and `end_time`.
#[derive(Debug, Deserialize, Validate)]
pub struct ReviewRequest {
    pub admin_id: DbId,
    pub employee_id: DbId,
    pub start_time: Option<Timestamp>,
    pub end_time: Option<Timestamp>,
    pub location: Option<String>,
    #[serde(default)]
    pub is_online: bool,
    #[validate(url)]
    pub meeting_link: Option<String>,
    pub rating: Option<i16>,
    pub comment: Option<String>,
    #[validate(url)]
    pub document_url: Option<String>,
    pub status: Option<String>,
    #[serde(default)]
    pub sync_calendar: bool,
}

impl ReviewRequest {
    fn into_fields(self) -> AppResult<(PerformanceReviewFields, ReviewStatus)> {
        self.validate()?;
        validate_window(self.start_time, self.end_time)?;
        if self.sync_calendar {
            ensure_scheduled(self.start_time, self.end_time)?;
        }
        if let Some(rating) = self.rating {
            validate_rating(rating)?;
        }
        if let Some(comment) = &self.comment {
            validate_comment(comment)?;
        }
        let status = match &self.status {
            Some(label) => ReviewStatus::parse(label)?,
            None => ReviewStatus::Pending,
        };

        let fields = PerformanceReviewFields {
            admin_id: self.admin_id,
            employee_id: self.employee_id,
            start_time: self.start_time,
            end_time: self.end_time,
            location: self.location,
            is_online: self.is_online,
            meeting_link: self.meeting_link,
            rating: self.rating,
            comment: self.comment,
            document_url: self.document_url,
            status_id: status.id(),
        };
        Ok((fields, status))
    }
}

#[derive(Debug, Deserialize)]
pub struct RatingRequest {
    pub rating: i16,
    pub comment: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ReviewStatusRequest {
    pub status: String,
    #[serde(default)]
    pub sync_calendar: bool,
}

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "PerformanceReview",
        id,
    })
}

async fn find_review(state: &AppState, id: DbId) -> AppResult<PerformanceReview> {
    PerformanceReviewRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))
}

fn current_status(review: &PerformanceReview) -> AppResult<ReviewStatus> {
    Ok(resolve(
        review.status_id,
        ReviewStatus::from_id,
        "performance review status",
    )?)
}

fn ensure_scheduled(start_time: Option<Timestamp>, end_time: Option<Timestamp>) -> AppResult<()> {
    if start_time.is_none() || end_time.is_none() {
        return Err(AppError::BadRequest(
            "Calendar sync needs start_time and end_time".into(),
        ));
    }
    Ok(())
}

/// Write the review to its admin's calendar and store the event id.
async fn sync_review_event(state: &AppState, review: &PerformanceReview) -> AppResult<String> {
    let (Some(start_time), Some(end_time)) = (review.start_time, review.end_time) else {
        return Err(AppError::BadRequest("Review has no schedule to sync".into()));
    };
    let employee = find_employee(state, review.employee_id).await?;

    let input = EventInput {
        summary: format!("Performance review with {}", review.employee_name),
        description: None,
        location: review.location.clone(),
        start_time,
        end_time,
        attendees: vec![employee.email],
        with_meet_link: review.is_online && review.meeting_link.is_none(),
    };
    let event = put_event(
        state,
        review.admin_id,
        review.calendar_event_id.as_deref(),
        &input,
    )
    .await?;

    PerformanceReviewRepo::set_calendar_event_id(&state.pool, review.id, Some(&event.id)).await?;
    Ok(event.id)
}

/// Sync when asked. A failed sync keeps the saved review and is logged.
async fn with_calendar_sync(
    state: &AppState,
    mut review: PerformanceReview,
    sync: bool,
) -> PerformanceReview {
    if !sync {
        return review;
    }
    match sync_review_event(state, &review).await {
        Ok(event_id) => review.calendar_event_id = Some(event_id),
        Err(err) => {
            tracing::warn!(review_id = review.id, error = %err, "Calendar sync failed for review");
        }
    }
    review
}

/// POST /api/v1/performance-reviews
pub async fn create_review(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Json(input): Json<ReviewRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<PerformanceReview>>)> {
    let sync = input.sync_calendar;
    let (fields, _status) = input.into_fields()?;
    find_admin(&state, fields.admin_id).await?;
    find_employee(&state, fields.employee_id).await?;

    let review = PerformanceReviewRepo::create(&state.pool, &fields).await?;
    tracing::info!(
        review_id = review.id,
        admin_id = review.admin_id,
        employee_id = review.employee_id,
        "Performance review created",
    );
    let review = with_calendar_sync(&state, review, sync).await;
    Ok((StatusCode::CREATED, Json(DataResponse { data: review })))
}

/// GET /api/v1/performance-reviews?admin_id=&start_date=
///
/// With both parameters, only the admin's reviews starting on that UTC day.
pub async fn list_reviews(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Query(params): Query<ReviewListParams>,
) -> AppResult<Json<DataResponse<Vec<PerformanceReview>>>> {
    let reviews = match (params.admin_id, params.start_date) {
        (Some(admin_id), Some(day)) => {
            PerformanceReviewRepo::list_by_admin_and_date(&state.pool, admin_id, day).await?
        }
        (Some(admin_id), None) => PerformanceReviewRepo::list_by_admin(&state.pool, admin_id).await?,
        (None, Some(_)) => {
            return Err(AppError::BadRequest(
                "start_date requires admin_id".into(),
            ))
        }
        (None, None) => PerformanceReviewRepo::list(&state.pool).await?,
    };
    Ok(Json(DataResponse { data: reviews }))
}

async fn list_with_status(
    state: &AppState,
    status: ReviewStatus,
) -> AppResult<Json<DataResponse<Vec<PerformanceReview>>>> {
    let reviews = PerformanceReviewRepo::list_by_status(&state.pool, status.id()).await?;
    Ok(Json(DataResponse { data: reviews }))
}

/// GET /api/v1/performance-reviews/upcoming
pub async fn list_upcoming(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
) -> AppResult<Json<DataResponse<Vec<PerformanceReview>>>> {
    list_with_status(&state, ReviewStatus::Upcoming).await
}

/// GET /api/v1/performance-reviews/pending
pub async fn list_pending(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
) -> AppResult<Json<DataResponse<Vec<PerformanceReview>>>> {
    list_with_status(&state, ReviewStatus::Pending).await
}

/// GET /api/v1/performance-reviews/completed
pub async fn list_completed(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
) -> AppResult<Json<DataResponse<Vec<PerformanceReview>>>> {
    list_with_status(&state, ReviewStatus::Completed).await
}

/// GET /api/v1/performance-reviews/employee/{employee_id}
pub async fn list_by_employee(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path(employee_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<PerformanceReview>>>> {
    let reviews = PerformanceReviewRepo::list_by_employee(&state.pool, employee_id).await?;
    Ok(Json(DataResponse { data: reviews }))
}

/// GET /api/v1/performance-reviews/{id}
pub async fn get_review(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<PerformanceReview>>> {
    let review = find_review(&state, id).await?;
    Ok(Json(DataResponse { data: review }))
}

/// PUT /api/v1/performance-reviews/{id}
///
/// Overwrites every writable column of the targeted row. An omitted
/// `status` keeps the current one. Moving the review to another admin
/// removes the event from the previous admin's calendar.
pub async fn update_review(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<ReviewRequest>,
) -> AppResult<Json<DataResponse<PerformanceReview>>> {
    let keep_status = input.status.is_none();
    let sync = input.sync_calendar;
    let (mut fields, requested) = input.into_fields()?;

    let existing = find_review(&state, id).await?;
    find_admin(&state, fields.admin_id).await?;
    find_employee(&state, fields.employee_id).await?;
    let current = current_status(&existing)?;
    let next = if keep_status { current } else { requested };
    ensure_transition(current, next)?;
    fields.status_id = next.id();

    let mut review = PerformanceReviewRepo::update(&state.pool, id, &fields)
        .await?
        .ok_or_else(|| not_found(id))?;
    tracing::info!(review_id = id, status = %next, "Performance review updated");

    if let Some(event_id) = existing.calendar_event_id.as_deref() {
        if existing.admin_id != review.admin_id {
            discard_event(&state, existing.admin_id, event_id).await;
            PerformanceReviewRepo::set_calendar_event_id(&state.pool, id, None).await?;
            review.calendar_event_id = None;
        }
    }

    let review = with_calendar_sync(&state, review, sync).await;
    Ok(Json(DataResponse { data: review }))
}

/// PUT /api/v1/performance-reviews/{id}/rating
pub async fn set_rating(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<RatingRequest>,
) -> AppResult<Json<DataResponse<PerformanceReview>>> {
    validate_rating(input.rating)?;
    if let Some(comment) = &input.comment {
        validate_comment(comment)?;
    }

    let review =
        PerformanceReviewRepo::set_rating(&state.pool, id, input.rating, input.comment.as_deref())
            .await?
            .ok_or_else(|| not_found(id))?;
    tracing::info!(review_id = id, rating = input.rating, "Performance review rated");
    Ok(Json(DataResponse { data: review }))
}

/// PUT /api/v1/performance-reviews/{id}/status
pub async fn set_status(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<ReviewStatusRequest>,
) -> AppResult<Json<DataResponse<PerformanceReview>>> {
    let next = ReviewStatus::parse(&input.status)?;
    let existing = find_review(&state, id).await?;
    let current = current_status(&existing)?;
    ensure_transition(current, next)?;
    if input.sync_calendar {
        ensure_scheduled(existing.start_time, existing.end_time)?;
    }

    let review = if current == next {
        existing
    } else {
        let review = PerformanceReviewRepo::set_status(&state.pool, id, next.id())
            .await?
            .ok_or_else(|| not_found(id))?;
        tracing::info!(review_id = id, from = %current, to = %next, "Performance review status changed");
        review
    };

    let review = with_calendar_sync(&state, review, input.sync_calendar).await;
    Ok(Json(DataResponse { data: review }))
}

/// DELETE /api/v1/performance-reviews/{id}
///
/// Also removes the synced calendar event, without letting a failure
/// there block the delete.
pub async fn delete_review(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let review = find_review(&state, id).await?;
    if !PerformanceReviewRepo::delete(&state.pool, id).await? {
        return Err(not_found(id));
    }
    if let Some(event_id) = review.calendar_event_id.as_deref() {
        discard_event(&state, review.admin_id, event_id).await;
    }
    tracing::info!(review_id = id, "Performance review deleted");
    Ok(StatusCode::NO_CONTENT)
}
