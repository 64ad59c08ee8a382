//! Handler for `/gatherings`: one person's performance reviews and
//! confirmed meetings as a single time-ordered list.

use axum::extract::{Query, State};
use axum::Json;
use hrm_core::gathering::{sort_gatherings, Gathering, GatheringKind};
use hrm_core::status::MeetingStatus;
use hrm_db::models::meeting::Meeting;
use hrm_db::models::performance_review::PerformanceReview;
use hrm_db::repositories::{MeetingRepo, PerformanceReviewRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAuth;
use crate::query::GatheringParams;
use crate::response::DataResponse;
use crate::state::AppState;

const REVIEW_TITLE: &str = "Performance review";

fn from_review(review: PerformanceReview) -> Gathering {
    Gathering {
        kind: GatheringKind::PerformanceReview,
        id: review.id,
        title: REVIEW_TITLE.to_string(),
        admin_id: Some(review.admin_id),
        admin_name: Some(review.admin_name),
        employee_id: review.employee_id,
        employee_name: review.employee_name,
        start_time: review.start_time,
        end_time: review.end_time,
        location: review.location,
        is_online: review.is_online,
        meeting_link: review.meeting_link,
        status: review.status,
    }
}

fn from_meeting(meeting: Meeting) -> Gathering {
    Gathering {
        kind: GatheringKind::Meeting,
        id: meeting.id,
        title: meeting.purpose,
        admin_id: meeting.admin_id,
        admin_name: meeting.admin_name,
        employee_id: meeting.employee_id,
        employee_name: meeting.employee_name,
        start_time: meeting.start_time,
        end_time: meeting.end_time,
        location: meeting.location,
        is_online: meeting.is_online,
        meeting_link: meeting.meeting_link,
        status: meeting.status,
    }
}

/// GET /api/v1/gatherings?admin_id= | ?employee_id=
///
/// Exactly one of the two parameters must be given.
pub async fn list_gatherings(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Query(params): Query<GatheringParams>,
) -> AppResult<Json<DataResponse<Vec<Gathering>>>> {
    let confirmed = Some(MeetingStatus::Confirmed.id());
    let (reviews, meetings) = match (params.admin_id, params.employee_id) {
        (Some(admin_id), None) => (
            PerformanceReviewRepo::list_by_admin(&state.pool, admin_id).await?,
            MeetingRepo::list_by_admin(&state.pool, admin_id, confirmed).await?,
        ),
        (None, Some(employee_id)) => (
            PerformanceReviewRepo::list_by_employee(&state.pool, employee_id).await?,
            MeetingRepo::list_by_employee(&state.pool, employee_id, confirmed).await?,
        ),
        _ => {
            return Err(AppError::BadRequest(
                "Provide exactly one of admin_id or employee_id".into(),
            ))
        }
    };

    let mut gatherings: Vec<Gathering> = reviews
        .into_iter()
        .map(from_review)
        .chain(meetings.into_iter().map(from_meeting))
        .collect();
    sort_gatherings(&mut gatherings);

    Ok(Json(DataResponse { data: gatherings }))
}
