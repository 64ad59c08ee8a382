//! Handlers for the `/meetings` resource: employee-initiated meeting
//! requests and their confirmation by an admin.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use hrm_calendar::EventInput;
use hrm_core::error::CoreError;
use hrm_core::meeting::validate_purpose;
use hrm_core::review::validate_window;
use hrm_core::status::{resolve, MeetingStatus};
use hrm_core::types::{DbId, Timestamp};
use hrm_core::workflow::ensure_transition;
use hrm_db::models::meeting::{ConfirmMeeting, CreateMeeting, Meeting};
use hrm_db::repositories::MeetingRepo;
use serde::Deserialize;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::handlers::admins::caller_admin;
use crate::handlers::calendar::{discard_event, put_event};
use crate::handlers::employees::{caller_employee, find_employee};
use crate::middleware::rbac::{RequireAdmin, RequireAuth, RequireEmployee};
use crate::query::StatusFilter;
use crate::response::{DataResponse, MessageResponse};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateMeetingRequest {
    pub purpose: String,
    pub start_time: Option<Timestamp>,
    pub end_time: Option<Timestamp>,
}

/// Schedule details supplied by the confirming admin.
#[derive(Debug, Deserialize, Validate)]
pub struct ConfirmMeetingRequest {
    pub start_time: Timestamp,
    pub end_time: Timestamp,
    pub location: Option<String>,
    #[serde(default)]
    pub is_online: bool,
    #[validate(url)]
    pub meeting_link: Option<String>,
    /// Create or update the admin's calendar event after confirming.
    #[serde(default)]
    pub sync_calendar: bool,
}

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Meeting",
        id,
    })
}

fn current_status(meeting: &Meeting) -> AppResult<MeetingStatus> {
    Ok(resolve(meeting.status_id, MeetingStatus::from_id, "meeting status")?)
}

type MeetingOutcome = (StatusCode, Json<MessageResponse<Meeting>>);

fn outcome(status: StatusCode, message: impl Into<String>, data: Option<Meeting>) -> MeetingOutcome {
    (
        status,
        Json(MessageResponse {
            message: message.into(),
            data,
        }),
    )
}

/// Push a confirmed meeting to its admin's calendar and remember the event
/// id. Returns the event id.
async fn sync_meeting_event(state: &AppState, meeting: &Meeting, admin_id: DbId) -> AppResult<String> {
    let (Some(start_time), Some(end_time)) = (meeting.start_time, meeting.end_time) else {
        return Err(AppError::BadRequest("Meeting has no schedule to sync".into()));
    };
    let employee = find_employee(state, meeting.employee_id).await?;

    let input = EventInput {
        summary: format!("Meeting with {}", meeting.employee_name),
        description: Some(meeting.purpose.clone()),
        location: meeting.location.clone(),
        start_time,
        end_time,
        attendees: vec![employee.email],
        with_meet_link: meeting.is_online && meeting.meeting_link.is_none(),
    };
    let event = put_event(state, admin_id, meeting.calendar_event_id.as_deref(), &input).await?;

    MeetingRepo::set_calendar_event_id(&state.pool, meeting.id, Some(&event.id)).await?;
    Ok(event.id)
}

/// POST /api/v1/meetings
///
/// The calling employee requests a meeting. It starts as `requested`.
pub async fn create_meeting(
    State(state): State<AppState>,
    RequireEmployee(user): RequireEmployee,
    Json(input): Json<CreateMeetingRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<Meeting>>)> {
    validate_purpose(&input.purpose)?;
    validate_window(input.start_time, input.end_time)?;
    let employee = caller_employee(&state, &user).await?;

    let meeting = MeetingRepo::create(
        &state.pool,
        &CreateMeeting {
            employee_id: employee.id,
            purpose: input.purpose.trim().to_string(),
            start_time: input.start_time,
            end_time: input.end_time,
        },
    )
    .await?;

    tracing::info!(meeting_id = meeting.id, employee_id = employee.id, "Meeting requested");
    Ok((StatusCode::CREATED, Json(DataResponse { data: meeting })))
}

/// GET /api/v1/meetings?status=
pub async fn list_meetings(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Query(filter): Query<StatusFilter>,
) -> AppResult<Json<DataResponse<Vec<Meeting>>>> {
    let status = filter.parse_with(MeetingStatus::parse)?;
    let meetings = MeetingRepo::list(&state.pool, status.map(MeetingStatus::id)).await?;
    Ok(Json(DataResponse { data: meetings }))
}

/// GET /api/v1/meetings/employee/{id}?status=
pub async fn list_by_employee(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path(employee_id): Path<DbId>,
    Query(filter): Query<StatusFilter>,
) -> AppResult<Json<DataResponse<Vec<Meeting>>>> {
    let status = filter.parse_with(MeetingStatus::parse)?;
    let meetings =
        MeetingRepo::list_by_employee(&state.pool, employee_id, status.map(MeetingStatus::id))
            .await?;
    Ok(Json(DataResponse { data: meetings }))
}

/// GET /api/v1/meetings/admin/{id}?status=
pub async fn list_by_admin(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path(admin_id): Path<DbId>,
    Query(filter): Query<StatusFilter>,
) -> AppResult<Json<DataResponse<Vec<Meeting>>>> {
    let status = filter.parse_with(MeetingStatus::parse)?;
    let meetings =
        MeetingRepo::list_by_admin(&state.pool, admin_id, status.map(MeetingStatus::id)).await?;
    Ok(Json(DataResponse { data: meetings }))
}

/// GET /api/v1/meetings/{id}
pub async fn get_meeting(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Meeting>>> {
    let meeting = MeetingRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse { data: meeting }))
}

/// PUT /api/v1/meetings/{id}/confirm
///
/// Answers with a status code and message rather than an error body:
/// 404 "Meeting request not found", 409 when the request was rejected,
/// 200 "Meeting confirmed". A failed calendar sync keeps the confirmation
/// and is reported in the message. When another admin confirmed the
/// meeting before, their calendar event is removed.
pub async fn confirm_meeting(
    State(state): State<AppState>,
    RequireAdmin(user): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<ConfirmMeetingRequest>,
) -> AppResult<MeetingOutcome> {
    input.validate()?;
    validate_window(Some(input.start_time), Some(input.end_time))?;
    let admin = caller_admin(&state, &user).await?;

    let Some(existing) = MeetingRepo::find_by_id(&state.pool, id).await? else {
        return Ok(outcome(StatusCode::NOT_FOUND, "Meeting request not found", None));
    };
    if let Err(err) = ensure_transition(current_status(&existing)?, MeetingStatus::Confirmed) {
        return Ok(outcome(StatusCode::CONFLICT, err.to_string(), Some(existing)));
    }

    // An event synced for another admin lives in that admin's calendar.
    let handed_over = match (existing.admin_id, existing.calendar_event_id.as_deref()) {
        (Some(previous), Some(event_id)) if previous != admin.id => Some((previous, event_id)),
        _ => None,
    };

    let details = ConfirmMeeting {
        admin_id: admin.id,
        start_time: input.start_time,
        end_time: input.end_time,
        location: input.location,
        is_online: input.is_online,
        meeting_link: input.meeting_link,
    };
    let Some(mut meeting) = MeetingRepo::confirm(&state.pool, id, &details).await? else {
        return Ok(outcome(StatusCode::NOT_FOUND, "Meeting request not found", None));
    };
    tracing::info!(meeting_id = id, admin_id = admin.id, "Meeting confirmed");

    if let Some((previous, event_id)) = handed_over {
        discard_event(&state, previous, event_id).await;
        MeetingRepo::set_calendar_event_id(&state.pool, id, None).await?;
        meeting.calendar_event_id = None;
    }

    if !input.sync_calendar {
        return Ok(outcome(StatusCode::OK, "Meeting confirmed", Some(meeting)));
    }

    match sync_meeting_event(&state, &meeting, admin.id).await {
        Ok(event_id) => {
            meeting.calendar_event_id = Some(event_id);
            Ok(outcome(StatusCode::OK, "Meeting confirmed", Some(meeting)))
        }
        Err(err) => {
            tracing::warn!(meeting_id = id, error = %err, "Calendar sync failed after confirmation");
            Ok(outcome(
                StatusCode::OK,
                format!("Meeting confirmed; calendar sync failed: {err}"),
                Some(meeting),
            ))
        }
    }
}

/// PUT /api/v1/meetings/{id}/reject
pub async fn reject_meeting(
    State(state): State<AppState>,
    RequireAdmin(user): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Meeting>>> {
    let admin = caller_admin(&state, &user).await?;
    let existing = MeetingRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    ensure_transition(current_status(&existing)?, MeetingStatus::Rejected)?;

    let meeting = MeetingRepo::reject(&state.pool, id, admin.id)
        .await?
        .ok_or_else(|| not_found(id))?;
    tracing::info!(meeting_id = id, admin_id = admin.id, "Meeting rejected");
    Ok(Json(DataResponse { data: meeting }))
}

/// DELETE /api/v1/meetings/{id}
///
/// Also removes the synced calendar event. Failing to remove it does not
/// block the delete.
pub async fn delete_meeting(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let meeting = MeetingRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;

    if !MeetingRepo::delete(&state.pool, id).await? {
        return Err(not_found(id));
    }
    if let (Some(admin_id), Some(event_id)) = (meeting.admin_id, meeting.calendar_event_id.as_deref()) {
        discard_event(&state, admin_id, event_id).await;
    }
    tracing::info!(meeting_id = id, "Meeting deleted");
    Ok(StatusCode::NO_CONTENT)
}
