//! Handlers for the calendar integration: connecting an admin's calendar
//! and managing events on it.
//!
//! Every call runs with the calling admin's stored OAuth grant. The access
//! token is refreshed first when it is about to expire.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use hrm_calendar::oauth::needs_refresh;
use hrm_calendar::{CalendarError, CalendarEvent, EventInput};
use hrm_core::types::{DbId, Timestamp};
use hrm_db::models::calendar_token::UpsertCalendarToken;
use hrm_db::repositories::CalendarTokenRepo;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::handlers::admins::caller_admin;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct ExchangeRequest {
    #[validate(length(min = 1))]
    pub code: String,
}

/// Public view of a stored grant. Token values are never returned.
#[derive(Debug, Serialize)]
pub struct CalendarConnection {
    pub admin_id: DbId,
    pub expires_at: Timestamp,
    pub scope: Option<String>,
}

/// Return a usable access token for `admin_id`, refreshing and persisting
/// it when it expires within the refresh margin.
pub(crate) async fn access_token_for_admin(state: &AppState, admin_id: DbId) -> AppResult<String> {
    let token = CalendarTokenRepo::find_by_admin(&state.pool, admin_id)
        .await?
        .ok_or_else(|| {
            AppError::BadRequest(format!("Calendar is not connected for admin {admin_id}"))
        })?;

    if !needs_refresh(token.expires_at, Utc::now()) {
        return Ok(token.access_token);
    }

    let refreshed = state.calendar.refresh_token(&token.refresh_token).await?;
    CalendarTokenRepo::update_access_token(
        &state.pool,
        admin_id,
        &refreshed.access_token,
        refreshed.refresh_token.as_deref(),
        refreshed.expires_at,
    )
    .await?;
    tracing::debug!(admin_id, expires_at = %refreshed.expires_at, "Calendar token refreshed");

    Ok(refreshed.access_token)
}

/// Write an event to `admin_id`'s calendar: update `event_id` when one is
/// stored, create it otherwise.
pub(crate) async fn put_event(
    state: &AppState,
    admin_id: DbId,
    event_id: Option<&str>,
    input: &EventInput,
) -> AppResult<CalendarEvent> {
    let access_token = access_token_for_admin(state, admin_id).await?;
    let event = match event_id {
        Some(event_id) => {
            state
                .calendar
                .update_event(&access_token, event_id, input)
                .await?
        }
        None => state.calendar.create_event(&access_token, input).await?,
    };
    Ok(event)
}

/// Remove an event from `admin_id`'s calendar.
///
/// Failures are logged, not returned. An event the provider no longer
/// knows counts as removed.
pub(crate) async fn discard_event(state: &AppState, admin_id: DbId, event_id: &str) {
    let result = async {
        let access_token = access_token_for_admin(state, admin_id).await?;
        state.calendar.delete_event(&access_token, event_id).await?;
        Ok::<_, AppError>(())
    }
    .await;

    match result {
        Ok(()) | Err(AppError::Calendar(CalendarError::NotFound(_))) => {
            tracing::debug!(admin_id, event_id, "Calendar event removed");
        }
        Err(err) => {
            tracing::warn!(admin_id, event_id, error = %err, "Calendar event removal failed");
        }
    }
}

/// POST /api/v1/calendar/oauth/exchange
pub async fn exchange_code(
    State(state): State<AppState>,
    RequireAdmin(user): RequireAdmin,
    Json(input): Json<ExchangeRequest>,
) -> AppResult<Json<DataResponse<CalendarConnection>>> {
    input.validate()?;
    let admin = caller_admin(&state, &user).await?;

    let tokens = state.calendar.exchange_code(&input.code).await?;
    let refresh_token = tokens.refresh_token.ok_or_else(|| {
        CalendarError::InvalidInput("provider did not issue a refresh token".into())
    })?;

    let stored = CalendarTokenRepo::upsert(
        &state.pool,
        &UpsertCalendarToken {
            admin_id: admin.id,
            access_token: tokens.access_token,
            refresh_token,
            expires_at: tokens.expires_at,
            scope: tokens.scope,
        },
    )
    .await?;

    tracing::info!(admin_id = admin.id, "Calendar connected");
    Ok(Json(DataResponse {
        data: CalendarConnection {
            admin_id: stored.admin_id,
            expires_at: stored.expires_at,
            scope: stored.scope,
        },
    }))
}

/// DELETE /api/v1/calendar/oauth
///
/// Forget the caller's stored grant. Events already written stay in the
/// external calendar.
pub async fn disconnect(
    State(state): State<AppState>,
    RequireAdmin(user): RequireAdmin,
) -> AppResult<StatusCode> {
    let admin = caller_admin(&state, &user).await?;
    if !CalendarTokenRepo::delete(&state.pool, admin.id).await? {
        return Err(AppError::BadRequest(format!(
            "Calendar is not connected for admin {}",
            admin.id
        )));
    }
    tracing::info!(admin_id = admin.id, "Calendar disconnected");
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/calendar/events
pub async fn create_event(
    State(state): State<AppState>,
    RequireAdmin(user): RequireAdmin,
    Json(input): Json<EventInput>,
) -> AppResult<(StatusCode, Json<DataResponse<CalendarEvent>>)> {
    input.validate()?;
    let admin = caller_admin(&state, &user).await?;
    let access_token = access_token_for_admin(&state, admin.id).await?;

    let event = state.calendar.create_event(&access_token, &input).await?;
    tracing::info!(admin_id = admin.id, event_id = %event.id, "Calendar event created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: event })))
}

/// GET /api/v1/calendar/events/{event_id}
pub async fn get_event(
    State(state): State<AppState>,
    RequireAdmin(user): RequireAdmin,
    Path(event_id): Path<String>,
) -> AppResult<Json<DataResponse<CalendarEvent>>> {
    let admin = caller_admin(&state, &user).await?;
    let access_token = access_token_for_admin(&state, admin.id).await?;

    let event = state.calendar.get_event(&access_token, &event_id).await?;
    Ok(Json(DataResponse { data: event }))
}

/// PUT /api/v1/calendar/events/{event_id}
pub async fn update_event(
    State(state): State<AppState>,
    RequireAdmin(user): RequireAdmin,
    Path(event_id): Path<String>,
    Json(input): Json<EventInput>,
) -> AppResult<Json<DataResponse<CalendarEvent>>> {
    input.validate()?;
    let admin = caller_admin(&state, &user).await?;
    let access_token = access_token_for_admin(&state, admin.id).await?;

    let event = state
        .calendar
        .update_event(&access_token, &event_id, &input)
        .await?;
    tracing::info!(admin_id = admin.id, event_id = %event.id, "Calendar event updated");
    Ok(Json(DataResponse { data: event }))
}

/// DELETE /api/v1/calendar/events/{event_id}
pub async fn delete_event(
    State(state): State<AppState>,
    RequireAdmin(user): RequireAdmin,
    Path(event_id): Path<String>,
) -> AppResult<StatusCode> {
    let admin = caller_admin(&state, &user).await?;
    let access_token = access_token_for_admin(&state, admin.id).await?;

    state.calendar.delete_event(&access_token, &event_id).await?;
    tracing::info!(admin_id = admin.id, event_id = %event_id, "Calendar event deleted");
    Ok(StatusCode::NO_CONTENT)
}
