//! Route definitions for the `/calendar` integration.

use axum::routing::{delete, get, post};
use axum::Router;

use crate::handlers::calendar;
use crate::state::AppState;

/// Routes mounted at `/calendar`. All require the admin role.
///
/// ```text
/// POST   /oauth/exchange        -> exchange_code
/// DELETE /oauth                 -> disconnect
/// POST   /events                -> create_event
/// GET    /events/{event_id}     -> get_event
/// PUT    /events/{event_id}     -> update_event
/// DELETE /events/{event_id}     -> delete_event
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/oauth/exchange", post(calendar::exchange_code))
        .route("/oauth", delete(calendar::disconnect))
        .route("/events", post(calendar::create_event))
        .route(
            "/events/{event_id}",
            get(calendar::get_event)
                .put(calendar::update_event)
                .delete(calendar::delete_event),
        )
}
