//! Route definitions for the `/meetings` resource.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::meetings;
use crate::state::AppState;

/// Routes mounted at `/meetings`.
///
/// ```text
/// GET    /                -> list_meetings (?status=)
/// POST   /                -> create_meeting (employee)
/// GET    /employee/{id}   -> list_by_employee (?status=)
/// GET    /admin/{id}      -> list_by_admin (?status=)
/// GET    /{id}            -> get_meeting
/// DELETE /{id}            -> delete_meeting (admin)
/// PUT    /{id}/confirm    -> confirm_meeting (admin)
/// PUT    /{id}/reject     -> reject_meeting (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(meetings::list_meetings).post(meetings::create_meeting),
        )
        .route("/employee/{id}", get(meetings::list_by_employee))
        .route("/admin/{id}", get(meetings::list_by_admin))
        .route(
            "/{id}",
            get(meetings::get_meeting).delete(meetings::delete_meeting),
        )
        .route("/{id}/confirm", put(meetings::confirm_meeting))
        .route("/{id}/reject", put(meetings::reject_meeting))
}
