//! Route definitions for leave types, requests and balances.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::leave;
use crate::state::AppState;

/// Routes mounted at `/leave-types`.
///
/// ```text
/// GET    /      -> list_leave_types
/// POST   /      -> create_leave_type (admin)
/// GET    /{id}  -> get_leave_type
/// PUT    /{id}  -> update_leave_type (admin)
/// DELETE /{id}  -> delete_leave_type (admin)
/// ```
pub fn types_router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(leave::list_leave_types).post(leave::create_leave_type),
        )
        .route(
            "/{id}",
            get(leave::get_leave_type)
                .put(leave::update_leave_type)
                .delete(leave::delete_leave_type),
        )
}

/// Routes mounted at `/leave-requests`.
///
/// ```text
/// GET    /                -> list_leave_requests (admin, ?status=)
/// POST   /                -> create_leave_request (employee)
/// GET    /employee/{id}   -> list_by_employee (admin or owner)
/// GET    /{id}            -> get_leave_request (admin or owner)
/// DELETE /{id}            -> delete_leave_request (admin)
/// PUT    /{id}/approve    -> approve_leave_request (admin)
/// PUT    /{id}/reject     -> reject_leave_request (admin)
/// PUT    /{id}/pending    -> reopen_leave_request (admin)
/// ```
pub fn requests_router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(leave::list_leave_requests).post(leave::create_leave_request),
        )
        .route("/employee/{id}", get(leave::list_by_employee))
        .route(
            "/{id}",
            get(leave::get_leave_request).delete(leave::delete_leave_request),
        )
        .route("/{id}/approve", put(leave::approve_leave_request))
        .route("/{id}/reject", put(leave::reject_leave_request))
        .route("/{id}/pending", put(leave::reopen_leave_request))
}

/// Routes mounted at `/leave-balances`.
///
/// ```text
/// PUT /               -> upsert_balance (admin)
/// GET /employee/{id}  -> list_balances (admin or owner)
/// ```
pub fn balances_router() -> Router<AppState> {
    Router::new()
        .route("/", put(leave::upsert_balance))
        .route("/employee/{id}", get(leave::list_balances))
}
