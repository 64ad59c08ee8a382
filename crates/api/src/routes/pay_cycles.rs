//! Route definitions for the `/pay-cycles` resource.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::pay_cycles;
use crate::state::AppState;

/// Routes mounted at `/pay-cycles`.
///
/// ```text
/// GET    /                -> list_pay_cycles (admin)
/// POST   /                -> create_pay_cycle (admin)
/// GET    /employee/{id}   -> list_by_employee (admin or owner)
/// GET    /{id}            -> get_pay_cycle (admin or owner)
/// PUT    /{id}            -> update_pay_cycle (admin)
/// DELETE /{id}            -> delete_pay_cycle (admin)
/// PUT    /{id}/paid       -> mark_paid (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(pay_cycles::list_pay_cycles).post(pay_cycles::create_pay_cycle),
        )
        .route("/employee/{id}", get(pay_cycles::list_by_employee))
        .route(
            "/{id}",
            get(pay_cycles::get_pay_cycle)
                .put(pay_cycles::update_pay_cycle)
                .delete(pay_cycles::delete_pay_cycle),
        )
        .route("/{id}/paid", put(pay_cycles::mark_paid))
}
