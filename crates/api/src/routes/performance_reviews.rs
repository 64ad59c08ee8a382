//! Route definitions for the `/performance-reviews` resource.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::performance_reviews as reviews;
use crate::state::AppState;

/// Routes mounted at `/performance-reviews`.
///
/// ```text
/// GET    /                          -> list_reviews (?admin_id=&start_date=)
/// POST   /                          -> create_review (admin)
/// GET    /upcoming                  -> list_upcoming
/// GET    /pending                   -> list_pending
/// GET    /completed                 -> list_completed
/// GET    /employee/{employee_id}    -> list_by_employee
/// GET    /{id}                      -> get_review
/// PUT    /{id}                      -> update_review (admin)
/// DELETE /{id}                      -> delete_review (admin)
/// PUT    /{id}/rating               -> set_rating (admin)
/// PUT    /{id}/status               -> set_status (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(reviews::list_reviews).post(reviews::create_review))
        .route("/upcoming", get(reviews::list_upcoming))
        .route("/pending", get(reviews::list_pending))
        .route("/completed", get(reviews::list_completed))
        .route("/employee/{employee_id}", get(reviews::list_by_employee))
        .route(
            "/{id}",
            get(reviews::get_review)
                .put(reviews::update_review)
                .delete(reviews::delete_review),
        )
        .route("/{id}/rating", put(reviews::set_rating))
        .route("/{id}/status", put(reviews::set_status))
}
