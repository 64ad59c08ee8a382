//! Route definitions for equipment and equipment categories.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::equipment;
use crate::state::AppState;

/// Routes mounted at `/equipment-categories`.
///
/// ```text
/// GET    /      -> list_categories
/// POST   /      -> create_category (admin)
/// GET    /{id}  -> get_category
/// PUT    /{id}  -> update_category (admin)
/// DELETE /{id}  -> delete_category (admin)
/// ```
pub fn categories_router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(equipment::list_categories).post(equipment::create_category),
        )
        .route(
            "/{id}",
            get(equipment::get_category)
                .put(equipment::update_category)
                .delete(equipment::delete_category),
        )
}

/// Routes mounted at `/equipment`.
///
/// ```text
/// GET    /                -> list_equipment
/// POST   /                -> create_equipment (admin)
/// GET    /employee/{id}   -> list_by_employee
/// GET    /{id}            -> get_equipment
/// PUT    /{id}            -> update_equipment (admin)
/// DELETE /{id}            -> delete_equipment (admin)
/// PUT    /{id}/assign     -> assign_equipment (admin)
/// PUT    /{id}/unassign   -> unassign_equipment (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(equipment::list_equipment).post(equipment::create_equipment),
        )
        .route("/employee/{id}", get(equipment::list_by_employee))
        .route(
            "/{id}",
            get(equipment::get_equipment)
                .put(equipment::update_equipment)
                .delete(equipment::delete_equipment),
        )
        .route("/{id}/assign", put(equipment::assign_equipment))
        .route("/{id}/unassign", put(equipment::unassign_equipment))
}
