//! Route definitions for the `/admins` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::admins;
use crate::state::AppState;

/// Routes mounted at `/admins`.
///
/// ```text
/// GET    /      -> list_admins
/// POST   /      -> create_admin (admin)
/// GET    /{id}  -> get_admin
/// PUT    /{id}  -> update_admin (admin)
/// DELETE /{id}  -> delete_admin (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(admins::list_admins).post(admins::create_admin))
        .route(
            "/{id}",
            get(admins::get_admin)
                .put(admins::update_admin)
                .delete(admins::delete_admin),
        )
}
