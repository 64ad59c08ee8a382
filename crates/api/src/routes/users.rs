//! Route definitions for the `/users` resource.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::users;
use crate::state::AppState;

/// Routes mounted at `/users`.
///
/// ```text
/// GET  /                        -> list_users (admin)
/// GET  /unlinked                -> list_unlinked (admin)
/// PUT  /me/profile-picture      -> update_my_profile_picture
/// GET  /{id}                    -> get_user (admin)
/// GET  /{id}/role               -> get_user_role
/// PUT  /{id}/role               -> set_user_role (admin)
/// GET  /{id}/availability       -> get_availability
/// POST /{id}/verify             -> verify_user (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(users::list_users))
        .route("/unlinked", get(users::list_unlinked))
        .route("/me/profile-picture", put(users::update_my_profile_picture))
        .route("/{id}", get(users::get_user))
        .route(
            "/{id}/role",
            get(users::get_user_role).put(users::set_user_role),
        )
        .route("/{id}/availability", get(users::get_availability))
        .route("/{id}/verify", post(users::verify_user))
}
