use axum::routing::post;
use axum::Router;

use crate::handlers::auth;
use crate::state::AppState;

/// `/auth`. Only `/logout` needs a bearer token.
///
/// ```text
/// POST /register
/// POST /login
/// POST /refresh
/// POST /logout
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/refresh", post(auth::refresh))
        .route("/logout", post(auth::logout))
}
