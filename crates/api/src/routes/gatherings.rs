use axum::routing::get;
use axum::Router;

use crate::handlers::gatherings;
use crate::state::AppState;

/// Routes mounted at `/gatherings`.
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(gatherings::list_gatherings))
}
