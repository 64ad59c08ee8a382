use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    /// `ok`, or `degraded` when the database does not answer.
    pub status: &'static str,
    pub version: &'static str,
    pub db_healthy: bool,
    /// Google OAuth client credentials are present. Says nothing about
    /// whether any admin has connected a calendar.
    pub calendar_configured: bool,
}

impl HealthResponse {
    fn new(db_healthy: bool, calendar_configured: bool) -> Self {
        Self {
            status: if db_healthy { "ok" } else { "degraded" },
            version: env!("CARGO_PKG_VERSION"),
            db_healthy,
            calendar_configured,
        }
    }
}

/// GET /health
///
/// Always 200 so load balancers can tell "up but degraded" from "down".
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_healthy = hrm_db::health_check(&state.pool).await.is_ok();
    Json(HealthResponse::new(
        db_healthy,
        state.config.google.is_configured(),
    ))
}

/// Mounted at the root, outside `/api/v1`.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
