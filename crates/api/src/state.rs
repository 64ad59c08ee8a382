use std::sync::Arc;

use hrm_calendar::CalendarProvider;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheap to clone: the pool and everything else sit behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: hrm_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// External calendar backend (Google in production, a fake in tests).
    pub calendar: Arc<dyn CalendarProvider>,
}
