pub mod admins;
pub mod auth;
pub mod calendar;
pub mod employees;
pub mod equipment;
pub mod gatherings;
pub mod health;
pub mod leave;
pub mod meetings;
pub mod pay_cycles;
pub mod performance_reviews;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register | /login | /refresh | /logout          authentication
///
/// /users                                               user accounts and roles
/// /employees, /admins                                  extension records
///
/// /performance-reviews                                 PRM workflow
/// /meetings                                            meeting requests
///
/// /leave-types, /leave-requests, /leave-balances       leave workflow
///
/// /equipment-categories, /equipment                    equipment tracking
/// /pay-cycles                                          payroll periods
///
/// /calendar/oauth/exchange, /calendar/events           Google Calendar
/// /gatherings                                          reviews + meetings, merged
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Authentication routes (register, login, refresh, logout).
        .nest("/auth", auth::router())
        // People.
        .nest("/users", users::router())
        .nest("/employees", employees::router())
        .nest("/admins", admins::router())
        // Performance reviews and meetings.
        .nest("/performance-reviews", performance_reviews::router())
        .nest("/meetings", meetings::router())
        // Leave.
        .nest("/leave-types", leave::types_router())
        .nest("/leave-requests", leave::requests_router())
        .nest("/leave-balances", leave::balances_router())
        // Equipment and payroll.
        .nest("/equipment-categories", equipment::categories_router())
        .nest("/equipment", equipment::router())
        .nest("/pay-cycles", pay_cycles::router())
        // Calendar integration and the merged calendar view.
        .nest("/calendar", calendar::router())
        .nest("/gatherings", gatherings::router())
}
