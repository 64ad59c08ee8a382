#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use chrono::{Duration, Utc};
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use hrm_api::auth::jwt::JwtConfig;
use hrm_api::config::{parse_cors_origins, ServerConfig};
use hrm_api::router::build_app_router;
use hrm_api::state::AppState;
use hrm_calendar::{
    CalendarError, CalendarEvent, CalendarProvider, EventInput, GoogleConfig, OAuthTokens,
};
use hrm_core::roles::UserRole;
use hrm_db::models::admin::{Admin, CreateAdmin};
use hrm_db::models::calendar_token::UpsertCalendarToken;
use hrm_db::models::employee::{CreateEmployee, Employee};
use hrm_db::models::user::{CreateUser, User};
use hrm_db::repositories::{AdminRepo, CalendarTokenRepo, EmployeeRepo, UserRepo};

// ---------------------------------------------------------------------------
// App construction
// ---------------------------------------------------------------------------

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: parse_cors_origins("http://localhost:5173"),
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        jwt: JwtConfig {
            secret: "test-secret-do-not-use-in-production".to_string(),
            access_token_expiry_mins: 15,
            refresh_token_expiry_days: 7,
        },
        google: GoogleConfig {
            client_id: "test-client".to_string(),
            client_secret: "test-secret".to_string(),
            redirect_uri: "http://localhost:3000/oauth/callback".to_string(),
            calendar_id: "primary".to_string(),
            token_url: "http://127.0.0.1:9/token".to_string(),
            api_base_url: "http://127.0.0.1:9/calendar/v3".to_string(),
            request_timeout_secs: 1,
        },
    }
}

/// Build the full application router against a fresh [`FakeCalendar`].
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with(pool, Arc::new(FakeCalendar::default()))
}

/// Build the full application router with a caller-held calendar fake so
/// the test can inspect the calls it received.
pub fn build_test_app_with(pool: PgPool, calendar: Arc<FakeCalendar>) -> Router {
    let state = AppState {
        pool,
        config: Arc::new(test_config()),
        calendar,
    };
    build_app_router(state)
}

// ---------------------------------------------------------------------------
// Fake calendar provider
// ---------------------------------------------------------------------------

/// In-memory [`CalendarProvider`] that records every call.
///
/// Event ids are `evt-1`, `evt-2`, ... The id `missing` is always reported
/// as not found. Setting `fail_events` makes every event call fail with an
/// API error.
#[derive(Default)]
pub struct FakeCalendar {
    pub calls: Mutex<Vec<String>>,
    pub fail_events: AtomicBool,
    next_id: AtomicUsize,
}

impl FakeCalendar {
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    fn check_events(&self, event_id: Option<&str>) -> Result<(), CalendarError> {
        if self.fail_events.load(Ordering::SeqCst) {
            return Err(CalendarError::Api {
                status: 503,
                message: "backend unavailable".into(),
            });
        }
        if event_id == Some("missing") {
            return Err(CalendarError::NotFound("missing".into()));
        }
        Ok(())
    }

    fn event(id: String, input: &EventInput) -> CalendarEvent {
        CalendarEvent {
            id,
            status: Some("confirmed".into()),
            summary: Some(input.summary.clone()),
            description: input.description.clone(),
            location: input.location.clone(),
            start_time: Some(input.start_time),
            end_time: Some(input.end_time),
            attendees: input.attendees.clone(),
            html_link: None,
            meet_link: input
                .with_meet_link
                .then(|| "https://meet.example.com/abc".to_string()),
        }
    }
}

#[async_trait]
impl CalendarProvider for FakeCalendar {
    async fn exchange_code(&self, code: &str) -> Result<OAuthTokens, CalendarError> {
        self.record(format!("exchange:{code}"));
        Ok(OAuthTokens {
            access_token: format!("access-{code}"),
            refresh_token: Some(format!("refresh-{code}")),
            expires_at: Utc::now() + Duration::hours(1),
            scope: Some(hrm_calendar::oauth::CALENDAR_SCOPE.to_string()),
        })
    }

    async fn refresh_token(&self, refresh_token: &str) -> Result<OAuthTokens, CalendarError> {
        self.record(format!("refresh:{refresh_token}"));
        Ok(OAuthTokens {
            access_token: "access-refreshed".to_string(),
            refresh_token: None,
            expires_at: Utc::now() + Duration::hours(1),
            scope: None,
        })
    }

    async fn create_event(
        &self,
        access_token: &str,
        input: &EventInput,
    ) -> Result<CalendarEvent, CalendarError> {
        self.record(format!("create:{access_token}"));
        self.check_events(None)?;
        let id = format!("evt-{}", self.next_id.fetch_add(1, Ordering::SeqCst) + 1);
        Ok(Self::event(id, input))
    }

    async fn get_event(
        &self,
        access_token: &str,
        event_id: &str,
    ) -> Result<CalendarEvent, CalendarError> {
        self.record(format!("get:{access_token}:{event_id}"));
        self.check_events(Some(event_id))?;
        Ok(CalendarEvent {
            id: event_id.to_string(),
            status: Some("confirmed".into()),
            summary: Some("Existing event".into()),
            description: None,
            location: None,
            start_time: None,
            end_time: None,
            attendees: Vec::new(),
            html_link: None,
            meet_link: None,
        })
    }

    async fn update_event(
        &self,
        access_token: &str,
        event_id: &str,
        input: &EventInput,
    ) -> Result<CalendarEvent, CalendarError> {
        self.record(format!("update:{access_token}:{event_id}"));
        self.check_events(Some(event_id))?;
        Ok(Self::event(event_id.to_string(), input))
    }

    async fn delete_event(&self, access_token: &str, event_id: &str) -> Result<(), CalendarError> {
        self.record(format!("delete:{access_token}:{event_id}"));
        self.check_events(Some(event_id))
    }
}

// ---------------------------------------------------------------------------
// Seed data
// ---------------------------------------------------------------------------

pub const TEST_PASSWORD: &str = "correct horse battery";

/// Insert a user with the given role. The password is [`TEST_PASSWORD`].
pub async fn create_user(pool: &PgPool, full_name: &str, email: &str, role: UserRole) -> User {
    let password_hash =
        hrm_api::auth::password::hash_password(TEST_PASSWORD).expect("hashing should succeed");
    let user = UserRepo::create(
        pool,
        &CreateUser {
            full_name: full_name.to_string(),
            email: email.to_string(),
            password_hash,
        },
    )
    .await
    .expect("user creation should succeed");

    if role == UserRole::Unassigned {
        return user;
    }
    UserRepo::set_role(pool, user.id, role.id())
        .await
        .expect("role update should succeed")
        .expect("user should exist")
}

/// Mint an access token for `user` with the role it currently holds.
pub fn token_for(user: &User) -> String {
    let role = UserRole::from_id(user.role_id).expect("seeded role should be known");
    test_config()
        .jwt
        .issue_access_token(user.id, role)
        .expect("token generation should succeed")
}

/// An admin user with its admin row and a token.
pub async fn seed_admin(pool: &PgPool, full_name: &str, email: &str) -> (User, Admin, String) {
    let user = create_user(pool, full_name, email, UserRole::Admin).await;
    let admin = AdminRepo::create(
        pool,
        &CreateAdmin {
            user_id: user.id,
            position: "HR Manager".to_string(),
            department: Some("People".to_string()),
            phone: None,
        },
    )
    .await
    .expect("admin creation should succeed");
    let token = token_for(&user);
    (user, admin, token)
}

/// An employee user with its employee row and a token.
pub async fn seed_employee(
    pool: &PgPool,
    full_name: &str,
    email: &str,
) -> (User, Employee, String) {
    let user = create_user(pool, full_name, email, UserRole::Employee).await;
    let employee = EmployeeRepo::create(
        pool,
        &CreateEmployee {
            user_id: user.id,
            job_title: "Engineer".to_string(),
            department: "Platform".to_string(),
            salary_cents: 9_000_000,
            hire_date: None,
            phone: None,
        },
    )
    .await
    .expect("employee creation should succeed");
    let token = token_for(&user);
    (user, employee, token)
}

/// Store a calendar grant for `admin_id` that stays valid for an hour.
pub async fn connect_calendar(pool: &PgPool, admin_id: i64, access_token: &str) {
    CalendarTokenRepo::upsert(
        pool,
        &UpsertCalendarToken {
            admin_id,
            access_token: access_token.to_string(),
            refresh_token: "stored-refresh".to_string(),
            expires_at: Utc::now() + Duration::hours(1),
            scope: None,
        },
    )
    .await
    .expect("calendar token upsert should succeed");
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
    }
    let body = match body {
        Some(json) => {
            builder = builder.header(CONTENT_TYPE, "application/json");
            Body::from(serde_json::to_vec(&json).unwrap())
        }
        None => Body::empty(),
    };
    app.oneshot(builder.body(body).unwrap()).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response {
    send(app, Method::GET, uri, Some(token), None).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send(app, Method::POST, uri, None, Some(body)).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response {
    send(app, Method::POST, uri, Some(token), Some(body)).await
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response {
    send(app, Method::PUT, uri, Some(token), Some(body)).await
}

/// PUT without a body, for action endpoints such as `/approve`.
pub async fn put_auth(app: Router, uri: &str, token: &str) -> Response {
    send(app, Method::PUT, uri, Some(token), None).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response {
    send(app, Method::DELETE, uri, Some(token), None).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
