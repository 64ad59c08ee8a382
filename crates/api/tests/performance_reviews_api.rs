//! Integration tests for the performance review (PRM) endpoints.

mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use common::{body_json, delete_auth, get_auth, post_json_auth, put_json_auth, FakeCalendar};
use serde_json::{json, Value};
use sqlx::PgPool;

struct Fixture {
    app: axum::Router,
    calendar: Arc<FakeCalendar>,
    pool: PgPool,
    admin_id: i64,
    employee_id: i64,
    admin_token: String,
    employee_token: String,
}

async fn fixture(pool: PgPool) -> Fixture {
    let (_, admin, admin_token) =
        common::seed_admin(&pool, "Grace Admin", "grace@example.com").await;
    let (_, employee, employee_token) =
        common::seed_employee(&pool, "Alan Employee", "alan@example.com").await;
    let calendar = Arc::new(FakeCalendar::default());
    Fixture {
        app: common::build_test_app_with(pool.clone(), Arc::clone(&calendar)),
        calendar,
        pool,
        admin_id: admin.id,
        employee_id: employee.id,
        admin_token,
        employee_token,
    }
}

fn review_body(f: &Fixture, start: &str, end: &str, status: &str) -> Value {
    json!({
        "admin_id": f.admin_id,
        "employee_id": f.employee_id,
        "start_time": start,
        "end_time": end,
        "location": "Room 4",
        "status": status,
    })
}

async fn create_review(f: &Fixture, body: Value) -> Value {
    let response =
        post_json_auth(f.app.clone(), "/api/v1/performance-reviews", body, &f.admin_token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"].clone()
}

#[sqlx::test(migrations = "../db/migrations")]
async fn create_returns_joined_names(pool: PgPool) {
    let f = fixture(pool).await;

    let review = create_review(
        &f,
        review_body(&f, "2026-03-02T09:00:00Z", "2026-03-02T10:00:00Z", "pending"),
    )
    .await;

    assert_eq!(review["admin_name"], "Grace Admin");
    assert_eq!(review["employee_name"], "Alan Employee");
    assert_eq!(review["status"], "pending");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn employees_cannot_create_reviews(pool: PgPool) {
    let f = fixture(pool).await;

    let response = post_json_auth(
        f.app.clone(),
        "/api/v1/performance-reviews",
        review_body(&f, "2026-03-02T09:00:00Z", "2026-03-02T10:00:00Z", "pending"),
        &f.employee_token,
    )
    .await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn create_validates_window_and_status(pool: PgPool) {
    let f = fixture(pool).await;

    let backwards = review_body(&f, "2026-03-02T10:00:00Z", "2026-03-02T09:00:00Z", "pending");
    let response =
        post_json_auth(f.app.clone(), "/api/v1/performance-reviews", backwards, &f.admin_token)
            .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let bad_status = review_body(&f, "2026-03-02T09:00:00Z", "2026-03-02T10:00:00Z", "overdue");
    let response =
        post_json_auth(f.app.clone(), "/api/v1/performance-reviews", bad_status, &f.admin_token)
            .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn upcoming_returns_only_upcoming_reviews(pool: PgPool) {
    let f = fixture(pool).await;

    create_review(&f, review_body(&f, "2026-01-05T09:00:00Z", "2026-01-05T10:00:00Z", "completed")).await;
    let upcoming = create_review(
        &f,
        review_body(&f, "2026-04-01T09:00:00Z", "2026-04-01T10:00:00Z", "upcoming"),
    )
    .await;
    create_review(&f, review_body(&f, "2026-02-05T09:00:00Z", "2026-02-05T10:00:00Z", "completed")).await;

    let json = body_json(
        get_auth(f.app.clone(), "/api/v1/performance-reviews/upcoming", &f.employee_token).await,
    )
    .await;
    let items = json["data"].as_array().unwrap();

    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["id"], upcoming["id"]);
    assert_eq!(items[0]["status"], "upcoming");

    let completed = body_json(
        get_auth(f.app.clone(), "/api/v1/performance-reviews/completed", &f.admin_token).await,
    )
    .await;
    assert_eq!(completed["data"].as_array().unwrap().len(), 2);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn list_by_admin_and_start_date(pool: PgPool) {
    let f = fixture(pool).await;

    let same_day = create_review(
        &f,
        review_body(&f, "2026-03-02T15:00:00Z", "2026-03-02T16:00:00Z", "upcoming"),
    )
    .await;
    create_review(&f, review_body(&f, "2026-03-03T09:00:00Z", "2026-03-03T10:00:00Z", "upcoming")).await;

    let uri = format!(
        "/api/v1/performance-reviews?admin_id={}&start_date=2026-03-02",
        f.admin_id
    );
    let json = body_json(get_auth(f.app.clone(), &uri, &f.admin_token).await).await;
    let items = json["data"].as_array().unwrap();

    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["id"], same_day["id"]);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn update_mutates_only_the_target_row(pool: PgPool) {
    let f = fixture(pool).await;

    let target = create_review(
        &f,
        review_body(&f, "2026-03-02T09:00:00Z", "2026-03-02T10:00:00Z", "pending"),
    )
    .await;
    let other = create_review(
        &f,
        review_body(&f, "2026-03-09T09:00:00Z", "2026-03-09T10:00:00Z", "pending"),
    )
    .await;

    let mut body = review_body(&f, "2026-03-04T13:00:00Z", "2026-03-04T14:00:00Z", "upcoming");
    body["location"] = json!("Board room");
    body["is_online"] = json!(true);
    body["meeting_link"] = json!("https://meet.example.com/review");

    let uri = format!("/api/v1/performance-reviews/{}", target["id"]);
    let response = put_json_auth(f.app.clone(), &uri, body, &f.admin_token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let updated = body_json(response).await["data"].clone();
    assert_eq!(updated["location"], "Board room");
    assert_eq!(updated["status"], "upcoming");
    assert_eq!(updated["is_online"], true);

    let uri = format!("/api/v1/performance-reviews/{}", other["id"]);
    let unchanged = body_json(get_auth(f.app.clone(), &uri, &f.admin_token).await).await["data"].clone();
    assert_eq!(unchanged["location"], other["location"]);
    assert_eq!(unchanged["start_time"], other["start_time"]);
    assert_eq!(unchanged["status"], "pending");
    assert_eq!(unchanged["updated_at"], other["updated_at"]);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn update_of_missing_review_returns_404(pool: PgPool) {
    let f = fixture(pool).await;

    let body = review_body(&f, "2026-03-04T13:00:00Z", "2026-03-04T14:00:00Z", "pending");
    let response =
        put_json_auth(f.app.clone(), "/api/v1/performance-reviews/9999", body, &f.admin_token).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn status_transitions_follow_the_table(pool: PgPool) {
    let f = fixture(pool).await;
    let review = create_review(
        &f,
        review_body(&f, "2026-03-02T09:00:00Z", "2026-03-02T10:00:00Z", "pending"),
    )
    .await;
    let uri = format!("/api/v1/performance-reviews/{}/status", review["id"]);

    let set = |status: &'static str| {
        let app = f.app.clone();
        let uri = uri.clone();
        let token = f.admin_token.clone();
        async move { put_json_auth(app, &uri, json!({ "status": status }), &token).await }
    };

    assert_eq!(set("upcoming").await.status(), StatusCode::OK);
    assert_eq!(set("upcoming").await.status(), StatusCode::OK);
    assert_eq!(set("completed").await.status(), StatusCode::OK);

    let response = set("pending").await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(response).await["code"], "CONFLICT");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn rating_is_bounded(pool: PgPool) {
    let f = fixture(pool).await;
    let review = create_review(
        &f,
        review_body(&f, "2026-03-02T09:00:00Z", "2026-03-02T10:00:00Z", "completed"),
    )
    .await;
    let uri = format!("/api/v1/performance-reviews/{}/rating", review["id"]);

    let response = put_json_auth(
        f.app.clone(),
        &uri,
        json!({ "rating": 6, "comment": "off the charts" }),
        &f.admin_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = put_json_auth(
        f.app.clone(),
        &uri,
        json!({ "rating": 4, "comment": "Strong quarter" }),
        &f.admin_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["rating"], 4);
    assert_eq!(json["data"]["comment"], "Strong quarter");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn list_by_employee_and_delete(pool: PgPool) {
    let f = fixture(pool).await;
    let review = create_review(
        &f,
        review_body(&f, "2026-03-02T09:00:00Z", "2026-03-02T10:00:00Z", "pending"),
    )
    .await;

    let uri = format!("/api/v1/performance-reviews/employee/{}", f.employee_id);
    let json = body_json(get_auth(f.app.clone(), &uri, &f.employee_token).await).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);

    let uri = format!("/api/v1/performance-reviews/{}", review["id"]);
    let response = delete_auth(f.app.clone(), &uri, &f.admin_token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get_auth(f.app.clone(), &uri, &f.admin_token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Calendar sync
// ---------------------------------------------------------------------------

fn synced(mut body: Value) -> Value {
    body["sync_calendar"] = json!(true);
    body
}

#[sqlx::test(migrations = "../db/migrations")]
async fn synced_review_follows_update_and_delete(pool: PgPool) {
    let f = fixture(pool).await;
    common::connect_calendar(&f.pool, f.admin_id, "stored-access").await;

    let review = create_review(
        &f,
        synced(review_body(&f, "2026-03-02T09:00:00Z", "2026-03-02T10:00:00Z", "upcoming")),
    )
    .await;
    assert_eq!(review["calendar_event_id"], "evt-1");

    let uri = format!("/api/v1/performance-reviews/{}", review["id"]);
    let body = synced(review_body(&f, "2026-03-03T09:00:00Z", "2026-03-03T10:00:00Z", "upcoming"));
    let response = put_json_auth(f.app.clone(), &uri, body, &f.admin_token).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["calendar_event_id"], "evt-1");

    let response = delete_auth(f.app.clone(), &uri, &f.admin_token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert_eq!(
        f.calendar.calls(),
        vec![
            "create:stored-access".to_string(),
            "update:stored-access:evt-1".to_string(),
            "delete:stored-access:evt-1".to_string(),
        ]
    );
}

#[sqlx::test(migrations = "../db/migrations")]
async fn sync_requires_a_schedule(pool: PgPool) {
    let f = fixture(pool).await;
    common::connect_calendar(&f.pool, f.admin_id, "stored-access").await;

    let body = json!({
        "admin_id": f.admin_id,
        "employee_id": f.employee_id,
        "sync_calendar": true,
    });
    let response =
        post_json_auth(f.app.clone(), "/api/v1/performance-reviews", body, &f.admin_token).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(f.calendar.calls().is_empty());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn status_change_can_sync_the_review(pool: PgPool) {
    let f = fixture(pool).await;
    common::connect_calendar(&f.pool, f.admin_id, "stored-access").await;
    let review = create_review(
        &f,
        review_body(&f, "2026-03-02T09:00:00Z", "2026-03-02T10:00:00Z", "pending"),
    )
    .await;
    assert!(review["calendar_event_id"].is_null());

    let uri = format!("/api/v1/performance-reviews/{}/status", review["id"]);
    let response = put_json_auth(
        f.app.clone(),
        &uri,
        json!({ "status": "upcoming", "sync_calendar": true }),
        &f.admin_token,
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["status"], "upcoming");
    assert_eq!(json["data"]["calendar_event_id"], "evt-1");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn sync_failure_keeps_the_review(pool: PgPool) {
    let f = fixture(pool).await;

    let review = create_review(
        &f,
        synced(review_body(&f, "2026-03-02T09:00:00Z", "2026-03-02T10:00:00Z", "pending")),
    )
    .await;

    assert!(review["calendar_event_id"].is_null());
    let uri = format!("/api/v1/performance-reviews/{}", review["id"]);
    let response = get_auth(f.app.clone(), &uri, &f.admin_token).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn reassigning_a_synced_review_moves_the_event(pool: PgPool) {
    let f = fixture(pool).await;
    common::connect_calendar(&f.pool, f.admin_id, "stored-access").await;
    let (_, other, _) = common::seed_admin(&f.pool, "Ada Admin", "ada@example.com").await;
    common::connect_calendar(&f.pool, other.id, "other-access").await;

    let review = create_review(
        &f,
        synced(review_body(&f, "2026-03-02T09:00:00Z", "2026-03-02T10:00:00Z", "upcoming")),
    )
    .await;

    let mut body = synced(review_body(&f, "2026-03-02T09:00:00Z", "2026-03-02T10:00:00Z", "upcoming"));
    body["admin_id"] = json!(other.id);
    let uri = format!("/api/v1/performance-reviews/{}", review["id"]);
    let response = put_json_auth(f.app.clone(), &uri, body, &f.admin_token).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["admin_name"], "Ada Admin");
    assert_eq!(json["data"]["calendar_event_id"], "evt-2");
    assert_eq!(
        f.calendar.calls(),
        vec![
            "create:stored-access".to_string(),
            "delete:stored-access:evt-1".to_string(),
            "create:other-access".to_string(),
        ]
    );
}

#[sqlx::test(migrations = "../db/migrations")]
async fn update_with_unknown_admin_returns_404(pool: PgPool) {
    let f = fixture(pool).await;
    let review = create_review(
        &f,
        review_body(&f, "2026-03-02T09:00:00Z", "2026-03-02T10:00:00Z", "pending"),
    )
    .await;

    let mut body = review_body(&f, "2026-03-02T09:00:00Z", "2026-03-02T10:00:00Z", "pending");
    body["admin_id"] = json!(9999);
    let uri = format!("/api/v1/performance-reviews/{}", review["id"]);
    let response = put_json_auth(f.app.clone(), &uri, body, &f.admin_token).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["code"], "NOT_FOUND");
    assert_eq!(json["error"], "Admin with id 9999 not found");
}
