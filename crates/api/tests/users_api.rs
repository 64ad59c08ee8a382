//! Integration tests for role assignment, availability, and the
//! employee/admin extension records.

mod common;

use axum::http::StatusCode;
use common::{body_json, get_auth, post_json_auth, put_json_auth};
use hrm_core::roles::UserRole;
use hrm_db::repositories::{AdminRepo, EmployeeRepo, UserRepo};
use serde_json::json;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Roles
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn get_role_of_unknown_user_returns_404(pool: PgPool) {
    let (_, _, token) = common::seed_admin(&pool, "Grace Admin", "grace@example.com").await;
    let app = common::build_test_app(pool);

    let response = get_auth(app, "/api/v1/users/9999/role", &token).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn set_role_persists_new_role(pool: PgPool) {
    let (_, _, token) = common::seed_admin(&pool, "Grace Admin", "grace@example.com").await;
    let user = common::create_user(&pool, "New Hire", "hire@example.com", UserRole::Unassigned).await;
    let app = common::build_test_app(pool);

    let uri = format!("/api/v1/users/{}/role", user.id);
    let response = put_json_auth(app.clone(), &uri, json!({ "role": "employee" }), &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["role"], "employee");

    let json = body_json(get_auth(app, &uri, &token).await).await;
    assert_eq!(json["data"]["role"], "employee");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn invalid_role_is_rejected_without_mutation(pool: PgPool) {
    let (_, _, token) = common::seed_admin(&pool, "Grace Admin", "grace@example.com").await;
    let user = common::create_user(&pool, "New Hire", "hire@example.com", UserRole::Unassigned).await;
    let app = common::build_test_app(pool.clone());

    for bad in ["superuser", "", "ADMINISTRATOR"] {
        let response = put_json_auth(
            app.clone(),
            &format!("/api/v1/users/{}/role", user.id),
            json!({ "role": bad }),
            &token,
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "role {bad:?}");
    }

    let role_id = UserRepo::get_role_id(&pool, user.id).await.unwrap();
    assert_eq!(role_id, Some(UserRole::Unassigned.id()));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn set_role_of_unknown_user_returns_404(pool: PgPool) {
    let (_, _, token) = common::seed_admin(&pool, "Grace Admin", "grace@example.com").await;
    let app = common::build_test_app(pool);

    let response = put_json_auth(
        app,
        "/api/v1/users/9999/role",
        json!({ "role": "admin" }),
        &token,
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn non_admin_cannot_set_roles(pool: PgPool) {
    let (user, _, token) = common::seed_employee(&pool, "Alan Employee", "alan@example.com").await;
    let app = common::build_test_app(pool);

    let response = put_json_auth(
        app,
        &format!("/api/v1/users/{}/role", user.id),
        json!({ "role": "admin" }),
        &token,
    )
    .await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

// ---------------------------------------------------------------------------
// Availability
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn unassigned_users_are_available(pool: PgPool) {
    let (_, _, token) = common::seed_admin(&pool, "Grace Admin", "grace@example.com").await;
    let mut ids = Vec::new();
    for i in 0..3 {
        let user = common::create_user(
            &pool,
            &format!("Applicant {i}"),
            &format!("applicant{i}@example.com"),
            UserRole::Unassigned,
        )
        .await;
        ids.push(user.id);
    }
    let app = common::build_test_app(pool);

    for id in ids {
        let response =
            get_auth(app.clone(), &format!("/api/v1/users/{id}/availability"), &token).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["data"]["available"], true);
    }
}

#[sqlx::test(migrations = "../db/migrations")]
async fn assigned_roles_are_unavailable(pool: PgPool) {
    let (admin_user, _, token) =
        common::seed_admin(&pool, "Grace Admin", "grace@example.com").await;
    let (employee_user, _, _) =
        common::seed_employee(&pool, "Alan Employee", "alan@example.com").await;
    // Role assigned but no extension row yet.
    let promoted = common::create_user(&pool, "Promoted", "promoted@example.com", UserRole::Employee).await;
    let app = common::build_test_app(pool);

    for id in [admin_user.id, employee_user.id, promoted.id] {
        let json = body_json(
            get_auth(app.clone(), &format!("/api/v1/users/{id}/availability"), &token).await,
        )
        .await;
        assert_eq!(json["data"]["available"], false, "user {id}");
    }
}

#[sqlx::test(migrations = "../db/migrations")]
async fn availability_of_unknown_user_returns_404(pool: PgPool) {
    let (_, _, token) = common::seed_admin(&pool, "Grace Admin", "grace@example.com").await;
    let app = common::build_test_app(pool);

    let response = get_auth(app, "/api/v1/users/9999/availability", &token).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn unlinked_users_exclude_extension_owners(pool: PgPool) {
    let (admin_user, _, token) =
        common::seed_admin(&pool, "Grace Admin", "grace@example.com").await;
    let loose = common::create_user(&pool, "Loose", "loose@example.com", UserRole::Unassigned).await;
    let app = common::build_test_app(pool);

    let json = body_json(get_auth(app, "/api/v1/users/unlinked", &token).await).await;
    let ids: Vec<i64> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|u| u["id"].as_i64().unwrap())
        .collect();

    assert!(ids.contains(&loose.id));
    assert!(!ids.contains(&admin_user.id));
}

// ---------------------------------------------------------------------------
// Extension records
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn employee_record_requires_employee_role(pool: PgPool) {
    let (_, _, token) = common::seed_admin(&pool, "Grace Admin", "grace@example.com").await;
    let unassigned =
        common::create_user(&pool, "Not Yet", "notyet@example.com", UserRole::Unassigned).await;
    let hire = common::create_user(&pool, "Hire", "hire@example.com", UserRole::Employee).await;
    let app = common::build_test_app(pool);

    let body = |user_id: i64| {
        json!({
            "user_id": user_id,
            "job_title": "Analyst",
            "department": "Finance",
            "salary_cents": 5_000_000,
        })
    };

    let response =
        post_json_auth(app.clone(), "/api/v1/employees", body(unassigned.id), &token).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let response = post_json_auth(app.clone(), "/api/v1/employees", body(hire.id), &token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["full_name"], "Hire");
    assert_eq!(json["data"]["email"], "hire@example.com");

    // One employee row per user.
    let response = post_json_auth(app, "/api/v1/employees", body(hire.id), &token).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn negative_salary_is_rejected(pool: PgPool) {
    let (_, _, token) = common::seed_admin(&pool, "Grace Admin", "grace@example.com").await;
    let hire = common::create_user(&pool, "Hire", "hire@example.com", UserRole::Employee).await;
    let app = common::build_test_app(pool);

    let response = post_json_auth(
        app,
        "/api/v1/employees",
        json!({
            "user_id": hire.id,
            "job_title": "Analyst",
            "department": "Finance",
            "salary_cents": -1,
        }),
        &token,
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn admin_record_requires_admin_role(pool: PgPool) {
    let (_, _, token) = common::seed_admin(&pool, "Grace Admin", "grace@example.com").await;
    let (employee_user, _, _) =
        common::seed_employee(&pool, "Alan Employee", "alan@example.com").await;
    let app = common::build_test_app(pool);

    let response = post_json_auth(
        app,
        "/api/v1/admins",
        json!({ "user_id": employee_user.id, "position": "Lead" }),
        &token,
    )
    .await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn role_change_does_not_allow_a_second_extension_record(pool: PgPool) {
    let (_, _, token) = common::seed_admin(&pool, "Grace Admin", "grace@example.com").await;
    let user = common::create_user(&pool, "Switcher", "switch@example.com", UserRole::Admin).await;
    let app = common::build_test_app(pool.clone());

    let response = post_json_auth(
        app.clone(),
        "/api/v1/admins",
        json!({ "user_id": user.id, "position": "Lead" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let uri = format!("/api/v1/users/{}/role", user.id);
    let response = put_json_auth(app.clone(), &uri, json!({ "role": "employee" }), &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = post_json_auth(
        app,
        "/api/v1/employees",
        json!({
            "user_id": user.id,
            "job_title": "Analyst",
            "department": "Finance",
            "salary_cents": 5_000_000,
        }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let json = body_json(response).await;
    assert_eq!(json["code"], "CONFLICT");
    assert!(json["error"].as_str().unwrap().contains("already has"));

    assert!(EmployeeRepo::find_by_user_id(&pool, user.id)
        .await
        .unwrap()
        .is_none());
    assert!(AdminRepo::find_by_user_id(&pool, user.id)
        .await
        .unwrap()
        .is_some());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn verify_and_profile_picture(pool: PgPool) {
    let (_, _, admin_token) = common::seed_admin(&pool, "Grace Admin", "grace@example.com").await;
    let (user, _, token) = common::seed_employee(&pool, "Alan Employee", "alan@example.com").await;
    let app = common::build_test_app(pool);

    let response = post_json_auth(
        app.clone(),
        &format!("/api/v1/users/{}/verify", user.id),
        json!({}),
        &admin_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = put_json_auth(
        app.clone(),
        "/api/v1/users/me/profile-picture",
        json!({ "profile_picture_url": "not a url" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = put_json_auth(
        app,
        "/api/v1/users/me/profile-picture",
        json!({ "profile_picture_url": "https://cdn.example.com/alan.png" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["profile_picture_url"], "https://cdn.example.com/alan.png");
    assert_eq!(json["data"]["is_verified"], true);
}
