//! Integration tests for pay cycles.

mod common;

use axum::http::StatusCode;
use common::{body_json, get_auth, post_json_auth, put_auth, put_json_auth};
use serde_json::json;
use sqlx::PgPool;

#[sqlx::test(migrations = "../db/migrations")]
async fn pay_cycle_lifecycle(pool: PgPool) {
    let (_, _, admin_token) = common::seed_admin(&pool, "Grace Admin", "grace@example.com").await;
    let (_, employee, employee_token) =
        common::seed_employee(&pool, "Alan Employee", "alan@example.com").await;
    let app = common::build_test_app(pool);

    let response = post_json_auth(
        app.clone(),
        "/api/v1/pay-cycles",
        json!({
            "employee_id": employee.id,
            "period_start": "2026-06-01",
            "period_end": "2026-06-30",
            "pay_date": "2026-07-01",
            "gross_cents": 750_000,
            "net_cents": 560_000,
        }),
        &admin_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let cycle = body_json(response).await["data"].clone();
    assert_eq!(cycle["is_paid"], false);

    let uri = format!("/api/v1/pay-cycles/{}", cycle["id"]);
    let response = put_json_auth(
        app.clone(),
        &uri,
        json!({ "net_cents": 800_000 }),
        &admin_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST, "net above stored gross");

    let response = put_auth(app.clone(), &format!("{uri}/paid"), &admin_token).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["is_paid"], true);

    let own = format!("/api/v1/pay-cycles/employee/{}", employee.id);
    let json = body_json(get_auth(app, &own, &employee_token).await).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn invalid_periods_and_amounts_are_rejected(pool: PgPool) {
    let (_, _, admin_token) = common::seed_admin(&pool, "Grace Admin", "grace@example.com").await;
    let (_, employee, _) = common::seed_employee(&pool, "Alan Employee", "alan@example.com").await;
    let app = common::build_test_app(pool);

    let cases = [
        ("2026-06-30", "2026-06-01", 100, 50),
        ("2026-06-01", "2026-06-30", 100, 150),
        ("2026-06-01", "2026-06-30", -1, 0),
    ];
    for (start, end, gross, net) in cases {
        let response = post_json_auth(
            app.clone(),
            "/api/v1/pay-cycles",
            json!({
                "employee_id": employee.id,
                "period_start": start,
                "period_end": end,
                "pay_date": "2026-07-01",
                "gross_cents": gross,
                "net_cents": net,
            }),
            &admin_token,
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{start}..{end} {gross}/{net}");
    }
}

#[sqlx::test(migrations = "../db/migrations")]
async fn employees_only_see_their_own_cycles(pool: PgPool) {
    let (_, employee, _) = common::seed_employee(&pool, "Alan Employee", "alan@example.com").await;
    let (_, _, other_token) =
        common::seed_employee(&pool, "Other Employee", "other@example.com").await;
    let app = common::build_test_app(pool);

    let response = get_auth(
        app.clone(),
        &format!("/api/v1/pay-cycles/employee/{}", employee.id),
        &other_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = get_auth(app, "/api/v1/pay-cycles", &other_token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}
