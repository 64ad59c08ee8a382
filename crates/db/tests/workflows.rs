//! Integration tests for reviews, meetings, leave, equipment, and pay
//! cycles against a real database.

use chrono::{Duration, NaiveDate, TimeZone, Utc};
use hrm_core::status::{LeaveStatus, MeetingStatus, ReviewStatus};
use hrm_db::models::admin::CreateAdmin;
use hrm_db::models::employee::CreateEmployee;
use hrm_db::models::equipment::{CreateEquipment, CreateEquipmentCategory};
use hrm_db::models::leave::{CreateLeaveRequest, CreateLeaveType, UpsertLeaveBalance};
use hrm_db::models::meeting::{ConfirmMeeting, CreateMeeting};
use hrm_db::models::pay_cycle::CreatePayCycle;
use hrm_db::models::performance_review::PerformanceReviewFields;
use hrm_db::models::user::CreateUser;
use hrm_db::repositories::{
    AdminRepo, EmployeeRepo, EquipmentCategoryRepo, EquipmentRepo, LeaveBalanceRepo,
    LeaveRequestRepo, LeaveTypeRepo, MeetingRepo, PayCycleRepo, PerformanceReviewRepo, UserRepo,
};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Create one admin and one employee, returning `(admin_id, employee_id)`.
async fn seed_people(pool: &PgPool) -> (i64, i64) {
    let admin_user = UserRepo::create(
        pool,
        &CreateUser {
            full_name: "Grace Admin".to_string(),
            email: "grace@example.com".to_string(),
            password_hash: "hash".to_string(),
        },
    )
    .await
    .unwrap();
    let employee_user = UserRepo::create(
        pool,
        &CreateUser {
            full_name: "Alan Employee".to_string(),
            email: "alan@example.com".to_string(),
            password_hash: "hash".to_string(),
        },
    )
    .await
    .unwrap();

    let admin = AdminRepo::create(
        pool,
        &CreateAdmin {
            user_id: admin_user.id,
            position: "HR Manager".to_string(),
            department: None,
            phone: None,
        },
    )
    .await
    .unwrap();
    let employee = EmployeeRepo::create(
        pool,
        &CreateEmployee {
            user_id: employee_user.id,
            job_title: "Analyst".to_string(),
            department: "Finance".to_string(),
            salary_cents: 0,
            hire_date: None,
            phone: None,
        },
    )
    .await
    .unwrap();

    (admin.id, employee.id)
}

fn review(admin_id: i64, employee_id: i64, status: ReviewStatus) -> PerformanceReviewFields {
    let start = Utc.with_ymd_and_hms(2026, 3, 10, 9, 0, 0).unwrap();
    PerformanceReviewFields {
        admin_id,
        employee_id,
        start_time: Some(start),
        end_time: Some(start + Duration::hours(1)),
        location: Some("Room 4".to_string()),
        is_online: false,
        meeting_link: None,
        rating: None,
        comment: None,
        document_url: None,
        status_id: status.id(),
    }
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

// ---------------------------------------------------------------------------
// Performance reviews
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_review_create_joins_names(pool: PgPool) {
    let (admin_id, employee_id) = seed_people(&pool).await;

    let created = PerformanceReviewRepo::create(
        &pool,
        &review(admin_id, employee_id, ReviewStatus::Pending),
    )
    .await
    .unwrap();

    assert_eq!(created.admin_name, "Grace Admin");
    assert_eq!(created.employee_name, "Alan Employee");
    assert_eq!(created.status, "pending");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_list_by_status_returns_only_matching(pool: PgPool) {
    let (admin_id, employee_id) = seed_people(&pool).await;
    for status in [
        ReviewStatus::Completed,
        ReviewStatus::Completed,
        ReviewStatus::Upcoming,
    ] {
        PerformanceReviewRepo::create(&pool, &review(admin_id, employee_id, status))
            .await
            .unwrap();
    }

    let upcoming = PerformanceReviewRepo::list_by_status(&pool, ReviewStatus::Upcoming.id())
        .await
        .unwrap();
    assert_eq!(upcoming.len(), 1);
    assert_eq!(upcoming[0].status, "upcoming");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_review_update_touches_only_target_row(pool: PgPool) {
    let (admin_id, employee_id) = seed_people(&pool).await;
    let first = PerformanceReviewRepo::create(
        &pool,
        &review(admin_id, employee_id, ReviewStatus::Pending),
    )
    .await
    .unwrap();
    let second = PerformanceReviewRepo::create(
        &pool,
        &review(admin_id, employee_id, ReviewStatus::Pending),
    )
    .await
    .unwrap();

    let mut fields = review(admin_id, employee_id, ReviewStatus::Completed);
    fields.rating = Some(4);
    fields.comment = Some("Solid quarter".to_string());
    let updated = PerformanceReviewRepo::update(&pool, first.id, &fields)
        .await
        .unwrap()
        .expect("review exists");
    assert_eq!(updated.rating, Some(4));
    assert_eq!(updated.status, "completed");

    let untouched = PerformanceReviewRepo::find_by_id(&pool, second.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(untouched.status, "pending");
    assert_eq!(untouched.rating, None);

    assert!(PerformanceReviewRepo::update(&pool, 9_999, &fields)
        .await
        .unwrap()
        .is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_list_by_admin_and_date_filters_by_day(pool: PgPool) {
    let (admin_id, employee_id) = seed_people(&pool).await;
    let mut other_day = review(admin_id, employee_id, ReviewStatus::Upcoming);
    other_day.start_time = Some(Utc.with_ymd_and_hms(2026, 3, 11, 9, 0, 0).unwrap());
    other_day.end_time = Some(Utc.with_ymd_and_hms(2026, 3, 11, 10, 0, 0).unwrap());

    PerformanceReviewRepo::create(&pool, &review(admin_id, employee_id, ReviewStatus::Upcoming))
        .await
        .unwrap();
    PerformanceReviewRepo::create(&pool, &other_day)
        .await
        .unwrap();

    let on_day = PerformanceReviewRepo::list_by_admin_and_date(&pool, admin_id, date(2026, 3, 10))
        .await
        .unwrap();
    assert_eq!(on_day.len(), 1);

    let wrong_admin =
        PerformanceReviewRepo::list_by_admin_and_date(&pool, admin_id + 1, date(2026, 3, 10))
            .await
            .unwrap();
    assert!(wrong_admin.is_empty());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_rating_out_of_range_violates_check(pool: PgPool) {
    let (admin_id, employee_id) = seed_people(&pool).await;
    let mut fields = review(admin_id, employee_id, ReviewStatus::Completed);
    fields.rating = Some(6);

    let result = PerformanceReviewRepo::create(&pool, &fields).await;
    assert!(result.is_err());
}

// ---------------------------------------------------------------------------
// Meetings
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_meeting_confirm_fills_schedule(pool: PgPool) {
    let (admin_id, employee_id) = seed_people(&pool).await;
    let meeting = MeetingRepo::create(
        &pool,
        &CreateMeeting {
            employee_id,
            purpose: "Discuss promotion".to_string(),
            start_time: None,
            end_time: None,
        },
    )
    .await
    .unwrap();
    assert_eq!(meeting.status, "requested");
    assert_eq!(meeting.admin_name, None);

    let start = Utc.with_ymd_and_hms(2026, 4, 1, 14, 0, 0).unwrap();
    let confirmed = MeetingRepo::confirm(
        &pool,
        meeting.id,
        &ConfirmMeeting {
            admin_id,
            start_time: start,
            end_time: start + Duration::minutes(30),
            location: None,
            is_online: true,
            meeting_link: Some("https://meet.example.com/abc".to_string()),
        },
    )
    .await
    .unwrap()
    .expect("meeting exists");

    assert_eq!(confirmed.status_id, MeetingStatus::Confirmed.id());
    assert_eq!(confirmed.admin_name.as_deref(), Some("Grace Admin"));
    assert_eq!(confirmed.start_time, Some(start));

    let confirmed_list =
        MeetingRepo::list_by_admin(&pool, admin_id, Some(MeetingStatus::Confirmed.id()))
            .await
            .unwrap();
    assert_eq!(confirmed_list.len(), 1);
    let requested_list =
        MeetingRepo::list_by_employee(&pool, employee_id, Some(MeetingStatus::Requested.id()))
            .await
            .unwrap();
    assert!(requested_list.is_empty());
}

// ---------------------------------------------------------------------------
// Leave
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_leave_request_days_are_inclusive(pool: PgPool) {
    let (_, employee_id) = seed_people(&pool).await;
    let leave_type = LeaveTypeRepo::create(
        &pool,
        &CreateLeaveType {
            name: "Annual".to_string(),
            default_days: 20,
        },
    )
    .await
    .unwrap();

    let request = LeaveRequestRepo::create(
        &pool,
        &CreateLeaveRequest {
            employee_id,
            leave_type_id: leave_type.id,
            start_date: date(2026, 5, 4),
            end_date: date(2026, 5, 8),
            reason: None,
        },
    )
    .await
    .unwrap();

    assert_eq!(request.days, 5);
    assert_eq!(request.leave_type, "Annual");
    assert_eq!(request.status_id, LeaveStatus::Pending.id());

    let approved = LeaveRequestRepo::set_status(&pool, request.id, LeaveStatus::Approved.id())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(approved.status, "approved");

    let pending = LeaveRequestRepo::list(&pool, Some(LeaveStatus::Pending.id()))
        .await
        .unwrap();
    assert!(pending.is_empty());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_leave_balance_upsert_and_adjust(pool: PgPool) {
    let (_, employee_id) = seed_people(&pool).await;
    let leave_type = LeaveTypeRepo::create(
        &pool,
        &CreateLeaveType {
            name: "Sick".to_string(),
            default_days: 10,
        },
    )
    .await
    .unwrap();

    assert!(LeaveBalanceRepo::adjust(&pool, employee_id, leave_type.id, -2)
        .await
        .unwrap()
        .is_none());

    let input = UpsertLeaveBalance {
        employee_id,
        leave_type_id: leave_type.id,
        remaining_days: 10,
    };
    LeaveBalanceRepo::upsert(&pool, &input).await.unwrap();
    let replaced = LeaveBalanceRepo::upsert(
        &pool,
        &UpsertLeaveBalance {
            remaining_days: 8,
            ..input
        },
    )
    .await
    .unwrap();
    assert_eq!(replaced.remaining_days, 8);

    let adjusted = LeaveBalanceRepo::adjust(&pool, employee_id, leave_type.id, -3)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(adjusted.remaining_days, 5);

    let balances = LeaveBalanceRepo::list_by_employee(&pool, employee_id)
        .await
        .unwrap();
    assert_eq!(balances.len(), 1);
    assert_eq!(balances[0].leave_type, "Sick");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_leave_type_in_use_cannot_be_deleted(pool: PgPool) {
    let (_, employee_id) = seed_people(&pool).await;
    let leave_type = LeaveTypeRepo::create(
        &pool,
        &CreateLeaveType {
            name: "Annual".to_string(),
            default_days: 20,
        },
    )
    .await
    .unwrap();
    LeaveRequestRepo::create(
        &pool,
        &CreateLeaveRequest {
            employee_id,
            leave_type_id: leave_type.id,
            start_date: date(2026, 5, 4),
            end_date: date(2026, 5, 4),
            reason: None,
        },
    )
    .await
    .unwrap();

    let err = LeaveTypeRepo::delete(&pool, leave_type.id).await.unwrap_err();
    let db_err = err.as_database_error().expect("database error");
    assert_eq!(db_err.code().as_deref(), Some("23503"));
}

// ---------------------------------------------------------------------------
// Equipment and pay cycles
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_equipment_assign_and_unassign(pool: PgPool) {
    let (_, employee_id) = seed_people(&pool).await;
    let category = EquipmentCategoryRepo::create(
        &pool,
        &CreateEquipmentCategory {
            name: "Laptops".to_string(),
            description: None,
        },
    )
    .await
    .unwrap();
    let item = EquipmentRepo::create(
        &pool,
        &CreateEquipment {
            name: "ThinkPad".to_string(),
            serial_number: "SN-001".to_string(),
            condition: None,
            category_id: Some(category.id),
        },
    )
    .await
    .unwrap();
    assert_eq!(item.condition, "good");
    assert_eq!(item.category_name.as_deref(), Some("Laptops"));
    assert!(item.employee_id.is_none());

    let assigned = EquipmentRepo::assign(&pool, item.id, employee_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(assigned.employee_name.as_deref(), Some("Alan Employee"));
    assert!(assigned.assigned_at.is_some());
    assert_eq!(
        EquipmentRepo::list_by_employee(&pool, employee_id)
            .await
            .unwrap()
            .len(),
        1
    );

    let returned = EquipmentRepo::unassign(&pool, item.id).await.unwrap().unwrap();
    assert!(returned.employee_id.is_none());
    assert!(returned.assigned_at.is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_pay_cycle_mark_paid(pool: PgPool) {
    let (_, employee_id) = seed_people(&pool).await;
    let cycle = PayCycleRepo::create(
        &pool,
        &CreatePayCycle {
            employee_id,
            period_start: date(2026, 6, 1),
            period_end: date(2026, 6, 30),
            pay_date: date(2026, 7, 1),
            gross_cents: 600_000,
            net_cents: 450_000,
        },
    )
    .await
    .unwrap();
    assert!(!cycle.is_paid);

    let paid = PayCycleRepo::mark_paid(&pool, cycle.id).await.unwrap().unwrap();
    assert!(paid.is_paid);
    assert_eq!(
        PayCycleRepo::list_by_employee(&pool, employee_id)
            .await
            .unwrap()
            .len(),
        1
    );
}
