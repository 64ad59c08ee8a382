//! Employee extension rows.

use hrm_core::types::{Date, DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from `employees` with the owning user's name and email joined in.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Employee {
    pub id: DbId,
    pub user_id: DbId,
    pub full_name: String,
    pub email: String,
    pub job_title: String,
    pub department: String,
    pub salary_cents: i64,
    pub hire_date: Option<Date>,
    pub phone: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating an employee record for an existing user.
#[derive(Debug, Deserialize)]
pub struct CreateEmployee {
    pub user_id: DbId,
    pub job_title: String,
    pub department: String,
    #[serde(default)]
    pub salary_cents: i64,
    pub hire_date: Option<Date>,
    pub phone: Option<String>,
}

/// DTO for updating an employee. All fields are optional.
#[derive(Debug, Deserialize)]
pub struct UpdateEmployee {
    pub job_title: Option<String>,
    pub department: Option<String>,
    pub salary_cents: Option<i64>,
    pub hire_date: Option<Date>,
    pub phone: Option<String>,
}
