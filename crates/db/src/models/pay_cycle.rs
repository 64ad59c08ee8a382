//! Pay cycle rows and DTOs. Amounts are in cents.

use hrm_core::types::{Date, DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `pay_cycles` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PayCycle {
    pub id: DbId,
    pub employee_id: DbId,
    pub period_start: Date,
    pub period_end: Date,
    pub pay_date: Date,
    pub gross_cents: i64,
    pub net_cents: i64,
    pub is_paid: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a pay cycle.
#[derive(Debug, Deserialize)]
pub struct CreatePayCycle {
    pub employee_id: DbId,
    pub period_start: Date,
    pub period_end: Date,
    pub pay_date: Date,
    pub gross_cents: i64,
    pub net_cents: i64,
}

/// DTO for updating a pay cycle. All fields are optional.
#[derive(Debug, Deserialize)]
pub struct UpdatePayCycle {
    pub period_start: Option<Date>,
    pub period_end: Option<Date>,
    pub pay_date: Option<Date>,
    pub gross_cents: Option<i64>,
    pub net_cents: Option<i64>,
}
