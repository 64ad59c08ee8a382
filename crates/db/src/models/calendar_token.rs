//! Stored per-admin OAuth grants for the calendar provider.

use hrm_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from `calendar_tokens`. Holds secrets; never serialized.
#[derive(Debug, Clone, FromRow)]
pub struct CalendarToken {
    pub id: DbId,
    pub admin_id: DbId,
    pub access_token: String,
    pub refresh_token: String,
    pub expires_at: Timestamp,
    pub scope: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for inserting or replacing an admin's grant.
#[derive(Debug, Clone)]
pub struct UpsertCalendarToken {
    pub admin_id: DbId,
    pub access_token: String,
    pub refresh_token: String,
    pub expires_at: Timestamp,
    pub scope: Option<String>,
}
