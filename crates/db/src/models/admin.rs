//! Admin extension rows.

use hrm_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from `admins` with the owning user's name and email joined in.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Admin {
    pub id: DbId,
    pub user_id: DbId,
    pub full_name: String,
    pub email: String,
    pub position: String,
    pub department: Option<String>,
    pub phone: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating an admin record for an existing user.
#[derive(Debug, Deserialize)]
pub struct CreateAdmin {
    pub user_id: DbId,
    pub position: String,
    pub department: Option<String>,
    pub phone: Option<String>,
}

/// DTO for updating an admin. All fields are optional.
#[derive(Debug, Deserialize)]
pub struct UpdateAdmin {
    pub position: Option<String>,
    pub department: Option<String>,
    pub phone: Option<String>,
}
