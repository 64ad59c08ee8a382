//! Equipment and equipment categories.

use hrm_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `equipment_categories` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct EquipmentCategory {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a category.
#[derive(Debug, Deserialize)]
pub struct CreateEquipmentCategory {
    pub name: String,
    pub description: Option<String>,
}

/// DTO for updating a category. All fields are optional.
#[derive(Debug, Deserialize)]
pub struct UpdateEquipmentCategory {
    pub name: Option<String>,
    pub description: Option<String>,
}

/// A row from `equipment` with the category and assignee names joined in.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Equipment {
    pub id: DbId,
    pub name: String,
    pub serial_number: String,
    pub condition: String,
    pub category_id: Option<DbId>,
    pub category_name: Option<String>,
    pub employee_id: Option<DbId>,
    pub employee_name: Option<String>,
    pub assigned_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for registering a piece of equipment.
#[derive(Debug, Deserialize)]
pub struct CreateEquipment {
    pub name: String,
    pub serial_number: String,
    pub condition: Option<String>,
    pub category_id: Option<DbId>,
}

/// DTO for updating equipment. Assignment has its own endpoints.
#[derive(Debug, Deserialize)]
pub struct UpdateEquipment {
    pub name: Option<String>,
    pub serial_number: Option<String>,
    pub condition: Option<String>,
    pub category_id: Option<DbId>,
}
