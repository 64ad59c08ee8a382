//! Repository for the `equipment_categories` table.

use hrm_core::types::DbId;
use sqlx::PgPool;

use crate::models::equipment::{
    CreateEquipmentCategory, EquipmentCategory, UpdateEquipmentCategory,
};

const COLUMNS: &str = "id, name, description, created_at, updated_at";

pub struct EquipmentCategoryRepo;

impl EquipmentCategoryRepo {
    pub async fn create(
        pool: &PgPool,
        input: &CreateEquipmentCategory,
    ) -> Result<EquipmentCategory, sqlx::Error> {
        let query = format!(
            "INSERT INTO equipment_categories (name, description) VALUES ($1, $2) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, EquipmentCategory>(&query)
            .bind(&input.name)
            .bind(&input.description)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<EquipmentCategory>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM equipment_categories WHERE id = $1");
        sqlx::query_as::<_, EquipmentCategory>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list(pool: &PgPool) -> Result<Vec<EquipmentCategory>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM equipment_categories ORDER BY name ASC");
        sqlx::query_as::<_, EquipmentCategory>(&query)
            .fetch_all(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateEquipmentCategory,
    ) -> Result<Option<EquipmentCategory>, sqlx::Error> {
        let query = format!(
            "UPDATE equipment_categories SET
                name = COALESCE($2, name),
                description = COALESCE($3, description)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, EquipmentCategory>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.description)
            .fetch_optional(pool)
            .await
    }

    /// Delete a category. Items in it become uncategorized.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM equipment_categories WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
