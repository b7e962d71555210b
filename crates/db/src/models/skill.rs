//! Reference data: categories (target roles) and their skills.

use serde::Serialize;
use skillgauge_core::types::DbId;
use sqlx::FromRow;

/// A row from the `categories` table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Category {
    pub id: DbId,
    pub name: String,
}

/// A row from the `skills` table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Skill {
    pub id: DbId,
    pub category_id: DbId,
    pub name: String,
}
