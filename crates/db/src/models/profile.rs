//! User profile rows (target-role resolution).

use serde::Serialize;
use skillgauge_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `user_profiles` table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct UserProfile {
    pub user_id: DbId,
    pub target_category_id: Option<DbId>,
    pub updated_at: Timestamp,
}
