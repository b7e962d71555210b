//! Skill ledger rows and ledger-mutation DTOs.

use serde::{Deserialize, Serialize};
use skillgauge_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `user_skills` table. Status fields are stored as strings
/// and converted to the core enums at the engine boundary.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct UserSkill {
    pub id: DbId,
    pub user_id: DbId,
    pub skill_id: DbId,
    pub source: String,
    pub level: Option<String>,
    pub validation_status: String,
    pub validated_by: Option<DbId>,
    pub validated_at: Option<Timestamp>,
    pub validation_note: Option<String>,
    pub created_at: Timestamp,
}

/// One declared skill in a resubmission.
#[derive(Debug, Clone, Deserialize)]
pub struct DeclaredSkill {
    pub skill_id: DbId,
    pub level: Option<String>,
}

/// A mentor's validation decision applied to one ledger row.
#[derive(Debug, Clone)]
pub struct ValidationDecision {
    pub user_skill_id: DbId,
    pub mentor_id: DbId,
    /// `validated` or `rejected`.
    pub status: String,
    pub note: Option<String>,
}
