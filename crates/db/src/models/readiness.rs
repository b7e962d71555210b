//! Readiness score history rows and the frozen breakdown.

use serde::Serialize;
use skillgauge_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the append-only `readiness_scores` table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ReadinessScore {
    pub id: DbId,
    pub user_id: DbId,
    pub category_id: DbId,
    pub total_score: i64,
    pub max_possible_score: i64,
    pub trigger_source: String,
    pub calculated_at: Timestamp,
}

/// A row from `readiness_breakdown`. Frozen at write time; later ledger
/// changes never alter a past breakdown.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ReadinessBreakdownRow {
    pub id: DbId,
    pub readiness_id: DbId,
    pub skill_id: DbId,
    pub skill_name: String,
    pub required_weight: i32,
    pub achieved_weight: i32,
    pub status: String,
    pub skill_source: Option<String>,
    pub importance: String,
}

/// Insert DTO for one score row plus its breakdown lines.
#[derive(Debug, Clone)]
pub struct NewReadinessScore {
    pub user_id: DbId,
    pub category_id: DbId,
    pub total_score: i64,
    pub max_possible_score: i64,
    pub trigger_source: String,
}

/// Insert DTO for one breakdown line.
#[derive(Debug, Clone)]
pub struct NewBreakdownLine {
    pub skill_id: DbId,
    pub skill_name: String,
    pub required_weight: i32,
    pub achieved_weight: i32,
    pub status: String,
    pub skill_source: Option<String>,
    pub importance: String,
}
