//! Roadmap snapshot rows.

use serde::Serialize;
use skillgauge_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `roadmaps` table. Immutable once written.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct RoadmapRow {
    pub id: DbId,
    pub user_id: DbId,
    pub category_id: DbId,
    pub readiness_id: DbId,
    pub readiness_percentage: i32,
    pub high_count: i32,
    pub medium_count: i32,
    pub low_count: i32,
    pub generated_at: Timestamp,
}

/// A row from the `roadmap_items` table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct RoadmapItemRow {
    pub id: DbId,
    pub roadmap_id: DbId,
    pub skill_id: DbId,
    pub skill_name: String,
    pub priority: String,
    pub category: String,
    pub confidence: String,
    pub reason: String,
    pub priority_score: i32,
    pub rank: i32,
    pub rule_applied: String,
    pub current_level: String,
    pub target_level: String,
    pub gap: String,
    pub weight: i32,
    pub action: String,
}

/// Insert DTO for a roadmap header.
#[derive(Debug, Clone)]
pub struct NewRoadmap {
    pub user_id: DbId,
    pub category_id: DbId,
    pub readiness_id: DbId,
    pub readiness_percentage: i32,
    pub high_count: i32,
    pub medium_count: i32,
    pub low_count: i32,
}

/// Insert DTO for one roadmap item.
#[derive(Debug, Clone)]
pub struct NewRoadmapItem {
    pub skill_id: DbId,
    pub skill_name: String,
    pub priority: String,
    pub category: String,
    pub confidence: String,
    pub reason: String,
    pub priority_score: i32,
    pub rank: i32,
    pub rule_applied: String,
    pub current_level: String,
    pub target_level: String,
    pub gap: String,
    pub weight: i32,
    pub action: String,
}
