//! Benchmark requirement rows.

use serde::Serialize;
use skillgauge_core::types::DbId;
use sqlx::FromRow;

/// A row from `benchmark_skills` joined with the skill name, which the
/// scoring engine and roadmap generator both need.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct BenchmarkSkill {
    pub id: DbId,
    pub category_id: DbId,
    pub skill_id: DbId,
    pub skill_name: String,
    pub weight: i32,
    pub importance: String,
}
