//! Repository for the `benchmark_skills` table. Read-only to the engine;
//! administrators maintain the rows out of band.

use skillgauge_core::types::DbId;
use sqlx::PgPool;

use crate::models::benchmark_skill::BenchmarkSkill;

/// Provides read access to benchmark requirements.
pub struct BenchmarkRepo;

impl BenchmarkRepo {
    /// List a category's benchmark, joined with skill names, stable order.
    pub async fn list_by_category(
        pool: &PgPool,
        category_id: DbId,
    ) -> Result<Vec<BenchmarkSkill>, sqlx::Error> {
        sqlx::query_as::<_, BenchmarkSkill>(
            "SELECT bs.id, bs.category_id, bs.skill_id, s.name AS skill_name,
                    bs.weight, bs.importance
             FROM benchmark_skills bs
             JOIN skills s ON s.id = bs.skill_id
             WHERE bs.category_id = $1
             ORDER BY bs.skill_id",
        )
        .bind(category_id)
        .fetch_all(pool)
        .await
    }
}
