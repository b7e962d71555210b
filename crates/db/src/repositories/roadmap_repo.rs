//! Repository for roadmap snapshots (`roadmaps` and `roadmap_items`).

use skillgauge_core::types::DbId;
use sqlx::PgPool;

use crate::models::roadmap::{NewRoadmap, NewRoadmapItem, RoadmapItemRow, RoadmapRow};

/// Column list for roadmaps queries.
const ROADMAP_COLUMNS: &str = "id, user_id, category_id, readiness_id, readiness_percentage, \
    high_count, medium_count, low_count, generated_at";

/// Column list for roadmap_items queries.
const ITEM_COLUMNS: &str = "id, roadmap_id, skill_id, skill_name, priority, category, \
    confidence, reason, priority_score, rank, rule_applied, current_level, target_level, \
    gap, weight, action";

/// Provides data access for persisted roadmap generations.
pub struct RoadmapRepo;

impl RoadmapRepo {
    /// Insert a roadmap header plus all of its items as one atomic unit.
    ///
    /// Any item failure rolls the header back so no empty roadmap is ever
    /// visible. Re-generating for the same `readiness_id` appends a new
    /// snapshot; history is cumulative, never edited in place.
    pub async fn insert_snapshot(
        pool: &PgPool,
        roadmap: &NewRoadmap,
        items: &[NewRoadmapItem],
    ) -> Result<RoadmapRow, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let insert_header = format!(
            "INSERT INTO roadmaps
                (user_id, category_id, readiness_id, readiness_percentage,
                 high_count, medium_count, low_count)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {ROADMAP_COLUMNS}"
        );
        let created = sqlx::query_as::<_, RoadmapRow>(&insert_header)
            .bind(roadmap.user_id)
            .bind(roadmap.category_id)
            .bind(roadmap.readiness_id)
            .bind(roadmap.readiness_percentage)
            .bind(roadmap.high_count)
            .bind(roadmap.medium_count)
            .bind(roadmap.low_count)
            .fetch_one(&mut *tx)
            .await?;

        for item in items {
            sqlx::query(
                "INSERT INTO roadmap_items
                    (roadmap_id, skill_id, skill_name, priority, category, confidence,
                     reason, priority_score, rank, rule_applied, current_level,
                     target_level, gap, weight, action)
                 VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)",
            )
            .bind(created.id)
            .bind(item.skill_id)
            .bind(&item.skill_name)
            .bind(&item.priority)
            .bind(&item.category)
            .bind(&item.confidence)
            .bind(&item.reason)
            .bind(item.priority_score)
            .bind(item.rank)
            .bind(&item.rule_applied)
            .bind(&item.current_level)
            .bind(&item.target_level)
            .bind(&item.gap)
            .bind(item.weight)
            .bind(&item.action)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(created)
    }

    /// Find a roadmap header by its primary key.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<RoadmapRow>, sqlx::Error> {
        let query = format!("SELECT {ROADMAP_COLUMNS} FROM roadmaps WHERE id = $1");
        sqlx::query_as::<_, RoadmapRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// The most recently generated roadmap for a user, if any.
    pub async fn find_latest_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Option<RoadmapRow>, sqlx::Error> {
        let query = format!(
            "SELECT {ROADMAP_COLUMNS} FROM roadmaps
             WHERE user_id = $1
             ORDER BY generated_at DESC, id DESC
             LIMIT 1"
        );
        sqlx::query_as::<_, RoadmapRow>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Items for one roadmap, in rank order.
    pub async fn list_items(
        pool: &PgPool,
        roadmap_id: DbId,
    ) -> Result<Vec<RoadmapItemRow>, sqlx::Error> {
        let query = format!(
            "SELECT {ITEM_COLUMNS} FROM roadmap_items
             WHERE roadmap_id = $1
             ORDER BY rank"
        );
        sqlx::query_as::<_, RoadmapItemRow>(&query)
            .bind(roadmap_id)
            .fetch_all(pool)
            .await
    }

    /// Delete every roadmap snapshot for a user. Items cascade.
    ///
    /// This is the deliberate invalidation performed on a target-role
    /// change; there is no soft delete or recovery.
    pub async fn delete_all_for_user(pool: &PgPool, user_id: DbId) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM roadmaps WHERE user_id = $1")
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }

    /// Count snapshots for a user (used by history assertions and the
    /// role-change invalidation check).
    pub async fn count_for_user(pool: &PgPool, user_id: DbId) -> Result<i64, sqlx::Error> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM roadmaps WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(pool)
            .await?;
        Ok(row.0)
    }
}
