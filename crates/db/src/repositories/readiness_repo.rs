//! Repository for the readiness time series (`readiness_scores` and the
//! frozen `readiness_breakdown`).

use skillgauge_core::types::DbId;
use sqlx::PgPool;

use crate::models::readiness::{
    NewBreakdownLine, NewReadinessScore, ReadinessBreakdownRow, ReadinessScore,
};

/// Column list for readiness_scores queries.
const SCORE_COLUMNS: &str =
    "id, user_id, category_id, total_score, max_possible_score, trigger_source, calculated_at";

/// Column list for readiness_breakdown queries.
const BREAKDOWN_COLUMNS: &str = "id, readiness_id, skill_id, skill_name, required_weight, \
    achieved_weight, status, skill_source, importance";

/// Provides data access for the readiness history.
pub struct ReadinessRepo;

impl ReadinessRepo {
    /// Insert one score row plus its full breakdown in a single
    /// transaction. A breakdown failure rolls the score back; the history
    /// never contains a score without its frozen detail.
    pub async fn insert_with_breakdown(
        pool: &PgPool,
        score: &NewReadinessScore,
        lines: &[NewBreakdownLine],
    ) -> Result<ReadinessScore, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let insert_score = format!(
            "INSERT INTO readiness_scores
                (user_id, category_id, total_score, max_possible_score, trigger_source)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {SCORE_COLUMNS}"
        );
        let created = sqlx::query_as::<_, ReadinessScore>(&insert_score)
            .bind(score.user_id)
            .bind(score.category_id)
            .bind(score.total_score)
            .bind(score.max_possible_score)
            .bind(&score.trigger_source)
            .fetch_one(&mut *tx)
            .await?;

        for line in lines {
            sqlx::query(
                "INSERT INTO readiness_breakdown
                    (readiness_id, skill_id, skill_name, required_weight,
                     achieved_weight, status, skill_source, importance)
                 VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
            )
            .bind(created.id)
            .bind(line.skill_id)
            .bind(&line.skill_name)
            .bind(line.required_weight)
            .bind(line.achieved_weight)
            .bind(&line.status)
            .bind(&line.skill_source)
            .bind(&line.importance)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(created)
    }

    /// Find a score row by its primary key.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<ReadinessScore>, sqlx::Error> {
        let query = format!("SELECT {SCORE_COLUMNS} FROM readiness_scores WHERE id = $1");
        sqlx::query_as::<_, ReadinessScore>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// The current score for a (user, category): the most recent row.
    pub async fn find_latest(
        pool: &PgPool,
        user_id: DbId,
        category_id: DbId,
    ) -> Result<Option<ReadinessScore>, sqlx::Error> {
        let query = format!(
            "SELECT {SCORE_COLUMNS} FROM readiness_scores
             WHERE user_id = $1 AND category_id = $2
             ORDER BY calculated_at DESC, id DESC
             LIMIT 1"
        );
        sqlx::query_as::<_, ReadinessScore>(&query)
            .bind(user_id)
            .bind(category_id)
            .fetch_optional(pool)
            .await
    }

    /// Full score history for a (user, category), newest first.
    pub async fn list_history(
        pool: &PgPool,
        user_id: DbId,
        category_id: DbId,
    ) -> Result<Vec<ReadinessScore>, sqlx::Error> {
        let query = format!(
            "SELECT {SCORE_COLUMNS} FROM readiness_scores
             WHERE user_id = $1 AND category_id = $2
             ORDER BY calculated_at DESC, id DESC"
        );
        sqlx::query_as::<_, ReadinessScore>(&query)
            .bind(user_id)
            .bind(category_id)
            .fetch_all(pool)
            .await
    }

    /// The frozen breakdown backing one score.
    pub async fn list_breakdown(
        pool: &PgPool,
        readiness_id: DbId,
    ) -> Result<Vec<ReadinessBreakdownRow>, sqlx::Error> {
        let query = format!(
            "SELECT {BREAKDOWN_COLUMNS} FROM readiness_breakdown
             WHERE readiness_id = $1
             ORDER BY skill_id"
        );
        sqlx::query_as::<_, ReadinessBreakdownRow>(&query)
            .bind(readiness_id)
            .fetch_all(pool)
            .await
    }

    /// Skill ids whose breakdown status was `met` for one score. Feeds the
    /// guard's no-op comparison.
    pub async fn met_skill_ids(
        pool: &PgPool,
        readiness_id: DbId,
    ) -> Result<Vec<DbId>, sqlx::Error> {
        let rows: Vec<(DbId,)> = sqlx::query_as(
            "SELECT skill_id FROM readiness_breakdown
             WHERE readiness_id = $1 AND status = 'met'
             ORDER BY skill_id",
        )
        .bind(readiness_id)
        .fetch_all(pool)
        .await?;
        Ok(rows.into_iter().map(|(id,)| id).collect())
    }
}
