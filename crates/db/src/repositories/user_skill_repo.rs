//! Repository for the `user_skills` ledger.

use skillgauge_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::models::user_skill::{DeclaredSkill, UserSkill, ValidationDecision};

/// Column list for user_skills queries.
const COLUMNS: &str = "id, user_id, skill_id, source, level, validation_status, \
    validated_by, validated_at, validation_note, created_at";

/// Provides data access for the skill ledger.
pub struct UserSkillRepo;

impl UserSkillRepo {
    /// Find one ledger row by its primary key.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<UserSkill>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM user_skills WHERE id = $1");
        sqlx::query_as::<_, UserSkill>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a person's ledger rows for skills belonging to one category.
    ///
    /// Returns every source and status; the scoring eligibility filter is
    /// applied by the core engine, not here, so the engine also sees
    /// rejected rows (the roadmap generator needs them).
    pub async fn list_by_category(
        pool: &PgPool,
        user_id: DbId,
        category_id: DbId,
    ) -> Result<Vec<UserSkill>, sqlx::Error> {
        let query = format!(
            "SELECT us.id, us.user_id, us.skill_id, us.source, us.level,
                    us.validation_status, us.validated_by, us.validated_at,
                    us.validation_note, us.created_at
             FROM user_skills us
             JOIN skills s ON s.id = us.skill_id
             WHERE us.user_id = $1 AND s.category_id = $2
             ORDER BY us.skill_id, us.source"
        );
        sqlx::query_as::<_, UserSkill>(&query)
            .bind(user_id)
            .bind(category_id)
            .fetch_all(pool)
            .await
    }

    /// Replace all of a person's ledger rows for one source within one
    /// category with a new set, in a single transaction.
    ///
    /// This is the resubmission path: a new self-declaration (or resume
    /// re-import) fully replaces the previous set for that source.
    pub async fn replace_by_source(
        pool: &PgPool,
        user_id: DbId,
        category_id: DbId,
        source: &str,
        skills: &[DeclaredSkill],
    ) -> Result<Vec<UserSkill>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query(
            "DELETE FROM user_skills
             WHERE user_id = $1 AND source = $2
               AND skill_id IN (SELECT id FROM skills WHERE category_id = $3)",
        )
        .bind(user_id)
        .bind(source)
        .bind(category_id)
        .execute(&mut *tx)
        .await?;

        let mut inserted = Vec::with_capacity(skills.len());
        let insert = format!(
            "INSERT INTO user_skills (user_id, skill_id, source, level, validation_status)
             VALUES ($1, $2, $3, $4, 'none')
             RETURNING {COLUMNS}"
        );
        for skill in skills {
            let row = sqlx::query_as::<_, UserSkill>(&insert)
                .bind(user_id)
                .bind(skill.skill_id)
                .bind(source)
                .bind(&skill.level)
                .fetch_one(&mut *tx)
                .await?;
            inserted.push(row);
        }

        tx.commit().await?;
        Ok(inserted)
    }

    /// Apply a mentor's validation decision: set the status, stamp the
    /// mentor id and timestamp, and record the note.
    pub async fn apply_validation(
        pool: &PgPool,
        decision: &ValidationDecision,
    ) -> Result<Option<UserSkill>, sqlx::Error> {
        let query = format!(
            "UPDATE user_skills
             SET validation_status = $2,
                 validated_by = $3,
                 validated_at = NOW(),
                 validation_note = $4
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, UserSkill>(&query)
            .bind(decision.user_skill_id)
            .bind(&decision.status)
            .bind(decision.mentor_id)
            .bind(&decision.note)
            .fetch_optional(pool)
            .await
    }

    /// Count validation transitions (to validated or rejected) for one
    /// person and category strictly after the given timestamp.
    ///
    /// Feeds the guard's validation-bypass rule.
    pub async fn count_validation_changes_since(
        pool: &PgPool,
        user_id: DbId,
        category_id: DbId,
        since: Timestamp,
    ) -> Result<(i64, i64), sqlx::Error> {
        let row: (Option<i64>, Option<i64>) = sqlx::query_as(
            "SELECT
                COUNT(*) FILTER (WHERE us.validation_status = 'validated'),
                COUNT(*) FILTER (WHERE us.validation_status = 'rejected')
             FROM user_skills us
             JOIN skills s ON s.id = us.skill_id
             WHERE us.user_id = $1
               AND s.category_id = $2
               AND us.validated_at > $3",
        )
        .bind(user_id)
        .bind(category_id)
        .bind(since)
        .fetch_one(pool)
        .await?;

        Ok((row.0.unwrap_or(0), row.1.unwrap_or(0)))
    }
}
