//! Repository for the `user_profiles` table.

use skillgauge_core::types::DbId;
use sqlx::PgPool;

use crate::models::profile::UserProfile;

/// Column list for user_profiles queries.
const COLUMNS: &str = "user_id, target_category_id, updated_at";

/// Provides data access for user profiles.
pub struct ProfileRepo;

impl ProfileRepo {
    /// Find a profile by user id.
    pub async fn find_by_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Option<UserProfile>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM user_profiles WHERE user_id = $1");
        sqlx::query_as::<_, UserProfile>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Resolve the target category for scoring. The category id is always
    /// read from the stored profile, never from a caller-supplied value.
    pub async fn target_category(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Option<DbId>, sqlx::Error> {
        let profile = Self::find_by_user(pool, user_id).await?;
        Ok(profile.and_then(|p| p.target_category_id))
    }

    /// Set (or change) the user's target role. Upserts the profile row and
    /// returns it.
    pub async fn set_target_category(
        pool: &PgPool,
        user_id: DbId,
        category_id: DbId,
    ) -> Result<UserProfile, sqlx::Error> {
        let query = format!(
            "INSERT INTO user_profiles (user_id, target_category_id, updated_at)
             VALUES ($1, $2, NOW())
             ON CONFLICT (user_id) DO UPDATE SET
                target_category_id = EXCLUDED.target_category_id,
                updated_at = NOW()
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, UserProfile>(&query)
            .bind(user_id)
            .bind(category_id)
            .fetch_one(pool)
            .await
    }
}
