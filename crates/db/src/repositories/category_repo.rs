//! Read access to the `categories` reference table.

use skillgauge_core::types::DbId;
use sqlx::PgPool;

use crate::models::skill::Category;

/// Provides lookups for target roles. Category CRUD is out of scope; the
/// engine only ever reads.
pub struct CategoryRepo;

impl CategoryRepo {
    /// Find a category by its primary key.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Category>, sqlx::Error> {
        sqlx::query_as::<_, Category>("SELECT id, name FROM categories WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
