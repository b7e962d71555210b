use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    /// The target role has no benchmark skills configured. This is an
    /// administrative misconfiguration, not a user error, and maps to a
    /// server-class HTTP status.
    #[error("No benchmark skills configured for category {category_id}")]
    MissingBenchmark { category_id: DbId },

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
