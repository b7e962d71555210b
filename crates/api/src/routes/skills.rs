//! Route definitions for the `/skills` resource.

use axum::routing::{post, put};
use axum::Router;

use crate::handlers::skills;
use crate::state::AppState;

/// Routes mounted at `/skills`.
///
/// ```text
/// PUT    /                     -> resubmit (replace by source)
/// POST   /{id}/validation      -> validate (mentor decision)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", put(skills::resubmit))
        .route("/{id}/validation", post(skills::validate))
}
