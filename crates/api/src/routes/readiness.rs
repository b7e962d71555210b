//! Route definitions for the `/readiness` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::readiness;
use crate::state::AppState;

/// Routes mounted at `/readiness`.
///
/// ```text
/// POST   /calculate            -> calculate
/// GET    /latest               -> latest
/// GET    /history              -> history
/// GET    /{id}/breakdown       -> breakdown
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/calculate", post(readiness::calculate))
        .route("/latest", get(readiness::latest))
        .route("/history", get(readiness::history))
        .route("/{id}/breakdown", get(readiness::breakdown))
}
