pub mod health;
pub mod profile;
pub mod readiness;
pub mod roadmap;
pub mod skills;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /readiness/calculate                 guarded recalculation (POST)
/// /readiness/latest                    current score (GET)
/// /readiness/history                   full history, newest first (GET)
/// /readiness/{id}/breakdown            frozen per-skill detail (GET)
///
/// /roadmap/generate                    preview, not persisted (POST)
/// /roadmap/save                        persist a snapshot (POST)
/// /roadmap/latest                      newest saved snapshot (GET)
/// /roadmap/{id}                        one saved snapshot (GET)
///
/// /skills                              replace-by-source resubmit (PUT)
/// /skills/{id}/validation              mentor decision (POST)
///
/// /profile                             caller's profile (GET)
/// /profile/target-role                 change target role (PUT)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/readiness", readiness::router())
        .nest("/roadmap", roadmap::router())
        .nest("/skills", skills::router())
        .nest("/profile", profile::router())
}
