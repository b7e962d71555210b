//! Route definitions for the `/roadmap` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::roadmap;
use crate::state::AppState;

/// Routes mounted at `/roadmap`.
///
/// ```text
/// POST   /generate     -> generate (preview)
/// POST   /save         -> save
/// GET    /latest       -> latest
/// GET    /{id}         -> get_by_id
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/generate", post(roadmap::generate))
        .route("/save", post(roadmap::save))
        .route("/latest", get(roadmap::latest))
        .route("/{id}", get(roadmap::get_by_id))
}
