//! Handlers for the `/roadmap` resource.
//!
//! Generation always derives from the caller's newest frozen breakdown;
//! saving appends a snapshot, it never edits an earlier one.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use skillgauge_core::types::DbId;

use crate::engine::roadmap as engine;
use crate::error::AppResult;
use crate::ident::UserId;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/roadmap/generate
///
/// Generate a roadmap preview. Nothing is persisted.
pub async fn generate(user: UserId, State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let roadmap = engine::preview_roadmap(&state, user.0).await?;
    Ok(Json(DataResponse { data: roadmap }))
}

/// POST /api/v1/roadmap/save
///
/// Generate and persist a roadmap snapshot. Returns 201 with the saved
/// roadmap, id included.
pub async fn save(user: UserId, State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let roadmap = engine::save_roadmap(&state, user.0, None).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: roadmap })))
}

/// GET /api/v1/roadmap/latest
pub async fn latest(user: UserId, State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let stored = engine::latest_stored(&state, user.0).await?;
    Ok(Json(DataResponse { data: stored }))
}

/// GET /api/v1/roadmap/{roadmap_id}
///
/// One saved snapshot, owner-checked.
pub async fn get_by_id(
    user: UserId,
    State(state): State<AppState>,
    Path(roadmap_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let stored = engine::stored_by_id(&state, user.0, roadmap_id).await?;
    Ok(Json(DataResponse { data: stored }))
}
