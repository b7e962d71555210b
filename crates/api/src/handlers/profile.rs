//! Handlers for the `/profile` resource.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use skillgauge_core::error::CoreError;
use skillgauge_core::types::DbId;
use skillgauge_db::repositories::{CategoryRepo, ProfileRepo, RoadmapRepo};

use crate::error::{AppError, AppResult};
use crate::ident::UserId;
use crate::response::DataResponse;
use crate::state::AppState;

/// Body of PUT /profile/target-role.
#[derive(Debug, Deserialize)]
pub struct TargetRoleRequest {
    pub category_id: DbId,
}

/// PUT /api/v1/profile/target-role
///
/// Set or change the caller's target role. Past readiness history is kept
/// (it records which category it scored against), but saved roadmaps are
/// deleted: they prescribe actions for the old role.
pub async fn set_target_role(
    user: UserId,
    State(state): State<AppState>,
    Json(request): Json<TargetRoleRequest>,
) -> AppResult<impl IntoResponse> {
    let category = CategoryRepo::find_by_id(&state.pool, request.category_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "category",
            id: request.category_id,
        }))?;

    let profile = ProfileRepo::set_target_category(&state.pool, user.0, category.id).await?;
    let dropped = RoadmapRepo::delete_all_for_user(&state.pool, user.0).await?;

    tracing::info!(
        user_id = user.0,
        category_id = category.id,
        roadmaps_dropped = dropped,
        "Target role changed"
    );
    state.triggers.role_changed(user.0, &category.name);

    Ok(Json(DataResponse { data: profile }))
}

/// GET /api/v1/profile
pub async fn get_profile(
    user: UserId,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let profile = ProfileRepo::find_by_user(&state.pool, user.0)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "profile",
            id: user.0,
        }))?;
    Ok(Json(DataResponse { data: profile }))
}
