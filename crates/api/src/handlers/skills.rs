//! Handlers for the `/skills` resource: ledger resubmission and mentor
//! validation decisions.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use skillgauge_core::error::CoreError;
use skillgauge_core::guard::BypassReason;
use skillgauge_core::skill::{
    validate_rejection_note, SkillLevel, SkillSource, TriggerSource, ValidationStatus,
};
use skillgauge_core::types::DbId;
use skillgauge_db::models::user_skill::{DeclaredSkill, ValidationDecision};
use skillgauge_db::repositories::{ProfileRepo, UserSkillRepo};

use crate::engine::calculation;
use crate::error::{AppError, AppResult};
use crate::ident::{MentorId, UserId};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Payloads
// ---------------------------------------------------------------------------

/// Body of PUT /skills: a full replacement of one source's entries.
#[derive(Debug, Deserialize)]
pub struct ResubmitRequest {
    /// `self` or `resume`; the mentor-only sources cannot be resubmitted.
    pub source: String,
    pub skills: Vec<DeclaredSkill>,
}

/// Body of POST /skills/{user_skill_id}/validation.
#[derive(Debug, Deserialize)]
pub struct ValidationRequest {
    /// `validated` or `rejected`.
    pub decision: String,
    pub note: Option<String>,
}

// ---------------------------------------------------------------------------
// Resubmission
// ---------------------------------------------------------------------------

/// PUT /api/v1/skills
///
/// Replace all of the caller's ledger entries for one source within the
/// target category. Publishes `readiness.outdated`; the score itself is
/// only recalculated when the person asks.
pub async fn resubmit(
    user: UserId,
    State(state): State<AppState>,
    Json(request): Json<ResubmitRequest>,
) -> AppResult<impl IntoResponse> {
    let source = SkillSource::from_str_value(&request.source).map_err(AppError::BadRequest)?;
    if !matches!(source, SkillSource::SelfDeclared | SkillSource::Resume) {
        return Err(AppError::BadRequest(format!(
            "Source '{}' cannot be resubmitted; only self and resume entries are caller-managed",
            source.as_str()
        )));
    }
    for skill in &request.skills {
        if let Some(level) = &skill.level {
            SkillLevel::from_str_value(level).map_err(AppError::BadRequest)?;
        }
    }

    let category_id = ProfileRepo::target_category(&state.pool, user.0)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Validation(
                "No target role configured; set a target role before declaring skills".to_string(),
            ))
        })?;

    let rows = UserSkillRepo::replace_by_source(
        &state.pool,
        user.0,
        category_id,
        source.as_str(),
        &request.skills,
    )
    .await?;

    tracing::info!(
        user_id = user.0,
        category_id,
        source = source.as_str(),
        count = rows.len(),
        "Skill ledger resubmitted"
    );
    state.triggers.readiness_outdated(user.0);

    Ok(Json(DataResponse { data: rows }))
}

// ---------------------------------------------------------------------------
// Mentor validation
// ---------------------------------------------------------------------------

/// POST /api/v1/skills/{user_skill_id}/validation
///
/// Apply a mentor's decision to one ledger row. A rejection requires a
/// note. Publishes `skills.validated` and kicks off a system
/// recalculation that bypasses the cooldown; its failure is logged, never
/// returned to the mentor.
pub async fn validate(
    mentor: MentorId,
    State(state): State<AppState>,
    Path(user_skill_id): Path<DbId>,
    Json(request): Json<ValidationRequest>,
) -> AppResult<impl IntoResponse> {
    let status = ValidationStatus::from_str_value(&request.decision).map_err(AppError::BadRequest)?;
    match status {
        ValidationStatus::Validated => {}
        ValidationStatus::Rejected => {
            validate_rejection_note(request.note.as_deref())
                .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;
        }
        other => {
            return Err(AppError::BadRequest(format!(
                "Decision must be validated or rejected, got '{}'",
                other.as_str()
            )));
        }
    }

    let existing = UserSkillRepo::find_by_id(&state.pool, user_skill_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "user skill",
            id: user_skill_id,
        }))?;

    let decision = ValidationDecision {
        user_skill_id,
        mentor_id: mentor.0,
        status: status.as_str().to_string(),
        note: request.note.clone(),
    };
    let updated = UserSkillRepo::apply_validation(&state.pool, &decision)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "user skill",
            id: user_skill_id,
        }))?;

    tracing::info!(
        mentor_id = mentor.0,
        user_id = updated.user_id,
        user_skill_id,
        decision = status.as_str(),
        "Mentor validation applied"
    );

    let (validated, rejected) = match status {
        ValidationStatus::Validated => (1, 0),
        _ => (0, 1),
    };
    state
        .triggers
        .mentor_validation(existing.user_id, validated, rejected);

    // The review changes the score, so refresh it for the person right
    // away. Best effort: the decision stands even if this fails.
    let recalc_state = state.clone();
    let subject_id = existing.user_id;
    tokio::spawn(async move {
        let result = calculation::run_calculation(
            &recalc_state,
            subject_id,
            TriggerSource::ValidationReview,
            false,
            Some(BypassReason::ValidationUpdate),
        )
        .await;
        if let Err(err) = result {
            tracing::warn!(
                user_id = subject_id,
                error = %err,
                "Recalculation after mentor validation failed"
            );
        }
    });

    Ok(Json(DataResponse { data: updated }))
}
