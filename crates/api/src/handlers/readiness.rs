//! Handlers for the `/readiness` resource.
//!
//! Calculation goes through the guarded engine pipeline; the read
//! endpoints serve the append-only history and its frozen breakdowns.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use skillgauge_core::error::CoreError;
use skillgauge_core::scoring::{self, Importance, MetStatus};
use skillgauge_core::skill::{SkillSource, TriggerSource, ValidationStatus};
use skillgauge_core::types::DbId;
use skillgauge_db::models::readiness::{ReadinessBreakdownRow, ReadinessScore};
use skillgauge_db::repositories::{ProfileRepo, ReadinessRepo, UserSkillRepo};

use crate::engine::calculation::{self, CalculationOutcome};
use crate::engine::roadmap::condense_ledger;
use crate::error::{AppError, AppResult};
use crate::ident::UserId;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Payloads
// ---------------------------------------------------------------------------

/// Body of POST /readiness/calculate. All fields optional.
#[derive(Debug, Default, Deserialize)]
pub struct CalculateRequest {
    /// Defaults to `user_explicit`.
    pub trigger_source: Option<String>,
    /// Waive the cooldown and the no-op check.
    #[serde(default)]
    pub force: bool,
}

/// A score row with its derived percentage attached.
#[derive(Debug, Serialize)]
pub struct ScoreView {
    #[serde(flatten)]
    pub score: ReadinessScore,
    pub percentage: u32,
}

impl From<ReadinessScore> for ScoreView {
    fn from(score: ReadinessScore) -> Self {
        let percentage = scoring::compute_percentage(score.total_score, score.max_possible_score);
        Self { score, percentage }
    }
}

#[derive(Debug, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
enum CalculateResponse {
    Calculated(Box<calculation::CalculationReport>),
    NoChanges {
        message: &'static str,
        score: ScoreView,
    },
}

/// Per-importance met/total counts for a breakdown.
#[derive(Debug, Default, Serialize)]
struct ImportanceCounts {
    met: usize,
    total: usize,
}

/// Trust-indicator counts over the breakdown's owned skills, taken from
/// the live ledger (the frozen rows only record the owning source).
#[derive(Debug, Default, Serialize)]
struct TrustCounts {
    validated: usize,
    pending: usize,
    unvalidated: usize,
}

#[derive(Debug, Serialize)]
struct BreakdownView {
    readiness_id: DbId,
    score: ScoreView,
    required: ImportanceCounts,
    optional: ImportanceCounts,
    trust: TrustCounts,
    lines: Vec<ReadinessBreakdownRow>,
}

// ---------------------------------------------------------------------------
// Calculate
// ---------------------------------------------------------------------------

/// POST /api/v1/readiness/calculate
///
/// Run one guarded calculation for the caller. 200 with either the fresh
/// result or a `no_changes` payload; 429 when the cooldown rejects it.
pub async fn calculate(
    user: UserId,
    State(state): State<AppState>,
    body: Option<Json<CalculateRequest>>,
) -> AppResult<impl IntoResponse> {
    let request = body.map(|Json(b)| b).unwrap_or_default();
    let trigger = match request.trigger_source.as_deref() {
        Some(raw) => TriggerSource::from_str_value(raw).map_err(AppError::BadRequest)?,
        None => TriggerSource::UserExplicit,
    };

    let outcome =
        calculation::run_calculation(&state, user.0, trigger, request.force, None).await?;

    let response = match outcome {
        CalculationOutcome::Calculated(report) => CalculateResponse::Calculated(report),
        CalculationOutcome::NoChanges { last } => CalculateResponse::NoChanges {
            message: "No skill changes since the last calculation",
            score: last.into(),
        },
    };

    Ok(Json(DataResponse { data: response }))
}

// ---------------------------------------------------------------------------
// Reads
// ---------------------------------------------------------------------------

/// GET /api/v1/readiness/latest
pub async fn latest(user: UserId, State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let category_id = require_target_category(&state, user.0).await?;
    let score = ReadinessRepo::find_latest(&state.pool, user.0, category_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "readiness score",
            id: user.0,
        }))?;
    Ok(Json(DataResponse {
        data: ScoreView::from(score),
    }))
}

/// GET /api/v1/readiness/history
///
/// Full history for the caller's current target role, newest first.
pub async fn history(user: UserId, State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let category_id = require_target_category(&state, user.0).await?;
    let scores = ReadinessRepo::list_history(&state.pool, user.0, category_id).await?;
    let views: Vec<ScoreView> = scores.into_iter().map(ScoreView::from).collect();
    Ok(Json(DataResponse { data: views }))
}

/// GET /api/v1/readiness/{readiness_id}/breakdown
///
/// The frozen breakdown of one score, owner-checked, with required/optional
/// split and live trust-indicator counts.
pub async fn breakdown(
    user: UserId,
    State(state): State<AppState>,
    Path(readiness_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let score = ReadinessRepo::find_by_id(&state.pool, readiness_id)
        .await?
        .filter(|s| s.user_id == user.0)
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "readiness score",
            id: readiness_id,
        }))?;

    let lines = ReadinessRepo::list_breakdown(&state.pool, readiness_id).await?;
    let ledger_rows =
        UserSkillRepo::list_by_category(&state.pool, user.0, score.category_id).await?;
    let ledger = condense_ledger(&ledger_rows)?;

    let mut required = ImportanceCounts::default();
    let mut optional = ImportanceCounts::default();
    let mut trust = TrustCounts::default();
    for line in &lines {
        let met = MetStatus::from_str_value(&line.status).map_err(CoreError::Internal)?;
        let counts = if line.importance == Importance::Required.as_str() {
            &mut required
        } else {
            &mut optional
        };
        counts.total += 1;
        if met == MetStatus::Met {
            counts.met += 1;
        }

        if line.skill_source.is_some() {
            match ledger.get(&line.skill_id) {
                Some(s) if s.status == ValidationStatus::Validated => trust.validated += 1,
                Some(s)
                    if s.status == ValidationStatus::Pending
                        && s.source != Some(SkillSource::Validated) =>
                {
                    trust.pending += 1
                }
                Some(s) if s.source == Some(SkillSource::Validated) => trust.validated += 1,
                _ => trust.unvalidated += 1,
            }
        }
    }

    Ok(Json(DataResponse {
        data: BreakdownView {
            readiness_id,
            score: score.into(),
            required,
            optional,
            trust,
            lines,
        },
    }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn require_target_category(state: &AppState, user_id: DbId) -> AppResult<DbId> {
    ProfileRepo::target_category(&state.pool, user_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Validation(
                "No target role configured".to_string(),
            ))
        })
}
