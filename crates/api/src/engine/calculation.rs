//! Calculation pipeline: guard -> scoring engine -> history write ->
//! roadmap refresh.
//!
//! All database loads happen here; the guard and scorer themselves are the
//! pure functions in `skillgauge_core`. The whole pipeline runs under the
//! per-(user, category) lock so concurrent requests cannot both pass the
//! guard and double-write history.

use std::collections::BTreeSet;

use chrono::Utc;
use serde::Serialize;
use skillgauge_core::error::CoreError;
use skillgauge_core::guard::{
    self, BypassReason, GuardContext, GuardDecision, LastCalculation, ValidationChanges,
};
use skillgauge_core::scoring::{self, BenchmarkEntry, BreakdownLine, Importance, LedgerEntry};
use skillgauge_core::skill::{
    counts_toward_score, SkillSource, TriggerSource, ValidationStatus,
};
use skillgauge_core::types::{DbId, Timestamp};
use skillgauge_db::models::readiness::{NewBreakdownLine, NewReadinessScore, ReadinessScore};
use skillgauge_db::models::user_skill::UserSkill;
use skillgauge_db::repositories::{
    BenchmarkRepo, ProfileRepo, ReadinessRepo, RoadmapRepo, UserSkillRepo,
};

use crate::engine::roadmap as roadmap_engine;
use crate::error::{AppError, AppResult};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Results
// ---------------------------------------------------------------------------

/// Counts of validation transitions that motivated a cooldown waiver.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ValidationChangeCounts {
    pub validated: usize,
    pub rejected: usize,
}

/// A freshly calculated readiness result returned to the caller.
#[derive(Debug, Serialize)]
pub struct CalculationReport {
    pub score_id: DbId,
    pub user_id: DbId,
    pub category_id: DbId,
    pub total_score: i64,
    pub max_possible_score: i64,
    pub percentage: u32,
    pub calculated_at: Timestamp,
    pub breakdown: Vec<BreakdownLine>,
    pub missing_required_skills: Vec<String>,
    pub source_counts: scoring::SourceCounts,
    /// The cooldown was running but waived (force or validation changes).
    pub cooldown_waived: bool,
    pub validation_changes: Option<ValidationChangeCounts>,
    /// Whether an existing saved roadmap was re-generated for this score.
    pub roadmap_refreshed: bool,
}

/// Outcome of one calculation request that passed the guard's hard checks.
#[derive(Debug)]
pub enum CalculationOutcome {
    /// A new history row was written.
    Calculated(Box<CalculationReport>),
    /// The owned skill set matches the last calculation; no row written.
    NoChanges { last: ReadinessScore },
}

// ---------------------------------------------------------------------------
// Ledger conversion
// ---------------------------------------------------------------------------

/// Convert ledger rows to the scorer's input, failing on corrupt status
/// strings rather than silently skipping them.
fn parse_ledger(rows: &[UserSkill]) -> Result<Vec<LedgerEntry>, CoreError> {
    rows.iter()
        .map(|row| {
            let source = SkillSource::from_str_value(&row.source)
                .map_err(CoreError::Internal)?;
            let status = ValidationStatus::from_str_value(&row.validation_status)
                .map_err(CoreError::Internal)?;
            Ok(LedgerEntry {
                skill_id: row.skill_id,
                source,
                status,
            })
        })
        .collect()
}

/// Skill ids the person currently owns under the scoring filter. Feeds the
/// guard's no-op comparison.
fn owned_skill_ids(ledger: &[LedgerEntry]) -> BTreeSet<DbId> {
    ledger
        .iter()
        .filter(|entry| counts_toward_score(entry.source, entry.status))
        .map(|entry| entry.skill_id)
        .collect()
}

/// Convert benchmark rows to the scorer's input.
fn parse_benchmark(
    rows: &[skillgauge_db::models::benchmark_skill::BenchmarkSkill],
) -> Result<Vec<BenchmarkEntry>, CoreError> {
    rows.iter()
        .map(|row| {
            let importance =
                Importance::from_str_value(&row.importance).map_err(CoreError::Internal)?;
            Ok(BenchmarkEntry {
                skill_id: row.skill_id,
                skill_name: row.skill_name.clone(),
                weight: row.weight,
                importance,
            })
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Pipeline
// ---------------------------------------------------------------------------

/// Run one guarded calculation for a user.
///
/// The target category is always resolved from the stored profile; a
/// caller-supplied category id is never accepted (score forgery guard).
/// Returns `AppError::CooldownActive` for a guard cooldown rejection.
pub async fn run_calculation(
    state: &AppState,
    user_id: DbId,
    trigger: TriggerSource,
    force: bool,
    bypass: Option<BypassReason>,
) -> AppResult<CalculationOutcome> {
    let category_id = ProfileRepo::target_category(&state.pool, user_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Validation(
                "No target role configured; set a target role before calculating".to_string(),
            ))
        })?;

    // Serialize guard + write per key: without this, two concurrent
    // requests could both pass the cooldown check and double-write.
    let _lock = state.calc_locks.acquire(user_id, category_id).await;

    let ledger_rows = UserSkillRepo::list_by_category(&state.pool, user_id, category_id).await?;
    let ledger = parse_ledger(&ledger_rows)?;
    let current_skill_ids = owned_skill_ids(&ledger);

    let last = match ReadinessRepo::find_latest(&state.pool, user_id, category_id).await? {
        Some(score) => {
            let met = ReadinessRepo::met_skill_ids(&state.pool, score.id).await?;
            Some((score, met.into_iter().collect::<BTreeSet<_>>()))
        }
        None => None,
    };

    let validation_changes = match &last {
        Some((score, _)) => {
            let (validated, rejected) = UserSkillRepo::count_validation_changes_since(
                &state.pool,
                user_id,
                category_id,
                score.calculated_at,
            )
            .await?;
            ValidationChanges {
                validated: validated as usize,
                rejected: rejected as usize,
            }
        }
        None => ValidationChanges::default(),
    };

    let ctx = GuardContext {
        last: last.as_ref().map(|(score, met)| LastCalculation {
            score_id: score.id,
            calculated_at: score.calculated_at,
            met_skill_ids: met.clone(),
        }),
        current_skill_ids,
        validation_changes,
        force,
        bypass,
        now: Utc::now(),
    };

    let (cooldown_waived, changes) = match guard::evaluate(&ctx) {
        GuardDecision::Proceed {
            cooldown_waived,
            validation_changes,
        } => (cooldown_waived, validation_changes),
        GuardDecision::CooldownActive {
            last_score_id,
            retry_after_secs,
        } => {
            return Err(AppError::CooldownActive {
                last_score_id,
                retry_after_secs,
            });
        }
        GuardDecision::NoChanges { last_score_id } => {
            // `last` is always present when the guard reports no changes.
            let (score, _) = last.ok_or_else(|| {
                AppError::InternalError(format!(
                    "Guard reported no changes against score {last_score_id} without history"
                ))
            })?;
            tracing::info!(user_id, category_id, score_id = score.id, "No skill changes, returning last score");
            return Ok(CalculationOutcome::NoChanges { last: score });
        }
    };

    // --- Scoring ---
    let benchmark_rows = BenchmarkRepo::list_by_category(&state.pool, category_id).await?;
    let benchmark = parse_benchmark(&benchmark_rows)?;
    let outcome = scoring::score_skills(category_id, &benchmark, &ledger)?;

    // --- Atomic history write ---
    let new_score = NewReadinessScore {
        user_id,
        category_id,
        total_score: outcome.total_score,
        max_possible_score: outcome.max_possible_score,
        trigger_source: trigger.as_str().to_string(),
    };
    let lines: Vec<NewBreakdownLine> = outcome
        .breakdown
        .iter()
        .map(|line| NewBreakdownLine {
            skill_id: line.skill_id,
            skill_name: line.skill_name.clone(),
            required_weight: line.required_weight,
            achieved_weight: line.achieved_weight,
            status: line.status.as_str().to_string(),
            skill_source: line.skill_source.map(|s| s.as_str().to_string()),
            importance: line.importance.as_str().to_string(),
        })
        .collect();
    let created = ReadinessRepo::insert_with_breakdown(&state.pool, &new_score, &lines).await?;

    tracing::info!(
        user_id,
        category_id,
        score_id = created.id,
        total = outcome.total_score,
        max = outcome.max_possible_score,
        trigger = trigger.as_str(),
        "Readiness score calculated"
    );

    // --- Roadmap refresh (non-fatal) ---
    // Only refresh when the user has a saved roadmap to keep current;
    // previews are generated on demand and need no upkeep.
    let roadmap_refreshed = match refresh_saved_roadmap(state, user_id, category_id).await {
        Ok(refreshed) => refreshed,
        Err(err) => {
            tracing::warn!(
                user_id,
                category_id,
                error = %err,
                "Roadmap regeneration failed after calculation; result returned without refresh"
            );
            false
        }
    };

    Ok(CalculationOutcome::Calculated(Box::new(CalculationReport {
        score_id: created.id,
        user_id,
        category_id,
        total_score: outcome.total_score,
        max_possible_score: outcome.max_possible_score,
        percentage: outcome.percentage,
        calculated_at: created.calculated_at,
        breakdown: outcome.breakdown,
        missing_required_skills: outcome.missing_required_skills,
        source_counts: outcome.source_counts,
        cooldown_waived,
        validation_changes: changes.any().then_some(ValidationChangeCounts {
            validated: changes.validated,
            rejected: changes.rejected,
        }),
        roadmap_refreshed,
    })))
}

/// Re-generate and persist the user's roadmap from the newest breakdown,
/// but only when a saved snapshot already exists.
async fn refresh_saved_roadmap(
    state: &AppState,
    user_id: DbId,
    category_id: DbId,
) -> AppResult<bool> {
    if RoadmapRepo::count_for_user(&state.pool, user_id).await? == 0 {
        return Ok(false);
    }
    roadmap_engine::save_roadmap(state, user_id, Some(category_id)).await?;
    Ok(true)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
