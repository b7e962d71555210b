//! Roadmap assembly: enrich the newest frozen breakdown with the live
//! ledger, run the rule engine, and optionally persist the result as a
//! snapshot.

use std::collections::HashMap;

use serde::Serialize;
use skillgauge_core::error::CoreError;
use skillgauge_core::roadmap::{self, RoadmapLine, RoadmapPlan};
use skillgauge_core::scoring::{self, MetStatus};
use skillgauge_core::skill::{SkillSource, ValidationStatus};
use skillgauge_core::types::{DbId, Timestamp};
use skillgauge_db::models::readiness::{ReadinessBreakdownRow, ReadinessScore};
use skillgauge_db::models::roadmap::{NewRoadmap, NewRoadmapItem, RoadmapItemRow, RoadmapRow};
use skillgauge_db::models::user_skill::UserSkill;
use skillgauge_db::repositories::{
    CategoryRepo, ProfileRepo, ReadinessRepo, RoadmapRepo, UserSkillRepo,
};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Views
// ---------------------------------------------------------------------------

/// A generated (or re-generated) roadmap as returned to the caller.
#[derive(Debug, Serialize)]
pub struct GeneratedRoadmap {
    /// Absent for a preview, present once saved.
    pub roadmap_id: Option<DbId>,
    pub user_id: DbId,
    pub category_id: DbId,
    pub role_name: String,
    /// The score the roadmap was derived from.
    pub readiness_id: DbId,
    pub readiness_percentage: u32,
    pub generated_at: Option<Timestamp>,
    #[serde(flatten)]
    pub plan: RoadmapPlan,
}

/// A previously saved snapshot, read back verbatim from storage.
#[derive(Debug, Serialize)]
pub struct StoredRoadmap {
    #[serde(flatten)]
    pub header: RoadmapRow,
    pub role_name: Option<String>,
    pub items: Vec<RoadmapItemRow>,
}

// ---------------------------------------------------------------------------
// Enrichment
// ---------------------------------------------------------------------------

/// Per-skill ledger state condensed from possibly several rows.
pub(crate) struct LedgerState {
    pub(crate) source: Option<SkillSource>,
    pub(crate) status: ValidationStatus,
}

fn status_rank(status: ValidationStatus) -> u8 {
    match status {
        ValidationStatus::Validated => 3,
        ValidationStatus::Rejected => 2,
        ValidationStatus::Pending => 1,
        ValidationStatus::None => 0,
    }
}

/// Condense ledger rows to one state per skill: the strongest source and
/// the most decisive validation status win.
pub(crate) fn condense_ledger(
    rows: &[UserSkill],
) -> Result<HashMap<DbId, LedgerState>, CoreError> {
    let mut by_skill: HashMap<DbId, LedgerState> = HashMap::new();
    for row in rows {
        let source =
            SkillSource::from_str_value(&row.source).map_err(CoreError::Internal)?;
        let status = ValidationStatus::from_str_value(&row.validation_status)
            .map_err(CoreError::Internal)?;
        let entry = by_skill.entry(row.skill_id).or_insert(LedgerState {
            source: None,
            status: ValidationStatus::None,
        });
        if entry
            .source
            .map_or(true, |current| source.precedence() > current.precedence())
        {
            entry.source = Some(source);
        }
        if status_rank(status) > status_rank(entry.status) {
            entry.status = status;
        }
    }
    Ok(by_skill)
}

/// Join the frozen breakdown with the live ledger into rule-engine input.
fn enrich(
    breakdown: &[ReadinessBreakdownRow],
    ledger: &HashMap<DbId, LedgerState>,
) -> Result<Vec<RoadmapLine>, CoreError> {
    breakdown
        .iter()
        .map(|row| {
            let met = MetStatus::from_str_value(&row.status).map_err(CoreError::Internal)?;
            let state = ledger.get(&row.skill_id);
            Ok(RoadmapLine {
                skill_id: row.skill_id,
                skill_name: row.skill_name.clone(),
                weight: row.required_weight,
                is_required: row.importance == scoring::Importance::Required.as_str(),
                is_met: met == MetStatus::Met,
                validation_status: state
                    .map(|s| s.status)
                    .unwrap_or(ValidationStatus::None),
                skill_source: state.and_then(|s| s.source),
            })
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Generation
// ---------------------------------------------------------------------------

struct PlanBundle {
    category_id: DbId,
    role_name: String,
    score: ReadinessScore,
    percentage: u32,
    plan: RoadmapPlan,
}

/// Build a plan from the user's newest score. Requires a calculation to
/// exist; the roadmap is always derived from a frozen breakdown, never
/// from the raw ledger alone.
async fn build_plan(
    state: &AppState,
    user_id: DbId,
    category_hint: Option<DbId>,
) -> AppResult<PlanBundle> {
    let category_id = match category_hint {
        Some(id) => id,
        None => ProfileRepo::target_category(&state.pool, user_id)
            .await?
            .ok_or_else(|| {
                AppError::Core(CoreError::Validation(
                    "No target role configured; set a target role before generating a roadmap"
                        .to_string(),
                ))
            })?,
    };

    let score = ReadinessRepo::find_latest(&state.pool, user_id, category_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "readiness score",
            id: user_id,
        }))?;

    let role_name = CategoryRepo::find_by_id(&state.pool, category_id)
        .await?
        .map(|c| c.name)
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "category",
            id: category_id,
        }))?;

    let breakdown = ReadinessRepo::list_breakdown(&state.pool, score.id).await?;
    let ledger_rows = UserSkillRepo::list_by_category(&state.pool, user_id, category_id).await?;
    let ledger = condense_ledger(&ledger_rows)?;
    let lines = enrich(&breakdown, &ledger)?;
    let plan = roadmap::generate(&lines);

    let percentage = scoring::compute_percentage(score.total_score, score.max_possible_score);

    Ok(PlanBundle {
        category_id,
        role_name,
        score,
        percentage,
        plan,
    })
}

/// Generate a roadmap without persisting anything.
pub async fn preview_roadmap(state: &AppState, user_id: DbId) -> AppResult<GeneratedRoadmap> {
    let bundle = build_plan(state, user_id, None).await?;
    Ok(GeneratedRoadmap {
        roadmap_id: None,
        user_id,
        category_id: bundle.category_id,
        role_name: bundle.role_name,
        readiness_id: bundle.score.id,
        readiness_percentage: bundle.percentage,
        generated_at: None,
        plan: bundle.plan,
    })
}

/// Generate a roadmap and persist it as a new snapshot. History is
/// append-only; earlier snapshots stay untouched.
pub async fn save_roadmap(
    state: &AppState,
    user_id: DbId,
    category_hint: Option<DbId>,
) -> AppResult<GeneratedRoadmap> {
    let bundle = build_plan(state, user_id, category_hint).await?;

    let header = NewRoadmap {
        user_id,
        category_id: bundle.category_id,
        readiness_id: bundle.score.id,
        readiness_percentage: bundle.percentage as i32,
        high_count: bundle.plan.summary.by_priority.high as i32,
        medium_count: bundle.plan.summary.by_priority.medium as i32,
        low_count: bundle.plan.summary.by_priority.low as i32,
    };
    let items: Vec<NewRoadmapItem> = bundle
        .plan
        .items
        .iter()
        .map(|item| NewRoadmapItem {
            skill_id: item.skill_id,
            skill_name: item.skill_name.clone(),
            priority: item.priority.as_str().to_string(),
            category: item.category.as_str().to_string(),
            confidence: item.confidence.as_str().to_string(),
            reason: item.reason.clone(),
            priority_score: item.priority_score,
            rank: item.rank,
            rule_applied: item.rule_applied.as_str().to_string(),
            current_level: item.current_level.to_string(),
            target_level: item.target_level.to_string(),
            gap: item.gap.to_string(),
            weight: item.weight,
            action: item.action.clone(),
        })
        .collect();

    let created = RoadmapRepo::insert_snapshot(&state.pool, &header, &items).await?;

    tracing::info!(
        user_id,
        category_id = bundle.category_id,
        roadmap_id = created.id,
        items = items.len(),
        "Roadmap snapshot saved"
    );

    Ok(GeneratedRoadmap {
        roadmap_id: Some(created.id),
        user_id,
        category_id: bundle.category_id,
        role_name: bundle.role_name,
        readiness_id: bundle.score.id,
        readiness_percentage: bundle.percentage,
        generated_at: Some(created.generated_at),
        plan: bundle.plan,
    })
}

/// Read back the user's newest saved snapshot.
pub async fn latest_stored(state: &AppState, user_id: DbId) -> AppResult<StoredRoadmap> {
    let header = RoadmapRepo::find_latest_for_user(&state.pool, user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "roadmap",
            id: user_id,
        }))?;
    load_stored(state, header).await
}

/// Read back one saved snapshot by id, owner-checked.
pub async fn stored_by_id(
    state: &AppState,
    user_id: DbId,
    roadmap_id: DbId,
) -> AppResult<StoredRoadmap> {
    let header = RoadmapRepo::find_by_id(&state.pool, roadmap_id)
        .await?
        .filter(|row| row.user_id == user_id)
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "roadmap",
            id: roadmap_id,
        }))?;
    load_stored(state, header).await
}

async fn load_stored(state: &AppState, header: RoadmapRow) -> AppResult<StoredRoadmap> {
    let items = RoadmapRepo::list_items(&state.pool, header.id).await?;
    let role_name = CategoryRepo::find_by_id(&state.pool, header.category_id)
        .await?
        .map(|c| c.name);
    Ok(StoredRoadmap {
        header,
        role_name,
        items,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn row(skill_id: DbId, source: &str, status: &str) -> UserSkill {
        UserSkill {
            id: skill_id,
            user_id: 1,
            skill_id,
            source: source.to_string(),
            level: None,
            validation_status: status.to_string(),
            validated_by: None,
            validated_at: None,
            validation_note: None,
            created_at: Utc::now(),
        }
    }

    fn breakdown_row(
        skill_id: DbId,
        name: &str,
        weight: i32,
        status: &str,
        source: Option<&str>,
        importance: &str,
    ) -> ReadinessBreakdownRow {
        ReadinessBreakdownRow {
            id: skill_id,
            readiness_id: 1,
            skill_id,
            skill_name: name.to_string(),
            required_weight: weight,
            achieved_weight: 0,
            status: status.to_string(),
            skill_source: source.map(str::to_string),
            importance: importance.to_string(),
        }
    }

    // -- ledger condensing ---------------------------------------------------

    #[test]
    fn condense_prefers_stronger_source() {
        let rows = vec![row(1, "self", "none"), row(1, "validated", "none")];
        let ledger = condense_ledger(&rows).unwrap();
        assert_eq!(ledger[&1].source, Some(SkillSource::Validated));
    }

    #[test]
    fn condense_keeps_most_decisive_status() {
        let rows = vec![row(1, "self", "pending"), row(1, "resume", "rejected")];
        let ledger = condense_ledger(&rows).unwrap();
        assert_eq!(ledger[&1].status, ValidationStatus::Rejected);
    }

    #[test]
    fn condense_fails_on_corrupt_row() {
        let rows = vec![row(1, "self", "approved")];
        assert!(condense_ledger(&rows).is_err());
    }

    // -- enrichment ----------------------------------------------------------

    #[test]
    fn enrich_joins_breakdown_with_ledger() {
        let breakdown = vec![
            breakdown_row(1, "Rust", 10, "met", Some("self"), "required"),
            breakdown_row(2, "SQL", 5, "missing", None, "optional"),
        ];
        let ledger = condense_ledger(&[row(1, "self", "validated")]).unwrap();

        let lines = enrich(&breakdown, &ledger).unwrap();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].is_required && lines[0].is_met);
        assert_eq!(lines[0].validation_status, ValidationStatus::Validated);
        assert_eq!(lines[0].skill_source, Some(SkillSource::SelfDeclared));
        assert!(!lines[1].is_required && !lines[1].is_met);
        assert_eq!(lines[1].validation_status, ValidationStatus::None);
        assert_eq!(lines[1].skill_source, None);
    }

    #[test]
    fn enrich_fails_on_corrupt_met_status() {
        let breakdown = vec![breakdown_row(1, "Rust", 10, "partial", None, "required")];
        assert!(enrich(&breakdown, &HashMap::new()).is_err());
    }
}
