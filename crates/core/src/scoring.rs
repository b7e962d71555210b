//! Weighted readiness scoring.
//!
//! Pure functions with no database dependencies: the caller pre-loads the
//! benchmark slice and the person's ledger slice and receives a
//! [`ScoreOutcome`] with the total, the maximum, and a per-skill breakdown
//! frozen for persistence.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::skill::{counts_toward_score, is_validated, SkillSource, ValidationStatus};
use crate::types::DbId;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Bonus multiplier applied to the weight of a mentor-validated skill.
pub const VALIDATED_MULTIPLIER: f64 = 1.25;

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Whether a benchmark skill is mandatory for the role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Importance {
    Required,
    Optional,
}

impl Importance {
    pub fn from_str_value(s: &str) -> Result<Self, String> {
        match s {
            "required" => Ok(Self::Required),
            "optional" => Ok(Self::Optional),
            _ => Err(format!(
                "Invalid importance '{s}'. Must be one of: required, optional"
            )),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Required => "required",
            Self::Optional => "optional",
        }
    }
}

/// Met/missing status of a breakdown line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetStatus {
    Met,
    Missing,
}

impl MetStatus {
    pub fn from_str_value(s: &str) -> Result<Self, String> {
        match s {
            "met" => Ok(Self::Met),
            "missing" => Ok(Self::Missing),
            _ => Err(format!("Invalid met status '{s}'. Must be one of: met, missing")),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Met => "met",
            Self::Missing => "missing",
        }
    }
}

// ---------------------------------------------------------------------------
// Inputs
// ---------------------------------------------------------------------------

/// One benchmark requirement, pre-loaded for the target category.
#[derive(Debug, Clone)]
pub struct BenchmarkEntry {
    pub skill_id: DbId,
    pub skill_name: String,
    pub weight: i32,
    pub importance: Importance,
}

/// One ledger row for the person, pre-loaded for the target category.
#[derive(Debug, Clone)]
pub struct LedgerEntry {
    pub skill_id: DbId,
    pub source: SkillSource,
    pub status: ValidationStatus,
}

// ---------------------------------------------------------------------------
// Outputs
// ---------------------------------------------------------------------------

/// One frozen breakdown line, one per benchmark skill evaluated.
#[derive(Debug, Clone, Serialize)]
pub struct BreakdownLine {
    pub skill_id: DbId,
    pub skill_name: String,
    pub required_weight: i32,
    pub achieved_weight: i32,
    pub status: MetStatus,
    /// The owning ledger source at calculation time, or `None` when the
    /// skill was not owned.
    pub skill_source: Option<SkillSource>,
    pub importance: Importance,
    /// Whether the skill counted with the validated bonus.
    pub validated: bool,
}

/// How many owned, scorable skills came from each source.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SourceCounts {
    pub self_declared: usize,
    pub resume: usize,
    pub validated: usize,
}

/// Result of scoring one person against one benchmark.
#[derive(Debug, Clone, Serialize)]
pub struct ScoreOutcome {
    pub total_score: i64,
    pub max_possible_score: i64,
    /// `round(100 * total / max)`; 0 when max is 0. Can exceed 100 because
    /// of the validated bonus.
    pub percentage: u32,
    pub breakdown: Vec<BreakdownLine>,
    /// Names of required benchmark skills the person does not own.
    pub missing_required_skills: Vec<String>,
    pub source_counts: SourceCounts,
}

// ---------------------------------------------------------------------------
// Scoring functions
// ---------------------------------------------------------------------------

/// Weight contributed by an owned skill.
///
/// Validated skills earn `round(weight * 1.25)`; everything else earns the
/// nominal weight.
pub fn achieved_weight(weight: i32, validated: bool) -> i32 {
    if validated {
        (f64::from(weight) * VALIDATED_MULTIPLIER).round() as i32
    } else {
        weight
    }
}

/// Integer readiness percentage. Returns 0 when `max` is 0.
pub fn compute_percentage(total: i64, max: i64) -> u32 {
    if max <= 0 {
        return 0;
    }
    (total as f64 / max as f64 * 100.0).round() as u32
}

/// Score a person's ledger against a category benchmark.
///
/// The ledger slice may contain the same skill under several sources; a
/// skill is owned when any scorable entry exists for it. An empty benchmark
/// is an administrative misconfiguration and fails with
/// [`CoreError::MissingBenchmark`] (the caller supplies the category id).
pub fn score_skills(
    category_id: DbId,
    benchmark: &[BenchmarkEntry],
    ledger: &[LedgerEntry],
) -> Result<ScoreOutcome, CoreError> {
    if benchmark.is_empty() {
        return Err(CoreError::MissingBenchmark { category_id });
    }

    // Collapse the ledger to one owning entry per skill, keeping the
    // highest-precedence source and remembering whether any entry carries
    // the validated bonus.
    let mut owned: HashMap<DbId, (SkillSource, bool)> = HashMap::new();
    for entry in ledger {
        if !counts_toward_score(entry.source, entry.status) {
            continue;
        }
        let validated = is_validated(entry.source, entry.status);
        owned
            .entry(entry.skill_id)
            .and_modify(|(source, was_validated)| {
                if entry.source.precedence() > source.precedence() {
                    *source = entry.source;
                }
                *was_validated |= validated;
            })
            .or_insert((entry.source, validated));
    }

    let mut total_score: i64 = 0;
    let mut max_possible_score: i64 = 0;
    let mut breakdown = Vec::with_capacity(benchmark.len());
    let mut missing_required = Vec::new();

    for requirement in benchmark {
        max_possible_score += i64::from(requirement.weight);

        match owned.get(&requirement.skill_id) {
            Some((source, validated)) => {
                let achieved = achieved_weight(requirement.weight, *validated);
                total_score += i64::from(achieved);
                breakdown.push(BreakdownLine {
                    skill_id: requirement.skill_id,
                    skill_name: requirement.skill_name.clone(),
                    required_weight: requirement.weight,
                    achieved_weight: achieved,
                    status: MetStatus::Met,
                    skill_source: Some(*source),
                    importance: requirement.importance,
                    validated: *validated,
                });
            }
            None => {
                if requirement.importance == Importance::Required {
                    missing_required.push(requirement.skill_name.clone());
                }
                breakdown.push(BreakdownLine {
                    skill_id: requirement.skill_id,
                    skill_name: requirement.skill_name.clone(),
                    required_weight: requirement.weight,
                    achieved_weight: 0,
                    status: MetStatus::Missing,
                    skill_source: None,
                    importance: requirement.importance,
                    validated: false,
                });
            }
        }
    }

    let mut source_counts = SourceCounts::default();
    for (source, _) in owned.values() {
        match source {
            SkillSource::SelfDeclared => source_counts.self_declared += 1,
            SkillSource::Resume => source_counts.resume += 1,
            SkillSource::Validated => source_counts.validated += 1,
            SkillSource::Demo => {}
        }
    }

    Ok(ScoreOutcome {
        total_score,
        max_possible_score,
        percentage: compute_percentage(total_score, max_possible_score),
        breakdown,
        missing_required_skills: missing_required,
        source_counts,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
