//! Rule-based improvement roadmap generation.
//!
//! Five ordered rules turn an enriched score breakdown into a ranked,
//! explainable action list. First match wins; no skill produces more than
//! one item. Pure functions only -- enrichment and persistence live in the
//! api and db crates.

use serde::{Deserialize, Serialize};

use crate::skill::{is_validated, SkillSource, ValidationStatus};
use crate::types::DbId;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Fixed priority score for mentor-rejected skills (rule 2).
pub const REJECTED_SCORE: i32 = 100;

/// Base and per-weight factor for required gaps (rule 3).
pub const REQUIRED_GAP_BASE: i32 = 80;
pub const REQUIRED_GAP_PER_WEIGHT: i32 = 5;

/// Base and per-weight factor for strengthen items (rule 4).
pub const STRENGTHEN_BASE: i32 = 50;
pub const STRENGTHEN_PER_WEIGHT: i32 = 3;

/// Base and per-weight factor for optional gaps (rule 5).
pub const OPTIONAL_GAP_BASE: i32 = 20;
pub const OPTIONAL_GAP_PER_WEIGHT: i32 = 2;

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Display priority of a roadmap item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub fn from_str_value(s: &str) -> Result<Self, String> {
        match s {
            "HIGH" => Ok(Self::High),
            "MEDIUM" => Ok(Self::Medium),
            "LOW" => Ok(Self::Low),
            _ => Err(format!("Invalid priority '{s}'. Must be one of: HIGH, MEDIUM, LOW")),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "HIGH",
            Self::Medium => "MEDIUM",
            Self::Low => "LOW",
        }
    }
}

/// What kind of action the item asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemCategory {
    Rejected,
    RequiredGap,
    Strengthen,
    OptionalGap,
}

impl ItemCategory {
    pub fn from_str_value(s: &str) -> Result<Self, String> {
        match s {
            "rejected" => Ok(Self::Rejected),
            "required_gap" => Ok(Self::RequiredGap),
            "strengthen" => Ok(Self::Strengthen),
            "optional_gap" => Ok(Self::OptionalGap),
            _ => Err(format!(
                "Invalid item category '{s}'. Must be one of: rejected, required_gap, strengthen, optional_gap"
            )),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Rejected => "rejected",
            Self::RequiredGap => "required_gap",
            Self::Strengthen => "strengthen",
            Self::OptionalGap => "optional_gap",
        }
    }
}

/// Trust indicator attached to an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Confidence {
    Validated,
    Unvalidated,
    Rejected,
}

impl Confidence {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Validated => "validated",
            Self::Unvalidated => "unvalidated",
            Self::Rejected => "rejected",
        }
    }
}

/// The five deterministic rules, in precedence order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoadmapRule {
    /// Rule 1: validated and met -- nothing to suggest.
    ExcludeValidated,
    /// Rule 2: mentor rejected the skill.
    MentorRejected,
    /// Rule 3: required skill is missing.
    RequiredGap,
    /// Rule 4: required skill is met but not validated.
    Strengthen,
    /// Rule 5: optional skill is missing.
    OptionalGap,
}

impl RoadmapRule {
    pub fn from_str_value(s: &str) -> Result<Self, String> {
        match s {
            "exclude_validated" => Ok(Self::ExcludeValidated),
            "mentor_rejected" => Ok(Self::MentorRejected),
            "required_gap" => Ok(Self::RequiredGap),
            "strengthen" => Ok(Self::Strengthen),
            "optional_gap" => Ok(Self::OptionalGap),
            _ => Err(format!("Invalid roadmap rule '{s}'")),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ExcludeValidated => "exclude_validated",
            Self::MentorRejected => "mentor_rejected",
            Self::RequiredGap => "required_gap",
            Self::Strengthen => "strengthen",
            Self::OptionalGap => "optional_gap",
        }
    }
}

/// Severity tag the caller uses to render the edge-case message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Success,
    Info,
    Warning,
}

/// Whole-roadmap edge cases, in mutually exclusive precedence order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "case")]
pub enum EdgeCase {
    /// Zero items: every benchmark skill is validated and met.
    FullyReady,
    /// No HIGH or MEDIUM items; only optional gaps remain.
    OnlyOptionalGaps,
    /// Required skills both awaiting mentor review and unvalidated.
    PendingAndUnvalidatedRequired,
    /// Required skills are met but none of them mentor-validated.
    UnvalidatedRequired,
}

impl EdgeCase {
    /// Fixed human-readable message for the caller to render.
    pub fn message(&self) -> &'static str {
        match self {
            Self::FullyReady => {
                "You meet every benchmark requirement for this role. Keep your validations current."
            }
            Self::OnlyOptionalGaps => {
                "All required skills are covered. Only optional skills remain to raise your score."
            }
            Self::PendingAndUnvalidatedRequired => {
                "Some required skills are awaiting mentor review and others are unvalidated. \
                 Follow up on pending reviews and request validation for the rest."
            }
            Self::UnvalidatedRequired => {
                "Your required skills are present but not mentor-validated. \
                 Validation earns a score bonus and strengthens your profile."
            }
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            Self::FullyReady => Severity::Success,
            Self::OnlyOptionalGaps => Severity::Info,
            Self::PendingAndUnvalidatedRequired => Severity::Warning,
            Self::UnvalidatedRequired => Severity::Info,
        }
    }
}

// ---------------------------------------------------------------------------
// Inputs
// ---------------------------------------------------------------------------

/// One breakdown line enriched with benchmark importance and the current
/// ledger state, ready for rule evaluation.
#[derive(Debug, Clone)]
pub struct RoadmapLine {
    pub skill_id: DbId,
    pub skill_name: String,
    pub weight: i32,
    pub is_required: bool,
    pub is_met: bool,
    pub validation_status: ValidationStatus,
    pub skill_source: Option<SkillSource>,
}

impl RoadmapLine {
    fn is_validated(&self) -> bool {
        let source = self.skill_source.unwrap_or(SkillSource::SelfDeclared);
        is_validated(source, self.validation_status)
    }
}

// ---------------------------------------------------------------------------
// Outputs
// ---------------------------------------------------------------------------

/// One ranked roadmap item.
#[derive(Debug, Clone, Serialize)]
pub struct RoadmapItem {
    pub skill_id: DbId,
    pub skill_name: String,
    pub priority: Priority,
    pub category: ItemCategory,
    pub confidence: Confidence,
    pub reason: String,
    /// Used only for ordering, not displayed as truth.
    pub priority_score: i32,
    /// Dense 1-based rank in order of non-increasing priority score.
    pub rank: i32,
    pub rule_applied: RoadmapRule,
    /// Synthetic display level: `none` when missing, `intermediate` when met.
    pub current_level: &'static str,
    pub target_level: &'static str,
    pub gap: &'static str,
    pub weight: i32,
    pub action: String,
}

/// Item counts by priority.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PriorityCounts {
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

/// Item counts by category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CategoryCounts {
    pub rejected: usize,
    pub required_gap: usize,
    pub strengthen: usize,
    pub optional_gap: usize,
}

/// How often one rule fired during a generation.
#[derive(Debug, Clone, Serialize)]
pub struct RuleCount {
    pub rule: RoadmapRule,
    pub count: usize,
}

/// Aggregate statistics for one generation.
#[derive(Debug, Clone, Serialize)]
pub struct RoadmapSummary {
    pub total_items: usize,
    pub by_priority: PriorityCounts,
    pub by_category: CategoryCounts,
    /// Skills removed by rule 1 (validated and met).
    pub excluded_validated: usize,
}

/// The edge-case block attached to a generation.
#[derive(Debug, Clone, Serialize)]
pub struct EdgeCaseBlock {
    #[serde(flatten)]
    pub case: EdgeCase,
    pub message: &'static str,
    pub severity: Severity,
}

/// A complete generated roadmap, before persistence metadata is attached.
#[derive(Debug, Clone, Serialize)]
pub struct RoadmapPlan {
    pub items: Vec<RoadmapItem>,
    pub summary: RoadmapSummary,
    pub rules_applied: Vec<RuleCount>,
    pub edge_case: Option<EdgeCaseBlock>,
}

// ---------------------------------------------------------------------------
// Rule evaluation
// ---------------------------------------------------------------------------

/// Result of classifying one line: excluded by rule 1, an item, or nothing
/// (optional and met).
enum Classification {
    Excluded,
    Item(RoadmapItem),
    Nothing,
}

/// Apply the five rules to one line, first match wins.
fn classify(line: &RoadmapLine) -> Classification {
    // Rule 1: validated and met -- done, nothing to suggest.
    if line.is_validated() && line.is_met {
        return Classification::Excluded;
    }

    // Rule 2: mentor rejected.
    if line.validation_status == ValidationStatus::Rejected {
        return Classification::Item(build_item(
            line,
            Priority::High,
            ItemCategory::Rejected,
            Confidence::Rejected,
            RoadmapRule::MentorRejected,
            REJECTED_SCORE,
            format!(
                "A mentor rejected '{}'. Address the feedback before it can count toward readiness",
                line.skill_name
            ),
            "Review the mentor's note, close the gap, then resubmit for validation".to_string(),
        ));
    }

    let confidence = if line.is_validated() {
        Confidence::Validated
    } else {
        Confidence::Unvalidated
    };

    // Rule 3: required and missing.
    if line.is_required && !line.is_met {
        return Classification::Item(build_item(
            line,
            Priority::High,
            ItemCategory::RequiredGap,
            confidence,
            RoadmapRule::RequiredGap,
            REQUIRED_GAP_BASE + line.weight * REQUIRED_GAP_PER_WEIGHT,
            format!(
                "'{}' is required for this role (weight {}) and is missing from your profile",
                line.skill_name, line.weight
            ),
            "Learn this skill and add it to your profile".to_string(),
        ));
    }

    // Rule 4: required, met, but not validated.
    if line.is_required && line.is_met {
        return Classification::Item(build_item(
            line,
            Priority::Medium,
            ItemCategory::Strengthen,
            Confidence::Unvalidated,
            RoadmapRule::Strengthen,
            STRENGTHEN_BASE + line.weight * STRENGTHEN_PER_WEIGHT,
            format!(
                "'{}' is claimed but not mentor-validated; validation earns a score bonus",
                line.skill_name
            ),
            "Request mentor validation for this skill".to_string(),
        ));
    }

    // Rule 5: optional and missing.
    if !line.is_required && !line.is_met {
        return Classification::Item(build_item(
            line,
            Priority::Low,
            ItemCategory::OptionalGap,
            confidence,
            RoadmapRule::OptionalGap,
            OPTIONAL_GAP_BASE + line.weight * OPTIONAL_GAP_PER_WEIGHT,
            format!(
                "'{}' is optional and would add {} points to your score",
                line.skill_name, line.weight
            ),
            "Consider learning this skill to raise your score".to_string(),
        ));
    }

    // Optional and met (unvalidated): nothing to do.
    Classification::Nothing
}

#[allow(clippy::too_many_arguments)]
fn build_item(
    line: &RoadmapLine,
    priority: Priority,
    category: ItemCategory,
    confidence: Confidence,
    rule: RoadmapRule,
    priority_score: i32,
    reason: String,
    action: String,
) -> RoadmapItem {
    let (current_level, target_level, gap) = if line.is_met {
        ("intermediate", "advanced", "needs validation")
    } else {
        ("none", "intermediate", "missing")
    };

    RoadmapItem {
        skill_id: line.skill_id,
        skill_name: line.skill_name.clone(),
        priority,
        category,
        confidence,
        reason,
        priority_score,
        rank: 0, // assigned after sorting
        rule_applied: rule,
        current_level,
        target_level,
        gap,
        weight: line.weight,
        action,
    }
}

/// Classify the whole generation into at most one edge case.
///
/// Precedence: fully ready > only optional gaps > pending and unvalidated
/// required combined > unvalidated required only.
fn classify_edge_case(lines: &[RoadmapLine], items: &[RoadmapItem]) -> Option<EdgeCase> {
    if items.is_empty() {
        return Some(EdgeCase::FullyReady);
    }

    let has_high_or_medium = items
        .iter()
        .any(|item| item.priority != Priority::Low);
    if !has_high_or_medium {
        return Some(EdgeCase::OnlyOptionalGaps);
    }

    let has_unvalidated_required = items
        .iter()
        .any(|item| item.category == ItemCategory::Strengthen);
    let has_pending = lines
        .iter()
        .any(|line| line.is_met && line.validation_status == ValidationStatus::Pending);

    if has_unvalidated_required && has_pending {
        return Some(EdgeCase::PendingAndUnvalidatedRequired);
    }
    if has_unvalidated_required {
        return Some(EdgeCase::UnvalidatedRequired);
    }

    None
}

/// Generate a ranked roadmap plan from enriched breakdown lines.
///
/// Ties on `priority_score` break by skill id ascending so generations are
/// reproducible.
pub fn generate(lines: &[RoadmapLine]) -> RoadmapPlan {
    let mut items = Vec::new();
    let mut excluded_validated = 0usize;

    for line in lines {
        match classify(line) {
            Classification::Excluded => excluded_validated += 1,
            Classification::Item(item) => items.push(item),
            Classification::Nothing => {}
        }
    }

    items.sort_by(|a, b| {
        b.priority_score
            .cmp(&a.priority_score)
            .then(a.skill_id.cmp(&b.skill_id))
    });
    for (index, item) in items.iter_mut().enumerate() {
        item.rank = index as i32 + 1;
    }

    let mut by_priority = PriorityCounts::default();
    let mut by_category = CategoryCounts::default();
    for item in &items {
        match item.priority {
            Priority::High => by_priority.high += 1,
            Priority::Medium => by_priority.medium += 1,
            Priority::Low => by_priority.low += 1,
        }
        match item.category {
            ItemCategory::Rejected => by_category.rejected += 1,
            ItemCategory::RequiredGap => by_category.required_gap += 1,
            ItemCategory::Strengthen => by_category.strengthen += 1,
            ItemCategory::OptionalGap => by_category.optional_gap += 1,
        }
    }

    let rules_applied = vec![
        RuleCount {
            rule: RoadmapRule::ExcludeValidated,
            count: excluded_validated,
        },
        RuleCount {
            rule: RoadmapRule::MentorRejected,
            count: by_category.rejected,
        },
        RuleCount {
            rule: RoadmapRule::RequiredGap,
            count: by_category.required_gap,
        },
        RuleCount {
            rule: RoadmapRule::Strengthen,
            count: by_category.strengthen,
        },
        RuleCount {
            rule: RoadmapRule::OptionalGap,
            count: by_category.optional_gap,
        },
    ];

    let edge_case = classify_edge_case(lines, &items).map(|case| EdgeCaseBlock {
        case,
        message: case.message(),
        severity: case.severity(),
    });

    let summary = RoadmapSummary {
        total_items: items.len(),
        by_priority,
        by_category,
        excluded_validated,
    };

    RoadmapPlan {
        items,
        summary,
        rules_applied,
        edge_case,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn line(
        skill_id: DbId,
        name: &str,
        weight: i32,
        is_required: bool,
        is_met: bool,
        status: ValidationStatus,
        source: Option<SkillSource>,
    ) -> RoadmapLine {
        RoadmapLine {
            skill_id,
            skill_name: name.to_string(),
            weight,
            is_required,
            is_met,
            validation_status: status,
            skill_source: source,
        }
    }

    fn owned() -> Option<SkillSource> {
        Some(SkillSource::SelfDeclared)
    }

    // -- individual rules ----------------------------------------------------

    #[test]
    fn rule_1_excludes_validated_met() {
        let lines = vec![line(
            1,
            "Rust",
            10,
            true,
            true,
            ValidationStatus::Validated,
            owned(),
        )];
        let plan = generate(&lines);
        assert!(plan.items.is_empty());
        assert_eq!(plan.summary.excluded_validated, 1);
    }

    #[test]
    fn rule_2_rejected_is_high_and_fixed_score() {
        let lines = vec![line(
            1,
            "Rust",
            3,
            true,
            false,
            ValidationStatus::Rejected,
            owned(),
        )];
        let plan = generate(&lines);
        let item = &plan.items[0];
        assert_eq!(item.priority, Priority::High);
        assert_eq!(item.category, ItemCategory::Rejected);
        assert_eq!(item.confidence, Confidence::Rejected);
        assert_eq!(item.priority_score, REJECTED_SCORE);
        assert_eq!(item.rule_applied, RoadmapRule::MentorRejected);
        assert!(item.reason.contains("rejected"));
    }

    #[test]
    fn rule_3_required_missing() {
        let lines = vec![line(1, "SQL", 4, true, false, ValidationStatus::None, None)];
        let plan = generate(&lines);
        let item = &plan.items[0];
        assert_eq!(item.priority, Priority::High);
        assert_eq!(item.category, ItemCategory::RequiredGap);
        assert_eq!(item.confidence, Confidence::Unvalidated);
        assert_eq!(item.priority_score, 80 + 4 * 5);
        assert_eq!(item.current_level, "none");
        assert_eq!(item.gap, "missing");
    }

    #[test]
    fn rule_4_required_met_unvalidated() {
        let lines = vec![line(
            1,
            "SQL",
            4,
            true,
            true,
            ValidationStatus::None,
            owned(),
        )];
        let plan = generate(&lines);
        let item = &plan.items[0];
        assert_eq!(item.priority, Priority::Medium);
        assert_eq!(item.category, ItemCategory::Strengthen);
        assert_eq!(item.priority_score, 50 + 4 * 3);
        assert_eq!(item.current_level, "intermediate");
        assert_eq!(item.gap, "needs validation");
    }

    #[test]
    fn rule_5_optional_missing() {
        let lines = vec![line(1, "Go", 2, false, false, ValidationStatus::None, None)];
        let plan = generate(&lines);
        let item = &plan.items[0];
        assert_eq!(item.priority, Priority::Low);
        assert_eq!(item.category, ItemCategory::OptionalGap);
        assert_eq!(item.priority_score, 20 + 2 * 2);
    }

    #[test]
    fn optional_met_produces_nothing() {
        let lines = vec![line(
            1,
            "Go",
            2,
            false,
            true,
            ValidationStatus::None,
            owned(),
        )];
        let plan = generate(&lines);
        assert!(plan.items.is_empty());
        assert_eq!(plan.summary.excluded_validated, 0);
    }

    // -- worked examples -----------------------------------------------------

    #[test]
    fn worked_example_owned_unvalidated() {
        // A required met unvalidated, B optional missing.
        let lines = vec![
            line(1, "A", 10, true, true, ValidationStatus::None, owned()),
            line(2, "B", 5, false, false, ValidationStatus::None, None),
        ];
        let plan = generate(&lines);
        assert_eq!(plan.items.len(), 2);
        assert_eq!(plan.items[0].skill_name, "A");
        assert_eq!(plan.items[0].category, ItemCategory::Strengthen);
        assert_eq!(plan.items[0].priority, Priority::Medium);
        assert_eq!(plan.items[1].skill_name, "B");
        assert_eq!(plan.items[1].category, ItemCategory::OptionalGap);
        assert_eq!(plan.items[1].priority, Priority::Low);
    }

    #[test]
    fn worked_example_owned_validated() {
        let lines = vec![
            line(
                1,
                "A",
                10,
                true,
                true,
                ValidationStatus::Validated,
                owned(),
            ),
            line(2, "B", 5, false, false, ValidationStatus::None, None),
        ];
        let plan = generate(&lines);
        assert_eq!(plan.items.len(), 1);
        assert_eq!(plan.items[0].skill_name, "B");
        assert_eq!(plan.items[0].priority, Priority::Low);
        assert_eq!(plan.summary.excluded_validated, 1);
    }

    // -- exclusivity and ranking ---------------------------------------------

    #[test]
    fn every_line_maps_to_at_most_one_item() {
        let lines = vec![
            line(1, "A", 10, true, true, ValidationStatus::Validated, owned()),
            line(2, "B", 5, true, false, ValidationStatus::Rejected, owned()),
            line(3, "C", 4, true, false, ValidationStatus::None, None),
            line(4, "D", 3, true, true, ValidationStatus::Pending, owned()),
            line(5, "E", 2, false, false, ValidationStatus::None, None),
            line(6, "F", 1, false, true, ValidationStatus::None, owned()),
        ];
        let plan = generate(&lines);
        // Items + excluded + optional-met-nothing partition the benchmark.
        assert_eq!(plan.items.len(), 4);
        assert_eq!(plan.summary.excluded_validated, 1);
        let rule_total: usize = plan
            .rules_applied
            .iter()
            .map(|rc| rc.count)
            .sum();
        assert_eq!(rule_total, plan.items.len() + plan.summary.excluded_validated);
    }

    #[test]
    fn ranks_are_dense_and_ordered() {
        let lines = vec![
            line(3, "C", 4, true, false, ValidationStatus::None, None),
            line(2, "B", 5, true, false, ValidationStatus::Rejected, owned()),
            line(5, "E", 2, false, false, ValidationStatus::None, None),
            line(4, "D", 3, true, true, ValidationStatus::None, owned()),
        ];
        let plan = generate(&lines);
        for (index, item) in plan.items.iter().enumerate() {
            assert_eq!(item.rank, index as i32 + 1);
            if index > 0 {
                assert!(plan.items[index - 1].priority_score >= item.priority_score);
            }
        }
    }

    #[test]
    fn equal_scores_tie_break_on_skill_id() {
        // Two optional gaps with identical weight, ids out of order.
        let lines = vec![
            line(9, "Z", 2, false, false, ValidationStatus::None, None),
            line(4, "Y", 2, false, false, ValidationStatus::None, None),
        ];
        let plan = generate(&lines);
        assert_eq!(plan.items[0].skill_id, 4);
        assert_eq!(plan.items[1].skill_id, 9);
    }

    // -- summary -------------------------------------------------------------

    #[test]
    fn summary_counts_match_items() {
        let lines = vec![
            line(1, "A", 5, true, false, ValidationStatus::Rejected, owned()),
            line(2, "B", 4, true, false, ValidationStatus::None, None),
            line(3, "C", 3, true, true, ValidationStatus::None, owned()),
            line(4, "D", 2, false, false, ValidationStatus::None, None),
        ];
        let plan = generate(&lines);
        assert_eq!(
            plan.summary.by_priority,
            PriorityCounts {
                high: 2,
                medium: 1,
                low: 1,
            }
        );
        assert_eq!(
            plan.summary.by_category,
            CategoryCounts {
                rejected: 1,
                required_gap: 1,
                strengthen: 1,
                optional_gap: 1,
            }
        );
        assert_eq!(plan.summary.total_items, 4);
    }

    // -- edge cases ----------------------------------------------------------

    #[test]
    fn edge_case_fully_ready() {
        let lines = vec![line(
            1,
            "A",
            10,
            true,
            true,
            ValidationStatus::Validated,
            owned(),
        )];
        let plan = generate(&lines);
        let block = plan.edge_case.unwrap();
        assert_eq!(block.case, EdgeCase::FullyReady);
        assert_eq!(block.severity, Severity::Success);
    }

    #[test]
    fn edge_case_only_optional_gaps() {
        let lines = vec![
            line(1, "A", 10, true, true, ValidationStatus::Validated, owned()),
            line(2, "B", 5, false, false, ValidationStatus::None, None),
        ];
        let plan = generate(&lines);
        let block = plan.edge_case.unwrap();
        assert_eq!(block.case, EdgeCase::OnlyOptionalGaps);
        assert_eq!(block.severity, Severity::Info);
    }

    #[test]
    fn edge_case_pending_and_unvalidated_combined() {
        let lines = vec![
            line(1, "A", 10, true, true, ValidationStatus::Pending, owned()),
            line(2, "B", 5, true, true, ValidationStatus::None, owned()),
        ];
        let plan = generate(&lines);
        let block = plan.edge_case.unwrap();
        assert_eq!(block.case, EdgeCase::PendingAndUnvalidatedRequired);
        assert_eq!(block.severity, Severity::Warning);
    }

    #[test]
    fn edge_case_unvalidated_required_only() {
        let lines = vec![line(
            1,
            "A",
            10,
            true,
            true,
            ValidationStatus::None,
            owned(),
        )];
        let plan = generate(&lines);
        let block = plan.edge_case.unwrap();
        assert_eq!(block.case, EdgeCase::UnvalidatedRequired);
        assert_eq!(block.severity, Severity::Info);
    }

    #[test]
    fn edge_case_none_when_required_gaps_exist() {
        let lines = vec![line(1, "A", 10, true, false, ValidationStatus::None, None)];
        let plan = generate(&lines);
        assert!(plan.edge_case.is_none());
    }

    #[test]
    fn fully_ready_takes_precedence_over_everything() {
        let plan = generate(&[]);
        let block = plan.edge_case.unwrap();
        assert_eq!(block.case, EdgeCase::FullyReady);
    }
}
