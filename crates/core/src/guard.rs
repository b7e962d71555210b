//! Recalculation guard: cooldown, change detection, validation bypass.
//!
//! The guard is a pure decision over a pre-assembled [`GuardContext`]; the
//! api crate's calculation engine loads the history and ledger slices and
//! serializes evaluation + write per (user, category) so two concurrent
//! requests cannot both pass the check.

use std::collections::BTreeSet;

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::types::{DbId, Timestamp};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Minimum time between permitted recalculations absent an override.
pub const COOLDOWN_SECS: i64 = 5 * 60;

/// Cooldown window as a chrono duration.
pub fn cooldown() -> Duration {
    Duration::seconds(COOLDOWN_SECS)
}

// ---------------------------------------------------------------------------
// Inputs
// ---------------------------------------------------------------------------

/// Why a caller claims the right to skip the cooldown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BypassReason {
    /// Used only by the mentor-validation-triggered recalculation path.
    ValidationUpdate,
}

/// The most recent calculation for a (user, category) pair.
#[derive(Debug, Clone)]
pub struct LastCalculation {
    pub score_id: DbId,
    pub calculated_at: Timestamp,
    /// Skill ids whose breakdown status was `met` at that calculation.
    pub met_skill_ids: BTreeSet<DbId>,
}

/// Validation transitions observed strictly after the last calculation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidationChanges {
    pub validated: usize,
    pub rejected: usize,
}

impl ValidationChanges {
    pub fn any(&self) -> bool {
        self.validated > 0 || self.rejected > 0
    }
}

/// Everything the guard needs to decide.
#[derive(Debug, Clone)]
pub struct GuardContext {
    pub last: Option<LastCalculation>,
    /// Skill ids the person currently owns under the scoring filter.
    pub current_skill_ids: BTreeSet<DbId>,
    pub validation_changes: ValidationChanges,
    pub force: bool,
    pub bypass: Option<BypassReason>,
    pub now: Timestamp,
}

// ---------------------------------------------------------------------------
// Decision
// ---------------------------------------------------------------------------

/// Outcome of a guard evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    /// A new calculation may proceed.
    Proceed {
        /// The cooldown was still running but was waived (force, explicit
        /// bypass, or detected validation transitions).
        cooldown_waived: bool,
        /// Validation transitions that motivated the waiver, if any.
        validation_changes: ValidationChanges,
    },
    /// Too soon since the last calculation.
    CooldownActive {
        last_score_id: DbId,
        retry_after_secs: i64,
    },
    /// The owned skill set is identical to the last met set; the previous
    /// score is still current.
    NoChanges { last_score_id: DbId },
}

/// Evaluate the guard rules in order.
///
/// 1. No history: always proceed (the first calculation is never blocked).
/// 2. Validation transitions after the last calculation waive both the
///    cooldown and the no-op check -- validating an owned skill changes the
///    score without changing the owned set.
/// 3. `force` or an explicit bypass reason waives the cooldown.
/// 4. Within the cooldown window: reject with a retry hint.
/// 5. Identical met/owned sets: report no changes instead of writing.
pub fn evaluate(ctx: &GuardContext) -> GuardDecision {
    let Some(last) = &ctx.last else {
        return GuardDecision::Proceed {
            cooldown_waived: false,
            validation_changes: ValidationChanges::default(),
        };
    };

    let elapsed = ctx.now - last.calculated_at;
    let in_cooldown = elapsed < cooldown();

    if ctx.validation_changes.any() {
        return GuardDecision::Proceed {
            cooldown_waived: in_cooldown,
            validation_changes: ctx.validation_changes,
        };
    }

    let bypassed = ctx.force || ctx.bypass == Some(BypassReason::ValidationUpdate);

    if in_cooldown && !bypassed {
        let retry_after_secs = (cooldown() - elapsed).num_seconds().max(1);
        return GuardDecision::CooldownActive {
            last_score_id: last.score_id,
            retry_after_secs,
        };
    }

    if !ctx.force && last.met_skill_ids == ctx.current_skill_ids {
        return GuardDecision::NoChanges {
            last_score_id: last.score_id,
        };
    }

    GuardDecision::Proceed {
        cooldown_waived: in_cooldown && bypassed,
        validation_changes: ValidationChanges::default(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
