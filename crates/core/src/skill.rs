//! Skill ledger vocabulary: sources, validation statuses, levels.
//!
//! Every status that the original data model stored as a free string is a
//! closed enum here, with string constants for database round-trips.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Valid skill sources (stored in `user_skills.source`).
pub const SOURCE_SELF: &str = "self";
pub const SOURCE_RESUME: &str = "resume";
pub const SOURCE_VALIDATED: &str = "validated";
pub const SOURCE_DEMO: &str = "demo";

/// All valid source strings.
pub const VALID_SOURCES: &[&str] = &[SOURCE_SELF, SOURCE_RESUME, SOURCE_VALIDATED, SOURCE_DEMO];

/// Valid validation statuses (stored in `user_skills.validation_status`).
pub const STATUS_NONE: &str = "none";
pub const STATUS_PENDING: &str = "pending";
pub const STATUS_VALIDATED: &str = "validated";
pub const STATUS_REJECTED: &str = "rejected";

/// All valid validation status strings.
pub const VALID_VALIDATION_STATUSES: &[&str] =
    &[STATUS_NONE, STATUS_PENDING, STATUS_VALIDATED, STATUS_REJECTED];

/// Minimum length of the mentor note required when rejecting a skill.
pub const MIN_REJECTION_NOTE_LEN: usize = 10;

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Where a ledger entry came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillSource {
    /// Declared by the person themselves.
    #[serde(rename = "self")]
    SelfDeclared,
    /// Extracted from an uploaded resume.
    Resume,
    /// Added directly by a mentor as already validated.
    Validated,
    /// Demo/sandbox data, never counted in real scoring.
    Demo,
}

impl SkillSource {
    /// Convert from a database string value.
    pub fn from_str_value(s: &str) -> Result<Self, String> {
        match s {
            SOURCE_SELF => Ok(Self::SelfDeclared),
            SOURCE_RESUME => Ok(Self::Resume),
            SOURCE_VALIDATED => Ok(Self::Validated),
            SOURCE_DEMO => Ok(Self::Demo),
            _ => Err(format!(
                "Invalid skill source '{s}'. Must be one of: {}",
                VALID_SOURCES.join(", ")
            )),
        }
    }

    /// Convert to the database string value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SelfDeclared => SOURCE_SELF,
            Self::Resume => SOURCE_RESUME,
            Self::Validated => SOURCE_VALIDATED,
            Self::Demo => SOURCE_DEMO,
        }
    }

    /// Precedence when the same skill appears under several sources.
    /// Higher wins when picking the source to report on a breakdown line.
    pub fn precedence(&self) -> u8 {
        match self {
            Self::Validated => 3,
            Self::Resume => 2,
            Self::SelfDeclared => 1,
            Self::Demo => 0,
        }
    }
}

/// Mentor validation state of a ledger entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationStatus {
    None,
    Pending,
    Validated,
    Rejected,
}

impl ValidationStatus {
    /// Convert from a database string value.
    pub fn from_str_value(s: &str) -> Result<Self, String> {
        match s {
            STATUS_NONE => Ok(Self::None),
            STATUS_PENDING => Ok(Self::Pending),
            STATUS_VALIDATED => Ok(Self::Validated),
            STATUS_REJECTED => Ok(Self::Rejected),
            _ => Err(format!(
                "Invalid validation status '{s}'. Must be one of: {}",
                VALID_VALIDATION_STATUSES.join(", ")
            )),
        }
    }

    /// Convert to the database string value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => STATUS_NONE,
            Self::Pending => STATUS_PENDING,
            Self::Validated => STATUS_VALIDATED,
            Self::Rejected => STATUS_REJECTED,
        }
    }
}

/// Descriptive proficiency level. Stored on the ledger but not used in
/// scoring; the observed system only distinguishes met/missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillLevel {
    Beginner,
    Intermediate,
    Advanced,
    Expert,
}

impl SkillLevel {
    pub fn from_str_value(s: &str) -> Result<Self, String> {
        match s {
            "beginner" => Ok(Self::Beginner),
            "intermediate" => Ok(Self::Intermediate),
            "advanced" => Ok(Self::Advanced),
            "expert" => Ok(Self::Expert),
            _ => Err(format!(
                "Invalid skill level '{s}'. Must be one of: beginner, intermediate, advanced, expert"
            )),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
            Self::Expert => "expert",
        }
    }
}

/// What initiated a readiness calculation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerSource {
    /// The person asked for a recalculation.
    UserExplicit,
    /// An internal path (e.g. a scheduled refresh) asked.
    System,
    /// A mentor validation review triggered it.
    ValidationReview,
    /// Demo/sandbox calculation.
    Demo,
}

impl TriggerSource {
    pub fn from_str_value(s: &str) -> Result<Self, String> {
        match s {
            "user_explicit" => Ok(Self::UserExplicit),
            "system" => Ok(Self::System),
            "validation_review" => Ok(Self::ValidationReview),
            "demo" => Ok(Self::Demo),
            _ => Err(format!(
                "Invalid trigger source '{s}'. Must be one of: user_explicit, system, validation_review, demo"
            )),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UserExplicit => "user_explicit",
            Self::System => "system",
            Self::ValidationReview => "validation_review",
            Self::Demo => "demo",
        }
    }
}

// ---------------------------------------------------------------------------
// Validation functions
// ---------------------------------------------------------------------------

/// A ledger entry counts toward real scoring when its source is one of
/// self/resume/validated and it has not been rejected by a mentor.
/// Demo entries never score.
pub fn counts_toward_score(source: SkillSource, status: ValidationStatus) -> bool {
    !matches!(source, SkillSource::Demo) && !matches!(status, ValidationStatus::Rejected)
}

/// A ledger entry is treated as mentor-validated when either the entry was
/// created by a mentor (`source = validated`) or a mentor confirmed it
/// (`validation_status = validated`).
pub fn is_validated(source: SkillSource, status: ValidationStatus) -> bool {
    matches!(source, SkillSource::Validated) || matches!(status, ValidationStatus::Validated)
}

/// Validate the mentor note accompanying a rejection.
///
/// A rejection must carry a note of at least [`MIN_REJECTION_NOTE_LEN`]
/// characters so the person knows what to fix.
pub fn validate_rejection_note(note: Option<&str>) -> Result<(), String> {
    let trimmed = note.map(str::trim).unwrap_or("");
    if trimmed.chars().count() < MIN_REJECTION_NOTE_LEN {
        return Err(format!(
            "A rejection requires a note of at least {MIN_REJECTION_NOTE_LEN} characters"
        ));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // -- SkillSource ---------------------------------------------------------

    #[test]
    fn source_round_trip() {
        for source in &[
            SkillSource::SelfDeclared,
            SkillSource::Resume,
            SkillSource::Validated,
            SkillSource::Demo,
        ] {
            assert_eq!(
                SkillSource::from_str_value(source.as_str()).unwrap(),
                *source
            );
        }
    }

    #[test]
    fn source_invalid_string() {
        let result = SkillSource::from_str_value("linkedin");
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("Invalid skill source"));
    }

    #[test]
    fn source_self_serializes_as_self() {
        let json = serde_json::to_string(&SkillSource::SelfDeclared).unwrap();
        assert_eq!(json, "\"self\"");
    }

    // -- ValidationStatus ----------------------------------------------------

    #[test]
    fn status_round_trip() {
        for status in &[
            ValidationStatus::None,
            ValidationStatus::Pending,
            ValidationStatus::Validated,
            ValidationStatus::Rejected,
        ] {
            assert_eq!(
                ValidationStatus::from_str_value(status.as_str()).unwrap(),
                *status
            );
        }
    }

    #[test]
    fn status_invalid_string() {
        assert!(ValidationStatus::from_str_value("approved").is_err());
    }

    // -- counts_toward_score -------------------------------------------------

    #[test]
    fn self_declared_unvalidated_counts() {
        assert!(counts_toward_score(
            SkillSource::SelfDeclared,
            ValidationStatus::None
        ));
    }

    #[test]
    fn pending_counts() {
        assert!(counts_toward_score(
            SkillSource::Resume,
            ValidationStatus::Pending
        ));
    }

    #[test]
    fn rejected_never_counts() {
        for source in &[
            SkillSource::SelfDeclared,
            SkillSource::Resume,
            SkillSource::Validated,
        ] {
            assert!(!counts_toward_score(*source, ValidationStatus::Rejected));
        }
    }

    #[test]
    fn demo_never_counts() {
        assert!(!counts_toward_score(SkillSource::Demo, ValidationStatus::None));
        assert!(!counts_toward_score(
            SkillSource::Demo,
            ValidationStatus::Validated
        ));
    }

    // -- is_validated --------------------------------------------------------

    #[test]
    fn validated_source_is_validated() {
        assert!(is_validated(SkillSource::Validated, ValidationStatus::None));
    }

    #[test]
    fn validated_status_is_validated() {
        assert!(is_validated(
            SkillSource::SelfDeclared,
            ValidationStatus::Validated
        ));
    }

    #[test]
    fn unvalidated_self_is_not_validated() {
        assert!(!is_validated(
            SkillSource::SelfDeclared,
            ValidationStatus::Pending
        ));
    }

    // -- validate_rejection_note ---------------------------------------------

    #[test]
    fn rejection_note_too_short() {
        assert!(validate_rejection_note(Some("too short")).is_err());
    }

    #[test]
    fn rejection_note_missing() {
        assert!(validate_rejection_note(None).is_err());
    }

    #[test]
    fn rejection_note_whitespace_only() {
        assert!(validate_rejection_note(Some("              ")).is_err());
    }

    #[test]
    fn rejection_note_long_enough() {
        assert!(validate_rejection_note(Some("needs production experience")).is_ok());
    }
}
