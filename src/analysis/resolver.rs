//! The triage level resolver: merges matcher output with structured
//! interview signals into one final level.
//!
//! Precedence, in order: rule-declared emergency, pain scale >= 8,
//! matched-rule baseline, secondary pain/fever escalation. Escalation is
//! monotonic — the final level is never below the rule-derived baseline.
//! The policy is deliberately conservative to bias toward seeking care.

use super::rules::PatternRule;
use super::types::{InterviewAnswers, TriageLevel};

/// Pain scale at or above which triage is forced to `high`.
pub const PAIN_FORCE_HIGH: u8 = 8;

/// Pain scale at or above which a `low` baseline is raised to `medium`.
pub const PAIN_RAISE_MEDIUM: u8 = 6;

/// Resolve the final triage level for a set of fired rules and the
/// structured interview answers.
pub fn resolve_triage_level(
    matches: &[&'static PatternRule],
    answers: &InterviewAnswers,
) -> TriageLevel {
    resolve_with_floor(matches, answers, TriageLevel::Low)
}

/// Resolve with a pre-assigned level as the floor. Used to escalate an
/// advisory-assigned level against the local signals: the result is
/// never below `floor`, and the same precedence applies above it.
pub fn resolve_with_floor(
    matches: &[&'static PatternRule],
    answers: &InterviewAnswers,
    floor: TriageLevel,
) -> TriageLevel {
    // Emergency rules override every other signal.
    if let Some(rule) = matches.iter().find(|r| r.emergency) {
        tracing::warn!(rule_id = rule.id, "Emergency rule fired — triage forced to high");
        return TriageLevel::High;
    }

    if answers.pain_scale >= PAIN_FORCE_HIGH {
        tracing::warn!(
            pain_scale = answers.pain_scale,
            "Severe reported pain — triage forced to high"
        );
        return TriageLevel::High;
    }

    let baseline = matches
        .iter()
        .map(|r| r.base_level)
        .max()
        .unwrap_or(TriageLevel::Low)
        .max(floor);

    let mut level = baseline;
    if answers.pain_scale >= PAIN_RAISE_MEDIUM && level == TriageLevel::Low {
        level = TriageLevel::Medium;
    }
    if answers.fever && level == TriageLevel::Low {
        level = TriageLevel::Medium;
    }

    debug_assert!(level >= baseline, "escalation must be monotonic");
    level
}
