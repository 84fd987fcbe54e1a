//! The rule-based matcher: pure, deterministic keyword search over the
//! pattern rule database. Identical text always yields identical output.

use super::rules::{PatternRule, RULE_TABLE};
use super::types::ConditionCandidate;

/// Likelihood assigned to the synthetic no-match candidate.
pub const GENERIC_CANDIDATE_LIKELIHOOD: u8 = 50;

/// Candidate list cap for a triage result.
pub const MAX_CANDIDATES: usize = 3;

/// Return every rule whose keyword set matches the normalized text,
/// in table declaration order.
pub fn match_rules(normalized_text: &str) -> Vec<&'static PatternRule> {
    let text_lower = normalized_text.to_lowercase();
    let matches: Vec<&'static PatternRule> = RULE_TABLE
        .iter()
        .filter(|rule| rule.keywords.iter().any(|kw| text_lower.contains(kw)))
        .collect();

    for rule in &matches {
        tracing::debug!(rule_id = rule.id, "Pattern rule fired");
    }

    matches
}

/// Build the ordered candidate list from firing rules: descending
/// likelihood, ties kept in declaration order, capped at
/// [`MAX_CANDIDATES`]. Zero firing rules yield exactly one synthetic
/// candidate — the list is never empty.
pub fn candidates_from_matches(matches: &[&'static PatternRule]) -> Vec<ConditionCandidate> {
    if matches.is_empty() {
        return vec![generic_candidate()];
    }

    let mut candidates = Vec::new();
    for rule in matches {
        for name in rule.conditions {
            candidates.push(ConditionCandidate {
                name: (*name).to_string(),
                likelihood: rule.likelihood,
                recommendation: rule.recommendation.to_string(),
                reasoning: None,
                confidence_tier: None,
                references: None,
                self_care: Some(rule.self_care.to_string()),
            });
        }
    }

    // Stable sort keeps declaration order on equal likelihoods.
    candidates.sort_by(|a, b| b.likelihood.cmp(&a.likelihood));
    candidates.truncate(MAX_CANDIDATES);
    candidates
}

/// The deterministic no-match fallback candidate.
pub fn generic_candidate() -> ConditionCandidate {
    ConditionCandidate {
        name: "Symptoms requiring medical evaluation".to_string(),
        likelihood: GENERIC_CANDIDATE_LIKELIHOOD,
        recommendation: "Your symptoms did not match a known pattern. A clinician can \
                         evaluate them properly — book an appointment if they persist \
                         or worsen."
            .to_string(),
        reasoning: None,
        confidence_tier: None,
        references: None,
        self_care: Some("Monitor your symptoms and note any changes.".to_string()),
    }
}
