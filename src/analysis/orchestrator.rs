//! The triage engine: validates input, runs the advisory path, and falls
//! back to the rule-based matcher on any advisory failure.
//!
//! Stateless between calls. The advisory path is tried exactly once per
//! call; every failure mode of that path (connection, timeout, bad HTTP
//! status, unreadable body, contract violation) is recovered here and
//! never surfaces to the caller.

use super::advisory;
use super::advisory::client::CompletionClient;
use super::matcher;
use super::resolver;
use super::rules;
use super::types::{
    AnalysisMethod, ConditionCandidate, SymptomReport, TriageLevel, TriageResult,
};
use super::validate::validate_symptom_text;
use super::TriageError;
use crate::config::EngineConfig;

/// Actions text when the resolver escalated to `high` on interview
/// signals alone, without an emergency rule supplying its own wording.
const ESCALATED_ACTIONS: &str =
    "Your reported pain level indicates you should seek urgent care. Go to \
     an urgent care clinic or emergency department today.";

/// Limitations note attached to every rule-based result.
const FALLBACK_LIMITATIONS: &str =
    "This assessment was produced by keyword pattern matching, not by a \
     clinical model. It cannot weigh symptom combinations or history and \
     may miss conditions a clinician would consider.";

/// One symptom report in, one triage result out.
///
/// Generic over the completion client so tests drive the advisory path
/// with a mock instead of a live service.
pub struct TriageEngine<'a, C: CompletionClient> {
    client: &'a C,
    config: EngineConfig,
}

impl<'a, C: CompletionClient> TriageEngine<'a, C> {
    pub fn new(client: &'a C) -> Self {
        Self::with_config(client, EngineConfig::default())
    }

    pub fn with_config(client: &'a C, config: EngineConfig) -> Self {
        Self { client, config }
    }

    /// Analyze one symptom report.
    ///
    /// Errors only on invalid input; once validation passes, a result is
    /// always produced — by the advisory path when it succeeds end to
    /// end, by the rule-based matcher otherwise.
    pub fn analyze(&self, report: &SymptomReport) -> Result<TriageResult, TriageError> {
        // 1. Validate and sanitize the free-text description.
        let sanitized = validate_symptom_text(
            &report.description,
            self.config.min_description_chars,
            self.config.max_description_chars,
        )?;

        let sanitized_report = SymptomReport {
            description: sanitized,
            answers: report.answers.clone(),
            demographics: report.demographics.clone(),
        };

        // 2. Advisory path, single attempt.
        match advisory::run_advisory(self.client, &sanitized_report) {
            Ok(result) => Ok(escalate_advisory_result(result, &sanitized_report)),
            Err(e) => {
                tracing::warn!(error = %e, "Advisory path failed, using rule-based fallback");
                self.rule_based(&sanitized_report)
            }
        }
    }

    /// Deterministic rule-based analysis of an already-sanitized report.
    fn rule_based(&self, report: &SymptomReport) -> Result<TriageResult, TriageError> {
        // 3. Refuse to triage against a corrupt rule table.
        if let Err(reason) = rules::verify_rule_table() {
            tracing::error!(%reason, "Rule table integrity check failed");
            return Err(TriageError::Internal);
        }

        // 4. Match, resolve, rank.
        let matches = matcher::match_rules(&report.description);
        let triage_level = resolver::resolve_triage_level(&matches, &report.answers);
        let conditions = matcher::candidates_from_matches(&matches);

        let confidence = if matches.is_empty() {
            self.config.fallback_confidence_generic
        } else {
            self.config.fallback_confidence_matched
        };

        let recommended_actions = fallback_actions(triage_level, &matches, &conditions);

        tracing::info!(
            ?triage_level,
            rules_fired = matches.len(),
            candidates = conditions.len(),
            confidence,
            "Rule-based analysis complete"
        );

        Ok(TriageResult {
            triage_level,
            conditions,
            recommended_actions,
            analysis_method: AnalysisMethod::RuleBased,
            confidence,
            reasoning: None,
            limitations: Some(FALLBACK_LIMITATIONS.to_string()),
        })
    }
}

/// Escalate an advisory-assigned level against the local signals.
///
/// The model's level is a floor, never a ceiling: an emergency keyword
/// in the text or severe reported pain raises it regardless of what the
/// model said. The rest of the result is kept as the model produced it.
fn escalate_advisory_result(mut result: TriageResult, report: &SymptomReport) -> TriageResult {
    let matches = matcher::match_rules(&report.description);
    let resolved =
        resolver::resolve_with_floor(&matches, &report.answers, result.triage_level);
    if resolved > result.triage_level {
        tracing::warn!(
            advisory_level = ?result.triage_level,
            resolved_level = ?resolved,
            "Advisory triage level raised by local signals"
        );
        result.triage_level = resolved;
    }
    result
}

/// Pick the actions text for a rule-based result.
///
/// An emergency rule's own recommendation wins. When the resolver raised
/// the level to `high` past every fired rule's baseline, the fixed
/// escalation wording applies. Otherwise the top-ranked candidate speaks.
fn fallback_actions(
    level: TriageLevel,
    matches: &[&'static rules::PatternRule],
    conditions: &[ConditionCandidate],
) -> String {
    if let Some(rule) = matches.iter().find(|r| r.emergency) {
        return rule.recommendation.to_string();
    }

    let baseline = matches
        .iter()
        .map(|r| r.base_level)
        .max()
        .unwrap_or(TriageLevel::Low);
    if level == TriageLevel::High && baseline < TriageLevel::High {
        return ESCALATED_ACTIONS.to_string();
    }

    // The candidate list is never empty.
    conditions
        .first()
        .map(|c| c.recommendation.clone())
        .unwrap_or_else(|| ESCALATED_ACTIONS.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::advisory::client::MockCompletionClient;
    use crate::analysis::types::{BodyLocation, InterviewAnswers, SymptomDuration};

    fn report(description: &str, pain_scale: u8, fever: bool) -> SymptomReport {
        SymptomReport {
            description: description.to_string(),
            answers: InterviewAnswers {
                pain_scale,
                fever,
                duration: SymptomDuration::OneToThreeDays,
                body_location: BodyLocation::General,
            },
            demographics: None,
        }
    }

    fn advisory_response(level: &str) -> String {
        serde_json::json!({
            "triageLevel": level,
            "conditions": [
                {"name": "Tension headache", "likelihood": 72, "recommendation": "Rest and hydrate."}
            ],
            "actions": "Rest today and monitor.",
            "confidenceScore": 0.85
        })
        .to_string()
    }

    // =================================================================
    // VALIDATION GATE
    // =================================================================

    #[test]
    fn short_description_is_rejected_before_any_analysis() {
        let client = MockCompletionClient::responding(&advisory_response("low"));
        let engine = TriageEngine::new(&client);
        let result = engine.analyze(&report("headache", 3, false));
        assert!(matches!(result, Err(TriageError::Validation(_))));
    }

    #[test]
    fn script_content_is_rejected() {
        let client = MockCompletionClient::responding(&advisory_response("low"));
        let engine = TriageEngine::new(&client);
        let result = engine.analyze(&report(
            "headache <script>alert(1)</script> since morning",
            3,
            false,
        ));
        assert!(matches!(result, Err(TriageError::ContentRejected)));
    }

    #[test]
    fn overlong_description_is_rejected() {
        let client = MockCompletionClient::responding(&advisory_response("low"));
        let engine = TriageEngine::new(&client);
        let long = "a".repeat(2_001);
        assert!(matches!(
            engine.analyze(&report(&long, 3, false)),
            Err(TriageError::Validation(_))
        ));
    }

    // =================================================================
    // ADVISORY PATH
    // =================================================================

    #[test]
    fn valid_advisory_response_is_returned_as_is() {
        let client = MockCompletionClient::responding(&advisory_response("low"));
        let engine = TriageEngine::new(&client);
        let result = engine
            .analyze(&report("mild headache for two days", 3, false))
            .unwrap();
        assert_eq!(result.analysis_method, AnalysisMethod::Ai);
        assert_eq!(result.triage_level, TriageLevel::Low);
        assert_eq!(result.recommended_actions, "Rest today and monitor.");
        assert!((result.confidence - 0.85).abs() < 1e-6);
    }

    #[test]
    fn ai_level_raised_to_high_on_emergency_keyword() {
        // A model that understates an emergency must not have the last word.
        let client = MockCompletionClient::responding(&advisory_response("low"));
        let engine = TriageEngine::new(&client);
        let result = engine
            .analyze(&report("crushing chest pain radiating to my arm", 9, false))
            .unwrap();
        assert_eq!(result.analysis_method, AnalysisMethod::Ai);
        assert_eq!(result.triage_level, TriageLevel::High);
    }

    #[test]
    fn ai_level_raised_to_high_on_severe_pain_without_rule() {
        let client = MockCompletionClient::responding(&advisory_response("low"));
        let engine = TriageEngine::new(&client);
        let result = engine
            .analyze(&report("my elbow feels strange and numb", 9, false))
            .unwrap();
        assert_eq!(result.analysis_method, AnalysisMethod::Ai);
        assert_eq!(result.triage_level, TriageLevel::High);
    }

    #[test]
    fn ai_level_raised_to_medium_by_fever() {
        let client = MockCompletionClient::responding(&advisory_response("low"));
        let engine = TriageEngine::new(&client);
        let result = engine
            .analyze(&report("feeling generally unwell and shivery", 3, true))
            .unwrap();
        assert_eq!(result.analysis_method, AnalysisMethod::Ai);
        assert_eq!(result.triage_level, TriageLevel::Medium);
    }

    #[test]
    fn ai_level_is_never_lowered() {
        // Benign local signals leave a high advisory level untouched.
        let client = MockCompletionClient::responding(&advisory_response("high"));
        let engine = TriageEngine::new(&client);
        let result = engine
            .analyze(&report("mild headache for two days", 2, false))
            .unwrap();
        assert_eq!(result.triage_level, TriageLevel::High);
    }

    #[test]
    fn ai_escalation_keeps_model_conditions_and_actions() {
        let client = MockCompletionClient::responding(&advisory_response("low"));
        let engine = TriageEngine::new(&client);
        let result = engine
            .analyze(&report("my elbow feels strange and numb", 9, false))
            .unwrap();
        assert_eq!(result.triage_level, TriageLevel::High);
        assert_eq!(result.conditions[0].name, "Tension headache");
        assert_eq!(result.recommended_actions, "Rest today and monitor.");
    }

    #[test]
    fn advisory_timeout_falls_back_to_rules() {
        let client = MockCompletionClient::timing_out();
        let engine = TriageEngine::new(&client);
        let result = engine
            .analyze(&report("mild headache for two days", 3, false))
            .unwrap();
        assert_eq!(result.analysis_method, AnalysisMethod::RuleBased);
        assert_eq!(result.triage_level, TriageLevel::Low);
    }

    #[test]
    fn unreachable_service_falls_back_to_rules() {
        let client = MockCompletionClient::unreachable();
        let engine = TriageEngine::new(&client);
        let result = engine
            .analyze(&report("persistent burning during urination", 4, false))
            .unwrap();
        assert_eq!(result.analysis_method, AnalysisMethod::RuleBased);
        assert_eq!(result.triage_level, TriageLevel::Medium);
        assert_eq!(result.conditions[0].name, "Urinary tract infection");
        assert_eq!(result.conditions[0].likelihood, 82);
    }

    #[test]
    fn contract_violation_falls_back_with_limitations_note() {
        // Response missing the conditions array.
        let bad = serde_json::json!({
            "triageLevel": "low",
            "actions": "rest",
            "confidenceScore": 0.9
        })
        .to_string();
        let client = MockCompletionClient::responding(&bad);
        let engine = TriageEngine::new(&client);
        let result = engine
            .analyze(&report("mild headache for two days", 3, false))
            .unwrap();
        assert_eq!(result.analysis_method, AnalysisMethod::RuleBased);
        assert!(result.limitations.as_deref().is_some_and(|l| !l.is_empty()));
    }

    #[test]
    fn prose_response_falls_back() {
        let client = MockCompletionClient::responding("It is probably just a cold, rest up!");
        let engine = TriageEngine::new(&client);
        let result = engine
            .analyze(&report("runny nose and sneezing a lot", 1, false))
            .unwrap();
        assert_eq!(result.analysis_method, AnalysisMethod::RuleBased);
    }

    // =================================================================
    // RULE-BASED FALLBACK SEMANTICS
    // =================================================================

    fn fallback_engine() -> MockCompletionClient {
        MockCompletionClient::unreachable()
    }

    #[test]
    fn chest_pain_is_high_with_emergency_actions() {
        let client = fallback_engine();
        let engine = TriageEngine::new(&client);
        let result = engine
            .analyze(&report("sudden chest pain radiating to my arm", 5, false))
            .unwrap();
        assert_eq!(result.triage_level, TriageLevel::High);
        assert!(result.recommended_actions.contains("911"));
        assert!((result.confidence - 0.7).abs() < 1e-6);
    }

    #[test]
    fn severe_pain_forces_high_without_matching_rule() {
        let client = fallback_engine();
        let engine = TriageEngine::new(&client);
        let result = engine
            .analyze(&report("my elbow feels strange and numb", 9, false))
            .unwrap();
        assert_eq!(result.triage_level, TriageLevel::High);
        assert_eq!(result.recommended_actions, ESCALATED_ACTIONS);
    }

    #[test]
    fn fever_without_rule_match_is_medium() {
        let client = fallback_engine();
        let engine = TriageEngine::new(&client);
        // "feverish" does not contain any rule keyword as written here;
        // use text that avoids the fever keyword set entirely.
        let result = engine
            .analyze(&report("feeling generally unwell and shivery", 3, true))
            .unwrap();
        assert_eq!(result.triage_level, TriageLevel::Medium);
        assert_eq!(result.conditions.len(), 1);
        assert_eq!(result.conditions[0].likelihood, 50);
    }

    #[test]
    fn no_match_yields_generic_candidate_and_lower_confidence() {
        let client = fallback_engine();
        let engine = TriageEngine::new(&client);
        let result = engine
            .analyze(&report("my elbow feels a bit odd lately", 2, false))
            .unwrap();
        assert_eq!(result.triage_level, TriageLevel::Low);
        assert_eq!(result.conditions.len(), 1);
        assert_eq!(result.conditions[0].name, "Symptoms requiring medical evaluation");
        assert!((result.confidence - 0.5).abs() < 1e-6);
        assert!(result.recommended_actions.contains("clinician"));
    }

    #[test]
    fn headache_scenario_is_low_with_self_care() {
        let client = fallback_engine();
        let engine = TriageEngine::new(&client);
        let result = engine
            .analyze(&report("mild headache for the last two days", 3, false))
            .unwrap();
        assert_eq!(result.triage_level, TriageLevel::Low);
        assert_eq!(result.conditions[0].likelihood, 70);
        assert!(result.conditions[0]
            .self_care
            .as_deref()
            .is_some_and(|s| !s.is_empty()));
    }

    #[test]
    fn candidates_never_exceed_three() {
        let client = fallback_engine();
        let engine = TriageEngine::new(&client);
        let result = engine
            .analyze(&report(
                "headache, fever, rash, nausea and joint pain everywhere",
                4,
                true,
            ))
            .unwrap();
        assert_eq!(result.conditions.len(), 3);
    }

    #[test]
    fn analysis_is_idempotent() {
        let client = fallback_engine();
        let engine = TriageEngine::new(&client);
        let input = report("headache and fever since yesterday evening", 4, true);
        let first = engine.analyze(&input).unwrap();
        let second = engine.analyze(&input).unwrap();
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn fallback_result_is_tagged_rule_based_in_json() {
        let client = fallback_engine();
        let engine = TriageEngine::new(&client);
        let result = engine
            .analyze(&report("mild headache for two days", 3, false))
            .unwrap();
        let json = serde_json::to_string(&result).unwrap();
        assert!(json.contains("\"analysisMethod\":\"rule-based\""));
        assert!(json.contains("\"triageLevel\":\"low\""));
    }

    #[test]
    fn custom_config_confidence_is_used() {
        let client = fallback_engine();
        let config = EngineConfig {
            fallback_confidence_matched: 0.65,
            ..EngineConfig::default()
        };
        let engine = TriageEngine::with_config(&client, config);
        let result = engine
            .analyze(&report("mild headache for two days", 3, false))
            .unwrap();
        assert!((result.confidence - 0.65).abs() < 1e-6);
    }

    #[test]
    fn sanitized_text_still_matches_rules() {
        // Quotes are escaped before matching; keywords must still fire.
        let client = fallback_engine();
        let engine = TriageEngine::new(&client);
        let result = engine
            .analyze(&report("a \"burning urination\" feeling since friday", 4, false))
            .unwrap();
        assert_eq!(result.conditions[0].name, "Urinary tract infection");
    }
}
