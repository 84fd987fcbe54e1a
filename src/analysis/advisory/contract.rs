//! Strict validation of the advisory response contract.
//!
//! The model's output is an untrusted, dynamically shaped payload: nothing
//! is read from it until the whole shape has been validated. The verdict
//! is a tagged variant — `Valid` carries a fully built result, `Invalid`
//! carries the reason — so callers cannot use a half-validated response.

use serde::Deserialize;
use serde_json::Value;

use crate::analysis::matcher::MAX_CANDIDATES;
use crate::analysis::types::{
    AnalysisMethod, ConditionCandidate, ConfidenceTier, TriageLevel, TriageResult,
};

/// Verdict of contract validation.
#[derive(Debug)]
pub enum ContractCheck {
    Valid(Box<TriageResult>),
    Invalid { reason: String },
}

/// Raw response shape: every field optional, mandatory-typed fields kept
/// as `Value` so wrong types are reported as contract violations rather
/// than deserialization noise.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawAdvisoryResponse {
    triage_level: Option<Value>,
    conditions: Option<Value>,
    actions: Option<Value>,
    reasoning: Option<String>,
    confidence_score: Option<Value>,
    limitations_note: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawCondition {
    name: Option<Value>,
    likelihood: Option<Value>,
    recommendation: Option<Value>,
    reasoning: Option<String>,
    confidence_tier: Option<String>,
    references: Option<Vec<String>>,
    self_care: Option<String>,
}

/// Validate a raw completion body against the advisory contract.
///
/// Accepts a fenced ```json block or bare JSON. On success the result is
/// tagged `analysisMethod = "ai"`, conditions re-sorted by descending
/// likelihood and capped, and the model's own confidence passed through
/// unmodified.
pub fn validate_advisory_response(raw: &str) -> ContractCheck {
    let json_str = extract_json(raw);

    let parsed: RawAdvisoryResponse = match serde_json::from_str(&json_str) {
        Ok(parsed) => parsed,
        Err(e) => return invalid(format!("unparsable JSON body: {e}")),
    };

    let triage_level = match parsed.triage_level {
        None => return invalid("missing triageLevel"),
        Some(value) => match value.as_str().and_then(parse_level) {
            Some(level) => level,
            None => return invalid("triageLevel must be one of low/medium/high"),
        },
    };

    let raw_conditions = match parsed.conditions {
        None => return invalid("missing conditions"),
        Some(Value::Array(entries)) if !entries.is_empty() => entries,
        Some(Value::Array(_)) => return invalid("conditions array is empty"),
        Some(_) => return invalid("conditions must be an array"),
    };

    let mut conditions = Vec::with_capacity(raw_conditions.len());
    for (index, entry) in raw_conditions.into_iter().enumerate() {
        match validate_condition(entry) {
            Ok(candidate) => conditions.push(candidate),
            Err(reason) => return invalid(format!("conditions[{index}]: {reason}")),
        }
    }

    let actions = match parsed.actions.as_ref().and_then(Value::as_str) {
        Some(text) if !text.trim().is_empty() => text.to_string(),
        Some(_) => return invalid("actions is empty"),
        None => return invalid("missing actions"),
    };

    // Confidence must be present — defaulting is disallowed.
    let confidence = match parsed.confidence_score.as_ref().and_then(Value::as_f64) {
        Some(score) if (0.0..=1.0).contains(&score) => score as f32,
        Some(score) => return invalid(format!("confidenceScore {score} out of [0,1]")),
        None => return invalid("missing confidenceScore"),
    };

    conditions.sort_by(|a, b| b.likelihood.cmp(&a.likelihood));
    conditions.truncate(MAX_CANDIDATES);

    ContractCheck::Valid(Box::new(TriageResult {
        triage_level,
        conditions,
        recommended_actions: actions,
        analysis_method: AnalysisMethod::Ai,
        confidence,
        reasoning: parsed.reasoning,
        limitations: parsed.limitations_note,
    }))
}

fn validate_condition(entry: Value) -> Result<ConditionCandidate, String> {
    let raw: RawCondition = serde_json::from_value(entry)
        .map_err(|e| format!("malformed entry: {e}"))?;

    let name = match raw.name.as_ref().and_then(Value::as_str) {
        Some(text) if !text.trim().is_empty() => text.to_string(),
        Some(_) => return Err("name is empty".to_string()),
        None => return Err("missing name".to_string()),
    };

    let likelihood = match raw.likelihood.as_ref().and_then(Value::as_f64) {
        Some(value) if (0.0..=100.0).contains(&value) => value.round() as u8,
        Some(value) => return Err(format!("likelihood {value} out of [0,100]")),
        None => return Err("likelihood missing or non-numeric".to_string()),
    };

    let recommendation = match raw.recommendation.as_ref().and_then(Value::as_str) {
        Some(text) if !text.trim().is_empty() => text.to_string(),
        Some(_) => return Err("recommendation is empty".to_string()),
        None => return Err("missing recommendation".to_string()),
    };

    let confidence_tier = match raw.confidence_tier.as_deref() {
        None => None,
        Some("high") => Some(ConfidenceTier::High),
        Some("medium") => Some(ConfidenceTier::Medium),
        Some("low") => Some(ConfidenceTier::Low),
        Some(other) => return Err(format!("unknown confidenceTier {other:?}")),
    };

    Ok(ConditionCandidate {
        name,
        likelihood,
        recommendation,
        reasoning: raw.reasoning,
        confidence_tier,
        references: raw.references,
        self_care: raw.self_care,
    })
}

fn parse_level(text: &str) -> Option<TriageLevel> {
    match text {
        "low" => Some(TriageLevel::Low),
        "medium" => Some(TriageLevel::Medium),
        "high" => Some(TriageLevel::High),
        _ => None,
    }
}

/// Models sometimes wrap the object in a fenced block despite the system
/// instruction; accept that one deviation, nothing else.
fn extract_json(raw: &str) -> String {
    if let Some(start) = raw.find("```json") {
        let content = &raw[start + 7..];
        if let Some(end) = content.find("```") {
            return content[..end].trim().to_string();
        }
    }
    raw.trim().to_string()
}

fn invalid(reason: impl Into<String>) -> ContractCheck {
    ContractCheck::Invalid {
        reason: reason.into(),
    }
}
