pub mod client;
pub mod contract;
pub mod prompt;

use thiserror::Error;

use super::types::{SymptomReport, TriageResult};
use client::CompletionClient;
use contract::ContractCheck;

/// Any failure of the advisory path. Every variant means the same thing
/// to the orchestrator — the advisory result is unavailable, fall back to
/// the rule-based matcher — and none is ever surfaced to the caller.
#[derive(Error, Debug)]
pub enum AdvisoryError {
    #[error("Completion service connection failed: {0}")]
    Connection(String),

    #[error("Completion request timed out after {0}s")]
    Timeout(u64),

    #[error("Completion service returned HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("Completion response body unreadable: {0}")]
    ResponseParsing(String),

    #[error("Response contract violation: {0}")]
    ContractViolation(String),
}

/// Run the advisory path: build the bounded context, call the model once
/// (no retries), validate the response contract strictly.
///
/// The report's description must already be sanitized by the validator.
pub fn run_advisory<C: CompletionClient>(
    client: &C,
    report: &SymptomReport,
) -> Result<TriageResult, AdvisoryError> {
    let context = prompt::build_context_block(report);
    let raw = client.complete(prompt::TRIAGE_SYSTEM_PROMPT, &context)?;

    match contract::validate_advisory_response(&raw) {
        ContractCheck::Valid(result) => {
            tracing::info!(
                triage_level = ?result.triage_level,
                confidence = result.confidence,
                candidates = result.conditions.len(),
                "Advisory analysis accepted"
            );
            Ok(*result)
        }
        ContractCheck::Invalid { reason } => {
            tracing::warn!(%reason, "Advisory response rejected by contract validation");
            Err(AdvisoryError::ContractViolation(reason))
        }
    }
}
