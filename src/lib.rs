//! Symptom Triage Analysis Engine.
//!
//! Takes a free-text symptom description plus structured interview answers
//! and produces a triage priority level, a ranked list of candidate
//! conditions, and recommended next actions. An advisory call to an external
//! language-model service runs first; any failure falls back to a
//! deterministic, rule-based matcher. Outputs are advisory, not diagnoses.
//!
//! The engine holds no state between calls: one [`SymptomReport`] in, one
//! [`TriageResult`] out. Persistence, transport, and throttling belong to
//! the caller.

pub mod analysis;
pub mod config;

use tracing_subscriber::EnvFilter;

pub use analysis::advisory::client::{
    CompletionClient, HttpCompletionClient, MockCompletionClient,
};
pub use analysis::orchestrator::TriageEngine;
pub use analysis::types::{
    AnalysisMethod, BodyLocation, ConditionCandidate, ConfidenceTier, Demographics,
    InterviewAnswers, ProfileKind, Sex, SymptomDuration, SymptomReport, TriageLevel,
    TriageResult,
};
pub use analysis::TriageError;
pub use config::EngineConfig;

/// Initialize tracing for hosts embedding the engine.
///
/// Honors `RUST_LOG` when set, otherwise uses the crate default filter.
/// Call once at process startup; library code only emits events.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();
}
