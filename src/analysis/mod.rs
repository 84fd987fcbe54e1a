pub mod advisory;
pub mod matcher;
pub mod orchestrator;
pub mod resolver;
pub mod rules;
pub mod types;
pub mod validate;

use thiserror::Error;

/// Errors surfaced to callers of the triage engine.
///
/// Advisory-path failures never appear here — the orchestrator recovers
/// them internally by falling back to the rule-based matcher.
#[derive(Error, Debug)]
pub enum TriageError {
    /// Input text missing or outside length bounds. Client-side; retrying
    /// the same input cannot succeed.
    #[error("Invalid symptom description: {0}")]
    Validation(String),

    /// Input matched a disallowed script/markup pattern.
    #[error("Symptom description contains disallowed content")]
    ContentRejected,

    /// Unexpected failure inside the matcher or resolver (e.g. a corrupt
    /// rule table entry). The display string is deliberately generic;
    /// detail goes to the log only.
    #[error("Internal analysis error")]
    Internal,
}
