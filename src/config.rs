//! Engine configuration and defaults.
//!
//! Everything tunable lives here so the orchestrator, validator, and
//! advisory client share one source of truth.

use serde::Serialize;

use crate::analysis::validate::{MAX_DESCRIPTION_CHARS, MIN_DESCRIPTION_CHARS};

/// Engine-level constants
pub const ENGINE_NAME: &str = "symtriage";
pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default tracing filter when `RUST_LOG` is unset.
pub fn default_log_filter() -> &'static str {
    "symtriage=info"
}

/// Standing disclaimer. The engine never appends this to results; callers
/// render it alongside every assessment they display.
pub const ADVISORY_DISCLAIMER: &str =
    "This assessment is informational and is not a medical diagnosis. \
     When in doubt, contact a healthcare professional.";

/// Tunables for one engine instance.
#[derive(Debug, Clone, Serialize)]
pub struct EngineConfig {
    /// Base URL of the completion service (Ollama-compatible).
    pub advisory_base_url: String,
    /// Model name passed with every completion request.
    pub advisory_model: String,
    /// Request-scoped timeout for the single advisory attempt.
    /// Expiry is treated like any other advisory failure.
    pub advisory_timeout_secs: u64,
    /// Minimum symptom description length in characters.
    pub min_description_chars: usize,
    /// Maximum symptom description length in characters.
    pub max_description_chars: usize,
    /// Confidence attached to fallback results when at least one rule fired.
    pub fallback_confidence_matched: f32,
    /// Confidence attached to fallback results for the generic no-match case.
    pub fallback_confidence_generic: f32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            advisory_base_url: "http://localhost:11434".to_string(),
            advisory_model: "medgemma".to_string(),
            advisory_timeout_secs: 12,
            min_description_chars: MIN_DESCRIPTION_CHARS,
            max_description_chars: MAX_DESCRIPTION_CHARS,
            fallback_confidence_matched: 0.7,
            fallback_confidence_generic: 0.5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_timeout_within_recommended_band() {
        let config = EngineConfig::default();
        assert!(config.advisory_timeout_secs >= 10);
        assert!(config.advisory_timeout_secs <= 15);
    }

    #[test]
    fn default_length_bounds() {
        let config = EngineConfig::default();
        assert_eq!(config.min_description_chars, 10);
        assert_eq!(config.max_description_chars, 2_000);
    }

    #[test]
    fn fallback_confidence_ordering() {
        let config = EngineConfig::default();
        assert!(config.fallback_confidence_matched > config.fallback_confidence_generic);
        assert!(config.fallback_confidence_matched <= 1.0);
    }

    #[test]
    fn engine_version_matches_cargo() {
        assert_eq!(ENGINE_VERSION, env!("CARGO_PKG_VERSION"));
        assert_eq!(ENGINE_NAME, "symtriage");
    }

    #[test]
    fn disclaimer_mentions_no_diagnosis() {
        assert!(ADVISORY_DISCLAIMER.contains("not a medical diagnosis"));
    }
}
