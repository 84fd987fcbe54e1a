//! Completion-service clients: the `CompletionClient` seam, the HTTP
//! implementation against an Ollama-compatible endpoint, and a mock for
//! orchestrator tests.

use serde::{Deserialize, Serialize};

use super::AdvisoryError;

/// One call-and-response with a language-model completion service.
/// Single attempt; retrying is the caller's decision and this engine
/// never makes it.
pub trait CompletionClient {
    fn complete(&self, system: &str, prompt: &str) -> Result<String, AdvisoryError>;
}

/// Blocking HTTP client for an Ollama-compatible `/api/generate` endpoint.
///
/// The request-scoped timeout bounds the engine's only suspension point;
/// expiry surfaces as [`AdvisoryError::Timeout`] and triggers fallback
/// like any other failure.
pub struct HttpCompletionClient {
    base_url: String,
    model: String,
    client: reqwest::blocking::Client,
    timeout_secs: u64,
}

impl HttpCompletionClient {
    pub fn new(base_url: &str, model: &str, timeout_secs: u64) -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
            client,
            timeout_secs,
        }
    }

    pub fn from_config(config: &crate::config::EngineConfig) -> Self {
        Self::new(
            &config.advisory_base_url,
            &config.advisory_model,
            config.advisory_timeout_secs,
        )
    }

    /// The model name sent with every request.
    pub fn model(&self) -> &str {
        &self.model
    }
}

/// Request body for `/api/generate`.
#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    system: &'a str,
    stream: bool,
    /// Constrains the model to emit valid JSON.
    format: &'a str,
}

/// Response body from `/api/generate`.
#[derive(Deserialize)]
struct GenerateResponse {
    response: String,
}

impl CompletionClient for HttpCompletionClient {
    fn complete(&self, system: &str, prompt: &str) -> Result<String, AdvisoryError> {
        let url = format!("{}/api/generate", self.base_url);
        let body = GenerateRequest {
            model: &self.model,
            prompt,
            system,
            stream: false,
            format: "json",
        };

        let response = self.client.post(&url).json(&body).send().map_err(|e| {
            if e.is_timeout() {
                AdvisoryError::Timeout(self.timeout_secs)
            } else if e.is_connect() {
                AdvisoryError::Connection(self.base_url.clone())
            } else {
                AdvisoryError::Connection(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(AdvisoryError::HttpStatus {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: GenerateResponse = response
            .json()
            .map_err(|e| AdvisoryError::ResponseParsing(e.to_string()))?;

        Ok(parsed.response)
    }
}

/// What a [`MockCompletionClient`] does when called.
enum MockOutcome {
    Respond(String),
    TimeOut,
    Unreachable,
}

/// Mock completion client for tests — a canned response or a canned
/// failure, so the orchestrator's fallback can be exercised without a
/// network.
pub struct MockCompletionClient {
    outcome: MockOutcome,
}

impl MockCompletionClient {
    pub fn responding(response: &str) -> Self {
        Self {
            outcome: MockOutcome::Respond(response.to_string()),
        }
    }

    /// Simulates a request-scoped timeout expiry.
    pub fn timing_out() -> Self {
        Self {
            outcome: MockOutcome::TimeOut,
        }
    }

    /// Simulates a connection failure (service down).
    pub fn unreachable() -> Self {
        Self {
            outcome: MockOutcome::Unreachable,
        }
    }
}

impl CompletionClient for MockCompletionClient {
    fn complete(&self, _system: &str, _prompt: &str) -> Result<String, AdvisoryError> {
        match &self.outcome {
            MockOutcome::Respond(response) => Ok(response.clone()),
            MockOutcome::TimeOut => Err(AdvisoryError::Timeout(12)),
            MockOutcome::Unreachable => {
                Err(AdvisoryError::Connection("connection refused".to_string()))
            }
        }
    }
}
