//! Ollama bridge: optional generative tier for the fallback chain.
//!
//! **Grounding:** the bridge never replaces the structured tiers. Callers
//! classify and search the local knowledge sources first; the bridge is only
//! consulted (a) as a secondary intent classifier when keyword scoring finds
//! nothing and (b) as the last resort before the generic-suggestion tier.
//! Absence of the bridge changes no other component's contract.
//!
//! Endpoint: `OLLAMA_BASE_URL` (default `http://localhost:11434`), model:
//! `OLLAMA_MODEL`. `from_env` returns `None` when no endpoint is configured,
//! which disables the generative tier entirely.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const DEFAULT_MODEL: &str = "llama3";

/// Failures of the generative service. All of them downgrade to the next
/// fallback tier; none propagate out of the pipeline.
#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    #[error("generative request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("generative service returned an empty completion")]
    EmptyCompletion,
}

/// Contract of the generative text service.
///
/// `generate` returns the raw completion text; callers decide whether the
/// output is substantial enough to use.
#[async_trait]
pub trait GenerativeService: Send + Sync {
    async fn generate(
        &self,
        prompt: &str,
        max_tokens: u32,
        temperature: f32,
    ) -> Result<String, BridgeError>;
}

// Ollama /api/generate request/response
#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    options: GenerateOptions,
}

#[derive(Serialize)]
struct GenerateOptions {
    num_predict: u32,
    temperature: f32,
}

#[derive(Deserialize)]
struct GenerateResponse {
    response: String,
}

/// Reqwest-based client for a local Ollama instance.
pub struct OllamaBridge {
    base_url: String,
    model: String,
    client: reqwest::Client,
}

impl OllamaBridge {
    /// Create a bridge from `OLLAMA_BASE_URL` / `OLLAMA_MODEL`.
    /// Returns `None` when no endpoint is configured.
    pub fn from_env() -> Option<Self> {
        let base_url = std::env::var("OLLAMA_BASE_URL").ok()?;
        let base_url = base_url.trim().to_string();
        if base_url.is_empty() {
            return None;
        }
        let bridge = Self::new(base_url);
        match std::env::var("OLLAMA_MODEL") {
            Ok(model) if !model.trim().is_empty() => Some(bridge.with_model(model.trim())),
            _ => Some(bridge),
        }
    }

    /// Create a bridge with an explicit endpoint.
    pub fn new(base_url: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: DEFAULT_MODEL.to_string(),
            client,
        }
    }

    /// Set the model (e.g. `llama3`, `mistral`).
    pub fn with_model(mut self, model: &str) -> Self {
        self.model = model.to_string();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl GenerativeService for OllamaBridge {
    async fn generate(
        &self,
        prompt: &str,
        max_tokens: u32,
        temperature: f32,
    ) -> Result<String, BridgeError> {
        let request = GenerateRequest {
            model: &self.model,
            prompt,
            stream: false,
            options: GenerateOptions {
                num_predict: max_tokens,
                temperature,
            },
        };
        let url = format!("{}/api/generate", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await?
            .error_for_status()?
            .json::<GenerateResponse>()
            .await?;
        let text = response.response.trim().to_string();
        if text.is_empty() {
            return Err(BridgeError::EmptyCompletion);
        }
        tracing::debug!(
            target: "copilot::ollama",
            model = %self.model,
            chars = text.len(),
            "generative completion received"
        );
        Ok(text)
    }
}

// ---------------------------------------------------------------------------
// Prompt builders
// ---------------------------------------------------------------------------

/// Prompt for the secondary intent-classification attempt. The model must
/// answer with one intent name from the list, or `unknown`.
pub fn intent_classifier_prompt(message: &str, intent_names: &[&str]) -> String {
    format!(
        "You are an HR chatbot intent classifier. Given the user message, classify it into \
         one of these intents:\n{}\n\nUser message: \"{}\"\n\nRespond with only the intent \
         name, nothing else. If no intent matches, respond with 'unknown'.",
        intent_names.join(", "),
        message
    )
}

/// Prompt for the last-resort generative answer, scoped to HR topics.
pub fn assistant_answer_prompt(display_name: &str, message: &str) -> String {
    format!(
        "You are an HR assistant chatbot. A user named {} has asked: \"{}\"\n\n\
         Provide helpful, professional HR-related information. If the question is not \
         HR-related, politely redirect to HR topics.\n\n\
         Available HR topics include: leave management, employee information, payroll, \
         attendance and working hours, performance reviews, company policies, training \
         programs, and recruitment.\n\n\
         Provide a concise response (max 200 words).",
        display_name, message
    )
}
