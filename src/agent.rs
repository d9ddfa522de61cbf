//! LLM agent module for summarization.
//!
//! The pipeline only sees the [`Summarizer`] trait; [`LlmSummarizer`] is the
//! production implementation backed by rstructor.

use crate::config::Config;
use async_trait::async_trait;
use rstructor::{GeminiClient, GeminiModel, LLMClient};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum AgentError {
    #[error("LLM request failed: {0}")]
    RequestFailed(String),
    #[error("failed to parse response: {0}")]
    ParseError(String),
    #[error("unsupported provider: {0}")]
    UnsupportedProvider(String),
    #[error("configuration error: {0}")]
    ConfigError(#[from] crate::config::ConfigError),
}

/// Generation settings handed to the summariser on every call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationParams {
    /// Upper bound on summary length, in words
    pub max_length: u32,
    /// Lower bound on summary length, in words
    pub min_length: u32,
    /// Disable sampling so the same input yields the same summary
    pub deterministic: bool,
}

/// A black-box text summarisation capability
#[async_trait]
pub trait Summarizer: Send + Sync {
    async fn summarize(&self, text: &str, params: &GenerationParams) -> Result<String, AgentError>;
}

/// Shape the model is asked to answer with
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SummaryResponse {
    /// The summary as plain prose, sentences separated by ". "
    pub summary_text: String,
}

/// Summariser that prompts a Gemini model for a JSON summary
pub struct LlmSummarizer {
    api_key: String,
    model: String,
    persona: String,
    sampling_temperature: f32,
}

impl LlmSummarizer {
    pub fn from_config(config: &Config) -> Result<Self, AgentError> {
        if config.agent.provider != "gemini" {
            return Err(AgentError::UnsupportedProvider(config.agent.provider.clone()));
        }
        let api_key = config.api_key()?.to_string();

        Ok(Self {
            api_key,
            model: config.agent.model.clone(),
            persona: config.agent.persona.clone(),
            sampling_temperature: config.agent.sampling_temperature,
        })
    }
}

#[async_trait]
impl Summarizer for LlmSummarizer {
    async fn summarize(&self, text: &str, params: &GenerationParams) -> Result<String, AgentError> {
        let client = GeminiClient::new(self.api_key.as_str())
            .map_err(|e| AgentError::RequestFailed(e.to_string()))?
            .model(parse_gemini_model(&self.model))
            .temperature(temperature_for(params, self.sampling_temperature));

        let prompt = build_prompt(&self.persona, text, params);
        let result = client
            .generate_with_metadata(&prompt)
            .await
            .map_err(|e| AgentError::RequestFailed(e.to_string()))?;

        let cleaned = strip_markdown_json(&result.text);
        let response: SummaryResponse = serde_json::from_str(&cleaned)
            .map_err(|e| AgentError::ParseError(format!("{}: {}", e, cleaned)))?;

        debug!(chars = response.summary_text.len(), "summary received");
        Ok(response.summary_text)
    }
}

/// Greedy decoding when deterministic, the configured temperature otherwise
fn temperature_for(params: &GenerationParams, sampling_temperature: f32) -> f32 {
    if params.deterministic {
        0.0
    } else {
        sampling_temperature
    }
}

fn build_prompt(persona: &str, text: &str, params: &GenerationParams) -> String {
    let schema = serde_json::to_string_pretty(&schemars::schema_for!(SummaryResponse))
        .unwrap_or_default();

    format!(
        r#"{persona}

Summarise the text below in plain prose of at least {min} and at most {max} words.
Write complete sentences and do not use lists, headings or markdown.

You MUST respond with a single JSON object matching this schema:
{schema}

Do not include any code blocks or explanations. Only output the raw JSON object.

---

{text}"#,
        min = params.min_length,
        max = params.max_length,
    )
}

/// Strip markdown code block wrappers from JSON response
fn strip_markdown_json(text: &str) -> String {
    let trimmed = text.trim();

    if let Some(rest) = trimmed.strip_prefix("```") {
        let without_prefix = rest.strip_prefix("json").unwrap_or(rest);
        if let Some(end_idx) = without_prefix.rfind("```") {
            return without_prefix[..end_idx].trim().to_string();
        }
    }

    trimmed.to_string()
}

/// Parse a model string into a GeminiModel
fn parse_gemini_model(model: &str) -> GeminiModel {
    match model {
        "gemini-2.0-flash" => GeminiModel::Gemini20Flash,
        "gemini-2.5-flash" => GeminiModel::Gemini25Flash,
        "gemini-2.5-pro" => GeminiModel::Gemini25Pro,
        _ => GeminiModel::Gemini20Flash, // Default
    }
}
