//! Configuration loading and management for sitebrief.
//!
//! Loads settings from `sitebrief.toml` with environment variable overrides for sensitive data.
//! Every section has defaults, so a missing file still yields a working pipeline.

use crate::agent::GenerationParams;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

const CONFIG_FILE_NAME: &str = "sitebrief.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("missing required API key for provider: {0}")]
    MissingApiKey(String),
    #[error("invalid config value: {0}")]
    Invalid(String),
}

/// Parameters of the fetch -> extract -> summarise pipeline
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PipelineConfig {
    /// Extracted text shorter than this many characters is shown as-is
    pub short_content_threshold: usize,
    /// Timeout for the page fetch, in seconds
    pub fetch_timeout_secs: u64,
    /// User-Agent header sent with the page fetch
    pub user_agent: String,
    /// Upper bound on summary length, in words
    pub max_length: u32,
    /// Lower bound on summary length, in words
    pub min_length: u32,
    /// Ask the summariser for deterministic (non-sampling) output
    pub deterministic: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            short_content_threshold: 100,
            fetch_timeout_secs: 12,
            user_agent: "Mozilla/5.0".to_string(),
            max_length: 250,
            min_length: 25,
            deterministic: true,
        }
    }
}

impl PipelineConfig {
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }

    pub fn generation_params(&self) -> GenerationParams {
        GenerationParams {
            max_length: self.max_length,
            min_length: self.min_length,
            deterministic: self.deterministic,
        }
    }

    /// Reject combinations the pipeline cannot honour
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.fetch_timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "pipeline.fetch_timeout_secs must be greater than zero".to_string(),
            ));
        }
        if self.max_length == 0 {
            return Err(ConfigError::Invalid(
                "pipeline.max_length must be greater than zero".to_string(),
            ));
        }
        if self.min_length > self.max_length {
            return Err(ConfigError::Invalid(format!(
                "pipeline.min_length ({}) exceeds pipeline.max_length ({})",
                self.min_length, self.max_length
            )));
        }
        Ok(())
    }
}

/// LLM provider configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AgentConfig {
    /// LLM provider; only "gemini" is supported
    pub provider: String,
    /// Model identifier (e.g., "gemini-2.0-flash")
    pub model: String,
    /// System persona for the agent
    pub persona: String,
    /// Temperature used when `pipeline.deterministic` is off
    pub sampling_temperature: f32,
}

impl AgentConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=2.0).contains(&self.sampling_temperature) {
            return Err(ConfigError::Invalid(format!(
                "agent.sampling_temperature ({}) must be between 0 and 2",
                self.sampling_temperature
            )));
        }
        Ok(())
    }
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            provider: "gemini".to_string(),
            model: "gemini-2.0-flash".to_string(),
            persona: "You condense web articles into short, factual summaries.".to_string(),
            sampling_temperature: 0.7,
        }
    }
}

/// API keys configuration (loaded from environment)
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ApiConfig {
    #[serde(default)]
    pub gemini_key: Option<String>,
}

/// Log sink configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    /// Directory for the rolling log file; defaults to the platform data dir
    pub dir: Option<PathBuf>,
    /// Default filter used when `RUST_LOG` is unset
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            dir: None,
            filter: "info".to_string(),
        }
    }
}

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub pipeline: PipelineConfig,
    #[serde(default)]
    pub agent: AgentConfig,
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from the default location (sitebrief.toml in cwd or home).
    ///
    /// Falls back to defaults when no config file exists.
    pub fn load() -> Result<Self, ConfigError> {
        match Self::find_config_file() {
            Some(path) => Self::load_from(&path),
            None => {
                let mut config = Config::default();
                config.apply_env_overrides();
                Ok(config)
            }
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config = Self::parse(&content)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Parse and validate a TOML document without touching the environment
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content)?;
        config.pipeline.validate()?;
        config.agent.validate()?;
        Ok(config)
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(key) = std::env::var("GEMINI_API_KEY") {
            self.api.gemini_key = Some(key);
        }
    }

    /// Find the config file in standard locations
    fn find_config_file() -> Option<PathBuf> {
        let local_config = PathBuf::from(CONFIG_FILE_NAME);
        if local_config.exists() {
            return Some(local_config);
        }

        let home_config = dirs::home_dir()?
            .join(".config")
            .join("sitebrief")
            .join(CONFIG_FILE_NAME);
        home_config.exists().then_some(home_config)
    }

    /// Get the API key for the configured provider
    pub fn api_key(&self) -> Result<&str, ConfigError> {
        match self.agent.provider.as_str() {
            "gemini" => self
                .api
                .gemini_key
                .as_deref()
                .ok_or_else(|| ConfigError::MissingApiKey("gemini".to_string())),
            other => Err(ConfigError::MissingApiKey(other.to_string())),
        }
    }
}
