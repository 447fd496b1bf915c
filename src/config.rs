use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{AutomationError, Result};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub llm: LlmConfig,
    #[serde(default)]
    pub retry: RetryConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// API key for the LLM backend; the OPENAI_API_KEY environment
    /// variable takes precedence over this field
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(default = "default_classification_model")]
    pub classification_model: String,
    #[serde(default = "default_response_model")]
    pub response_model: String,
    #[serde(default = "default_classification_temperature")]
    pub classification_temperature: f32,
    #[serde(default = "default_response_temperature")]
    pub response_temperature: f32,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            classification_model: default_classification_model(),
            response_model: default_response_model(),
            classification_temperature: default_classification_temperature(),
            response_temperature: default_response_temperature(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    #[serde(default = "default_initial_backoff_secs")]
    pub initial_backoff_secs: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            initial_backoff_secs: default_initial_backoff_secs(),
        }
    }
}

fn default_classification_model() -> String {
    "gpt-3.5-turbo".to_string()
}

fn default_response_model() -> String {
    "gpt-3.5-turbo".to_string()
}

fn default_classification_temperature() -> f32 {
    0.0
}

fn default_response_temperature() -> f32 {
    0.7
}

fn default_max_attempts() -> u32 {
    3
}

fn default_initial_backoff_secs() -> f64 {
    1.5
}

impl Config {
    pub async fn load(path: &Path) -> Result<Self> {
        // If file doesn't exist, return default config with warning
        if !path.exists() {
            tracing::warn!("Config file not found at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            AutomationError::Config(format!("Failed to read config file: {}", e))
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| {
            AutomationError::Config(format!("Failed to parse config file: {}", e))
        })?;

        config.validate()?;

        tracing::info!("Loaded configuration from {:?}", path);
        Ok(config)
    }

    pub async fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                AutomationError::Config(format!("Failed to create config directory: {}", e))
            })?;
        }

        let content = toml::to_string_pretty(self).map_err(|e| {
            AutomationError::Config(format!("Failed to serialize config: {}", e))
        })?;

        tokio::fs::write(path, content).await.map_err(|e| {
            AutomationError::Config(format!("Failed to write config file: {}", e))
        })?;

        tracing::info!("Saved configuration to {:?}", path);
        Ok(())
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.llm.classification_model.is_empty() {
            return Err(AutomationError::Config(
                "llm.classification_model cannot be empty".to_string(),
            ));
        }
        if self.llm.response_model.is_empty() {
            return Err(AutomationError::Config(
                "llm.response_model cannot be empty".to_string(),
            ));
        }

        // Temperatures must stay within the backend's accepted range
        for (name, value) in [
            (
                "llm.classification_temperature",
                self.llm.classification_temperature,
            ),
            ("llm.response_temperature", self.llm.response_temperature),
        ] {
            if !(0.0..=2.0).contains(&value) {
                return Err(AutomationError::Config(format!(
                    "{} must be between 0.0 and 2.0, got {}",
                    name, value
                )));
            }
        }

        if self.retry.max_attempts == 0 {
            return Err(AutomationError::Config(
                "retry.max_attempts must be at least 1".to_string(),
            ));
        }
        if self.retry.initial_backoff_secs <= 0.0 {
            return Err(AutomationError::Config(
                "retry.initial_backoff_secs must be greater than 0".to_string(),
            ));
        }

        tracing::debug!("Configuration validation passed");
        Ok(())
    }

    /// Resolve the backend API key: environment variable wins over the config file
    pub fn resolve_api_key(&self) -> Result<String> {
        if let Ok(key) = std::env::var("OPENAI_API_KEY") {
            if !key.is_empty() {
                return Ok(key);
            }
        }
        self.llm
            .api_key
            .clone()
            .filter(|k| !k.is_empty())
            .ok_or_else(|| {
                AutomationError::Config(
                    "Missing API key: set OPENAI_API_KEY or llm.api_key in the config file"
                        .to_string(),
                )
            })
    }

    /// Create an example configuration file
    pub async fn create_example(path: &Path) -> Result<()> {
        let config = Self::default();
        config.save(path).await
    }
}
