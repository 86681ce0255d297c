//! Model gateway configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use crate::adapters::ai::DEFAULT_BASE_URL;

/// Model gateway configuration
///
/// Without an API key the assistant runs template-only and AI search is
/// reported as unavailable.
#[derive(Debug, Clone, Deserialize)]
pub struct AiConfig {
    /// API key for the OpenAI-compatible endpoint
    pub api_key: Option<String>,

    /// Base URL of the `/chat/completions` endpoint
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Model identifiers in priority order (comma-separated)
    #[serde(default = "default_models")]
    pub models: String,

    /// Sampling temperature for every attempt
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Timeout for a single model attempt in seconds
    #[serde(default = "default_attempt_timeout")]
    pub attempt_timeout_secs: u64,

    /// Completion token cap
    pub max_tokens: Option<u32>,

    /// Application name sent as `X-Title`
    #[serde(default = "default_app_name")]
    pub app_name: String,
}

impl AiConfig {
    /// Check if a model endpoint is configured
    pub fn is_enabled(&self) -> bool {
        self.api_key.as_ref().is_some_and(|k| !k.trim().is_empty())
    }

    /// Model priority list
    pub fn model_list(&self) -> Vec<String> {
        self.models
            .split(',')
            .map(|m| m.trim().to_string())
            .filter(|m| !m.is_empty())
            .collect()
    }

    pub fn attempt_timeout(&self) -> Duration {
        Duration::from_secs(self.attempt_timeout_secs)
    }

    /// Validate AI configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(ValidationError::InvalidTemperature);
        }
        if self.attempt_timeout_secs == 0 || self.attempt_timeout_secs > 120 {
            return Err(ValidationError::InvalidAttemptTimeout);
        }
        if !self.is_enabled() {
            return Ok(());
        }
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ValidationError::InvalidAiBaseUrl);
        }
        if self.model_list().is_empty() {
            return Err(ValidationError::NoModelsConfigured);
        }
        Ok(())
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
            models: default_models(),
            temperature: default_temperature(),
            attempt_timeout_secs: default_attempt_timeout(),
            max_tokens: None,
            app_name: default_app_name(),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_models() -> String {
    "openai/gpt-4o-mini,google/gemini-flash-1.5,meta-llama/llama-3.1-8b-instruct".to_string()
}

fn default_temperature() -> f32 {
    0.7
}

fn default_attempt_timeout() -> u64 {
    30
}

fn default_app_name() -> String {
    "realty-concierge".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn enabled() -> AiConfig {
        AiConfig {
            api_key: Some("sk-or-xxx".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_defaults_are_disabled_but_valid() {
        let config = AiConfig::default();
        assert!(!config.is_enabled());
        assert!(config.validate().is_ok());
        assert_eq!(config.model_list().len(), 3);
    }

    #[test]
    fn test_model_list_trims_and_skips_blanks() {
        let config = AiConfig {
            models: " a/one , ,b/two ".to_string(),
            ..Default::default()
        };
        assert_eq!(config.model_list(), vec!["a/one", "b/two"]);
    }

    #[test]
    fn test_blank_key_is_disabled() {
        let config = AiConfig {
            api_key: Some("  ".to_string()),
            ..Default::default()
        };
        assert!(!config.is_enabled());
    }

    #[test]
    fn test_validation_temperature_range() {
        let config = AiConfig {
            temperature: 2.5,
            ..enabled()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidTemperature));
    }

    #[test]
    fn test_validation_enabled_needs_models() {
        let config = AiConfig {
            models: " , ".to_string(),
            ..enabled()
        };
        assert_eq!(config.validate(), Err(ValidationError::NoModelsConfigured));
    }

    #[test]
    fn test_validation_enabled_needs_http_url() {
        let config = AiConfig {
            base_url: "openrouter.ai".to_string(),
            ..enabled()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidAiBaseUrl));
    }

    #[test]
    fn test_attempt_timeout_duration() {
        assert_eq!(enabled().attempt_timeout(), Duration::from_secs(30));
    }
}
