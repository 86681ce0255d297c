//! Dialog engine configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Dialog engine tunables
#[derive(Debug, Clone, Deserialize)]
pub struct DialogConfig {
    /// Idle days after which a conversation is swept
    #[serde(default = "default_retention_days")]
    pub retention_days: u32,

    /// Seconds between retention sweeps
    #[serde(default = "default_sweep_interval")]
    pub sweep_interval_secs: u64,

    /// Maximum listings returned by a chat search
    #[serde(default = "default_search_result_limit")]
    pub search_result_limit: u32,

    /// History turns sent to the model as context
    #[serde(default = "default_context_turns")]
    pub context_turns: usize,
}

impl DialogConfig {
    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_secs)
    }

    /// Validate dialog configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.retention_days == 0 {
            return Err(ValidationError::InvalidRetention);
        }
        if self.sweep_interval_secs < 60 {
            return Err(ValidationError::InvalidSweepInterval);
        }
        if self.search_result_limit == 0 || self.search_result_limit > 50 {
            return Err(ValidationError::InvalidResultLimit);
        }
        Ok(())
    }
}

impl Default for DialogConfig {
    fn default() -> Self {
        Self {
            retention_days: default_retention_days(),
            sweep_interval_secs: default_sweep_interval(),
            search_result_limit: default_search_result_limit(),
            context_turns: default_context_turns(),
        }
    }
}

fn default_retention_days() -> u32 {
    30
}

fn default_sweep_interval() -> u64 {
    3600
}

fn default_search_result_limit() -> u32 {
    5
}

fn default_context_turns() -> usize {
    6
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DialogConfig::default();
        assert_eq!(config.retention_days, 30);
        assert_eq!(config.search_result_limit, 5);
        assert_eq!(config.sweep_interval(), Duration::from_secs(3600));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_zero_retention() {
        let config = DialogConfig {
            retention_days: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidRetention));
    }

    #[test]
    fn test_validation_rejects_busy_sweeps() {
        let config = DialogConfig {
            sweep_interval_secs: 5,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidSweepInterval));
    }

    #[test]
    fn test_validation_result_limit_bounds() {
        let config = DialogConfig {
            search_result_limit: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidResultLimit));
    }
}
