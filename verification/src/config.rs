//! Orchestrator timing configuration with TOML support.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Timing knobs for a verification run.
///
/// All values are milliseconds so the TOML stays flat:
///
/// ```toml
/// request_timeout_ms = 60000
/// min_step_delay_ms = 600
/// max_step_delay_ms = 1000
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrchestratorConfig {
    /// Ceiling for the backend call.
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,

    /// Lower bound (inclusive) of the per-step cosmetic delay.
    #[serde(default = "default_min_step_delay_ms")]
    pub min_step_delay_ms: u64,

    /// Upper bound (exclusive) of the per-step cosmetic delay.
    #[serde(default = "default_max_step_delay_ms")]
    pub max_step_delay_ms: u64,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_request_timeout_ms() -> u64 {
    60_000
}

fn default_min_step_delay_ms() -> u64 {
    600
}

fn default_max_step_delay_ms() -> u64 {
    1_000
}

// ── Impl ───────────────────────────────────────────────────────────────

impl OrchestratorConfig {
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> String {
        toml::to_string_pretty(self).expect("OrchestratorConfig is always serializable to TOML")
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.request_timeout_ms == 0 {
            return Err(ConfigError::ZeroTimeout);
        }
        if self.min_step_delay_ms > self.max_step_delay_ms {
            return Err(ConfigError::DelayRange {
                min: self.min_step_delay_ms,
                max: self.max_step_delay_ms,
            });
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    pub fn min_step_delay(&self) -> Duration {
        Duration::from_millis(self.min_step_delay_ms)
    }

    pub fn max_step_delay(&self) -> Duration {
        Duration::from_millis(self.max_step_delay_ms)
    }
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            request_timeout_ms: default_request_timeout_ms(),
            min_step_delay_ms: default_min_step_delay_ms(),
            max_step_delay_ms: default_max_step_delay_ms(),
        }
    }
}
