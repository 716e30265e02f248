//! CLI configuration with TOML file support.

use std::path::Path;

use ark_utils::LogFormat;
use ark_verification::{ConfigError, OrchestratorConfig};
use serde::{Deserialize, Serialize};

/// Configuration for `ark-verify`.
///
/// Loaded from a TOML file via [`CliConfig::from_toml_file`]; command-line
/// flags and environment variables override individual fields.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CliConfig {
    /// Base URL of the verification backend (the `/api` prefix is added).
    #[serde(default = "default_backend_url")]
    pub backend_url: String,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Log format: "human" or "json".
    #[serde(default)]
    pub log_format: LogFormat,

    #[serde(default)]
    pub orchestrator: OrchestratorConfig,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_backend_url() -> String {
    "http://127.0.0.1:8001".to_string()
}

fn default_log_level() -> String {
    "warn".to_string()
}

// ── Impl ───────────────────────────────────────────────────────────────

impl CliConfig {
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.orchestrator.validate()?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> String {
        toml::to_string_pretty(self).expect("CliConfig is always serializable to TOML")
    }

    /// Layer command-line overrides on top of file (or default) values.
    pub fn with_overrides(
        mut self,
        backend_url: Option<String>,
        log_level: Option<String>,
        log_format: Option<LogFormat>,
    ) -> Self {
        if let Some(url) = backend_url {
            self.backend_url = url;
        }
        if let Some(level) = log_level {
            self.log_level = level;
        }
        if let Some(format) = log_format {
            self.log_format = format;
        }
        self
    }
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            backend_url: default_backend_url(),
            log_level: default_log_level(),
            log_format: LogFormat::default(),
            orchestrator: OrchestratorConfig::default(),
        }
    }
}
