use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("min_step_delay_ms ({min}) must not exceed max_step_delay_ms ({max})")]
    DelayRange { min: u64, max: u64 },

    #[error("request_timeout_ms must be greater than zero")]
    ZeroTimeout,
}
