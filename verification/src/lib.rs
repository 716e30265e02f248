//! Wallet verification workflow.
//!
//! A run walks the four-step catalogue in order. Every step is shown as
//! processing for a short cosmetic delay; only the final step does real work,
//! a single call to the verification backend. The backend's step-level results
//! then replace the simulated ones.
//!
//! The orchestrator publishes a [`VerificationSnapshot`] after every
//! transition. Each `verify` or `reset` starts a new generation; tasks from
//! an older generation stop writing as soon as they resume.

pub mod config;
pub mod error;
pub mod merge;
pub mod orchestrator;
pub mod pacing;
pub mod state;

pub use config::OrchestratorConfig;
pub use error::ConfigError;
pub use orchestrator::{VerificationOrchestrator, VerificationOutcome};
pub use pacing::{FixedPacer, RandomPacer, StepPacer};
pub use state::VerificationSnapshot;
