//! Fundamental types for ARK wallet verification.
//!
//! This crate defines the types shared across every other crate in the workspace:
//! the fixed step catalogue, per-run step status, the backend wire format,
//! and the presentation helpers built on top of them.

pub mod risk;
pub mod samples;
pub mod step;
pub mod wire;

pub use risk::RiskLevel;
pub use samples::{ExampleAddress, EXAMPLE_ADDRESSES};
pub use step::{StepState, StepStatus, VerificationStep, VERIFICATION_STEPS};
pub use wire::{BackendStep, ErrorBody, HealthResponse, VerifyRequest, VerifyResponse};

/// Shown when `verify` is called with an empty or whitespace-only address.
pub const EMPTY_ADDRESS_MESSAGE: &str = "Please enter a wallet address";

/// Shown when the backend call fails without a usable `detail` message.
pub const GENERIC_FAILURE_MESSAGE: &str = "Verification failed. Please try again.";
