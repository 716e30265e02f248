//! Nullable infrastructure for deterministic testing.
//!
//! The verification backend is abstracted behind a trait. This crate provides
//! a test-friendly implementation that:
//! - Returns scripted replies in order
//! - Records every address it was asked to verify
//! - Never touches the network
//!
//! Usage: swap `VerifyClient` for `NullBackend` in tests.

pub mod backend;
pub mod fixtures;

pub use backend::{NullBackend, Scripted};
pub use fixtures::sample_response;
