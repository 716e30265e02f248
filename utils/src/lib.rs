//! Shared utilities for ARK wallet verification.

pub mod display;
pub mod logging;

pub use display::{format_duration_ms, shorten_address};
pub use logging::{init_logging, LogFormat};
