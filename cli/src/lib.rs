//! Terminal front end for ARK wallet verification.
//!
//! The binary in `main.rs` parses flags and wires the pieces together; the
//! config layering and rendering live here so they can be tested.

pub mod config;
pub mod render;
pub mod session;

pub use config::CliConfig;
pub use render::{render_error, render_result, ProgressRenderer};
pub use session::run_session;
