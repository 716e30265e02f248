//! Client side of the ARK verification backend.
//!
//! The orchestrator only ever talks to the backend through the
//! [`VerificationBackend`] trait. [`VerifyClient`] is the real HTTP
//! implementation; test doubles live in `ark-nullables`.

pub mod backend;
pub mod error;
pub mod http;

pub use backend::VerificationBackend;
pub use error::ClientError;
pub use http::{VerifyClient, DEFAULT_CONNECT_TIMEOUT, DEFAULT_REQUEST_TIMEOUT};
