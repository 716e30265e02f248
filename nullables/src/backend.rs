//! Nullable backend: scripted verification replies.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use ark_client::{ClientError, VerificationBackend};
use ark_types::{RiskLevel, VerifyResponse};

use crate::fixtures::sample_response;

/// One scripted reply.
#[derive(Clone, Debug)]
pub enum Scripted {
    /// Reply immediately.
    Respond(Result<VerifyResponse, ClientError>),
    /// Reply after a delay.
    Delayed(Duration, Result<VerifyResponse, ClientError>),
    /// Never reply.
    Hang,
}

/// A test backend that replays scripted replies instead of calling out.
///
/// When the script runs dry every call answers with a "safe" sample
/// response for the requested address.
pub struct NullBackend {
    script: Mutex<VecDeque<Scripted>>,
    requests: Mutex<Vec<String>>,
}

impl NullBackend {
    pub fn new() -> Self {
        Self {
            script: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Queue a reply for the next unscripted call.
    pub fn push(&self, reply: Scripted) {
        self.script.lock().unwrap().push_back(reply);
    }

    pub fn push_ok(&self, response: VerifyResponse) {
        self.push(Scripted::Respond(Ok(response)));
    }

    pub fn push_err(&self, error: ClientError) {
        self.push(Scripted::Respond(Err(error)));
    }

    pub fn push_delayed(&self, delay: Duration, reply: Result<VerifyResponse, ClientError>) {
        self.push(Scripted::Delayed(delay, reply));
    }

    pub fn push_hang(&self) {
        self.push(Scripted::Hang);
    }

    /// Every address requested so far, in call order (for assertions).
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    /// Clear the script and the request log.
    pub fn reset(&self) {
        self.script.lock().unwrap().clear();
        self.requests.lock().unwrap().clear();
    }
}

impl Default for NullBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl VerificationBackend for NullBackend {
    async fn verify(&self, address: &str) -> Result<VerifyResponse, ClientError> {
        self.requests.lock().unwrap().push(address.to_string());
        let next = self.script.lock().unwrap().pop_front();

        match next {
            None => Ok(sample_response(address, RiskLevel::Safe)),
            Some(Scripted::Respond(reply)) => reply,
            Some(Scripted::Delayed(delay, reply)) => {
                tokio::time::sleep(delay).await;
                reply
            }
            Some(Scripted::Hang) => std::future::pending().await,
        }
    }
}
