//! reqwest-backed verification client.

use std::time::Duration;

use ark_types::{ErrorBody, HealthResponse, VerifyRequest, VerifyResponse};
use tracing::{debug, warn};

use crate::backend::VerificationBackend;
use crate::error::ClientError;

/// Ceiling for a single verification request. Slow RPC nodes behind the
/// backend routinely take tens of seconds.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(60);
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP client for the verification backend.
///
/// Wraps `reqwest::Client` with the backend's base URL (e.g.
/// `http://127.0.0.1:8001`). The verify endpoint lives under `/api`.
#[derive(Clone)]
pub struct VerifyClient {
    http: reqwest::Client,
    base_url: String,
}

impl VerifyClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        Self::with_timeout(base_url, DEFAULT_REQUEST_TIMEOUT)
    }

    pub fn with_timeout(
        base_url: impl Into<String>,
        request_timeout: Duration,
    ) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(request_timeout)
            .connect_timeout(DEFAULT_CONNECT_TIMEOUT.min(request_timeout))
            .build()
            .map_err(|e| ClientError::Build(e.to_string()))?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn verify_url(&self) -> String {
        format!("{}/api/verify", self.base_url)
    }

    fn health_url(&self) -> String {
        format!("{}/health", self.base_url)
    }

    /// POST the address and decode the verification result.
    pub async fn verify_address(&self, address: &str) -> Result<VerifyResponse, ClientError> {
        let url = self.verify_url();
        debug!(%url, address, "sending verification request");

        let response = self
            .http
            .post(&url)
            .json(&VerifyRequest {
                address: address.to_string(),
            })
            .send()
            .await
            .map_err(classify)?;

        let status = response.status();
        if !status.is_success() {
            let detail = read_detail(response).await;
            warn!(status = status.as_u16(), ?detail, "verification request rejected");
            return Err(ClientError::Status {
                status: status.as_u16(),
                detail,
            });
        }

        let body: VerifyResponse = response.json().await.map_err(|e| {
            if e.is_timeout() {
                ClientError::Timeout
            } else {
                ClientError::Decode(e.to_string())
            }
        })?;
        debug!(risk = %body.risk_level, steps = body.steps.len(), "verification response received");
        Ok(body)
    }

    /// Backend liveness probe.
    pub async fn health(&self) -> Result<HealthResponse, ClientError> {
        let response = self
            .http
            .get(self.health_url())
            .send()
            .await
            .map_err(classify)?;

        let status = response.status();
        if !status.is_success() {
            let detail = read_detail(response).await;
            return Err(ClientError::Status {
                status: status.as_u16(),
                detail,
            });
        }

        response
            .json()
            .await
            .map_err(|e| ClientError::Decode(e.to_string()))
    }
}

impl VerificationBackend for VerifyClient {
    async fn verify(&self, address: &str) -> Result<VerifyResponse, ClientError> {
        self.verify_address(address).await
    }
}

fn classify(e: reqwest::Error) -> ClientError {
    if e.is_timeout() {
        ClientError::Timeout
    } else {
        ClientError::Transport(e.to_string())
    }
}

/// Pull `detail` out of an error body, if the body is JSON and carries one.
async fn read_detail(response: reqwest::Response) -> Option<String> {
    let text = response.text().await.ok()?;
    serde_json::from_str::<ErrorBody>(&text)
        .ok()
        .and_then(|body| body.detail)
        .filter(|d| !d.is_empty())
}
