//! Request/response bodies exchanged with the verification backend.

use serde::{Deserialize, Serialize};

use crate::risk::RiskLevel;

/// Body of `POST /api/verify`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifyRequest {
    pub address: String,
}

/// Successful verification result, stored verbatim as the run's `result`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VerifyResponse {
    pub address: String,
    pub is_valid: bool,
    pub risk_level: RiskLevel,
    #[serde(default)]
    pub balance: Option<f64>,
    #[serde(default)]
    pub transaction_count: Option<u64>,
    pub steps: Vec<BackendStep>,
    pub summary: String,
}

impl VerifyResponse {
    /// Block explorer page for the verified address.
    pub fn explorer_url(&self) -> String {
        format!("https://solscan.io/account/{}", self.address)
    }
}

/// One step as reported by the backend.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendStep {
    pub step: u32,
    pub name: String,
    pub status: String,
    #[serde(default)]
    pub result: Option<String>,
}

/// Error body returned with non-2xx statuses.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub detail: Option<String>,
}

/// Body of `GET /health`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    #[serde(default)]
    pub timestamp: Option<String>,
}
