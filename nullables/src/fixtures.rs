//! Canned backend responses.

use ark_types::{BackendStep, RiskLevel, VerifyResponse, VERIFICATION_STEPS};

/// A well-formed four-step response for `address` at the given risk level.
pub fn sample_response(address: &str, risk: RiskLevel) -> VerifyResponse {
    let notes = match risk {
        RiskLevel::Safe => [
            "Valid Solana public key format (Base58)",
            "Balance: 0.0057 SOL, 1000 transactions",
            "No suspicious patterns detected",
            "Solana address verified on mainnet-beta",
        ],
        RiskLevel::Risky => [
            "Valid Solana public key format (Base58)",
            "Balance: 0 SOL, 2 transactions",
            "Warning: Low activity or suspicious patterns detected",
            "Solana address verified on mainnet-beta",
        ],
        RiskLevel::Invalid => [
            "Invalid address format - not a valid Solana public key",
            "Skipped - invalid address format",
            "Cannot analyze invalid address",
            "solana: invalid address",
        ],
    };

    let steps = VERIFICATION_STEPS
        .iter()
        .zip(notes)
        .map(|(step, note)| BackendStep {
            step: u32::from(step.index),
            name: step.name.to_string(),
            status: "completed".to_string(),
            result: Some(note.to_string()),
        })
        .collect();

    let (is_valid, balance, transaction_count, summary) = match risk {
        RiskLevel::Safe => (
            true,
            Some(0.0057),
            Some(1000),
            "This wallet address is verified and appears safe.",
        ),
        RiskLevel::Risky => (
            true,
            Some(0.0),
            Some(2),
            "Warning: This address has very low activity (2 transactions).",
        ),
        RiskLevel::Invalid => (
            false,
            None,
            Some(0),
            "Invalid Solana address format. Please check and try again.",
        ),
    };

    VerifyResponse {
        address: address.to_string(),
        is_valid,
        risk_level: risk,
        balance,
        transaction_count,
        steps,
        summary: summary.to_string(),
    }
}
