//! Reconciling backend step results with the static catalogue.

use ark_client::ClientError;
use ark_types::{BackendStep, StepState, StepStatus, VERIFICATION_STEPS};

/// Turn the backend's step list into the run's final step statuses.
///
/// The list must line up one-to-one with the catalogue: same length, step
/// numbers `1..=N` in order. Anything else is a contract violation and is
/// reported rather than truncated or padded. Every accepted entry is marked
/// completed regardless of the status string the backend sent.
pub fn merge_backend_steps(reported: &[BackendStep]) -> Result<Vec<StepStatus>, ClientError> {
    if reported.len() != VERIFICATION_STEPS.len() {
        return Err(ClientError::Contract(format!(
            "verification service returned {} steps, expected {}",
            reported.len(),
            VERIFICATION_STEPS.len()
        )));
    }

    reported
        .iter()
        .zip(VERIFICATION_STEPS.iter())
        .map(|(got, expected)| {
            if got.step != u32::from(expected.index) {
                return Err(ClientError::Contract(format!(
                    "verification service reported step {} where step {} was expected",
                    got.step, expected.index
                )));
            }
            Ok(StepStatus {
                index: expected.index,
                name: got.name.clone(),
                state: StepState::Completed,
                result_note: got.result.clone(),
            })
        })
        .collect()
}
