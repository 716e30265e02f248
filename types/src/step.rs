//! The verification step catalogue and per-run step status.

use serde::{Deserialize, Serialize};

/// One stage of the verification sequence shown to the user.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VerificationStep {
    /// 1-based position in the sequence.
    pub index: u8,
    /// Human-readable label.
    pub name: &'static str,
    /// Text shown while the step is active. Never sent to the backend.
    pub display_message: &'static str,
}

/// The fixed, ordered step list. The last entry is the one that performs
/// the backend call.
pub static VERIFICATION_STEPS: [VerificationStep; 4] = [
    VerificationStep {
        index: 1,
        name: "AI Pattern Analysis",
        display_message: "Analyzing address pattern...",
    },
    VerificationStep {
        index: 2,
        name: "On-Chain Scan",
        display_message: "Scanning blockchain data...",
    },
    VerificationStep {
        index: 3,
        name: "AI Risk Detection",
        display_message: "Checking for suspicious patterns...",
    },
    VerificationStep {
        index: 4,
        name: "Terminal Verification",
        display_message: "Running CLI verification...",
    },
];

impl VerificationStep {
    /// Look up a step by its 1-based index.
    pub fn by_index(index: u8) -> Option<&'static VerificationStep> {
        VERIFICATION_STEPS.iter().find(|s| s.index == index)
    }

    /// Whether this is the final step of the catalogue.
    pub fn is_last(&self) -> bool {
        usize::from(self.index) == VERIFICATION_STEPS.len()
    }
}

/// Progress state of a single step within a run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepState {
    Pending,
    Processing,
    Completed,
    Failed,
}

impl StepState {
    /// Completed and failed steps never change again within a run.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Processing => "processing",
            Self::Completed => "completed",
            Self::Failed => "failed",
        }
    }
}

impl std::fmt::Display for StepState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Mutable per-run status of one step.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepStatus {
    pub index: u8,
    pub name: String,
    pub state: StepState,
    /// Outcome note, populated only from backend data on success.
    pub result_note: Option<String>,
}

impl StepStatus {
    pub fn from_step(step: &VerificationStep, state: StepState) -> Self {
        Self {
            index: step.index,
            name: step.name.to_string(),
            state,
            result_note: None,
        }
    }
}
