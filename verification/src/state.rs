//! Verification run state as seen by the presentation layer.

use ark_types::{StepState, StepStatus, VerifyResponse, VERIFICATION_STEPS};
use serde::Serialize;

/// Read model published after every transition.
///
/// `steps` is either empty (no run) or has exactly one entry per catalogue
/// step, in catalogue order. `result` and `error_message` are never both set.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct VerificationSnapshot {
    /// True from `verify` until the run reaches a terminal state.
    pub is_active: bool,
    /// 1-based index of the step the run last entered.
    pub current_step: Option<u8>,
    pub steps: Vec<StepStatus>,
    pub result: Option<VerifyResponse>,
    pub error_message: Option<String>,
}

impl VerificationSnapshot {
    /// A fresh active run: first step processing, the rest pending.
    pub fn started() -> Self {
        let steps = VERIFICATION_STEPS
            .iter()
            .map(|step| {
                let state = if step.index == 1 {
                    StepState::Processing
                } else {
                    StepState::Pending
                };
                StepStatus::from_step(step, state)
            })
            .collect();
        Self {
            is_active: true,
            current_step: Some(1),
            steps,
            result: None,
            error_message: None,
        }
    }

    /// State left behind by an empty address: nothing but the message.
    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            error_message: Some(message.into()),
            ..Self::default()
        }
    }

    /// Earlier steps completed, `index` processing, later steps pending.
    pub fn mark_processing(&mut self, index: u8) {
        self.current_step = Some(index);
        for step in &mut self.steps {
            step.state = match step.index {
                i if i < index => StepState::Completed,
                i if i == index => StepState::Processing,
                _ => StepState::Pending,
            };
        }
    }

    pub fn mark_completed(&mut self, index: u8) {
        self.set_state(index, StepState::Completed);
    }

    /// Terminal success: the backend's steps replace the simulated ones.
    pub fn succeed(&mut self, steps: Vec<StepStatus>, result: VerifyResponse) {
        self.steps = steps;
        self.result = Some(result);
        self.error_message = None;
        self.is_active = false;
    }

    /// Terminal failure on step `index`; earlier steps keep their state.
    pub fn fail(&mut self, index: u8, message: impl Into<String>) {
        self.set_state(index, StepState::Failed);
        self.result = None;
        self.error_message = Some(message.into());
        self.is_active = false;
    }

    /// Whether the run has reached success or failure.
    pub fn is_terminal(&self) -> bool {
        !self.is_active && (self.result.is_some() || self.error_message.is_some())
    }

    pub fn is_idle(&self) -> bool {
        *self == Self::default()
    }

    pub fn step(&self, index: u8) -> Option<&StepStatus> {
        self.steps.iter().find(|s| s.index == index)
    }

    fn set_state(&mut self, index: u8, state: StepState) {
        if let Some(step) = self.steps.iter_mut().find(|s| s.index == index) {
            step.state = state;
        }
    }
}
