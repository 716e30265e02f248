//! Cosmetic per-step delays.
//!
//! Pacing carries no retry or backoff meaning; it only spaces out the
//! progress updates so the interface can animate them.

use std::time::Duration;

use ark_types::VerificationStep;
use rand::Rng;

use crate::config::OrchestratorConfig;

pub trait StepPacer: Send + Sync {
    /// How long `step` stays in the processing state before it advances.
    fn step_delay(&self, step: &VerificationStep) -> Duration;
}

impl<T: StepPacer + ?Sized> StepPacer for Box<T> {
    fn step_delay(&self, step: &VerificationStep) -> Duration {
        (**self).step_delay(step)
    }
}

/// Uniform random delay in `[min, max)`.
#[derive(Clone, Debug)]
pub struct RandomPacer {
    min_ms: u64,
    max_ms: u64,
}

impl RandomPacer {
    pub fn new(min: Duration, max: Duration) -> Self {
        Self {
            min_ms: u64::try_from(min.as_millis()).unwrap_or(u64::MAX),
            max_ms: u64::try_from(max.as_millis()).unwrap_or(u64::MAX),
        }
    }

    pub fn from_config(config: &OrchestratorConfig) -> Self {
        Self::new(config.min_step_delay(), config.max_step_delay())
    }
}

impl Default for RandomPacer {
    fn default() -> Self {
        Self::from_config(&OrchestratorConfig::default())
    }
}

impl StepPacer for RandomPacer {
    fn step_delay(&self, _step: &VerificationStep) -> Duration {
        if self.min_ms >= self.max_ms {
            return Duration::from_millis(self.min_ms);
        }
        let ms = rand::thread_rng().gen_range(self.min_ms..self.max_ms);
        Duration::from_millis(ms)
    }
}

/// The same delay for every step. Zero disables the animation entirely.
#[derive(Clone, Copy, Debug, Default)]
pub struct FixedPacer(pub Duration);

impl FixedPacer {
    pub fn instant() -> Self {
        Self(Duration::ZERO)
    }
}

impl StepPacer for FixedPacer {
    fn step_delay(&self, _step: &VerificationStep) -> Duration {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ark_types::VERIFICATION_STEPS;

    #[test]
    fn random_delay_stays_in_half_open_range() {
        let pacer = RandomPacer::default();
        for _ in 0..500 {
            for step in &VERIFICATION_STEPS {
                let d = pacer.step_delay(step);
                assert!(d >= Duration::from_millis(600), "{d:?} below range");
                assert!(d < Duration::from_millis(1000), "{d:?} above range");
            }
        }
    }

    #[test]
    fn degenerate_range_returns_min() {
        let pacer = RandomPacer::new(Duration::from_millis(250), Duration::from_millis(250));
        assert_eq!(
            pacer.step_delay(&VERIFICATION_STEPS[0]),
            Duration::from_millis(250)
        );
    }

    #[test]
    fn oversized_bounds_saturate() {
        let pacer = RandomPacer::new(Duration::MAX, Duration::MAX);
        assert_eq!(
            pacer.step_delay(&VERIFICATION_STEPS[0]),
            Duration::from_millis(u64::MAX)
        );
    }

    #[test]
    fn fixed_pacer_is_constant() {
        let pacer = FixedPacer(Duration::from_millis(5));
        assert!(VERIFICATION_STEPS
            .iter()
            .all(|s| pacer.step_delay(s) == Duration::from_millis(5)));
        assert_eq!(FixedPacer::instant().step_delay(&VERIFICATION_STEPS[3]), Duration::ZERO);
    }
}
