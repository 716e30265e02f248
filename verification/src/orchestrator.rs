//! Verification orchestrator: drives the step sequence, performs the one
//! backend call, and reconciles its result into the published state.

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};

use ark_client::{ClientError, VerificationBackend};
use ark_types::{StepStatus, VerifyResponse, EMPTY_ADDRESS_MESSAGE, VERIFICATION_STEPS};
use tokio::sync::watch;
use tracing::{debug, info, info_span, warn, Instrument};

use crate::config::OrchestratorConfig;
use crate::merge::merge_backend_steps;
use crate::pacing::{RandomPacer, StepPacer};
use crate::state::VerificationSnapshot;

/// How a single `verify` invocation ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VerificationOutcome {
    /// Backend result stored; every step completed.
    Completed,
    /// Final step failed; an error message is stored.
    Failed,
    /// Empty address. No run was started.
    Rejected,
    /// A later `verify` or `reset` took over; this run stopped writing.
    Superseded,
}

/// Owns the run state and the only writer to it.
///
/// Every `verify`, `reset`, and rejected input bumps the generation counter
/// under the state lock. A run writes only while the counter still holds the
/// value it started with, so a superseded run can never leak a step update
/// into a newer one.
pub struct VerificationOrchestrator<B, P = RandomPacer> {
    backend: B,
    pacer: P,
    config: OrchestratorConfig,
    state: watch::Sender<VerificationSnapshot>,
    generation: AtomicU64,
}

impl<B: VerificationBackend> VerificationOrchestrator<B, RandomPacer> {
    /// Orchestrator with the default 600..1000 ms random pacing.
    pub fn new(backend: B) -> Self {
        let config = OrchestratorConfig::default();
        let pacer = RandomPacer::from_config(&config);
        Self::with_pacer(backend, pacer, config)
    }
}

impl<B, P> VerificationOrchestrator<B, P>
where
    B: VerificationBackend,
    P: StepPacer,
{
    pub fn with_pacer(backend: B, pacer: P, config: OrchestratorConfig) -> Self {
        let (state, _) = watch::channel(VerificationSnapshot::default());
        Self {
            backend,
            pacer,
            config,
            state,
            generation: AtomicU64::new(0),
        }
    }

    pub fn config(&self) -> &OrchestratorConfig {
        &self.config
    }

    /// Latest published state.
    pub fn snapshot(&self) -> VerificationSnapshot {
        self.state.borrow().clone()
    }

    /// Receiver notified after every published transition.
    pub fn subscribe(&self) -> watch::Receiver<VerificationSnapshot> {
        self.state.subscribe()
    }

    /// Return to the empty initial state and cancel any in-flight run.
    pub fn reset(&self) {
        self.state.send_modify(|snapshot| {
            self.generation.fetch_add(1, Ordering::AcqRel);
            *snapshot = VerificationSnapshot::default();
        });
        debug!("verification state reset");
    }

    /// Run the full workflow for `address`.
    ///
    /// Never returns an error: failures end up in the snapshot's
    /// `error_message`. The returned outcome only says how this invocation
    /// ended.
    pub async fn verify(&self, address: &str) -> VerificationOutcome {
        if address.trim().is_empty() {
            self.state.send_modify(|snapshot| {
                self.generation.fetch_add(1, Ordering::AcqRel);
                *snapshot = VerificationSnapshot::rejected(EMPTY_ADDRESS_MESSAGE);
            });
            debug!("rejected empty wallet address");
            return VerificationOutcome::Rejected;
        }

        let mut token = 0;
        self.state.send_modify(|snapshot| {
            token = self.generation.fetch_add(1, Ordering::AcqRel) + 1;
            *snapshot = VerificationSnapshot::started();
        });

        let span = info_span!("verification_run", run = token, address);
        self.drive(token, address).instrument(span).await
    }

    async fn drive(&self, token: u64, address: &str) -> VerificationOutcome {
        info!("verification started");

        for step in VERIFICATION_STEPS.iter() {
            if !self.publish(token, |s| s.mark_processing(step.index)) {
                return self.superseded();
            }
            debug!(step = step.index, message = step.display_message, "step processing");

            let delay = self.pacer.step_delay(step);
            if self.guarded(token, tokio::time::sleep(delay)).await.is_none() {
                return self.superseded();
            }

            if !step.is_last() {
                if !self.publish(token, |s| s.mark_completed(step.index)) {
                    return self.superseded();
                }
                continue;
            }

            let Some(reply) = self.guarded(token, self.call_backend(address)).await else {
                return self.superseded();
            };

            return match reply {
                Ok((steps, result)) => {
                    let risk = result.risk_level;
                    if !self.publish(token, |s| s.succeed(steps, result)) {
                        return self.superseded();
                    }
                    info!(%risk, "verification completed");
                    VerificationOutcome::Completed
                }
                Err(e) => {
                    let message = e.user_message();
                    if !self.publish(token, |s| s.fail(step.index, message)) {
                        return self.superseded();
                    }
                    warn!(error = %e, timed_out = e.is_timeout(), step = step.index, "verification failed");
                    VerificationOutcome::Failed
                }
            };
        }

        // The catalogue is never empty, so the loop always returns.
        VerificationOutcome::Superseded
    }

    /// The single outbound request, bounded by the configured timeout, with
    /// its step list checked against the catalogue.
    async fn call_backend(
        &self,
        address: &str,
    ) -> Result<(Vec<StepStatus>, VerifyResponse), ClientError> {
        let response =
            match tokio::time::timeout(self.config.request_timeout(), self.backend.verify(address))
                .await
            {
                Ok(reply) => reply?,
                Err(_) => return Err(ClientError::Timeout),
            };
        let steps = merge_backend_steps(&response.steps)?;
        Ok((steps, response))
    }

    fn is_current(&self, token: u64) -> bool {
        self.generation.load(Ordering::Acquire) == token
    }

    /// Apply `update` if `token` is still the live generation. The check and
    /// the write happen under the same lock.
    fn publish(&self, token: u64, update: impl FnOnce(&mut VerificationSnapshot)) -> bool {
        self.state.send_if_modified(|snapshot| {
            if !self.is_current(token) {
                return false;
            }
            update(snapshot);
            true
        })
    }

    /// Await `fut` unless the run is superseded first.
    async fn guarded<F: Future>(&self, token: u64, fut: F) -> Option<F::Output> {
        tokio::select! {
            out = fut => self.is_current(token).then_some(out),
            _ = self.superseded_signal(token) => None,
        }
    }

    /// Resolves once `token` is no longer the live generation.
    async fn superseded_signal(&self, token: u64) {
        let mut rx = self.state.subscribe();
        while self.is_current(token) {
            if rx.changed().await.is_err() {
                std::future::pending::<()>().await;
            }
        }
    }

    fn superseded(&self) -> VerificationOutcome {
        debug!("run superseded, abandoning");
        VerificationOutcome::Superseded
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pacing::FixedPacer;
    use ark_nullables::{sample_response, NullBackend};
    use ark_types::{RiskLevel, StepState, GENERIC_FAILURE_MESSAGE};
    use std::sync::Arc;
    use std::time::Duration;

    const WSOL: &str = "So11111111111111111111111111111111111111112";

    fn orchestrator(
        backend: Arc<NullBackend>,
    ) -> VerificationOrchestrator<Arc<NullBackend>, FixedPacer> {
        VerificationOrchestrator::with_pacer(
            backend,
            FixedPacer(Duration::from_millis(700)),
            OrchestratorConfig::default(),
        )
    }

    // ── Happy path ──────────────────────────────────────────────────────

    #[tokio::test(start_paused = true)]
    async fn successful_run_completes_every_step() {
        let backend = Arc::new(NullBackend::new());
        let orch = orchestrator(backend.clone());

        let outcome = orch.verify(WSOL).await;

        assert_eq!(outcome, VerificationOutcome::Completed);
        let snapshot = orch.snapshot();
        assert!(!snapshot.is_active);
        assert_eq!(snapshot.steps.len(), 4);
        assert!(snapshot.steps.iter().all(|s| s.state == StepState::Completed));
        assert_eq!(snapshot.result.as_ref().unwrap().risk_level, RiskLevel::Safe);
        assert!(snapshot.error_message.is_none());
        assert_eq!(backend.requests(), vec![WSOL.to_string()]);
    }

    #[tokio::test(start_paused = true)]
    async fn backend_notes_replace_simulated_steps() {
        let backend = Arc::new(NullBackend::new());
        let mut response = sample_response(WSOL, RiskLevel::Risky);
        response.steps[1].result = Some("Balance: 0 SOL, 2 transactions".into());
        backend.push_ok(response);
        let orch = orchestrator(backend);

        orch.verify(WSOL).await;

        let snapshot = orch.snapshot();
        assert_eq!(
            snapshot.step(2).unwrap().result_note.as_deref(),
            Some("Balance: 0 SOL, 2 transactions")
        );
        assert_eq!(snapshot.result.unwrap().risk_level, RiskLevel::Risky);
    }

    // ── Input errors ────────────────────────────────────────────────────

    #[tokio::test(start_paused = true)]
    async fn whitespace_address_is_rejected_without_request() {
        let backend = Arc::new(NullBackend::new());
        let orch = orchestrator(backend.clone());

        let outcome = orch.verify("  \t\n").await;

        assert_eq!(outcome, VerificationOutcome::Rejected);
        let snapshot = orch.snapshot();
        assert_eq!(snapshot.error_message.as_deref(), Some(EMPTY_ADDRESS_MESSAGE));
        assert!(snapshot.steps.is_empty());
        assert!(!snapshot.is_active);
        assert!(backend.requests().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn rejection_clears_previous_result() {
        let backend = Arc::new(NullBackend::new());
        let orch = orchestrator(backend);

        orch.verify(WSOL).await;
        assert!(orch.snapshot().result.is_some());

        orch.verify("").await;
        let snapshot = orch.snapshot();
        assert!(snapshot.result.is_none());
        assert_eq!(snapshot.error_message.as_deref(), Some(EMPTY_ADDRESS_MESSAGE));
    }

    // ── Failures ────────────────────────────────────────────────────────

    #[tokio::test(start_paused = true)]
    async fn server_detail_is_surfaced() {
        let backend = Arc::new(NullBackend::new());
        backend.push_err(ClientError::Status {
            status: 503,
            detail: Some("rpc unavailable".into()),
        });
        let orch = orchestrator(backend);

        let outcome = orch.verify(WSOL).await;

        assert_eq!(outcome, VerificationOutcome::Failed);
        let snapshot = orch.snapshot();
        assert_eq!(snapshot.error_message.as_deref(), Some("rpc unavailable"));
        assert_eq!(snapshot.step(4).unwrap().state, StepState::Failed);
        for i in 1..=3 {
            assert_eq!(snapshot.step(i).unwrap().state, StepState::Completed);
        }
        assert!(snapshot.result.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn hung_backend_times_out_after_sixty_seconds() {
        let backend = Arc::new(NullBackend::new());
        backend.push_hang();
        let orch = orchestrator(backend);

        let started = tokio::time::Instant::now();
        let outcome = orch.verify(WSOL).await;

        assert_eq!(outcome, VerificationOutcome::Failed);
        assert!(started.elapsed() >= Duration::from_secs(60));
        let snapshot = orch.snapshot();
        assert_eq!(snapshot.error_message.as_deref(), Some(GENERIC_FAILURE_MESSAGE));
        assert_eq!(snapshot.step(4).unwrap().state, StepState::Failed);
        assert!(snapshot.result.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn mismatched_step_list_fails_the_run() {
        let backend = Arc::new(NullBackend::new());
        let mut response = sample_response(WSOL, RiskLevel::Safe);
        response.steps.truncate(3);
        backend.push_ok(response);
        let orch = orchestrator(backend);

        let outcome = orch.verify(WSOL).await;

        assert_eq!(outcome, VerificationOutcome::Failed);
        let snapshot = orch.snapshot();
        assert_eq!(snapshot.steps.len(), 4);
        assert_eq!(snapshot.step(4).unwrap().state, StepState::Failed);
        assert_eq!(
            snapshot.error_message.as_deref(),
            Some("verification service returned 3 steps, expected 4")
        );
        assert!(snapshot.result.is_none());
    }

    // ── Reset ───────────────────────────────────────────────────────────

    #[tokio::test(start_paused = true)]
    async fn reset_is_idempotent() {
        let backend = Arc::new(NullBackend::new());
        let orch = orchestrator(backend);
        orch.verify(WSOL).await;

        orch.reset();
        let once = orch.snapshot();
        orch.reset();
        let twice = orch.snapshot();

        assert!(once.is_idle());
        assert_eq!(once, twice);
    }

    #[tokio::test(start_paused = true)]
    async fn reset_mid_run_stops_further_updates() {
        let backend = Arc::new(NullBackend::new());
        let orch = orchestrator(backend.clone());

        let (outcome, _) = tokio::join!(orch.verify(WSOL), async {
            tokio::time::sleep(Duration::from_millis(1000)).await;
            orch.reset();
        });

        assert_eq!(outcome, VerificationOutcome::Superseded);
        assert!(orch.snapshot().is_idle());
        assert!(backend.requests().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn reset_during_request_discards_the_reply() {
        let backend = Arc::new(NullBackend::new());
        backend.push_delayed(Duration::from_secs(10), Ok(sample_response(WSOL, RiskLevel::Safe)));
        let orch = orchestrator(backend.clone());

        let (outcome, _) = tokio::join!(orch.verify(WSOL), async {
            // Four steps at 700 ms, then a little way into the request.
            tokio::time::sleep(Duration::from_millis(4 * 700 + 500)).await;
            orch.reset();
        });

        assert_eq!(outcome, VerificationOutcome::Superseded);
        assert_eq!(backend.requests().len(), 1);
        assert!(orch.snapshot().is_idle());
    }

    // ── Observability of transitions ────────────────────────────────────

    #[tokio::test(start_paused = true)]
    async fn processing_is_published_before_each_delay() {
        let backend = Arc::new(NullBackend::new());
        let orch = orchestrator(backend);

        let (_, seen) = tokio::join!(orch.verify(WSOL), async {
            let mut seen = Vec::new();
            // Sample half-way through each 700 ms step.
            tokio::time::sleep(Duration::from_millis(350)).await;
            for _ in 0..4 {
                seen.push(orch.snapshot().current_step);
                tokio::time::sleep(Duration::from_millis(700)).await;
            }
            seen
        });

        assert_eq!(seen, vec![Some(1), Some(2), Some(3), Some(4)]);
    }
}
