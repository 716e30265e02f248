//! One interactive verification: drive the orchestrator, render progress,
//! print the final card.

use std::future::Future;
use std::io::Write;

use ark_client::VerificationBackend;
use ark_utils::format_duration_ms;
use ark_verification::{StepPacer, VerificationOrchestrator, VerificationOutcome};
use tracing::info;

use crate::render::{render_error, render_result, ProgressRenderer};

/// Run `verify(address)` to completion while streaming progress to `out`.
///
/// When `interrupt` resolves first the run is reset, which cancels it; the
/// outcome is then [`VerificationOutcome::Superseded`].
pub async fn run_session<B, P, W, I>(
    orch: &VerificationOrchestrator<B, P>,
    address: &str,
    out: &mut W,
    interrupt: I,
) -> std::io::Result<VerificationOutcome>
where
    B: VerificationBackend,
    P: StepPacer,
    W: Write,
    I: Future<Output = ()>,
{
    let started = tokio::time::Instant::now();
    let mut rx = orch.subscribe();
    let mut renderer = ProgressRenderer::new();

    let run = orch.verify(address);
    tokio::pin!(run);
    tokio::pin!(interrupt);
    let mut interrupted = false;

    let outcome = loop {
        tokio::select! {
            outcome = &mut run => break outcome,
            Ok(()) = rx.changed() => {
                let snapshot = rx.borrow_and_update().clone();
                for line in renderer.transitions(&snapshot) {
                    writeln!(out, "{line}")?;
                }
            }
            _ = &mut interrupt, if !interrupted => {
                interrupted = true;
                info!("interrupted, cancelling verification");
                orch.reset();
            }
        }
    };

    info!(
        ?outcome,
        elapsed = %format_duration_ms(u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX)),
        "session finished"
    );

    let snapshot = orch.snapshot();
    for line in renderer.transitions(&snapshot) {
        writeln!(out, "{line}")?;
    }

    match outcome {
        VerificationOutcome::Completed => {
            if let Some(result) = &snapshot.result {
                writeln!(out, "{}", render_result(result))?;
            }
        }
        VerificationOutcome::Failed | VerificationOutcome::Rejected => {
            if let Some(message) = &snapshot.error_message {
                writeln!(out, "{}", render_error(message))?;
            }
        }
        VerificationOutcome::Superseded => {
            writeln!(out, "\nVerification cancelled.")?;
        }
    }
    out.flush()?;
    Ok(outcome)
}
