//! Turning snapshots into terminal lines.

use std::collections::{HashMap, HashSet};

use ark_types::{StepState, VerificationStep, VerifyResponse, VERIFICATION_STEPS};
use ark_utils::shorten_address;
use ark_verification::VerificationSnapshot;

/// Prints each step transition once, however many snapshots repeat it.
///
/// Every step that gets past pending is announced with its processing line
/// exactly once, even when the snapshot that first shows it is already
/// completed or failed. Simulated completions carry no information and stay
/// silent; a completed step is printed once the backend has attached its
/// result note.
#[derive(Debug, Default)]
pub struct ProgressRenderer {
    printed: HashMap<u8, (StepState, Option<String>)>,
    announced: HashSet<u8>,
}

impl ProgressRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lines for everything that changed since the last call.
    pub fn transitions(&mut self, snapshot: &VerificationSnapshot) -> Vec<String> {
        if snapshot.steps.is_empty() {
            self.printed.clear();
            self.announced.clear();
            return Vec::new();
        }

        let mut lines = Vec::new();
        for step in &snapshot.steps {
            let key = (step.state, step.result_note.clone());
            if step.state == StepState::Pending || self.printed.get(&step.index) == Some(&key) {
                continue;
            }
            if self.announced.insert(step.index) {
                lines.push(processing_line(step.index, &step.name));
            }
            match step.state {
                StepState::Completed => {
                    if let Some(note) = &step.result_note {
                        lines.push(format!("  ✓ {}: {}", step.name, note));
                    }
                }
                StepState::Failed => lines.push(format!("  ✗ {}", step.name)),
                StepState::Pending | StepState::Processing => {}
            }
            self.printed.insert(step.index, key);
        }
        lines
    }
}

fn processing_line(index: u8, name: &str) -> String {
    let message = VerificationStep::by_index(index)
        .map(|s| s.display_message)
        .unwrap_or("");
    format!("[{}/{}] {} ... {}", index, VERIFICATION_STEPS.len(), name, message)
}

/// Result card shown after a successful run.
pub fn render_result(result: &VerifyResponse) -> String {
    let mut out = vec![
        String::new(),
        format!("{} ({})", result.risk_level.headline(), result.risk_level),
        format!("Address:      {}", shorten_address(&result.address)),
        format!("Summary:      {}", result.summary),
    ];
    if let Some(balance) = result.balance {
        out.push(format!("Balance:      {balance} SOL"));
    }
    if let Some(count) = result.transaction_count {
        out.push(format!("Transactions: {count}"));
    }
    out.push(format!("Explorer:     {}", result.explorer_url()));
    out.join("\n")
}

/// Failure text with the manual retry hint.
pub fn render_error(message: &str) -> String {
    format!("\n✗ {message}\n  Run the command again to try again.")
}

#[cfg(test)]
mod tests {
    use super::*;
    use ark_nullables::sample_response;
    use ark_types::RiskLevel;

    #[test]
    fn each_transition_is_printed_once() {
        let mut renderer = ProgressRenderer::new();
        let mut snapshot = VerificationSnapshot::started();

        let first = renderer.transitions(&snapshot);
        assert_eq!(first, vec!["[1/4] AI Pattern Analysis ... Analyzing address pattern...".to_string()]);
        assert!(renderer.transitions(&snapshot).is_empty());

        snapshot.mark_completed(1);
        snapshot.mark_processing(2);
        let next = renderer.transitions(&snapshot);
        assert_eq!(next.len(), 1);
        assert!(next[0].starts_with("[2/4] On-Chain Scan"));
    }

    #[test]
    fn backend_notes_are_printed_on_success() {
        let mut renderer = ProgressRenderer::new();
        let mut snapshot = VerificationSnapshot::started();
        renderer.transitions(&snapshot);
        snapshot.mark_processing(4);
        assert_eq!(
            renderer.transitions(&snapshot),
            vec![
                "[2/4] On-Chain Scan ... Scanning blockchain data...".to_string(),
                "[3/4] AI Risk Detection ... Checking for suspicious patterns...".to_string(),
                "[4/4] Terminal Verification ... Running CLI verification...".to_string(),
            ]
        );

        let response = sample_response("So11111111111111111111111111111111111111112", RiskLevel::Safe);
        let steps = ark_verification::merge::merge_backend_steps(&response.steps).unwrap();
        snapshot.succeed(steps, response);

        let lines = renderer.transitions(&snapshot);
        assert_eq!(
            lines,
            vec![
                "  ✓ AI Pattern Analysis: Valid Solana public key format (Base58)".to_string(),
                "  ✓ On-Chain Scan: Balance: 0.0057 SOL, 1000 transactions".to_string(),
                "  ✓ AI Risk Detection: No suspicious patterns detected".to_string(),
                "  ✓ Terminal Verification: Solana address verified on mainnet-beta".to_string(),
            ]
        );
    }

    #[test]
    fn steps_seen_only_as_finished_are_still_announced() {
        let mut renderer = ProgressRenderer::new();
        let mut snapshot = VerificationSnapshot::started();
        snapshot.mark_processing(4);
        snapshot.fail(4, "rpc unavailable");

        let lines = renderer.transitions(&snapshot);
        assert_eq!(lines.len(), 5);
        for (i, line) in lines.iter().take(4).enumerate() {
            assert!(line.starts_with(&format!("[{}/4]", i + 1)), "{line}");
        }
        assert_eq!(lines[4], "  ✗ Terminal Verification");
        assert!(renderer.transitions(&snapshot).is_empty());
    }

    #[test]
    fn failure_is_marked() {
        let mut renderer = ProgressRenderer::new();
        let mut snapshot = VerificationSnapshot::started();
        snapshot.mark_processing(4);
        renderer.transitions(&snapshot);
        snapshot.fail(4, "rpc unavailable");
        assert_eq!(renderer.transitions(&snapshot), vec!["  ✗ Terminal Verification".to_string()]);
    }

    #[test]
    fn reset_snapshot_clears_memory() {
        let mut renderer = ProgressRenderer::new();
        let snapshot = VerificationSnapshot::started();
        renderer.transitions(&snapshot);
        renderer.transitions(&VerificationSnapshot::default());
        assert_eq!(renderer.transitions(&snapshot).len(), 1);
    }

    #[test]
    fn result_card_lists_fields() {
        let response = sample_response("So11111111111111111111111111111111111111112", RiskLevel::Safe);
        let card = render_result(&response);
        assert!(card.contains("Verified Safe (safe)"));
        assert!(card.contains("So111111...11111112"));
        assert!(card.contains("Balance:      0.0057 SOL"));
        assert!(card.contains("Transactions: 1000"));
        assert!(card.contains("https://solscan.io/account/So11111111111111111111111111111111111111112"));
    }

    #[test]
    fn result_card_skips_missing_balance() {
        let response = sample_response("bad", RiskLevel::Invalid);
        let card = render_result(&response);
        assert!(card.contains("Invalid Address"));
        assert!(!card.contains("Balance"));
    }

    #[test]
    fn error_text_offers_retry() {
        let text = render_error("rpc unavailable");
        assert!(text.contains("✗ rpc unavailable"));
        assert!(text.contains("try again"));
    }
}
