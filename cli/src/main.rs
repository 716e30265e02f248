//! ark-verify: check a Solana wallet address against the ARK verification
//! backend from the terminal.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use ark_cli::{run_session, CliConfig};
use ark_client::VerifyClient;
use ark_types::{ExampleAddress, EXAMPLE_ADDRESSES};
use ark_utils::LogFormat;
use ark_verification::{
    FixedPacer, RandomPacer, StepPacer, VerificationOrchestrator, VerificationOutcome,
};
use clap::Parser;

#[derive(Parser)]
#[command(name = "ark-verify", about = "ARK wallet verification client")]
struct Cli {
    /// Base URL of the verification backend.
    #[arg(long, env = "ARK_BACKEND_URL")]
    backend_url: Option<String>,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[arg(long, env = "ARK_LOG_LEVEL")]
    log_level: Option<String>,

    /// Log format: "human" or "json".
    #[arg(long, env = "ARK_LOG_FORMAT")]
    log_format: Option<LogFormat>,

    /// Path to a TOML configuration file. If provided, file settings
    /// are used as the base; CLI flags and env vars override them.
    #[arg(long, env = "ARK_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Verify a wallet address.
    Verify {
        /// Address to verify.
        address: Option<String>,

        /// Verify one of the sample addresses instead (see `examples`).
        #[arg(long, conflicts_with = "address")]
        example: Option<String>,

        /// Skip the cosmetic per-step delays.
        #[arg(long)]
        no_animation: bool,

        /// Print the final state as JSON instead of the result card.
        #[arg(long)]
        json: bool,
    },
    /// Check that the backend is reachable.
    Health,
    /// List the sample addresses.
    Examples,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let base = match &cli.config {
        Some(path) => CliConfig::from_toml_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => CliConfig::default(),
    };
    let config = base.with_overrides(cli.backend_url, cli.log_level, cli.log_format);

    ark_utils::init_logging(config.log_format, &config.log_level);
    if let Some(path) = &cli.config {
        tracing::info!("Loaded config from {}", path.display());
    }

    match cli.command {
        Command::Verify {
            address,
            example,
            no_animation,
            json,
        } => {
            let address = match example {
                Some(label) => ExampleAddress::find(&label)
                    .map(|e| e.address.to_string())
                    .with_context(|| format!("unknown example '{label}'"))?,
                None => address.unwrap_or_default(),
            };
            verify(&config, &address, no_animation, json).await
        }
        Command::Health => health(&config).await,
        Command::Examples => {
            for example in &EXAMPLE_ADDRESSES {
                println!("{:<12} {}", example.label, example.address);
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}

async fn verify(
    config: &CliConfig,
    address: &str,
    no_animation: bool,
    json: bool,
) -> anyhow::Result<ExitCode> {
    let client =
        VerifyClient::with_timeout(&config.backend_url, config.orchestrator.request_timeout())?;
    let pacer: Box<dyn StepPacer> = if no_animation {
        Box::new(FixedPacer::instant())
    } else {
        Box::new(RandomPacer::from_config(&config.orchestrator))
    };
    let orch = VerificationOrchestrator::with_pacer(client, pacer, config.orchestrator.clone());

    tracing::info!(backend = %config.backend_url, "starting verification");

    let interrupt = async {
        if tokio::signal::ctrl_c().await.is_err() {
            std::future::pending::<()>().await;
        }
    };

    let outcome = if json {
        let outcome = run_session(&orch, address, &mut std::io::sink(), interrupt).await?;
        println!("{}", serde_json::to_string_pretty(&orch.snapshot())?);
        outcome
    } else {
        let mut stdout = std::io::stdout().lock();
        run_session(&orch, address, &mut stdout, interrupt).await?
    };

    Ok(match outcome {
        VerificationOutcome::Completed => ExitCode::SUCCESS,
        VerificationOutcome::Superseded => ExitCode::from(130),
        VerificationOutcome::Failed | VerificationOutcome::Rejected => ExitCode::FAILURE,
    })
}

async fn health(config: &CliConfig) -> anyhow::Result<ExitCode> {
    let client = VerifyClient::new(&config.backend_url)?;
    match client.health().await {
        Ok(health) => {
            println!(
                "{}: {}{}",
                client.base_url(),
                health.status,
                health
                    .timestamp
                    .map(|t| format!(" ({t})"))
                    .unwrap_or_default()
            );
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            tracing::warn!("health check failed: {e}");
            println!("{}: unreachable ({e})", client.base_url());
            Ok(ExitCode::FAILURE)
        }
    }
}
