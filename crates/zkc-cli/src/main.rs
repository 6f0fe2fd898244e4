//! # zkc CLI entry point
//!
//! Parses command-line arguments, initializes tracing and dispatches to the
//! subcommand handlers in `zkc_cli`.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use zkc_cli::credential::{run_issue, run_sign, run_verify, IssueArgs, SignArgs, VerifyArgs};
use zkc_cli::keys::{run_keygen, KeygenArgs};
use zkc_cli::proof::{run_prove, run_verify_proof, ProveArgs, VerifyProofArgs};
use zkc_zkp::ProvingConfig;

/// ZK credentials toolchain.
///
/// Issues and zk-signs birth-date credentials, and proves or checks
/// age-threshold statements about them.
#[derive(Parser, Debug)]
#[command(name = "zkc", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Emit logs as JSON lines.
    #[arg(long, global = true)]
    json_logs: bool,

    /// Proving configuration file (YAML). `ZKC_*` variables override it.
    #[arg(long, global = true, env = "ZKC_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate an Ed25519 issuer keypair.
    Keygen(KeygenArgs),

    /// Issue an unsigned birth-date credential.
    Issue(IssueArgs),

    /// Attach the issuer's zk signature to a credential.
    Sign(SignArgs),

    /// Verify a credential's zk signature.
    Verify(VerifyArgs),

    /// Prove that a credential holder meets an age threshold.
    Prove(ProveArgs),

    /// Verify an age-threshold proof.
    VerifyProof(VerifyProofArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);
    if cli.json_logs {
        subscriber.json().init();
    } else {
        subscriber.init();
    }

    let result = match cli.command {
        Commands::Keygen(args) => run_keygen(&args),
        Commands::Issue(args) => run_issue(&args),
        Commands::Sign(args) => run_sign(&args),
        Commands::Verify(args) => run_verify(&args),
        Commands::Prove(args) => {
            load_config(cli.config.as_deref()).and_then(|c| run_prove(&args, &c))
        }
        Commands::VerifyProof(args) => {
            load_config(cli.config.as_deref()).and_then(|c| run_verify_proof(&args, &c))
        }
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            eprintln!("error: {e:#}");
            ExitCode::from(2)
        }
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<ProvingConfig> {
    let config = ProvingConfig::load(path)?;
    tracing::debug!(
        max_segment_size = config.max_segment_size,
        supported_segment_size = config.supported_segment_size,
        "proving config loaded"
    );
    Ok(config)
}
