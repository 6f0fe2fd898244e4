//! # Age-Threshold Proof Subcommands
//!
//! `prove` turns a signed credential into an age-threshold proof;
//! `verify-proof` checks one. Both run on the transparent reference backend
//! with commitment keys sized from [`ProvingConfig`]. Proof files hold
//! lowercase hex.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;

use zkc_core::{hex, CalendarDate, ErrorKind};
use zkc_zkp::{
    AgeDataMapper, AgeProofRequest, AgeVerifyRequest, ProvingConfig, ProvingContext,
    TransparentBackend,
};

use crate::keys::read_public_key;
use crate::read_credential;

/// Arguments for `zkc prove`.
#[derive(Args, Debug)]
pub struct ProveArgs {
    /// Issuer public key file.
    #[arg(long)]
    pub issuer_pubkey: PathBuf,
    /// Minimum age in years.
    #[arg(long)]
    pub threshold: u32,
    /// Date the age is evaluated at, `YYYY-MM-DD`. Defaults to today (UTC).
    #[arg(long)]
    pub date: Option<String>,
    /// Which credential subject's birth date to prove.
    #[arg(long, default_value_t = 0)]
    pub subject_index: usize,
    /// Signed credential.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,
    /// Where to write the proof. Printed to stdout when absent.
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

/// Arguments for `zkc verify-proof`.
#[derive(Args, Debug)]
pub struct VerifyProofArgs {
    /// Issuer public key file.
    #[arg(long)]
    pub issuer_pubkey: PathBuf,
    /// Minimum age in years.
    #[arg(long)]
    pub threshold: u32,
    /// Date the age is evaluated at, `YYYY-MM-DD`. Defaults to today (UTC).
    #[arg(long)]
    pub date: Option<String>,
    /// Proof file (hex).
    #[arg(value_name = "PROOF")]
    pub proof: PathBuf,
}

fn context(config: &ProvingConfig) -> Result<ProvingContext<TransparentBackend>> {
    let ctx = ProvingContext::new(TransparentBackend::new());
    ctx.initialize(config.key_params())
        .context("failed to initialize commitment keys")?;
    Ok(ctx)
}

fn evaluation_date(date: Option<&str>) -> Result<CalendarDate> {
    match date {
        Some(s) => CalendarDate::parse(s).context("invalid --date"),
        None => Ok(CalendarDate::today()),
    }
}

/// Execute `zkc prove`.
pub fn run_prove(args: &ProveArgs, config: &ProvingConfig) -> Result<u8> {
    let credential = read_credential(&args.file)?;
    let issuer_public_key = read_public_key(&args.issuer_pubkey)?;
    let request = AgeProofRequest {
        current_date: evaluation_date(args.date.as_deref())?,
        threshold_years: args.threshold,
        proving_key_path: config.proving_key_path.clone(),
    };
    let bundle = request
        .public_input(&credential, args.subject_index, &issuer_public_key)
        .with_context(|| format!("cannot build proof input from {}", args.file.display()))?;

    let ctx = context(config)?;
    let proof = match ctx.prover(AgeDataMapper).create_proof(&bundle) {
        Ok(proof) => proof,
        Err(e) if e.kind() == ErrorKind::ProofGenerationFailure => {
            println!("FAIL: {e}");
            return Ok(1);
        }
        Err(e) => return Err(e).context("proof creation failed"),
    };

    let proof_hex = hex::encode(&proof);
    match &args.output {
        Some(path) => {
            std::fs::write(path, &proof_hex)
                .with_context(|| format!("failed to write proof: {}", path.display()))?;
            println!("OK: age >= {} proven", args.threshold);
            println!("  Proof: {}", path.display());
        }
        None => println!("{proof_hex}"),
    }
    Ok(0)
}

/// Execute `zkc verify-proof`.
pub fn run_verify_proof(args: &VerifyProofArgs, config: &ProvingConfig) -> Result<u8> {
    let proof = read_proof(&args.proof)?;
    let request = AgeVerifyRequest {
        current_date: evaluation_date(args.date.as_deref())?,
        threshold_years: args.threshold,
        issuer_public_key: read_public_key(&args.issuer_pubkey)?,
        verification_key_path: config.verification_key_path.clone(),
    };

    let ctx = context(config)?;
    let valid = ctx
        .verifier(AgeDataMapper)
        .verify_proof(&request.public_input(&proof))
        .context("proof verification failed")?;
    if valid {
        println!("OK: proof is valid (age >= {})", args.threshold);
        Ok(0)
    } else {
        println!("FAIL: proof does not match the statement");
        Ok(1)
    }
}

fn read_proof(path: &Path) -> Result<Vec<u8>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read proof: {}", path.display()))?;
    hex::decode(&content).map_err(|e| anyhow::anyhow!("invalid proof {}: {e}", path.display()))
}
