//! # zkc-cli — Command-Line Interface
//!
//! Provides the `zkc` binary.
//!
//! ## Subcommands
//!
//! - `zkc keygen` — Ed25519 issuer key pair (hex files).
//! - `zkc issue` — unsigned birth-date credential.
//! - `zkc sign` — attach the issuer's zk signature to a credential.
//! - `zkc verify` — check a credential's zk signature.
//! - `zkc prove` — age-threshold proof from a signed credential.
//! - `zkc verify-proof` — check an age-threshold proof.
//!
//! ```bash
//! zkc keygen --output keys --prefix dmv
//! zkc issue --issuer did:example:dmv --subject-id did:example:alice \
//!     --name Alice --birth-date 1990-03-14 --output alice.json
//! zkc sign --key keys/dmv.key alice.json
//! zkc prove --issuer-pubkey keys/dmv.pub --threshold 18 alice.json --output alice.proof
//! zkc verify-proof --issuer-pubkey keys/dmv.pub --threshold 18 alice.proof
//! ```
//!
//! Proofs are produced by the transparent reference backend, which provides
//! neither zero-knowledge nor soundness. Handlers return a process exit code:
//! `0` on success, `1` when a signature or proof is rejected.

pub mod credential;
pub mod keys;
pub mod proof;

use std::path::Path;

use anyhow::{Context, Result};
use zkc_vc::{BirthDateSubject, ZkCredential};

/// Read a birth-date credential from a JSON file.
pub fn read_credential(path: &Path) -> Result<ZkCredential<BirthDateSubject>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read credential: {}", path.display()))?;
    ZkCredential::from_json(&content)
        .with_context(|| format!("failed to parse credential: {}", path.display()))
}

/// Write a credential as pretty JSON.
pub fn write_credential(path: &Path, credential: &ZkCredential<BirthDateSubject>) -> Result<()> {
    let json = credential.to_json().context("failed to serialize credential")?;
    std::fs::write(path, json)
        .with_context(|| format!("failed to write credential: {}", path.display()))
}
