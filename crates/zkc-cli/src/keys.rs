//! # Issuer Keys
//!
//! Key files hold lowercase hex: `<prefix>.key` the 32-byte Ed25519 seed,
//! `<prefix>.pub` the 32-byte public key. Seeds are wiped from memory as
//! soon as the key pair is built.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use rand::RngCore;
use zeroize::Zeroizing;

use zkc_core::hex;
use zkc_crypto::{Ed25519KeyPair, Ed25519PublicKey};

/// Arguments for `zkc keygen`.
#[derive(Args, Debug)]
pub struct KeygenArgs {
    /// Output directory for the key files.
    #[arg(long, short, default_value = ".")]
    pub output: PathBuf,
    /// Prefix for the key filenames.
    #[arg(long, default_value = "issuer")]
    pub prefix: String,
}

/// Execute `zkc keygen`.
pub fn run_keygen(args: &KeygenArgs) -> Result<u8> {
    let (key_path, pub_path) = generate(&args.output, &args.prefix)?;

    println!("OK: generated Ed25519 issuer keypair");
    println!("  Private key: {}", key_path.display());
    println!("  Public key:  {}", pub_path.display());
    Ok(0)
}

/// Generate a key pair into `dir`, returning the secret and public key paths.
pub fn generate(dir: &Path, prefix: &str) -> Result<(PathBuf, PathBuf)> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create output directory: {}", dir.display()))?;

    let mut seed = Zeroizing::new([0u8; 32]);
    rand::rngs::OsRng.fill_bytes(&mut seed[..]);
    let public_key = Ed25519KeyPair::from_seed(&seed).public_key();
    let seed_hex = Zeroizing::new(hex::encode(&seed[..]));

    let key_path = dir.join(format!("{prefix}.key"));
    let pub_path = dir.join(format!("{prefix}.pub"));
    std::fs::write(&key_path, seed_hex.as_bytes())
        .with_context(|| format!("failed to write private key: {}", key_path.display()))?;
    std::fs::write(&pub_path, public_key.to_hex())
        .with_context(|| format!("failed to write public key: {}", pub_path.display()))?;

    tracing::info!(public_key = %public_key.to_hex(), "generated issuer keypair");
    Ok((key_path, pub_path))
}

/// Load a key pair from a hex seed file.
pub fn read_key_pair(path: &Path) -> Result<Ed25519KeyPair> {
    let content = Zeroizing::new(
        std::fs::read_to_string(path)
            .with_context(|| format!("failed to read private key: {}", path.display()))?,
    );
    let seed = Zeroizing::new(
        hex::decode_array::<32>(&content)
            .map_err(|e| anyhow::anyhow!("invalid private key {}: {e}", path.display()))?,
    );
    Ok(Ed25519KeyPair::from_seed(&seed))
}

/// Load a public key from a hex file.
pub fn read_public_key(path: &Path) -> Result<Ed25519PublicKey> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read public key: {}", path.display()))?;
    Ed25519PublicKey::from_hex(content.trim())
        .with_context(|| format!("invalid public key: {}", path.display()))
}
