//! # Credential Subcommands
//!
//! `issue`, `sign` and `verify` over birth-date credentials stored as JSON.
//! `sign` rewrites the credential file in place unless `--output` is given.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;

use zkc_core::CalendarDate;
use zkc_vc::{BirthDateSubject, ZkCredential};

use crate::keys::{read_key_pair, read_public_key};
use crate::{read_credential, write_credential};

/// Arguments for `zkc issue`.
#[derive(Args, Debug)]
pub struct IssueArgs {
    /// Issuer identifier (usually a DID).
    #[arg(long)]
    pub issuer: String,
    /// Subject identifier.
    #[arg(long)]
    pub subject_id: String,
    /// Subject display name.
    #[arg(long)]
    pub name: String,
    /// Date of birth, `YYYY-MM-DD`.
    #[arg(long)]
    pub birth_date: String,
    /// Credential id. A random `urn:uuid` is used when absent.
    #[arg(long)]
    pub id: Option<String>,
    /// Where to write the credential.
    #[arg(long, short)]
    pub output: PathBuf,
}

/// Arguments for `zkc sign`.
#[derive(Args, Debug)]
pub struct SignArgs {
    /// Issuer private key file.
    #[arg(long)]
    pub key: PathBuf,
    /// Credential to sign.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,
    /// Write the signed credential here instead of overwriting FILE.
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

/// Arguments for `zkc verify`.
#[derive(Args, Debug)]
pub struct VerifyArgs {
    /// Issuer public key file.
    #[arg(long)]
    pub pubkey: PathBuf,
    /// Signed credential.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,
}

/// Execute `zkc issue`.
pub fn run_issue(args: &IssueArgs) -> Result<u8> {
    let birth = CalendarDate::parse(&args.birth_date).context("invalid --birth-date")?;
    let subject = BirthDateSubject {
        id: args.subject_id.clone(),
        name: args.name.clone(),
        birth_year: birth.year,
        birth_month: birth.month,
        birth_day: birth.day,
    };
    let mut credential = ZkCredential::new(args.issuer.clone(), vec![subject]);
    if let Some(id) = &args.id {
        credential = credential.with_id(id.clone());
    }

    write_credential(&args.output, &credential)?;
    println!("OK: issued unsigned credential {}", credential.id);
    println!("  Written to: {}", args.output.display());
    Ok(0)
}

/// Execute `zkc sign`.
pub fn run_sign(args: &SignArgs) -> Result<u8> {
    let mut credential = read_credential(&args.file)?;
    if credential.is_signed() {
        bail!("credential {} is already signed", credential.id);
    }
    let key = read_key_pair(&args.key)?;
    credential
        .sign(&key)
        .with_context(|| format!("failed to sign credential {}", credential.id))?;

    let output = args.output.as_ref().unwrap_or(&args.file);
    write_credential(output, &credential)?;
    tracing::info!(credential = %credential.id, "credential signed");
    println!("OK: signed credential {}", credential.id);
    println!("  Written to: {}", output.display());
    Ok(0)
}

/// Execute `zkc verify`.
pub fn run_verify(args: &VerifyArgs) -> Result<u8> {
    let credential = read_credential(&args.file)?;
    let public_key = read_public_key(&args.pubkey)?;
    if !credential.is_signed() {
        println!("FAIL: credential {} is not signed", credential.id);
        return Ok(1);
    }

    if credential
        .verify(&public_key)
        .with_context(|| format!("failed to verify credential {}", credential.id))?
    {
        println!("OK: zk signature is valid");
        Ok(0)
    } else {
        println!("FAIL: zk signature does not match credential or issuer key");
        Ok(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::generate;

    fn issue(dir: &std::path::Path, birth_date: &str) -> PathBuf {
        let output = dir.join("cred.json");
        let args = IssueArgs {
            issuer: "did:example:dmv".into(),
            subject_id: "did:example:alice".into(),
            name: "Alice".into(),
            birth_date: birth_date.into(),
            id: Some("urn:example:cred-1".into()),
            output: output.clone(),
        };
        assert_eq!(run_issue(&args).unwrap(), 0);
        output
    }

    #[test]
    fn issue_writes_unsigned_credential() {
        let dir = tempfile::tempdir().unwrap();
        let path = issue(dir.path(), "1990-03-14");
        let credential = read_credential(&path).unwrap();
        assert_eq!(credential.id, "urn:example:cred-1");
        assert!(!credential.is_signed());
        assert_eq!(credential.credential_subject[0].birth_month, 3);
    }

    #[test]
    fn issue_rejects_impossible_birth_date() {
        let dir = tempfile::tempdir().unwrap();
        let args = IssueArgs {
            issuer: "did:example:dmv".into(),
            subject_id: "did:example:alice".into(),
            name: "Alice".into(),
            birth_date: "2023-02-29".into(),
            id: None,
            output: dir.path().join("cred.json"),
        };
        assert!(run_issue(&args).is_err());
    }

    #[test]
    fn sign_then_verify() {
        let dir = tempfile::tempdir().unwrap();
        let (key, public) = generate(dir.path(), "dmv").unwrap();
        let path = issue(dir.path(), "1990-03-14");

        let sign = SignArgs { key, file: path.clone(), output: None };
        assert_eq!(run_sign(&sign).unwrap(), 0);
        assert!(read_credential(&path).unwrap().is_signed());

        let verify = VerifyArgs { pubkey: public, file: path.clone() };
        assert_eq!(run_verify(&verify).unwrap(), 0);

        // Signing twice is refused.
        assert!(run_sign(&sign).is_err());
    }

    #[test]
    fn verify_fails_for_other_issuer_and_tampering() {
        let dir = tempfile::tempdir().unwrap();
        let (key, _) = generate(dir.path(), "dmv").unwrap();
        let (_, other) = generate(dir.path(), "other").unwrap();
        let path = issue(dir.path(), "1990-03-14");
        run_sign(&SignArgs { key, file: path.clone(), output: None }).unwrap();

        let verify = VerifyArgs { pubkey: other, file: path.clone() };
        assert_eq!(run_verify(&verify).unwrap(), 1);

        let public = dir.path().join("dmv.pub");
        let mut credential = read_credential(&path).unwrap();
        credential.credential_subject[0].birth_year = 1980;
        write_credential(&path, &credential).unwrap();
        let verify = VerifyArgs { pubkey: public, file: path };
        assert_eq!(run_verify(&verify).unwrap(), 1);
    }

    #[test]
    fn verify_reports_unsigned() {
        let dir = tempfile::tempdir().unwrap();
        let (_, public) = generate(dir.path(), "dmv").unwrap();
        let path = issue(dir.path(), "1990-03-14");
        assert_eq!(run_verify(&VerifyArgs { pubkey: public, file: path }).unwrap(), 1);
    }
}
