//! # zkc-vc — Zero-Knowledge Credentials
//!
//! A [`ZkCredential`] is a W3C-shaped credential whose subjects are typed.
//! Each subject type declares a fixed attribute order, so the issuer and
//! every verifier extract the same [`Leaf`](zkc_core::Leaf) sequence, build
//! the same Merkle tree and sign the same challenge.
//!
//! ## Signing Protocol
//!
//! 1. `leaves = extract(credentialSubject)`
//! 2. `root = MerkleTree::build(leaves).root()`
//! 3. `challenge = Hash2(FE(id), root)`
//! 4. `zkSignature = Ed25519.sign(challenge)`
//!
//! Verification recomputes 1–3 and checks the signature. A document is
//! signed at most once.

pub mod credential;
pub mod error;
pub mod signature;
pub mod subject;

pub use credential::{ZkCredential, DEFAULT_CONTEXT, VERIFIABLE_CREDENTIAL_TYPE};
pub use error::VcError;
pub use signature::{SignatureBinding, ZkSignature, ZK_SIGNATURE_TYPE};
pub use subject::{extract, leaf_position, BirthDateSubject, CredentialSubject, PersonSubject};
