//! # zkc-crypto — Cryptographic Primitives
//!
//! Provides the building blocks that both the issuer and the verifier must
//! reproduce bit-for-bit:
//!
//! - **Codec**: total encoding of supported attribute values into the BN254
//!   scalar field ([`to_field_element`]).
//! - **Poseidon** (circom parameters) as an update/finalize accumulator and
//!   the two-input `Hash2` used for leaves, parents and challenges.
//! - **Merkle tree** of fixed height [`MERKLE_TREE_HEIGHT`] with zero
//!   padding, plus inclusion paths.
//! - **Ed25519** signing and verification over field element bytes.
//!
//! ## Crate Policy
//!
//! - Depends only on `zkc-core` internally.
//! - No mocking of cryptographic operations in tests: all tests use real
//!   Poseidon and real Ed25519.
//! - No `unsafe` code.

pub mod codec;
pub mod ed25519;
pub mod error;
pub mod merkle;
pub mod poseidon;

pub use codec::{label_to_field_element, to_field_element};
pub use ed25519::{Ed25519KeyPair, Ed25519PublicKey, Ed25519Signature};
pub use error::CryptoError;
pub use merkle::{leaf_hash, MerklePath, MerkleTree, PathStep, Side, MERKLE_TREE_CAPACITY, MERKLE_TREE_HEIGHT};
pub use poseidon::{hash2, PoseidonHash};
