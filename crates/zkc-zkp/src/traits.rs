//! # Proof Layer Traits
//!
//! Three seams:
//!
//! - [`ProvingBackend`]: the opaque proving runtime. It only ever sees a
//!   circuit id and positional [`CircuitArg`] arrays, plus opaque key
//!   paths it may open itself.
//! - [`Circuit`]: static description of one circuit (id, key sizes, typed
//!   inputs).
//! - [`CircuitDataMapper`]: validates a generic
//!   [`PublicInput`](crate::PublicInput) into a circuit's typed input.
//!
//! Backends must be `Send + Sync`; one backend is shared by every provider
//! built from the same [`ProvingContext`](crate::ProvingContext).

use std::path::Path;

use serde::{Deserialize, Serialize};
use zeroize::Zeroize;
use zkc_core::FieldElement;
use zkc_crypto::MerklePath;

use crate::error::{BackendError, MapperError};
use crate::input::PublicInput;

/// One positional circuit argument.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum CircuitArg {
    /// A scalar.
    Field(FieldElement),
    /// Raw bytes (keys, signatures).
    Bytes(#[serde(with = "crate::input::hex_bytes")] Vec<u8>),
    /// An inclusion path.
    MerklePath(MerklePath),
}

impl CircuitArg {
    /// The scalar, if this is a field argument.
    pub fn as_field(&self) -> Option<&FieldElement> {
        match self {
            Self::Field(f) => Some(f),
            _ => None,
        }
    }

    /// The bytes, if this is a byte argument.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Self::Bytes(b) => Some(b),
            _ => None,
        }
    }

    /// The path, if this is a path argument.
    pub fn as_merkle_path(&self) -> Option<&MerklePath> {
        match self {
            Self::MerklePath(p) => Some(p),
            _ => None,
        }
    }
}

impl Zeroize for CircuitArg {
    fn zeroize(&mut self) {
        match self {
            Self::Field(f) => f.zeroize(),
            Self::Bytes(b) => b.zeroize(),
            Self::MerklePath(p) => {
                p.index.zeroize();
                p.steps.iter_mut().for_each(|step| step.sibling.zeroize());
                p.steps.clear();
            }
        }
    }
}

/// The proving runtime.
pub trait ProvingBackend: Send + Sync {
    /// Generate commitment keys able to serve circuits up to the given
    /// segment sizes.
    fn generate_dlog_keys(
        &self,
        max_segment_size: usize,
        supported_segment_size: usize,
    ) -> Result<(), BackendError>;

    /// Produce a proof.
    fn generate_proof(
        &self,
        circuit_id: &str,
        public_args: &[CircuitArg],
        witness_args: &[CircuitArg],
        proving_key_path: &Path,
    ) -> Result<Vec<u8>, BackendError>;

    /// Check a proof against its public arguments.
    fn verify_proof(
        &self,
        circuit_id: &str,
        public_args: &[CircuitArg],
        proof: &[u8],
        verification_key_path: &Path,
    ) -> Result<bool, BackendError>;
}

/// Positional arguments of a proving call.
pub trait ProofArguments {
    /// Public arguments in circuit order.
    fn public_args(&self) -> Vec<CircuitArg>;
    /// Witness arguments in circuit order.
    fn witness_args(&self) -> Vec<CircuitArg>;
    /// Opaque proving key reference.
    fn proving_key_path(&self) -> &Path;
}

/// Positional arguments of a verification call.
pub trait VerifyArguments {
    /// Public arguments in circuit order.
    fn public_args(&self) -> Vec<CircuitArg>;
    /// Proof bytes.
    fn proof(&self) -> &[u8];
    /// Opaque verification key reference.
    fn verification_key_path(&self) -> &Path;
}

/// Static description of a circuit.
pub trait Circuit: Send + Sync + 'static {
    /// Identifier passed to the backend.
    const ID: &'static str;
    /// Largest segment size the commitment keys must cover.
    const MAX_SEGMENT_SIZE: usize;
    /// Segment size the circuit is compiled for.
    const SUPPORTED_SEGMENT_SIZE: usize;

    /// Typed prover input.
    type ProofInput: ProofArguments;
    /// Typed verifier input.
    type VerifyInput: VerifyArguments;
}

/// Maps generic bundles into one circuit's typed inputs.
///
/// Both operations are pure: they read the bundle, never modify it, and
/// either return a complete input or an error naming the first offending
/// field.
pub trait CircuitDataMapper: Send + Sync {
    /// The circuit this mapper serves.
    type Circuit: Circuit;

    /// Build the prover input.
    fn map_proof_input(
        &self,
        input: &PublicInput,
    ) -> Result<<Self::Circuit as Circuit>::ProofInput, MapperError>;

    /// Build the verifier input.
    fn map_verify_input(
        &self,
        input: &PublicInput,
    ) -> Result<<Self::Circuit as Circuit>::VerifyInput, MapperError>;
}
