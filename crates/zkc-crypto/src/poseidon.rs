//! # Poseidon Hashing
//!
//! Poseidon over the BN254 scalar field with circom-compatible parameters,
//! provided by `light-poseidon`. The permutation itself is an opaque
//! collaborator; this module only exposes it as an accumulator.
//!
//! ## Usage
//!
//! Every hash in the credential stack is the two-input form [`hash2`]:
//! leaf hashes, parent nodes, the signature challenge and the long-string
//! hash-down chain.
//!
//! ## Failure
//!
//! [`PoseidonHash::finalize`] fails with [`CryptoError::HashFinalization`]
//! when the accumulator is empty, holds more inputs than the circom
//! parameter sets cover, or the backend rejects an input. The error is
//! fatal for the calling operation.

use ark_bn254::Fr;
use light_poseidon::{Poseidon, PoseidonHasher};
use zkc_core::FieldElement;

use crate::error::CryptoError;

/// Largest input arity with circom parameters.
pub const MAX_POSEIDON_INPUTS: usize = 12;

/// Update/finalize accumulator over field elements.
#[derive(Debug, Clone, Default)]
pub struct PoseidonHash {
    inputs: Vec<FieldElement>,
}

impl PoseidonHash {
    /// Start an empty accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Absorb one field element.
    pub fn update(&mut self, input: &FieldElement) -> &mut Self {
        self.inputs.push(*input);
        self
    }

    /// Number of absorbed inputs.
    pub fn len(&self) -> usize {
        self.inputs.len()
    }

    /// Returns true if nothing has been absorbed.
    pub fn is_empty(&self) -> bool {
        self.inputs.is_empty()
    }

    /// Run the permutation over the absorbed inputs.
    pub fn finalize(self) -> Result<FieldElement, CryptoError> {
        if self.inputs.is_empty() || self.inputs.len() > MAX_POSEIDON_INPUTS {
            return Err(CryptoError::HashFinalization(format!(
                "poseidon arity {} outside 1..={MAX_POSEIDON_INPUTS}",
                self.inputs.len()
            )));
        }
        let mut hasher = Poseidon::<Fr>::new_circom(self.inputs.len())
            .map_err(|e| CryptoError::HashFinalization(e.to_string()))?;
        let inputs: Vec<Fr> = self.inputs.iter().map(|fe| *fe.as_fr()).collect();
        hasher
            .hash(&inputs)
            .map(FieldElement::from_fr)
            .map_err(|e| CryptoError::HashFinalization(e.to_string()))
    }
}

/// `Hash2(left, right)`.
pub fn hash2(left: &FieldElement, right: &FieldElement) -> Result<FieldElement, CryptoError> {
    let mut acc = PoseidonHash::new();
    acc.update(left).update(right);
    acc.finalize()
}
