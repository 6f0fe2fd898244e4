//! # SHA-256 Digests
//!
//! SHA-256 is used only outside the circuit: the transparent reference
//! backend derives its proof bytes from canonical argument lists. In-circuit
//! hashing is Poseidon (`zkc-crypto::poseidon`).

use sha2::{Digest, Sha256};

/// Incremental SHA-256 for composite inputs (domain tag, ids, canonical bytes).
#[derive(Debug, Clone, Default)]
pub struct Sha256Accumulator {
    hasher: Sha256,
}

impl Sha256Accumulator {
    /// Start an empty accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Absorb more bytes.
    pub fn update(&mut self, data: &[u8]) {
        self.hasher.update(data);
    }

    /// Finish and return the raw digest.
    pub fn finalize(self) -> [u8; 32] {
        self.hasher.finalize().into()
    }
}
