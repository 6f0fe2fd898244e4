//! # Transparent Reference Backend
//!
//! A deterministic [`ProvingBackend`] used for development, tests and the
//! CLI. Proofs are SHA-256 digests of the public arguments:
//!
//! ```text
//! proof = SHA256( domain || 0x00 || circuit_id || 0x00 || canonical(public_args) )
//! ```
//!
//! At proving time the backend evaluates the circuit's registered reference
//! constraint check over the public and witness arguments and refuses to
//! produce a proof for an unsatisfied witness.
//!
//! ## Security Warning
//!
//! **NOT ZERO-KNOWLEDGE AND NOT SOUND.** Anyone can recompute a valid proof
//! from the public arguments alone; the verifier learns nothing about
//! whether a witness ever existed. The backend exists so that the mapping,
//! key-initialization and provider layers can run end to end without a
//! SNARK runtime. It MUST NOT be used where either property is required.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::Mutex;
use zkc_core::{CanonicalBytes, Sha256Accumulator};

use crate::circuits::age;
use crate::error::BackendError;
use crate::keys::KeyParams;
use crate::traits::{Circuit, CircuitArg, ProvingBackend};

/// Domain tag mixed into every transparent proof.
pub const TRANSPARENT_PROOF_DOMAIN: &[u8] = b"zkc.transparent-proof.v1";

/// Length of a transparent proof.
pub const TRANSPARENT_PROOF_BYTES: usize = 32;

/// Reference constraint check: `Ok(())` if the witness satisfies the circuit.
pub type ConstraintCheck = fn(&[CircuitArg], &[CircuitArg]) -> Result<(), String>;

/// Deterministic, transparent backend. See the module docs.
pub struct TransparentBackend {
    circuits: BTreeMap<&'static str, ConstraintCheck>,
    keys: Mutex<Option<KeyParams>>,
    key_generation_calls: AtomicUsize,
}

impl TransparentBackend {
    /// Backend with every built-in circuit registered.
    pub fn new() -> Self {
        Self::empty().register(age::AgeCircuit::ID, age::check_constraints)
    }

    /// Backend with no circuits.
    pub fn empty() -> Self {
        Self {
            circuits: BTreeMap::new(),
            keys: Mutex::new(None),
            key_generation_calls: AtomicUsize::new(0),
        }
    }

    /// Register a circuit's reference constraint check.
    pub fn register(mut self, circuit_id: &'static str, check: ConstraintCheck) -> Self {
        self.circuits.insert(circuit_id, check);
        self
    }

    /// How many times `generate_dlog_keys` has been called.
    pub fn key_generation_calls(&self) -> usize {
        self.key_generation_calls.load(Ordering::SeqCst)
    }

    fn check_ready(&self, circuit_id: &str) -> Result<ConstraintCheck, BackendError> {
        if self.keys.lock().is_none() {
            return Err(BackendError::KeysNotInitialized);
        }
        self.circuits
            .get(circuit_id)
            .copied()
            .ok_or_else(|| BackendError::UnknownCircuit(circuit_id.to_string()))
    }

    fn digest(circuit_id: &str, public_args: &[CircuitArg]) -> Result<[u8; 32], BackendError> {
        let canonical = CanonicalBytes::new(&public_args)?;
        let mut acc = Sha256Accumulator::new();
        acc.update(TRANSPARENT_PROOF_DOMAIN);
        acc.update(&[0]);
        acc.update(circuit_id.as_bytes());
        acc.update(&[0]);
        acc.update(canonical.as_bytes());
        Ok(acc.finalize())
    }
}

impl Default for TransparentBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for TransparentBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransparentBackend")
            .field("circuits", &self.circuits.keys().collect::<Vec<_>>())
            .field("keys", &*self.keys.lock())
            .finish()
    }
}

impl ProvingBackend for TransparentBackend {
    fn generate_dlog_keys(
        &self,
        max_segment_size: usize,
        supported_segment_size: usize,
    ) -> Result<(), BackendError> {
        self.key_generation_calls.fetch_add(1, Ordering::SeqCst);
        if !max_segment_size.is_power_of_two() || !supported_segment_size.is_power_of_two() {
            return Err(BackendError::KeyGeneration(
                "segment sizes must be powers of two".to_string(),
            ));
        }
        if supported_segment_size > max_segment_size {
            return Err(BackendError::KeyGeneration(format!(
                "supported segment size {supported_segment_size} exceeds max {max_segment_size}"
            )));
        }
        *self.keys.lock() = Some(KeyParams {
            max_segment_size,
            supported_segment_size,
        });
        Ok(())
    }

    fn generate_proof(
        &self,
        circuit_id: &str,
        public_args: &[CircuitArg],
        witness_args: &[CircuitArg],
        proving_key_path: &Path,
    ) -> Result<Vec<u8>, BackendError> {
        let check = self.check_ready(circuit_id)?;
        check(public_args, witness_args).map_err(|reason| BackendError::Unsatisfied {
            circuit: circuit_id.to_string(),
            reason,
        })?;
        let proof = Self::digest(circuit_id, public_args)?;
        tracing::debug!(
            circuit = circuit_id,
            proving_key = %proving_key_path.display(),
            "transparent proof generated"
        );
        Ok(proof.to_vec())
    }

    fn verify_proof(
        &self,
        circuit_id: &str,
        public_args: &[CircuitArg],
        proof: &[u8],
        verification_key_path: &Path,
    ) -> Result<bool, BackendError> {
        self.check_ready(circuit_id)?;
        if proof.len() != TRANSPARENT_PROOF_BYTES {
            return Err(BackendError::MalformedProof(format!(
                "expected {TRANSPARENT_PROOF_BYTES} bytes, got {}",
                proof.len()
            )));
        }
        let expected = Self::digest(circuit_id, public_args)?;
        let valid = expected.as_slice() == proof;
        tracing::debug!(
            circuit = circuit_id,
            verification_key = %verification_key_path.display(),
            valid,
            "transparent proof checked"
        );
        Ok(valid)
    }
}
