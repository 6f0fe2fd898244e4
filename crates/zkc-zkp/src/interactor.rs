//! # Circuit Interactor
//!
//! Drives one typed circuit input through a [`ProvingBackend`]: make sure
//! commitment keys exist, flatten the input into positional arguments, call
//! the backend, and classify its failures.

use std::sync::Arc;

use zeroize::Zeroize;

use crate::error::InteractorError;
use crate::keys::{CommitmentKeyCache, KeyParams};
use crate::traits::{Circuit, ProofArguments, ProvingBackend, VerifyArguments};

/// Backend plus shared key cache.
pub struct CircuitInteractor<B: ProvingBackend> {
    backend: Arc<B>,
    keys: Arc<CommitmentKeyCache>,
}

impl<B: ProvingBackend> Clone for CircuitInteractor<B> {
    fn clone(&self) -> Self {
        Self {
            backend: Arc::clone(&self.backend),
            keys: Arc::clone(&self.keys),
        }
    }
}

impl<B: ProvingBackend> CircuitInteractor<B> {
    /// Interactor over a shared backend and key cache.
    pub fn new(backend: Arc<B>, keys: Arc<CommitmentKeyCache>) -> Self {
        Self { backend, keys }
    }

    /// The backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    fn ensure_keys<C: Circuit>(&self) -> Result<(), InteractorError> {
        self.keys.ensure(
            self.backend.as_ref(),
            KeyParams {
                max_segment_size: C::MAX_SEGMENT_SIZE,
                supported_segment_size: C::SUPPORTED_SEGMENT_SIZE,
            },
        )
    }

    /// Generate a proof for `input`.
    pub fn generate_proof<C: Circuit>(
        &self,
        input: &C::ProofInput,
    ) -> Result<Vec<u8>, InteractorError> {
        self.ensure_keys::<C>()?;
        let public = input.public_args();
        let mut witness = input.witness_args();
        tracing::debug!(
            circuit = C::ID,
            public_args = public.len(),
            witness_args = witness.len(),
            "generating proof"
        );
        let result = self
            .backend
            .generate_proof(C::ID, &public, &witness, input.proving_key_path());
        witness.iter_mut().for_each(Zeroize::zeroize);
        result.map_err(|source| InteractorError::ProofGeneration {
            circuit: C::ID,
            source,
        })
    }

    /// Verify the proof carried by `input`.
    pub fn verify_proof<C: Circuit>(
        &self,
        input: &C::VerifyInput,
    ) -> Result<bool, InteractorError> {
        self.ensure_keys::<C>()?;
        let public = input.public_args();
        tracing::debug!(circuit = C::ID, public_args = public.len(), "verifying proof");
        self.backend
            .verify_proof(C::ID, &public, input.proof(), input.verification_key_path())
            .map_err(|source| InteractorError::ProofVerification {
                circuit: C::ID,
                source,
            })
    }
}
