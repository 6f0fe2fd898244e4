//! # Prover and Verifier Providers
//!
//! The public entry points of the proof layer. A provider pairs a circuit's
//! [`CircuitDataMapper`] with a [`CircuitInteractor`]:
//!
//! ```text
//! create_proof(bundle) = interactor.generate_proof(mapper.map_proof_input(bundle))
//! verify_proof(bundle) = interactor.verify_proof(mapper.map_verify_input(bundle))
//! ```
//!
//! The mapped input lives only for the duration of the call and is dropped
//! (and its witness wiped) on every exit path. All failures surface as one
//! [`ProviderError`] carrying the underlying [`ErrorKind`](zkc_core::ErrorKind).
//!
//! Providers built from the same [`ProvingContext`] share one backend and one
//! [`CommitmentKeyCache`], so commitment keys are generated once for all of
//! them.

use std::sync::Arc;

use crate::error::ProviderError;
use crate::input::PublicInput;
use crate::interactor::CircuitInteractor;
use crate::keys::{CommitmentKeyCache, KeyParams};
use crate::traits::{Circuit, CircuitDataMapper, ProvingBackend};

/// Shared backend and key cache from which providers are built.
pub struct ProvingContext<B: ProvingBackend> {
    backend: Arc<B>,
    keys: Arc<CommitmentKeyCache>,
}

impl<B: ProvingBackend> ProvingContext<B> {
    /// Context over `backend` with a fresh key cache.
    pub fn new(backend: B) -> Self {
        Self {
            backend: Arc::new(backend),
            keys: Arc::new(CommitmentKeyCache::new()),
        }
    }

    /// The shared backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// The shared key cache.
    pub fn keys(&self) -> &CommitmentKeyCache {
        &self.keys
    }

    /// Initialize commitment keys up front, e.g. from
    /// [`ProvingConfig::key_params`](crate::ProvingConfig::key_params).
    /// Later circuit requests are served if these keys cover them.
    pub fn initialize(&self, params: KeyParams) -> Result<(), ProviderError> {
        self.keys
            .ensure(self.backend.as_ref(), params)
            .map_err(ProviderError::from_initialization)
    }

    fn interactor(&self) -> CircuitInteractor<B> {
        CircuitInteractor::new(Arc::clone(&self.backend), Arc::clone(&self.keys))
    }

    /// A prover for the mapper's circuit.
    pub fn prover<M: CircuitDataMapper>(&self, mapper: M) -> ProverProvider<M, B> {
        ProverProvider {
            mapper,
            interactor: self.interactor(),
        }
    }

    /// A verifier for the mapper's circuit.
    pub fn verifier<M: CircuitDataMapper>(&self, mapper: M) -> VerifierProvider<M, B> {
        VerifierProvider {
            mapper,
            interactor: self.interactor(),
        }
    }
}

/// Generates proofs from generic bundles.
pub struct ProverProvider<M: CircuitDataMapper, B: ProvingBackend> {
    mapper: M,
    interactor: CircuitInteractor<B>,
}

impl<M: CircuitDataMapper, B: ProvingBackend> ProverProvider<M, B> {
    /// Map `input` and prove it.
    pub fn create_proof(&self, input: &PublicInput) -> Result<Vec<u8>, ProviderError> {
        let circuit = <M::Circuit as Circuit>::ID;
        let mapped = self
            .mapper
            .map_proof_input(input)
            .map_err(|e| ProviderError::from_mapper(circuit, e, input))?;
        let proof = self
            .interactor
            .generate_proof::<M::Circuit>(&mapped)
            .map_err(|e| ProviderError::from_interactor(e, input));
        drop(mapped);

        match &proof {
            Ok(bytes) => tracing::info!(circuit, proof_bytes = bytes.len(), "proof created"),
            Err(e) => tracing::warn!(circuit, kind = %e.kind(), "proof creation failed"),
        }
        proof
    }
}

/// Checks proofs from generic bundles.
pub struct VerifierProvider<M: CircuitDataMapper, B: ProvingBackend> {
    mapper: M,
    interactor: CircuitInteractor<B>,
}

impl<M: CircuitDataMapper, B: ProvingBackend> VerifierProvider<M, B> {
    /// Map `input` and verify the proof it carries.
    pub fn verify_proof(&self, input: &PublicInput) -> Result<bool, ProviderError> {
        let circuit = <M::Circuit as Circuit>::ID;
        let mapped = self
            .mapper
            .map_verify_input(input)
            .map_err(|e| ProviderError::from_mapper(circuit, e, input))?;
        let valid = self
            .interactor
            .verify_proof::<M::Circuit>(&mapped)
            .map_err(|e| ProviderError::from_interactor(e, input));

        match &valid {
            Ok(valid) => tracing::info!(circuit, valid = *valid, "proof verified"),
            Err(e) => tracing::warn!(circuit, kind = %e.kind(), "proof verification failed"),
        }
        valid
    }
}
