//! # Commitment Key Initialization
//!
//! Commitment-key generation is expensive and process-global in a real
//! proving runtime. [`CommitmentKeyCache`] runs it at most once per cache:
//! the first request calls the backend, later requests that the existing
//! keys can serve return immediately.
//!
//! A request the existing keys cannot serve, or a backend failure, is a
//! fatal [`InteractorError`] of kind `ProvingSystemInitializationFailure`.
//! The cache does not retry; a failed initialization leaves it empty.

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::error::InteractorError;
use crate::traits::ProvingBackend;

/// Segment sizes commitment keys were generated for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyParams {
    /// Largest segment size.
    pub max_segment_size: usize,
    /// Segment size circuits are compiled for.
    pub supported_segment_size: usize,
}

impl KeyParams {
    /// True if keys generated for `self` can serve `other`.
    pub fn covers(&self, other: &KeyParams) -> bool {
        other.max_segment_size <= self.max_segment_size
            && other.supported_segment_size <= self.supported_segment_size
    }
}

impl std::fmt::Display for KeyParams {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "max={} supported={}",
            self.max_segment_size, self.supported_segment_size
        )
    }
}

/// Once-per-cache commitment key initialization.
#[derive(Debug, Default)]
pub struct CommitmentKeyCache {
    initialized: Mutex<Option<KeyParams>>,
}

impl CommitmentKeyCache {
    /// Empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parameters of the initialized keys, if any.
    pub fn initialized(&self) -> Option<KeyParams> {
        *self.initialized.lock()
    }

    /// Make sure keys covering `requested` exist, generating them on first use.
    pub fn ensure<B: ProvingBackend + ?Sized>(
        &self,
        backend: &B,
        requested: KeyParams,
    ) -> Result<(), InteractorError> {
        let mut guard = self.initialized.lock();
        match *guard {
            Some(initialized) if initialized.covers(&requested) => Ok(()),
            Some(initialized) => {
                tracing::error!(%initialized, %requested, "commitment key request conflicts with initialized keys");
                Err(InteractorError::ConflictingKeyRequest {
                    initialized,
                    requested,
                })
            }
            None => {
                backend
                    .generate_dlog_keys(requested.max_segment_size, requested.supported_segment_size)
                    .map_err(|source| {
                        tracing::error!(%requested, error = %source, "commitment key generation failed");
                        InteractorError::KeyInitialization { requested, source }
                    })?;
                tracing::info!(%requested, "commitment keys initialized");
                *guard = Some(requested);
                Ok(())
            }
        }
    }
}
