//! # zkc-zkp — Proof Layer
//!
//! Turns a generic, named [`PublicInput`] bundle into a proof for a specific
//! circuit, and checks such proofs.
//!
//! ## Architecture
//!
//! ```text
//! PublicInput ──► CircuitDataMapper ──► Circuit::ProofInput ──► CircuitInteractor ──► ProvingBackend
//!   (named)          (validates)          (typed, zeroized)       (positional args)       (opaque)
//! ```
//!
//! - **Traits** (`traits.rs`): the [`ProvingBackend`] seam, the [`Circuit`]
//!   description and the [`CircuitDataMapper`] contract.
//! - **Keys** (`keys.rs`): commitment-key initialization, run once per
//!   [`CommitmentKeyCache`].
//! - **Transparent backend** (`transparent.rs`): deterministic reference
//!   runtime. **Provides no zero-knowledge and no soundness.** It exists so
//!   the whole pipeline can run and be tested without a SNARK runtime.
//! - **Circuits** (`circuits/`): the age-threshold circuit and its mapper.
//! - **Providers** (`provider.rs`): the public [`ProverProvider`] /
//!   [`VerifierProvider`] entry points, with one error type for callers.
//!
//! ## Crate Policy
//!
//! - Mapped circuit inputs own witness values and wipe them on drop.
//! - Witness values never appear in logs or error messages; only field
//!   names do.

pub mod circuits;
pub mod config;
pub mod error;
pub mod input;
pub mod interactor;
pub mod keys;
pub mod provider;
pub mod traits;
pub mod transparent;

pub use circuits::age::{AgeCircuit, AgeDataMapper, AgeProofRequest, AgeVerifyRequest};
pub use config::ProvingConfig;
pub use error::{BackendError, ConfigError, InteractorError, MapperError, ProviderError};
pub use input::{InputValue, PublicInput};
pub use interactor::CircuitInteractor;
pub use keys::{CommitmentKeyCache, KeyParams};
pub use provider::{ProverProvider, ProvingContext, VerifierProvider};
pub use traits::{
    Circuit, CircuitArg, CircuitDataMapper, ProofArguments, ProvingBackend, VerifyArguments,
};
pub use transparent::TransparentBackend;
