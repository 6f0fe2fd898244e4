//! # Error Types
//!
//! One `thiserror` enum per layer. [`ProviderError`] is the only type that
//! crosses the public provider boundary; it carries the [`ErrorKind`] of
//! the underlying failure, a message naming the offending input fields
//! (never their values) and the original error as its source.

use std::path::PathBuf;

use thiserror::Error;
use zkc_core::{CanonicalizationError, ErrorKind, FieldError};

use crate::input::PublicInput;
use crate::keys::KeyParams;

/// A public-input bundle could not be mapped to a circuit input.
#[derive(Error, Debug)]
pub enum MapperError {
    /// A required field is absent.
    #[error("missing public input field `{field}`")]
    Missing {
        /// Field name.
        field: String,
    },

    /// A field is present with the wrong value kind.
    #[error("public input field `{field}` must be {expected}, found {found}")]
    WrongKind {
        /// Field name.
        field: String,
        /// Expected kind.
        expected: &'static str,
        /// Kind found.
        found: &'static str,
    },

    /// A field has the right kind but an unacceptable value.
    #[error("public input field `{field}` is invalid: {reason}")]
    Invalid {
        /// Field name.
        field: String,
        /// What is wrong with it.
        reason: String,
    },

    /// A field could not be encoded into the scalar field.
    #[error("public input field `{field}` could not be encoded")]
    Conversion {
        /// Field name.
        field: String,
        /// Encoding failure.
        #[source]
        source: FieldError,
    },
}

impl MapperError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Conversion { source, .. } => source.kind(),
            _ => ErrorKind::MapperValidationFailure,
        }
    }

    /// Name of the offending field.
    pub fn field(&self) -> &str {
        match self {
            Self::Missing { field }
            | Self::WrongKind { field, .. }
            | Self::Invalid { field, .. }
            | Self::Conversion { field, .. } => field,
        }
    }
}

/// Failure reported by a [`ProvingBackend`](crate::ProvingBackend).
#[derive(Error, Debug)]
pub enum BackendError {
    /// Commitment keys could not be generated.
    #[error("commitment key generation failed: {0}")]
    KeyGeneration(String),

    /// A proof operation ran before keys were initialized.
    #[error("commitment keys are not initialized")]
    KeysNotInitialized,

    /// The backend has no circuit registered under this id.
    #[error("unknown circuit `{0}`")]
    UnknownCircuit(String),

    /// The witness does not satisfy the circuit.
    #[error("circuit `{circuit}` is not satisfied: {reason}")]
    Unsatisfied {
        /// Circuit id.
        circuit: String,
        /// Which constraint failed.
        reason: String,
    },

    /// Proof bytes have the wrong shape.
    #[error("malformed proof: {0}")]
    MalformedProof(String),

    /// Public arguments could not be canonicalized.
    #[error(transparent)]
    Canonicalization(#[from] CanonicalizationError),
}

/// Failure while driving a circuit through a backend.
#[derive(Error, Debug)]
pub enum InteractorError {
    /// The backend failed to generate commitment keys.
    #[error("proving system initialization failed for {requested}")]
    KeyInitialization {
        /// Parameters that were requested.
        requested: KeyParams,
        /// Backend failure.
        #[source]
        source: BackendError,
    },

    /// Keys are already initialized with parameters that cannot serve this request.
    #[error("commitment keys initialized for {initialized} cannot serve {requested}")]
    ConflictingKeyRequest {
        /// Parameters already in place.
        initialized: KeyParams,
        /// Parameters requested now.
        requested: KeyParams,
    },

    /// Proof generation failed.
    #[error("proof generation failed for circuit `{circuit}`")]
    ProofGeneration {
        /// Circuit id.
        circuit: &'static str,
        /// Backend failure.
        #[source]
        source: BackendError,
    },

    /// Proof verification could not be evaluated.
    #[error("proof verification failed for circuit `{circuit}`")]
    ProofVerification {
        /// Circuit id.
        circuit: &'static str,
        /// Backend failure.
        #[source]
        source: BackendError,
    },
}

impl InteractorError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::KeyInitialization { .. } | Self::ConflictingKeyRequest { .. } => {
                ErrorKind::ProvingSystemInitializationFailure
            }
            Self::ProofGeneration { .. } => ErrorKind::ProofGenerationFailure,
            Self::ProofVerification { .. } => ErrorKind::ProofVerificationFailure,
        }
    }
}

/// The single error type returned by [`ProverProvider`](crate::ProverProvider)
/// and [`VerifierProvider`](crate::VerifierProvider).
#[derive(Error, Debug)]
#[error("{kind}: {message}")]
pub struct ProviderError {
    kind: ErrorKind,
    message: String,
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync + 'static>>,
}

impl ProviderError {
    /// Classification of the underlying failure.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Human-readable description, naming the public input fields involved.
    pub fn message(&self) -> &str {
        &self.message
    }

    pub(crate) fn from_mapper(circuit: &str, err: MapperError, input: &PublicInput) -> Self {
        Self {
            kind: err.kind(),
            message: format!(
                "cannot map public input for circuit `{circuit}`: field `{}` rejected; input {input}",
                err.field()
            ),
            source: Some(Box::new(err)),
        }
    }

    pub(crate) fn from_initialization(err: InteractorError) -> Self {
        Self {
            kind: err.kind(),
            message: err.to_string(),
            source: Some(Box::new(err)),
        }
    }

    pub(crate) fn from_interactor(err: InteractorError, input: &PublicInput) -> Self {
        Self {
            kind: err.kind(),
            message: format!("{err}; input {input}"),
            source: Some(Box::new(err)),
        }
    }
}

/// Failure loading or validating [`ProvingConfig`](crate::ProvingConfig).
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("cannot read proving config {path}: {source}")]
    Io {
        /// File path.
        path: PathBuf,
        /// I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid YAML for this schema.
    #[error("invalid proving config YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// An environment override could not be parsed.
    #[error("environment variable {var} has invalid value {value:?}")]
    InvalidEnv {
        /// Variable name.
        var: &'static str,
        /// Raw value.
        value: String,
    },

    /// The values are inconsistent.
    #[error("invalid proving config: {0}")]
    Invalid(String),
}

impl ConfigError {
    /// Classify this error. A bad proving config prevents initialization.
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::ProvingSystemInitializationFailure
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mapper_kinds() {
        let err = MapperError::Missing { field: "birthYearPath".into() };
        assert_eq!(err.kind(), ErrorKind::MapperValidationFailure);
        assert_eq!(err.field(), "birthYearPath");

        let err = MapperError::Conversion {
            field: "documentId".into(),
            source: FieldError::ConversionFailure("hash".into()),
        };
        assert_eq!(err.kind(), ErrorKind::FieldElementConversionFailure);
    }

    #[test]
    fn interactor_kinds() {
        let err = InteractorError::KeyInitialization {
            requested: KeyParams { max_segment_size: 4, supported_segment_size: 2 },
            source: BackendError::KeyGeneration("boom".into()),
        };
        assert_eq!(err.kind(), ErrorKind::ProvingSystemInitializationFailure);
        assert!(err.kind().is_fatal());

        let err = InteractorError::ProofGeneration {
            circuit: "age",
            source: BackendError::KeysNotInitialized,
        };
        assert_eq!(err.kind(), ErrorKind::ProofGenerationFailure);
    }

    #[test]
    fn provider_error_keeps_source_and_names_fields() {
        let input = PublicInput::new().with("currentYear", crate::InputValue::Integer(2026));
        let err = ProviderError::from_mapper(
            "age-threshold",
            MapperError::Missing { field: "birthYearPath".into() },
            &input,
        );
        assert_eq!(err.kind(), ErrorKind::MapperValidationFailure);
        assert!(err.message().contains("birthYearPath"));
        assert!(err.message().contains("currentYear"));
        assert!(!err.message().contains("2026"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
