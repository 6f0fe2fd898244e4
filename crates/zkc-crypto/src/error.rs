//! Error type for the cryptographic primitives.

use thiserror::Error;
use zkc_core::{ErrorKind, FieldError};

/// Failure in encoding, hashing, tree construction or signatures.
#[derive(Error, Debug)]
pub enum CryptoError {
    /// A value could not be encoded into the field.
    #[error(transparent)]
    Field(#[from] FieldError),

    /// The Poseidon accumulator could not produce a digest.
    #[error("hash finalization failed: {0}")]
    HashFinalization(String),

    /// More leaves than the fixed tree height can hold.
    #[error("merkle tree capacity exceeded: {leaves} leaves, capacity {capacity}")]
    TreeCapacityExceeded {
        /// Number of leaves supplied.
        leaves: usize,
        /// Maximum number of leaves.
        capacity: usize,
    },

    /// An inclusion path was requested for a position outside the tree.
    #[error("leaf index {index} out of range for {leaves} leaves")]
    LeafIndexOutOfRange {
        /// Requested position.
        index: usize,
        /// Number of committed leaves.
        leaves: usize,
    },

    /// An inclusion path does not have one step per tree level.
    #[error("merkle path has {actual} steps, expected {expected}")]
    MalformedPath {
        /// Steps found.
        actual: usize,
        /// Steps required.
        expected: usize,
    },

    /// Signature bytes could not be parsed.
    #[error("signature error: {0}")]
    SignatureError(String),

    /// Key generation or parsing failed.
    #[error("key error: {0}")]
    KeyError(String),
}

impl CryptoError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Field(e) => e.kind(),
            Self::HashFinalization(_) => ErrorKind::HashFinalizationFailure,
            Self::TreeCapacityExceeded { .. } => ErrorKind::FieldElementConversionFailure,
            Self::LeafIndexOutOfRange { .. } | Self::MalformedPath { .. } => {
                ErrorKind::MapperValidationFailure
            }
            Self::SignatureError(_) | Self::KeyError(_) => ErrorKind::SignatureFailure,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_errors_keep_their_kind() {
        let err: CryptoError = FieldError::UnsupportedFieldType { type_name: "float" }.into();
        assert_eq!(err.kind(), ErrorKind::UnsupportedFieldType);
        assert!(err.to_string().contains("float"));
    }

    #[test]
    fn hash_finalization_is_fatal() {
        let err = CryptoError::HashFinalization("no inputs".into());
        assert!(err.kind().is_fatal());
    }
}
