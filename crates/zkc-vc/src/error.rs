//! Errors from credential signing and verification.

use thiserror::Error;
use zkc_core::ErrorKind;
use zkc_crypto::CryptoError;

/// Errors from zero-knowledge signature operations.
#[derive(Error, Debug)]
pub enum VcError {
    /// Leaf encoding, hashing or tree construction failed.
    #[error(transparent)]
    Crypto(#[from] CryptoError),

    /// `sign` was called on a document that already carries a signature.
    #[error("credential {0} is already signed")]
    AlreadySigned(String),

    /// Verification was requested on a document without a signature.
    #[error("credential {0} has no zkSignature")]
    NotSigned(String),

    /// The signature object names an unknown signature suite.
    #[error("unsupported zkSignature type: {0}")]
    UnsupportedSignatureType(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl VcError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Crypto(e) => e.kind(),
            Self::AlreadySigned(_) => ErrorKind::AlreadySigned,
            Self::NotSigned(_) | Self::UnsupportedSignatureType(_) => ErrorKind::SignatureFailure,
            Self::Json(_) => ErrorKind::Serialization,
        }
    }
}
