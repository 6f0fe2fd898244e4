//! # Error Types — Shared Error Taxonomy
//!
//! Every crate in the workspace defines its own `thiserror` enum, but all of
//! them report one of the [`ErrorKind`] variants through a `kind()` method.
//! The provider boundary in `zkc-zkp` uses the kind to produce a single,
//! stable error classification for callers.
//!
//! ## Design
//!
//! - Conversion errors name the offending type, never the offending value
//!   (attribute values may be personal data).
//! - Fatal kinds ([`ErrorKind::HashFinalizationFailure`],
//!   [`ErrorKind::ProvingSystemInitializationFailure`]) abort the current call.
//!   Nothing in the workspace retries them.

use thiserror::Error;

/// Stable classification of every failure the stack can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A value has no declared canonical field encoding (e.g. floats).
    UnsupportedFieldType,
    /// A supported value could not be turned into a field element.
    FieldElementConversionFailure,
    /// The hash accumulator could not be finalized. Fatal for the call.
    HashFinalizationFailure,
    /// A public-input bundle is missing a field or has a malformed one.
    MapperValidationFailure,
    /// Commitment keys could not be initialized. Fatal configuration error.
    ProvingSystemInitializationFailure,
    /// The proving runtime failed to produce a proof.
    ProofGenerationFailure,
    /// The proving runtime failed to evaluate a proof.
    ProofVerificationFailure,
    /// A signature could not be produced or parsed.
    SignatureFailure,
    /// A document was signed a second time.
    AlreadySigned,
    /// JSON/YAML (de)serialization failed.
    Serialization,
}

impl ErrorKind {
    /// Returns `true` for kinds that are unrecoverable for the current call.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::HashFinalizationFailure | Self::ProvingSystemInitializationFailure
        )
    }

    /// Returns the kind identifier string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UnsupportedFieldType => "UnsupportedFieldType",
            Self::FieldElementConversionFailure => "FieldElementConversionFailure",
            Self::HashFinalizationFailure => "HashFinalizationFailure",
            Self::MapperValidationFailure => "MapperValidationFailure",
            Self::ProvingSystemInitializationFailure => "ProvingSystemInitializationFailure",
            Self::ProofGenerationFailure => "ProofGenerationFailure",
            Self::ProofVerificationFailure => "ProofVerificationFailure",
            Self::SignatureFailure => "SignatureFailure",
            Self::AlreadySigned => "AlreadySigned",
            Self::Serialization => "Serialization",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error while encoding a value into, or decoding one from, the scalar field.
#[derive(Error, Debug)]
pub enum FieldError {
    /// The value's type has no canonical field encoding.
    #[error("unsupported field type: {type_name} has no canonical field encoding")]
    UnsupportedFieldType {
        /// Name of the rejected attribute type.
        type_name: &'static str,
    },

    /// The value is of a supported type but could not be converted.
    #[error("field element conversion failed: {0}")]
    ConversionFailure(String),
}

impl FieldError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::UnsupportedFieldType { .. } => ErrorKind::UnsupportedFieldType,
            Self::ConversionFailure(_) => ErrorKind::FieldElementConversionFailure,
        }
    }
}

/// Error during canonical serialization.
#[derive(Error, Debug)]
pub enum CanonicalizationError {
    /// Float values are not permitted in canonical representations.
    #[error("float values are not permitted in canonical representations: {0}")]
    FloatRejected(f64),

    /// JSON serialization failed.
    #[error("serialization failed: {0}")]
    SerializationFailed(#[from] serde_json::Error),
}

/// Error while parsing or constructing temporal values.
#[derive(Error, Debug)]
pub enum TemporalError {
    /// The string is not an RFC 3339 UTC timestamp.
    #[error("invalid timestamp {0:?}: {1}")]
    InvalidTimestamp(String, String),

    /// The year/month/day triple is not a calendar date.
    #[error("invalid calendar date {year:04}-{month:02}-{day:02}")]
    InvalidDate {
        /// Year component.
        year: u32,
        /// Month component (1-12).
        month: u32,
        /// Day component (1-31).
        day: u32,
    },
}
