//! # Field Elements and Credential Leaves
//!
//! [`FieldElement`] is the canonical value exchanged between the codec, the
//! hash accumulator, the merkle tree and the proving runtime. It wraps the
//! BN254 scalar field (`ark_bn254::Fr`).
//!
//! ## Canonical Serialization
//!
//! 32 bytes, little-endian, always reduced. Deserialization rejects values
//! at or above the modulus, so every byte string accepted by
//! [`FieldElement::from_bytes`] has exactly one preimage.
//!
//! ## Leaves
//!
//! A [`Leaf`] is an attribute label paired with an [`AttributeValue`].
//! Leaves are plain data; turning them into field elements is the job of the
//! codec in `zkc-crypto`, which rejects [`AttributeValue::Float`].

use ark_bn254::Fr;
use ark_ff::{BigInteger, PrimeField};
use ark_serialize::CanonicalDeserialize;
use ark_std::UniformRand;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use zeroize::Zeroize;

use crate::error::FieldError;
use crate::hex;

/// Length of the canonical field element serialization.
pub const FIELD_ELEMENT_BYTES: usize = 32;

/// A canonical element of the BN254 scalar field.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldElement(Fr);

impl FieldElement {
    /// The additive identity. Used as the merkle padding leaf.
    pub fn zero() -> Self {
        Self(Fr::from(0u64))
    }

    /// Embed an unsigned integer.
    pub fn from_u64(value: u64) -> Self {
        Self(Fr::from(value))
    }

    /// Embed a signed integer; negative values map to `p - |value|`.
    pub fn from_i64(value: i64) -> Self {
        Self(Fr::from(value))
    }

    /// Interpret big-endian bytes as an integer and reduce it mod `p`.
    ///
    /// Callers that need injectivity must keep the input below the modulus
    /// (at most 31 bytes, or 32 bytes with a top byte below `0x30`).
    pub fn from_be_bytes_mod_order(bytes: &[u8]) -> Self {
        Self(Fr::from_be_bytes_mod_order(bytes))
    }

    /// Sample a uniformly random element from the OS-seeded thread RNG.
    pub fn random() -> Self {
        Self(Fr::rand(&mut rand::thread_rng()))
    }

    /// Wrap a raw arkworks scalar.
    pub fn from_fr(fr: Fr) -> Self {
        Self(fr)
    }

    /// Access the raw arkworks scalar (for the hash backend).
    pub fn as_fr(&self) -> &Fr {
        &self.0
    }

    /// Canonical 32-byte little-endian serialization.
    pub fn to_bytes(&self) -> [u8; FIELD_ELEMENT_BYTES] {
        let le = self.0.into_bigint().to_bytes_le();
        let mut out = [0u8; FIELD_ELEMENT_BYTES];
        let n = le.len().min(FIELD_ELEMENT_BYTES);
        out[..n].copy_from_slice(&le[..n]);
        out
    }

    /// Parse the canonical 32-byte serialization.
    ///
    /// # Errors
    ///
    /// Returns [`FieldError::ConversionFailure`] for a wrong length or a
    /// non-reduced value.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, FieldError> {
        if bytes.len() != FIELD_ELEMENT_BYTES {
            return Err(FieldError::ConversionFailure(format!(
                "field element must be {FIELD_ELEMENT_BYTES} bytes, got {}",
                bytes.len()
            )));
        }
        Fr::deserialize_compressed(bytes)
            .map(Self)
            .map_err(|e| FieldError::ConversionFailure(format!("non-canonical field element: {e}")))
    }

    /// Lowercase hex of the canonical serialization.
    pub fn to_hex(&self) -> String {
        hex::encode(&self.to_bytes())
    }

    /// Parse the lowercase (or uppercase) hex form.
    pub fn from_hex(s: &str) -> Result<Self, FieldError> {
        let bytes = hex::decode(s).map_err(FieldError::ConversionFailure)?;
        Self::from_bytes(&bytes)
    }
}

impl Default for FieldElement {
    fn default() -> Self {
        Self::zero()
    }
}

impl Zeroize for FieldElement {
    fn zeroize(&mut self) {
        self.0.zeroize();
    }
}

impl std::fmt::Debug for FieldElement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "FieldElement({})", self.to_hex())
    }
}

impl std::fmt::Display for FieldElement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Serialize for FieldElement {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for FieldElement {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

/// A credential attribute value as it appears in a credential subject.
///
/// `Float` is representable so that untyped input (JSON numbers) can be
/// carried up to the codec and rejected there with a typed error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    /// `true` / `false`.
    Boolean(bool),
    /// Fixed-width signed integer (calendar fields, thresholds, ages).
    Integer(i64),
    /// Floating point. Has no canonical field encoding.
    Float(f64),
    /// UTF-8 string.
    String(String),
}

impl AttributeValue {
    /// Name of the attribute type, used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Boolean(_) => "boolean",
            Self::Integer(_) => "integer",
            Self::Float(_) => "float",
            Self::String(_) => "string",
        }
    }
}

impl From<&str> for AttributeValue {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<i64> for AttributeValue {
    fn from(v: i64) -> Self {
        Self::Integer(v)
    }
}

impl From<u32> for AttributeValue {
    fn from(v: u32) -> Self {
        Self::Integer(i64::from(v))
    }
}

impl From<bool> for AttributeValue {
    fn from(v: bool) -> Self {
        Self::Boolean(v)
    }
}

impl From<f64> for AttributeValue {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

/// One committed attribute: `(label, value)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Leaf {
    /// Attribute label as declared by the subject schema.
    pub label: String,
    /// Attribute value.
    pub value: AttributeValue,
}

impl Leaf {
    /// Build a leaf from anything convertible into a label and a value.
    pub fn new(label: impl Into<String>, value: impl Into<AttributeValue>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}
