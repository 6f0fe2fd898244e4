//! # Generic Public Input Bundle
//!
//! A [`PublicInput`] is a named bag of values, independent of any circuit.
//! Holders and verifiers fill it; a circuit's
//! [`CircuitDataMapper`](crate::CircuitDataMapper) validates it and turns it
//! into that circuit's typed input.
//!
//! The bundle may hold witness values (birth dates, signatures) on the
//! prover side. Its `Debug` and `Display` output therefore lists field
//! names and value kinds only.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use zkc_core::FieldElement;
use zkc_crypto::{Ed25519PublicKey, Ed25519Signature, MerklePath};

use crate::error::MapperError;

/// One value of a [`PublicInput`].
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum InputValue {
    /// Signed integer (dates, thresholds).
    Integer(i64),
    /// Scalar field element.
    Field(FieldElement),
    /// UTF-8 text (identifiers).
    Text(String),
    /// Ed25519 public key.
    PublicKey(Ed25519PublicKey),
    /// Ed25519 signature.
    Signature(Ed25519Signature),
    /// Merkle inclusion path.
    MerklePath(MerklePath),
    /// Opaque bytes (proofs), hex in JSON.
    Bytes(#[serde(with = "hex_bytes")] Vec<u8>),
    /// Filesystem reference (proving/verification keys). Never opened here.
    Path(PathBuf),
}

impl InputValue {
    /// Name of the value kind, for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Integer(_) => "integer",
            Self::Field(_) => "field",
            Self::Text(_) => "text",
            Self::PublicKey(_) => "publicKey",
            Self::Signature(_) => "signature",
            Self::MerklePath(_) => "merklePath",
            Self::Bytes(_) => "bytes",
            Self::Path(_) => "path",
        }
    }
}

impl std::fmt::Debug for InputValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "InputValue::{}(..)", self.kind())
    }
}

/// Named, circuit-independent input bundle.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PublicInput {
    fields: BTreeMap<String, InputValue>,
}

impl PublicInput {
    /// Empty bundle.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, name: impl Into<String>, value: InputValue) -> Self {
        self.insert(name, value);
        self
    }

    /// Insert or replace a field.
    pub fn insert(&mut self, name: impl Into<String>, value: InputValue) -> Option<InputValue> {
        self.fields.insert(name.into(), value)
    }

    /// Remove a field.
    pub fn remove(&mut self, name: &str) -> Option<InputValue> {
        self.fields.remove(name)
    }

    /// Look up a field.
    pub fn get(&self, name: &str) -> Option<&InputValue> {
        self.fields.get(name)
    }

    /// Field names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if the bundle has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Look up a field that must be present.
    pub fn require(&self, name: &str) -> Result<&InputValue, MapperError> {
        self.get(name).ok_or_else(|| MapperError::Missing {
            field: name.to_string(),
        })
    }

    /// Required integer.
    pub fn integer(&self, name: &str) -> Result<i64, MapperError> {
        match self.require(name)? {
            InputValue::Integer(v) => Ok(*v),
            other => Err(wrong_kind(name, "integer", other)),
        }
    }

    /// Required field element.
    pub fn field(&self, name: &str) -> Result<FieldElement, MapperError> {
        match self.require(name)? {
            InputValue::Field(v) => Ok(*v),
            other => Err(wrong_kind(name, "field", other)),
        }
    }

    /// Required text.
    pub fn text(&self, name: &str) -> Result<&str, MapperError> {
        match self.require(name)? {
            InputValue::Text(v) => Ok(v),
            other => Err(wrong_kind(name, "text", other)),
        }
    }

    /// Required public key.
    pub fn public_key(&self, name: &str) -> Result<&Ed25519PublicKey, MapperError> {
        match self.require(name)? {
            InputValue::PublicKey(v) => Ok(v),
            other => Err(wrong_kind(name, "publicKey", other)),
        }
    }

    /// Required signature.
    pub fn signature(&self, name: &str) -> Result<&Ed25519Signature, MapperError> {
        match self.require(name)? {
            InputValue::Signature(v) => Ok(v),
            other => Err(wrong_kind(name, "signature", other)),
        }
    }

    /// Required Merkle path.
    pub fn merkle_path(&self, name: &str) -> Result<&MerklePath, MapperError> {
        match self.require(name)? {
            InputValue::MerklePath(v) => Ok(v),
            other => Err(wrong_kind(name, "merklePath", other)),
        }
    }

    /// Required bytes.
    pub fn bytes(&self, name: &str) -> Result<&[u8], MapperError> {
        match self.require(name)? {
            InputValue::Bytes(v) => Ok(v),
            other => Err(wrong_kind(name, "bytes", other)),
        }
    }

    /// Required path.
    pub fn path(&self, name: &str) -> Result<&Path, MapperError> {
        match self.require(name)? {
            InputValue::Path(v) => Ok(v),
            other => Err(wrong_kind(name, "path", other)),
        }
    }
}

fn wrong_kind(name: &str, expected: &'static str, found: &InputValue) -> MapperError {
    MapperError::WrongKind {
        field: name.to_string(),
        expected,
        found: found.kind(),
    }
}

impl std::fmt::Display for PublicInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("{")?;
        for (i, (name, value)) in self.fields.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{name}: {}", value.kind())?;
        }
        f.write_str("}")
    }
}

impl std::fmt::Debug for PublicInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PublicInput{self}")
    }
}

/// Serde helper for hex-encoded byte vectors.
pub(crate) mod hex_bytes {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&zkc_core::hex::encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<u8>, D::Error> {
        let hex = String::deserialize(d)?;
        zkc_core::hex::decode(&hex).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bundle() -> PublicInput {
        PublicInput::new()
            .with("currentYear", InputValue::Integer(2026))
            .with("documentId", InputValue::Text("urn:uuid:secret-holder".into()))
            .with("proof", InputValue::Bytes(vec![0xab; 4]))
    }

    #[test]
    fn typed_accessors() {
        let b = bundle();
        assert_eq!(b.integer("currentYear").unwrap(), 2026);
        assert_eq!(b.text("documentId").unwrap(), "urn:uuid:secret-holder");
        assert_eq!(b.bytes("proof").unwrap(), &[0xab; 4]);
        assert_eq!(b.len(), 3);
    }

    #[test]
    fn missing_and_wrong_kind() {
        let b = bundle();
        assert!(matches!(b.integer("currentMonth"), Err(MapperError::Missing { .. })));
        match b.integer("documentId") {
            Err(MapperError::WrongKind { expected, found, .. }) => {
                assert_eq!(expected, "integer");
                assert_eq!(found, "text");
            }
            other => panic!("expected WrongKind, got {other:?}"),
        }
    }

    #[test]
    fn display_and_debug_hide_values() {
        let b = bundle();
        let shown = format!("{b} {b:?}");
        assert!(shown.contains("documentId: text"));
        assert!(!shown.contains("secret-holder"));
        assert!(!shown.contains("2026"));
    }

    #[test]
    fn json_round_trip() {
        let b = bundle();
        let json = serde_json::to_string(&b).unwrap();
        assert!(json.contains(r#""proof":{"kind":"bytes","value":"abababab"}"#));
        let back: PublicInput = serde_json::from_str(&json).unwrap();
        assert_eq!(back, b);
    }
}
