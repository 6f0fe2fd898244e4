//! # Ed25519 Signing and Verification
//!
//! Signs the zero-knowledge signature challenge. The message is always a
//! [`FieldElement`], signed over its canonical 32-byte serialization, so
//! the signer and the in-circuit verifier agree on the exact bytes.
//!
//! ## Security Invariant
//!
//! - Private keys are never serialized or logged. `Ed25519KeyPair` does not
//!   implement `Serialize` and its `Debug` output is redacted.
//! - A signature that does not verify is `Ok(false)`, not an error. Errors
//!   are reserved for inputs that cannot be parsed at all.
//!
//! ## Serde
//!
//! Public keys and signatures serialize as lowercase hex strings.

use ed25519_dalek::{Signer, Verifier};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use zkc_core::{hex, FieldElement};

use crate::error::CryptoError;

/// An Ed25519 public key (32 bytes).
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Ed25519PublicKey(pub [u8; 32]);

/// An Ed25519 signature (64 bytes).
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Ed25519Signature(pub [u8; 64]);

/// An Ed25519 key pair for signing operations.
pub struct Ed25519KeyPair {
    signing_key: ed25519_dalek::SigningKey,
}

// ---------------------------------------------------------------------------
// Ed25519PublicKey impls
// ---------------------------------------------------------------------------

impl Ed25519PublicKey {
    /// Create a public key from raw 32 bytes.
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Return the raw 32-byte public key.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Render the public key as a lowercase hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(&self.0)
    }

    /// Parse a public key from a 64-character hex string.
    pub fn from_hex(s: &str) -> Result<Self, CryptoError> {
        hex::decode_array::<32>(s)
            .map(Self)
            .map_err(|e| CryptoError::KeyError(format!("public key: {e}")))
    }

    /// Convert to an `ed25519_dalek::VerifyingKey`.
    pub fn to_verifying_key(&self) -> Result<ed25519_dalek::VerifyingKey, CryptoError> {
        ed25519_dalek::VerifyingKey::from_bytes(&self.0)
            .map_err(|e| CryptoError::KeyError(format!("invalid public key: {e}")))
    }
}

impl Serialize for Ed25519PublicKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Ed25519PublicKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

impl std::fmt::Debug for Ed25519PublicKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Ed25519PublicKey({}...)", hex::prefix(&self.0))
    }
}

impl std::fmt::Display for Ed25519PublicKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

// ---------------------------------------------------------------------------
// Ed25519Signature impls
// ---------------------------------------------------------------------------

impl Ed25519Signature {
    /// Create a signature from raw 64 bytes.
    pub fn from_bytes(bytes: [u8; 64]) -> Self {
        Self(bytes)
    }

    /// Return the raw 64-byte signature.
    pub fn as_bytes(&self) -> &[u8; 64] {
        &self.0
    }

    /// Render the signature as a lowercase hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(&self.0)
    }

    /// Parse a signature from a 128-character hex string.
    pub fn from_hex(s: &str) -> Result<Self, CryptoError> {
        hex::decode_array::<64>(s)
            .map(Self)
            .map_err(|e| CryptoError::SignatureError(format!("signature: {e}")))
    }
}

impl Serialize for Ed25519Signature {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Ed25519Signature {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

impl std::fmt::Debug for Ed25519Signature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Ed25519Signature({}...)", hex::prefix(&self.0))
    }
}

impl std::fmt::Display for Ed25519Signature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

// ---------------------------------------------------------------------------
// Ed25519KeyPair impls
// ---------------------------------------------------------------------------

impl Ed25519KeyPair {
    /// Generate a new random key pair from the OS RNG.
    pub fn generate() -> Self {
        let mut csprng = rand::rngs::OsRng;
        Self {
            signing_key: ed25519_dalek::SigningKey::generate(&mut csprng),
        }
    }

    /// Create a key pair from a raw 32-byte secret seed.
    pub fn from_seed(seed: &[u8; 32]) -> Self {
        Self {
            signing_key: ed25519_dalek::SigningKey::from_bytes(seed),
        }
    }

    /// The public half.
    pub fn public_key(&self) -> Ed25519PublicKey {
        Ed25519PublicKey(self.signing_key.verifying_key().to_bytes())
    }

    /// Sign the canonical bytes of a field element.
    pub fn sign(&self, message: &FieldElement) -> Ed25519Signature {
        let sig = self.signing_key.sign(&message.to_bytes());
        Ed25519Signature(sig.to_bytes())
    }
}

impl std::fmt::Debug for Ed25519KeyPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Ed25519KeyPair(<private>)")
    }
}

// ---------------------------------------------------------------------------
// Verification
// ---------------------------------------------------------------------------

/// Verify a signature over a field element.
///
/// Returns `Ok(false)` for a well-formed signature that does not match, and
/// `Err(CryptoError::KeyError)` if the public key is not a curve point.
pub fn verify(
    message: &FieldElement,
    signature: &Ed25519Signature,
    public_key: &Ed25519PublicKey,
) -> Result<bool, CryptoError> {
    let vk = public_key.to_verifying_key()?;
    let sig = ed25519_dalek::Signature::from_bytes(&signature.0);
    Ok(vk.verify(&message.to_bytes(), &sig).is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sign_and_verify() {
        let kp = Ed25519KeyPair::generate();
        let msg = FieldElement::from_u64(42);
        let sig = kp.sign(&msg);
        assert!(verify(&msg, &sig, &kp.public_key()).unwrap());
    }

    #[test]
    fn wrong_message_or_key_is_false() {
        let kp = Ed25519KeyPair::generate();
        let other = Ed25519KeyPair::generate();
        let msg = FieldElement::from_u64(42);
        let sig = kp.sign(&msg);
        assert!(!verify(&FieldElement::from_u64(43), &sig, &kp.public_key()).unwrap());
        assert!(!verify(&msg, &sig, &other.public_key()).unwrap());
    }

    #[test]
    fn seed_is_deterministic() {
        let a = Ed25519KeyPair::from_seed(&[7u8; 32]);
        let b = Ed25519KeyPair::from_seed(&[7u8; 32]);
        assert_eq!(a.public_key(), b.public_key());
        let msg = FieldElement::from_u64(1);
        assert_eq!(a.sign(&msg), b.sign(&msg));
    }

    #[test]
    fn hex_serde_round_trip() {
        let kp = Ed25519KeyPair::from_seed(&[1u8; 32]);
        let pk = kp.public_key();
        let json = serde_json::to_string(&pk).unwrap();
        let back: Ed25519PublicKey = serde_json::from_str(&json).unwrap();
        assert_eq!(back, pk);

        let sig = kp.sign(&FieldElement::from_u64(9));
        let back = Ed25519Signature::from_hex(&sig.to_hex()).unwrap();
        assert_eq!(back, sig);
    }

    #[test]
    fn malformed_hex_rejected() {
        assert!(Ed25519PublicKey::from_hex("abcd").is_err());
        assert!(Ed25519Signature::from_hex(&"0".repeat(127)).is_err());
    }

    #[test]
    fn debug_redacts_private_key() {
        let kp = Ed25519KeyPair::generate();
        assert_eq!(format!("{kp:?}"), "Ed25519KeyPair(<private>)");
    }
}
