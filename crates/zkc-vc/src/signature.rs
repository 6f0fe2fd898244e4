//! # Zero-Knowledge Signature
//!
//! Binds a document identity to the Merkle root of its attributes:
//!
//! ```text
//! challenge = Hash2(FE(document.id), root(extract(document.credentialSubject)))
//! zkSignature = Ed25519.sign(challenge)
//! ```
//!
//! The root itself is never stored in the document. Verifiers recompute it,
//! so a changed attribute or a changed id yields a different challenge and
//! the stored signature no longer verifies.
//!
//! ## Lifecycle
//!
//! `Unsigned → Signed`. `Signed` is terminal: [`sign`] on a signed document
//! fails with [`VcError::AlreadySigned`] and leaves it untouched.
//!
//! ## Failure Modes
//!
//! | Condition | Result |
//! |-----------|--------|
//! | a leaf cannot be encoded | `Err`, kind `UnsupportedFieldType` / `FieldElementConversionFailure` |
//! | Poseidon cannot finalize | `Err`, kind `HashFinalizationFailure` (fatal) |
//! | signature does not match | `Ok(false)` |

use serde::{Deserialize, Serialize};
use zkc_core::{FieldElement, Timestamp};
use zkc_crypto::{
    ed25519, hash2, label_to_field_element, CryptoError, Ed25519KeyPair, Ed25519PublicKey,
    Ed25519Signature, MerkleTree,
};

use crate::credential::ZkCredential;
use crate::error::VcError;
use crate::subject::{extract, CredentialSubject};

/// Signature suite identifier written into `zkSignature.type`.
pub const ZK_SIGNATURE_TYPE: &str = "ZkMerkleEd25519Signature2024";

/// The `zkSignature` property of a signed document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZkSignature {
    /// Signature suite.
    #[serde(rename = "type")]
    pub signature_type: String,
    /// When the signature was produced.
    pub created: Timestamp,
    /// Ed25519 signature over the challenge bytes.
    pub signature_value: Ed25519Signature,
}

/// The tree and challenge a document's signature is bound to.
#[derive(Debug, Clone)]
pub struct SignatureBinding {
    /// Tree over `extract(credentialSubject)`.
    pub tree: MerkleTree,
    /// `Hash2(FE(id), root)`.
    pub challenge: FieldElement,
}

impl SignatureBinding {
    /// The committed root.
    pub fn root(&self) -> FieldElement {
        self.tree.root()
    }
}

/// `Hash2(FE(document_id), root)`.
pub fn challenge(document_id: &str, root: &FieldElement) -> Result<FieldElement, CryptoError> {
    hash2(&label_to_field_element(document_id)?, root)
}

/// Recompute the tree and challenge for a document.
pub fn bind<S: CredentialSubject>(document: &ZkCredential<S>) -> Result<SignatureBinding, VcError> {
    let leaves = extract(&document.credential_subject);
    let tree = MerkleTree::build(&leaves)?;
    let challenge = challenge(&document.id, &tree.root())?;
    Ok(SignatureBinding { tree, challenge })
}

/// Sign a document with a raw 32-byte Ed25519 secret seed.
pub fn sign<S: CredentialSubject>(
    secret_key: &[u8; 32],
    document: &mut ZkCredential<S>,
) -> Result<(), VcError> {
    sign_with(&Ed25519KeyPair::from_seed(secret_key), document)
}

/// Sign a document with a key pair.
pub fn sign_with<S: CredentialSubject>(
    key: &Ed25519KeyPair,
    document: &mut ZkCredential<S>,
) -> Result<(), VcError> {
    if document.is_signed() {
        return Err(VcError::AlreadySigned(document.id.clone()));
    }
    let binding = bind(document)?;
    let signature = ZkSignature {
        signature_type: ZK_SIGNATURE_TYPE.to_string(),
        created: Timestamp::now(),
        signature_value: key.sign(&binding.challenge),
    };
    document.attach_signature(signature)?;
    tracing::debug!(document = %document.id, "zk signature attached");
    Ok(())
}

/// Check `signature` against the recomputed challenge of `document`.
pub fn verify<S: CredentialSubject>(
    signature: &ZkSignature,
    document: &ZkCredential<S>,
    public_key: &Ed25519PublicKey,
) -> Result<bool, VcError> {
    if signature.signature_type != ZK_SIGNATURE_TYPE {
        return Err(VcError::UnsupportedSignatureType(
            signature.signature_type.clone(),
        ));
    }
    let binding = bind(document)?;
    let ok = ed25519::verify(&binding.challenge, &signature.signature_value, public_key)?;
    tracing::debug!(document = %document.id, valid = ok, "zk signature checked");
    Ok(ok)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::subject::PersonSubject;

    fn doc() -> ZkCredential<PersonSubject> {
        ZkCredential::new(
            "did:example:issuer",
            vec![PersonSubject {
                id: "did:example:bob".into(),
                name: "Bob".into(),
                age: 41,
            }],
        )
    }

    #[test]
    fn challenge_depends_on_id_and_root() {
        let root = FieldElement::from_u64(5);
        let a = challenge("urn:uuid:a", &root).unwrap();
        assert_ne!(a, challenge("urn:uuid:b", &root).unwrap());
        assert_ne!(a, challenge("urn:uuid:a", &FieldElement::from_u64(6)).unwrap());
    }

    #[test]
    fn unknown_suite_rejected() {
        let key = Ed25519KeyPair::from_seed(&[3u8; 32]);
        let mut d = doc();
        sign_with(&key, &mut d).unwrap();
        let mut sig = d.zk_signature().cloned().unwrap();
        sig.signature_type = "Other".into();
        let err = verify(&sig, &d, &key.public_key()).unwrap_err();
        assert_eq!(err.kind(), zkc_core::ErrorKind::SignatureFailure);
    }

    #[test]
    fn binding_is_reproducible() {
        let d = doc();
        let a = bind(&d).unwrap();
        let b = bind(&d).unwrap();
        assert_eq!(a.root(), b.root());
        assert_eq!(a.challenge, b.challenge);
    }
}
