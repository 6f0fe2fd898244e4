//! # Zero-Knowledge Credential Document
//!
//! A W3C-shaped credential envelope with typed subjects and an optional
//! `zkSignature` property.
//!
//! ## Field Order
//!
//! Serialization order is the declaration order below and is fixed:
//! `@context, id, type, credentialSubject, issuer, issuanceDate, proof,
//! zkSignature`. `proof` is carried opaquely; its contents take no part in
//! the zero-knowledge binding.

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use zkc_core::{Leaf, Timestamp};
use zkc_crypto::{Ed25519KeyPair, Ed25519PublicKey};

use crate::error::VcError;
use crate::signature::{self, SignatureBinding, ZkSignature};
use crate::subject::{extract, CredentialSubject};

/// Default JSON-LD context.
pub const DEFAULT_CONTEXT: &str = "https://www.w3.org/2018/credentials/v1";

/// Base credential type.
pub const VERIFIABLE_CREDENTIAL_TYPE: &str = "VerifiableCredential";

fn new_credential_id() -> String {
    format!("urn:uuid:{}", Uuid::new_v4())
}

/// A credential whose subjects can be committed to a Merkle root.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound = "S: CredentialSubject")]
pub struct ZkCredential<S> {
    /// JSON-LD context URIs.
    #[serde(rename = "@context")]
    pub context: Vec<String>,

    /// Document identifier. Part of the signature challenge.
    #[serde(default = "new_credential_id")]
    pub id: String,

    /// Credential types.
    #[serde(rename = "type")]
    pub credential_type: Vec<String>,

    /// Subjects, committed in this order.
    #[serde(rename = "credentialSubject")]
    pub credential_subject: Vec<S>,

    /// Issuer DID.
    pub issuer: String,

    /// Issuance time (UTC).
    #[serde(rename = "issuanceDate")]
    pub issuance_date: Timestamp,

    /// Conventional proof object, carried through untouched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proof: Option<serde_json::Value>,

    #[serde(rename = "zkSignature", default, skip_serializing_if = "Option::is_none")]
    zk_signature: Option<ZkSignature>,
}

impl<S: CredentialSubject> ZkCredential<S> {
    /// A fresh, unsigned credential with a random `urn:uuid` id.
    pub fn new(issuer: impl Into<String>, subjects: Vec<S>) -> Self {
        Self {
            context: vec![DEFAULT_CONTEXT.to_string()],
            id: new_credential_id(),
            credential_type: vec![
                VERIFIABLE_CREDENTIAL_TYPE.to_string(),
                S::SUBJECT_TYPE.to_string(),
            ],
            credential_subject: subjects,
            issuer: issuer.into(),
            issuance_date: Timestamp::now(),
            proof: None,
            zk_signature: None,
        }
    }

    /// Replace the generated id.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Replace the issuance date.
    pub fn with_issuance_date(mut self, at: Timestamp) -> Self {
        self.issuance_date = at;
        self
    }

    /// The embedded signature, if signed.
    pub fn zk_signature(&self) -> Option<&ZkSignature> {
        self.zk_signature.as_ref()
    }

    /// Whether `zkSignature` is set.
    pub fn is_signed(&self) -> bool {
        self.zk_signature.is_some()
    }

    /// Ordered leaves of all subjects.
    pub fn leaves(&self) -> Vec<Leaf> {
        extract(&self.credential_subject)
    }

    /// Tree and challenge for the current content.
    pub fn binding(&self) -> Result<SignatureBinding, VcError> {
        signature::bind(self)
    }

    /// Sign in place. Fails if already signed.
    pub fn sign(&mut self, key: &Ed25519KeyPair) -> Result<(), VcError> {
        signature::sign_with(key, self)
    }

    /// Verify the embedded signature.
    pub fn verify(&self, public_key: &Ed25519PublicKey) -> Result<bool, VcError> {
        let sig = self
            .zk_signature
            .as_ref()
            .ok_or_else(|| VcError::NotSigned(self.id.clone()))?;
        signature::verify(sig, self, public_key)
    }

    pub(crate) fn attach_signature(&mut self, sig: ZkSignature) -> Result<(), VcError> {
        if self.zk_signature.is_some() {
            return Err(VcError::AlreadySigned(self.id.clone()));
        }
        self.zk_signature = Some(sig);
        Ok(())
    }

    /// Serialize to pretty JSON.
    pub fn to_json(&self) -> Result<String, VcError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse from JSON.
    pub fn from_json(s: &str) -> Result<Self, VcError> {
        Ok(serde_json::from_str(s)?)
    }
}
