//! Sign/verify behaviour of the zero-knowledge signature over whole documents.

use proptest::prelude::*;
use zkc_core::{ErrorKind, Timestamp};
use zkc_crypto::Ed25519KeyPair;
use zkc_vc::{signature, BirthDateSubject, CredentialSubject, PersonSubject, VcError, ZkCredential};

fn alice() -> BirthDateSubject {
    BirthDateSubject {
        id: "did:example:alice".into(),
        name: "Alice Example".into(),
        birth_year: 1994,
        birth_month: 7,
        birth_day: 4,
    }
}

fn issuer_key() -> Ed25519KeyPair {
    Ed25519KeyPair::from_seed(&[0x42; 32])
}

fn signed() -> ZkCredential<BirthDateSubject> {
    let mut doc = ZkCredential::new("did:example:issuer", vec![alice()])
        .with_issuance_date(Timestamp::parse("2026-03-01T09:00:00Z").unwrap());
    doc.sign(&issuer_key()).unwrap();
    doc
}

#[test]
fn sign_then_verify_round_trip() {
    let doc = signed();
    assert!(doc.is_signed());
    assert!(doc.verify(&issuer_key().public_key()).unwrap());
}

#[test]
fn sign_with_raw_secret_matches_key_pair() {
    let mut doc = ZkCredential::new("did:example:issuer", vec![alice()]).with_id("urn:uuid:fixed");
    signature::sign(&[0x42; 32], &mut doc).unwrap();
    let sig = doc.zk_signature().unwrap();
    assert!(signature::verify(sig, &doc, &issuer_key().public_key()).unwrap());
}

#[test]
fn wrong_public_key_does_not_verify() {
    let doc = signed();
    let other = Ed25519KeyPair::from_seed(&[0x43; 32]);
    assert!(!doc.verify(&other.public_key()).unwrap());
}

#[test]
fn tampered_id_does_not_verify() {
    let mut doc = signed();
    doc.id = "urn:uuid:00000000-0000-4000-8000-000000000000".into();
    assert!(!doc.verify(&issuer_key().public_key()).unwrap());
}

#[test]
fn tampered_subject_value_does_not_verify() {
    let mut doc = signed();
    doc.credential_subject[0].birth_year = 1990;
    assert!(!doc.verify(&issuer_key().public_key()).unwrap());
}

#[test]
fn metadata_outside_the_binding_does_not_matter() {
    let mut doc = signed();
    doc.issuer = "did:example:someone-else".into();
    doc.proof = Some(serde_json::json!({"note": "carried opaquely"}));
    assert!(doc.verify(&issuer_key().public_key()).unwrap());
}

#[test]
fn second_sign_is_rejected_and_keeps_first_signature() {
    let mut doc = signed();
    let first = doc.zk_signature().cloned();
    let err = doc.sign(&Ed25519KeyPair::from_seed(&[1; 32])).unwrap_err();
    assert!(matches!(err, VcError::AlreadySigned(_)));
    assert_eq!(err.kind(), ErrorKind::AlreadySigned);
    assert_eq!(doc.zk_signature().cloned(), first);
}

#[test]
fn long_identifiers_use_hash_down_and_still_verify() {
    let mut subject = alice();
    subject.name = "Alexandria Maximiliana Example-Longname".into();
    let mut doc = ZkCredential::new("did:example:issuer", vec![subject]);
    assert!(doc.id.len() > 31);
    doc.sign(&issuer_key()).unwrap();
    assert!(doc.verify(&issuer_key().public_key()).unwrap());
}

#[test]
fn multi_subject_documents_commit_every_subject() {
    let bob = PersonSubject { id: "did:example:bob".into(), name: "Bob".into(), age: 41 };
    let carol = PersonSubject { id: "did:example:carol".into(), name: "Carol".into(), age: 29 };
    let mut doc = ZkCredential::new("did:example:issuer", vec![bob, carol]);
    doc.sign(&issuer_key()).unwrap();
    assert_eq!(doc.leaves().len(), 2 * PersonSubject::LABELS.len());

    doc.credential_subject[1].age = 30;
    assert!(!doc.verify(&issuer_key().public_key()).unwrap());
}

#[test]
fn subject_reordering_does_not_verify() {
    let bob = PersonSubject { id: "did:example:bob".into(), name: "Bob".into(), age: 41 };
    let carol = PersonSubject { id: "did:example:carol".into(), name: "Carol".into(), age: 29 };
    let mut doc = ZkCredential::new("did:example:issuer", vec![bob, carol]);
    doc.sign(&issuer_key()).unwrap();
    doc.credential_subject.swap(0, 1);
    assert!(!doc.verify(&issuer_key().public_key()).unwrap());
}

#[test]
fn repeated_extraction_gives_the_same_root() {
    let doc = signed();
    let roots: Vec<_> = (0..4).map(|_| doc.binding().unwrap().root()).collect();
    assert!(roots.windows(2).all(|w| w[0] == w[1]));
    let labels: Vec<_> = doc.leaves().into_iter().map(|l| l.label).collect();
    assert_eq!(labels, BirthDateSubject::LABELS);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    /// Any change to a committed birth date breaks the signature.
    #[test]
    fn any_birth_date_change_breaks_signature(
        year in 1900u32..2100,
        month in 1u32..=12,
        day in 1u32..=28,
    ) {
        let original = alice();
        prop_assume!((year, month, day) != (original.birth_year, original.birth_month, original.birth_day));
        let mut doc = signed();
        doc.credential_subject[0].birth_year = year;
        doc.credential_subject[0].birth_month = month;
        doc.credential_subject[0].birth_day = day;
        prop_assert!(!doc.verify(&issuer_key().public_key()).unwrap());
    }
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
struct MeasurementSubject {
    id: String,
    height: f64,
}

impl CredentialSubject for MeasurementSubject {
    const SUBJECT_TYPE: &'static str = "MeasurementSubject";
    const LABELS: &'static [&'static str] = &["id", "height"];

    fn leaves(&self) -> Vec<zkc_core::Leaf> {
        vec![
            zkc_core::Leaf::new("id", self.id.as_str()),
            zkc_core::Leaf::new("height", self.height),
        ]
    }
}

#[test]
fn float_attribute_cannot_be_signed() {
    let mut doc = ZkCredential::new(
        "did:example:issuer",
        vec![MeasurementSubject { id: "did:example:dan".into(), height: 1.82 }],
    );
    let err = doc.sign(&issuer_key()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnsupportedFieldType);
    assert!(!doc.is_signed());
}
