//! # Age-Threshold Circuit
//!
//! Proves "the holder was born at least `threshold_years` before
//! `current_date`" from a signed [`ZkCredential<BirthDateSubject>`] without
//! revealing the birth date, the document id or the signature.
//!
//! ## Arguments
//!
//! | Position | Public | Witness |
//! |----------|--------|---------|
//! | 0 | current year | document id (field) |
//! | 1 | current month | Merkle root |
//! | 2 | current day | challenge |
//! | 3 | threshold years | issuer signature |
//! | 4 | issuer public key | birth year |
//! | 5 | | birth month |
//! | 6 | | birth day |
//! | 7 | | path of `birthYear` |
//! | 8 | | path of `birthMonth` |
//! | 9 | | path of `birthDay` |
//!
//! ## Constraint
//!
//! 1. each birth leaf `Hash2(FE(label), FE(value))` reaches the root along its path;
//! 2. `challenge == Hash2(FE(document id), root)`;
//! 3. the signature verifies over `challenge` under the issuer key;
//! 4. `birth_date + threshold_years <= current_date`.
//!
//! [`check_constraints`] evaluates exactly this relation in the clear. It is
//! the reference the transparent backend runs at proving time.

use std::path::{Path, PathBuf};

use zeroize::Zeroize;
use zkc_core::{CalendarDate, FieldElement};
use zkc_crypto::{
    ed25519, hash2, label_to_field_element, CryptoError, Ed25519PublicKey, Ed25519Signature,
    MerklePath, MERKLE_TREE_HEIGHT,
};
use zkc_vc::{leaf_position, signature, BirthDateSubject, VcError, ZkCredential};

use crate::error::MapperError;
use crate::input::{InputValue, PublicInput};
use crate::traits::{Circuit, CircuitArg, CircuitDataMapper, ProofArguments, VerifyArguments};

/// Circuit identifier.
pub const AGE_CIRCUIT_ID: &str = "age-threshold-v1";

/// Largest commitment-key segment the circuit needs.
pub const MAX_SEGMENT_SIZE: usize = 1 << 17;

/// Segment size the circuit is compiled for.
pub const SUPPORTED_SEGMENT_SIZE: usize = 1 << 15;

/// Largest accepted threshold.
pub const MAX_THRESHOLD_YEARS: u32 = 150;

/// Field names of the age circuit's [`PublicInput`].
pub mod fields {
    /// Current year (integer).
    pub const CURRENT_YEAR: &str = "currentYear";
    /// Current month (integer).
    pub const CURRENT_MONTH: &str = "currentMonth";
    /// Current day (integer).
    pub const CURRENT_DAY: &str = "currentDay";
    /// Age threshold in years (integer).
    pub const THRESHOLD_YEARS: &str = "thresholdYears";
    /// Issuer public key.
    pub const ISSUER_PUBLIC_KEY: &str = "issuerPublicKey";
    /// Document id (text).
    pub const DOCUMENT_ID: &str = "documentId";
    /// Merkle root of the credential subject (field).
    pub const MERKLE_TREE_ROOT: &str = "merkleTreeRoot";
    /// Signature challenge (field).
    pub const CHALLENGE: &str = "challenge";
    /// Issuer zk signature.
    pub const SIGNATURE: &str = "signature";
    /// Birth year (integer).
    pub const BIRTH_YEAR: &str = "birthYear";
    /// Birth month (integer).
    pub const BIRTH_MONTH: &str = "birthMonth";
    /// Birth day (integer).
    pub const BIRTH_DAY: &str = "birthDay";
    /// Inclusion path of the birth-year leaf.
    pub const BIRTH_YEAR_PATH: &str = "birthYearPath";
    /// Inclusion path of the birth-month leaf.
    pub const BIRTH_MONTH_PATH: &str = "birthMonthPath";
    /// Inclusion path of the birth-day leaf.
    pub const BIRTH_DAY_PATH: &str = "birthDayPath";
    /// Opaque proving key reference.
    pub const PROVING_KEY_PATH: &str = "provingKeyPath";
    /// Opaque verification key reference.
    pub const VERIFICATION_KEY_PATH: &str = "verificationKeyPath";
    /// Proof bytes (verify only).
    pub const PROOF: &str = "proof";
}

/// The age-threshold circuit.
#[derive(Debug, Clone, Copy, Default)]
pub struct AgeCircuit;

impl Circuit for AgeCircuit {
    const ID: &'static str = AGE_CIRCUIT_ID;
    const MAX_SEGMENT_SIZE: usize = MAX_SEGMENT_SIZE;
    const SUPPORTED_SEGMENT_SIZE: usize = SUPPORTED_SEGMENT_SIZE;

    type ProofInput = AgeProofInput;
    type VerifyInput = AgeVerifyInput;
}

/// Typed prover input. Witness fields are wiped when the value is dropped.
pub struct AgeProofInput {
    current_date: CalendarDate,
    threshold_years: u32,
    issuer_public_key: Ed25519PublicKey,
    proving_key_path: PathBuf,
    document_id: FieldElement,
    merkle_root: FieldElement,
    challenge: FieldElement,
    signature: [u8; 64],
    birth_year: u32,
    birth_month: u32,
    birth_day: u32,
    paths: [MerklePath; 3],
}

impl AgeProofInput {
    /// The date the threshold is evaluated against.
    pub fn current_date(&self) -> CalendarDate {
        self.current_date
    }

    /// Threshold in years.
    pub fn threshold_years(&self) -> u32 {
        self.threshold_years
    }
}

impl ProofArguments for AgeProofInput {
    fn public_args(&self) -> Vec<CircuitArg> {
        public_args(self.current_date, self.threshold_years, &self.issuer_public_key)
    }

    fn witness_args(&self) -> Vec<CircuitArg> {
        let [year_path, month_path, day_path] = &self.paths;
        vec![
            CircuitArg::Field(self.document_id),
            CircuitArg::Field(self.merkle_root),
            CircuitArg::Field(self.challenge),
            CircuitArg::Bytes(self.signature.to_vec()),
            CircuitArg::Field(FieldElement::from_u64(self.birth_year.into())),
            CircuitArg::Field(FieldElement::from_u64(self.birth_month.into())),
            CircuitArg::Field(FieldElement::from_u64(self.birth_day.into())),
            CircuitArg::MerklePath(year_path.clone()),
            CircuitArg::MerklePath(month_path.clone()),
            CircuitArg::MerklePath(day_path.clone()),
        ]
    }

    fn proving_key_path(&self) -> &Path {
        &self.proving_key_path
    }
}

impl Drop for AgeProofInput {
    fn drop(&mut self) {
        self.document_id.zeroize();
        self.merkle_root.zeroize();
        self.challenge.zeroize();
        self.signature.zeroize();
        self.birth_year.zeroize();
        self.birth_month.zeroize();
        self.birth_day.zeroize();
        for path in &mut self.paths {
            path.index.zeroize();
            path.steps.iter_mut().for_each(|step| step.sibling.zeroize());
            path.steps.clear();
        }
    }
}

impl std::fmt::Debug for AgeProofInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AgeProofInput")
            .field("current_date", &self.current_date)
            .field("threshold_years", &self.threshold_years)
            .field("issuer_public_key", &self.issuer_public_key)
            .finish_non_exhaustive()
    }
}

/// Typed verifier input.
#[derive(Debug, Clone)]
pub struct AgeVerifyInput {
    current_date: CalendarDate,
    threshold_years: u32,
    issuer_public_key: Ed25519PublicKey,
    verification_key_path: PathBuf,
    proof: Vec<u8>,
}

impl VerifyArguments for AgeVerifyInput {
    fn public_args(&self) -> Vec<CircuitArg> {
        public_args(self.current_date, self.threshold_years, &self.issuer_public_key)
    }

    fn proof(&self) -> &[u8] {
        &self.proof
    }

    fn verification_key_path(&self) -> &Path {
        &self.verification_key_path
    }
}

fn public_args(date: CalendarDate, threshold: u32, issuer: &Ed25519PublicKey) -> Vec<CircuitArg> {
    vec![
        CircuitArg::Field(FieldElement::from_u64(date.year.into())),
        CircuitArg::Field(FieldElement::from_u64(date.month.into())),
        CircuitArg::Field(FieldElement::from_u64(date.day.into())),
        CircuitArg::Field(FieldElement::from_u64(threshold.into())),
        CircuitArg::Bytes(issuer.as_bytes().to_vec()),
    ]
}

// ---------------------------------------------------------------------------
// Mapper
// ---------------------------------------------------------------------------

/// Maps generic bundles into [`AgeProofInput`] / [`AgeVerifyInput`].
#[derive(Debug, Clone, Copy, Default)]
pub struct AgeDataMapper;

impl CircuitDataMapper for AgeDataMapper {
    type Circuit = AgeCircuit;

    fn map_proof_input(&self, input: &PublicInput) -> Result<AgeProofInput, MapperError> {
        let current_date = read_date(
            input,
            [fields::CURRENT_YEAR, fields::CURRENT_MONTH, fields::CURRENT_DAY],
        )?;
        let threshold_years = bounded(input, fields::THRESHOLD_YEARS, 0, MAX_THRESHOLD_YEARS)?;
        let issuer_public_key = read_public_key(input)?;
        let proving_key_path = input.path(fields::PROVING_KEY_PATH)?.to_path_buf();

        let document_id = label_to_field_element(input.text(fields::DOCUMENT_ID)?).map_err(
            |source| MapperError::Conversion {
                field: fields::DOCUMENT_ID.to_string(),
                source,
            },
        )?;
        let merkle_root = input.field(fields::MERKLE_TREE_ROOT)?;
        let challenge = input.field(fields::CHALLENGE)?;
        let signature = *input.signature(fields::SIGNATURE)?.as_bytes();

        let birth = read_date(
            input,
            [fields::BIRTH_YEAR, fields::BIRTH_MONTH, fields::BIRTH_DAY],
        )?;
        let paths = [
            read_path(input, fields::BIRTH_YEAR_PATH)?,
            read_path(input, fields::BIRTH_MONTH_PATH)?,
            read_path(input, fields::BIRTH_DAY_PATH)?,
        ];

        Ok(AgeProofInput {
            current_date,
            threshold_years,
            issuer_public_key,
            proving_key_path,
            document_id,
            merkle_root,
            challenge,
            signature,
            birth_year: birth.year,
            birth_month: birth.month,
            birth_day: birth.day,
            paths,
        })
    }

    fn map_verify_input(&self, input: &PublicInput) -> Result<AgeVerifyInput, MapperError> {
        let current_date = read_date(
            input,
            [fields::CURRENT_YEAR, fields::CURRENT_MONTH, fields::CURRENT_DAY],
        )?;
        let threshold_years = bounded(input, fields::THRESHOLD_YEARS, 0, MAX_THRESHOLD_YEARS)?;
        let issuer_public_key = read_public_key(input)?;
        let verification_key_path = input.path(fields::VERIFICATION_KEY_PATH)?.to_path_buf();
        let proof = input.bytes(fields::PROOF)?;
        if proof.is_empty() {
            return Err(MapperError::Invalid {
                field: fields::PROOF.to_string(),
                reason: "proof is empty".to_string(),
            });
        }

        Ok(AgeVerifyInput {
            current_date,
            threshold_years,
            issuer_public_key,
            verification_key_path,
            proof: proof.to_vec(),
        })
    }
}

fn bounded(input: &PublicInput, name: &str, min: u32, max: u32) -> Result<u32, MapperError> {
    let value = input.integer(name)?;
    u32::try_from(value)
        .ok()
        .filter(|v| (min..=max).contains(v))
        .ok_or_else(|| MapperError::Invalid {
            field: name.to_string(),
            reason: format!("must be within {min}..={max}"),
        })
}

fn read_date(input: &PublicInput, [year, month, day]: [&str; 3]) -> Result<CalendarDate, MapperError> {
    let y = bounded(input, year, 1, 9999)?;
    let m = bounded(input, month, 1, 12)?;
    let d = bounded(input, day, 1, 31)?;
    CalendarDate::new(y, m, d).map_err(|e| MapperError::Invalid {
        field: day.to_string(),
        reason: e.to_string(),
    })
}

fn read_public_key(input: &PublicInput) -> Result<Ed25519PublicKey, MapperError> {
    let key = input.public_key(fields::ISSUER_PUBLIC_KEY)?;
    key.to_verifying_key().map_err(|e| MapperError::Invalid {
        field: fields::ISSUER_PUBLIC_KEY.to_string(),
        reason: e.to_string(),
    })?;
    Ok(key.clone())
}

fn read_path(input: &PublicInput, name: &str) -> Result<MerklePath, MapperError> {
    let path = input.merkle_path(name)?;
    if path.steps.len() != MERKLE_TREE_HEIGHT {
        return Err(MapperError::Invalid {
            field: name.to_string(),
            reason: format!(
                "path has {} steps, tree height is {MERKLE_TREE_HEIGHT}",
                path.steps.len()
            ),
        });
    }
    Ok(path.clone())
}

// ---------------------------------------------------------------------------
// Reference constraint
// ---------------------------------------------------------------------------

/// Evaluate the age relation over positional arguments.
pub fn check_constraints(public: &[CircuitArg], witness: &[CircuitArg]) -> Result<(), String> {
    if public.len() != 5 || witness.len() != 10 {
        return Err(format!(
            "expected 5 public and 10 witness arguments, got {} and {}",
            public.len(),
            witness.len()
        ));
    }

    let current = CalendarDate::new(
        small_int(public, 0)?,
        small_int(public, 1)?,
        small_int(public, 2)?,
    )
    .map_err(|e| e.to_string())?;
    let threshold = small_int(public, 3)?;
    let issuer = Ed25519PublicKey::from_bytes(fixed_bytes::<32>(public, 4)?);

    let document_id = field(witness, 0)?;
    let root = field(witness, 1)?;
    let challenge = field(witness, 2)?;
    let signature = Ed25519Signature::from_bytes(fixed_bytes::<64>(witness, 3)?);

    let labels = [
        BirthDateSubject::BIRTH_YEAR,
        BirthDateSubject::BIRTH_MONTH,
        BirthDateSubject::BIRTH_DAY,
    ];
    for (offset, label) in labels.iter().enumerate() {
        let value = field(witness, 4 + offset)?;
        let path = witness
            .get(7 + offset)
            .and_then(CircuitArg::as_merkle_path)
            .ok_or_else(|| format!("witness argument {} must be a merkle path", 7 + offset))?;
        let leaf = label_to_field_element(label)
            .map_err(CryptoError::from)
            .and_then(|label| hash2(&label, value))
            .map_err(|e| e.to_string())?;
        if !path.verify(&leaf, root).map_err(|e| e.to_string())? {
            return Err(format!("{label} is not committed under the root"));
        }
    }

    if hash2(document_id, root).map_err(|e| e.to_string())? != *challenge {
        return Err("challenge does not bind document id and root".to_string());
    }
    if !ed25519::verify(challenge, &signature, &issuer).map_err(|e| e.to_string())? {
        return Err("issuer signature does not verify".to_string());
    }

    let birth = CalendarDate::new(
        small_int(witness, 4)?,
        small_int(witness, 5)?,
        small_int(witness, 6)?,
    )
    .map_err(|e| e.to_string())?;
    if birth.add_years(threshold) > current {
        return Err("age threshold not met".to_string());
    }
    Ok(())
}

fn field(args: &[CircuitArg], i: usize) -> Result<&FieldElement, String> {
    args.get(i)
        .and_then(CircuitArg::as_field)
        .ok_or_else(|| format!("argument {i} must be a field element"))
}

fn small_int(args: &[CircuitArg], i: usize) -> Result<u32, String> {
    let bytes = field(args, i)?.to_bytes();
    if bytes[4..].iter().any(|b| *b != 0) {
        return Err(format!("argument {i} does not fit in 32 bits"));
    }
    Ok(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
}

fn fixed_bytes<const N: usize>(args: &[CircuitArg], i: usize) -> Result<[u8; N], String> {
    args.get(i)
        .and_then(CircuitArg::as_bytes)
        .and_then(|b| <[u8; N]>::try_from(b).ok())
        .ok_or_else(|| format!("argument {i} must be {N} bytes"))
}

// ---------------------------------------------------------------------------
// Bundle builders
// ---------------------------------------------------------------------------

/// Holder-side request: what to prove and with which proving key.
#[derive(Debug, Clone)]
pub struct AgeProofRequest {
    /// Date the threshold is evaluated against.
    pub current_date: CalendarDate,
    /// Threshold in years.
    pub threshold_years: u32,
    /// Opaque proving key reference.
    pub proving_key_path: PathBuf,
}

impl AgeProofRequest {
    /// Assemble the prover bundle from a signed credential.
    ///
    /// `subject_index` selects which subject's birth date is proven.
    pub fn public_input(
        &self,
        credential: &ZkCredential<BirthDateSubject>,
        subject_index: usize,
        issuer_public_key: &Ed25519PublicKey,
    ) -> Result<PublicInput, VcError> {
        let zk_signature = credential
            .zk_signature()
            .ok_or_else(|| VcError::NotSigned(credential.id.clone()))?;
        let binding = signature::bind(credential)?;
        let leaves = binding.tree.leaf_count();
        let subject = credential
            .credential_subject
            .get(subject_index)
            .ok_or(CryptoError::LeafIndexOutOfRange {
                index: subject_index,
                leaves,
            })?;
        let path_of = |label: &str| -> Result<MerklePath, VcError> {
            let index = leaf_position::<BirthDateSubject>(subject_index, label)
                .ok_or(CryptoError::LeafIndexOutOfRange { index: subject_index, leaves })?;
            Ok(binding.tree.path(index)?)
        };

        Ok(PublicInput::new()
            .with(fields::CURRENT_YEAR, InputValue::Integer(self.current_date.year.into()))
            .with(fields::CURRENT_MONTH, InputValue::Integer(self.current_date.month.into()))
            .with(fields::CURRENT_DAY, InputValue::Integer(self.current_date.day.into()))
            .with(fields::THRESHOLD_YEARS, InputValue::Integer(self.threshold_years.into()))
            .with(fields::ISSUER_PUBLIC_KEY, InputValue::PublicKey(issuer_public_key.clone()))
            .with(fields::PROVING_KEY_PATH, InputValue::Path(self.proving_key_path.clone()))
            .with(fields::DOCUMENT_ID, InputValue::Text(credential.id.clone()))
            .with(fields::MERKLE_TREE_ROOT, InputValue::Field(binding.root()))
            .with(fields::CHALLENGE, InputValue::Field(binding.challenge))
            .with(fields::SIGNATURE, InputValue::Signature(zk_signature.signature_value.clone()))
            .with(fields::BIRTH_YEAR, InputValue::Integer(subject.birth_year.into()))
            .with(fields::BIRTH_MONTH, InputValue::Integer(subject.birth_month.into()))
            .with(fields::BIRTH_DAY, InputValue::Integer(subject.birth_day.into()))
            .with(fields::BIRTH_YEAR_PATH, InputValue::MerklePath(path_of(BirthDateSubject::BIRTH_YEAR)?))
            .with(fields::BIRTH_MONTH_PATH, InputValue::MerklePath(path_of(BirthDateSubject::BIRTH_MONTH)?))
            .with(fields::BIRTH_DAY_PATH, InputValue::MerklePath(path_of(BirthDateSubject::BIRTH_DAY)?)))
    }
}

/// Verifier-side request.
#[derive(Debug, Clone)]
pub struct AgeVerifyRequest {
    /// Date the threshold is evaluated against.
    pub current_date: CalendarDate,
    /// Threshold in years.
    pub threshold_years: u32,
    /// Key the credential's zk signature must verify under.
    pub issuer_public_key: Ed25519PublicKey,
    /// Opaque verification key reference.
    pub verification_key_path: PathBuf,
}

impl AgeVerifyRequest {
    /// Assemble the verifier bundle for `proof`.
    pub fn public_input(&self, proof: &[u8]) -> PublicInput {
        PublicInput::new()
            .with(fields::CURRENT_YEAR, InputValue::Integer(self.current_date.year.into()))
            .with(fields::CURRENT_MONTH, InputValue::Integer(self.current_date.month.into()))
            .with(fields::CURRENT_DAY, InputValue::Integer(self.current_date.day.into()))
            .with(fields::THRESHOLD_YEARS, InputValue::Integer(self.threshold_years.into()))
            .with(fields::ISSUER_PUBLIC_KEY, InputValue::PublicKey(self.issuer_public_key.clone()))
            .with(fields::VERIFICATION_KEY_PATH, InputValue::Path(self.verification_key_path.clone()))
            .with(fields::PROOF, InputValue::Bytes(proof.to_vec()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use zkc_core::ErrorKind;
    use zkc_crypto::Ed25519KeyPair;

    fn issuer() -> Ed25519KeyPair {
        Ed25519KeyPair::from_seed(&[0x11; 32])
    }

    fn credential(year: u32, month: u32, day: u32) -> ZkCredential<BirthDateSubject> {
        let mut c = ZkCredential::new(
            "did:example:issuer",
            vec![BirthDateSubject {
                id: "did:example:alice".into(),
                name: "Alice".into(),
                birth_year: year,
                birth_month: month,
                birth_day: day,
            }],
        );
        c.sign(&issuer()).unwrap();
        c
    }

    fn request(today: CalendarDate, threshold: u32) -> AgeProofRequest {
        AgeProofRequest {
            current_date: today,
            threshold_years: threshold,
            proving_key_path: PathBuf::from("keys/age.pk"),
        }
    }

    fn args_for(c: &ZkCredential<BirthDateSubject>, today: CalendarDate, threshold: u32) -> (Vec<CircuitArg>, Vec<CircuitArg>) {
        let bundle = request(today, threshold)
            .public_input(c, 0, &issuer().public_key())
            .unwrap();
        let mapped = AgeDataMapper.map_proof_input(&bundle).unwrap();
        (mapped.public_args(), mapped.witness_args())
    }

    #[test]
    fn constraint_holds_for_adult() {
        let today = CalendarDate::new(2026, 10, 19).unwrap();
        let (public, witness) = args_for(&credential(1994, 7, 4), today, 18);
        check_constraints(&public, &witness).unwrap();
    }

    #[test]
    fn birthday_boundary() {
        let c = credential(2008, 10, 19);
        let (public, witness) = args_for(&c, CalendarDate::new(2026, 10, 19).unwrap(), 18);
        assert!(check_constraints(&public, &witness).is_ok());
        let (public, witness) = args_for(&c, CalendarDate::new(2026, 10, 18).unwrap(), 18);
        assert_eq!(check_constraints(&public, &witness).unwrap_err(), "age threshold not met");
    }

    #[test]
    fn forged_birth_year_breaks_inclusion() {
        let today = CalendarDate::new(2026, 10, 19).unwrap();
        let (public, mut witness) = args_for(&credential(2015, 1, 1), today, 18);
        witness[4] = CircuitArg::Field(FieldElement::from_u64(1990));
        let err = check_constraints(&public, &witness).unwrap_err();
        assert!(err.contains("birthYear"));
    }

    #[test]
    fn foreign_issuer_key_breaks_signature() {
        let today = CalendarDate::new(2026, 10, 19).unwrap();
        let (mut public, witness) = args_for(&credential(1994, 7, 4), today, 18);
        public[4] = CircuitArg::Bytes(Ed25519KeyPair::from_seed(&[0x22; 32]).public_key().as_bytes().to_vec());
        assert_eq!(
            check_constraints(&public, &witness).unwrap_err(),
            "issuer signature does not verify"
        );
    }

    #[test]
    fn wrong_arity_rejected() {
        assert!(check_constraints(&[], &[]).is_err());
    }

    #[test]
    fn unsigned_credential_cannot_build_bundle() {
        let c = ZkCredential::new(
            "did:example:issuer",
            vec![BirthDateSubject {
                id: "did:example:alice".into(),
                name: "Alice".into(),
                birth_year: 1994,
                birth_month: 7,
                birth_day: 4,
            }],
        );
        let err = request(CalendarDate::new(2026, 1, 1).unwrap(), 18)
            .public_input(&c, 0, &issuer().public_key())
            .unwrap_err();
        assert!(matches!(err, VcError::NotSigned(_)));
    }

    #[test]
    fn out_of_range_subject_index() {
        let c = credential(1994, 7, 4);
        let err = request(CalendarDate::new(2026, 1, 1).unwrap(), 18)
            .public_input(&c, 3, &issuer().public_key())
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MapperValidationFailure);
    }

    #[test]
    fn mapper_rejects_impossible_dates_and_short_paths() {
        let c = credential(1994, 7, 4);
        let mut bundle = request(CalendarDate::new(2026, 1, 1).unwrap(), 18)
            .public_input(&c, 0, &issuer().public_key())
            .unwrap();

        let mut bad_date = bundle.clone();
        bad_date.insert(fields::BIRTH_MONTH, InputValue::Integer(2));
        bad_date.insert(fields::BIRTH_DAY, InputValue::Integer(30));
        let err = AgeDataMapper.map_proof_input(&bad_date).unwrap_err();
        assert_eq!(err.field(), fields::BIRTH_DAY);

        if let Some(InputValue::MerklePath(p)) = bundle.remove(fields::BIRTH_DAY_PATH) {
            let mut short = p;
            short.steps.pop();
            bundle.insert(fields::BIRTH_DAY_PATH, InputValue::MerklePath(short));
        }
        let err = AgeDataMapper.map_proof_input(&bundle).unwrap_err();
        assert_eq!(err.field(), fields::BIRTH_DAY_PATH);
        assert_eq!(err.kind(), ErrorKind::MapperValidationFailure);
    }

    #[test]
    fn mapper_rejects_threshold_out_of_range() {
        let verify = AgeVerifyRequest {
            current_date: CalendarDate::new(2026, 1, 1).unwrap(),
            threshold_years: 200,
            issuer_public_key: issuer().public_key(),
            verification_key_path: PathBuf::from("keys/age.vk"),
        };
        let err = AgeDataMapper
            .map_verify_input(&verify.public_input(&[1, 2, 3]))
            .unwrap_err();
        assert_eq!(err.field(), fields::THRESHOLD_YEARS);
    }

    #[test]
    fn debug_hides_witness() {
        let today = CalendarDate::new(2026, 10, 19).unwrap();
        let bundle = request(today, 18)
            .public_input(&credential(1994, 7, 4), 0, &issuer().public_key())
            .unwrap();
        let mapped = AgeDataMapper.map_proof_input(&bundle).unwrap();
        let shown = format!("{mapped:?}");
        assert!(!shown.contains("1994"));
        assert!(shown.contains("threshold_years"));
    }
}
