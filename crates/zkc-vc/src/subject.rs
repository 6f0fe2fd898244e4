//! # Credential Subjects and Leaf Extraction
//!
//! Every subject type declares its attribute labels statically in
//! [`CredentialSubject::LABELS`]. [`CredentialSubject::leaves`] must emit
//! exactly those labels in exactly that order; the tests of each variant
//! assert it. Leaf order is therefore a property of the type, never of
//! runtime reflection or map iteration.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use zkc_core::Leaf;

/// A typed credential subject with a fixed attribute order.
pub trait CredentialSubject: Serialize + DeserializeOwned + Clone + std::fmt::Debug {
    /// Value of the subject's `type` discriminator.
    const SUBJECT_TYPE: &'static str;

    /// Attribute labels in commitment order.
    const LABELS: &'static [&'static str];

    /// Leaves in `LABELS` order.
    fn leaves(&self) -> Vec<Leaf>;

    /// Position of `label` within one subject's leaves.
    fn label_position(label: &str) -> Option<usize> {
        Self::LABELS.iter().position(|l| *l == label)
    }
}

/// Concatenate the leaves of every subject in document order.
pub fn extract<S: CredentialSubject>(subjects: &[S]) -> Vec<Leaf> {
    subjects.iter().flat_map(S::leaves).collect()
}

/// Global leaf position of `label` in subject number `subject_index`.
pub fn leaf_position<S: CredentialSubject>(subject_index: usize, label: &str) -> Option<usize> {
    S::label_position(label).map(|pos| subject_index * S::LABELS.len() + pos)
}

/// Subject asserting a date of birth. Used by the age-threshold circuit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BirthDateSubject {
    /// Subject identifier (usually a DID).
    pub id: String,
    /// Display name.
    pub name: String,
    /// Year of birth.
    pub birth_year: u32,
    /// Month of birth, 1-12.
    pub birth_month: u32,
    /// Day of birth, 1-31.
    pub birth_day: u32,
}

impl BirthDateSubject {
    /// Label of the birth-year leaf.
    pub const BIRTH_YEAR: &'static str = "birthYear";
    /// Label of the birth-month leaf.
    pub const BIRTH_MONTH: &'static str = "birthMonth";
    /// Label of the birth-day leaf.
    pub const BIRTH_DAY: &'static str = "birthDay";
}

impl CredentialSubject for BirthDateSubject {
    const SUBJECT_TYPE: &'static str = "BirthDateSubject";
    const LABELS: &'static [&'static str] = &[
        "id",
        "name",
        Self::BIRTH_YEAR,
        Self::BIRTH_MONTH,
        Self::BIRTH_DAY,
    ];

    fn leaves(&self) -> Vec<Leaf> {
        vec![
            Leaf::new("id", self.id.as_str()),
            Leaf::new("name", self.name.as_str()),
            Leaf::new(Self::BIRTH_YEAR, self.birth_year),
            Leaf::new(Self::BIRTH_MONTH, self.birth_month),
            Leaf::new(Self::BIRTH_DAY, self.birth_day),
        ]
    }
}

/// Subject asserting a name and a plain age.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonSubject {
    /// Subject identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Age in whole years.
    pub age: u32,
}

impl CredentialSubject for PersonSubject {
    const SUBJECT_TYPE: &'static str = "PersonSubject";
    const LABELS: &'static [&'static str] = &["id", "name", "age"];

    fn leaves(&self) -> Vec<Leaf> {
        vec![
            Leaf::new("id", self.id.as_str()),
            Leaf::new("name", self.name.as_str()),
            Leaf::new("age", self.age),
        ]
    }
}
