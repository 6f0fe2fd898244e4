//! # zkc-core — Foundational Types for the ZK Credentials Stack
//!
//! Every other crate in the workspace depends on `zkc-core`; it depends on
//! nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **One field type.** [`FieldElement`] wraps the BN254 scalar field and
//!    owns the only canonical byte form (32 bytes, little-endian). Prover,
//!    signer and verifier all exchange field elements through it.
//!
//! 2. **Typed leaves.** A credential attribute is a [`Leaf`]: a label plus an
//!    [`AttributeValue`]. Encoding into the field happens in `zkc-crypto`,
//!    which rejects unsupported values instead of approximating them.
//!
//! 3. **One error taxonomy.** Every fallible operation in the workspace maps
//!    its error onto an [`ErrorKind`], so the provider boundary can report a
//!    single, stable kind regardless of which layer failed.
//!
//! 4. **`CanonicalBytes` newtype.** Digest inputs built from JSON values flow
//!    through `CanonicalBytes::new()` (JCS, float rejection).
//!
//! ## Crate Policy
//!
//! - No dependencies on other `zkc-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod canonical;
pub mod digest;
pub mod error;
pub mod field;
pub mod hex;
pub mod temporal;

pub use canonical::CanonicalBytes;
pub use digest::Sha256Accumulator;
pub use error::{CanonicalizationError, ErrorKind, FieldError, TemporalError};
pub use field::{AttributeValue, FieldElement, Leaf, FIELD_ELEMENT_BYTES};
pub use temporal::{CalendarDate, Timestamp};
