//! # Field Element Codec
//!
//! Total, deterministic encoding of supported attribute values into the
//! BN254 scalar field. The issuer and every verifier must produce the same
//! element for the same value, so the rules below are fixed:
//!
//! | Value | Encoding |
//! |-------|----------|
//! | `Integer(i)` | `i mod p` (negative values wrap to `p - |i|`) |
//! | `Boolean(b)` | `2^64 + b` |
//! | `String(s)`, at most 31 UTF-8 bytes | 32-byte big-endian word `[len + 1, bytes.., 0..]` |
//! | `String(s)`, longer | Poseidon chain over 31-byte chunks, seeded with `2^248 + len` |
//! | `Float(_)` | rejected with `UnsupportedFieldType` |
//!
//! The packed ranges of the three scalar types are disjoint:
//!
//! - integers occupy `[0, 2^63)` and `[p - 2^63, p)`;
//! - booleans occupy `{2^64, 2^64 + 1}`;
//! - short strings occupy `[2^248, 33 * 2^248)`. The top byte is at most 32,
//!   below the modulus' top byte `0x30`, so no reduction happens and
//!   distinct strings give distinct elements. The empty string is `2^248`,
//!   never zero.
//!
//! A leaf therefore changes its encoding whenever its value changes, even
//! across types. Long strings are hashed down; the length seed keeps them
//! apart from each other's prefixes.

use zkc_core::{AttributeValue, FieldElement, FieldError, FIELD_ELEMENT_BYTES};

use crate::poseidon::hash2;

/// Longest string packed directly into one element.
pub const MAX_PACKED_STRING_BYTES: usize = FIELD_ELEMENT_BYTES - 1;

/// Encode an attribute value.
///
/// # Errors
///
/// - [`FieldError::UnsupportedFieldType`] for floats.
/// - [`FieldError::ConversionFailure`] if the long-string hash chain fails.
pub fn to_field_element(value: &AttributeValue) -> Result<FieldElement, FieldError> {
    match value {
        AttributeValue::Integer(i) => Ok(FieldElement::from_i64(*i)),
        AttributeValue::Boolean(b) => Ok(encode_bool(*b)),
        AttributeValue::String(s) => encode_str(s),
        AttributeValue::Float(_) => Err(FieldError::UnsupportedFieldType {
            type_name: value.type_name(),
        }),
    }
}

/// Encode an attribute label (or any identifier) with the string rule.
pub fn label_to_field_element(label: &str) -> Result<FieldElement, FieldError> {
    encode_str(label)
}

fn encode_bool(b: bool) -> FieldElement {
    // 2^64 + b, big-endian
    let mut word = [0u8; 9];
    word[0] = 1;
    word[8] = u8::from(b);
    FieldElement::from_be_bytes_mod_order(&word)
}

fn encode_str(s: &str) -> Result<FieldElement, FieldError> {
    let bytes = s.as_bytes();
    if bytes.len() <= MAX_PACKED_STRING_BYTES {
        let mut word = [0u8; FIELD_ELEMENT_BYTES];
        // len + 1 <= 32 fits in one byte
        word[0] = bytes.len() as u8 + 1;
        word[1..=bytes.len()].copy_from_slice(bytes);
        return Ok(FieldElement::from_be_bytes_mod_order(&word));
    }

    let mut seed = [0u8; FIELD_ELEMENT_BYTES];
    seed[0] = 0x01;
    seed[FIELD_ELEMENT_BYTES - 8..].copy_from_slice(&(bytes.len() as u64).to_be_bytes());
    let mut acc = FieldElement::from_be_bytes_mod_order(&seed);

    for chunk in bytes.chunks(MAX_PACKED_STRING_BYTES) {
        let limb = FieldElement::from_be_bytes_mod_order(chunk);
        acc = hash2(&acc, &limb)
            .map_err(|e| FieldError::ConversionFailure(format!("string hash-down: {e}")))?;
    }
    Ok(acc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use zkc_core::ErrorKind;

    #[test]
    fn integers_and_booleans() {
        assert_eq!(
            to_field_element(&AttributeValue::Integer(1994)).unwrap(),
            FieldElement::from_u64(1994)
        );
        let two_64 = FieldElement::from_be_bytes_mod_order(&[1, 0, 0, 0, 0, 0, 0, 0, 0]);
        assert_eq!(
            to_field_element(&AttributeValue::Boolean(false)).unwrap(),
            two_64
        );
        assert_eq!(
            to_field_element(&AttributeValue::Boolean(true)).unwrap(),
            FieldElement::from_be_bytes_mod_order(&[1, 0, 0, 0, 0, 0, 0, 0, 1])
        );
    }

    #[test]
    fn types_never_share_an_encoding() {
        let values = [
            AttributeValue::Integer(0),
            AttributeValue::Integer(1),
            AttributeValue::Integer(-1),
            AttributeValue::Boolean(false),
            AttributeValue::Boolean(true),
            AttributeValue::from(""),
            AttributeValue::from("\0"),
            AttributeValue::from("1"),
        ];
        for (i, a) in values.iter().enumerate() {
            for b in &values[i + 1..] {
                assert_ne!(
                    to_field_element(a).unwrap(),
                    to_field_element(b).unwrap(),
                    "{a:?} vs {b:?}"
                );
            }
        }
    }

    #[test]
    fn short_string_layout() {
        let fe = to_field_element(&AttributeValue::from("ab")).unwrap();
        let mut word = [0u8; 32];
        word[0] = 3;
        word[1] = b'a';
        word[2] = b'b';
        assert_eq!(fe, FieldElement::from_be_bytes_mod_order(&word));
    }

    #[test]
    fn empty_string_is_not_zero() {
        let mut word = [0u8; 32];
        word[0] = 1;
        let empty = label_to_field_element("").unwrap();
        assert_ne!(empty, FieldElement::zero());
        assert_eq!(empty, FieldElement::from_be_bytes_mod_order(&word));
    }

    #[test]
    fn trailing_nul_does_not_collide() {
        let a = label_to_field_element("a").unwrap();
        let b = label_to_field_element("a\0").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn boundary_between_packed_and_hashed() {
        let packed = "x".repeat(31);
        let hashed = "x".repeat(32);
        let a = label_to_field_element(&packed).unwrap();
        let b = label_to_field_element(&hashed).unwrap();
        assert_ne!(a, b);
        assert_eq!(b, label_to_field_element(&hashed).unwrap());
    }

    #[test]
    fn long_strings_differ_by_suffix() {
        let base = "urn:uuid:3f1b2a7e-9c4d-4e6f-8a1b-2c3d4e5f6a7b";
        let a = label_to_field_element(base).unwrap();
        let b = label_to_field_element(&format!("{base}0")).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn float_rejected() {
        let err = to_field_element(&AttributeValue::Float(1.5)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnsupportedFieldType);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Same value, same element.
        #[test]
        fn deterministic(s in ".{0,64}") {
            prop_assert_eq!(
                label_to_field_element(&s).unwrap(),
                label_to_field_element(&s).unwrap()
            );
        }

        /// Distinct short strings never collide.
        #[test]
        fn short_strings_injective(a in "[ -~]{0,31}", b in "[ -~]{0,31}") {
            prop_assume!(a != b);
            prop_assert_ne!(
                label_to_field_element(&a).unwrap(),
                label_to_field_element(&b).unwrap()
            );
        }

        /// Integers never collide with booleans or short strings.
        #[test]
        fn integers_disjoint_from_other_types(i in any::<i64>(), b in any::<bool>(), s in "[ -~]{0,31}") {
            let int = to_field_element(&AttributeValue::Integer(i)).unwrap();
            prop_assert_ne!(int, to_field_element(&AttributeValue::Boolean(b)).unwrap());
            prop_assert_ne!(int, label_to_field_element(&s).unwrap());
        }

        /// Distinct integers never collide within the i64 range.
        #[test]
        fn integers_injective(a in any::<i64>(), b in any::<i64>()) {
            prop_assume!(a != b);
            prop_assert_ne!(
                to_field_element(&AttributeValue::Integer(a)).unwrap(),
                to_field_element(&AttributeValue::Integer(b)).unwrap()
            );
        }
    }
}
