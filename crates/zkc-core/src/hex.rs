//! Lowercase hex helpers shared by the field, key and proof types.

/// Encode bytes as lowercase hex.
pub fn encode(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

/// Decode a hex string (case-insensitive, surrounding whitespace ignored).
pub fn decode(hex: &str) -> Result<Vec<u8>, String> {
    let hex = hex.trim();
    if hex.len() % 2 != 0 {
        return Err("hex string must have even length".to_string());
    }
    (0..hex.len())
        .step_by(2)
        .map(|i| {
            hex.get(i..i + 2)
                .ok_or_else(|| format!("invalid hex at position {i}"))
                .and_then(|pair| {
                    u8::from_str_radix(pair, 16)
                        .map_err(|e| format!("invalid hex at position {i}: {e}"))
                })
        })
        .collect()
}

/// Decode a hex string into a fixed-size array.
pub fn decode_array<const N: usize>(hex: &str) -> Result<[u8; N], String> {
    let bytes = decode(hex)?;
    if bytes.len() != N {
        return Err(format!("expected {N} bytes, got {}", bytes.len()));
    }
    let mut out = [0u8; N];
    out.copy_from_slice(&bytes);
    Ok(out)
}

/// First four bytes as hex, for redacted `Debug` output.
pub fn prefix(bytes: &[u8]) -> String {
    encode(&bytes[..bytes.len().min(4)])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_decode() {
        assert_eq!(encode(&[0xde, 0xad, 0x01]), "dead01");
        assert_eq!(decode("DEAD01").unwrap(), vec![0xde, 0xad, 0x01]);
    }

    #[test]
    fn decode_rejects_odd_length_and_garbage() {
        assert!(decode("abc").is_err());
        assert!(decode("zz").is_err());
        assert!(decode("é1").is_err());
    }

    #[test]
    fn decode_array_checks_length() {
        assert!(decode_array::<2>("aabb").is_ok());
        assert!(decode_array::<3>("aabb").is_err());
    }
}
