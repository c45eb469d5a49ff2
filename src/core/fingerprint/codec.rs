//! Hex text encoding of fingerprint bits.
//!
//! Bits are packed four at a time in their original order, most significant
//! bit first within each nibble. A trailing partial nibble is padded with
//! zero low bits. Output is lowercase; decoding accepts either case.

use crate::error::FingerprintError;

const HEX_DIGITS: &[u8; 16] = b"0123456789abcdef";

/// Encode bits as lowercase hex, `ceil(bits.len() / 4)` characters long
pub fn encode_hex(bits: &[bool]) -> String {
    bits.chunks(4)
        .map(|nibble| {
            let value = nibble.iter().enumerate().fold(0u8, |acc, (j, &bit)| {
                if bit {
                    acc | 1 << (3 - j)
                } else {
                    acc
                }
            });
            char::from(HEX_DIGITS[value as usize])
        })
        .collect()
}

/// Decode hex into `4 * hex.len()` bits
pub fn decode_hex(hex: &str) -> Result<Vec<bool>, FingerprintError> {
    let mut bits = Vec::with_capacity(hex.len() * 4);
    for (position, character) in hex.chars().enumerate() {
        let value = character
            .to_digit(16)
            .ok_or(FingerprintError::InvalidHexCharacter {
                character,
                position,
            })?;
        bits.extend((0..4).map(|j| value & (1 << (3 - j)) != 0));
    }
    Ok(bits)
}
