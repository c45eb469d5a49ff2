//! # Fingerprint Module
//!
//! The bit-vector value every hash algorithm produces.
//!
//! A fingerprint is an ordered, row-major sequence of `rows * cols` bits.
//! Its only persisted form is the hex string from [`Fingerprint::to_hex`];
//! serde serialisation uses the same string.
//!
//! ## Hex and shape
//! Hex text carries no shape. [`Fingerprint::from_hex`] assumes a square
//! fingerprint and sets `rows = cols = floor(sqrt(bit_count))` without
//! checking that the bit count is a perfect square. Every hash this crate
//! produces is square, so this only matters for hex from elsewhere.

mod codec;

pub use codec::{decode_hex, encode_hex};

use crate::core::comparator::hamming_distance;
use crate::error::FingerprintError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A perceptual fingerprint with its `(rows, cols)` shape
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Fingerprint {
    bits: Vec<bool>,
    rows: usize,
    cols: usize,
}

impl Fingerprint {
    /// Create a fingerprint, checking that `bits.len() == rows * cols`
    pub fn new(bits: Vec<bool>, rows: usize, cols: usize) -> Result<Self, FingerprintError> {
        if bits.len() != rows * cols {
            return Err(FingerprintError::BitCountMismatch {
                bits: bits.len(),
                rows,
                cols,
            });
        }
        Ok(Self { bits, rows, cols })
    }

    /// Build a fingerprint by evaluating `bit(row, col)` in row-major order
    pub fn from_fn(rows: usize, cols: usize, mut bit: impl FnMut(usize, usize) -> bool) -> Self {
        let mut bits = Vec::with_capacity(rows * cols);
        for row in 0..rows {
            for col in 0..cols {
                bits.push(bit(row, col));
            }
        }
        Self { bits, rows, cols }
    }

    /// Decode hex produced by [`to_hex`](Self::to_hex).
    ///
    /// The shape is taken to be square; see the module docs.
    pub fn from_hex(hex: &str) -> Result<Self, FingerprintError> {
        let bits = decode_hex(hex)?;
        let side = square_side(bits.len());
        Ok(Self {
            bits,
            rows: side,
            cols: side,
        })
    }

    /// Lowercase hex, one character per four bits
    pub fn to_hex(&self) -> String {
        encode_hex(&self.bits)
    }

    pub fn bits(&self) -> &[bool] {
        &self.bits
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// `(rows, cols)`
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Number of bits
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Number of set bits
    pub fn count_ones(&self) -> usize {
        self.bits.iter().filter(|&&bit| bit).count()
    }

    /// Hamming distance to `other`.
    ///
    /// Fails with [`FingerprintError::ShapeMismatch`] when the shapes differ.
    pub fn distance(&self, other: &Fingerprint) -> Result<u32, FingerprintError> {
        hamming_distance(self, other)
    }

    /// Similarity as a percentage (0-100)
    pub fn similarity(&self, other: &Fingerprint) -> Result<f64, FingerprintError> {
        let distance = self.distance(other)?;
        if self.is_empty() {
            return Ok(100.0);
        }
        Ok((1.0 - distance as f64 / self.len() as f64) * 100.0)
    }
}

/// Largest `side` with `side * side <= bits`
fn square_side(bits: usize) -> usize {
    let mut side = (bits as f64).sqrt() as usize;
    while side * side > bits {
        side -= 1;
    }
    while (side + 1) * (side + 1) <= bits {
        side += 1;
    }
    side
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Fingerprint {
    type Err = FingerprintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl From<Fingerprint> for String {
    fn from(fingerprint: Fingerprint) -> Self {
        fingerprint.to_hex()
    }
}

impl TryFrom<String> for Fingerprint {
    type Error = FingerprintError;

    fn try_from(hex: String) -> Result<Self, Self::Error> {
        Self::from_hex(&hex)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pattern(rows: usize, cols: usize) -> Fingerprint {
        Fingerprint::from_fn(rows, cols, |r, c| (r * 3 + c * 5) % 4 == 1)
    }

    #[test]
    fn new_checks_bit_count() {
        assert!(Fingerprint::new(vec![true; 4], 2, 2).is_ok());
        assert_eq!(
            Fingerprint::new(vec![true; 5], 2, 2),
            Err(FingerprintError::BitCountMismatch {
                bits: 5,
                rows: 2,
                cols: 2
            })
        );
    }

    #[test]
    fn hex_round_trip_for_square_shapes() {
        for side in [2, 4, 5, 8, 16] {
            let fingerprint = pattern(side, side);
            let decoded = Fingerprint::from_hex(&fingerprint.to_hex()).unwrap();
            if side * side % 4 == 0 {
                assert_eq!(decoded, fingerprint);
            } else {
                // Padding bits come back as trailing zeros
                assert_eq!(&decoded.bits()[..side * side], fingerprint.bits());
            }
        }
    }

    #[test]
    fn from_hex_assumes_square_shape() {
        let fingerprint = Fingerprint::from_hex("ffff").unwrap();
        assert_eq!(fingerprint.shape(), (4, 4));

        // 24 bits is not a perfect square; the shape is floor(sqrt(24)) = 4
        let fingerprint = Fingerprint::from_hex("abcdef").unwrap();
        assert_eq!(fingerprint.shape(), (4, 4));
        assert_eq!(fingerprint.len(), 24);
    }

    #[test]
    fn from_hex_reports_invalid_character() {
        assert!(matches!(
            Fingerprint::from_hex("00x0"),
            Err(FingerprintError::InvalidHexCharacter { character: 'x', position: 2 })
        ));
    }

    #[test]
    fn display_and_from_str_use_hex() {
        let fingerprint = pattern(8, 8);
        let text = fingerprint.to_string();
        assert_eq!(text, fingerprint.to_hex());
        assert_eq!(text.parse::<Fingerprint>().unwrap(), fingerprint);
    }

    #[test]
    fn serializes_as_hex_string() {
        let fingerprint = Fingerprint::from_hex("8f00").unwrap();
        let json = serde_json::to_string(&fingerprint).unwrap();
        assert_eq!(json, "\"8f00\"");

        let restored: Fingerprint = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, fingerprint);
    }

    #[test]
    fn deserialize_rejects_bad_hex() {
        let result: Result<Fingerprint, _> = serde_json::from_str("\"zz\"");
        assert!(result.is_err());
    }

    #[test]
    fn similarity_is_100_for_identical() {
        let fingerprint = pattern(8, 8);
        assert_eq!(fingerprint.similarity(&fingerprint).unwrap(), 100.0);
    }

    #[test]
    fn similarity_is_0_for_opposite() {
        let a = Fingerprint::from_hex("ffff").unwrap();
        let b = Fingerprint::from_hex("0000").unwrap();
        assert_eq!(a.similarity(&b).unwrap(), 0.0);
    }

    #[test]
    fn count_ones_counts_set_bits() {
        assert_eq!(Fingerprint::from_hex("f1").unwrap().count_ones(), 5);
    }

    #[test]
    fn square_side_is_floor_sqrt() {
        assert_eq!(square_side(0), 0);
        assert_eq!(square_side(3), 1);
        assert_eq!(square_side(64), 8);
        assert_eq!(square_side(80), 8);
        assert_eq!(square_side(81), 9);
    }
}
