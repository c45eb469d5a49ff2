//! # Comparator Module
//!
//! Compares fingerprints by Hamming distance.
//!
//! ## How It Works
//! 1. Check both fingerprints have the same `(rows, cols)` shape
//! 2. Count the bit positions where they differ
//! 3. Optionally classify the distance with a comparison strategy
//!
//! ## Classification Bands
//! Bands are given for 64 bits and scale linearly with the bit count, so a
//! 16x16 fingerprint is near-exact up to 16 differing bits.
//!
//! | Distance (64 bits) | Classification |
//! |--------------------|----------------|
//! | 0                  | Exact match    |
//! | 1-4                | Near-exact     |
//! | 5-10               | Similar        |
//! | 11+                | Maybe similar  |

mod traits;

pub use traits::{ComparisonStrategy, ThresholdStrategy, DEFAULT_THRESHOLD_64};

use crate::core::fingerprint::Fingerprint;
use crate::error::FingerprintError;
use serde::{Deserialize, Serialize};

/// Count the positions where `a` and `b` differ.
///
/// Fails with [`FingerprintError::ShapeMismatch`] unless both have the same
/// rows and cols. Fingerprints decoded from hex of unequal length can share
/// a shape; only their common prefix is compared.
pub fn hamming_distance(a: &Fingerprint, b: &Fingerprint) -> Result<u32, FingerprintError> {
    if a.shape() != b.shape() {
        return Err(FingerprintError::ShapeMismatch {
            left_rows: a.rows(),
            left_cols: a.cols(),
            right_rows: b.rows(),
            right_cols: b.cols(),
        });
    }

    let distance = a
        .bits()
        .iter()
        .zip(b.bits())
        .filter(|(left, right)| left != right)
        .count();
    Ok(distance as u32)
}

/// Rescale a distance quoted for 64-bit fingerprints to `bit_count` bits.
pub fn scale_to_bits(distance_at_64: u32, bit_count: usize) -> u32 {
    let scaled = u128::from(distance_at_64) * bit_count as u128 / 64;
    u32::try_from(scaled).unwrap_or(u32::MAX)
}

/// Result of comparing two fingerprints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchResult {
    /// Hamming distance between the fingerprints
    pub distance: u32,
    /// Similarity as a percentage (0-100)
    pub similarity_percent: f64,
    /// Classification of the match
    pub match_type: MatchType,
    /// Whether the strategy considers the pair a duplicate
    pub is_duplicate: bool,
}

/// Classification of match types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchType {
    /// Distance = 0, identical perceptual content
    Exact,
    /// Up to 4 of 64 bits, virtually identical
    NearExact,
    /// Up to 10 of 64 bits, likely the same picture
    Similar,
    /// Possibly related
    MaybeSimilar,
}

impl MatchType {
    /// Classify a Hamming distance over `bit_count` compared bits
    pub fn from_distance(distance: u32, bit_count: usize) -> Self {
        if distance == 0 {
            MatchType::Exact
        } else if distance <= scale_to_bits(4, bit_count) {
            MatchType::NearExact
        } else if distance <= scale_to_bits(10, bit_count) {
            MatchType::Similar
        } else {
            MatchType::MaybeSimilar
        }
    }
}

impl std::fmt::Display for MatchType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchType::Exact => write!(f, "Exact Match"),
            MatchType::NearExact => write!(f, "Near-Exact Match"),
            MatchType::Similar => write!(f, "Similar"),
            MatchType::MaybeSimilar => write!(f, "Possibly Similar"),
        }
    }
}

/// Compare two fingerprints and classify the result with `strategy`
pub fn compare(
    a: &Fingerprint,
    b: &Fingerprint,
    strategy: &dyn ComparisonStrategy,
) -> Result<MatchResult, FingerprintError> {
    let distance = hamming_distance(a, b)?;
    let bit_count = a.len().min(b.len());
    Ok(MatchResult {
        distance,
        similarity_percent: a.similarity(b)?,
        match_type: strategy.classify(distance, bit_count),
        is_duplicate: strategy.is_duplicate(distance, bit_count),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fingerprint(bits: &[bool], rows: usize, cols: usize) -> Fingerprint {
        Fingerprint::new(bits.to_vec(), rows, cols).unwrap()
    }

    #[test]
    fn distance_counts_differing_bits() {
        let a = fingerprint(&[true, true, false, false], 2, 2);
        let b = fingerprint(&[true, false, true, false], 2, 2);
        assert_eq!(hamming_distance(&a, &b).unwrap(), 2);
    }

    #[test]
    fn distance_to_self_is_zero() {
        let a = Fingerprint::from_hex("deadbeefcafef00d").unwrap();
        assert_eq!(hamming_distance(&a, &a).unwrap(), 0);
    }

    #[test]
    fn distance_is_symmetric() {
        let a = Fingerprint::from_hex("ff00ff00ff00ff00").unwrap();
        let b = Fingerprint::from_hex("0f0f0f0f0f0f0f0f").unwrap();
        assert_eq!(
            hamming_distance(&a, &b).unwrap(),
            hamming_distance(&b, &a).unwrap()
        );
    }

    #[test]
    fn distance_is_bounded_by_bit_count() {
        let a = Fingerprint::from_hex("ffffffffffffffff").unwrap();
        let b = Fingerprint::from_hex("0000000000000000").unwrap();
        assert_eq!(hamming_distance(&a, &b).unwrap(), 64);
    }

    #[test]
    fn shape_mismatch_is_an_error() {
        let a = fingerprint(&[true; 4], 2, 2);
        let b = fingerprint(&[true; 4], 1, 4);
        assert_eq!(
            hamming_distance(&a, &b),
            Err(FingerprintError::ShapeMismatch {
                left_rows: 2,
                left_cols: 2,
                right_rows: 1,
                right_cols: 4,
            })
        );
    }

    #[test]
    fn match_type_from_distance() {
        assert_eq!(MatchType::from_distance(0, 64), MatchType::Exact);
        assert_eq!(MatchType::from_distance(3, 64), MatchType::NearExact);
        assert_eq!(MatchType::from_distance(7, 64), MatchType::Similar);
        assert_eq!(MatchType::from_distance(15, 64), MatchType::MaybeSimilar);
    }

    #[test]
    fn match_bands_scale_with_fingerprint_size() {
        // 16x16: near-exact up to 16, similar up to 40
        assert_eq!(MatchType::from_distance(16, 256), MatchType::NearExact);
        assert_eq!(MatchType::from_distance(40, 256), MatchType::Similar);
        assert_eq!(MatchType::from_distance(41, 256), MatchType::MaybeSimilar);
        // 32x32
        assert_eq!(MatchType::from_distance(64, 1024), MatchType::NearExact);
        assert_eq!(MatchType::from_distance(100, 1024), MatchType::Similar);
        // 2x2 has no room for near matches
        assert_eq!(MatchType::from_distance(1, 4), MatchType::MaybeSimilar);
    }

    #[test]
    fn scale_to_bits_is_linear() {
        assert_eq!(scale_to_bits(8, 64), 8);
        assert_eq!(scale_to_bits(8, 256), 32);
        assert_eq!(scale_to_bits(10, 16), 2);
        assert_eq!(scale_to_bits(u32::MAX, usize::MAX), u32::MAX);
    }

    #[test]
    fn compare_classifies_with_strategy() {
        let a = Fingerprint::from_hex("ffffffffffffffff").unwrap();
        let b = Fingerprint::from_hex("fffffffffffffff0").unwrap();

        let result = compare(&a, &b, &ThresholdStrategy::new(5)).unwrap();
        assert_eq!(result.distance, 4);
        assert_eq!(result.match_type, MatchType::NearExact);
        assert!(result.is_duplicate);
        assert!((result.similarity_percent - 93.75).abs() < 1e-9);
    }

    #[test]
    fn compare_scales_default_threshold_for_large_fingerprints() {
        let a = Fingerprint::new(vec![false; 256], 16, 16).unwrap();
        let mut bits = vec![false; 256];
        bits[..20].iter_mut().for_each(|bit| *bit = true);
        let b = Fingerprint::new(bits, 16, 16).unwrap();

        let result = compare(&a, &b, &ThresholdStrategy::default()).unwrap();
        assert_eq!(result.distance, 20);
        assert_eq!(result.match_type, MatchType::Similar);
        assert!(result.is_duplicate);
    }
}
