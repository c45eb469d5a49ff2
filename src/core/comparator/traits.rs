//! Duplicate decisions over Hamming distances.

use super::{scale_to_bits, MatchType};

/// Cut-off for a 64-bit fingerprint when no explicit threshold is given
pub const DEFAULT_THRESHOLD_64: u32 = 8;

/// Decides whether a pair at some distance counts as a duplicate.
///
/// `bit_count` is the number of bits that were compared, so strategies can
/// treat an 8x8 and a 32x32 fingerprint consistently.
pub trait ComparisonStrategy: Send + Sync {
    fn is_duplicate(&self, distance: u32, bit_count: usize) -> bool;

    fn classify(&self, distance: u32, bit_count: usize) -> MatchType {
        MatchType::from_distance(distance, bit_count)
    }
}

/// `distance <= threshold`, where the threshold is either fixed or scaled
/// from [`DEFAULT_THRESHOLD_64`] to the fingerprint length.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ThresholdStrategy {
    threshold: Option<u32>,
}

impl ThresholdStrategy {
    /// Fixed threshold, whatever the fingerprint length
    pub fn new(threshold: u32) -> Self {
        Self {
            threshold: Some(threshold),
        }
    }

    /// 8 of 64 bits, 32 of 256 bits, and so on
    pub fn scaled() -> Self {
        Self { threshold: None }
    }

    pub fn threshold_for(&self, bit_count: usize) -> u32 {
        self.threshold
            .unwrap_or_else(|| scale_to_bits(DEFAULT_THRESHOLD_64, bit_count))
    }
}

impl ComparisonStrategy for ThresholdStrategy {
    fn is_duplicate(&self, distance: u32, bit_count: usize) -> bool {
        distance <= self.threshold_for(bit_count)
    }
}
