//! Trait definitions for perceptual hashing.

use super::fast_decode::FastDecoder;
use crate::core::fingerprint::Fingerprint;
use crate::error::HashError;
use image::DynamicImage;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Available hash algorithms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HashAlgorithmKind {
    /// Average Hash (aHash) - Fast, good for exact duplicates
    Average,
    /// Perceptual Hash (pHash) - DCT based, most robust
    Perceptual,
    /// Difference Hash (dHash) - Horizontal brightness gradients
    Difference,
    /// Vertical Difference Hash - Vertical brightness gradients
    DifferenceVertical,
}

impl HashAlgorithmKind {
    pub const ALL: [HashAlgorithmKind; 4] = [
        HashAlgorithmKind::Average,
        HashAlgorithmKind::Perceptual,
        HashAlgorithmKind::Difference,
        HashAlgorithmKind::DifferenceVertical,
    ];

    /// Get a human-readable description of the algorithm
    pub fn description(&self) -> &'static str {
        match self {
            HashAlgorithmKind::Average => {
                "Average Hash (aHash) - Each sample compared to the mean brightness"
            }
            HashAlgorithmKind::Perceptual => {
                "Perceptual Hash (pHash) - Low DCT frequencies compared to their median"
            }
            HashAlgorithmKind::Difference => {
                "Difference Hash (dHash) - Each sample compared to its right neighbour"
            }
            HashAlgorithmKind::DifferenceVertical => {
                "Vertical Difference Hash - Each sample compared to the one below"
            }
        }
    }
}

impl std::fmt::Display for HashAlgorithmKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HashAlgorithmKind::Average => write!(f, "aHash"),
            HashAlgorithmKind::Perceptual => write!(f, "pHash"),
            HashAlgorithmKind::Difference => write!(f, "dHash"),
            HashAlgorithmKind::DifferenceVertical => write!(f, "dHash-v"),
        }
    }
}

/// Trait for hash algorithm implementations
pub trait HashAlgorithm: Send + Sync {
    /// Compute a fingerprint from an already-loaded image
    fn hash_image(&self, image: &DynamicImage) -> Result<Fingerprint, HashError>;

    /// Compute a fingerprint directly from a file path.
    ///
    /// JPEG files are decoded with zune-jpeg, everything else with the
    /// image crate.
    fn hash_file(&self, path: &Path) -> Result<Fingerprint, HashError> {
        let image = FastDecoder::decode(path)?;
        self.hash_image(&image)
    }

    /// Get the algorithm kind
    fn kind(&self) -> HashAlgorithmKind;

    /// Side length of the produced fingerprint
    fn hash_size(&self) -> u32;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn algorithm_kind_display() {
        assert_eq!(HashAlgorithmKind::Average.to_string(), "aHash");
        assert_eq!(HashAlgorithmKind::Perceptual.to_string(), "pHash");
        assert_eq!(HashAlgorithmKind::Difference.to_string(), "dHash");
        assert_eq!(HashAlgorithmKind::DifferenceVertical.to_string(), "dHash-v");
    }

    #[test]
    fn algorithm_kind_serializes_by_name() {
        let json = serde_json::to_string(&HashAlgorithmKind::DifferenceVertical).unwrap();
        assert_eq!(json, "\"DifferenceVertical\"");
    }

    #[test]
    fn every_kind_has_a_description() {
        for kind in HashAlgorithmKind::ALL {
            assert!(!kind.description().is_empty());
        }
    }
}
