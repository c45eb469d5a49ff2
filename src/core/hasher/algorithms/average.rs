//! Average Hash (aHash) implementation.
//!
//! aHash works by:
//! 1. Normalizing the image to a hash_size x hash_size luma grid
//! 2. Computing the mean brightness
//! 3. For each sample: if strictly brighter than the mean, set bit to 1
//!
//! This is the fastest hash but less robust to edits.

use super::super::normalize::{LanczosNormalizer, PixelNormalizer};
use super::super::threshold::mean;
use super::super::traits::{HashAlgorithm, HashAlgorithmKind};
use crate::core::fingerprint::Fingerprint;
use crate::core::matrix::PixelMatrix;
use crate::error::HashError;
use image::DynamicImage;
use std::sync::Arc;

/// Set a bit for every sample strictly above the mean of all samples
pub fn average_bits(pixels: &PixelMatrix) -> Fingerprint {
    let samples: Vec<f64> = pixels.as_slice().iter().map(|&p| p as f64).collect();
    let average = mean(&samples);

    Fingerprint::from_fn(pixels.rows(), pixels.cols(), |row, col| {
        pixels.get(row, col) as f64 > average
    })
}

/// Average Hash (aHash) implementation
pub struct AverageHasher {
    /// Side length of the sample grid
    hash_size: u32,
    normalizer: Arc<dyn PixelNormalizer>,
}

impl AverageHasher {
    /// Create a new aHash hasher
    pub fn new(hash_size: u32) -> Self {
        Self::with_normalizer(hash_size, Arc::new(LanczosNormalizer::new()))
    }

    pub fn with_normalizer(hash_size: u32, normalizer: Arc<dyn PixelNormalizer>) -> Self {
        Self {
            hash_size,
            normalizer,
        }
    }
}

impl HashAlgorithm for AverageHasher {
    fn hash_image(&self, image: &DynamicImage) -> Result<Fingerprint, HashError> {
        let pixels = self
            .normalizer
            .normalize(image, self.hash_size, self.hash_size)?;
        let fingerprint = average_bits(&pixels);

        tracing::debug!(
            hash_size = self.hash_size,
            ones = fingerprint.count_ones(),
            "computed average hash"
        );
        Ok(fingerprint)
    }

    fn kind(&self) -> HashAlgorithmKind {
        HashAlgorithmKind::Average
    }

    fn hash_size(&self) -> u32 {
        self.hash_size
    }
}
