//! Perceptual Hash (pHash) implementation.
//!
//! pHash uses the Discrete Cosine Transform (DCT) to extract
//! frequency information from the image. This makes it more
//! robust to:
//! - Scaling
//! - Minor rotations
//! - Brightness/contrast changes
//! - Compression artifacts
//!
//! The image is normalized to a (hash_size * factor) square, only the
//! top-left hash_size x hash_size block of coefficients is computed, and
//! each coefficient is compared to the block median.

use super::super::normalize::{LanczosNormalizer, PixelNormalizer};
use super::super::threshold::median;
use super::super::traits::{HashAlgorithm, HashAlgorithmKind};
use crate::core::dct::low_frequency_block;
use crate::core::fingerprint::Fingerprint;
use crate::core::matrix::PixelMatrix;
use crate::error::{DctError, HashError};
use image::DynamicImage;
use std::sync::Arc;

/// Set a bit for every low-frequency coefficient strictly above the median
/// of the `hash_size x hash_size` block.
pub fn perceptual_bits(pixels: &PixelMatrix, hash_size: usize) -> Result<Fingerprint, DctError> {
    let block = low_frequency_block(&pixels.to_f64(), hash_size)?;
    let threshold = median(block.as_slice());

    Ok(Fingerprint::from_fn(block.rows(), block.cols(), |row, col| {
        block.get(row, col) > threshold
    }))
}

/// Perceptual Hash (pHash) implementation using DCT
pub struct PerceptualHasher {
    hash_size: u32,
    /// Oversampling factor for the transformed grid
    high_freq_factor: u32,
    normalizer: Arc<dyn PixelNormalizer>,
}

impl PerceptualHasher {
    /// Create a new pHash hasher
    pub fn new(hash_size: u32, high_freq_factor: u32) -> Self {
        Self::with_normalizer(
            hash_size,
            high_freq_factor,
            Arc::new(LanczosNormalizer::new()),
        )
    }

    pub fn with_normalizer(
        hash_size: u32,
        high_freq_factor: u32,
        normalizer: Arc<dyn PixelNormalizer>,
    ) -> Self {
        Self {
            hash_size,
            high_freq_factor,
            normalizer,
        }
    }

    pub fn high_freq_factor(&self) -> u32 {
        self.high_freq_factor
    }

    fn sample_size(&self) -> Result<u32, HashError> {
        self.hash_size
            .checked_mul(self.high_freq_factor)
            .ok_or(HashError::GridTooLarge {
                hash_size: self.hash_size,
                multiplier: self.high_freq_factor,
            })
    }
}

impl HashAlgorithm for PerceptualHasher {
    fn hash_image(&self, image: &DynamicImage) -> Result<Fingerprint, HashError> {
        let side = self.sample_size()?;
        let pixels = self.normalizer.normalize(image, side, side)?;
        let fingerprint = perceptual_bits(&pixels, self.hash_size as usize)?;

        tracing::debug!(
            hash_size = self.hash_size,
            sample_size = side,
            ones = fingerprint.count_ones(),
            "computed perceptual hash"
        );
        Ok(fingerprint)
    }

    fn kind(&self) -> HashAlgorithmKind {
        HashAlgorithmKind::Perceptual
    }

    fn hash_size(&self) -> u32 {
        self.hash_size
    }
}
