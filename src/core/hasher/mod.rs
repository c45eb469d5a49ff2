//! # Hasher Module
//!
//! Computes perceptual hashes for images.
//!
//! ## Supported Algorithms
//! - **pHash (Perceptual Hash)** - Most robust, handles edits well
//! - **aHash (Average Hash)** - Fastest, good for exact duplicates
//! - **dHash (Difference Hash)** - Horizontal or vertical gradients
//!
//! ## How It Works
//! 1. Convert to grayscale and resize to a small grid (Lanczos3)
//! 2. For pHash, keep the low-frequency DCT block
//! 3. Threshold every cell into one bit
//! 4. Compare fingerprints using Hamming distance
//!
//! ## Performance Optimizations
//! - Uses `zune-jpeg` for faster JPEG decoding
//! - Uses `fast_image_resize` for SIMD-accelerated resizing
//! - Power-of-two DCT grids go through a butterfly transform
//!
//! ## Example
//! ```rust,ignore
//! use image_fingerprint::core::hasher::{HasherConfig, HashAlgorithmKind};
//!
//! let hasher = HasherConfig::new()
//!     .algorithm(HashAlgorithmKind::Difference)
//!     .hash_size(16)
//!     .build()?;
//!
//! let hash = hasher.hash_file(&path)?;
//! ```

mod algorithms;
pub mod fast_decode;
pub mod fast_resize;
pub mod normalize;
pub mod threshold;
mod traits;

pub use algorithms::{
    average_bits, horizontal_bits, perceptual_bits, vertical_bits, AverageHasher,
    DifferenceHasher, Direction, PerceptualHasher,
};
pub use fast_decode::{FastDecoder, ImageFormat};
pub use normalize::{LanczosNormalizer, PixelNormalizer, PremultipliedRgba, SampleSource};
pub use traits::{HashAlgorithm, HashAlgorithmKind};

use crate::core::fingerprint::Fingerprint;
use crate::error::HashError;
use image::DynamicImage;
use std::sync::Arc;

/// Side length used when the requested hash size is below 2
pub const DEFAULT_HASH_SIZE: u32 = 8;

/// Oversampling used when the requested factor is below 1
pub const DEFAULT_HIGH_FREQ_FACTOR: u32 = 4;

fn resolve_hash_size(size: u32) -> u32 {
    if size < 2 {
        tracing::debug!(requested = size, fallback = DEFAULT_HASH_SIZE, "hash size too small");
        DEFAULT_HASH_SIZE
    } else {
        size
    }
}

fn resolve_high_freq_factor(factor: u32) -> u32 {
    if factor < 1 {
        tracing::debug!(
            requested = factor,
            fallback = DEFAULT_HIGH_FREQ_FACTOR,
            "high frequency factor too small"
        );
        DEFAULT_HIGH_FREQ_FACTOR
    } else {
        factor
    }
}

/// Configuration builder for hashers
#[derive(Clone)]
pub struct HasherConfig {
    /// Side length of the fingerprint
    hash_size: u32,
    /// pHash oversampling factor
    high_freq_factor: u32,
    /// Algorithm to use
    algorithm: HashAlgorithmKind,
    normalizer: Arc<dyn PixelNormalizer>,
}

impl HasherConfig {
    /// Create a new hasher configuration with defaults
    pub fn new() -> Self {
        Self {
            hash_size: DEFAULT_HASH_SIZE,
            high_freq_factor: DEFAULT_HIGH_FREQ_FACTOR,
            algorithm: HashAlgorithmKind::Perceptual,
            normalizer: Arc::new(LanczosNormalizer::new()),
        }
    }

    /// Set the hash size
    ///
    /// A size of N gives an N x N fingerprint.
    /// - 8: 64 bits, fast, good for most uses
    /// - 16: 256 bits, more accurate
    /// - 32: 1024 bits, very accurate, slower
    ///
    /// Sizes below 2 fall back to 8.
    pub fn hash_size(mut self, size: u32) -> Self {
        self.hash_size = size;
        self
    }

    /// Set the pHash oversampling factor. Values below 1 fall back to 4.
    pub fn high_freq_factor(mut self, factor: u32) -> Self {
        self.high_freq_factor = factor;
        self
    }

    /// Set the hash algorithm
    pub fn algorithm(mut self, algorithm: HashAlgorithmKind) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Replace the grayscale/resize stage
    pub fn normalizer(mut self, normalizer: Arc<dyn PixelNormalizer>) -> Self {
        self.normalizer = normalizer;
        self
    }

    /// Build the hasher
    pub fn build(self) -> Result<Box<dyn HashAlgorithm>, HashError> {
        let size = resolve_hash_size(self.hash_size);
        let normalizer = self.normalizer;

        match self.algorithm {
            HashAlgorithmKind::Average => {
                Ok(Box::new(AverageHasher::with_normalizer(size, normalizer)))
            }
            HashAlgorithmKind::Perceptual => Ok(Box::new(PerceptualHasher::with_normalizer(
                size,
                resolve_high_freq_factor(self.high_freq_factor),
                normalizer,
            ))),
            HashAlgorithmKind::Difference => Ok(Box::new(DifferenceHasher::with_normalizer(
                size,
                Direction::Horizontal,
                normalizer,
            ))),
            HashAlgorithmKind::DifferenceVertical => Ok(Box::new(
                DifferenceHasher::with_normalizer(size, Direction::Vertical, normalizer),
            )),
        }
    }
}

impl Default for HasherConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for HasherConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HasherConfig")
            .field("hash_size", &self.hash_size)
            .field("high_freq_factor", &self.high_freq_factor)
            .field("algorithm", &self.algorithm)
            .finish_non_exhaustive()
    }
}

/// Average hash of `image` on a `size x size` grid
pub fn average_hash(image: &DynamicImage, size: u32) -> Result<Fingerprint, HashError> {
    AverageHasher::new(resolve_hash_size(size)).hash_image(image)
}

/// Perceptual hash of `image`: a `size x size` block of DCT coefficients taken
/// from a `(size * high_freq_factor)` square grid
pub fn perceptual_hash(
    image: &DynamicImage,
    size: u32,
    high_freq_factor: u32,
) -> Result<Fingerprint, HashError> {
    PerceptualHasher::new(
        resolve_hash_size(size),
        resolve_high_freq_factor(high_freq_factor),
    )
    .hash_image(image)
}

/// Horizontal difference hash of `image`
pub fn difference_hash(image: &DynamicImage, size: u32) -> Result<Fingerprint, HashError> {
    DifferenceHasher::new(resolve_hash_size(size)).hash_image(image)
}

/// Vertical difference hash of `image`
pub fn difference_hash_vertical(
    image: &DynamicImage,
    size: u32,
) -> Result<Fingerprint, HashError> {
    DifferenceHasher::vertical(resolve_hash_size(size)).hash_image(image)
}
