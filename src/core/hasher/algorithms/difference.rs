//! Difference Hash (dHash) implementation.
//!
//! dHash works by:
//! 1. Normalizing the image to a grid with one extra column (horizontal)
//!    or one extra row (vertical)
//! 2. Comparing each sample to its right (or lower) neighbour
//! 3. If the neighbour is strictly brighter, set bit to 1, else 0
//!
//! This captures the relative gradient of brightness changes.

use super::super::normalize::{LanczosNormalizer, PixelNormalizer};
use super::super::traits::{HashAlgorithm, HashAlgorithmKind};
use crate::core::fingerprint::Fingerprint;
use crate::core::matrix::PixelMatrix;
use crate::error::HashError;
use image::DynamicImage;
use std::sync::Arc;

/// Axis along which neighbouring samples are compared
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Horizontal,
    Vertical,
}

/// `bit[i][j] = p[i][j + 1] > p[i][j]` over a `rows x (cols + 1)` grid
pub fn horizontal_bits(pixels: &PixelMatrix) -> Fingerprint {
    let cols = pixels.cols().saturating_sub(1);
    Fingerprint::from_fn(pixels.rows(), cols, |row, col| {
        pixels.get(row, col + 1) > pixels.get(row, col)
    })
}

/// `bit[i][j] = p[i + 1][j] > p[i][j]` over a `(rows + 1) x cols` grid
pub fn vertical_bits(pixels: &PixelMatrix) -> Fingerprint {
    let rows = pixels.rows().saturating_sub(1);
    Fingerprint::from_fn(rows, pixels.cols(), |row, col| {
        pixels.get(row + 1, col) > pixels.get(row, col)
    })
}

/// Difference Hash (dHash) implementation
pub struct DifferenceHasher {
    /// Size of the hash (width and height of comparison grid)
    hash_size: u32,
    direction: Direction,
    normalizer: Arc<dyn PixelNormalizer>,
}

impl DifferenceHasher {
    /// Create a new horizontal dHash hasher
    pub fn new(hash_size: u32) -> Self {
        Self::with_direction(hash_size, Direction::Horizontal)
    }

    /// Create a dHash hasher comparing rows instead of columns
    pub fn vertical(hash_size: u32) -> Self {
        Self::with_direction(hash_size, Direction::Vertical)
    }

    pub fn with_direction(hash_size: u32, direction: Direction) -> Self {
        Self::with_normalizer(hash_size, direction, Arc::new(LanczosNormalizer::new()))
    }

    pub fn with_normalizer(
        hash_size: u32,
        direction: Direction,
        normalizer: Arc<dyn PixelNormalizer>,
    ) -> Self {
        Self {
            hash_size,
            direction,
            normalizer,
        }
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }
}

impl HashAlgorithm for DifferenceHasher {
    fn hash_image(&self, image: &DynamicImage) -> Result<Fingerprint, HashError> {
        let size = self.hash_size;
        // One extra column (or row) to compute differences
        let extended = size.checked_add(1).ok_or(HashError::GridTooLarge {
            hash_size: size,
            multiplier: 1,
        })?;
        let fingerprint = match self.direction {
            Direction::Horizontal => {
                let pixels = self.normalizer.normalize(image, extended, size)?;
                horizontal_bits(&pixels)
            }
            Direction::Vertical => {
                let pixels = self.normalizer.normalize(image, size, extended)?;
                vertical_bits(&pixels)
            }
        };

        tracing::debug!(
            hash_size = size,
            direction = ?self.direction,
            ones = fingerprint.count_ones(),
            "computed difference hash"
        );
        Ok(fingerprint)
    }

    fn kind(&self) -> HashAlgorithmKind {
        match self.direction {
            Direction::Horizontal => HashAlgorithmKind::Difference,
            Direction::Vertical => HashAlgorithmKind::DifferenceVertical,
        }
    }

    fn hash_size(&self) -> u32 {
        self.hash_size
    }
}
