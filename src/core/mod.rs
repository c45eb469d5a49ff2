//! # Core Module
//!
//! The perceptual hashing engine.
//!
//! ## Modules
//! - `matrix` - Row-major pixel and coefficient grids
//! - `dct` - DCT-II transforms, general and fixed-size
//! - `hasher` - Normalization and the four hash algorithms
//! - `fingerprint` - Bit grids and their hex form
//! - `comparator` - Hamming distance and match classification
//! - `scanner` - Collects image files for batch hashing

pub mod comparator;
pub mod dct;
pub mod fingerprint;
pub mod hasher;
pub mod matrix;
pub mod scanner;

// Re-export commonly used types
pub use comparator::{hamming_distance, MatchResult, MatchType};
pub use fingerprint::Fingerprint;
pub use hasher::{HashAlgorithm, HashAlgorithmKind, HasherConfig};
pub use matrix::{FrequencyMatrix, Matrix, PixelMatrix};
pub use scanner::ImageFile;
