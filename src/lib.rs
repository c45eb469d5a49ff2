//! # Image Fingerprint
//!
//! Perceptual image hashing: visually similar images produce fingerprints
//! at a small Hamming distance.
//!
//! ## Algorithms
//! - **aHash** - samples against their mean
//! - **pHash** - low DCT frequencies against their median
//! - **dHash** - neighbouring samples, horizontally or vertically
//!
//! ## Architecture
//! - `core` - Transforms, hashers, fingerprints and comparison
//! - `error` - Error types grouped by phase
//!
//! ## Example
//! ```rust,ignore
//! use image_fingerprint::core::hasher::perceptual_hash;
//!
//! let image = image::open("photo.jpg")?;
//! let fingerprint = perceptual_hash(&image, 8, 4)?;
//! println!("{}", fingerprint.to_hex());
//! ```

pub mod core;
pub mod error;

// Re-export commonly used types at the crate root
pub use crate::core::hasher::{
    average_hash, difference_hash, difference_hash_vertical, perceptual_hash,
};
pub use crate::core::{hamming_distance, Fingerprint, HashAlgorithmKind, HasherConfig};
pub use error::{ImageHashError, Result};

/// Initialize tracing for the library
///
/// This should be called by the application entry point.
pub fn init_tracing() {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set global default tracing subscriber");
}
