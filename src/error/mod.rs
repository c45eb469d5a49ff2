//! # Error Module
//!
//! Error types for fingerprint computation and comparison.
//!
//! ## Design Principles
//! - **Never panic** on caller data - return errors instead
//! - **Include context** - paths, shapes, offending characters
//! - **Group by phase** - hashing, fingerprint handling, transform, scanning

use std::path::PathBuf;
use thiserror::Error;

/// Top-level library error
#[derive(Error, Debug)]
pub enum ImageHashError {
    #[error("Hashing error: {0}")]
    Hash(#[from] HashError),

    #[error("Fingerprint error: {0}")]
    Fingerprint(#[from] FingerprintError),

    #[error("Transform error: {0}")]
    Dct(#[from] DctError),

    #[error("Scanning error: {0}")]
    Scan(#[from] ScanError),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Errors that occur while turning an image into a fingerprint
#[derive(Error, Debug)]
pub enum HashError {
    #[error("Failed to decode image {path}: {reason}")]
    DecodeError { path: PathBuf, reason: String },

    #[error("Failed to open image file {path}: {source}")]
    IoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Image has no pixels ({width}x{height})")]
    EmptyImage { width: u32, height: u32 },

    #[error("Resize failed: {0}")]
    ResizeFailed(String),

    #[error("Sample grid for hash size {hash_size} (x{multiplier}) does not fit in u32")]
    GridTooLarge { hash_size: u32, multiplier: u32 },

    #[error(transparent)]
    Dct(#[from] DctError),
}

/// Errors raised by fingerprint construction, hex decoding and comparison
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FingerprintError {
    #[error(
        "Fingerprints must be of the same shape: ({left_rows}, {left_cols}) vs ({right_rows}, {right_cols})"
    )]
    ShapeMismatch {
        left_rows: usize,
        left_cols: usize,
        right_rows: usize,
        right_cols: usize,
    },

    #[error("Invalid hex character {character:?} at position {position}")]
    InvalidHexCharacter { character: char, position: usize },

    #[error("{bits} bits cannot fill a {rows}x{cols} fingerprint")]
    BitCountMismatch { bits: usize, rows: usize, cols: usize },
}

/// Errors raised by the DCT engine
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DctError {
    /// The fixed-size fast path only exists for 4, 8, 16, 32 and 64.
    #[error("No fixed-size transform for length {size} (supported: 4, 8, 16, 32, 64)")]
    InvalidFixedSize { size: usize },

    #[error("{len} values cannot fill a {rows}x{cols} matrix")]
    DataLength { rows: usize, cols: usize, len: usize },

    #[error("Low-frequency block {block}x{block} exceeds the {rows}x{cols} input")]
    BlockTooLarge { block: usize, rows: usize, cols: usize },
}

/// Errors that occur while collecting image files
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Path not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    #[error("Permission denied: {path}")]
    PermissionDenied { path: PathBuf },

    #[error("Failed to read {path}: {source}")]
    ReadDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience Result type alias
pub type Result<T> = std::result::Result<T, ImageHashError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shape_mismatch_reports_both_shapes() {
        let error = FingerprintError::ShapeMismatch {
            left_rows: 8,
            left_cols: 8,
            right_rows: 16,
            right_cols: 16,
        };
        let message = error.to_string();
        assert!(message.contains("(8, 8)"));
        assert!(message.contains("(16, 16)"));
    }

    #[test]
    fn invalid_hex_character_names_the_character() {
        let error = FingerprintError::InvalidHexCharacter {
            character: 'g',
            position: 3,
        };
        let message = error.to_string();
        assert!(message.contains("'g'"));
        assert!(message.contains('3'));
    }

    #[test]
    fn decode_error_includes_path() {
        let error = HashError::DecodeError {
            path: PathBuf::from("/photos/broken.jpg"),
            reason: "invalid JPEG".to_string(),
        };
        let message = error.to_string();
        assert!(message.contains("/photos/broken.jpg"));
        assert!(message.contains("invalid JPEG"));
    }

    #[test]
    fn dct_error_converts_into_top_level() {
        let error: ImageHashError = DctError::InvalidFixedSize { size: 48 }.into();
        assert!(matches!(error, ImageHashError::Dct(DctError::InvalidFixedSize { size: 48 })));
    }
}
