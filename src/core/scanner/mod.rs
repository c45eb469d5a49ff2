//! # Scanner Module
//!
//! Collects image files for batch hashing.
//!
//! ## Supported Formats
//! - JPEG (.jpg, .jpeg)
//! - PNG (.png)
//! - WebP (.webp)
//! - GIF (.gif)
//! - BMP (.bmp)
//! - TIFF (.tiff, .tif)
//!
//! ## Example
//! ```rust,ignore
//! use image_fingerprint::core::scanner::{ImageScanner, ScanConfig, WalkDirScanner};
//!
//! let scanner = WalkDirScanner::new(ScanConfig::default());
//! let result = scanner.scan(&["/Users/photos".into()]);
//! ```

mod filter;
mod walker;

pub use filter::ImageFilter;
pub use walker::{ScanConfig, WalkDirScanner};

use crate::core::hasher::ImageFormat;
use crate::error::ScanError;
use std::path::PathBuf;

/// A discovered image file
#[derive(Debug, Clone)]
pub struct ImageFile {
    pub path: PathBuf,
    /// File size in bytes
    pub size: u64,
    pub format: ImageFormat,
}

/// Result of a scan operation
#[derive(Debug, Default)]
pub struct ScanResult {
    /// Successfully discovered images, in walk order
    pub images: Vec<ImageFile>,
    /// Errors that occurred during scanning (non-fatal)
    pub errors: Vec<ScanError>,
}

/// Trait for image scanners
///
/// Implement this trait to create custom scanners (e.g., for testing).
pub trait ImageScanner: Send + Sync {
    /// Collect images from files and directories.
    ///
    /// Files are taken as given; directories are walked. Missing paths are
    /// reported in [`ScanResult::errors`].
    fn scan(&self, paths: &[PathBuf]) -> ScanResult;
}
