//! Directory walking implementation using walkdir.

use super::{filter::ImageFilter, ImageFile, ImageScanner, ScanResult};
use crate::error::ScanError;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Configuration for the directory scanner
#[derive(Debug, Clone, Default)]
pub struct ScanConfig {
    /// Whether to follow symbolic links
    pub follow_symlinks: bool,
    /// Whether to include hidden files and directories
    pub include_hidden: bool,
    /// Maximum directory depth (None = unlimited)
    pub max_depth: Option<usize>,
    /// Custom extensions to include (None = use defaults)
    pub extensions: Option<Vec<String>>,
}

/// Scanner implementation using the walkdir crate
pub struct WalkDirScanner {
    config: ScanConfig,
    filter: ImageFilter,
}

impl WalkDirScanner {
    /// Create a new scanner with the given configuration
    pub fn new(config: ScanConfig) -> Self {
        let mut filter = ImageFilter::new().with_hidden(config.include_hidden);

        if let Some(ref extensions) = config.extensions {
            filter = filter.with_extensions(extensions.clone());
        }

        Self { config, filter }
    }

    fn image_file(&self, path: &Path) -> Result<ImageFile, ScanError> {
        let metadata = fs::metadata(path).map_err(|e| ScanError::ReadDirectory {
            path: path.to_path_buf(),
            source: e,
        })?;

        Ok(ImageFile {
            path: path.to_path_buf(),
            size: metadata.len(),
            format: self.filter.get_format(path),
        })
    }

    /// Walk a single directory
    fn scan_directory(&self, root: &Path, result: &mut ScanResult) {
        let mut walker = WalkDir::new(root)
            .follow_links(self.config.follow_symlinks)
            .sort_by_file_name();

        if let Some(depth) = self.config.max_depth {
            walker = walker.max_depth(depth);
        }

        let include_hidden = self.config.include_hidden;
        // Hidden directories are pruned, but the root is always walked.
        let entries = walker.into_iter().filter_entry(|entry| {
            include_hidden || entry.depth() == 0 || !ImageFilter::is_hidden(entry.path())
        });

        for entry_result in entries {
            match entry_result {
                Ok(entry) => {
                    let path = entry.path();
                    if entry.file_type().is_dir() || !self.filter.should_include(path) {
                        continue;
                    }

                    match self.image_file(path) {
                        Ok(image) => result.images.push(image),
                        Err(error) => {
                            tracing::warn!(path = %path.display(), %error, "skipping file");
                            result.errors.push(error);
                        }
                    }
                }
                Err(e) => {
                    let path = e.path().map(|p| p.to_path_buf()).unwrap_or_default();

                    let error = if e.io_error().map(|e| e.kind())
                        == Some(std::io::ErrorKind::PermissionDenied)
                    {
                        ScanError::PermissionDenied { path: path.clone() }
                    } else {
                        ScanError::ReadDirectory {
                            path: path.clone(),
                            source: std::io::Error::other(e.to_string()),
                        }
                    };

                    tracing::warn!(path = %path.display(), %error, "skipping entry");
                    result.errors.push(error);
                }
            }
        }
    }
}

impl ImageScanner for WalkDirScanner {
    fn scan(&self, paths: &[PathBuf]) -> ScanResult {
        let mut result = ScanResult::default();

        for path in paths {
            if path.is_dir() {
                self.scan_directory(path, &mut result);
            } else if path.is_file() {
                match self.image_file(path) {
                    Ok(image) => result.images.push(image),
                    Err(error) => {
                        tracing::warn!(path = %path.display(), %error, "skipping file");
                        result.errors.push(error);
                    }
                }
            } else {
                tracing::warn!(path = %path.display(), "path not found");
                result
                    .errors
                    .push(ScanError::DirectoryNotFound { path: path.clone() });
            }
        }

        tracing::debug!(
            images = result.images.len(),
            errors = result.errors.len(),
            "scan finished"
        );
        result
    }
}
