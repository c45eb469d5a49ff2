//! Fast SIMD-accelerated resizing of luma planes.
//!
//! Uses the fast_image_resize crate, which picks AVX2/NEON code paths when
//! available. Every resize uses the same Lanczos3 convolution so fingerprints
//! from different calls stay comparable.

use crate::error::HashError;
use fast_image_resize::{images::Image, FilterType, PixelType, ResizeAlg, ResizeOptions, Resizer};

/// Interpolation kernel shared by every normalization
pub const RESIZE_FILTER: FilterType = FilterType::Lanczos3;

/// Reusable resizer for single-channel 8-bit planes
pub struct FastResizer {
    resizer: Resizer,
    options: ResizeOptions,
}

impl FastResizer {
    /// Create a new fast resizer
    pub fn new() -> Self {
        Self {
            resizer: Resizer::new(),
            options: ResizeOptions::new().resize_alg(ResizeAlg::Convolution(RESIZE_FILTER)),
        }
    }

    /// Resize a row-major `src_width x src_height` luma plane to
    /// `width x height`.
    pub fn resize_plane(
        &mut self,
        plane: Vec<u8>,
        src_width: u32,
        src_height: u32,
        width: u32,
        height: u32,
    ) -> Result<Vec<u8>, HashError> {
        if src_width == 0 || src_height == 0 {
            return Err(HashError::EmptyImage {
                width: src_width,
                height: src_height,
            });
        }

        if width == 0 || height == 0 {
            return Err(HashError::ResizeFailed(format!(
                "Invalid destination dimensions {}x{}",
                width, height
            )));
        }

        let src_image = Image::from_vec_u8(src_width, src_height, plane, PixelType::U8)
            .map_err(|e| HashError::ResizeFailed(format!("Failed to create source image: {}", e)))?;

        let mut dst_image = Image::new(width, height, PixelType::U8);

        self.resizer
            .resize(&src_image, &mut dst_image, &self.options)
            .map_err(|e| HashError::ResizeFailed(e.to_string()))?;

        Ok(dst_image.into_vec())
    }
}

impl Default for FastResizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience function for one-off resizing
pub fn resize_plane(
    plane: Vec<u8>,
    src_width: u32,
    src_height: u32,
    width: u32,
    height: u32,
) -> Result<Vec<u8>, HashError> {
    FastResizer::new().resize_plane(plane, src_width, src_height, width, height)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient_plane(width: u32, height: u32) -> Vec<u8> {
        (0..height)
            .flat_map(|_| (0..width).map(move |x| (x * 255 / width.max(1)) as u8))
            .collect()
    }

    #[test]
    fn resize_produces_requested_length() {
        let resized = resize_plane(gradient_plane(100, 100), 100, 100, 8, 8).unwrap();
        assert_eq!(resized.len(), 64);
    }

    #[test]
    fn resize_non_square_target() {
        let resized = resize_plane(gradient_plane(200, 100), 200, 100, 9, 8).unwrap();
        assert_eq!(resized.len(), 72);
    }

    #[test]
    fn resize_preserves_gradient_direction() {
        let resized = resize_plane(gradient_plane(100, 100), 100, 100, 9, 8).unwrap();
        for row in resized.chunks(9) {
            assert!(row[8] > row[0], "{:?}", row);
        }
    }

    #[test]
    fn empty_source_is_rejected() {
        let result = resize_plane(Vec::new(), 0, 10, 8, 8);
        assert!(matches!(result, Err(HashError::EmptyImage { width: 0, height: 10 })));
    }

    #[test]
    fn zero_target_is_rejected() {
        let result = resize_plane(gradient_plane(4, 4), 4, 4, 0, 8);
        assert!(matches!(result, Err(HashError::ResizeFailed(_))));
    }

    #[test]
    fn resizer_reuse() {
        let mut resizer = FastResizer::new();
        let first = resizer
            .resize_plane(gradient_plane(64, 64), 64, 64, 8, 8)
            .unwrap();
        let second = resizer
            .resize_plane(gradient_plane(64, 64), 64, 64, 8, 8)
            .unwrap();
        assert_eq!(first, second);
    }
}
