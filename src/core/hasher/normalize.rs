//! Pixel normalization: any image to a fixed-size grid of luma samples.
//!
//! Grayscale conversion happens first, at full resolution, using
//! `L = (R*299 + G*587 + B*114 + 500) / 1000` in integer arithmetic. The
//! luma plane is then resized with the shared Lanczos3 kernel.
//!
//! Fingerprints are only comparable between normalizers that use the same
//! formula and kernel.

use super::fast_resize::FastResizer;
use crate::core::matrix::PixelMatrix;
use crate::error::HashError;
use image::{DynamicImage, GenericImageView, GrayImage, RgbImage, RgbaImage};
use rayon::prelude::*;

/// Planes with more samples than this are converted in parallel
pub const PARALLEL_THRESHOLD: usize = 64 * 64;

/// Weighted luma of one RGB triple
pub fn luma(r: u8, g: u8, b: u8) -> u8 {
    let weighted = u32::from(r) * 299 + u32::from(g) * 587 + u32::from(b) * 114 + 500;
    (weighted / 1000) as u8
}

/// Undo alpha premultiplication of one channel (`c * 255 / a` for
/// `0 < a < 255`; opaque and fully transparent values pass through).
pub fn unpremultiply(channel: u8, alpha: u8) -> u8 {
    if alpha > 0 && alpha < u8::MAX {
        (u32::from(channel) * 255 / u32::from(alpha)).min(255) as u8
    } else {
        channel
    }
}

/// Anything that can be read as a grid of luma samples.
///
/// Implementors only need [`sample_size`](Self::sample_size) and
/// [`luma_at`](Self::luma_at); concrete buffers override
/// [`to_luma_plane`](Self::to_luma_plane) with a faster bulk conversion
/// that must yield the same samples.
pub trait SampleSource: Sync {
    /// `(width, height)` in samples
    fn sample_size(&self) -> (u32, u32);

    /// Luma of the pixel at column `x`, row `y`
    fn luma_at(&self, x: u32, y: u32) -> u8;

    /// Row-major luma plane of the whole source
    fn to_luma_plane(&self) -> Vec<u8> {
        let (width, height) = self.sample_size();
        let mut plane = vec![0u8; width as usize * height as usize];
        if plane.is_empty() {
            return plane;
        }

        let fill_row = |(y, row): (usize, &mut [u8])| {
            for (x, sample) in row.iter_mut().enumerate() {
                *sample = self.luma_at(x as u32, y as u32);
            }
        };

        if plane.len() > PARALLEL_THRESHOLD {
            plane
                .par_chunks_mut(width as usize)
                .enumerate()
                .for_each(fill_row);
        } else {
            plane.chunks_mut(width as usize).enumerate().for_each(fill_row);
        }
        plane
    }
}

/// Convert a packed interleaved buffer, `channels` bytes per pixel
fn convert_packed(raw: &[u8], channels: usize, pixel_luma: fn(&[u8]) -> u8) -> Vec<u8> {
    if raw.len() / channels > PARALLEL_THRESHOLD {
        raw.par_chunks_exact(channels).map(pixel_luma).collect()
    } else {
        raw.chunks_exact(channels).map(pixel_luma).collect()
    }
}

fn rgb_luma(pixel: &[u8]) -> u8 {
    luma(pixel[0], pixel[1], pixel[2])
}

fn premultiplied_luma(pixel: &[u8]) -> u8 {
    let alpha = pixel[3];
    luma(
        unpremultiply(pixel[0], alpha),
        unpremultiply(pixel[1], alpha),
        unpremultiply(pixel[2], alpha),
    )
}

impl SampleSource for GrayImage {
    fn sample_size(&self) -> (u32, u32) {
        (self.width(), self.height())
    }

    fn luma_at(&self, x: u32, y: u32) -> u8 {
        self.get_pixel(x, y)[0]
    }

    fn to_luma_plane(&self) -> Vec<u8> {
        self.as_raw().clone()
    }
}

impl SampleSource for RgbImage {
    fn sample_size(&self) -> (u32, u32) {
        (self.width(), self.height())
    }

    fn luma_at(&self, x: u32, y: u32) -> u8 {
        rgb_luma(&self.get_pixel(x, y).0)
    }

    fn to_luma_plane(&self) -> Vec<u8> {
        convert_packed(self.as_raw(), 3, rgb_luma)
    }
}

/// Straight (non-premultiplied) alpha: the colour channels are used as-is.
impl SampleSource for RgbaImage {
    fn sample_size(&self) -> (u32, u32) {
        (self.width(), self.height())
    }

    fn luma_at(&self, x: u32, y: u32) -> u8 {
        rgb_luma(&self.get_pixel(x, y).0)
    }

    fn to_luma_plane(&self) -> Vec<u8> {
        convert_packed(self.as_raw(), 4, rgb_luma)
    }
}

/// An RGBA buffer whose colour channels are premultiplied by alpha
pub struct PremultipliedRgba<'a>(pub &'a RgbaImage);

impl SampleSource for PremultipliedRgba<'_> {
    fn sample_size(&self) -> (u32, u32) {
        (self.0.width(), self.0.height())
    }

    fn luma_at(&self, x: u32, y: u32) -> u8 {
        premultiplied_luma(&self.0.get_pixel(x, y).0)
    }

    fn to_luma_plane(&self) -> Vec<u8> {
        convert_packed(self.0.as_raw(), 4, premultiplied_luma)
    }
}

/// Picks the typed fast path for 8-bit buffers; other layouts go through
/// `GenericImageView::get_pixel`.
impl SampleSource for DynamicImage {
    fn sample_size(&self) -> (u32, u32) {
        (self.width(), self.height())
    }

    fn luma_at(&self, x: u32, y: u32) -> u8 {
        rgb_luma(&self.get_pixel(x, y).0)
    }

    fn to_luma_plane(&self) -> Vec<u8> {
        match self {
            DynamicImage::ImageLuma8(image) => image.to_luma_plane(),
            DynamicImage::ImageRgb8(image) => image.to_luma_plane(),
            DynamicImage::ImageRgba8(image) => image.to_luma_plane(),
            _ => generic_luma_plane(self),
        }
    }
}

fn generic_luma_plane(image: &DynamicImage) -> Vec<u8> {
    struct Generic<'a>(&'a DynamicImage);

    impl SampleSource for Generic<'_> {
        fn sample_size(&self) -> (u32, u32) {
            (self.0.width(), self.0.height())
        }

        fn luma_at(&self, x: u32, y: u32) -> u8 {
            self.0.luma_at(x, y)
        }
    }

    Generic(image).to_luma_plane()
}

/// Turns an image into a `height x width` [`PixelMatrix`]
pub trait PixelNormalizer: Send + Sync {
    fn normalize(
        &self,
        image: &DynamicImage,
        width: u32,
        height: u32,
    ) -> Result<PixelMatrix, HashError>;
}

/// Grayscale first, then a Lanczos3 resize via fast_image_resize
#[derive(Debug, Clone, Copy, Default)]
pub struct LanczosNormalizer;

impl LanczosNormalizer {
    pub fn new() -> Self {
        Self
    }

    /// Normalize any [`SampleSource`]
    pub fn normalize_source<S: SampleSource + ?Sized>(
        &self,
        source: &S,
        width: u32,
        height: u32,
    ) -> Result<PixelMatrix, HashError> {
        let (src_width, src_height) = source.sample_size();
        if src_width == 0 || src_height == 0 {
            return Err(HashError::EmptyImage {
                width: src_width,
                height: src_height,
            });
        }

        let plane = source.to_luma_plane();
        let samples = if (src_width, src_height) == (width, height) {
            plane
        } else {
            FastResizer::new().resize_plane(plane, src_width, src_height, width, height)?
        };

        Ok(PixelMatrix::from_vec(height as usize, width as usize, samples)?)
    }
}

impl PixelNormalizer for LanczosNormalizer {
    fn normalize(
        &self,
        image: &DynamicImage,
        width: u32,
        height: u32,
    ) -> Result<PixelMatrix, HashError> {
        self.normalize_source(image, width, height)
    }
}
