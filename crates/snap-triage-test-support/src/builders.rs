//! Synthetic image builders for testing.

use image::{DynamicImage, GrayImage, Luma, Rgb, RgbImage};

/// Builder for creating synthetic test images.
pub struct SyntheticImageBuilder;

impl SyntheticImageBuilder {
    /// Creates a high-contrast checkerboard pattern.
    #[must_use]
    pub fn checkerboard(width: u32, height: u32) -> DynamicImage {
        let img = GrayImage::from_fn(width, height, |x, y| {
            if (x / 8 + y / 8) % 2 == 0 {
                Luma([255u8])
            } else {
                Luma([0u8])
            }
        });
        DynamicImage::ImageLuma8(img)
    }

    /// Creates an RGB image with a horizontal red-to-blue gradient.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn rgb_gradient(width: u32, height: u32) -> DynamicImage {
        let img = RgbImage::from_fn(width, height, |x, _| {
            let r = ((u32::from(u8::MAX) * x) / width.max(1)) as u8;
            Rgb([r, 0, u8::MAX - r])
        });
        DynamicImage::ImageRgb8(img)
    }
}
