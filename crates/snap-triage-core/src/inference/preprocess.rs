//! Frame decoding and training-time normalization.
//!
//! Capture resolution varies by deployment; the classifier input does not.
//! Every frame is resized to a fixed 256x256 shape and normalized with the
//! per-channel constants the model was trained with.

// Allow common ML code patterns
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]

use std::path::Path;

use candle_core::{Device, Tensor};
use image::DynamicImage;

use crate::domain::TriageError;

/// Spatial input size of the classifier (pixels per side).
pub const TARGET_SIZE: usize = 256;

/// Per-channel means used at training time (RGB, on `[0, 1]` values).
pub const CHANNEL_MEAN: [f32; 3] = [0.485, 0.456, 0.406];

/// Per-channel standard deviations used at training time.
pub const CHANNEL_STD: [f32; 3] = [0.229, 0.224, 0.225];

/// Decodes a captured frame from disk.
///
/// Pure read: never moves or deletes the input, even when it is unreadable.
///
/// # Errors
///
/// Returns [`TriageError::MissingInput`] if no file exists at `path`, and
/// [`TriageError::InvalidImage`] if the bytes cannot be decoded. Neither is
/// retryable for the same input.
pub fn load_frame(path: &Path) -> Result<DynamicImage, TriageError> {
    if !path.exists() {
        return Err(TriageError::MissingInput {
            path: path.to_path_buf(),
        });
    }

    image::open(path).map_err(|source| TriageError::InvalidImage {
        path: path.to_path_buf(),
        source,
    })
}

/// Converts a decoded image into the classifier's input tensor.
///
/// Any image mode convertible to RGB is accepted. The output is always shape
/// `(1, 3, 256, 256)` f32, CHW, channel-normalized - independent of the input
/// resolution.
///
/// # Errors
///
/// Returns an error if tensor creation on the device fails.
pub fn to_model_tensor(image: &DynamicImage, device: &Device) -> candle_core::Result<Tensor> {
    let resized = image.resize_exact(
        TARGET_SIZE as u32,
        TARGET_SIZE as u32,
        image::imageops::FilterType::Lanczos3,
    );
    let rgb = resized.to_rgb8();

    let plane = TARGET_SIZE * TARGET_SIZE;
    let mut data = vec![0f32; 3 * plane];
    for (i, pixel) in rgb.pixels().enumerate() {
        for c in 0..3 {
            data[c * plane + i] = (f32::from(pixel[c]) / 255.0 - CHANNEL_MEAN[c]) / CHANNEL_STD[c];
        }
    }

    Tensor::from_vec(data, (1, 3, TARGET_SIZE, TARGET_SIZE), device)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma, Rgb, RgbImage};

    #[test]
    fn test_tensor_shape_is_fixed_across_resolutions() {
        for (w, h) in [(64, 64), (640, 480), (1024, 768), (333, 17)] {
            let img = DynamicImage::ImageRgb8(RgbImage::new(w, h));
            let tensor = to_model_tensor(&img, &Device::Cpu).unwrap();
            assert_eq!(tensor.dims(), &[1, 3, TARGET_SIZE, TARGET_SIZE]);
        }
    }

    #[test]
    fn test_grayscale_input_converts_to_three_channels() {
        let img = DynamicImage::ImageLuma8(GrayImage::new(100, 50));
        let tensor = to_model_tensor(&img, &Device::Cpu).unwrap();
        assert_eq!(tensor.dims(), &[1, 3, TARGET_SIZE, TARGET_SIZE]);
    }

    #[test]
    fn test_normalization_constants_applied() {
        // A uniform mid-gray image maps each channel to roughly
        // (0.5 - mean) / std; tolerance covers resampling rounding.
        let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(
            32,
            32,
            Rgb([127u8, 127u8, 127u8]),
        ));
        let tensor = to_model_tensor(&img, &Device::Cpu).unwrap();
        let flat = tensor.flatten_all().unwrap().to_vec1::<f32>().unwrap();

        let plane = TARGET_SIZE * TARGET_SIZE;
        for c in 0..3 {
            let expected = (127.0 / 255.0 - CHANNEL_MEAN[c]) / CHANNEL_STD[c];
            assert!((flat[c * plane] - expected).abs() < 0.05);
        }
    }

    #[test]
    fn test_load_frame_missing() {
        let result = load_frame(Path::new("/nonexistent/frame.jpg"));
        assert!(matches!(result, Err(TriageError::MissingInput { .. })));
    }

    #[test]
    fn test_load_frame_corrupt() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("garbage.jpg");
        std::fs::write(&path, b"definitely not a jpeg").unwrap();

        let result = load_frame(&path);
        assert!(matches!(result, Err(TriageError::InvalidImage { .. })));
        // Evidence preserved for the operator.
        assert!(path.exists());
    }

    #[test]
    fn test_load_frame_empty_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.png");
        std::fs::write(&path, b"").unwrap();

        let result = load_frame(&path);
        assert!(matches!(result, Err(TriageError::InvalidImage { .. })));
    }
}
