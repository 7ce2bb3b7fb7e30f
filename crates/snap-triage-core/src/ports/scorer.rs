//! Confidence scorer port.

use image::DynamicImage;

use crate::domain::TriageError;

/// Port for producing a confidence score from a decoded frame.
///
/// Implementations own preprocessing and inference; they take `&self` and
/// must not mutate model state between calls, so repeated calls with the
/// same input are deterministic relative to a fixed threshold.
pub trait ConfidenceScorer: Send + Sync {
    /// Scores a frame, returning the positive-class confidence in `[0, 1]`.
    ///
    /// # Errors
    ///
    /// Returns an error if preprocessing or the forward pass fails.
    fn score(&self, image: &DynamicImage) -> Result<f32, TriageError>;
}
