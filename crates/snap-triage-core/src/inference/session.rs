//! Load-once scoring session.

use std::path::Path;

use candle_core::Device;
use image::DynamicImage;
use tracing::{debug, info};

use super::classifier::EventClassifier;
use super::loader::load_safetensors;
use super::preprocess::to_model_tensor;
use super::utils::sigmoid;
use crate::domain::TriageError;
use crate::ports::ConfidenceScorer;

/// An explicitly constructed model + device handle.
///
/// Loaded once per run (or reused across runs in a long-lived deployment) and
/// passed where scoring is needed; immutable after construction. The device
/// bound at load time is used for every inference call.
pub struct ScorerSession {
    model: EventClassifier,
}

impl ScorerSession {
    /// Loads the classifier weights onto `device` and prepares the session.
    ///
    /// # Errors
    ///
    /// Returns [`TriageError::WeightLoad`] if the blob is missing, malformed
    /// or shape-incompatible with the classifier. Fatal for the run.
    pub fn load(weights_path: &Path, device: Device) -> Result<Self, TriageError> {
        info!("Loading classifier weights from {}", weights_path.display());
        let vb = load_safetensors(weights_path, &device)?;
        let model = EventClassifier::new(weights_path, vb)?;

        Ok(Self { model })
    }
}

impl ConfidenceScorer for ScorerSession {
    fn score(&self, image: &DynamicImage) -> Result<f32, TriageError> {
        let input = to_model_tensor(image, self.model.device())?;
        let logit = self.model.logit(&input)?;
        let confidence = sigmoid(logit);
        debug!(logit, confidence, "Scored frame");
        Ok(confidence)
    }
}
