//! Binary event classifier.
//!
//! A small CNN producing a single scalar logit for the positive event class.
//! The backbone layers are bound by name from the weight blob; the head is a
//! one-unit linear layer, so a checkpoint trained with a different head width
//! fails to bind instead of being silently truncated.

use candle_core::{Device, Module, Tensor};
use candle_nn::{conv2d, linear, Conv2d, Conv2dConfig, Linear, VarBuilder};

use super::preprocess::TARGET_SIZE;
use crate::domain::TriageError;

/// Channel widths of the four conv stages.
const CONV_CHANNELS: [usize; 4] = [16, 32, 64, 64];

/// Width of the fully-connected layer feeding the head.
const FC_WIDTH: usize = 128;

/// Spatial size after four 2x2 max pools: 256 -> 16.
const POOLED_SIZE: usize = TARGET_SIZE / 2 / 2 / 2 / 2;

/// Flattened feature size entering fc1.
const FLAT_SIZE: usize = CONV_CHANNELS[3] * POOLED_SIZE * POOLED_SIZE;

/// Event classifier model.
///
/// Architecture: 4 conv layers with max pooling, one FC layer, and a
/// single-logit head.
/// Input: `(1, 3, 256, 256)` normalized RGB.
/// Output: one logit; apply sigmoid for the confidence score.
pub struct EventClassifier {
    conv1: Conv2d,
    conv2: Conv2d,
    conv3: Conv2d,
    conv4: Conv2d,
    fc1: Linear,
    head: Linear,
    device: Device,
}

impl EventClassifier {
    /// Creates the classifier and binds weights by name.
    ///
    /// # Errors
    ///
    /// Returns [`TriageError::WeightLoad`] if any layer is missing from the
    /// blob or has an incompatible shape. This is fatal; mismatched layers
    /// are never skipped.
    #[allow(clippy::needless_pass_by_value)]
    pub fn new(weights_path: &std::path::Path, vb: VarBuilder) -> Result<Self, TriageError> {
        let device = vb.device().clone();

        let weight_error = |e: candle_core::Error| TriageError::WeightLoad {
            path: weights_path.to_path_buf(),
            reason: format!("architecture mismatch: {e}"),
        };

        let conv_cfg = Conv2dConfig {
            padding: 1,
            ..Conv2dConfig::default()
        };

        let conv1 = conv2d(3, CONV_CHANNELS[0], 3, conv_cfg, vb.pp("conv1")).map_err(weight_error)?;
        let conv2 = conv2d(
            CONV_CHANNELS[0],
            CONV_CHANNELS[1],
            3,
            conv_cfg,
            vb.pp("conv2"),
        )
        .map_err(weight_error)?;
        let conv3 = conv2d(
            CONV_CHANNELS[1],
            CONV_CHANNELS[2],
            3,
            conv_cfg,
            vb.pp("conv3"),
        )
        .map_err(weight_error)?;
        let conv4 = conv2d(
            CONV_CHANNELS[2],
            CONV_CHANNELS[3],
            3,
            conv_cfg,
            vb.pp("conv4"),
        )
        .map_err(weight_error)?;

        let fc1 = linear(FLAT_SIZE, FC_WIDTH, vb.pp("fc1")).map_err(weight_error)?;
        // Exactly one output unit.
        let head = linear(FC_WIDTH, 1, vb.pp("head")).map_err(weight_error)?;

        Ok(Self {
            conv1,
            conv2,
            conv3,
            conv4,
            fc1,
            head,
            device,
        })
    }

    /// Device the weights were loaded onto. Every inference call uses it.
    #[must_use]
    pub const fn device(&self) -> &Device {
        &self.device
    }

    /// Runs one forward pass and returns the scalar logit.
    ///
    /// Takes `&self`; repeated calls with identical input are deterministic
    /// on CPU.
    ///
    /// # Errors
    ///
    /// Returns an error if the forward pass fails.
    pub fn logit(&self, x: &Tensor) -> candle_core::Result<f32> {
        let out = self.forward(x)?;
        out.squeeze(0)?.squeeze(0)?.to_scalar::<f32>()
    }
}

impl Module for EventClassifier {
    fn forward(&self, x: &Tensor) -> candle_core::Result<Tensor> {
        let x = self.conv1.forward(x)?.relu()?.max_pool2d(2)?;
        let x = self.conv2.forward(&x)?.relu()?.max_pool2d(2)?;
        let x = self.conv3.forward(&x)?.relu()?.max_pool2d(2)?;
        let x = self.conv4.forward(&x)?.relu()?.max_pool2d(2)?;

        let x = x.flatten_from(1)?;
        let x = self.fc1.forward(&x)?.relu()?;
        self.head.forward(&x)
    }
}

/// Shapes of every tensor the classifier binds, keyed by name.
///
/// Useful for validating a weight blob against the declared architecture
/// before deployment.
#[must_use]
pub fn parameter_shapes() -> Vec<(&'static str, Vec<usize>)> {
    vec![
        ("conv1.weight", vec![CONV_CHANNELS[0], 3, 3, 3]),
        ("conv1.bias", vec![CONV_CHANNELS[0]]),
        ("conv2.weight", vec![CONV_CHANNELS[1], CONV_CHANNELS[0], 3, 3]),
        ("conv2.bias", vec![CONV_CHANNELS[1]]),
        ("conv3.weight", vec![CONV_CHANNELS[2], CONV_CHANNELS[1], 3, 3]),
        ("conv3.bias", vec![CONV_CHANNELS[2]]),
        ("conv4.weight", vec![CONV_CHANNELS[3], CONV_CHANNELS[2], 3, 3]),
        ("conv4.bias", vec![CONV_CHANNELS[3]]),
        ("fc1.weight", vec![FC_WIDTH, FLAT_SIZE]),
        ("fc1.bias", vec![FC_WIDTH]),
        ("head.weight", vec![1, FC_WIDTH]),
        ("head.bias", vec![1]),
    ]
}
