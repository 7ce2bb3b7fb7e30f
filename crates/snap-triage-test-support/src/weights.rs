//! Stub weight blobs for exercising the real inference path.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use safetensors::tensor::TensorView;
use snap_triage_core::inference::parameter_shapes;

/// Writes a safetensors blob with every classifier tensor zero-filled.
///
/// With all-zero weights the classifier's logit is exactly 0.0 and the
/// confidence sigmoid(0) = 0.5, which keeps end-to-end assertions
/// deterministic.
///
/// # Errors
///
/// Returns an error if serialization or the filesystem write fails.
pub fn write_zero_weights(path: &Path) -> Result<()> {
    let shapes = parameter_shapes();
    let buffers: Vec<Vec<f32>> = shapes
        .iter()
        .map(|(_, shape)| vec![0f32; shape.iter().product()])
        .collect();

    let mut views = HashMap::new();
    for ((name, shape), buffer) in shapes.iter().zip(&buffers) {
        let bytes: &[u8] = bytemuck::cast_slice(buffer);
        let view = TensorView::new(safetensors::Dtype::F32, shape.clone(), bytes)
            .with_context(|| format!("tensor view for {name}"))?;
        views.insert((*name).to_string(), view);
    }

    let serialized = safetensors::serialize(&views, &None).context("serialize stub weights")?;
    std::fs::write(path, serialized)
        .with_context(|| format!("write stub weights to {}", path.display()))?;

    Ok(())
}
