//! Weight loading from safetensors blobs.

use std::collections::HashMap;
use std::path::Path;

use candle_core::{DType, Device, Tensor};
use candle_nn::VarBuilder;
use safetensors::SafeTensors;
use tracing::debug;

use crate::domain::TriageError;

/// Loads a safetensors file and creates a `VarBuilder` on `device`.
///
/// Every tensor in the blob is keyed by layer name; the classifier binds them
/// by name when it is constructed, so a missing or reshaped layer fails the
/// load rather than being silently skipped.
///
/// # Errors
///
/// Returns [`TriageError::WeightLoad`] if the file cannot be read, is not a
/// valid safetensors blob, or a tensor cannot be materialized on the device.
pub fn load_safetensors(path: &Path, device: &Device) -> Result<VarBuilder<'static>, TriageError> {
    debug!("Loading safetensors from {}", path.display());

    let weight_error = |reason: String| TriageError::WeightLoad {
        path: path.to_path_buf(),
        reason,
    };

    let data = std::fs::read(path).map_err(|e| weight_error(format!("read failed: {e}")))?;

    let tensors = SafeTensors::deserialize(&data)
        .map_err(|e| weight_error(format!("not a valid safetensors blob: {e}")))?;

    let mut tensor_map: HashMap<String, Tensor> = HashMap::new();

    for name in tensors.names() {
        let view = tensors
            .tensor(name)
            .map_err(|e| weight_error(format!("tensor '{name}' unreadable: {e}")))?;

        let dtype = dtype_to_candle(view.dtype())
            .map_err(|reason| weight_error(format!("tensor '{name}': {reason}")))?;
        let shape: Vec<usize> = view.shape().to_vec();

        let tensor = Tensor::from_raw_buffer(view.data(), dtype, &shape, device)
            .map_err(|e| weight_error(format!("tensor '{name}' failed to load: {e}")))?;

        tensor_map.insert(name.to_string(), tensor);
    }

    Ok(VarBuilder::from_tensors(tensor_map, DType::F32, device))
}

/// Converts a safetensors dtype to a candle dtype.
fn dtype_to_candle(dtype: safetensors::Dtype) -> Result<DType, String> {
    use safetensors::Dtype as S;
    match dtype {
        S::F32 => Ok(DType::F32),
        S::F64 => Ok(DType::F64),
        S::F16 => Ok(DType::F16),
        S::BF16 => Ok(DType::BF16),
        S::I64 => Ok(DType::I64),
        S::U8 => Ok(DType::U8),
        S::U32 => Ok(DType::U32),
        other => Err(format!("unsupported dtype: {other:?}")),
    }
}
