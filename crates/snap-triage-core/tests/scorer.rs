//! End-to-end scoring tests against a real candle session.
//!
//! Uses a zero-initialized weight blob: every logit comes out 0.0, so the
//! confidence is exactly sigmoid(0) = 0.5 and assertions stay deterministic.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::collections::HashMap;
use std::path::Path;

use candle_core::Device;
use image::DynamicImage;
use safetensors::tensor::TensorView;
use snap_triage_core::inference::parameter_shapes;
use snap_triage_core::{ConfidenceScorer, ScorerSession, TriageError};
use snap_triage_test_support::{write_zero_weights, SyntheticImageBuilder};

fn test_image() -> DynamicImage {
    SyntheticImageBuilder::checkerboard(320, 240)
}

#[test]
fn test_zero_weights_score_is_half() {
    let dir = tempfile::tempdir().unwrap();
    let weights = dir.path().join("classifier.safetensors");
    write_zero_weights(&weights).unwrap();

    let session = ScorerSession::load(&weights, Device::Cpu).unwrap();
    let score = session.score(&test_image()).unwrap();
    assert!((score - 0.5).abs() < 1e-6);
}

#[test]
fn test_score_in_unit_interval_and_deterministic() {
    let dir = tempfile::tempdir().unwrap();
    let weights = dir.path().join("classifier.safetensors");
    write_zero_weights(&weights).unwrap();

    let session = ScorerSession::load(&weights, Device::Cpu).unwrap();
    let image = test_image();

    let first = session.score(&image).unwrap();
    let second = session.score(&image).unwrap();

    assert!((0.0..=1.0).contains(&first));
    assert_eq!(
        first.to_bits(),
        second.to_bits(),
        "repeated calls with identical input must match"
    );
}

#[test]
fn test_missing_weights_fail_load() {
    let result = ScorerSession::load(Path::new("/nonexistent/weights.safetensors"), Device::Cpu);
    assert!(matches!(result, Err(TriageError::WeightLoad { .. })));
}

#[test]
fn test_shape_incompatible_weights_fail_load() {
    let dir = tempfile::tempdir().unwrap();
    let weights = dir.path().join("classifier.safetensors");

    // Same tensor names, but a two-unit head: must be rejected, not patched.
    let buffers: Vec<(String, Vec<usize>, Vec<f32>)> = parameter_shapes()
        .into_iter()
        .map(|(name, shape)| {
            let shape = if name == "head.weight" {
                vec![2, shape[1]]
            } else if name == "head.bias" {
                vec![2]
            } else {
                shape
            };
            let len = shape.iter().product();
            (name.to_string(), shape, vec![0f32; len])
        })
        .collect();

    let mut views = HashMap::new();
    for (name, shape, data) in &buffers {
        let bytes: &[u8] = bytemuck::cast_slice(data);
        views.insert(
            name.clone(),
            TensorView::new(safetensors::Dtype::F32, shape.clone(), bytes).unwrap(),
        );
    }
    std::fs::write(&weights, safetensors::serialize(&views, &None).unwrap()).unwrap();

    let result = ScorerSession::load(&weights, Device::Cpu);
    assert!(matches!(result, Err(TriageError::WeightLoad { .. })));
}

#[test]
fn test_truncated_blob_fails_load() {
    let dir = tempfile::tempdir().unwrap();
    let weights = dir.path().join("classifier.safetensors");
    write_zero_weights(&weights).unwrap();

    let full = std::fs::read(&weights).unwrap();
    std::fs::write(&weights, &full[..full.len() / 2]).unwrap();

    let result = ScorerSession::load(&weights, Device::Cpu);
    assert!(matches!(result, Err(TriageError::WeightLoad { .. })));
}
