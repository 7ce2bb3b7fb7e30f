//! Mock implementations of core port traits.

use std::path::PathBuf;
use std::sync::{Arc, Mutex, PoisonError};

use image::DynamicImage;
use snap_triage_core::{ConfidenceScorer, FrameSource, Resolution, TriageError};

/// Mock implementation of `FrameSource` for testing.
///
/// Yields a pre-configured path and tracks capture calls for assertions.
pub struct MockFrameSource {
    path: PathBuf,
    fail_reason: Option<String>,
    capture_count: Arc<Mutex<usize>>,
    requested: Arc<Mutex<Vec<Resolution>>>,
}

impl MockFrameSource {
    /// Creates a mock source that yields `path` on every capture.
    #[must_use]
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            fail_reason: None,
            capture_count: Arc::new(Mutex::new(0)),
            requested: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Creates a mock source that fails every capture.
    #[must_use]
    pub fn failing(reason: &str) -> Self {
        Self {
            path: PathBuf::new(),
            fail_reason: Some(reason.to_string()),
            capture_count: Arc::new(Mutex::new(0)),
            requested: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Returns how many times `capture` was called.
    #[must_use]
    pub fn capture_count(&self) -> usize {
        *self
            .capture_count
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns the resolutions requested so far.
    #[must_use]
    pub fn requested_resolutions(&self) -> Vec<Resolution> {
        self.requested
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl FrameSource for MockFrameSource {
    fn capture(&self, resolution: Resolution) -> Result<PathBuf, TriageError> {
        if let Ok(mut c) = self.capture_count.lock() {
            *c += 1;
        }
        if let Ok(mut r) = self.requested.lock() {
            r.push(resolution);
        }

        match &self.fail_reason {
            Some(reason) => Err(TriageError::Acquisition {
                reason: reason.clone(),
            }),
            None => Ok(self.path.clone()),
        }
    }
}

/// Mock implementation of `ConfidenceScorer` for testing.
///
/// Returns a fixed score and tracks call counts.
pub struct MockScorer {
    score: f32,
    call_count: Arc<Mutex<usize>>,
}

impl MockScorer {
    /// Creates a mock scorer returning `score` on every call.
    #[must_use]
    pub fn new(score: f32) -> Self {
        Self {
            score,
            call_count: Arc::new(Mutex::new(0)),
        }
    }

    /// Returns how many times `score` was called.
    #[must_use]
    pub fn call_count(&self) -> usize {
        *self
            .call_count
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl ConfidenceScorer for MockScorer {
    fn score(&self, _image: &DynamicImage) -> Result<f32, TriageError> {
        if let Ok(mut c) = self.call_count.lock() {
            *c += 1;
        }
        Ok(self.score)
    }
}
