//! Frame source port - the sensor acquisition boundary.

use std::path::PathBuf;

use crate::domain::{Resolution, TriageError};

/// Port for acquiring a single still frame.
///
/// Implementations configure the sensor for the requested resolution, allow a
/// settling delay for auto-exposure and white-balance convergence, capture
/// exactly one frame, persist it, and release the sensor before returning -
/// on failure paths too.
pub trait FrameSource: Send + Sync {
    /// Captures one frame and returns the path it was written to.
    ///
    /// # Errors
    ///
    /// Returns [`TriageError::Acquisition`] if the sensor cannot be opened or
    /// configured, or if the capture times out.
    fn capture(&self, resolution: Resolution) -> Result<PathBuf, TriageError>;
}
