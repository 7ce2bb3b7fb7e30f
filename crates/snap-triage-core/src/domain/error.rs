//! Error taxonomy for the triage pipeline.
//!
//! Each variant identifies the failing stage and carries the path or resource
//! involved, so an operator can tell a bad sensor, a bad input file and a bad
//! model apart without reading internals.

use std::path::PathBuf;

use thiserror::Error;

/// Failures the pipeline can end a run with.
///
/// None of these are retried within a run; retry policy belongs to whatever
/// scheduler invokes the pipeline.
#[derive(Debug, Error)]
pub enum TriageError {
    /// The sensor could not be opened, configured, or timed out mid-capture.
    #[error("acquisition failed: {reason}")]
    Acquisition {
        /// Human-readable failure reason, including the capture command's
        /// diagnostics where available.
        reason: String,
    },

    /// The captured frame does not exist at the expected path.
    #[error("captured frame missing: {}", path.display())]
    MissingInput {
        /// Path the frame was expected at.
        path: PathBuf,
    },

    /// The captured frame exists but cannot be decoded as an image.
    ///
    /// The offending file is deliberately left in place for inspection.
    #[error("captured frame unreadable: {}", path.display())]
    InvalidImage {
        /// Path of the unreadable frame.
        path: PathBuf,
        /// Decoder error.
        #[source]
        source: image::ImageError,
    },

    /// The weight blob is missing, malformed, or shape-incompatible with the
    /// classifier architecture. Fatal for the whole run.
    #[error("model weights unusable: {}: {reason}", path.display())]
    WeightLoad {
        /// Path of the weight blob.
        path: PathBuf,
        /// What went wrong while binding the weights.
        reason: String,
    },

    /// The forward pass itself failed.
    #[error("inference failed")]
    Inference(#[from] candle_core::Error),

    /// A terminal file action (retain move or discard delete) failed.
    #[error("file action failed for {}", path.display())]
    FileAction {
        /// Path the action was applied to.
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
