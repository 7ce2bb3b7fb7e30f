//! Triage engine - drives one frame through the pipeline.
//!
//! Stages run synchronously and in order: acquire, decode, score, decide,
//! then exactly one terminal file action. The engine owns all failure
//! handling; an error at any stage aborts the run with the captured frame
//! left wherever it already is. No irreversible filesystem action happens
//! before a score has been obtained.

use std::ffi::OsStr;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::domain::{decide, Disposition, Resolution, TriageDecision, TriageError, TriageReport};
use crate::inference::preprocess::load_frame;
use crate::ports::{ConfidenceScorer, FrameSource};

/// Pipeline stage, used for trace context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Waiting to start.
    Idle,
    /// Capturing a frame from the sensor.
    Acquiring,
    /// Decoding and normalizing the captured frame.
    Preprocessing,
    /// Running the classifier.
    Scoring,
    /// Applying the threshold rule.
    Deciding,
    /// Moving the frame into the retain directory.
    Retaining,
    /// Deleting the frame.
    Discarding,
    /// Run complete.
    Done,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::Acquiring => "acquiring",
            Self::Preprocessing => "preprocessing",
            Self::Scoring => "scoring",
            Self::Deciding => "deciding",
            Self::Retaining => "retaining",
            Self::Discarding => "discarding",
            Self::Done => "done",
        };
        f.write_str(name)
    }
}

/// Engine configuration.
#[derive(Debug, Clone)]
pub struct TriageConfig {
    /// Resolution requested from the frame source.
    pub resolution: Resolution,
    /// Confidence threshold in `[0, 1]`; boundary-inclusive.
    pub threshold: f32,
    /// Directory retained frames are moved into (created on demand).
    pub retain_dir: PathBuf,
}

/// Orchestrates one triage run over injected collaborators.
pub struct TriageEngine<'a> {
    frames: &'a dyn FrameSource,
    scorer: &'a dyn ConfidenceScorer,
    config: TriageConfig,
}

impl<'a> TriageEngine<'a> {
    /// Creates an engine over a frame source and scorer.
    #[must_use]
    pub const fn new(
        frames: &'a dyn FrameSource,
        scorer: &'a dyn ConfidenceScorer,
        config: TriageConfig,
    ) -> Self {
        Self {
            frames,
            scorer,
            config,
        }
    }

    /// Runs the pipeline once.
    ///
    /// Exactly one of three outcomes ends the frame's on-disk lifetime: it is
    /// moved into the retain directory, deleted, or - on upstream failure -
    /// left in place for inspection.
    ///
    /// # Errors
    ///
    /// Propagates the first stage failure; see [`TriageError`] for the
    /// taxonomy.
    pub fn run(&self) -> Result<TriageReport, TriageError> {
        debug!(stage = %Stage::Idle, threshold = self.config.threshold, "Starting triage run");

        debug!(stage = %Stage::Acquiring, resolution = ?self.config.resolution, "Capturing frame");
        let frame = self.frames.capture(self.config.resolution)?;

        debug!(stage = %Stage::Preprocessing, frame = %frame.display(), "Decoding frame");
        // An unreadable frame is left on disk as evidence; only the error
        // propagates.
        let image = load_frame(&frame)?;

        debug!(stage = %Stage::Scoring, "Scoring frame");
        let score = self.scorer.score(&image)?;

        debug!(stage = %Stage::Deciding, score, threshold = self.config.threshold, "Applying threshold");
        let decision = decide(score, self.config.threshold);

        let disposition = match decision {
            TriageDecision::Retain => {
                debug!(stage = %Stage::Retaining, "Retaining frame");
                let destination = self.retain(&frame)?;
                Disposition::Retained { destination }
            }
            TriageDecision::Discard => {
                debug!(stage = %Stage::Discarding, "Discarding frame");
                self.discard(&frame)?;
                Disposition::Discarded
            }
        };

        info!(stage = %Stage::Done, score, ?decision, "Triage run complete");

        Ok(TriageReport {
            frame,
            score,
            threshold: self.config.threshold,
            decision,
            disposition,
        })
    }

    /// Moves the frame into the retain directory, creating it if needed.
    ///
    /// A same-named file at the destination is overwritten: last write wins.
    fn retain(&self, frame: &Path) -> Result<PathBuf, TriageError> {
        let dir = &self.config.retain_dir;
        fs::create_dir_all(dir).map_err(|source| TriageError::FileAction {
            path: dir.clone(),
            source,
        })?;

        let name = frame.file_name().unwrap_or_else(|| OsStr::new("frame"));
        let destination = dir.join(name);

        if let Err(rename_err) = fs::rename(frame, &destination) {
            // Retain directory may sit on another filesystem.
            debug!(
                "Rename to {} failed ({rename_err}), copying instead",
                destination.display()
            );
            fs::copy(frame, &destination).map_err(|source| TriageError::FileAction {
                path: destination.clone(),
                source,
            })?;
            fs::remove_file(frame).map_err(|source| TriageError::FileAction {
                path: frame.to_path_buf(),
                source,
            })?;
        }

        Ok(destination)
    }

    /// Deletes the frame from its original location.
    fn discard(&self, frame: &Path) -> Result<(), TriageError> {
        fs::remove_file(frame).map_err(|source| TriageError::FileAction {
            path: frame.to_path_buf(),
            source,
        })
    }
}
