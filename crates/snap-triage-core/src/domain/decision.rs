//! Decision rule and run report types.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Capture resolution in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Resolution {
    /// Creates a resolution from width and height.
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Outcome of comparing a confidence score against the configured threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriageDecision {
    /// Score met the threshold; the frame is kept.
    Retain,
    /// Score fell below the threshold; the frame is dropped.
    Discard,
}

/// Applies the threshold rule to a confidence score.
///
/// Boundary-inclusive: `score >= threshold` retains. Pure function of its
/// inputs, monotonic in both arguments.
#[must_use]
pub fn decide(score: f32, threshold: f32) -> TriageDecision {
    if score >= threshold {
        TriageDecision::Retain
    } else {
        TriageDecision::Discard
    }
}

/// The terminal file action taken for a frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Disposition {
    /// Frame was moved into the retain directory.
    Retained {
        /// Final path of the retained frame.
        destination: PathBuf,
    },
    /// Frame was deleted from its original location.
    Discarded,
}

/// Result of one completed triage run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TriageReport {
    /// Path the frame was captured to.
    pub frame: PathBuf,
    /// Confidence score in `[0, 1]`.
    pub score: f32,
    /// Threshold the score was compared against.
    pub threshold: f32,
    /// Decision derived from score and threshold.
    pub decision: TriageDecision,
    /// File action performed.
    pub disposition: Disposition,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decide_boundary_inclusive() {
        assert_eq!(decide(0.75, 0.75), TriageDecision::Retain);
        assert_eq!(decide(0.80, 0.75), TriageDecision::Retain);
        assert_eq!(decide(0.74, 0.75), TriageDecision::Discard);
    }

    #[test]
    fn test_decide_monotonic_in_threshold() {
        // Raising the threshold never flips Discard into Retain.
        let score = 0.6;
        let mut previous = decide(score, 0.0);
        for step in 1u8..=100 {
            let threshold = f32::from(step) / 100.0;
            let current = decide(score, threshold);
            if previous == TriageDecision::Discard {
                assert_eq!(current, TriageDecision::Discard);
            }
            previous = current;
        }
    }

    #[test]
    fn test_decide_extremes() {
        assert_eq!(decide(1.0, 0.0), TriageDecision::Retain);
        assert_eq!(decide(0.0, 0.0), TriageDecision::Retain);
        assert_eq!(decide(0.0, f32::EPSILON), TriageDecision::Discard);
    }

    #[test]
    fn test_decision_serializes_snake_case() {
        let json = serde_json::to_string(&TriageDecision::Retain).unwrap();
        assert_eq!(json, "\"retain\"");
    }
}
