//! Ports for the pipeline's injectable collaborators.

mod frame_source;
mod scorer;

pub use frame_source::FrameSource;
pub use scorer::ConfidenceScorer;
