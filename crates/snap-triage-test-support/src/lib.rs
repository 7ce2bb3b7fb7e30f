//! Test support for snap-triage: mock ports, synthetic images and stub
//! weight blobs.

mod builders;
mod mocks;
mod weights;

pub use builders::SyntheticImageBuilder;
pub use mocks::{MockFrameSource, MockScorer};
pub use weights::write_zero_weights;
