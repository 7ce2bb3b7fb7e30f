//! Core domain types for frame triage.

mod decision;
mod error;

pub use decision::{decide, Disposition, Resolution, TriageDecision, TriageReport};
pub use error::TriageError;
