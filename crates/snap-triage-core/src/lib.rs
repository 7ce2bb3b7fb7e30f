//! Snap Triage Core - single-shot image triage pipeline
//!
//! This crate contains the domain types, the image preprocessor, the candle
//! inference session and the triage engine that routes a captured frame to
//! its terminal disposition (retain or discard).

pub mod domain;
pub mod engine;
pub mod inference;
pub mod ports;

pub use domain::{decide, Disposition, Resolution, TriageDecision, TriageError, TriageReport};
pub use engine::{Stage, TriageConfig, TriageEngine};
pub use inference::{device_for, probe_capability, Capability, ScorerSession};
pub use ports::{ConfidenceScorer, FrameSource};
