//! Snap Triage Adapters - implementations of the core ports.

mod camera;

pub use camera::{StillCamera, StillCameraConfig, DEFAULT_COMMAND};
