//! ML inference engine using Candle.
//!
//! Provides device selection, safetensors weight loading, the binary event
//! classifier and the `ScorerSession` handle that binds them together.

mod classifier;
mod device;
mod loader;
mod session;
mod utils;

pub mod preprocess;

pub use classifier::{parameter_shapes, EventClassifier};
pub use device::{device_for, probe_capability, Capability};
pub use loader::load_safetensors;
pub use session::ScorerSession;
pub use utils::sigmoid;
