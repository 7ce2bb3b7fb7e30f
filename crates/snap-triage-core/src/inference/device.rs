//! Device selection for inference.

use candle_core::Device;
use tracing::info;

/// Compute capability of the host, queried once per run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    /// An accelerator (Metal or CUDA) is available.
    Accelerator,
    /// Only the CPU is available, or the fallback path was forced.
    CpuOnly,
}

/// Probes for the best available compute capability.
///
/// Prefers an accelerator (Metal on macOS, CUDA on Linux/Windows) when the
/// corresponding feature is compiled in and the device can be constructed.
#[must_use]
pub fn probe_capability() -> Capability {
    #[cfg(feature = "metal")]
    {
        if Device::new_metal(0).is_ok() {
            return Capability::Accelerator;
        }
    }

    #[cfg(feature = "cuda")]
    {
        if Device::new_cuda(0).is_ok() {
            return Capability::Accelerator;
        }
    }

    Capability::CpuOnly
}

/// Maps a capability to the device inference runs on.
///
/// Pure mapping from the enumerated capability, so tests can force the CPU
/// fallback deterministically. An accelerator that fails to open at this
/// point degrades to CPU.
#[must_use]
pub fn device_for(capability: Capability) -> Device {
    if capability == Capability::Accelerator {
        #[cfg(feature = "metal")]
        {
            if let Ok(device) = Device::new_metal(0) {
                info!("Using Metal device for inference");
                return device;
            }
        }

        #[cfg(feature = "cuda")]
        {
            if let Ok(device) = Device::new_cuda(0) {
                info!("Using CUDA device for inference");
                return device;
            }
        }
    }

    info!("Using CPU for inference");
    Device::Cpu
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cpu_only_capability_maps_to_cpu() {
        let device = device_for(Capability::CpuOnly);
        assert!(matches!(device, Device::Cpu));
    }

    #[test]
    fn test_probe_does_not_panic() {
        let _capability = probe_capability();
    }
}
