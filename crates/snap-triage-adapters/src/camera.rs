//! Still-camera frame source.
//!
//! Drives an external still-capture tool (`rpicam-still` by default) as a
//! child process. The child owns the sensor for its whole lifetime, so the
//! sensor is acquired, used and released within the capture call on success
//! and failure paths alike. The settling delay for auto-exposure and
//! white-balance convergence is handed to the tool's millisecond timeout
//! flag; a watchdog deadline on the child process keeps the whole capture
//! bounded even when the tool misbehaves.

use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

use snap_triage_core::{FrameSource, Resolution, TriageError};
use tracing::debug;

/// Default capture command.
pub const DEFAULT_COMMAND: &str = "rpicam-still";

/// Time the capture tool gets on top of the settle delay before it is killed.
const CAPTURE_GRACE: Duration = Duration::from_secs(15);

/// Poll interval for the child-process watchdog.
const WAIT_POLL: Duration = Duration::from_millis(20);

/// Configuration for the still camera.
#[derive(Debug, Clone)]
pub struct StillCameraConfig {
    /// Capture executable to invoke.
    pub command: String,
    /// Path the frame is written to.
    pub output: PathBuf,
    /// Settling delay before the capture fires.
    pub settle: Duration,
}

impl StillCameraConfig {
    /// Creates a config with the default capture command.
    #[must_use]
    pub fn new(output: PathBuf, settle: Duration) -> Self {
        Self {
            command: DEFAULT_COMMAND.to_string(),
            output,
            settle,
        }
    }
}

/// Frame source backed by an external still-capture process.
pub struct StillCamera {
    config: StillCameraConfig,
}

impl StillCamera {
    /// Creates a camera adapter from its configuration.
    #[must_use]
    pub const fn new(config: StillCameraConfig) -> Self {
        Self { config }
    }
}

/// Builds the argument list for one capture invocation.
///
/// The settle delay is floored at 1 ms: `rpicam-still` treats `--timeout 0`
/// as "run forever", which must never reach the tool.
fn capture_args(config: &StillCameraConfig, resolution: Resolution) -> Vec<String> {
    vec![
        "--width".to_string(),
        resolution.width.to_string(),
        "--height".to_string(),
        resolution.height.to_string(),
        "--timeout".to_string(),
        config.settle.as_millis().max(1).to_string(),
        "--nopreview".to_string(),
        "--output".to_string(),
        config.output.display().to_string(),
    ]
}

impl StillCamera {
    /// Runs the capture tool, killing it when `deadline` expires.
    fn capture_within(
        &self,
        resolution: Resolution,
        deadline: Duration,
    ) -> Result<PathBuf, TriageError> {
        let args = capture_args(&self.config, resolution);
        debug!(command = %self.config.command, ?args, "Invoking capture tool");

        let mut child = Command::new(&self.config.command)
            .args(&args)
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| TriageError::Acquisition {
                reason: format!("failed to launch {}: {e}", self.config.command),
            })?;

        let started = Instant::now();
        loop {
            let exited = child.try_wait().map_err(|e| TriageError::Acquisition {
                reason: format!("failed to wait for {}: {e}", self.config.command),
            })?;
            if exited.is_some() {
                break;
            }
            if started.elapsed() >= deadline {
                let _ = child.kill();
                let _ = child.wait();
                return Err(TriageError::Acquisition {
                    reason: format!(
                        "{} timed out after {:.1}s and was killed",
                        self.config.command,
                        deadline.as_secs_f32()
                    ),
                });
            }
            std::thread::sleep(WAIT_POLL);
        }

        let output = child
            .wait_with_output()
            .map_err(|e| TriageError::Acquisition {
                reason: format!("failed to collect output of {}: {e}", self.config.command),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(TriageError::Acquisition {
                reason: format!(
                    "{} exited with {}: {}",
                    self.config.command,
                    output.status,
                    stderr.trim()
                ),
            });
        }

        if !self.config.output.exists() {
            return Err(TriageError::Acquisition {
                reason: format!(
                    "{} reported success but wrote no frame to {}",
                    self.config.command,
                    self.config.output.display()
                ),
            });
        }

        Ok(self.config.output.clone())
    }
}

impl FrameSource for StillCamera {
    fn capture(&self, resolution: Resolution) -> Result<PathBuf, TriageError> {
        // Settle time plus a fixed grace period bounds the whole capture.
        self.capture_within(resolution, self.config.settle + CAPTURE_GRACE)
    }
}
