//! Run command - capture one frame, score it and apply the triage action.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;
use snap_triage_adapters::{StillCamera, StillCameraConfig, DEFAULT_COMMAND};
use snap_triage_core::{
    device_for, probe_capability, Capability, Resolution, ScorerSession, TriageConfig,
    TriageEngine, TriageReport,
};
use tracing::{debug, info};

use crate::config::AppConfig;

/// Hardcoded default values.
mod defaults {
    pub const THRESHOLD: f32 = 0.75;
    pub const WIDTH: u32 = 1024;
    pub const HEIGHT: u32 = 768;
    pub const SETTLE_SECONDS: f32 = 2.0;
    pub const RETAIN_DIR: &str = "detections";
    pub const CAPTURE_PATH: &str = "capture.jpg";
}

/// Parse and validate a threshold value (0.0-1.0).
fn parse_threshold(s: &str) -> Result<f32, String> {
    let value: f32 = s
        .parse()
        .map_err(|_| format!("'{s}' is not a valid number"))?;
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(format!("{value} is not in 0.0..=1.0"))
    }
}

/// Arguments for a triage run.
#[derive(Args, Clone)]
pub struct RunArgs {
    /// Path to the classifier weight blob (safetensors)
    #[arg(long, value_name = "FILE")]
    pub weights: Option<PathBuf>,

    /// Confidence threshold (0.0-1.0); score >= threshold retains
    #[arg(long, value_parser = parse_threshold)]
    pub threshold: Option<f32>,

    /// Directory retained frames are moved into
    #[arg(long, value_name = "DIR")]
    pub retain_dir: Option<PathBuf>,

    /// Capture width in pixels
    #[arg(long)]
    pub width: Option<u32>,

    /// Capture height in pixels
    #[arg(long)]
    pub height: Option<u32>,

    /// Settling delay before capture, in seconds
    #[arg(long, value_name = "SECONDS")]
    pub settle: Option<f32>,

    /// Still-capture command to invoke
    #[arg(long, value_name = "CMD")]
    pub capture_cmd: Option<String>,

    /// Path the captured frame is written to
    #[arg(long, value_name = "FILE")]
    pub capture_path: Option<PathBuf>,

    /// Force CPU inference even when an accelerator is available
    #[arg(long)]
    pub cpu: bool,
}

impl RunArgs {
    /// Apply configuration file values, respecting CLI precedence.
    ///
    /// Layering priority (lowest to highest):
    /// 1. Hardcoded defaults (in accessor methods)
    /// 2. Config file values (XDG, then project-local)
    /// 3. CLI arguments (already set on self)
    fn with_config(mut args: Self, config: &AppConfig) -> Self {
        args.threshold = args.threshold.or(config.triage.threshold);
        args.retain_dir = args
            .retain_dir
            .or_else(|| config.triage.retain_dir.clone());
        args.weights = args.weights.or_else(|| config.model.weights.clone());
        args.width = args.width.or(config.capture.width);
        args.height = args.height.or(config.capture.height);
        args.settle = args.settle.or(config.capture.settle_seconds);
        args.capture_cmd = args
            .capture_cmd
            .or_else(|| config.capture.command.clone());
        args.capture_path = args
            .capture_path
            .or_else(|| config.capture.output.clone());
        args
    }

    fn threshold(&self) -> f32 {
        self.threshold.unwrap_or(defaults::THRESHOLD)
    }

    fn resolution(&self) -> Resolution {
        Resolution::new(
            self.width.unwrap_or(defaults::WIDTH),
            self.height.unwrap_or(defaults::HEIGHT),
        )
    }

    fn settle(&self) -> Duration {
        Duration::from_secs_f32(self.settle.unwrap_or(defaults::SETTLE_SECONDS).max(0.0))
    }

    fn retain_dir(&self) -> PathBuf {
        self.retain_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(defaults::RETAIN_DIR))
    }

    fn capture_path(&self) -> PathBuf {
        self.capture_path
            .clone()
            .unwrap_or_else(|| PathBuf::from(defaults::CAPTURE_PATH))
    }

    fn capture_cmd(&self) -> String {
        self.capture_cmd
            .clone()
            .unwrap_or_else(|| DEFAULT_COMMAND.to_string())
    }
}

/// Report wrapper adding the run timestamp to the JSON output.
#[derive(Serialize)]
struct RunOutput<'a> {
    timestamp: String,
    #[serde(flatten)]
    report: &'a TriageReport,
}

/// Run the triage pipeline once.
pub fn run(cli_args: &RunArgs) -> Result<()> {
    let config = AppConfig::load();
    let args = RunArgs::with_config(cli_args.clone(), &config);

    let weights = args
        .weights
        .clone()
        .context("no weights path configured; pass --weights or set model.weights")?;

    // The session is built before any capture, so a bad weight blob fails
    // the run with no frame side effects to clean up.
    let capability = if args.cpu {
        Capability::CpuOnly
    } else {
        probe_capability()
    };
    debug!(?capability, "Selected compute capability");
    let device = device_for(capability);
    let session = ScorerSession::load(&weights, device)?;

    let camera = StillCamera::new(StillCameraConfig {
        command: args.capture_cmd(),
        output: args.capture_path(),
        settle: args.settle(),
    });

    let engine = TriageEngine::new(
        &camera,
        &session,
        TriageConfig {
            resolution: args.resolution(),
            threshold: args.threshold(),
            retain_dir: args.retain_dir(),
        },
    );

    let report = engine.run()?;
    info!(decision = ?report.decision, score = report.score, "Run finished");

    let output = RunOutput {
        timestamp: iso_timestamp(),
        report: &report,
    };
    println!("{}", serde_json::to_string(&output)?);

    Ok(())
}

/// Generate ISO 8601 UTC timestamp (RFC 3339 format).
fn iso_timestamp() -> String {
    match time::OffsetDateTime::now_utc().format(&time::format_description::well_known::Rfc3339) {
        Ok(ts) => ts,
        Err(e) => {
            debug!("Timestamp format failed: {e}");
            String::from("1970-01-01T00:00:00Z")
        }
    }
}
