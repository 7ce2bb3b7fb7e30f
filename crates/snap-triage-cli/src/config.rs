//! Configuration file support for snap-triage.
//!
//! Supports TOML configuration from:
//! - XDG config: `~/.config/snap-triage/config.toml` (lowest priority)
//! - Project-local: `.snap-triage.toml` (searched up directory tree)
//! - CLI flags (highest priority, applied separately)

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, info};

/// Top-level configuration structure.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Capture settings.
    pub capture: CaptureConfig,
    /// Triage decision settings.
    pub triage: TriageSection,
    /// Model settings.
    pub model: ModelConfig,
}

/// Capture configuration.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct CaptureConfig {
    /// Capture width in pixels.
    pub width: Option<u32>,
    /// Capture height in pixels.
    pub height: Option<u32>,
    /// Settling delay before capture, in seconds.
    pub settle_seconds: Option<f32>,
    /// Still-capture command to invoke.
    pub command: Option<String>,
    /// Path the captured frame is written to.
    pub output: Option<PathBuf>,
}

/// Triage decision configuration.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct TriageSection {
    /// Confidence threshold (0.0-1.0).
    pub threshold: Option<f32>,
    /// Directory retained frames are moved into.
    pub retain_dir: Option<PathBuf>,
}

/// Model configuration.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Path to the classifier weight blob.
    pub weights: Option<PathBuf>,
}

impl AppConfig {
    /// Load configuration from XDG and project-local files.
    ///
    /// Priority (lowest to highest):
    /// 1. XDG config: `~/.config/snap-triage/config.toml`
    /// 2. Project-local: `.snap-triage.toml` (searched up from cwd)
    ///
    /// Missing files are silently ignored. Out-of-range values are dropped
    /// with a warning, leaving the next layer (CLI flag or default) to apply.
    pub fn load() -> Self {
        let mut config = Self::default();

        if let Some(xdg_path) = xdg_config_path() {
            if xdg_path.exists() {
                info!("Loading XDG config: {}", xdg_path.display());
                if let Some(xdg_config) = load_file(&xdg_path) {
                    config = xdg_config;
                }
            } else {
                debug!("XDG config not found: {}", xdg_path.display());
            }
        }

        if let Some(project_path) = find_project_config() {
            info!("Loading project config: {}", project_path.display());
            if let Some(project_config) = load_file(&project_path) {
                config.merge(project_config);
            }
        }

        config.sanitize();

        config
    }

    /// Drop values outside their valid ranges, warning for each.
    ///
    /// An out-of-range file value must never reach the engine - the threshold
    /// gates an irreversible delete - so it is discarded here and the layer
    /// below (CLI flag or hardcoded default) applies instead.
    fn sanitize(&mut self) {
        if let Some(t) = self.triage.threshold {
            if !(0.0..=1.0).contains(&t) {
                tracing::warn!("Ignoring triage.threshold {t}: must be 0.0-1.0");
                self.triage.threshold = None;
            }
        }
        if let Some(s) = self.capture.settle_seconds {
            if !s.is_finite() || s < 0.0 {
                tracing::warn!("Ignoring capture.settle_seconds {s}: must be non-negative");
                self.capture.settle_seconds = None;
            }
        }
        if let Some(0) = self.capture.width {
            tracing::warn!("Ignoring capture.width 0: must be positive");
            self.capture.width = None;
        }
        if let Some(0) = self.capture.height {
            tracing::warn!("Ignoring capture.height 0: must be positive");
            self.capture.height = None;
        }
    }

    /// Merge another config into this one.
    /// Values from `other` override values in `self` when present.
    fn merge(&mut self, other: Self) {
        self.capture.width = other.capture.width.or(self.capture.width);
        self.capture.height = other.capture.height.or(self.capture.height);
        self.capture.settle_seconds = other
            .capture
            .settle_seconds
            .or(self.capture.settle_seconds);
        self.capture.command = other
            .capture
            .command
            .or_else(|| self.capture.command.take());
        self.capture.output = other.capture.output.or_else(|| self.capture.output.take());

        self.triage.threshold = other.triage.threshold.or(self.triage.threshold);
        self.triage.retain_dir = other
            .triage
            .retain_dir
            .or_else(|| self.triage.retain_dir.take());

        self.model.weights = other.model.weights.or_else(|| self.model.weights.take());
    }
}

/// Get the XDG config file path.
fn xdg_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("snap-triage").join("config.toml"))
}

/// Find project-local config by searching up from current directory.
fn find_project_config() -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    find_config_in_parents(&cwd)
}

/// Search for `.snap-triage.toml` in the given directory and its parents.
fn find_config_in_parents(start: &Path) -> Option<PathBuf> {
    let mut current = Some(start);

    while let Some(dir) = current {
        let config_path = dir.join(".snap-triage.toml");
        if config_path.exists() {
            return Some(config_path);
        }
        current = dir.parent();
    }

    None
}

/// Load and parse a TOML config file.
fn load_file(path: &Path) -> Option<AppConfig> {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            tracing::warn!("Failed to read config file {}: {}", path.display(), e);
            return None;
        }
    };

    match toml::from_str(&content) {
        Ok(config) => Some(config),
        Err(e) => {
            tracing::warn!("Failed to parse config file {}: {}", path.display(), e);
            None
        }
    }
}
