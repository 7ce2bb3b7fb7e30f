//! CLI argument handling tests.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use assert_cmd::Command;

fn snap_triage() -> Command {
    let mut cmd = Command::cargo_bin("snap-triage").unwrap();
    // Isolate from any real user/project configuration.
    let dir = tempfile::tempdir().unwrap();
    cmd.current_dir(dir.path());
    cmd.env("HOME", dir.path());
    cmd.env("XDG_CONFIG_HOME", dir.path());
    // Keep the tempdir alive for the process duration.
    Box::leak(Box::new(dir));
    cmd
}

#[test]
fn test_help_mentions_threshold_and_weights() {
    let output = snap_triage().arg("--help").output().unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("--threshold"));
    assert!(stdout.contains("--weights"));
    assert!(stdout.contains("--retain-dir"));
    assert!(stdout.contains("--settle"));
}

#[test]
fn test_invalid_threshold_rejected_by_parser() {
    let output = snap_triage()
        .args(["--threshold", "1.5"])
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("1.5"), "stderr: {stderr}");
}

#[test]
fn test_non_numeric_threshold_rejected() {
    let output = snap_triage()
        .args(["--threshold", "high"])
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("not a valid number"), "stderr: {stderr}");
}

#[test]
fn test_missing_weights_configuration_fails() {
    let output = snap_triage().output().unwrap();

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("weights"), "stderr: {stderr}");
}

#[test]
fn test_missing_weight_file_fails_before_capture() {
    // A weight path that does not exist must end the run as a weight-load
    // failure; the capture command is never a factor (it does not exist
    // either, but the weights fail first).
    let output = snap_triage()
        .args([
            "--weights",
            "/nonexistent/classifier.safetensors",
            "--capture-cmd",
            "/nonexistent/capture-tool",
            "--cpu",
        ])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("weights unusable"),
        "stderr: {stderr}"
    );
}
