//! Basic CLI E2E tests.
//!
//! Tests invoke the built binary with an isolated HOME and verify outputs.

use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};

/// Run a CLI command and return (stdout, stderr, exit code).
fn run_cli(home: &Path, args: &[&str], stdin: Option<&str>) -> (String, String, i32) {
    let mut child = Command::new(env!("CARGO_BIN_EXE_zenflow-cli"))
        .args(args)
        .env("HOME", home)
        .env_remove("ZENFLOW_ENV")
        .env_remove("RUST_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to execute CLI command");

    {
        let mut pipe = child.stdin.take().expect("stdin is piped");
        if let Some(input) = stdin {
            pipe.write_all(input.as_bytes()).expect("Failed to write stdin");
        }
    }

    let output = child.wait_with_output().expect("Failed to wait for CLI");
    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

const STRAIGHT_MOUNTAIN: &str = r#"{"captured_at_ms": 0, "observations": [{"root": {"x": 0.5, "y": 0.3, "confidence": 0.9}, "neck": {"x": 0.5, "y": 0.6, "confidence": 0.9}, "rightShoulder": {"x": 0.5, "y": 0.9, "confidence": 0.9}}]}"#;

#[test]
fn test_pose_list() {
    let home = tempfile::tempdir().unwrap();
    let (stdout, _, code) = run_cli(home.path(), &["pose", "list"], None);
    assert_eq!(code, 0);
    assert_eq!(stdout.lines().count(), 10);
    assert!(stdout.contains("Downward-Facing Dog"));
}

#[test]
fn test_pose_list_json() {
    let home = tempfile::tempdir().unwrap();
    let (stdout, _, code) = run_cli(home.path(), &["pose", "list", "--json"], None);
    assert_eq!(code, 0);
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let poses = parsed.as_array().unwrap();
    assert_eq!(poses.len(), 10);
    assert_eq!(poses[0]["slug"], "mountain");
    assert_eq!(poses[0]["joints"]["vertex"], "neck");
}

#[test]
fn test_pose_check() {
    let home = tempfile::tempdir().unwrap();
    let (stdout, _, code) = run_cli(home.path(), &["pose", "check", "Tree Pose", "165"], None);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "Poor Tree Pose: Place your foot higher on your inner thigh");

    let (stdout, _, _) = run_cli(home.path(), &["pose", "check", "mountain", "170"], None);
    assert_eq!(stdout.trim(), "Improve Mountain Pose: Straighten your spine more");
}

#[test]
fn test_pose_check_unknown_pose_fails() {
    let home = tempfile::tempdir().unwrap();
    let (_, stderr, code) = run_cli(home.path(), &["pose", "check", "Lotus", "90"], None);
    assert_ne!(code, 0);
    assert!(stderr.contains("Pose not recognized"));
}

#[test]
fn test_analyze_from_stdin() {
    let home = tempfile::tempdir().unwrap();
    let (stdout, stderr, code) = run_cli(
        home.path(),
        &["analyze", "--pose", "Mountain Pose"],
        Some(&format!("{STRAIGHT_MOUNTAIN}\n")),
    );
    assert_eq!(code, 0, "stderr: {stderr}");
    assert_eq!(stdout.trim(), "Good Mountain Pose: Spine is straight and aligned");
    assert!(stderr.contains("Summary: Good Mountain Pose"));
}

#[test]
fn test_analyze_json_from_file() {
    let home = tempfile::tempdir().unwrap();
    let frames = home.path().join("frames.jsonl");
    std::fs::write(&frames, format!("{STRAIGHT_MOUNTAIN}\n")).unwrap();

    let (stdout, _, code) = run_cli(
        home.path(),
        &["analyze", "--pose", "plank", "--json", "--input", frames.to_str().unwrap()],
        None,
    );
    assert_eq!(code, 0);
    let fb: serde_json::Value = serde_json::from_str(stdout.trim()).unwrap();
    assert_eq!(fb["pose"], "plank");
    assert_eq!(fb["verdict"], "undetectable");
    assert_eq!(fb["message"], "Cannot detect Plank Pose");
}

#[test]
fn test_analyze_bad_frame_fails() {
    let home = tempfile::tempdir().unwrap();
    let (_, stderr, code) = run_cli(home.path(), &["analyze"], Some("not json\n"));
    assert_ne!(code, 0);
    assert!(stderr.contains("line 1"));
}

#[test]
fn test_config_set_get() {
    let home = tempfile::tempdir().unwrap();
    let (stdout, _, code) = run_cli(home.path(), &["config", "set", "analysis.pose", "cobra"], None);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "ok");

    let (stdout, _, _) = run_cli(home.path(), &["config", "get", "analysis.pose"], None);
    assert_eq!(stdout.trim(), "cobra");

    let (_, _, code) = run_cli(home.path(), &["config", "set", "analysis.pose", "lotus"], None);
    assert_ne!(code, 0);
}

#[test]
fn test_config_list_and_reset() {
    let home = tempfile::tempdir().unwrap();
    run_cli(home.path(), &["config", "set", "output.json", "true"], None);
    let (stdout, _, code) = run_cli(home.path(), &["config", "list"], None);
    assert_eq!(code, 0);
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(parsed["output"]["json"], true);

    let (_, _, code) = run_cli(home.path(), &["config", "reset"], None);
    assert_eq!(code, 0);
    let (stdout, _, _) = run_cli(home.path(), &["config", "get", "output.json"], None);
    assert_eq!(stdout.trim(), "false");
}
