//! End-to-end runs of the `btc-relay` binary over fixture files.

use std::fs;
use std::process::Command;

use relay_test_utils::{mainnet_fixture_json, BLOCK_1_HEADER, BLOCK_3_HASH, GENESIS_HEADER};
use tempfile::TempDir;

fn run(args: &[&str]) -> (bool, String, String) {
    let output = Command::new(env!("CARGO_BIN_EXE_btc-relay"))
        .args(args)
        .output()
        .expect("failed to run btc-relay");
    (
        output.status.success(),
        String::from_utf8_lossy(&output.stdout).to_string(),
        String::from_utf8_lossy(&output.stderr).to_string(),
    )
}

#[test]
fn test_replay_mainnet_fixture() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("blocks.json");
    fs::write(&path, mainnet_fixture_json()).unwrap();

    let (ok, stdout, _) = run(&["--headers", path.to_str().unwrap(), "--quiet"]);

    assert!(ok);
    assert!(stdout.contains(&format!("accepted {} at 3", BLOCK_3_HASH)));
    assert!(stdout.contains("3 submitted, 3 accepted, 0 rejected, 4 headers stored"));
}

#[test]
fn test_replay_reports_truncated_header() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("blocks.json");
    let fixture = format!(
        r#"[{{"header": "0x{}", "height": 0}}, {{"header": "0x{}", "height": 1}}]"#,
        GENESIS_HEADER,
        &BLOCK_1_HEADER[..56]
    );
    fs::write(&path, fixture).unwrap();

    let (ok, stdout, _) = run(&["--headers", path.to_str().unwrap(), "--quiet"]);

    assert!(ok);
    assert!(stdout.contains("rejected 1: ERR_INVALID_HEADER"));
    assert!(stdout.contains("1 submitted, 0 accepted, 1 rejected, 1 headers stored"));
}

#[test]
fn test_missing_fixture_fails() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("missing.json");

    let (ok, _, stderr) = run(&["--headers", path.to_str().unwrap(), "--quiet"]);

    assert!(!ok);
    assert!(stderr.contains("Fixture error"));
}

#[test]
fn test_log_file_written() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("blocks.json");
    let logs = dir.path().join("logs");
    fs::write(&path, mainnet_fixture_json()).unwrap();

    let (ok, _, _) = run(&[
        "--headers",
        path.to_str().unwrap(),
        "--quiet",
        "--log-dir",
        logs.to_str().unwrap(),
        "--log-level",
        "debug",
    ]);

    assert!(ok);
    let log = fs::read_to_string(logs.join("relay.log")).unwrap();
    assert!(log.contains("Relay initialized with genesis"));
}

#[test]
fn test_daily_log_rotation() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("blocks.json");
    let logs = dir.path().join("logs");
    fs::write(&path, mainnet_fixture_json()).unwrap();

    let (ok, _, _) = run(&[
        "--headers",
        path.to_str().unwrap(),
        "--quiet",
        "--log-dir",
        logs.to_str().unwrap(),
        "--log-rotation",
        "daily",
    ]);

    assert!(ok);
    let names: Vec<String> = fs::read_dir(&logs)
        .unwrap()
        .filter_map(|e| e.ok())
        .filter_map(|e| e.file_name().to_str().map(str::to_owned))
        .collect();
    assert_eq!(names.len(), 1);
    assert!(names[0].starts_with("relay.") && names[0] != "relay.log");
    let log = fs::read_to_string(logs.join(&names[0])).unwrap();
    assert!(log.contains("Relay initialized with genesis"));
}

#[test]
fn test_log_rotation_requires_log_dir() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("blocks.json");
    fs::write(&path, mainnet_fixture_json()).unwrap();

    let (ok, _, _) = run(&["--headers", path.to_str().unwrap(), "--log-rotation", "daily"]);
    assert!(!ok);
}
