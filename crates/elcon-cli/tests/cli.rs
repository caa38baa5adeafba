use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::PredicateBooleanExt;
use predicates::str::{contains, diff};
use serde_json::Value;
use tempfile::TempDir;

fn cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("elcon"))
}

fn repo_root() -> PathBuf {
    let manifest = std::path::Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest
        .parent()
        .and_then(|p| p.parent())
        .expect("repo root")
        .to_path_buf()
}

fn golden(case: &str, file: &str) -> PathBuf {
    repo_root().join("tests").join("golden").join(case).join(file)
}

fn expected_output(case: &str) -> String {
    fs::read_to_string(golden(case, "expected_output.txt")).expect("expected output")
}

#[test]
fn help_lists_dump() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(contains("dump"));
    cmd().arg("dump").arg("--help").assert().success();
}

#[test]
fn version_includes_build_info() {
    cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(contains("elcon"));
}

#[test]
fn dump_binary_reference_frame() {
    cmd()
        .arg("dump")
        .arg(golden("reference", "input.bin"))
        .assert()
        .code(0)
        .stdout(diff(expected_output("reference")));
}

#[test]
fn dump_hex_frame_by_extension() {
    cmd()
        .arg("dump")
        .arg(golden("charging_240vac", "input.hex"))
        .assert()
        .code(0)
        .stdout(diff(expected_output("charging_240vac")));
}

#[test]
fn dump_builtin_reference() {
    cmd()
        .arg("dump")
        .arg("--reference")
        .assert()
        .code(0)
        .stdout(diff(expected_output("reference")));
}

#[test]
fn exit_codes_follow_check_order() {
    let cases = [
        ("bad_start_marker", 1),
        ("master_type", 2),
        ("bad_length", 3),
        ("bad_checksum", 4),
    ];
    for (case, code) in cases {
        cmd()
            .arg("dump")
            .arg(golden(case, "input.hex"))
            .assert()
            .code(code)
            .stdout(diff(expected_output(case)));
    }
}

#[test]
fn master_packet_warns_on_stderr() {
    cmd()
        .arg("dump")
        .arg(golden("master_type", "input.hex"))
        .assert()
        .code(2)
        .stderr(contains("Master packet"));
}

#[test]
fn truncated_frame_is_a_tool_error() {
    cmd()
        .arg("dump")
        .arg(golden("truncated", "input.hex"))
        .assert()
        .code(5)
        .stderr(contains("error: malformed input").and(contains("hint:")));
}

#[test]
fn forced_hex_encoding() {
    let temp = TempDir::new().expect("tempdir");
    let input = temp.path().join("frame.dat");
    fs::copy(golden("reference", "input.hex"), &input).expect("copy fixture");

    cmd()
        .arg("dump")
        .arg(&input)
        .assert()
        .code(5);
    cmd()
        .arg("dump")
        .arg(&input)
        .arg("--hex")
        .assert()
        .code(0)
        .stdout(diff(expected_output("reference")));
}

#[test]
fn missing_input_shows_error_and_hint() {
    let temp = TempDir::new().expect("tempdir");
    let missing = temp.path().join("missing.bin");

    cmd()
        .arg("dump")
        .arg(missing)
        .assert()
        .code(5)
        .stderr(contains("error:").and(contains("hint:")));
}

#[test]
fn glob_matching_several_files_is_rejected() {
    let temp = TempDir::new().expect("tempdir");
    for name in ["a.bin", "b.bin"] {
        fs::copy(golden("reference", "input.bin"), temp.path().join(name)).expect("copy");
    }
    let pattern = temp.path().join("*.bin");

    cmd()
        .arg("dump")
        .arg(pattern)
        .assert()
        .code(5)
        .stderr(contains("multiple files match pattern"));
}

#[test]
fn glob_matching_one_file_is_used() {
    let temp = TempDir::new().expect("tempdir");
    fs::copy(golden("reference", "input.bin"), temp.path().join("only.bin")).expect("copy");
    let pattern = temp.path().join("*.bin");

    cmd()
        .arg("dump")
        .arg(pattern)
        .assert()
        .code(0)
        .stdout(diff(expected_output("reference")));
}

#[test]
fn json_report_for_valid_frame() {
    let assert = cmd()
        .arg("dump")
        .arg(golden("reference", "input.bin"))
        .arg("--json")
        .assert()
        .code(0);
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).expect("utf8 stdout");
    let value: Value = serde_json::from_str(&stdout).expect("valid json");
    assert_eq!(value["valid"], true);
    assert_eq!(value["packet"]["length"], 74);
    assert_eq!(value["fields"].as_array().map(Vec::len), Some(31));
}

#[test]
fn json_report_keeps_exit_code_for_invalid_frame() {
    let assert = cmd()
        .arg("dump")
        .arg(golden("bad_checksum", "input.hex"))
        .arg("--json")
        .arg("--pretty")
        .assert()
        .code(4);
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).expect("utf8 stdout");
    let value: Value = serde_json::from_str(&stdout).expect("valid json");
    assert_eq!(value["valid"], false);
    assert_eq!(
        value["error"],
        "Incorrect checksum. Calculated: 0x5F  Read: 0x00"
    );
}

#[test]
fn pretty_requires_json() {
    cmd()
        .arg("dump")
        .arg("--reference")
        .arg("--pretty")
        .assert()
        .failure();
}

#[test]
fn quiet_suppresses_output() {
    cmd()
        .arg("dump")
        .arg(golden("bad_length", "input.hex"))
        .arg("--quiet")
        .assert()
        .code(3)
        .stdout(predicates::str::is_empty());
}

#[test]
fn reference_conflicts_with_input() {
    cmd()
        .arg("dump")
        .arg("--reference")
        .arg(golden("reference", "input.bin"))
        .assert()
        .failure();
}
