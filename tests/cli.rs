// End-to-end runs of the pin-audit binary.

use std::io::Write;
use std::process::Command;
use tempfile::tempdir;

const HEADER: &str = include_str!("fixtures/hwio_pindef.h");
const EXPECTED_REPORT: &str = include_str!("fixtures/expected_report.txt");

fn pin_audit() -> Command {
    Command::new(env!("CARGO_BIN_EXE_pin-audit"))
}

#[test]
fn test_text_report_on_stdout() {
    let dir = tempdir().unwrap();
    let header = dir.path().join("hwio_pindef.h");
    std::fs::write(&header, HEADER).unwrap();

    let output = pin_audit().arg("--header").arg(&header).output().unwrap();
    assert!(output.status.success());
    assert_eq!(String::from_utf8(output.stdout).unwrap(), EXPECTED_REPORT);
}

#[test]
fn test_missing_header_fails() {
    let dir = tempdir().unwrap();
    let output = pin_audit()
        .arg("--header")
        .arg(dir.path().join("missing.h"))
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
}

#[test]
fn test_config_file_and_json_format() {
    let dir = tempdir().unwrap();
    let header = dir.path().join("pins.h");
    std::fs::write(&header, HEADER).unwrap();
    let config_path = dir.path().join("board.toml");
    let mut file = std::fs::File::create(&config_path).unwrap();
    writeln!(file, "board_name = 'XL'").unwrap();
    writeln!(file, "header = '{}'", header.display()).unwrap();
    writeln!(file, "board_pins = []").unwrap();
    file.flush().unwrap();

    let output = pin_audit()
        .arg("--config")
        .arg(&config_path)
        .args(["--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["board"], "XL");
    // Six Marlin pins plus E9; E11 is shared with the FAN entry.
    assert_eq!(value["used"].as_array().unwrap().len(), 7);
    assert_eq!(value["free"].as_array().unwrap().len(), 105);
}
