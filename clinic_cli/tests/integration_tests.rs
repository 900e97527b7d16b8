//! Integration tests for the clinic-form binary.
//!
//! These tests drive a whole session through stdin and verify:
//! - The access gate
//! - Saving, listing and rejecting records
//! - CSV export to disk

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const PASSWORD: &str = "test-secret";

/// Helper to create a test output directory
fn setup_test_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

/// Helper to get the binary with an isolated environment
fn cli(dir: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("clinic-form"));
    cmd.env("XDG_CONFIG_HOME", dir.join("config"))
        .env("CLINIC_FORM_PASSWORD", PASSWORD)
        .env_remove("RUST_LOG")
        .arg("--output-dir")
        .arg(dir);
    cmd
}

/// Stdin lines for one `save` with the given core values, other fields default
fn save_script(age: &str, gender: &str, weight: &str, height: &str) -> String {
    format!("save\n{age}\n{gender}\n{weight}\n{height}\n\n\n140/90\n\n\n\n\n\n")
}

#[test]
fn test_cli_help() {
    let temp_dir = setup_test_dir();
    cli(temp_dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Clinical data entry form"));
}

#[test]
fn test_wrong_password_halts() {
    let temp_dir = setup_test_dir();
    cli(temp_dir.path())
        .args(["session", "--password", "wrong"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Please enter the correct password"))
        .stdout(predicate::str::contains("Clinical Data Entry Form").not());

    assert!(!temp_dir.path().join("patient_records_export.csv").exists());
}

#[test]
fn test_password_prompted_from_stdin() {
    let temp_dir = setup_test_dir();
    cli(temp_dir.path())
        .write_stdin(format!("{PASSWORD}\nlist\nquit\n"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Enter Password (input is visible)"))
        .stdout(predicate::str::contains("No records saved yet."));
}

#[test]
fn test_missing_secret_is_config_error() {
    let temp_dir = setup_test_dir();
    cli(temp_dir.path())
        .env_remove("CLINIC_FORM_PASSWORD")
        .args(["session", "--password", PASSWORD])
        .assert()
        .failure()
        .stderr(predicate::str::contains("CLINIC_FORM_PASSWORD"));
}

#[test]
fn test_save_and_list() {
    let temp_dir = setup_test_dir();
    let script = save_script("30", "M", "70", "175") + "list\nquit\n";

    cli(temp_dir.path())
        .args(["session", "--password", PASSWORD])
        .write_stdin(script)
        .assert()
        .success()
        .stdout(predicate::str::contains("BMI: 22.86"))
        .stdout(predicate::str::contains("Record for Age 30 saved successfully!"))
        .stdout(predicate::str::contains("Total Records: 1"));
}

#[test]
fn test_zero_weight_rejected() {
    let temp_dir = setup_test_dir();
    let script = save_script("30", "M", "0", "175") + "list\ndownload\nquit\n";

    cli(temp_dir.path())
        .args(["session", "--password", PASSWORD])
        .write_stdin(script)
        .assert()
        .success()
        .stdout(predicate::str::contains("Age, Weight, and Height are required"))
        .stdout(predicate::str::contains("No records saved yet."))
        .stdout(predicate::str::contains("No records to download yet."));

    assert!(!temp_dir.path().join("patient_records_export.csv").exists());
}

#[test]
fn test_clear_keeps_records() {
    let temp_dir = setup_test_dir();
    let script = save_script("30", "M", "70", "175") + "clear\nlist\nquit\n";

    cli(temp_dir.path())
        .args(["session", "--password", PASSWORD])
        .write_stdin(script)
        .assert()
        .success()
        .stdout(predicate::str::contains("Input fields are not automatically reset"))
        .stdout(predicate::str::contains("Total Records: 1"));
}

#[test]
fn test_download_writes_csv() {
    let temp_dir = setup_test_dir();
    let script = save_script("30", "M", "70", "175")
        + &save_script("45", "F", "60", "160")
        + "download\nquit\n";

    cli(temp_dir.path())
        .args(["session", "--password", PASSWORD])
        .write_stdin(script)
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 2 records (text/csv)"));

    let csv_path = temp_dir.path().join("patient_records_export.csv");
    let content = fs::read_to_string(&csv_path).expect("Failed to read CSV");
    assert!(content.starts_with(
        "AGE,GENDER,WEIGHT(kg),HEIGHT(cm),BMI,WAIST CIRCUMFERENCE,BP(mmHg),\
         BLOOD SUGAR(mmol/L),HTN,DIABETES,BOTH DM+HTN,TREATMENT,VISIT TYPE"
    ));

    let mut reader = csv::Reader::from_path(&csv_path).unwrap();
    let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
    assert_eq!(rows.len(), 2);
    assert_eq!(&rows[0][0], "30");
    assert_eq!(&rows[0][4], "22.86");
    assert_eq!(&rows[0][6], "140/90");
    assert_eq!(&rows[0][12], "New Visit");
    assert_eq!(&rows[1][0], "45");
    assert_eq!(&rows[1][1], "F");
    assert_eq!(&rows[1][4], "23.44");
}

#[test]
fn test_records_do_not_outlive_session() {
    let temp_dir = setup_test_dir();

    cli(temp_dir.path())
        .args(["session", "--password", PASSWORD])
        .write_stdin(save_script("30", "M", "70", "175") + "quit\n")
        .assert()
        .success();

    cli(temp_dir.path())
        .args(["session", "--password", PASSWORD])
        .write_stdin("list\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("No records saved yet."));
}

#[test]
fn test_json_view() {
    let temp_dir = setup_test_dir();
    let script = save_script("52", "F", "80", "170") + "json\nquit\n";

    cli(temp_dir.path())
        .args(["session", "--password", PASSWORD])
        .write_stdin(script)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"age\": 52"))
        .stdout(predicate::str::contains("\"gender\": \"F\""));
}

#[test]
fn test_save_interrupted_by_end_of_input() {
    let temp_dir = setup_test_dir();

    cli(temp_dir.path())
        .args(["session", "--password", PASSWORD])
        .write_stdin("save\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Record not saved."))
        .stdout(predicate::str::contains("saved successfully").not());
}
