use std::fs;
use std::path::Path;
use std::process::{Command, Output};

fn write_settings(dir: &Path, settings: serde_json::Value) {
    fs::write(dir.join("settings.json"), settings.to_string()).unwrap();
}

fn run_binary(dir: &Path) -> Output {
    let bin_path = env!("CARGO_BIN_EXE_csvshift");
    Command::new(bin_path)
        .arg(dir.join("settings.json"))
        .output()
        .expect("failed to execute binary")
}

fn default_settings(dir: &Path) -> serde_json::Value {
    serde_json::json!({
        "input_folder": dir,
        "output_folder": dir,
        "input_file": "export.csv",
        "output_file": "converted.csv",
        "default_timezone": "America/New_York",
        "output_timezone": "UTC",
        "custom_column_headers": ["note"],
        "app_id": 42
    })
}

#[test]
fn test_converts_and_appends_columns() {
    let dir = tempfile::tempdir().unwrap();
    write_settings(dir.path(), default_settings(dir.path()));
    fs::write(
        dir.path().join("export.csv"),
        "name,timestamp\n\
         purchase,2024-03-10 01:30:00\n\
         open,\n\
         install,0\n",
    )
    .unwrap();

    let output = run_binary(dir.path());
    assert!(
        output.status.success(),
        "binary failed with stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let converted = fs::read_to_string(dir.path().join("converted.csv")).unwrap();
    assert_eq!(
        converted,
        "name,timestamp,note\n\
         purchase,2024-03-10 06:30:00,\n\
         open,,\n\
         install,1970-01-01 00:00:00,\n"
    );
}

#[test]
fn test_header_only_input() {
    let dir = tempfile::tempdir().unwrap();
    write_settings(dir.path(), default_settings(dir.path()));
    fs::write(dir.path().join("export.csv"), "name,timestamp\n").unwrap();

    let output = run_binary(dir.path());
    assert!(output.status.success());

    let converted = fs::read_to_string(dir.path().join("converted.csv")).unwrap();
    assert_eq!(converted, "name,timestamp,note\n");
}

#[test]
fn test_missing_app_id_aborts() {
    let dir = tempfile::tempdir().unwrap();
    let mut settings = default_settings(dir.path());
    settings.as_object_mut().unwrap().remove("app_id");
    write_settings(dir.path(), settings);
    fs::write(dir.path().join("export.csv"), "name,timestamp\n").unwrap();

    let output = run_binary(dir.path());
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("app_id"), "stderr was: {stderr}");
    assert!(!dir.path().join("converted.csv").exists());
}

#[test]
fn test_missing_input_file_aborts() {
    let dir = tempfile::tempdir().unwrap();
    write_settings(dir.path(), default_settings(dir.path()));

    let output = run_binary(dir.path());
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("not found"), "stderr was: {stderr}");
}

#[test]
fn test_bad_timestamp_aborts_without_touching_output() {
    let dir = tempfile::tempdir().unwrap();
    write_settings(dir.path(), default_settings(dir.path()));
    fs::write(
        dir.path().join("export.csv"),
        "name,timestamp\nopen,not-a-timestamp\n",
    )
    .unwrap();
    fs::write(dir.path().join("converted.csv"), "previous run\n").unwrap();

    let output = run_binary(dir.path());
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("not-a-timestamp"), "stderr was: {stderr}");

    let converted = fs::read_to_string(dir.path().join("converted.csv")).unwrap();
    assert_eq!(converted, "previous run\n");
}
