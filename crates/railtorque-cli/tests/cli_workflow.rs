use serde_json::Value;
use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

const EXPORT: &str = "ASC export v2\n\
Operator: J. Doe, 2024-03-01\n\
0 10 20 30 40 50 60 70 80 90 100 110\n\
0 0 3 -2 5 -10 4 0 1 -1 2 -3\n";

const NO_OFFSETS: &str = "ASC export v2\n\
0 10 20 30 40 50 60 70 80 90 100 110\n\
1 0 0 5\n";

fn run_railtorque(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_railtorque"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("railtorque should launch")
}

fn write_file(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("parent directory should be created");
    }
    fs::write(path, content).expect("file should be written");
}

fn path_arg(path: &Path) -> &str {
    path.to_str().expect("temp paths should be valid UTF-8")
}

#[test]
fn analyze_prints_table_with_settings_header() {
    let temp = TempDir::new().expect("tempdir should be created");
    let input = temp.path().join("rail.asc");
    write_file(&input, EXPORT);

    let output = run_railtorque(&[
        "analyze",
        path_arg(&input),
        "--clamps",
        "4",
        "--screw-size",
        "8",
        "--default-torque",
        "5",
    ]);

    assert!(
        output.status.success(),
        "analyze should succeed, stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("clamps=4 screw_size_mm=8 default_torque_lbs=5.00"));
    assert!(stdout.contains("position_line=3 offset_line=4"));
    assert!(stdout.contains("increase 10.0 lbs"));
    assert_eq!(stdout.lines().count(), 6 + 12);
}

#[test]
fn analyze_writes_json_report_to_nested_path() {
    let temp = TempDir::new().expect("tempdir should be created");
    let input = temp.path().join("rail.asc");
    let out = temp.path().join("reports/run-1/analysis.json");
    write_file(&input, EXPORT);

    let output = run_railtorque(&[
        "analyze",
        path_arg(&input),
        "--format",
        "json",
        "--out",
        path_arg(&out),
    ]);

    assert!(
        output.status.success(),
        "analyze should succeed, stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let parsed: Value =
        serde_json::from_str(&fs::read_to_string(&out).expect("report should be readable"))
            .expect("report JSON should parse");
    assert_eq!(parsed["settings"]["clampCount"], Value::from(1));
    assert_eq!(parsed["extraction"]["alignedCount"], Value::from(12));
    assert_eq!(parsed["records"][5]["suggestedNewTorque"], Value::from(15.0));
    assert_eq!(parsed["records"][5]["adjustmentLabel"], "increase 10.0 lbs");
}

#[test]
fn missing_offset_line_exits_with_input_validation_diagnostic() {
    let temp = TempDir::new().expect("tempdir should be created");
    let input = temp.path().join("rail.asc");
    write_file(&input, NO_OFFSETS);

    let output = run_railtorque(&["analyze", path_arg(&input)]);

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("ERROR: [INPUT.MISSING_OFFSET_DATA]"),
        "stderr should carry the diagnostic: {}",
        stderr
    );
    assert!(stderr.contains("FATAL EXIT CODE: 2"));
    assert!(output.stdout.is_empty());
}

#[test]
fn malformed_clamp_count_is_a_configuration_error() {
    let temp = TempDir::new().expect("tempdir should be created");
    let input = temp.path().join("rail.asc");
    write_file(&input, EXPORT);

    let output = run_railtorque(&["analyze", path_arg(&input), "--clamps", "four"]);

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ERROR: [INPUT.CONFIGURATION_PARSE] clamps must be a positive integer"));
}

#[test]
fn unreadable_input_is_an_io_error() {
    let temp = TempDir::new().expect("tempdir should be created");
    let missing = temp.path().join("absent.asc");

    let output = run_railtorque(&["analyze", path_arg(&missing)]);

    assert_eq!(output.status.code(), Some(3));
    assert!(String::from_utf8_lossy(&output.stderr).contains("[IO.INPUT_READ]"));
}

#[test]
fn config_file_supplies_defaults_and_flags_override_it() {
    let temp = TempDir::new().expect("tempdir should be created");
    let input = temp.path().join("rail.asc");
    let config = temp.path().join("settings.json");
    write_file(&input, EXPORT);
    write_file(
        &config,
        r#"{ "clampCount": 6, "screwSizeMm": 10, "defaultTorqueLbs": 7.5 }"#,
    );

    let output = run_railtorque(&[
        "analyze",
        path_arg(&input),
        "--config",
        path_arg(&config),
        "--clamps",
        "2",
    ]);

    assert!(
        output.status.success(),
        "analyze should succeed, stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(
        String::from_utf8_lossy(&output.stdout)
            .contains("clamps=2 screw_size_mm=10 default_torque_lbs=7.50")
    );
}

#[test]
fn report_writes_page_and_chart() {
    let temp = TempDir::new().expect("tempdir should be created");
    let input = temp.path().join("rail.asc");
    let page = temp.path().join("out/report.html");
    let chart = temp.path().join("out/chart.svg");
    write_file(&input, EXPORT);

    let output = run_railtorque(&[
        "report",
        path_arg(&input),
        "--out",
        path_arg(&page),
        "--chart",
        path_arg(&chart),
    ]);

    assert!(
        output.status.success(),
        "report should succeed, stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let html = fs::read_to_string(&page).expect("page should be readable");
    assert!(html.contains("<table>"));
    assert!(html.contains("<svg"));
    let svg = fs::read_to_string(&chart).expect("chart should be readable");
    assert!(svg.starts_with("<svg"));
    assert_eq!(svg.matches("<polyline").count(), 3);
}

#[test]
fn report_failure_still_writes_page_with_error() {
    let temp = TempDir::new().expect("tempdir should be created");
    let input = temp.path().join("rail.asc");
    let page = temp.path().join("report.html");
    let chart = temp.path().join("chart.svg");
    write_file(&input, NO_OFFSETS);

    let output = run_railtorque(&[
        "report",
        path_arg(&input),
        "--out",
        path_arg(&page),
        "--chart",
        path_arg(&chart),
    ]);

    assert_eq!(output.status.code(), Some(2));
    let html = fs::read_to_string(&page).expect("page should be written on failure");
    assert!(html.contains("class=\"error\""));
    assert!(html.contains("[INPUT.MISSING_OFFSET_DATA]"));
    assert!(!chart.exists(), "chart should only be written on success");
}

#[test]
fn report_configuration_error_still_writes_page() {
    let temp = TempDir::new().expect("tempdir should be created");
    let input = temp.path().join("rail.asc");
    let page = temp.path().join("report.html");
    write_file(&input, EXPORT);

    let output = run_railtorque(&[
        "report",
        path_arg(&input),
        "--clamps",
        "four",
        "--out",
        path_arg(&page),
    ]);

    assert_eq!(output.status.code(), Some(2));
    let html = fs::read_to_string(&page).expect("page should be written for bad settings");
    assert!(html.contains("[INPUT.CONFIGURATION_PARSE]"));
    assert!(!html.contains("<h2>Settings</h2>"));
    assert!(
        String::from_utf8_lossy(&output.stderr).contains("ERROR: [INPUT.CONFIGURATION_PARSE]")
    );
}

#[test]
fn report_unreadable_input_still_writes_page() {
    let temp = TempDir::new().expect("tempdir should be created");
    let missing = temp.path().join("absent.asc");
    let page = temp.path().join("report.html");

    let output = run_railtorque(&["report", path_arg(&missing), "--out", path_arg(&page)]);

    assert_eq!(output.status.code(), Some(3));
    let html = fs::read_to_string(&page).expect("page should be written for unreadable input");
    assert!(html.contains("[IO.INPUT_READ]"));
    assert!(html.contains("<li>Clamps: 1</li>"));
}

#[test]
fn analyze_html_format_writes_page() {
    let temp = TempDir::new().expect("tempdir should be created");
    let input = temp.path().join("rail.asc");
    let out = temp.path().join("analysis.html");
    write_file(&input, EXPORT);

    let output = run_railtorque(&[
        "analyze",
        path_arg(&input),
        "--format",
        "html",
        "--out",
        path_arg(&out),
    ]);

    assert!(
        output.status.success(),
        "analyze should succeed, stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let html = fs::read_to_string(&out).expect("page should be readable");
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("<table>"));
    assert!(html.contains("<svg"));
}

#[test]
fn inspect_lists_both_rules() {
    let temp = TempDir::new().expect("tempdir should be created");
    let input = temp.path().join("rail.asc");
    write_file(&input, EXPORT);

    let output = run_railtorque(&["inspect", path_arg(&input)]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(
        stdout.lines().collect::<Vec<_>>(),
        vec![
            "lines: 4",
            "digit-groups: positions line 3 (12 values), offsets line 4 (12 values)",
            "zero-comma: positions not found, offsets line 4 (12 values)",
        ]
    );
}

#[test]
fn help_and_unknown_flags() {
    let help = run_railtorque(&["--help"]);
    assert!(help.status.success());
    let stdout = String::from_utf8_lossy(&help.stdout);
    assert!(stdout.contains("analyze"));
    assert!(stdout.contains("report"));
    assert!(stdout.contains("inspect"));

    let unknown = run_railtorque(&["analyze", "--bogus"]);
    assert_eq!(unknown.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&unknown.stderr).contains("[INPUT.CLI_USAGE]"));
}
