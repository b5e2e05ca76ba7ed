//! End-to-end tests for the `attrshift` binary
//!
//! Each test runs the compiled binary inside its own temporary directory so
//! no `attrshift.toml` or `.env` from the repository is picked up.

use serde_json::Value;
use std::fs;
use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};
use tempfile::TempDir;

const LEGACY_VIEW: &str = r#"<form>
<button name="a" states="draft,sent"/>
<field name="b" attrs="{'invisible': [('state', '=', 'done')]}" widget="mail_thread"/>
</form>"#;

fn attrshift(dir: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_attrshift"));
    cmd.current_dir(dir)
        .env_remove("RUST_LOG")
        .env_remove("ATTRSHIFT_CONFIG")
        .env_remove("ATTRSHIFT_LOG_LEVEL");
    cmd
}

fn run(dir: &Path, args: &[&str]) -> Output {
    attrshift(dir).args(args).output().unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

// =============================================================================
// Single Expression Tests
// =============================================================================

#[test]
fn test_condition_command() {
    let dir = TempDir::new().unwrap();
    let output = run(
        dir.path(),
        &["condition", "['|', ('state','!=','pending'), ('provider_id','!=',uid)]"],
    );

    assert!(output.status.success());
    assert_eq!(
        stdout(&output).trim(),
        "(state != 'pending' or provider_id != uid)"
    );
}

#[test]
fn test_condition_parse_error_exit_code() {
    let dir = TempDir::new().unwrap();
    let output = run(dir.path(), &["condition", "[('state','!=')]"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("parse error"));
}

#[test]
fn test_condition_json_output() {
    let dir = TempDir::new().unwrap();
    let output = run(
        dir.path(),
        &["--json", "condition", "[('state','in',['done','cancelled'])]"],
    );

    assert!(output.status.success());
    let body: Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(body["output"], "state in ('done', 'cancelled')");
    assert_eq!(body["comparisons"], 1);
}

#[test]
fn test_states_command() {
    let dir = TempDir::new().unwrap();
    let output = run(dir.path(), &["states", "pending,in_progress"]);

    assert!(output.status.success());
    assert_eq!(
        stdout(&output).trim(),
        r#"invisible="state not in ('pending', 'in_progress')""#
    );

    let output = run(dir.path(), &["-q", "--json", "states", ","]);
    assert_eq!(output.status.code(), Some(1));
    let error: Value = serde_json::from_slice(&output.stderr).unwrap();
    assert_eq!(error["error"]["code"], "INPUT_ERROR");
}

// =============================================================================
// Document Tests
// =============================================================================

#[test]
fn test_convert_to_stdout() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("view.xml");
    fs::write(&input, LEGACY_VIEW).unwrap();

    let output = run(dir.path(), &["convert", "view.xml"]);

    assert!(output.status.success());
    assert_eq!(
        stdout(&output),
        r#"<form>
<button name="a" invisible="state not in ('draft', 'sent')"/>
<field name="b" invisible="state == 'done'" />
</form>"#
    );
}

#[test]
fn test_convert_default_output_and_report_paths() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("view.xml"), LEGACY_VIEW).unwrap();

    let output = run(dir.path(), &["-q", "convert", "view.xml", "--output", "--report"]);
    assert!(output.status.success());
    assert!(stdout(&output).is_empty());

    let converted = fs::read_to_string(dir.path().join("converted_xml.xml")).unwrap();
    assert!(!converted.contains("attrs="));
    assert!(!converted.contains("states="));

    let report: Value = serde_json::from_str(
        &fs::read_to_string(dir.path().join("conversion_report.json")).unwrap(),
    )
    .unwrap();
    assert_eq!(report["statistics"]["total"], 2);
    assert_eq!(report["statistics"]["attrs"], 1);
    assert_eq!(report["statistics"]["states"], 1);
    assert_eq!(report["conversions"][0]["kind"], "condition");
    assert_eq!(report["conversions"][1]["kind"], "allowed-states");
    assert!(report["validationErrors"].as_array().unwrap().is_empty());
    assert!(report["timestamp"].is_string());
}

#[test]
fn test_convert_yaml_report_and_pretty_output() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("view.xml"), LEGACY_VIEW).unwrap();

    let output = run(
        dir.path(),
        &["convert", "view.xml", "-o", "out.xml", "-r", "report.yaml", "--pretty"],
    );
    assert!(output.status.success());

    let converted = fs::read_to_string(dir.path().join("out.xml")).unwrap();
    assert!(converted.starts_with("<form>\n  <button name=\"a\""));
    assert!(converted.ends_with("</form>\n"));

    let report = fs::read_to_string(dir.path().join("report.yaml")).unwrap();
    assert!(report.contains("statistics:"));
    assert!(report.contains("kind: allowed-states"));
}

#[test]
fn test_convert_from_stdin_json() {
    let dir = TempDir::new().unwrap();
    let mut child = attrshift(dir.path())
        .args(["--json", "convert", "-"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();
    child
        .stdin
        .take()
        .unwrap()
        .write_all(br#"<field name="x" attrs="{'readonly': [('locked', '=', True)]}"/>"#)
        .unwrap();
    let output = child.wait_with_output().unwrap();

    assert!(output.status.success());
    let body: Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(body["output"], r#"<field name="x" readonly="locked == true"/>"#);
    assert_eq!(body["statistics"]["total"], 1);
    assert!(body["skipped"].as_array().unwrap().is_empty());
}

#[test]
fn test_convert_missing_file() {
    let dir = TempDir::new().unwrap();
    let output = run(dir.path(), &["convert", "missing.xml"]);
    assert_eq!(output.status.code(), Some(3));
}

#[test]
fn test_validate_command() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("good.xml"), LEGACY_VIEW).unwrap();
    fs::write(dir.path().join("bad.xml"), "<form>\n<group>\n</form>").unwrap();

    let output = run(dir.path(), &["validate", "good.xml"]);
    assert!(output.status.success());

    let output = run(dir.path(), &["--json", "validate", "bad.xml"]);
    assert_eq!(output.status.code(), Some(1));
    let body: Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(body["valid"], false);
    assert_eq!(body["errors"].as_array().unwrap().len(), 1);
}

#[test]
fn test_sample_converts_cleanly() {
    let dir = TempDir::new().unwrap();
    let sample = run(dir.path(), &["sample"]);
    assert!(sample.status.success());
    fs::write(dir.path().join("sample.xml"), &sample.stdout).unwrap();

    let output = run(dir.path(), &["--json", "convert", "sample.xml"]);
    assert!(output.status.success());
    let body: Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(body["statistics"]["total"], 6);
    assert!(!body["output"].as_str().unwrap().contains("mail_followers"));
}

// =============================================================================
// Configuration Tests
// =============================================================================

#[test]
fn test_config_file_adds_attribute_key() {
    let dir = TempDir::new().unwrap();
    let view = r#"<field name="x" attrs="{'column_invisible': [('parent.state', '=', 'done')]}"/>"#;
    fs::write(dir.path().join("view.xml"), view).unwrap();

    // Unsupported key: the fragment is left alone
    let output = run(dir.path(), &["-q", "convert", "view.xml"]);
    assert_eq!(stdout(&output), view);

    fs::write(
        dir.path().join("attrshift.toml"),
        "[converter]\nattribute_keys = [\"invisible\", \"column_invisible\"]\n",
    )
    .unwrap();
    let output = run(dir.path(), &["-q", "convert", "view.xml"]);
    assert_eq!(
        stdout(&output),
        r#"<field name="x" column_invisible="parent.state == 'done'"/>"#
    );
}

#[test]
fn test_invalid_config_exit_code() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("custom.toml"), "[converter]\nattribute_keys = []\n").unwrap();

    let output = run(dir.path(), &["--config", "custom.toml", "sample"]);
    assert_eq!(output.status.code(), Some(5));

    let output = run(dir.path(), &["--config", "absent.toml", "sample"]);
    assert_eq!(output.status.code(), Some(5));
}

#[test]
fn test_malformed_default_config_is_reported() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("attrshift.toml"), "log_level = [unclosed\n").unwrap();

    let output = run(dir.path(), &["sample"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("attrs="));
    assert!(String::from_utf8_lossy(&output.stderr).contains("using default configuration"));
}
