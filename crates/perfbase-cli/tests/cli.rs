use assert_cmd::Command;
use predicates::prelude::*;
use std::path::PathBuf;

#[allow(deprecated)]
fn get_perfbase_bin() -> PathBuf {
    assert_cmd::cargo::cargo_bin("perfbase")
}

fn fixture_path(filename: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .parent()
        .unwrap()
        .join("tests")
        .join("fixtures")
        .join(filename)
}

#[test]
fn test_report_help() {
    let mut cmd = Command::new(get_perfbase_bin());
    cmd.arg("report").arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("--fail-fast"))
        .stdout(predicate::str::contains("--top-scripts"));
}

#[test]
fn test_categorize_command() {
    let mut cmd = Command::new(get_perfbase_bin());
    cmd.args([
        "--no-color",
        "categorize",
        "https://x/api/v2/billing/invoice.json",
        "https://x/app.css",
        "https://x/api/v1",
    ]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Billing"))
        .stdout(predicate::str::contains("Static Asset"))
        .stdout(predicate::str::contains("General"));
}

#[test]
fn test_report_json_output() {
    let mut cmd = Command::new(get_perfbase_bin());
    cmd.arg("--format")
        .arg("json")
        .arg("report")
        .arg(fixture_path("checkout.har"))
        .arg(fixture_path("lighthouse-home.json"));

    let output = cmd.assert().success().get_output().stdout.clone();
    let value: serde_json::Value = serde_json::from_slice(&output).unwrap();

    assert_eq!(value["reports"][0]["sheet_name"], "checkout");
    assert_eq!(value["reports"][0]["kind"], "network");
    assert_eq!(value["reports"][0]["baseline"]["total_requests"], 4);
    assert_eq!(value["reports"][1]["kind"], "audit");
    assert_eq!(value["reports"][1]["category_scores"][0]["score"], 87);
}

#[test]
fn test_report_format_from_environment() {
    let mut cmd = Command::new(get_perfbase_bin());
    cmd.env("PERFBASE_FORMAT", "table")
        .arg("report")
        .arg(fixture_path("checkout.har"));

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Sheet,checkout"))
        .stdout(predicate::str::contains("Skipped,3,"));
}

#[test]
fn test_report_fails_when_nothing_parses() {
    let mut cmd = Command::new(get_perfbase_bin());
    cmd.arg("--no-color")
        .arg("report")
        .arg(fixture_path("not-a-capture.json"));

    cmd.assert()
        .failure()
        .stdout(predicate::str::contains("not-a-capture.json"))
        .stderr(predicate::str::contains("No capture file produced a report"));
}

#[test]
fn test_report_missing_path_fails() {
    let mut cmd = Command::new(get_perfbase_bin());
    cmd.arg("report").arg(fixture_path("does-not-exist.har"));

    cmd.assert().failure();
}
