//! End-to-end tests for the crm-link binary.

use assert_cmd::Command;
use predicates::prelude::*;

const CUSTOMERS: &str = r#"[
    {"id": "fb-1001", "name": "Acme Co", "accountNumber": "ABC-123"},
    {"id": "fb-1002", "name": "Windy City Supply", "accountOrderId": "9999"},
    {"id": "fb-1003"}
]"#;

const COMPANIES: &str = r#"[
    {"id": 88412, "name": "Acme Co", "accountNumber": "abc123"},
    {"id": 90210, "name": "Windy City Supply Co"}
]"#;

fn write_fixtures(dir: &tempfile::TempDir) -> (std::path::PathBuf, std::path::PathBuf) {
    let customers = dir.path().join("customers.json");
    let companies = dir.path().join("companies.json");
    std::fs::write(&customers, CUSTOMERS).unwrap();
    std::fs::write(&companies, COMPANIES).unwrap();
    (customers, companies)
}

#[test]
fn test_match_text_output() {
    let dir = tempfile::tempdir().unwrap();
    let (customers, companies) = write_fixtures(&dir);

    Command::cargo_bin("crm-link")
        .unwrap()
        .args(["match", "--customers"])
        .arg(&customers)
        .arg("--companies")
        .arg(&companies)
        .assert()
        .success()
        .stdout(predicate::str::contains("Matched 1 of 3 customers"))
        .stdout(predicate::str::contains("Unmatched (2):"))
        .stdout(predicate::str::contains("candidate: 90210"));
}

#[test]
fn test_match_json_output() {
    let dir = tempfile::tempdir().unwrap();
    let (customers, companies) = write_fixtures(&dir);

    Command::cargo_bin("crm-link")
        .unwrap()
        .args(["match", "--format", "json", "--customers"])
        .arg(&customers)
        .arg("--companies")
        .arg(&companies)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"strategy\": \"account_number\""))
        .stdout(predicate::str::contains("\"matched_identifier\": \"abc123\""));
}

#[test]
fn test_match_report_feeds_apply_dry_run() {
    let dir = tempfile::tempdir().unwrap();
    let (customers, companies) = write_fixtures(&dir);
    let report = dir.path().join("report.json");

    Command::cargo_bin("crm-link")
        .unwrap()
        .args(["match", "--customers"])
        .arg(&customers)
        .arg("--companies")
        .arg(&companies)
        .arg("-o")
        .arg(&report)
        .assert()
        .success();

    Command::cargo_bin("crm-link")
        .unwrap()
        .args(["apply", "--dry-run", "--matches"])
        .arg(&report)
        .assert()
        .success()
        .stdout(predicate::str::contains("Applied 1 of 1 entries"));
}

#[test]
fn test_match_missing_input_file_fails() {
    Command::cargo_bin("crm-link")
        .unwrap()
        .args([
            "match",
            "--customers",
            "/nonexistent/customers.json",
            "--companies",
            "/nonexistent/companies.json",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read"));
}

#[test]
fn test_match_blank_id_fails_run() {
    let dir = tempfile::tempdir().unwrap();
    let customers = dir.path().join("customers.json");
    let companies = dir.path().join("companies.json");
    std::fs::write(&customers, r#"[{"id": "   "}]"#).unwrap();
    std::fs::write(&companies, "[]").unwrap();

    Command::cargo_bin("crm-link")
        .unwrap()
        .args(["match", "--customers"])
        .arg(&customers)
        .arg("--companies")
        .arg(&companies)
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing its id"));
}
