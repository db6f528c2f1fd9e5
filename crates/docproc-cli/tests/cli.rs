use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::{json, Value};
use tempfile::TempDir;

const INVOICE: &str = "Invoice Number: 12345\nDate: 2024-07-15\n- Widget A: $50.00\n- Widget B: $30.00\nTotal Amount: $80.00";

/// Temp dir holding an offline config so the user's config is never read.
fn offline_config() -> (TempDir, String) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.json");
    fs::write(&path, r#"{"drug_info": {"enabled": false}}"#).unwrap();
    let path = path.display().to_string();
    (dir, path)
}

fn docproc(config: &str) -> Command {
    let mut cmd = Command::cargo_bin("docproc").unwrap();
    cmd.env_remove("RUST_LOG").args(["--config", config]);
    cmd
}

fn stdout_json(output: &std::process::Output) -> Value {
    serde_json::from_slice(&output.stdout).unwrap()
}

#[test]
fn batch_from_stdin_preserves_order() {
    let (_dir, config) = offline_config();
    let batch = json!([
        {"type": "invoice", "content": "Invoice Number: A\nTotal Amount: $1.00"},
        {"type": "news_article", "content": "Title: B\nKey Points:\n- one"},
        {"type": "memo", "content": "ignored"},
        {"type": "invoice", "content": "Invoice Number: C\nTotal Amount: $2.00"},
        {"type": "medical_report", "content": "- Aspirin: 100mg\nRecommendations:\n- Rest"},
    ]);

    let output = docproc(&config)
        .args(["batch", "-"])
        .write_stdin(batch.to_string())
        .output()
        .unwrap();
    assert!(output.status.success());

    let json = stdout_json(&output);
    assert_eq!(json["invoices"][0]["Invoice Number"], "A");
    assert_eq!(json["invoices"][1]["Invoice Number"], "C");
    assert_eq!(json["news_articles"][0]["Key Points"], json!(["one"]));
    assert_eq!(
        json["medical_reports"][0]["Prescriptions"][0]["Drug Info"],
        "No information available"
    );
}

#[test]
fn batch_reads_json_files() {
    let (dir, config) = offline_config();
    let input = dir.path().join("docs.json");
    fs::write(&input, json!({"type": "invoice", "content": INVOICE}).to_string()).unwrap();
    let out = dir.path().join("out.json");

    docproc(&config)
        .args(["batch", "--jobs", "2", "--summary"])
        .arg(&input)
        .arg("--output")
        .arg(&out)
        .assert()
        .success()
        .stderr(predicate::str::contains("1 succeeded"));

    let json: Value = serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(json["invoices"][0]["Items"].as_array().unwrap().len(), 2);
    assert_eq!(json["invoices"][0]["Total Amount"], 80.0);
}

#[test]
fn batch_fails_on_malformed_input() {
    let (_dir, config) = offline_config();
    docproc(&config)
        .args(["batch", "-"])
        .write_stdin("{not json")
        .assert()
        .failure();
}

#[test]
fn batch_continue_on_error_skips_missing_input() {
    let (_dir, config) = offline_config();
    docproc(&config)
        .args(["batch", "--continue-on-error", "/nonexistent/*.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("{}"));
}

#[test]
fn process_single_invoice_file() {
    let (dir, config) = offline_config();
    let input = dir.path().join("invoice.txt");
    fs::write(&input, format!("\n   {}\n\n", INVOICE)).unwrap();

    let output = docproc(&config)
        .args(["process", "--type", "invoice"])
        .arg(&input)
        .output()
        .unwrap();
    assert!(output.status.success());

    let json = stdout_json(&output);
    assert_eq!(json["invoices"][0]["Invoice Number"], "12345");
    assert_eq!(json["invoices"][0]["Date"], "2024-07-15");
}

#[test]
fn process_invoice_without_total_is_empty() {
    let (dir, config) = offline_config();
    let input = dir.path().join("invoice.txt");
    fs::write(&input, "Invoice Number: 12345").unwrap();

    let output = docproc(&config)
        .args(["process", "--type", "invoice"])
        .arg(&input)
        .output()
        .unwrap();
    assert!(output.status.success());
    assert_eq!(stdout_json(&output), json!({}));
}

#[test]
fn process_unknown_type_warns_with_known_types() {
    let (dir, config) = offline_config();
    let input = dir.path().join("memo.txt");
    fs::write(&input, "Remember the milk").unwrap();

    docproc(&config)
        .args(["process", "--type", "memo"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("{}"))
        .stderr(
            predicate::str::contains("unknown document type: memo")
                .and(predicate::str::contains("invoice, medical_report, news_article")),
        );
}

#[test]
fn process_text_format() {
    let (dir, config) = offline_config();
    let input = dir.path().join("article.txt");
    fs::write(&input, "Title: Solar\nAuthor: Sarah\nKey Points:\n- Cheaper").unwrap();

    docproc(&config)
        .args(["process", "--type", "news_article", "--format", "text"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("Title: Solar").and(predicate::str::contains("- Cheaper")));
}

#[test]
fn process_missing_file_fails() {
    let (_dir, config) = offline_config();
    docproc(&config)
        .args(["process", "--type", "invoice", "/nonexistent/file.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input file not found"));
}

#[test]
fn invalid_config_fails() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.json");
    fs::write(&path, r#"{"dispatcher": {"workers": 0}}"#).unwrap();

    docproc(&path.display().to_string())
        .args(["batch", "-"])
        .write_stdin("[]")
        .assert()
        .failure();
}
