//! End-to-end tests for the `recibo` binary.

use std::io::Write;

use assert_cmd::Command;
use predicates::prelude::*;

fn write_transcript(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".txt")
        .tempfile()
        .expect("create transcript file");
    file.write_all(content.as_bytes()).expect("write transcript");
    file
}

#[test]
fn scan_emits_contract_json() {
    let transcript = write_transcript(
        "COSTCO WHOLESALE\n2024/01/15 10:32:01\nSUBTOTAL 40.18\nTOTAL: $45.67\n",
    );

    let output = Command::cargo_bin("recibo")
        .unwrap()
        .arg("scan")
        .arg(transcript.path())
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let json: serde_json::Value =
        serde_json::from_slice(&output).expect("scan output is valid JSON");

    assert_eq!(json["store_name"], "Costco");
    assert_eq!(json["total_amount"], "CAD 45.67");
    assert_eq!(json["date"], "2024/01/15");
}

#[test]
fn scan_empty_transcript_yields_nulls() {
    let transcript = write_transcript("");

    let output = Command::cargo_bin("recibo")
        .unwrap()
        .arg("scan")
        .arg(transcript.path())
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let json: serde_json::Value =
        serde_json::from_slice(&output).expect("scan output is valid JSON");

    assert!(json["store_name"].is_null());
    assert!(json["total_amount"].is_null());
    assert!(json["date"].is_null());
}

#[test]
fn scan_missing_input_fails() {
    Command::cargo_bin("recibo")
        .unwrap()
        .arg("scan")
        .arg("does-not-exist.txt")
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn scan_text_format() {
    let transcript = write_transcript("WALMART\nTOTAL 12.00\n");

    Command::cargo_bin("recibo")
        .unwrap()
        .args(["scan", "--format", "text"])
        .arg(transcript.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Store: Walmart"))
        .stdout(predicate::str::contains("Total: CAD 12.00"))
        .stdout(predicate::str::contains("Date:  (not found)"));
}

#[test]
fn batch_writes_outputs_and_summary() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("a.txt"), "WALMART\nTOTAL 12.00\n").unwrap();
    std::fs::write(dir.path().join("b.txt"), "HMART\n2024-03-01\n").unwrap();

    let out_dir = tempfile::tempdir().unwrap();
    let pattern = dir.path().join("*.txt");

    Command::cargo_bin("recibo")
        .unwrap()
        .arg("batch")
        .arg(pattern.to_str().unwrap())
        .arg("--output-dir")
        .arg(out_dir.path())
        .arg("--summary")
        .assert()
        .success()
        .stdout(predicate::str::contains("2 successful"));

    assert!(out_dir.path().join("a.json").exists());
    assert!(out_dir.path().join("b.json").exists());

    let summary = std::fs::read_to_string(out_dir.path().join("summary.csv")).unwrap();
    assert!(summary.contains("a.txt"));
    assert!(summary.contains("Walmart"));
}
