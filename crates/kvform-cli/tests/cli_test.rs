//! End-to-end tests for the `kvform` binary.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const RESPONSE: &str = r#"{
    "Blocks": [
        {"BlockType": "KEY_VALUE_SET", "Id": "k1", "EntityTypes": ["KEY"],
         "Relationships": [{"Type": "VALUE", "Ids": ["v1"]}, {"Type": "CHILD", "Ids": ["w1", "w2"]}]},
        {"BlockType": "KEY_VALUE_SET", "Id": "v1", "EntityTypes": ["VALUE"],
         "Relationships": [{"Type": "CHILD", "Ids": ["w3"]}]},
        {"BlockType": "KEY_VALUE_SET", "Id": "k2", "EntityTypes": ["KEY"],
         "Relationships": [{"Type": "VALUE", "Ids": ["v2"]}, {"Type": "CHILD", "Ids": ["w4"]}]},
        {"BlockType": "KEY_VALUE_SET", "Id": "v2", "EntityTypes": ["VALUE"],
         "Relationships": [{"Type": "CHILD", "Ids": ["w5"]}]},
        {"BlockType": "KEY_VALUE_SET", "Id": "k3", "EntityTypes": ["KEY"],
         "Relationships": [{"Type": "VALUE", "Ids": ["missing"]}, {"Type": "CHILD", "Ids": ["w6"]}]},
        {"BlockType": "WORD", "Id": "w1", "Text": "Invoice"},
        {"BlockType": "WORD", "Id": "w2", "Text": "Number"},
        {"BlockType": "WORD", "Id": "w3", "Text": "INV-0042"},
        {"BlockType": "WORD", "Id": "w4", "Text": "Amount"},
        {"BlockType": "WORD", "Id": "w5", "Text": "1,234.56"},
        {"BlockType": "WORD", "Id": "w6", "Text": "Due"}
    ]
}"#;

fn kvform(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("kvform").unwrap();
    cmd.env("XDG_CONFIG_HOME", home).env("HOME", home);
    cmd
}

fn write_response(dir: &Path, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_resolve_to_stdout() {
    let dir = TempDir::new().unwrap();
    let input = write_response(dir.path(), "invoice1.json", RESPONSE);

    kvform(dir.path())
        .arg("resolve")
        .arg(&input)
        .assert()
        .success()
        .stdout("Key,Value\nInvoice Number,INV-0042\nAmount,1234.56\n");
}

#[test]
fn test_resolve_to_file_with_print() {
    let dir = TempDir::new().unwrap();
    let input = write_response(dir.path(), "invoice1.json", RESPONSE);
    let output = dir.path().join("output.csv");

    kvform(dir.path())
        .arg("resolve")
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .arg("--print")
        .assert()
        .success()
        .stdout(predicate::str::contains("Invoice Number:INV-0042"))
        .stdout(predicate::str::contains("Amount:1,234.56"))
        .stdout(predicate::str::contains("Output written to"));

    let csv = fs::read_to_string(&output).unwrap();
    assert_eq!(csv, "Key,Value\nInvoice Number,INV-0042\nAmount,1234.56\n");
}

#[test]
fn test_resolve_json_and_warnings() {
    let dir = TempDir::new().unwrap();
    let input = write_response(dir.path(), "invoice1.json", RESPONSE);

    kvform(dir.path())
        .args(["resolve", "--format", "json", "--show-warnings"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""key": "Amount""#))
        .stdout(predicate::str::contains(r#""value": "1,234.56""#))
        .stderr(predicate::str::contains("k3 points to unknown value missing"));
}

#[test]
fn test_resolve_nanonets() {
    let dir = TempDir::new().unwrap();
    let input = write_response(
        dir.path(),
        "predictions.json",
        r#"{"result": [{"prediction": [{"label": "total", "ocr_text": "1,000"}]}]}"#,
    );

    kvform(dir.path())
        .args(["resolve", "--input-format", "nanonets"])
        .arg(&input)
        .assert()
        .success()
        .stdout("Key,Value\ntotal,1000\n");
}

#[test]
fn test_resolve_nanonets_repeated_labels() {
    let dir = TempDir::new().unwrap();
    let input = write_response(
        dir.path(),
        "predictions.json",
        r#"{"result": [{"prediction": [
            {"label": "line_item", "ocr_text": "Widget"},
            {"label": "line_item", "ocr_text": "Gadget"},
            {"label": "total", "ocr_text": "20"}
        ]}]}"#,
    );

    kvform(dir.path())
        .args(["resolve", "--input-format", "nanonets"])
        .arg(&input)
        .assert()
        .success()
        .stdout("Key,Value\nline_item,Widget\nline_item,Gadget\ntotal,20\n");
}

#[test]
fn test_resolve_missing_input() {
    let dir = TempDir::new().unwrap();

    kvform(dir.path())
        .arg("resolve")
        .arg(dir.path().join("nope.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input file not found"));
}

#[test]
fn test_resolve_malformed_input() {
    let dir = TempDir::new().unwrap();
    let input = write_response(dir.path(), "bad.json", r#"{"JobStatus": "FAILED"}"#);

    kvform(dir.path())
        .arg("resolve")
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid input"));
}

#[test]
fn test_quote_policy_from_config() {
    let dir = TempDir::new().unwrap();
    let input = write_response(dir.path(), "invoice1.json", RESPONSE);
    let config = write_response(
        dir.path(),
        "config.json",
        r#"{"output": {"separator_policy": "quote"}}"#,
    );

    kvform(dir.path())
        .arg("-c")
        .arg(&config)
        .arg("resolve")
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("Amount,\"1,234.56\""));
}

#[test]
fn test_unparsable_config_is_reported() {
    let dir = TempDir::new().unwrap();
    let input = write_response(dir.path(), "invoice1.json", RESPONSE);
    let config = write_response(dir.path(), "config.json", "{not json");

    kvform(dir.path())
        .arg("-c")
        .arg(&config)
        .arg("resolve")
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("configuration error"));
}

#[test]
fn test_batch_with_summary() {
    let dir = TempDir::new().unwrap();
    write_response(dir.path(), "a.json", RESPONSE);
    write_response(dir.path(), "b.json", "not json");
    let out = dir.path().join("out");
    let pattern = format!("{}/*.json", dir.path().display());

    kvform(dir.path())
        .args(["batch", &pattern, "--continue-on-error", "--summary"])
        .arg("-o")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("1 successful, 1 failed"));

    let csv = fs::read_to_string(out.join("a.fields.csv")).unwrap();
    assert!(csv.contains("Invoice Number,INV-0042"));
    assert!(!out.join("b.fields.csv").exists());

    let summary = fs::read_to_string(out.join("summary.csv")).unwrap();
    assert!(summary.starts_with("file,output,fields,warnings,status,error\n"));
    assert!(summary.contains(",2,1,success,"));
    assert!(summary.contains("failed"));
}

#[test]
fn test_batch_stops_on_error() {
    let dir = TempDir::new().unwrap();
    write_response(dir.path(), "b.json", "not json");
    let pattern = format!("{}/*.json", dir.path().display());

    kvform(dir.path())
        .args(["batch", &pattern])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Processing failed"));
}

#[test]
fn test_config_init_set_get() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("kvform.json");

    kvform(dir.path())
        .arg("-c")
        .arg(&config)
        .args(["config", "init"])
        .assert()
        .success();

    kvform(dir.path())
        .arg("-c")
        .arg(&config)
        .args(["config", "set", "output.separator_policy", "quote"])
        .assert()
        .success();

    kvform(dir.path())
        .arg("-c")
        .arg(&config)
        .args(["config", "get", "output.separator_policy"])
        .assert()
        .success()
        .stdout("\"quote\"\n");

    kvform(dir.path())
        .arg("-c")
        .arg(&config)
        .args(["config", "set", "output.no_such_key", "1"])
        .assert()
        .failure();

    kvform(dir.path())
        .arg("-c")
        .arg(&config)
        .args(["config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}
