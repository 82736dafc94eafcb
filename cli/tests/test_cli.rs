//! Drives the `indicium` binary against a temporary store.

use serde_json::{json, Value};
use std::process::Command;
use tempfile::TempDir;

fn indicium(dir: &TempDir, args: &[&str]) -> (bool, Value) {
    let output = Command::new(env!("CARGO_BIN_EXE_indicium"))
        .arg("--path")
        .arg(dir.path())
        .args(args)
        .env_remove("INDICIUM_PATH")
        .env_remove("INDICIUM_DATABASE")
        .env_remove("INDICIUM_DIRECTORY")
        .output()
        .expect("failed to run indicium");

    let stdout = String::from_utf8_lossy(&output.stdout);
    let value = serde_json::from_str(&stdout).unwrap_or(Value::Null);
    (output.status.success(), value)
}

#[test]
fn test_cli_update_persists_between_invocations() {
    let dir = TempDir::new().unwrap();

    let (ok, _) = indicium(&dir, &["create-database", "d"]);
    assert!(ok);
    let (ok, _) = indicium(&dir, &["update", "d", "t", "u1", r#"{"name":"Ann","age":30}"#]);
    assert!(ok);
    let (ok, _) = indicium(&dir, &["update", "d", "t", "u1", r#"{"age":31}"#]);
    assert!(ok);

    let (ok, record) = indicium(&dir, &["get", "d", "t", "u1"]);
    assert!(ok);
    assert_eq!(record, json!({ "name": "Ann", "age": 31 }));

    assert!(dir.path().join("d").join("t").join("u1.json").is_file());
}

#[test]
fn test_cli_missing_record_fails() {
    let dir = TempDir::new().unwrap();

    indicium(&dir, &["create-table", "default", "t"]);
    let (ok, out) = indicium(&dir, &["get", "default", "t", "ghost"]);
    assert!(!ok);
    assert_eq!(out, Value::Null);

    let (ok, out) = indicium(&dir, &["has", "default", "t", "ghost"]);
    assert!(ok);
    assert_eq!(out, json!(false));
}

#[test]
fn test_cli_set_nested_field() {
    let dir = TempDir::new().unwrap();

    let (ok, _) = indicium(&dir, &["update", "default", "users", "u1", r#"{"name":"Ann"}"#]);
    assert!(ok);
    let (ok, record) = indicium(&dir, &["set", "default", "users", "u1", "stats.age", "31"]);
    assert!(ok);
    assert_eq!(record, json!({ "name": "Ann", "stats": { "age": 31 } }));
}
