//! Smoke tests for the browsing-digest binary
//!
//! These cover argument handling and every failure that is detected before
//! a model runs, so they need no Ollama install.

use assert_cmd::assert::OutputAssertExt;
use digest_utils::test_support::{empty_export, page, sample_export, write_export};
use predicates::prelude::*;
use serde_json::json;
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

const MISSING_TOOL: &str = "/nonexistent/bin/ollama";

/// The binary, run in `dir` with no ambient configuration.
fn digest_cmd(dir: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("browsing-digest"));
    cmd.current_dir(dir)
        .env_remove("BROWSING_DIGEST_CONFIG")
        .env_remove("BROWSING_DIGEST_MODEL")
        .env_remove("BROWSING_DIGEST_OLLAMA_BINARY")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn help_lists_flags() {
    let temp = TempDir::new().unwrap();
    digest_cmd(temp.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("INPUT_FILE"))
        .stdout(predicate::str::contains("--model"))
        .stdout(predicate::str::contains("--output"))
        .stdout(predicate::str::contains("--list-models"));
}

#[test]
fn missing_input_argument_is_usage_error() {
    let temp = TempDir::new().unwrap();
    digest_cmd(temp.path())
        .assert()
        .code(2)
        .stderr(predicate::str::contains("INPUT_FILE"));
}

#[test]
fn missing_input_file() {
    let temp = TempDir::new().unwrap();
    digest_cmd(temp.path())
        .arg("nope.json")
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Error: Error loading file: file not found"))
        .stderr(predicate::str::contains("Suggestions:"));
}

#[test]
fn wrong_extension() {
    let temp = TempDir::new().unwrap();
    std::fs::write(temp.path().join("history.csv"), "date,title\n").unwrap();

    digest_cmd(temp.path())
        .arg("history.csv")
        .assert()
        .code(3)
        .stderr(predicate::str::contains("expected a .json file, got .csv"));
}

#[test]
fn invalid_json() {
    let temp = TempDir::new().unwrap();
    std::fs::write(temp.path().join("history.json"), "{ \"pages\": [").unwrap();

    digest_cmd(temp.path())
        .arg("history.json")
        .assert()
        .code(3)
        .stderr(predicate::str::contains("not a valid browsing export"));
}

#[test]
fn empty_page_list() {
    let temp = TempDir::new().unwrap();
    write_export(temp.path(), "history.json", &empty_export());

    digest_cmd(temp.path())
        .args(["history.json", "--ollama-binary", MISSING_TOOL])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("No browsing data found"));
}

#[test]
fn budget_too_small_for_first_page() {
    let temp = TempDir::new().unwrap();
    write_export(temp.path(), "history.json", &sample_export());

    digest_cmd(temp.path())
        .args(["history.json", "--max-tokens", "1", "--ollama-binary", MISSING_TOOL])
        .assert()
        .code(4);
}

#[test]
fn zero_max_tokens_is_config_error() {
    let temp = TempDir::new().unwrap();
    write_export(temp.path(), "history.json", &sample_export());

    digest_cmd(temp.path())
        .args(["history.json", "--max-tokens", "0"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("max_tokens"));
}

#[test]
fn missing_explicit_config_file() {
    let temp = TempDir::new().unwrap();
    write_export(temp.path(), "history.json", &sample_export());

    digest_cmd(temp.path())
        .args(["history.json", "--config", "missing.toml"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Configuration file not found"));
}

#[test]
fn missing_inference_tool() {
    let temp = TempDir::new().unwrap();
    write_export(temp.path(), "history.json", &sample_export());

    digest_cmd(temp.path())
        .args(["history.json", "--ollama-binary", MISSING_TOOL])
        .assert()
        .code(70)
        .stdout(predicate::str::contains("✓ Loaded 3 pages from 2025-01-15"))
        .stderr(predicate::str::contains("Ollama not found"));

    assert!(!temp.path().join("digest-2025-01-15.md").exists());
}

#[test]
fn list_models_missing_inference_tool() {
    let temp = TempDir::new().unwrap();
    digest_cmd(temp.path())
        .args(["--list-models", "--ollama-binary", MISSING_TOOL])
        .assert()
        .code(70)
        .stderr(predicate::str::contains("Install Ollama"));
}

#[test]
fn discovered_config_file_is_used() {
    let temp = TempDir::new().unwrap();
    std::fs::create_dir(temp.path().join(".git")).unwrap();
    std::fs::create_dir(temp.path().join(".browsing-digest")).unwrap();
    std::fs::write(
        temp.path().join(".browsing-digest/config.toml"),
        format!("[ollama]\nbinary = \"{MISSING_TOOL}\"\n"),
    )
    .unwrap();
    let nested = temp.path().join("exports");
    std::fs::create_dir(&nested).unwrap();
    write_export(
        &nested,
        "history.json",
        &json!({
            "date": "2025-01-15",
            "pages": [page("A", "x.com", "2025-01-15T09:00:00Z", "hello", 1)],
        }),
    );

    digest_cmd(&nested)
        .arg("history.json")
        .assert()
        .code(70)
        .stderr(predicate::str::contains(MISSING_TOOL));
}
