//! Command-line tests for the `lexqa` binary
//!
//! None of these reach a model backend: they cover help output, model
//! listing, and input rejected before any request is made.

use assert_cmd::Command;
use predicates::prelude::*;
mod common;

fn lexqa() -> Command {
    let mut cmd = Command::cargo_bin("lexqa").unwrap();
    cmd.env_remove("LEXQA_MODEL")
        .env_remove("LEXQA_PROVIDER")
        .env_remove("LEXQA_TEMPERATURE")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_help_lists_commands() {
    lexqa()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("chat"))
        .stdout(predicate::str::contains("ask"))
        .stdout(predicate::str::contains("models"));
}

#[test]
fn test_models_json_lists_defaults() {
    let (temp_dir, _) = common::temp_config_file("");
    let missing = temp_dir.path().join("missing.yaml");

    lexqa()
        .arg("--config")
        .arg(missing)
        .arg("models")
        .arg("--json")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"gpt-3.5-turbo\""))
        .stdout(predicate::str::contains("\"gpt-4\""));
}

#[test]
fn test_models_reads_config_file() {
    let (_temp_dir, config_path) = common::temp_config_file(
        "model:\n  default: local-model\n  supported:\n    - local-model\n",
    );

    lexqa()
        .arg("--config")
        .arg(config_path)
        .arg("models")
        .arg("--json")
        .assert()
        .success()
        .stdout(predicate::str::contains("local-model"))
        .stdout(predicate::str::contains("gpt-4").not());
}

#[test]
fn test_invalid_default_model_is_rejected() {
    let (_temp_dir, config_path) = common::temp_config_file(
        "model:\n  default: gpt-9\n  supported:\n    - gpt-4\n",
    );

    lexqa()
        .arg("--config")
        .arg(config_path)
        .arg("models")
        .assert()
        .failure()
        .stderr(predicate::str::contains("not one of the supported models"));
}

#[test]
fn test_ask_rejects_blank_question() {
    let (temp_dir, _) = common::temp_config_file("");
    let missing = temp_dir.path().join("missing.yaml");

    lexqa()
        .env("OPENAI_API_KEY", "sk-test")
        .env("LEXQA_API_BASE", "http://127.0.0.1:9")
        .arg("--config")
        .arg(missing)
        .arg("ask")
        .arg("   ")
        .arg("--no-export")
        .assert()
        .failure()
        .stderr(predicate::str::contains("empty input"));
}
