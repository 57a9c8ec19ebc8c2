//! Integration tests for the `ucode` CLI binary.
//!
//! Argument parsing, local helpers and settings handling run without a
//! network; object and notification commands run against wiremock.
#![allow(clippy::unwrap_used)]

use std::path::Path;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::{Value, json};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a [`Command`] for the `ucode` binary with env isolation.
///
/// Clears the `UCODE_*` variables the settings loader reads and points
/// config directories at a nonexistent path.
fn ucode_cmd() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("ucode");
    cmd.env("HOME", "/tmp/ucode-cli-test-nonexistent")
        .env("XDG_CONFIG_HOME", "/tmp/ucode-cli-test-nonexistent")
        .env_remove("RUST_LOG")
        .env_remove("UCODE_CONFIG")
        .env_remove("UCODE_APP_ID")
        .env_remove("UCODE_BASE_URL")
        .env_remove("UCODE_BOT_TOKEN")
        .env_remove("UCODE_ACCOUNT_IDS")
        .env_remove("UCODE_FUNCTION_NAME")
        .env_remove("UCODE_PUSH_CREDENTIALS_FILE")
        .env_remove("UCODE_TELEGRAM_API_URL")
        .env_remove("UCODE_PUSH_API_URL")
        .env_remove("UCODE_TIMEOUT_SECS");
    cmd
}

/// Concatenate stdout + stderr from a command output for flexible matching.
fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

/// Run a prepared command off the async runtime so wiremock keeps serving.
async fn run(mut cmd: assert_cmd::Command) -> std::process::Output {
    tokio::task::spawn_blocking(move || cmd.output().unwrap())
        .await
        .unwrap()
}

fn write_settings(dir: &Path, body: &str) -> String {
    let file = dir.join("config.toml");
    std::fs::write(&file, body).unwrap();
    file.display().to_string()
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let output = ucode_cmd().output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = combined_output(&output);
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn test_help_flag() {
    ucode_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("objects")
            .and(predicate::str::contains("notify"))
            .and(predicate::str::contains("util"))
            .and(predicate::str::contains("config")),
    );
}

#[test]
fn test_version_flag() {
    ucode_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("ucode"));
}

#[test]
fn test_objects_subcommands_exist() {
    ucode_cmd()
        .args(["objects", "--help"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("create")
                .and(predicate::str::contains("multiple-update"))
                .and(predicate::str::contains("list-slim"))
                .and(predicate::str::contains("list-aggregate"))
                .and(predicate::str::contains("aggregation"))
                .and(predicate::str::contains("upsert"))
                .and(predicate::str::contains("unlink"))
                .and(predicate::str::contains("multiple-delete")),
        );
}

#[test]
fn test_invalid_output_format() {
    let output = ucode_cmd()
        .args(["--output", "table", "util", "hash", "x"])
        .output()
        .unwrap();
    assert!(!output.status.success());
    let text = combined_output(&output);
    assert!(
        text.contains("invalid") || text.contains("possible values"),
        "Expected error about valid output formats:\n{text}"
    );
}

// ── Util ────────────────────────────────────────────────────────────

#[test]
fn test_util_hash() {
    ucode_cmd()
        .args(["util", "hash", "abc"])
        .assert()
        .success()
        .stdout("ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad\n");
}

#[test]
fn test_util_verify_mismatch_is_usage_error() {
    ucode_cmd()
        .args(["util", "verify", "abc", "deadbeef"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("does not match"));
}

#[test]
fn test_util_spacef() {
    ucode_cmd()
        .args(["util", "spacef", "1234567.89"])
        .assert()
        .success()
        .stdout("1 234 567.89\n");
    ucode_cmd()
        .args(["util", "spacef", "1234567.89", "--digits", "1"])
        .assert()
        .success()
        .stdout("1 234 567.8\n");
}

#[test]
fn test_util_random_digits() {
    let output = ucode_cmd()
        .args(["util", "random", "-n", "10", "-c", "number"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let text = String::from_utf8(output.stdout).unwrap();
    let value = text.trim_end();
    assert_eq!(value.len(), 10);
    assert!(value.chars().all(|c| c.is_ascii_digit()), "{value}");
}

#[test]
fn test_util_project_renders_json() {
    let output = ucode_cmd()
        .args(["-o", "json-compact", "util", "project", "author.name", "title"])
        .output()
        .unwrap();
    let value: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value, json!({ "author_name": { "$first": "$author.name" } }));
}

// ── Config ──────────────────────────────────────────────────────────

#[test]
fn test_config_path_honors_flag() {
    ucode_cmd()
        .args(["--config", "/tmp/elsewhere/ucode.toml", "config", "path"])
        .assert()
        .success()
        .stdout("/tmp/elsewhere/ucode.toml\n");
}

#[test]
fn test_config_init_then_show_redacts_token() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("nested").join("config.toml");
    let file = file.to_str().unwrap();

    ucode_cmd()
        .args(["--config", file, "config", "init"])
        .assert()
        .success();

    ucode_cmd()
        .args(["--config", file, "config", "init"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("already exists"));

    ucode_cmd()
        .args(["--config", file, "config", "show"])
        .env("UCODE_BOT_TOKEN", "123:top-secret")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("telegram_api_url")
                .and(predicate::str::contains("[REDACTED]"))
                .and(predicate::str::contains("top-secret").not()),
        );
}

#[test]
fn test_config_show_accepts_numeric_app_id() {
    let dir = tempfile::tempdir().unwrap();
    let file = write_settings(dir.path(), "");

    ucode_cmd()
        .args(["--config", &file, "config", "show"])
        .env("UCODE_APP_ID", "12345")
        .assert()
        .success()
        .stdout(predicate::str::contains("app_id = \"12345\""));
}

// ── Objects ─────────────────────────────────────────────────────────

#[tokio::test(flavor = "multi_thread")]
async fn test_objects_get_prints_outcome() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/object/orders/g-1"))
        .and(header("X-API-KEY", "app-cli"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "data": { "response": { "guid": "g-1", "total": 3 } } }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut cmd = ucode_cmd();
    cmd.args([
        "--base-url",
        &server.uri(),
        "--app-id",
        "app-cli",
        "-o",
        "json-compact",
        "objects",
        "get",
        "orders",
        "--data",
        r#"{"guid":"g-1"}"#,
    ]);
    let output = run(cmd).await;
    assert!(output.status.success(), "{}", combined_output(&output));

    let value: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["data"]["data"]["data"]["response"]["total"], 3);
    assert_eq!(value["response"]["status"], "");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_objects_delete_failure_exit_code() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(404).set_body_string("not found"))
        .mount(&server)
        .await;

    let mut cmd = ucode_cmd();
    cmd.args([
        "--base-url",
        &server.uri(),
        "objects",
        "delete",
        "orders",
        "-d",
        r#"{"guid":"nope"}"#,
    ]);
    let output = run(cmd).await;
    assert_eq!(output.status.code(), Some(3));
    let text = combined_output(&output);
    assert!(text.contains("Error while deleting object"), "{text}");
    assert!(text.contains("not found"), "{text}");
}

#[test]
fn test_objects_rejects_non_object_data() {
    ucode_cmd()
        .args([
            "--base-url",
            "http://127.0.0.1:1",
            "objects",
            "create",
            "orders",
            "-d",
            "[1,2]",
        ])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("expected a JSON object"));
}

// ── Notify ──────────────────────────────────────────────────────────

#[test]
fn test_notify_without_token_is_usage_error() {
    ucode_cmd()
        .args(["notify", "message", "hello"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("No bot token"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_notify_message_uses_settings_file() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/bot123:abc/sendMessage"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ok": true, "result": { "message_id": 1, "chat": { "id": 7 }, "date": 0 }
        })))
        .expect(2)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let file = write_settings(
        dir.path(),
        &format!(
            "telegram_api_url = \"{}\"\naccount_ids = [\"7\", \"8\"]\nfunction_name = \"cli-test\"\n",
            server.uri()
        ),
    );

    let mut cmd = ucode_cmd();
    cmd.env("UCODE_BOT_TOKEN", "123:abc").args([
        "--config",
        &file,
        "-o",
        "json-compact",
        "notify",
        "message",
        "deploy done",
    ]);
    let output = run(cmd).await;
    assert!(output.status.success(), "{}", combined_output(&output));
    assert_eq!(String::from_utf8_lossy(&output.stdout), "{\"recipients\":2}\n");
}
