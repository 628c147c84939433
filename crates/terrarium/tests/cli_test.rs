//! Integration tests for the `terrarium` CLI binary.
//!
//! Parsing, help, completions and exit codes run without a registry.
//! Catalog commands run against a wiremock server.
#![allow(clippy::unwrap_used)]

use std::path::Path;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ── Helpers ─────────────────────────────────────────────────────────

const NO_HOME: &str = "/tmp/terrarium-cli-test-nonexistent";

/// Build a [`Command`] for the `terrarium` binary with env isolation.
///
/// Clears all `TERRARIUM_*` env vars and points config directories at
/// `home` so tests never touch the user's real configuration.
fn terrarium_in(home: &Path) -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("terrarium");
    cmd.env("HOME", home)
        .env("XDG_CONFIG_HOME", home)
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .env_remove("TERRARIUM_PROFILE")
        .env_remove("TERRARIUM_URL")
        .env_remove("TERRARIUM_OUTPUT")
        .env_remove("TERRARIUM_INSECURE")
        .env_remove("TERRARIUM_TIMEOUT");
    cmd
}

fn terrarium_cmd() -> assert_cmd::Command {
    terrarium_in(Path::new(NO_HOME))
}

/// Concatenate stdout + stderr from a command output for flexible matching.
fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

/// Run the binary off the async runtime so the mock server keeps serving.
async fn run(mut cmd: assert_cmd::Command) -> std::process::Output {
    tokio::task::spawn_blocking(move || cmd.output().unwrap())
        .await
        .unwrap()
}

async fn mount_json(server: &MockServer, route: &str, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn no_args_shows_help() {
    let output = terrarium_cmd().output().unwrap();
    assert_eq!(output.status.code(), Some(2));
    let text = combined_output(&output);
    assert!(text.contains("Usage"), "expected 'Usage' in output:\n{text}");
}

#[test]
fn help_lists_the_resources() {
    terrarium_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("modules")
            .and(predicate::str::contains("providers"))
            .and(predicate::str::contains("releases")),
    );
}

#[test]
fn version_flag() {
    terrarium_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("terrarium"));
}

#[test]
fn invalid_subcommand_is_a_usage_error() {
    terrarium_cmd()
        .arg("bogus")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("unrecognized subcommand"));
}

#[test]
fn completions_bash() {
    terrarium_cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("terrarium"));
}

#[test]
fn releases_list_help_names_the_window_flag() {
    terrarium_cmd()
        .args(["releases", "list", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--age").and(predicate::str::contains("--type")));
}

// ── Configuration errors ────────────────────────────────────────────

#[test]
fn modules_list_without_registry_is_a_usage_error() {
    let output = terrarium_cmd().args(["modules", "list"]).output().unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(combined_output(&output).contains("No registry configured"));
}

#[test]
fn unknown_profile_exits_4() {
    let output = terrarium_cmd()
        .args(["--profile", "nope", "modules", "list"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(4));
    assert!(combined_output(&output).contains("Profile 'nope' not found"));
}

#[test]
fn unknown_age_is_rejected_before_any_request() {
    let output = terrarium_cmd()
        .args(["--url", "http://127.0.0.1:9", "releases", "list", "--age", "3d"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(combined_output(&output).contains("unknown window '3d'"));
}

#[test]
fn malformed_module_address_is_rejected() {
    let output = terrarium_cmd()
        .args(["--url", "http://127.0.0.1:9", "modules", "info", "cie/vpc"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(combined_output(&output).contains("org/name/provider"));
}

#[test]
fn config_init_then_profiles() {
    let home = tempfile::tempdir().unwrap();

    terrarium_in(home.path())
        .args(["--url", "https://registry.example.com", "config", "init", "--name", "work"])
        .assert()
        .success();

    terrarium_in(home.path())
        .args(["config", "profiles"])
        .assert()
        .success()
        .stdout(predicate::str::contains("work *"));

    terrarium_in(home.path())
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("url = \"https://registry.example.com\""));
}

#[test]
fn config_use_unknown_profile_exits_4() {
    let home = tempfile::tempdir().unwrap();
    terrarium_in(home.path())
        .args(["config", "use", "ghost"])
        .assert()
        .code(4);
}

// ── Against a registry ──────────────────────────────────────────────

#[tokio::test(flavor = "multi_thread")]
async fn modules_list_json_applies_search() {
    let server = MockServer::start().await;
    mount_json(
        &server,
        "/api/modules",
        json!({ "modules": [
            { "organization": "cie", "name": "vpc", "provider": "aws", "source_url": "" },
            { "organization": "cie", "name": "eks", "provider": "aws", "source_url": "" }
        ]}),
    )
    .await;

    let uri = server.uri();
    let mut cmd = terrarium_cmd();
    cmd.args(["--url", uri.as_str(), "-o", "json-compact", "modules", "list", "-s", "VPC"]);
    let output = run(cmd).await;

    assert!(output.status.success(), "{}", combined_output(&output));
    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let list = parsed.as_array().unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["name"], "vpc");
}

#[tokio::test(flavor = "multi_thread")]
async fn releases_list_is_newest_first_in_plain_output() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/releases"))
        .and(query_param("age", "168h"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "releases": [
            { "type": "module", "organization": "cie", "name": "vpc", "version": "1.0.0",
              "createdAt": "2024-05-01T10:00:00Z", "links": null },
            { "type": "provider", "organization": "acme", "name": "aws", "version": "2.0.0",
              "createdAt": "2024-05-02T10:00:00Z", "links": [] }
        ]})))
        .mount(&server)
        .await;

    let uri = server.uri();
    let mut cmd = terrarium_cmd();
    cmd.args(["--url", uri.as_str(), "-o", "plain", "releases", "list", "--age", "week"]);
    let output = run(cmd).await;

    assert!(output.status.success(), "{}", combined_output(&output));
    assert_eq!(
        String::from_utf8_lossy(&output.stdout).trim(),
        "acme/aws@2.0.0\ncie/vpc@1.0.0"
    );

    let mut cmd = terrarium_cmd();
    cmd.args([
        "--url", uri.as_str(), "-o", "plain", "releases", "list", "--age", "168h", "--type",
        "module",
    ]);
    let output = run(cmd).await;
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "cie/vpc@1.0.0");
}

#[tokio::test(flavor = "multi_thread")]
async fn module_info_404_exits_4() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/modules/cie/vpc/aws"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let uri = server.uri();
    let mut cmd = terrarium_cmd();
    cmd.args(["--url", uri.as_str(), "modules", "info", "cie/vpc/aws"]);
    let output = run(cmd).await;

    assert_eq!(output.status.code(), Some(4));
    assert!(combined_output(&output).contains("module 'cie/vpc/aws' not found"));
}

#[tokio::test(flavor = "multi_thread")]
async fn failed_list_exits_non_zero_with_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/providers"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let uri = server.uri();
    let mut cmd = terrarium_cmd();
    cmd.args(["--url", uri.as_str(), "providers", "list"]);
    let output = run(cmd).await;

    assert_eq!(output.status.code(), Some(1));
    assert!(combined_output(&output).contains("HTTP 500"));
}

#[tokio::test(flavor = "multi_thread")]
async fn release_orgs_treat_null_as_empty() {
    let server = MockServer::start().await;
    mount_json(&server, "/api/release/organizations", json!({ "releaseOrgs": null })).await;
    mount_json(&server, "/api/release/types", json!(["module"])).await;

    let uri = server.uri();
    let mut cmd = terrarium_cmd();
    cmd.args(["--url", uri.as_str(), "-o", "json-compact", "releases", "orgs"]);
    let output = run(cmd).await;

    assert!(output.status.success(), "{}", combined_output(&output));
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "[]");
}

#[tokio::test(flavor = "multi_thread")]
async fn config_default_output_applies_without_a_flag() {
    let server = MockServer::start().await;
    mount_json(
        &server,
        "/api/modules",
        json!({ "modules": [
            { "organization": "cie", "name": "vpc", "provider": "aws", "source_url": "" }
        ]}),
    )
    .await;

    let home = tempfile::tempdir().unwrap();
    let dir = home.path().join("terrarium");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(
        dir.join("config.toml"),
        format!(
            "default_profile = \"default\"\n\n[defaults]\noutput = \"json\"\n\n\
             [profiles.default]\nurl = \"{}\"\n",
            server.uri()
        ),
    )
    .unwrap();

    let mut cmd = terrarium_in(home.path());
    cmd.args(["modules", "list"]);
    let output = run(cmd).await;

    assert!(output.status.success(), "{}", combined_output(&output));
    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(parsed[0]["name"], "vpc");

    let mut cmd = terrarium_in(home.path());
    cmd.args(["-o", "plain", "modules", "list"]);
    let output = run(cmd).await;
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "cie/vpc/aws");
}

#[tokio::test(flavor = "multi_thread")]
async fn release_orgs_only_fetch_organizations() {
    let server = MockServer::start().await;
    mount_json(
        &server,
        "/api/release/organizations",
        json!({ "releaseOrgs": ["cie", "acme"] }),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/api/release/types"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    let uri = server.uri();
    let mut cmd = terrarium_cmd();
    cmd.args(["--url", uri.as_str(), "-o", "plain", "releases", "orgs"]);
    let output = run(cmd).await;

    assert!(output.status.success(), "{}", combined_output(&output));
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "cie\nacme");
    server.verify().await;
}
