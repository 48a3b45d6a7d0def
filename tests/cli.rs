//
//  bitbucket-provision
//  tests/cli.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;

const BB_VARS: [&str; 7] = [
    "BB_CONFIG",
    "BB_WORKSPACE",
    "BB_ACCESS_TOKEN",
    "BB_CLIENT_ID",
    "BB_CLIENT_SECRET",
    "BB_NUM_RETRIES",
    "BB_RETRY_DELAY",
];

fn bbp(config: &Path) -> Command {
    let mut cmd = Command::cargo_bin("bbp").unwrap();
    for var in BB_VARS {
        cmd.env_remove(var);
    }
    cmd.arg("--config").arg(config);
    cmd
}

fn write_config(dir: &Path, body: &str) -> std::path::PathBuf {
    let path = dir.join("config.toml");
    std::fs::write(&path, body).unwrap();
    path
}

#[test]
fn test_help_lists_commands() {
    Command::cargo_bin("bbp")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("api"))
        .stdout(predicate::str::contains("get"))
        .stdout(predicate::str::contains("project"));
}

#[test]
fn test_version() {
    Command::cargo_bin("bbp")
        .unwrap()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_missing_auth_is_usage_error() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path(), "workspace = \"acme\"\n");

    bbp(&config)
        .args(["get", "repository", "r-1"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("access_token"));
}

#[test]
fn test_malformed_composite_id_is_usage_error() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(
        dir.path(),
        "workspace = \"acme\"\naccess_token = \"tok\"\napi_url = \"http://127.0.0.1:9/2.0\"\n",
    );

    bbp(&config)
        .args(["get", "webhook", "no-separator"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("invalid id"));
}

#[test]
fn test_project_requires_a_selector() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path(), "workspace = \"acme\"\n");

    bbp(&config).arg("project").assert().failure().code(2);
}

#[test]
fn test_get_prints_resource() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", "/2.0/repositories/acme/r-1")
        .match_header("authorization", "Bearer tok")
        .with_status(200)
        .with_body(r#"{"uuid": "{r-1}", "name": "Site", "is_private": true}"#)
        .expect(1)
        .create();

    let dir = tempfile::tempdir().unwrap();
    let config = write_config(
        dir.path(),
        &format!(
            "workspace = \"acme\"\naccess_token = \"tok\"\napi_url = \"{}/2.0\"\n",
            server.url()
        ),
    );

    bbp(&config)
        .args(["get", "repository", "r-1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"uuid\": \"{r-1}\""));

    mock.assert();
}

#[test]
fn test_get_missing_resource_exits_not_found() {
    let mut server = mockito::Server::new();
    server
        .mock("GET", "/2.0/repositories/acme/r-1/pipelines_config")
        .with_status(404)
        .create();

    let dir = tempfile::tempdir().unwrap();
    let config = write_config(
        dir.path(),
        &format!(
            "workspace = \"acme\"\naccess_token = \"tok\"\napi_url = \"{}/2.0\"\n",
            server.url()
        ),
    );

    bbp(&config)
        .args(["get", "pipelines-config", "r-1"])
        .assert()
        .code(8)
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn test_api_failure_reports_status() {
    let mut server = mockito::Server::new();
    server
        .mock("GET", "/2.0/user")
        .with_status(401)
        .with_body("Unauthorized")
        .create();

    let dir = tempfile::tempdir().unwrap();
    let config = write_config(
        dir.path(),
        &format!(
            "workspace = \"acme\"\naccess_token = \"tok\"\napi_url = \"{}/2.0\"\n",
            server.url()
        ),
    );

    bbp(&config)
        .args(["api", "/user"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains(
            "request failed with status 401 Unauthorized: Unauthorized\n",
        ));
}
