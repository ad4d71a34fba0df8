//! Top-level CLI behaviour: help, version, config and completions.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn reposervice(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("reposervice").unwrap();
    cmd.current_dir(dir)
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn help_lists_the_commands() {
    let temp = TempDir::new().unwrap();
    reposervice(temp.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("generate"))
        .stdout(predicate::str::contains("completions"))
        .stdout(predicate::str::contains("config"));
}

#[test]
fn version_flag() {
    let temp = TempDir::new().unwrap();
    reposervice(temp.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn unknown_argument_exits_with_usage_error() {
    let temp = TempDir::new().unwrap();
    reposervice(temp.path())
        .args(["generate", "Post", "--bogus"])
        .assert()
        .code(2);
}

#[test]
fn config_init_writes_defaults_once() {
    let temp = TempDir::new().unwrap();

    reposervice(temp.path())
        .args(["config", "init"])
        .assert()
        .success();
    let written = fs::read_to_string(temp.path().join("reposervice.toml")).unwrap();
    assert!(written.contains("[namespaces]"));

    reposervice(temp.path())
        .args(["config", "init"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("already exists"));

    reposervice(temp.path())
        .args(["config", "init", "--force"])
        .assert()
        .success();
}

#[test]
fn config_show_merges_file_and_environment() {
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join("reposervice.toml"),
        "[paths]\nmodels = \"app/models/\"\n",
    )
    .unwrap();

    reposervice(temp.path())
        .args(["config", "show"])
        .env("REPOSERVICE__PATHS__SERVICES", "app/services/")
        .assert()
        .success()
        .stdout(predicate::str::contains("models = \"app/models/\""))
        .stdout(predicate::str::contains("services = \"app/services/\""));
}

#[test]
fn config_path_reports_the_local_file() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("reposervice.toml"), "").unwrap();

    reposervice(temp.path())
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("reposervice.toml"));
}

#[test]
fn configured_paths_drive_generation() {
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join("reposervice.toml"),
        "[paths]\nmodels = \"app/models/\"\n\n[namespaces]\nmodels = \"crate::app::models\"\n",
    )
    .unwrap();

    reposervice(temp.path())
        .args(["generate", "Post", "--force"])
        .assert()
        .success();

    assert!(temp.path().join("app/models/post.rs").is_file());
    let repository =
        fs::read_to_string(temp.path().join("src/repositories/post_repository.rs")).unwrap();
    assert!(repository.contains("use crate::app::models::post::Post;"));
}

#[test]
fn broken_config_file_exits_with_configuration_error() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("reposervice.toml"), "paths = [").unwrap();

    reposervice(temp.path())
        .args(["config", "show"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("Configuration error"));
}

#[test]
fn completions_mention_the_binary() {
    let temp = TempDir::new().unwrap();
    reposervice(temp.path())
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("reposervice"));
}
