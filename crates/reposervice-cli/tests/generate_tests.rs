//! End-to-end tests for `reposervice generate`.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const ARTIFACTS: [&str; 4] = [
    "src/repositories/contracts/post_repository_interface.rs",
    "src/repositories/post_repository.rs",
    "src/services/contracts/post_service_interface.rs",
    "src/services/post_service.rs",
];

fn reposervice(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("reposervice").unwrap();
    cmd.current_dir(dir)
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG");
    cmd
}

fn project_with_post() -> TempDir {
    let temp = TempDir::new().unwrap();
    fs::create_dir_all(temp.path().join("src/models")).unwrap();
    fs::write(temp.path().join("src/models/post.rs"), "pub struct Post;").unwrap();
    temp
}

#[test]
fn generates_four_files_for_an_existing_model() {
    let temp = project_with_post();

    reposervice(temp.path())
        .args(["generate", "Post"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "The contract [PostRepositoryInterface] has been created.",
        ))
        .stdout(predicate::str::contains(
            "The service [PostService] has been created.",
        ))
        .stdout(predicate::str::contains("Generated 4 files for Post"));

    for path in ARTIFACTS {
        assert!(temp.path().join(path).is_file(), "{path} missing");
    }
}

#[test]
fn second_run_without_interaction_keeps_every_file() {
    let temp = project_with_post();
    reposervice(temp.path())
        .args(["generate", "Post"])
        .assert()
        .success();

    let edited = temp.path().join("src/services/post_service.rs");
    fs::write(&edited, "// hand edited").unwrap();

    let assert = reposervice(temp.path())
        .args(["generate", "Post", "--no-interaction"])
        .assert()
        .success();
    let stdout = String::from_utf8_lossy(&assert.get_output().stdout).to_string();
    assert_eq!(stdout.matches("will not be overwritten.").count(), 4);

    assert_eq!(fs::read_to_string(&edited).unwrap(), "// hand edited");
}

#[test]
fn force_creates_missing_model_and_overwrites() {
    let temp = TempDir::new().unwrap();

    reposervice(temp.path())
        .args(["g", "Blog/Post", "--force"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Model [Blog/Post] has been successfully created.",
        ));
    assert!(temp.path().join("src/models/blog/post.rs").is_file());

    let edited = temp.path().join("src/services/post_service.rs");
    fs::write(&edited, "// hand edited").unwrap();

    reposervice(temp.path())
        .args(["g", "Blog/Post", "--force"])
        .assert()
        .success();
    assert!(
        fs::read_to_string(&edited)
            .unwrap()
            .contains("pub struct PostService")
    );
}

#[test]
fn declined_model_creation_exits_cleanly_and_writes_nothing() {
    let temp = TempDir::new().unwrap();

    reposervice(temp.path())
        .args(["generate", "Post", "--no-interaction"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Model [Post] is not being created."))
        .stderr(predicate::str::contains(
            "Model [Post] doesn't exist. Please create it!",
        ));

    assert_eq!(fs::read_dir(temp.path()).unwrap().count(), 0);
}

#[test]
fn dry_run_lists_the_plan_without_writing() {
    let temp = project_with_post();

    reposervice(temp.path())
        .args(["generate", "Post", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("post_repository.rs"))
        .stdout(predicate::str::contains("Nothing was written."));

    for path in ARTIFACTS {
        assert!(!temp.path().join(path).exists(), "{path} was written");
    }
}

#[test]
fn json_output_is_the_report() {
    let temp = project_with_post();

    let assert = reposervice(temp.path())
        .args(["--output-format", "json", "generate", "Post"])
        .assert()
        .success();

    let report: serde_json::Value = serde_json::from_slice(&assert.get_output().stdout).unwrap();
    assert_eq!(report["model"], "Post");
    assert_eq!(report["aborted"], false);
    assert_eq!(report["artifacts"].as_array().map(Vec::len), Some(4));
    assert_eq!(report["artifacts"][1]["status"], "created");
}

#[test]
fn path_option_targets_another_directory() {
    let temp = TempDir::new().unwrap();
    let project = project_with_post();

    reposervice(temp.path())
        .args(["generate", "Post", "--path"])
        .arg(project.path())
        .assert()
        .success();

    assert!(project.path().join(ARTIFACTS[1]).is_file());
    assert_eq!(fs::read_dir(temp.path()).unwrap().count(), 0);
}

#[test]
fn stub_directory_overrides_builtin_stubs() {
    let project = project_with_post();
    let stubs = project.path().join("stubs");
    fs::create_dir(&stubs).unwrap();
    fs::write(stubs.join("Repository.stub"), "// custom %repositoryName%\n").unwrap();

    reposervice(project.path())
        .args(["generate", "Post", "--stubs", "stubs"])
        .assert()
        .success();

    assert_eq!(
        fs::read_to_string(project.path().join(ARTIFACTS[1])).unwrap(),
        "// custom PostRepository\n"
    );
}

#[test]
fn invalid_model_name_is_a_user_error() {
    let temp = TempDir::new().unwrap();

    reposervice(temp.path())
        .args(["generate", "post", "--no-interaction"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Invalid model reference"))
        .stderr(predicate::str::contains("Suggestions:"));
}

#[test]
fn missing_base_directory_is_a_user_error() {
    let temp = TempDir::new().unwrap();

    reposervice(temp.path())
        .args(["generate", "Post", "--path", "nowhere"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("is not a directory"));
}
