//! Black-box CLI tests for the `mongomerge` binary.

use assert_cmd::Command;
use predicates::prelude::*;

#[allow(deprecated)]
fn mongomerge_cmd() -> Command {
    Command::cargo_bin("mongomerge").unwrap()
}

#[test]
fn test_help_command() {
    mongomerge_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Denormalize"))
        .stdout(predicate::str::contains("<PARENT>"))
        .stdout(predicate::str::contains("<SPECS>"));
}

#[test]
fn test_version_command() {
    mongomerge_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("mongomerge"));
}

#[test]
fn test_missing_required_args_fails() {
    mongomerge_cmd()
        .assert()
        .failure()
        .stderr(predicate::str::contains("error"));
}

#[test]
fn test_missing_spec_fails() {
    mongomerge_cmd()
        .arg("people")
        .assert()
        .failure()
        .stderr(predicate::str::contains("SPECS"));
}
