//! Smoke tests for the CLI surface.

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn help_lists_top_level_commands() {
    Command::cargo_bin("attend")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("login"))
        .stdout(predicate::str::contains("employees"))
        .stdout(predicate::str::contains("attendance"))
        .stdout(predicate::str::contains("payslips"));
}

#[test]
fn unknown_command_fails() {
    Command::cargo_bin("attend")
        .unwrap()
        .arg("frobnicate")
        .assert()
        .failure();
}

#[test]
fn whoami_without_session_reports_logged_out() {
    let temp = tempfile::tempdir().unwrap();

    Command::cargo_bin("attend")
        .unwrap()
        .env("ATTEND_HOME", temp.path())
        .arg("whoami")
        .assert()
        .success()
        .stdout(predicate::str::contains("Not logged in"));
}
