//! Integration tests for login/logout against a mock backend.

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn login_body() -> serde_json::Value {
    serde_json::json!({
        "token": "tok-abc-123",
        "user": {
            "employee_id": 7,
            "email": "dana@company.com",
            "name": "Dana",
            "role": "Employee",
        },
    })
}

#[tokio::test]
async fn login_persists_the_session_pair() {
    let server = MockServer::start().await;
    let temp = tempdir().unwrap();

    Mock::given(method("POST"))
        .and(path("/login"))
        .and(body_json(serde_json::json!({
            "email": "dana@company.com",
            "password": "secret",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(login_body()))
        .expect(1)
        .mount(&server)
        .await;

    Command::cargo_bin("attend")
        .unwrap()
        .env("ATTEND_HOME", temp.path())
        .env("ATTEND_BASE_URL", server.uri())
        .args(["login", "Dana@Company.com"])
        .write_stdin("secret\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Logged in as dana@company.com"));

    let credential = fs::read_to_string(temp.path().join("credential")).unwrap();
    assert_eq!(credential, "tok-abc-123");
    let identity = fs::read_to_string(temp.path().join("identity.json")).unwrap();
    assert!(identity.contains("dana@company.com"));
}

#[cfg(unix)]
#[tokio::test]
async fn credential_file_has_restricted_permissions() {
    use std::os::unix::fs::PermissionsExt;

    let server = MockServer::start().await;
    let temp = tempdir().unwrap();

    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(login_body()))
        .mount(&server)
        .await;

    Command::cargo_bin("attend")
        .unwrap()
        .env("ATTEND_HOME", temp.path())
        .env("ATTEND_BASE_URL", server.uri())
        .args(["login", "dana@company.com"])
        .write_stdin("secret\n")
        .assert()
        .success();

    let mode = fs::metadata(temp.path().join("credential"))
        .unwrap()
        .permissions()
        .mode();
    assert_eq!(mode & 0o777, 0o600);
}

#[tokio::test]
async fn rejected_login_exits_nonzero_with_message() {
    let server = MockServer::start().await;
    let temp = tempdir().unwrap();

    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(serde_json::json!({ "error": "Invalid credentials" })),
        )
        .mount(&server)
        .await;

    Command::cargo_bin("attend")
        .unwrap()
        .env("ATTEND_HOME", temp.path())
        .env("ATTEND_BASE_URL", server.uri())
        .args(["login", "dana@company.com"])
        .write_stdin("wrong\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid credentials"));

    assert!(!temp.path().join("credential").exists());
}

#[tokio::test]
async fn logout_clears_the_stored_session() {
    let server = MockServer::start().await;
    let temp = tempdir().unwrap();

    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(login_body()))
        .mount(&server)
        .await;

    Command::cargo_bin("attend")
        .unwrap()
        .env("ATTEND_HOME", temp.path())
        .env("ATTEND_BASE_URL", server.uri())
        .args(["login", "dana@company.com"])
        .write_stdin("secret\n")
        .assert()
        .success();

    Command::cargo_bin("attend")
        .unwrap()
        .env("ATTEND_HOME", temp.path())
        .arg("logout")
        .assert()
        .success()
        .stdout(predicate::str::contains("Logged out"));

    assert!(!temp.path().join("credential").exists());
    assert!(!temp.path().join("identity.json").exists());
}

#[test]
fn logout_without_session_is_a_noop() {
    let temp = tempdir().unwrap();

    Command::cargo_bin("attend")
        .unwrap()
        .env("ATTEND_HOME", temp.path())
        .arg("logout")
        .assert()
        .success()
        .stdout(predicate::str::contains("Not logged in"));
}

#[tokio::test]
async fn whoami_reads_the_restored_session() {
    let server = MockServer::start().await;
    let temp = tempdir().unwrap();

    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(login_body()))
        .mount(&server)
        .await;

    Command::cargo_bin("attend")
        .unwrap()
        .env("ATTEND_HOME", temp.path())
        .env("ATTEND_BASE_URL", server.uri())
        .args(["login", "dana@company.com"])
        .write_stdin("secret\n")
        .assert()
        .success();

    // no backend needed; whoami reads the hydrated store
    Command::cargo_bin("attend")
        .unwrap()
        .env("ATTEND_HOME", temp.path())
        .arg("whoami")
        .assert()
        .success()
        .stdout(predicate::str::contains("Dana <dana@company.com>"))
        .stdout(predicate::str::contains("role: Employee"));
}
