mod support;

use predicates::str::contains;
use serde_json::Value;

use support::TestHome;

#[test]
fn login_persists_user_and_token() {
    let home = TestHome::new();
    let output = home
        .td_cmd()
        .args([
            "login",
            "--email",
            "ada@example.com",
            "--password",
            "secret1",
            "--json",
        ])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let value: Value = serde_json::from_slice(&output).expect("login json");
    assert_eq!(value["data"]["email"].as_str(), Some("ada@example.com"));
    assert_eq!(value["data"]["name"].as_str(), Some("ada"));

    assert!(home.slot_path("app_user").exists());
    assert!(home.slot_path("app_auth_token").exists());
}

#[test]
fn bad_email_exits_2_and_writes_nothing() {
    let home = TestHome::new();
    home.td_cmd()
        .args(["login", "--email", "not-an-email", "--password", "secret1"])
        .assert()
        .code(2)
        .stderr(contains("email"));

    assert!(!home.slot_path("app_user").exists());
    assert!(!home.slot_path("app_auth_token").exists());
}

#[test]
fn short_password_exits_2() {
    let home = TestHome::new();
    home.td_cmd()
        .args(["login", "--email", "ada@example.com", "--password", "12345"])
        .assert()
        .code(2)
        .stderr(contains("password"));
}

#[test]
fn whoami_reports_the_restored_session() {
    let home = TestHome::new();
    home.td_cmd()
        .args([
            "login",
            "--email",
            "ada@example.com",
            "--password",
            "secret1",
            "--quiet",
        ])
        .assert()
        .success();

    home.td_cmd()
        .arg("whoami")
        .assert()
        .success()
        .stdout(contains("ada@example.com"));
}

#[test]
fn whoami_without_a_session_exits_2() {
    let home = TestHome::new();
    home.td_cmd()
        .arg("whoami")
        .assert()
        .code(2)
        .stderr(contains("not logged in"));
}

#[test]
fn logout_drops_the_session() {
    let home = TestHome::new();
    home.td_cmd()
        .args([
            "login",
            "--email",
            "ada@example.com",
            "--password",
            "secret1",
            "--quiet",
        ])
        .assert()
        .success();

    home.td_cmd().arg("logout").assert().success();

    assert!(!home.slot_path("app_user").exists());
    assert!(!home.slot_path("app_auth_token").exists());
    home.td_cmd().arg("whoami").assert().code(2);
}

#[test]
fn register_uses_the_given_name() {
    let home = TestHome::new();
    let output = home
        .td_cmd()
        .args([
            "register",
            "--name",
            "Ada Lovelace",
            "--email",
            "ada@example.com",
            "--password",
            "secret1",
            "--json",
        ])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let value: Value = serde_json::from_slice(&output).expect("register json");
    assert_eq!(value["data"]["name"].as_str(), Some("Ada Lovelace"));
}

#[test]
fn register_rejects_one_character_names() {
    let home = TestHome::new();
    home.td_cmd()
        .args([
            "register",
            "--name",
            "a",
            "--email",
            "ada@example.com",
            "--password",
            "secret1",
        ])
        .assert()
        .code(2)
        .stderr(contains("name"));
}

#[test]
fn task_commands_work_without_a_session() {
    // Auth never gates the task surface.
    let home = TestHome::new();
    home.add_task("Buy milk", "Shopping");
    home.td_cmd()
        .args(["task", "list"])
        .assert()
        .success()
        .stdout(contains("Buy milk"));
}
