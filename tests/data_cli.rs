mod support;

use predicates::str::contains;
use serde_json::Value;

use support::TestHome;

#[test]
fn export_import_round_trips_between_homes() {
    let source = TestHome::new();
    source
        .td_cmd()
        .args(["project", "add", "Shopping", "--quiet"])
        .assert()
        .success();
    let id = source.add_task("Buy milk", "Shopping");
    source
        .td_cmd()
        .args(["task", "done", &id, "--quiet"])
        .assert()
        .success();

    let bundle = source.path().join("bundle.json");
    source
        .td_cmd()
        .args(["data", "export", "--output"])
        .arg(&bundle)
        .assert()
        .success();

    let target = TestHome::new();
    target
        .td_cmd()
        .args(["data", "import"])
        .arg(&bundle)
        .assert()
        .success()
        .stdout(contains("replaced both collections"));

    let output = target
        .td_cmd()
        .args(["task", "list", "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let value: Value = serde_json::from_slice(&output).expect("list json");
    let view = value["data"].as_array().expect("task array");
    assert_eq!(view.len(), 1);
    assert_eq!(view[0]["id"].as_str(), Some(id.as_str()));
    assert_eq!(view[0]["completed"].as_bool(), Some(true));
}

#[test]
fn export_to_stdout_is_a_bundle() {
    let home = TestHome::new();
    home.add_task("Buy milk", "Shopping");

    let output = home
        .td_cmd()
        .args(["data", "export"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let value: Value = serde_json::from_slice(&output).expect("bundle json");
    assert_eq!(value["schema_version"].as_str(), Some("taskdeck.v1"));
    assert_eq!(value["tasks"].as_array().expect("tasks").len(), 1);
    assert!(value["exported_at"].is_string());
}

#[test]
fn import_replaces_instead_of_merging() {
    let source = TestHome::new();
    source.add_task("Imported", "Work");
    let bundle = source.path().join("bundle.json");
    source
        .td_cmd()
        .args(["data", "export", "--output"])
        .arg(&bundle)
        .assert()
        .success();

    let target = TestHome::new();
    target.add_task("Preexisting", "Work");
    target
        .td_cmd()
        .args(["data", "import"])
        .arg(&bundle)
        .assert()
        .success();

    target
        .td_cmd()
        .args(["task", "list"])
        .assert()
        .success()
        .stdout(contains("Imported"))
        .stdout(contains("1 of 1 task(s)"));
}

#[test]
fn import_rejects_malformed_bundles() {
    let home = TestHome::new();
    let bad = home.path().join("bad.json");
    std::fs::write(&bad, "{not json").expect("write file");

    home.td_cmd()
        .args(["data", "import"])
        .arg(&bad)
        .assert()
        .code(4)
        .stderr(contains("not a valid export bundle"));
}

#[test]
fn clear_requires_confirmation() {
    let home = TestHome::new();
    home.add_task("Buy milk", "Shopping");

    home.td_cmd()
        .args(["data", "clear"])
        .assert()
        .code(2)
        .stderr(contains("--yes"));
    assert!(home.slot_path("app_tasks").exists());

    home.td_cmd()
        .args(["data", "clear", "--yes"])
        .assert()
        .success();
    assert!(!home.slot_path("app_tasks").exists());
}
