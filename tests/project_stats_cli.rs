mod support;

use predicates::str::contains;
use serde_json::Value;

use support::TestHome;

#[test]
fn project_add_and_list_with_stats() {
    let home = TestHome::new();
    home.td_cmd()
        .args(["project", "add", "Shopping", "--color", "#10b981", "--quiet"])
        .assert()
        .success();

    let id = home.add_task("Buy milk", "Shopping");
    home.add_task("Buy bread", "Shopping");
    home.td_cmd()
        .args(["task", "done", &id, "--quiet"])
        .assert()
        .success();

    let output = home
        .td_cmd()
        .args(["project", "list", "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let value: Value = serde_json::from_slice(&output).expect("list json");
    let rows = value["data"].as_array().expect("project array");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["name"].as_str(), Some("Shopping"));
    assert_eq!(rows[0]["total"].as_u64(), Some(2));
    assert_eq!(rows[0]["completed"].as_u64(), Some(1));
    // The persisted advisory counter stays at zero.
    assert_eq!(rows[0]["task_count"].as_u64(), Some(0));
}

#[test]
fn duplicate_project_names_are_rejected() {
    let home = TestHome::new();
    home.td_cmd()
        .args(["project", "add", "Shopping", "--quiet"])
        .assert()
        .success();
    home.td_cmd()
        .args(["project", "add", "Shopping"])
        .assert()
        .code(2)
        .stderr(contains("already exists"));
}

#[test]
fn project_delete_leaves_tasks_dangling() {
    let home = TestHome::new();
    home.td_cmd()
        .args(["project", "add", "Shopping", "--quiet"])
        .assert()
        .success();
    home.add_task("Buy milk", "Shopping");

    home.td_cmd()
        .args(["project", "delete", "Shopping"])
        .assert()
        .success()
        .stdout(contains("still carry category 'Shopping'"));

    home.td_cmd()
        .args(["task", "list"])
        .assert()
        .success()
        .stdout(contains("Buy milk"));
}

#[test]
fn project_edit_resolves_by_name() {
    let home = TestHome::new();
    home.td_cmd()
        .args(["project", "add", "Shopping", "--quiet"])
        .assert()
        .success();

    let output = home
        .td_cmd()
        .args(["project", "edit", "Shopping", "--name", "Errands", "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let value: Value = serde_json::from_slice(&output).expect("edit json");
    assert_eq!(value["data"]["name"].as_str(), Some("Errands"));
}

#[test]
fn stats_partitions_the_collection() {
    let home = TestHome::new();
    let id = home.add_task("Buy milk", "Shopping");
    home.add_task("Write report", "Work");
    home.td_cmd()
        .args(["task", "done", &id, "--quiet"])
        .assert()
        .success();

    let output = home
        .td_cmd()
        .args(["stats", "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let value: Value = serde_json::from_slice(&output).expect("stats json");
    assert_eq!(value["data"]["total"].as_u64(), Some(2));
    assert_eq!(value["data"]["completed"].as_u64(), Some(1));
    assert_eq!(value["data"]["pending"].as_u64(), Some(1));
    assert_eq!(value["data"]["completion_rate"].as_f64(), Some(50.0));
}

#[test]
fn stats_on_an_empty_store() {
    let home = TestHome::new();
    let output = home
        .td_cmd()
        .args(["stats", "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let value: Value = serde_json::from_slice(&output).expect("stats json");
    assert_eq!(value["data"]["total"].as_u64(), Some(0));
    assert_eq!(value["data"]["completion_rate"].as_f64(), Some(0.0));
}

#[test]
fn init_sample_seeds_once() {
    let home = TestHome::new();
    home.td_cmd()
        .args(["init", "--sample", "--json"])
        .assert()
        .success()
        .stdout(contains("\"seeded\": true"));

    // Second run is a no-op with a warning.
    home.td_cmd()
        .args(["init", "--sample"])
        .assert()
        .success()
        .stdout(contains("sample seed skipped"));

    home.td_cmd()
        .args(["project", "list"])
        .assert()
        .success()
        .stdout(contains("4 project(s)"));
}
