use std::path::{Path, PathBuf};

use assert_cmd::Command;
use serde_json::Value;
use tempfile::TempDir;

/// Isolated data directory for one test, with the simulated login delay
/// turned off.
pub struct TestHome {
    dir: TempDir,
}

impl TestHome {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("failed to create tempdir");
        std::fs::write(
            dir.path().join("taskdeck.toml"),
            "[auth]\nlogin_delay_ms = 0\n",
        )
        .expect("write config");
        Self { dir }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn td_cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("td").expect("binary");
        cmd.env("TASKDECK_DATA_DIR", self.dir.path());
        cmd
    }

    pub fn slot_path(&self, key: &str) -> PathBuf {
        self.dir.path().join(format!("{key}.json"))
    }

    /// Run `td task add --json` and return the new task's id.
    pub fn add_task(&self, title: &str, category: &str) -> String {
        let output = self
            .td_cmd()
            .args(["task", "add", title, "--category", category, "--json"])
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();
        let value: Value = serde_json::from_slice(&output).expect("task add json");
        value["data"]["id"].as_str().expect("task id").to_string()
    }
}
