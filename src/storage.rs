//! Key-value persistence adapter.
//!
//! State lives in four independent JSON slots under a single data
//! directory:
//!
//! ```text
//! <data dir>/
//!   app_tasks.json       # Vec<Task>
//!   app_projects.json    # Vec<Project>
//!   app_user.json        # User
//!   app_auth_token.json  # String
//! ```
//!
//! The adapter owns only the serialized form. Callers must treat a
//! missing or malformed slot as "no prior state", never as an error:
//! `get` returns `None` in both cases, and a failed `set`/`remove`
//! degrades to a logged no-op. Date fields round-trip through ISO-8601
//! text and come back date-valued on read.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{de::DeserializeOwned, Serialize};
use tracing::warn;

use crate::project::Project;
use crate::session::User;
use crate::task::Task;

/// Slot key for the task collection
pub const TASKS_KEY: &str = "app_tasks";
/// Slot key for the project collection
pub const PROJECTS_KEY: &str = "app_projects";
/// Slot key for the persisted user
pub const USER_KEY: &str = "app_user";
/// Slot key for the opaque auth token
pub const TOKEN_KEY: &str = "app_auth_token";

const SLOT_KEYS: [&str; 4] = [TASKS_KEY, PROJECTS_KEY, USER_KEY, TOKEN_KEY];

/// Storage manager over the taskdeck data directory
#[derive(Debug, Clone)]
pub struct Storage {
    data_dir: PathBuf,
}

impl Storage {
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Path of the JSON file backing a slot key
    pub fn slot_path(&self, key: &str) -> PathBuf {
        self.data_dir.join(format!("{key}.json"))
    }

    /// Read and deserialize a slot. Missing file, unreadable file and
    /// malformed JSON all come back as `None`; the latter two are logged.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let path = self.slot_path(key);
        if !path.exists() {
            return None;
        }
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(err) => {
                warn!(key, %err, "failed to read slot, treating as absent");
                return None;
            }
        };
        match serde_json::from_str(&content) {
            Ok(value) => Some(value),
            Err(err) => {
                warn!(key, %err, "malformed slot data, treating as absent");
                None
            }
        }
    }

    /// Serialize and write a slot, overwriting unconditionally. Uses a
    /// temp file + rename so readers never see a partial write. Failure
    /// is logged and the previous slot contents survive.
    pub fn set<T: Serialize>(&self, key: &str, value: &T) {
        let json = match serde_json::to_string_pretty(value) {
            Ok(json) => json,
            Err(err) => {
                warn!(key, %err, "failed to serialize slot, write skipped");
                return;
            }
        };
        if let Err(err) = self.write_atomic(&self.slot_path(key), json.as_bytes()) {
            warn!(key, %err, "failed to write slot, write skipped");
        }
    }

    /// Delete a slot. Removing an absent slot is a no-op.
    pub fn remove(&self, key: &str) {
        let path = self.slot_path(key);
        if !path.exists() {
            return;
        }
        if let Err(err) = fs::remove_file(&path) {
            warn!(key, %err, "failed to remove slot");
        }
    }

    /// Delete every slot this adapter manages.
    pub fn clear(&self) {
        for key in SLOT_KEYS {
            self.remove(key);
        }
    }

    fn write_atomic(&self, path: &Path, data: &[u8]) -> std::io::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let temp_path = path.with_extension("json.tmp");
        let mut file = File::create(&temp_path)?;
        file.write_all(data)?;
        file.sync_all()?;
        fs::rename(&temp_path, path)?;
        Ok(())
    }

    // =========================================================================
    // Typed slot helpers
    // =========================================================================

    /// Load the task collection, empty when no prior state exists.
    pub fn load_tasks(&self) -> Vec<Task> {
        self.get(TASKS_KEY).unwrap_or_default()
    }

    pub fn save_tasks(&self, tasks: &[Task]) {
        self.set(TASKS_KEY, &tasks);
    }

    /// Load the project collection, empty when no prior state exists.
    pub fn load_projects(&self) -> Vec<Project> {
        self.get(PROJECTS_KEY).unwrap_or_default()
    }

    pub fn save_projects(&self, projects: &[Project]) {
        self.set(PROJECTS_KEY, &projects);
    }

    pub fn load_user(&self) -> Option<User> {
        self.get(USER_KEY)
    }

    pub fn save_user(&self, user: &User) {
        self.set(USER_KEY, user);
    }

    pub fn load_token(&self) -> Option<String> {
        self.get(TOKEN_KEY)
    }

    pub fn save_token(&self, token: &str) {
        self.set(TOKEN_KEY, &token);
    }

    /// Drop the persisted user and token, ending any restored session.
    pub fn clear_auth(&self) {
        self.remove(USER_KEY);
        self.remove(TOKEN_KEY);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::{Priority, TaskFormData};
    use tempfile::TempDir;

    fn storage() -> (TempDir, Storage) {
        let temp = TempDir::new().unwrap();
        let storage = Storage::new(temp.path().to_path_buf());
        (temp, storage)
    }

    fn sample_task(title: &str, due: Option<chrono::NaiveDate>) -> Task {
        let mut task = Task::from_form(&TaskFormData {
            title: title.to_string(),
            description: "a description".to_string(),
            priority: Priority::Medium,
            category: "Work".to_string(),
            due_date: due,
            tags: vec!["one".to_string(), "two".to_string()],
        });
        task.due_date = due;
        task
    }

    #[test]
    fn get_on_missing_slot_is_none() {
        let (_temp, storage) = storage();
        assert!(storage.get::<Vec<Task>>(TASKS_KEY).is_none());
        assert!(storage.load_tasks().is_empty());
    }

    #[test]
    fn set_then_get_round_trips() {
        let (_temp, storage) = storage();
        storage.set(TOKEN_KEY, &"demo-token".to_string());
        assert_eq!(storage.load_token().as_deref(), Some("demo-token"));
    }

    #[test]
    fn malformed_slot_reads_as_absent() {
        let (_temp, storage) = storage();
        std::fs::create_dir_all(storage.data_dir()).unwrap();
        std::fs::write(storage.slot_path(TASKS_KEY), "{not json").unwrap();
        assert!(storage.get::<Vec<Task>>(TASKS_KEY).is_none());
        assert!(storage.load_tasks().is_empty());
    }

    #[test]
    fn task_dates_survive_the_round_trip() {
        let (_temp, storage) = storage();
        let due = chrono::NaiveDate::from_ymd_opt(2026, 9, 1).unwrap();
        let tasks = vec![sample_task("Dated", Some(due)), sample_task("Undated", None)];
        storage.save_tasks(&tasks);

        let loaded = storage.load_tasks();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0].due_date, Some(due));
        assert_eq!(loaded[0].created_at, tasks[0].created_at);
        assert_eq!(loaded[0].updated_at, tasks[0].updated_at);
        assert_eq!(loaded[1].due_date, None);
    }

    #[test]
    fn set_overwrites_unconditionally() {
        let (_temp, storage) = storage();
        storage.save_tasks(&[sample_task("First", None)]);
        storage.save_tasks(&[sample_task("Second", None), sample_task("Third", None)]);
        let loaded = storage.load_tasks();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0].title, "Second");
    }

    #[test]
    fn remove_missing_slot_is_a_noop() {
        let (_temp, storage) = storage();
        storage.remove(USER_KEY);
        storage.remove(USER_KEY);
    }

    #[test]
    fn clear_wipes_all_slots() {
        let (_temp, storage) = storage();
        storage.save_tasks(&[sample_task("A", None)]);
        storage.save_token("t");
        storage.clear();
        assert!(storage.load_tasks().is_empty());
        assert!(storage.load_token().is_none());
    }
}
