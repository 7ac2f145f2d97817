//! Entity store: canonical in-memory task and project collections.
//!
//! Every mutating operation writes the full collection through to the
//! persistence adapter before touching in-memory state, so a crash
//! between the two is invisible to the next load (memory is always
//! rebuilt from storage on start). Operations referencing a missing id
//! are silent no-ops. All operations are synchronous, single-entity and
//! run to completion; there is one writer and no locking.

use chrono::Utc;
use tracing::debug;

use crate::project::{Project, ProjectFormData};
use crate::query::{self, ProjectStats, TaskFilters, TaskSort};
use crate::storage::Storage;
use crate::task::{Task, TaskFormData};

/// State owner for tasks, projects and the session-local view settings.
#[derive(Debug)]
pub struct TaskStore {
    storage: Storage,
    tasks: Vec<Task>,
    projects: Vec<Project>,
    filters: TaskFilters,
    sort: TaskSort,
    is_loading: bool,
    error: Option<String>,
}

impl TaskStore {
    /// Open a store over the given adapter, rebuilding in-memory state
    /// from whatever the slots hold. Absence means empty collections.
    pub fn open(storage: Storage) -> Self {
        let mut store = Self {
            storage,
            tasks: Vec::new(),
            projects: Vec::new(),
            filters: TaskFilters::default(),
            sort: TaskSort::default(),
            is_loading: false,
            error: None,
        };
        store.reload();
        store
    }

    /// Re-read both collections from storage.
    pub fn reload(&mut self) {
        self.is_loading = true;
        self.tasks = self.storage.load_tasks();
        self.projects = self.storage.load_projects();
        self.is_loading = false;
        debug!(
            tasks = self.tasks.len(),
            projects = self.projects.len(),
            "store loaded"
        );
    }

    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    // =========================================================================
    // Task operations
    // =========================================================================

    /// Create a task from validated form data. Never fails on valid
    /// input; validation happens before this is called.
    pub fn add_task(&mut self, data: &TaskFormData) -> Task {
        let task = Task::from_form(data);
        let mut next = self.tasks.clone();
        next.push(task.clone());
        self.storage.save_tasks(&next);
        self.tasks = next;
        debug!(id = %task.id, "task added");
        task
    }

    /// Replace the editable fields of the task with this id. Returns the
    /// updated task, or `None` as a silent no-op when the id is unknown.
    /// Replacement is by id, never by position.
    pub fn update_task(&mut self, id: &str, data: &TaskFormData) -> Option<Task> {
        let mut next = self.tasks.clone();
        let slot = next.iter_mut().find(|task| task.id == id)?;
        slot.apply_form(data);
        let updated = slot.clone();
        self.storage.save_tasks(&next);
        self.tasks = next;
        debug!(id, "task updated");
        Some(updated)
    }

    /// Remove a task by id. Deleting a nonexistent id is a no-op.
    pub fn delete_task(&mut self, id: &str) {
        if !self.tasks.iter().any(|task| task.id == id) {
            return;
        }
        let next: Vec<Task> = self
            .tasks
            .iter()
            .filter(|task| task.id != id)
            .cloned()
            .collect();
        self.storage.save_tasks(&next);
        self.tasks = next;
        debug!(id, "task deleted");
    }

    /// Flip `completed` and stamp `updated_at`. No-op when the id is
    /// unknown.
    pub fn toggle_task_complete(&mut self, id: &str) {
        let mut next = self.tasks.clone();
        let Some(task) = next.iter_mut().find(|task| task.id == id) else {
            return;
        };
        task.completed = !task.completed;
        task.updated_at = Utc::now();
        self.storage.save_tasks(&next);
        self.tasks = next;
        debug!(id, "task toggled");
    }

    /// Replace the entire task collection (import path).
    pub fn replace_all_tasks(&mut self, tasks: Vec<Task>) {
        self.storage.save_tasks(&tasks);
        self.tasks = tasks;
    }

    // =========================================================================
    // Project operations
    // =========================================================================

    pub fn add_project(&mut self, data: &ProjectFormData) -> Project {
        let project = Project::from_form(data);
        let mut next = self.projects.clone();
        next.push(project.clone());
        self.storage.save_projects(&next);
        self.projects = next;
        debug!(id = %project.id, "project added");
        project
    }

    pub fn update_project(&mut self, id: &str, data: &ProjectFormData) -> Option<Project> {
        let mut next = self.projects.clone();
        let slot = next.iter_mut().find(|project| project.id == id)?;
        slot.apply_form(data);
        let updated = slot.clone();
        self.storage.save_projects(&next);
        self.projects = next;
        debug!(id, "project updated");
        Some(updated)
    }

    /// Remove a project by id. Tasks whose category equals the project's
    /// name are left untouched and keep the now-dangling category string.
    pub fn delete_project(&mut self, id: &str) {
        if !self.projects.iter().any(|project| project.id == id) {
            return;
        }
        let next: Vec<Project> = self
            .projects
            .iter()
            .filter(|project| project.id != id)
            .cloned()
            .collect();
        self.storage.save_projects(&next);
        self.projects = next;
        debug!(id, "project deleted");
    }

    /// Replace the entire project collection (import path).
    pub fn replace_all_projects(&mut self, projects: Vec<Project>) {
        self.storage.save_projects(&projects);
        self.projects = projects;
    }

    // =========================================================================
    // View state and derived reads
    // =========================================================================

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn filters(&self) -> &TaskFilters {
        &self.filters
    }

    pub fn sort(&self) -> &TaskSort {
        &self.sort
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    /// Merge a partial filter change into the current filters.
    pub fn set_filters(&mut self, update: FilterUpdate) {
        if let Some(status) = update.status {
            self.filters.status = status;
        }
        if let Some(priority) = update.priority {
            self.filters.priority = priority;
        }
        if let Some(category) = update.category {
            self.filters.category = category;
        }
        if let Some(search) = update.search {
            self.filters.search = search;
        }
    }

    pub fn set_sort(&mut self, sort: TaskSort) {
        self.sort = sort;
    }

    /// The visible task list: full recompute from the current
    /// collection, filters and sort on every call.
    pub fn filtered_tasks(&self) -> Vec<Task> {
        query::derive_view(&self.tasks, &self.filters, &self.sort)
    }

    pub fn tasks_by_category(&self, category: &str) -> Vec<&Task> {
        query::tasks_by_category(&self.tasks, category)
    }

    pub fn project_stats(&self, category: &str) -> ProjectStats {
        query::project_stats(&self.tasks, category)
    }

    pub fn find_task(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    pub fn find_project(&self, id: &str) -> Option<&Project> {
        self.projects.iter().find(|project| project.id == id)
    }

    /// Resolve a project by id or exact name, id first.
    pub fn resolve_project(&self, key: &str) -> Option<&Project> {
        self.find_project(key)
            .or_else(|| self.projects.iter().find(|project| project.name == key))
    }
}

/// Partial filter change, merged field-by-field into the current
/// filters. `None` leaves a field untouched; `Some(None)` on the option
/// fields clears them.
#[derive(Debug, Clone, Default)]
pub struct FilterUpdate {
    pub status: Option<crate::query::StatusFilter>,
    pub priority: Option<Option<crate::task::Priority>>,
    pub category: Option<Option<String>>,
    pub search: Option<String>,
}
