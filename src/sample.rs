//! Demo seed data.
//!
//! A small starter set for first runs: tasks across
//! Work/Personal/Health/Learning with relative due dates (including one
//! already overdue), plus matching projects.

use chrono::{Duration, Utc};
use tracing::debug;

use crate::project::ProjectFormData;
use crate::store::TaskStore;
use crate::task::{Priority, TaskFormData};

/// Seed demo tasks and projects, but only into a store with no tasks.
/// Returns true when seeding happened.
pub fn seed_if_empty(store: &mut TaskStore) -> bool {
    if !store.tasks().is_empty() {
        debug!("store already has tasks, sample seed skipped");
        return false;
    }

    for (name, description, color) in sample_projects() {
        store.add_project(&ProjectFormData {
            name: name.to_string(),
            description: description.to_string(),
            color: color.to_string(),
        });
    }

    let today = Utc::now().date_naive();
    for (form, due_offset_days, completed) in sample_tasks() {
        let mut data = form;
        data.due_date = due_offset_days.map(|days| today + Duration::days(days));
        let task = store.add_task(&data);
        if completed {
            store.toggle_task_complete(&task.id);
        }
    }

    debug!(
        tasks = store.tasks().len(),
        projects = store.projects().len(),
        "sample data seeded"
    );
    true
}

fn sample_projects() -> Vec<(&'static str, &'static str, &'static str)> {
    vec![
        ("Work", "Job tasks and deadlines", "#3b82f6"),
        ("Personal", "Errands and home", "#10b981"),
        ("Health", "Exercise and appointments", "#ef4444"),
        ("Learning", "Courses and reading", "#8b5cf6"),
    ]
}

fn sample_tasks() -> Vec<(TaskFormData, Option<i64>, bool)> {
    vec![
        (
            TaskFormData {
                title: "Complete project documentation".to_string(),
                description: "Write setup instructions, API documentation and a user guide."
                    .to_string(),
                priority: Priority::High,
                category: "Work".to_string(),
                due_date: None,
                tags: vec!["documentation".to_string(), "writing".to_string()],
            },
            Some(3),
            false,
        ),
        (
            TaskFormData {
                title: "Review open pull requests".to_string(),
                description: "Go through pending reviews and leave feedback.".to_string(),
                priority: Priority::Medium,
                category: "Work".to_string(),
                due_date: None,
                tags: vec!["code-review".to_string(), "teamwork".to_string()],
            },
            Some(-1),
            true,
        ),
        (
            TaskFormData {
                title: "Buy groceries".to_string(),
                description: "Milk, bread, eggs, fruit and cleaning supplies.".to_string(),
                priority: Priority::Low,
                category: "Personal".to_string(),
                due_date: None,
                tags: vec!["shopping".to_string(), "weekly".to_string()],
            },
            Some(1),
            false,
        ),
        (
            TaskFormData {
                title: "Plan sprint meeting agenda".to_string(),
                description: "Backlog review, capacity planning and retro items.".to_string(),
                priority: Priority::Urgent,
                category: "Work".to_string(),
                due_date: None,
                tags: vec!["meeting".to_string(), "planning".to_string()],
            },
            Some(-2),
            false,
        ),
        (
            TaskFormData {
                title: "Morning run".to_string(),
                description: "30 minutes in the park at a steady pace.".to_string(),
                priority: Priority::Medium,
                category: "Health".to_string(),
                due_date: None,
                tags: vec!["exercise".to_string()],
            },
            None,
            true,
        ),
        (
            TaskFormData {
                title: "Finish Rust book chapter".to_string(),
                description: "Ownership and borrowing, with the exercises.".to_string(),
                priority: Priority::Low,
                category: "Learning".to_string(),
                due_date: None,
                tags: vec!["rust".to_string(), "reading".to_string()],
            },
            Some(7),
            false,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::Storage;
    use tempfile::TempDir;

    #[test]
    fn seeds_an_empty_store() {
        let temp = TempDir::new().unwrap();
        let mut store = TaskStore::open(Storage::new(temp.path().to_path_buf()));

        assert!(seed_if_empty(&mut store));
        assert!(!store.tasks().is_empty());
        assert_eq!(store.projects().len(), 4);
        assert!(store.tasks().iter().any(|task| task.completed));
        let today = Utc::now().date_naive();
        assert!(store.tasks().iter().any(|task| task.is_overdue(today)));
    }

    #[test]
    fn skips_a_store_that_already_has_tasks() {
        let temp = TempDir::new().unwrap();
        let mut store = TaskStore::open(Storage::new(temp.path().to_path_buf()));
        store.add_task(&TaskFormData {
            title: "Existing task".to_string(),
            description: String::new(),
            priority: Priority::Low,
            category: "Work".to_string(),
            due_date: None,
            tags: Vec::new(),
        });

        assert!(!seed_if_empty(&mut store));
        assert_eq!(store.tasks().len(), 1);
    }
}
