//! Project entity and form input.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A project groups tasks by name: tasks reference it through their
/// free-form `category` string, not by id.
///
/// `task_count` is advisory only. It is set to 0 at creation and never
/// recomputed as tasks come and go; accurate numbers come from
/// [`crate::query::project_stats`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub color: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub task_count: u32,
}

impl Project {
    pub fn from_form(data: &ProjectFormData) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: data.name.clone(),
            description: data.description.clone(),
            color: data.color.clone(),
            created_at: Utc::now(),
            task_count: 0,
        }
    }

    /// Replace the editable fields. Identity, `created_at` and the
    /// advisory `task_count` are untouched.
    pub fn apply_form(&mut self, data: &ProjectFormData) {
        self.name = data.name.clone();
        self.description = data.description.clone();
        self.color = data.color.clone();
    }
}

/// Validated input for creating or editing a project.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectFormData {
    pub name: String,
    pub description: String,
    pub color: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_form_starts_with_zero_task_count() {
        let project = Project::from_form(&ProjectFormData {
            name: "Work".to_string(),
            description: "Day job".to_string(),
            color: "#3b82f6".to_string(),
        });
        assert_eq!(project.task_count, 0);
        assert!(!project.id.is_empty());
    }

    #[test]
    fn apply_form_keeps_created_at_and_count() {
        let mut project = Project::from_form(&ProjectFormData {
            name: "Work".to_string(),
            description: String::new(),
            color: "#3b82f6".to_string(),
        });
        let created = project.created_at;
        project.task_count = 7;

        project.apply_form(&ProjectFormData {
            name: "Job".to_string(),
            description: "renamed".to_string(),
            color: "#ef4444".to_string(),
        });

        assert_eq!(project.name, "Job");
        assert_eq!(project.created_at, created);
        assert_eq!(project.task_count, 7);
    }
}
