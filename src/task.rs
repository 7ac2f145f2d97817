//! Task entity and form input.
//!
//! A task carries a free-form category string. The category usually names
//! a project, but nothing enforces that: deleting a project leaves tasks
//! pointing at the old name.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single work item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub completed: bool,
    pub priority: Priority,
    pub category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Task {
    /// Build a fresh task from validated form input. `created_at` and
    /// `updated_at` start equal; `completed` starts false.
    pub fn from_form(data: &TaskFormData) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            title: data.title.clone(),
            description: data.description.clone(),
            completed: false,
            priority: data.priority,
            category: data.category.clone(),
            due_date: data.due_date,
            created_at: now,
            updated_at: now,
            tags: dedup_tags(&data.tags),
        }
    }

    /// Replace all editable fields from form input and stamp `updated_at`.
    /// Identity, completion state and `created_at` are untouched.
    pub fn apply_form(&mut self, data: &TaskFormData) {
        self.title = data.title.clone();
        self.description = data.description.clone();
        self.priority = data.priority;
        self.category = data.category.clone();
        self.due_date = data.due_date;
        self.tags = dedup_tags(&data.tags);
        self.updated_at = Utc::now();
    }

    /// True when the task is pending, has a due date, and that date is
    /// before `today`. A task due today is not overdue.
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        !self.completed && self.due_date.map(|due| due < today).unwrap_or(false)
    }
}

/// Task priority, lowest to highest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
    Urgent,
}

impl Priority {
    /// Rank used for sorting: urgent(4) > high(3) > medium(2) > low(1).
    pub fn rank(self) -> u8 {
        match self {
            Priority::Urgent => 4,
            Priority::High => 3,
            Priority::Medium => 2,
            Priority::Low => 1,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
            Priority::Urgent => "urgent",
        }
    }

    pub const ALL: [Priority; 4] = [
        Priority::Low,
        Priority::Medium,
        Priority::High,
        Priority::Urgent,
    ];
}

impl std::str::FromStr for Priority {
    type Err = crate::error::Error;

    fn from_str(s: &str) -> crate::error::Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            "urgent" => Ok(Priority::Urgent),
            other => Err(crate::error::Error::InvalidArgument(format!(
                "unknown priority '{other}' (expected low|medium|high|urgent)"
            ))),
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validated input for creating or editing a task.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaskFormData {
    pub title: String,
    pub description: String,
    #[serde(default = "default_priority")]
    pub priority: Priority,
    pub category: String,
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Default for Priority {
    fn default() -> Self {
        Priority::Medium
    }
}

fn default_priority() -> Priority {
    Priority::default()
}

/// Drop duplicate tags while preserving first-seen order. Whitespace-only
/// entries are discarded.
pub fn dedup_tags(tags: &[String]) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    let mut out = Vec::new();
    for raw in tags {
        let tag = raw.trim();
        if tag.is_empty() {
            continue;
        }
        if seen.insert(tag.to_string()) {
            out.push(tag.to_string());
        }
    }
    out
}
