//! Derived-view computation over the task collection.
//!
//! Everything here is a pure function of its inputs: the store calls
//! [`derive_view`] on every read rather than maintaining an incremental
//! cache. Task lists are small enough that a full recompute per change
//! is the simpler and fast-enough choice.

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::task::{Priority, Task};

/// Status facet of a task filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    #[default]
    All,
    Pending,
    Completed,
    Overdue,
}

impl std::str::FromStr for StatusFilter {
    type Err = crate::error::Error;

    fn from_str(s: &str) -> crate::error::Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(StatusFilter::All),
            "pending" => Ok(StatusFilter::Pending),
            "completed" => Ok(StatusFilter::Completed),
            "overdue" => Ok(StatusFilter::Overdue),
            other => Err(crate::error::Error::InvalidArgument(format!(
                "unknown status '{other}' (expected all|pending|completed|overdue)"
            ))),
        }
    }
}

/// Filter specification. Session-only state: never persisted, reset to
/// defaults on every process start.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskFilters {
    pub status: StatusFilter,
    pub priority: Option<Priority>,
    pub category: Option<String>,
    pub search: String,
}

/// Sort field for the derived view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    Title,
    Priority,
    DueDate,
    CreatedAt,
}

impl std::str::FromStr for SortField {
    type Err = crate::error::Error;

    fn from_str(s: &str) -> crate::error::Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "title" => Ok(SortField::Title),
            "priority" => Ok(SortField::Priority),
            "due" | "due_date" => Ok(SortField::DueDate),
            "created" | "created_at" => Ok(SortField::CreatedAt),
            other => Err(crate::error::Error::InvalidArgument(format!(
                "unknown sort field '{other}' (expected title|priority|due|created)"
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl std::str::FromStr for SortDirection {
    type Err = crate::error::Error;

    fn from_str(s: &str) -> crate::error::Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(SortDirection::Asc),
            "desc" | "descending" => Ok(SortDirection::Desc),
            other => Err(crate::error::Error::InvalidArgument(format!(
                "unknown sort direction '{other}' (expected asc|desc)"
            ))),
        }
    }
}

/// Sort specification: field plus direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskSort {
    pub field: SortField,
    pub direction: SortDirection,
}

impl Default for TaskSort {
    fn default() -> Self {
        Self {
            field: SortField::CreatedAt,
            direction: SortDirection::Desc,
        }
    }
}

/// Compute the visible, ordered task list.
///
/// Filters narrow in a fixed order (status, priority, category, search),
/// then the survivors are sorted. The sort is stable: tasks that compare
/// equal keep their prior relative order. Tasks without a due date sort
/// as if due at the earliest possible date.
pub fn derive_view(tasks: &[Task], filters: &TaskFilters, sort: &TaskSort) -> Vec<Task> {
    let today = Utc::now().date_naive();
    let mut view: Vec<Task> = tasks
        .iter()
        .filter(|task| matches_status(task, filters.status, today))
        .filter(|task| {
            filters
                .priority
                .map(|priority| task.priority == priority)
                .unwrap_or(true)
        })
        .filter(|task| {
            filters
                .category
                .as_deref()
                .map(|category| task.category == category)
                .unwrap_or(true)
        })
        .filter(|task| matches_search(task, &filters.search))
        .cloned()
        .collect();

    sort_view(&mut view, sort);
    view
}

fn matches_status(task: &Task, status: StatusFilter, today: NaiveDate) -> bool {
    match status {
        StatusFilter::All => true,
        StatusFilter::Pending => !task.completed,
        StatusFilter::Completed => task.completed,
        StatusFilter::Overdue => task.is_overdue(today),
    }
}

fn matches_search(task: &Task, search: &str) -> bool {
    let needle = search.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }
    task.title.to_lowercase().contains(&needle)
        || task.description.to_lowercase().contains(&needle)
        || task.tags.iter().any(|tag| tag.to_lowercase().contains(&needle))
}

fn sort_view(view: &mut [Task], sort: &TaskSort) {
    view.sort_by(|left, right| {
        let ordering = match sort.field {
            SortField::Title => left.title.cmp(&right.title),
            SortField::Priority => left.priority.rank().cmp(&right.priority.rank()),
            SortField::DueDate => {
                let l = left.due_date.unwrap_or(NaiveDate::MIN);
                let r = right.due_date.unwrap_or(NaiveDate::MIN);
                l.cmp(&r)
            }
            SortField::CreatedAt => left.created_at.cmp(&right.created_at),
        };
        match sort.direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    });
}

/// Tasks whose category exactly matches `category`.
pub fn tasks_by_category<'a>(tasks: &'a [Task], category: &str) -> Vec<&'a Task> {
    tasks.iter().filter(|task| task.category == category).collect()
}

/// Per-category total and completed counts, computed on demand.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ProjectStats {
    pub total: usize,
    pub completed: usize,
}

pub fn project_stats(tasks: &[Task], category: &str) -> ProjectStats {
    let matching = tasks_by_category(tasks, category);
    ProjectStats {
        total: matching.len(),
        completed: matching.iter().filter(|task| task.completed).count(),
    }
}
