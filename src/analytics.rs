//! Aggregate statistics over the task collection.
//!
//! Computed on demand from the entity store's current state; nothing
//! here is cached or persisted.

use chrono::Utc;
use serde::Serialize;

use crate::task::{Priority, Task};

/// Snapshot of aggregate task statistics.
#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
    pub overdue: usize,
    /// Completed share of all tasks, 0.0 when the collection is empty.
    pub completion_rate: f64,
    pub by_priority: Vec<PriorityCount>,
    pub by_category: Vec<CategoryStat>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PriorityCount {
    pub priority: Priority,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryStat {
    pub category: String,
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
}

/// Compute the full summary for a task collection.
pub fn summarize(tasks: &[Task]) -> Summary {
    let today = Utc::now().date_naive();
    let total = tasks.len();
    let completed = tasks.iter().filter(|task| task.completed).count();
    let overdue = tasks.iter().filter(|task| task.is_overdue(today)).count();

    let by_priority = Priority::ALL
        .iter()
        .rev()
        .map(|&priority| PriorityCount {
            priority,
            count: tasks.iter().filter(|task| task.priority == priority).count(),
        })
        .filter(|entry| entry.count > 0)
        .collect();

    let mut by_category: Vec<CategoryStat> = Vec::new();
    for task in tasks {
        match by_category
            .iter_mut()
            .find(|stat| stat.category == task.category)
        {
            Some(stat) => {
                stat.total += 1;
                if task.completed {
                    stat.completed += 1;
                } else {
                    stat.pending += 1;
                }
            }
            None => by_category.push(CategoryStat {
                category: task.category.clone(),
                total: 1,
                completed: usize::from(task.completed),
                pending: usize::from(!task.completed),
            }),
        }
    }

    Summary {
        total,
        completed,
        pending: total - completed,
        overdue,
        completion_rate: if total > 0 {
            completed as f64 / total as f64 * 100.0
        } else {
            0.0
        },
        by_priority,
        by_category,
    }
}
