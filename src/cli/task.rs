//! td task commands: add, list, edit, done, delete.

use std::path::PathBuf;

use chrono::NaiveDate;

use crate::error::{Error, Result};
use crate::form;
use crate::output::{emit_success, HumanOutput, OutputOptions};
use crate::query::{SortDirection, SortField, StatusFilter, TaskSort};
use crate::store::{FilterUpdate, TaskStore};
use crate::task::{Priority, Task, TaskFormData};

pub struct AddOptions {
    pub title: String,
    pub description: String,
    pub priority: String,
    pub category: String,
    pub due: Option<String>,
    pub tags: Vec<String>,
    pub data_dir: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

pub fn run_add(opts: AddOptions) -> Result<()> {
    let (_config, storage) = super::open_context(opts.data_dir.as_deref())?;
    let mut store = TaskStore::open(storage);

    let due = opts.due.unwrap_or_default();
    let data = validated_form_data(
        &opts.title,
        &opts.description,
        &opts.priority,
        &opts.category,
        &due,
        opts.tags,
    )?;

    let task = store.add_task(&data);

    let mut human = HumanOutput::new(format!("td task add: created '{}'", task.title));
    human.push_summary("id", task.id.clone());
    human.push_summary("priority", task.priority.to_string());
    human.push_summary("category", task.category.clone());
    if let Some(due) = task.due_date {
        human.push_summary("due", due.to_string());
    }
    if store.resolve_project(&task.category).is_none() {
        human.push_warning(format!("no project named '{}'", task.category));
    }
    human.push_next_step("td task list".to_string());

    emit_success(
        OutputOptions {
            json: opts.json,
            quiet: opts.quiet,
        },
        "task add",
        &task,
        Some(&human),
    )
}

pub struct ListOptions {
    pub status: String,
    pub priority: Option<String>,
    pub category: Option<String>,
    pub search: String,
    pub sort: String,
    pub direction: String,
    pub data_dir: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

pub fn run_list(opts: ListOptions) -> Result<()> {
    let (_config, storage) = super::open_context(opts.data_dir.as_deref())?;
    let mut store = TaskStore::open(storage);

    let status: StatusFilter = opts.status.parse()?;
    let priority = opts
        .priority
        .as_deref()
        .map(str::parse::<Priority>)
        .transpose()?;
    let sort = TaskSort {
        field: opts.sort.parse::<SortField>()?,
        direction: opts.direction.parse::<SortDirection>()?,
    };

    store.set_filters(FilterUpdate {
        status: Some(status),
        priority: Some(priority),
        category: Some(opts.category),
        search: Some(opts.search),
    });
    store.set_sort(sort);

    let view = store.filtered_tasks();

    let mut human = HumanOutput::new(format!(
        "td task list: {} of {} task(s)",
        view.len(),
        store.tasks().len()
    ));
    for task in &view {
        human.push_detail(format_task_line(task));
    }

    emit_success(
        OutputOptions {
            json: opts.json,
            quiet: opts.quiet,
        },
        "task list",
        &view,
        Some(&human),
    )
}

pub struct EditOptions {
    pub id: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub priority: Option<String>,
    pub category: Option<String>,
    pub due: Option<String>,
    pub tags: Option<Vec<String>>,
    pub data_dir: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

pub fn run_edit(opts: EditOptions) -> Result<()> {
    let (_config, storage) = super::open_context(opts.data_dir.as_deref())?;
    let mut store = TaskStore::open(storage);

    let id = resolve_task_id(&store, &opts.id)?;
    let current = store
        .find_task(&id)
        .cloned()
        .ok_or_else(|| Error::InvalidArgument(format!("no task matches '{}'", opts.id)))?;

    // Unspecified flags keep the current value; --due "" clears the date.
    let title = opts.title.unwrap_or(current.title);
    let description = opts.description.unwrap_or(current.description);
    let priority = opts.priority.unwrap_or_else(|| current.priority.to_string());
    let category = opts.category.unwrap_or(current.category);
    let due = opts
        .due
        .unwrap_or_else(|| current.due_date.map(|d| d.to_string()).unwrap_or_default());
    let tags = opts.tags.unwrap_or(current.tags);

    let data = validated_form_data(&title, &description, &priority, &category, &due, tags)?;
    let updated = store
        .update_task(&id, &data)
        .ok_or_else(|| Error::InvalidArgument(format!("no task matches '{}'", opts.id)))?;

    let mut human = HumanOutput::new(format!("td task edit: updated '{}'", updated.title));
    human.push_summary("id", updated.id.clone());

    emit_success(
        OutputOptions {
            json: opts.json,
            quiet: opts.quiet,
        },
        "task edit",
        &updated,
        Some(&human),
    )
}

pub struct DoneOptions {
    pub id: String,
    pub data_dir: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

pub fn run_done(opts: DoneOptions) -> Result<()> {
    let (_config, storage) = super::open_context(opts.data_dir.as_deref())?;
    let mut store = TaskStore::open(storage);

    let id = resolve_task_id(&store, &opts.id)?;
    store.toggle_task_complete(&id);
    let task = store
        .find_task(&id)
        .cloned()
        .ok_or_else(|| Error::InvalidArgument(format!("no task matches '{}'", opts.id)))?;

    let verb = if task.completed { "completed" } else { "reopened" };
    let mut human = HumanOutput::new(format!("td task done: {verb} '{}'", task.title));
    human.push_summary("id", task.id.clone());

    emit_success(
        OutputOptions {
            json: opts.json,
            quiet: opts.quiet,
        },
        "task done",
        &task,
        Some(&human),
    )
}

pub struct DeleteOptions {
    pub id: String,
    pub data_dir: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

#[derive(serde::Serialize)]
struct DeleteReport {
    id: String,
    deleted: bool,
}

pub fn run_delete(opts: DeleteOptions) -> Result<()> {
    let (_config, storage) = super::open_context(opts.data_dir.as_deref())?;
    let mut store = TaskStore::open(storage);

    let id = resolve_task_id(&store, &opts.id)?;
    let title = store
        .find_task(&id)
        .map(|task| task.title.clone())
        .unwrap_or_default();
    store.delete_task(&id);

    let report = DeleteReport {
        id: id.clone(),
        deleted: true,
    };
    let mut human = HumanOutput::new(format!("td task delete: removed '{title}'"));
    human.push_summary("id", id);

    emit_success(
        OutputOptions {
            json: opts.json,
            quiet: opts.quiet,
        },
        "task delete",
        &report,
        Some(&human),
    )
}

/// Resolve a task id argument: exact match first, then a unique id
/// prefix.
fn resolve_task_id(store: &TaskStore, key: &str) -> Result<String> {
    if store.find_task(key).is_some() {
        return Ok(key.to_string());
    }
    let matches: Vec<&Task> = store
        .tasks()
        .iter()
        .filter(|task| task.id.starts_with(key))
        .collect();
    match matches.as_slice() {
        [task] => Ok(task.id.clone()),
        [] => Err(Error::InvalidArgument(format!("no task matches '{key}'"))),
        _ => Err(Error::InvalidArgument(format!(
            "'{key}' matches {} tasks, use more of the id",
            matches.len()
        ))),
    }
}

/// Run the shared task form rules, then assemble typed form data. The
/// first failing field becomes the error.
fn validated_form_data(
    title: &str,
    description: &str,
    priority: &str,
    category: &str,
    due: &str,
    tags: Vec<String>,
) -> Result<TaskFormData> {
    let mut form = form::task_form(title, description, category, due);
    if !form.validate_form() {
        let errors = form.errors();
        let (field, message) = errors
            .iter()
            .next()
            .map(|(k, v)| (k.clone(), v.clone()))
            .unwrap_or_default();
        return Err(Error::Validation { field, message });
    }

    let priority: Priority = priority.parse()?;
    let due_date = if due.trim().is_empty() {
        None
    } else {
        // Already validated by the form rules.
        NaiveDate::parse_from_str(due.trim(), "%Y-%m-%d").ok()
    };

    Ok(TaskFormData {
        title: title.to_string(),
        description: description.to_string(),
        priority,
        category: category.to_string(),
        due_date,
        tags,
    })
}

fn format_task_line(task: &Task) -> String {
    let mark = if task.completed { "x" } else { " " };
    let short_id = task.id.get(..8).unwrap_or(&task.id);
    let due = task
        .due_date
        .map(|d| format!(", due {d}"))
        .unwrap_or_default();
    format!(
        "[{mark}] {short_id}  {} ({}, {}{due})",
        task.title, task.priority, task.category
    )
}
