//! td project commands: add, list, edit, delete.

use std::path::PathBuf;

use crate::error::{Error, Result};
use crate::form;
use crate::output::{emit_success, HumanOutput, OutputOptions};
use crate::project::{Project, ProjectFormData};
use crate::store::TaskStore;

pub struct AddOptions {
    pub name: String,
    pub description: String,
    pub color: String,
    pub data_dir: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

pub fn run_add(opts: AddOptions) -> Result<()> {
    let (_config, storage) = super::open_context(opts.data_dir.as_deref())?;
    let mut store = TaskStore::open(storage);

    let data = validated_form_data(&opts.name, &opts.description, &opts.color)?;
    if store.projects().iter().any(|p| p.name == data.name) {
        return Err(Error::InvalidArgument(format!(
            "a project named '{}' already exists",
            data.name
        )));
    }
    let project = store.add_project(&data);

    let mut human = HumanOutput::new(format!("td project add: created '{}'", project.name));
    human.push_summary("id", project.id.clone());
    human.push_summary("color", project.color.clone());
    human.push_next_step(format!("td task add <title> --category \"{}\"", project.name));

    emit_success(
        OutputOptions {
            json: opts.json,
            quiet: opts.quiet,
        },
        "project add",
        &project,
        Some(&human),
    )
}

pub struct ListOptions {
    pub data_dir: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

#[derive(serde::Serialize)]
struct ProjectRow {
    #[serde(flatten)]
    project: Project,
    total: usize,
    completed: usize,
}

pub fn run_list(opts: ListOptions) -> Result<()> {
    let (_config, storage) = super::open_context(opts.data_dir.as_deref())?;
    let store = TaskStore::open(storage);

    let rows: Vec<ProjectRow> = store
        .projects()
        .iter()
        .map(|project| {
            let stats = store.project_stats(&project.name);
            ProjectRow {
                project: project.clone(),
                total: stats.total,
                completed: stats.completed,
            }
        })
        .collect();

    let mut human = HumanOutput::new(format!("td project list: {} project(s)", rows.len()));
    for row in &rows {
        let short_id = row.project.id.get(..8).unwrap_or(&row.project.id);
        human.push_detail(format!(
            "{short_id}  {} ({}/{} done)",
            row.project.name, row.completed, row.total
        ));
    }

    emit_success(
        OutputOptions {
            json: opts.json,
            quiet: opts.quiet,
        },
        "project list",
        &rows,
        Some(&human),
    )
}

pub struct EditOptions {
    pub key: String,
    pub name: Option<String>,
    pub description: Option<String>,
    pub color: Option<String>,
    pub data_dir: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

pub fn run_edit(opts: EditOptions) -> Result<()> {
    let (_config, storage) = super::open_context(opts.data_dir.as_deref())?;
    let mut store = TaskStore::open(storage);

    let current = store
        .resolve_project(&opts.key)
        .cloned()
        .ok_or_else(|| Error::InvalidArgument(format!("no project matches '{}'", opts.key)))?;

    let name = opts.name.unwrap_or(current.name);
    let description = opts.description.unwrap_or(current.description);
    let color = opts.color.unwrap_or(current.color);

    let data = validated_form_data(&name, &description, &color)?;
    let updated = store
        .update_project(&current.id, &data)
        .ok_or_else(|| Error::InvalidArgument(format!("no project matches '{}'", opts.key)))?;

    let mut human = HumanOutput::new(format!("td project edit: updated '{}'", updated.name));
    human.push_summary("id", updated.id.clone());

    emit_success(
        OutputOptions {
            json: opts.json,
            quiet: opts.quiet,
        },
        "project edit",
        &updated,
        Some(&human),
    )
}

pub struct DeleteOptions {
    pub key: String,
    pub data_dir: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

#[derive(serde::Serialize)]
struct DeleteReport {
    id: String,
    name: String,
    deleted: bool,
    dangling_tasks: usize,
}

pub fn run_delete(opts: DeleteOptions) -> Result<()> {
    let (_config, storage) = super::open_context(opts.data_dir.as_deref())?;
    let mut store = TaskStore::open(storage);

    let project = store
        .resolve_project(&opts.key)
        .cloned()
        .ok_or_else(|| Error::InvalidArgument(format!("no project matches '{}'", opts.key)))?;

    let dangling = store.tasks_by_category(&project.name).len();
    store.delete_project(&project.id);

    let report = DeleteReport {
        id: project.id.clone(),
        name: project.name.clone(),
        deleted: true,
        dangling_tasks: dangling,
    };
    let mut human = HumanOutput::new(format!("td project delete: removed '{}'", project.name));
    human.push_summary("id", project.id);
    if dangling > 0 {
        human.push_warning(format!(
            "{dangling} task(s) still carry category '{}'",
            project.name
        ));
    }

    emit_success(
        OutputOptions {
            json: opts.json,
            quiet: opts.quiet,
        },
        "project delete",
        &report,
        Some(&human),
    )
}

fn validated_form_data(name: &str, description: &str, color: &str) -> Result<ProjectFormData> {
    let mut form = form::project_form(name, description);
    if !form.validate_form() {
        let errors = form.errors();
        let (field, message) = errors
            .iter()
            .next()
            .map(|(k, v)| (k.clone(), v.clone()))
            .unwrap_or_default();
        return Err(Error::Validation { field, message });
    }
    Ok(ProjectFormData {
        name: name.to_string(),
        description: description.to_string(),
        color: color.to_string(),
    })
}
