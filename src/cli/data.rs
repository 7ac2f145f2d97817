//! td data commands: export, import, clear.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::output::{emit_success, HumanOutput, OutputOptions, SCHEMA_VERSION};
use crate::project::Project;
use crate::store::TaskStore;
use crate::task::Task;

/// Portable snapshot of both collections.
#[derive(Debug, Serialize, Deserialize)]
pub struct ExportBundle {
    pub schema_version: String,
    pub exported_at: DateTime<Utc>,
    pub tasks: Vec<Task>,
    pub projects: Vec<Project>,
}

pub struct ExportOptions {
    pub output: Option<PathBuf>,
    pub data_dir: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

#[derive(Serialize)]
struct ExportReport {
    tasks: usize,
    projects: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    path: Option<PathBuf>,
}

pub fn run_export(opts: ExportOptions) -> Result<()> {
    let (_config, storage) = super::open_context(opts.data_dir.as_deref())?;
    let store = TaskStore::open(storage);

    let bundle = ExportBundle {
        schema_version: SCHEMA_VERSION.to_string(),
        exported_at: Utc::now(),
        tasks: store.tasks().to_vec(),
        projects: store.projects().to_vec(),
    };
    let serialized = serde_json::to_string_pretty(&bundle)?;

    match &opts.output {
        Some(path) => std::fs::write(path, &serialized)?,
        None => {
            // The bundle itself goes to stdout; no envelope around it.
            println!("{serialized}");
            return Ok(());
        }
    }

    let report = ExportReport {
        tasks: bundle.tasks.len(),
        projects: bundle.projects.len(),
        path: opts.output.clone(),
    };
    let mut human = HumanOutput::new("td data export: wrote bundle");
    human.push_summary("tasks", report.tasks.to_string());
    human.push_summary("projects", report.projects.to_string());
    if let Some(path) = &report.path {
        human.push_summary("path", path.display().to_string());
    }

    emit_success(
        OutputOptions {
            json: opts.json,
            quiet: opts.quiet,
        },
        "data export",
        &report,
        Some(&human),
    )
}

pub struct ImportOptions {
    pub input: PathBuf,
    pub data_dir: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

#[derive(Serialize)]
struct ImportReport {
    tasks: usize,
    projects: usize,
}

pub fn run_import(opts: ImportOptions) -> Result<()> {
    let (_config, storage) = super::open_context(opts.data_dir.as_deref())?;
    let mut store = TaskStore::open(storage);

    let content = std::fs::read_to_string(&opts.input)?;
    let bundle: ExportBundle = serde_json::from_str(&content).map_err(|err| {
        Error::OperationFailed(format!(
            "{} is not a valid export bundle: {err}",
            opts.input.display()
        ))
    })?;

    let report = ImportReport {
        tasks: bundle.tasks.len(),
        projects: bundle.projects.len(),
    };
    store.replace_all_tasks(bundle.tasks);
    store.replace_all_projects(bundle.projects);

    let mut human = HumanOutput::new("td data import: replaced both collections");
    human.push_summary("tasks", report.tasks.to_string());
    human.push_summary("projects", report.projects.to_string());
    human.push_next_step("td task list".to_string());

    emit_success(
        OutputOptions {
            json: opts.json,
            quiet: opts.quiet,
        },
        "data import",
        &report,
        Some(&human),
    )
}

pub struct ClearOptions {
    pub yes: bool,
    pub data_dir: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

#[derive(Serialize)]
struct ClearReport {
    cleared: bool,
}

pub fn run_clear(opts: ClearOptions) -> Result<()> {
    if !opts.yes {
        return Err(Error::InvalidArgument(
            "td data clear wipes all slots, pass --yes to confirm".to_string(),
        ));
    }

    let (_config, storage) = super::open_context(opts.data_dir.as_deref())?;
    storage.clear();

    let human = HumanOutput::new("td data clear: all slots removed");

    emit_success(
        OutputOptions {
            json: opts.json,
            quiet: opts.quiet,
        },
        "data clear",
        &ClearReport { cleared: true },
        Some(&human),
    )
}
