//! Command-line interface for td
//!
//! This module defines the CLI structure using clap derive macros.
//! Each subcommand is defined in its own submodule.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

use crate::config::Config;
use crate::error::Result;
use crate::storage::Storage;

mod auth;
mod data;
mod init;
mod project;
mod stats;
mod task;

/// td - taskdeck
///
/// A single-user task manager over a local JSON store: tasks, projects,
/// filtered views and aggregate stats, with a demo login.
#[derive(Parser, Debug)]
#[command(name = "td")]
#[command(author, version, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Data directory (defaults to the platform data dir)
    #[arg(long, global = true, env = "TASKDECK_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize the data directory and config
    Init {
        /// Seed demo tasks and projects (only into an empty store)
        #[arg(long)]
        sample: bool,
    },

    /// Log in with the demo auth (any well-formed credentials work)
    Login {
        /// Email address
        #[arg(long)]
        email: String,

        /// Password (at least 6 characters)
        #[arg(long)]
        password: String,
    },

    /// Register a demo account
    Register {
        /// Display name
        #[arg(long)]
        name: String,

        /// Email address
        #[arg(long)]
        email: String,

        /// Password (at least 6 characters)
        #[arg(long)]
        password: String,
    },

    /// Log out and drop the persisted session
    Logout,

    /// Show the current session
    Whoami,

    /// Task management
    #[command(subcommand)]
    Task(TaskCommands),

    /// Project management
    #[command(subcommand)]
    Project(ProjectCommands),

    /// Aggregate task statistics
    Stats,

    /// Export, import or wipe the stored data
    #[command(subcommand)]
    Data(DataCommands),
}

/// Task subcommands
#[derive(Subcommand, Debug)]
pub enum TaskCommands {
    /// Add a task
    Add {
        /// Task title (3 to 100 characters)
        title: String,

        /// Longer description (up to 500 characters)
        #[arg(short, long, default_value = "")]
        description: String,

        /// Priority: low, medium, high, urgent
        #[arg(short, long, default_value = "medium")]
        priority: String,

        /// Category (usually a project name)
        #[arg(short, long)]
        category: String,

        /// Due date (YYYY-MM-DD)
        #[arg(long)]
        due: Option<String>,

        /// Tags (repeatable)
        #[arg(short, long)]
        tag: Vec<String>,
    },

    /// List tasks through the filter and sort pipeline
    List {
        /// Status filter: all, pending, completed, overdue
        #[arg(long, default_value = "all")]
        status: String,

        /// Only tasks with this priority
        #[arg(short, long)]
        priority: Option<String>,

        /// Only tasks in this category
        #[arg(short, long)]
        category: Option<String>,

        /// Substring search over title, description and tags
        #[arg(short, long, default_value = "")]
        search: String,

        /// Sort field: title, priority, due, created
        #[arg(long, default_value = "created")]
        sort: String,

        /// Sort direction: asc, desc
        #[arg(long, default_value = "desc")]
        direction: String,
    },

    /// Edit a task's fields
    Edit {
        /// Task id (or unique prefix)
        id: String,

        /// New title
        #[arg(long)]
        title: Option<String>,

        /// New description
        #[arg(short, long)]
        description: Option<String>,

        /// New priority
        #[arg(short, long)]
        priority: Option<String>,

        /// New category
        #[arg(short, long)]
        category: Option<String>,

        /// New due date (YYYY-MM-DD, empty string clears it)
        #[arg(long)]
        due: Option<String>,

        /// Replace the tag set (repeatable)
        #[arg(short, long)]
        tag: Option<Vec<String>>,
    },

    /// Toggle a task's completed flag
    Done {
        /// Task id (or unique prefix)
        id: String,
    },

    /// Delete a task
    Delete {
        /// Task id (or unique prefix)
        id: String,
    },
}

/// Project subcommands
#[derive(Subcommand, Debug)]
pub enum ProjectCommands {
    /// Add a project
    Add {
        /// Project name (2 to 100 characters)
        name: String,

        /// Longer description
        #[arg(short, long, default_value = "")]
        description: String,

        /// Display color (hex)
        #[arg(long, default_value = "#3b82f6")]
        color: String,
    },

    /// List projects with per-project task stats
    List,

    /// Edit a project's fields
    Edit {
        /// Project id or exact name
        project: String,

        /// New name
        #[arg(long)]
        name: Option<String>,

        /// New description
        #[arg(short, long)]
        description: Option<String>,

        /// New color
        #[arg(long)]
        color: Option<String>,
    },

    /// Delete a project (tasks keep their category string)
    Delete {
        /// Project id or exact name
        project: String,
    },
}

/// Data subcommands
#[derive(Subcommand, Debug)]
pub enum DataCommands {
    /// Export tasks and projects as a JSON bundle
    Export {
        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Import a JSON bundle, replacing both collections
    Import {
        /// Bundle file to read
        input: PathBuf,
    },

    /// Delete every stored slot
    Clear {
        /// Confirm the wipe
        #[arg(long)]
        yes: bool,
    },
}

/// Resolve config and storage for a command invocation. An explicit
/// `--data-dir` wins over the config file's `storage.data_dir`, which
/// wins over the platform default.
pub(crate) fn open_context(data_dir: Option<&Path>) -> Result<(Config, Storage)> {
    let base = Config::default().resolve_data_dir(data_dir);
    let config = Config::load_from_dir(&base)?;
    let storage_dir = if data_dir.is_some() {
        base
    } else {
        config.resolve_data_dir(None)
    };
    Ok((config, Storage::new(storage_dir)))
}

impl Cli {
    /// Execute the CLI command
    pub fn run(self) -> Result<()> {
        let data_dir = self.data_dir;
        let json = self.json;
        let quiet = self.quiet;

        match self.command {
            Commands::Init { sample } => init::run(init::InitOptions {
                sample,
                data_dir,
                json,
                quiet,
            }),
            Commands::Login { email, password } => auth::run_login(auth::LoginOptions {
                email,
                password,
                data_dir,
                json,
                quiet,
            }),
            Commands::Register {
                name,
                email,
                password,
            } => auth::run_register(auth::RegisterOptions {
                name,
                email,
                password,
                data_dir,
                json,
                quiet,
            }),
            Commands::Logout => auth::run_logout(auth::LogoutOptions {
                data_dir,
                json,
                quiet,
            }),
            Commands::Whoami => auth::run_whoami(auth::WhoamiOptions {
                data_dir,
                json,
                quiet,
            }),
            Commands::Task(cmd) => match cmd {
                TaskCommands::Add {
                    title,
                    description,
                    priority,
                    category,
                    due,
                    tag,
                } => task::run_add(task::AddOptions {
                    title,
                    description,
                    priority,
                    category,
                    due,
                    tags: tag,
                    data_dir,
                    json,
                    quiet,
                }),
                TaskCommands::List {
                    status,
                    priority,
                    category,
                    search,
                    sort,
                    direction,
                } => task::run_list(task::ListOptions {
                    status,
                    priority,
                    category,
                    search,
                    sort,
                    direction,
                    data_dir,
                    json,
                    quiet,
                }),
                TaskCommands::Edit {
                    id,
                    title,
                    description,
                    priority,
                    category,
                    due,
                    tag,
                } => task::run_edit(task::EditOptions {
                    id,
                    title,
                    description,
                    priority,
                    category,
                    due,
                    tags: tag,
                    data_dir,
                    json,
                    quiet,
                }),
                TaskCommands::Done { id } => task::run_done(task::DoneOptions {
                    id,
                    data_dir,
                    json,
                    quiet,
                }),
                TaskCommands::Delete { id } => task::run_delete(task::DeleteOptions {
                    id,
                    data_dir,
                    json,
                    quiet,
                }),
            },
            Commands::Project(cmd) => match cmd {
                ProjectCommands::Add {
                    name,
                    description,
                    color,
                } => project::run_add(project::AddOptions {
                    name,
                    description,
                    color,
                    data_dir,
                    json,
                    quiet,
                }),
                ProjectCommands::List => project::run_list(project::ListOptions {
                    data_dir,
                    json,
                    quiet,
                }),
                ProjectCommands::Edit {
                    project: key,
                    name,
                    description,
                    color,
                } => project::run_edit(project::EditOptions {
                    key,
                    name,
                    description,
                    color,
                    data_dir,
                    json,
                    quiet,
                }),
                ProjectCommands::Delete { project: key } => {
                    project::run_delete(project::DeleteOptions {
                        key,
                        data_dir,
                        json,
                        quiet,
                    })
                }
            },
            Commands::Stats => stats::run(stats::StatsOptions {
                data_dir,
                json,
                quiet,
            }),
            Commands::Data(cmd) => match cmd {
                DataCommands::Export { output } => data::run_export(data::ExportOptions {
                    output,
                    data_dir,
                    json,
                    quiet,
                }),
                DataCommands::Import { input } => data::run_import(data::ImportOptions {
                    input,
                    data_dir,
                    json,
                    quiet,
                }),
                DataCommands::Clear { yes } => data::run_clear(data::ClearOptions {
                    yes,
                    data_dir,
                    json,
                    quiet,
                }),
            },
        }
    }
}
