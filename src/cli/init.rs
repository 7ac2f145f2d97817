//! td init command implementation
//!
//! Creates the data directory and default config, optionally seeding
//! demo data.

use std::path::PathBuf;

use crate::config::Config;
use crate::error::Result;
use crate::output::{emit_success, HumanOutput, OutputOptions};
use crate::sample;
use crate::store::TaskStore;

pub struct InitOptions {
    pub sample: bool,
    pub data_dir: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

#[derive(serde::Serialize)]
struct InitReport {
    data_dir: PathBuf,
    created_config: bool,
    seeded: bool,
}

pub fn run(opts: InitOptions) -> Result<()> {
    let (config, storage) = super::open_context(opts.data_dir.as_deref())?;

    std::fs::create_dir_all(storage.data_dir())?;

    let config_path = storage.data_dir().join("taskdeck.toml");
    let created_config = if config_path.exists() {
        false
    } else {
        config.save(&config_path)?;
        true
    };

    let seeded = if opts.sample {
        let mut store = TaskStore::open(storage.clone());
        sample::seed_if_empty(&mut store)
    } else {
        false
    };

    let report = InitReport {
        data_dir: storage.data_dir().to_path_buf(),
        created_config,
        seeded,
    };

    let header = if created_config || seeded {
        "td init: initialized data directory"
    } else {
        "td init: nothing to do"
    };
    let mut human = HumanOutput::new(header);
    human.push_summary("data dir", report.data_dir.display().to_string());
    human.push_summary(
        "config",
        if created_config { "created" } else { "kept" }.to_string(),
    );
    if opts.sample && !seeded {
        human.push_warning("store already has tasks, sample seed skipped".to_string());
    }
    human.push_next_step("td task add <title> --category <name>".to_string());
    human.push_next_step("td task list".to_string());

    emit_success(
        OutputOptions {
            json: opts.json,
            quiet: opts.quiet,
        },
        "init",
        &report,
        Some(&human),
    )
}
