//! td stats command: aggregate statistics over the task collection.

use std::path::PathBuf;

use crate::analytics;
use crate::error::Result;
use crate::output::{emit_success, HumanOutput, OutputOptions};
use crate::store::TaskStore;

pub struct StatsOptions {
    pub data_dir: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

pub fn run(opts: StatsOptions) -> Result<()> {
    let (_config, storage) = super::open_context(opts.data_dir.as_deref())?;
    let store = TaskStore::open(storage);

    let summary = analytics::summarize(store.tasks());

    let mut human = HumanOutput::new("td stats");
    human.push_summary("total", summary.total.to_string());
    human.push_summary("completed", summary.completed.to_string());
    human.push_summary("pending", summary.pending.to_string());
    human.push_summary("overdue", summary.overdue.to_string());
    human.push_summary(
        "completion rate",
        format!("{:.0}%", summary.completion_rate),
    );
    for entry in &summary.by_priority {
        human.push_detail(format!("{}: {}", entry.priority, entry.count));
    }
    for stat in &summary.by_category {
        human.push_detail(format!(
            "{}: {}/{} done",
            stat.category, stat.completed, stat.total
        ));
    }

    emit_success(
        OutputOptions {
            json: opts.json,
            quiet: opts.quiet,
        },
        "stats",
        &summary,
        Some(&human),
    )
}
