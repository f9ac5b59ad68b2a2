//! `longshore plan` — preview the action list as a table or JSON.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;
use colored::Colorize;
use tabled::{settings::Style, Table, Tabled};

use longshore_core::report::MemoryReporter;
use longshore_store::{MemoryStore, ObjectStore};
use longshore_sync::{pipeline, Action, RunOutcome};

/// Arguments for `longshore plan`.
#[derive(Args, Debug)]
pub struct PlanArgs {
    /// Project directory (defaults to the current directory).
    #[arg(default_value = ".")]
    pub dir: PathBuf,

    /// Config file path (defaults to <dir>/longshore.yaml).
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,

    /// Emit machine-readable JSON.
    #[arg(long)]
    pub json: bool,
}

#[derive(Tabled)]
struct PlanTableRow {
    #[tabled(rename = "action")]
    action: String,
    #[tabled(rename = "key")]
    key: String,
    #[tabled(rename = "acl")]
    acl: String,
    #[tabled(rename = "size")]
    size: String,
}

impl PlanArgs {
    pub fn run(self) -> Result<()> {
        let (root, config) = super::load_project(&self.dir, self.config)?;

        // A plan is always a dry run; the reporter output is replaced by
        // the table/JSON view, so collect it silently.
        let mirror = super::open_mirror(&root, &config);
        let memory;
        let store: &dyn ObjectStore = match &mirror {
            Some(dir_store) => dir_store,
            None => {
                memory = MemoryStore::new();
                &memory
            }
        };
        let reporter = MemoryReporter::new();
        let outcome =
            pipeline::run(&root, &config, store, &reporter, true).context("plan failed")?;

        if let RunOutcome::ConfigRejected { reason } = &outcome {
            bail!("configuration rejected: {reason}");
        }

        if self.json {
            println!(
                "{}",
                serde_json::to_string_pretty(outcome.actions())
                    .context("failed to serialize plan JSON")?
            );
            return Ok(());
        }

        let plan = longshore_core::plan::resolve(&config.sync, &config.site)
            .context("failed to resolve plan")?;
        print_table(&plan.target(), &plan.prefix, outcome.actions());
        Ok(())
    }
}

fn print_table(target: &str, prefix: &str, actions: &[Action]) {
    println!("Longshore v{} | target {target}/{prefix}", env!("CARGO_PKG_VERSION"));
    if actions.is_empty() {
        println!("Nothing to upload.");
        return;
    }

    let rows: Vec<PlanTableRow> = actions
        .iter()
        .map(|action| match action {
            Action::Upload {
                key, size, acl, ..
            } => PlanTableRow {
                action: "upload".green().to_string(),
                key: key.clone(),
                acl: acl.to_string(),
                size: size.to_string(),
            },
            Action::Skip { key } => PlanTableRow {
                action: "skip".bright_black().to_string(),
                key: key.clone(),
                acl: String::new(),
                size: String::new(),
            },
            Action::Delete { key } => PlanTableRow {
                action: "delete".red().to_string(),
                key: key.clone(),
                acl: String::new(),
                size: String::new(),
            },
        })
        .collect();
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{table}");
}
