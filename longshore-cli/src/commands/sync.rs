//! `longshore sync` — run the pipeline and execute the action list.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;

use longshore_store::{MemoryStore, ObjectStore};
use longshore_sync::{pipeline, Action, RunOutcome};

use super::ConsoleReporter;

/// Arguments for `longshore sync`.
#[derive(Args, Debug)]
pub struct SyncArgs {
    /// Project directory (defaults to the current directory).
    #[arg(default_value = ".")]
    pub dir: PathBuf,

    /// Config file path (defaults to <dir>/longshore.yaml).
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,

    /// Report the action list without executing anything.
    #[arg(long)]
    pub dry_run: bool,

    /// Also print debug-level report lines.
    #[arg(long, short = 'v')]
    pub verbose: bool,
}

impl SyncArgs {
    pub fn run(self) -> Result<()> {
        let (root, config) = super::load_project(&self.dir, self.config)?;
        let reporter = ConsoleReporter {
            verbose: self.verbose,
        };

        // Without a configured mirror there is nothing to execute against;
        // a dry run still works because nothing touches the store.
        let mirror = super::open_mirror(&root, &config);
        let memory;
        let store: &dyn ObjectStore = match &mirror {
            Some(dir_store) => dir_store,
            None if self.dry_run => {
                memory = MemoryStore::new();
                &memory
            }
            None => bail!(
                "no mirror.dir configured and no provider store is built in; \
                 use --dry-run to preview, or configure `mirror.dir`"
            ),
        };

        let outcome = pipeline::run(&root, &config, store, &reporter, self.dry_run)
            .context("sync failed")?;
        print_summary(&outcome, self.dry_run);

        if matches!(outcome, RunOutcome::ConfigRejected { .. }) {
            bail!("configuration rejected");
        }
        Ok(())
    }
}

fn print_summary(outcome: &RunOutcome, dry_run: bool) {
    let prefix = if dry_run { "[dry-run] " } else { "" };
    match outcome {
        // The reporter already printed the error line.
        RunOutcome::ConfigRejected { .. } => {}
        RunOutcome::NothingToUpload => println!("{prefix}✓ nothing to do"),
        RunOutcome::DryRun { actions } | RunOutcome::Completed { actions, .. } => {
            let count = |want: fn(&Action) -> bool| actions.iter().filter(|a| want(a)).count();
            println!(
                "{prefix}✓ synced ({} uploaded, {} skipped, {} deleted)",
                count(|a| matches!(a, Action::Upload { .. })),
                count(|a| matches!(a, Action::Skip { .. })),
                count(|a| matches!(a, Action::Delete { .. })),
            );
        }
    }
}
