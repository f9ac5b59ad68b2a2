//! Canonical sync entrypoint used by the CLI and embedding hosts.
//!
//! One run is a straight line through the stages:
//!
//! 1. resolve the plan from raw options (rejection is an outcome, not an
//!    error);
//! 2. scan the output directory;
//! 3. exclude by extension, then by stat (non-regular files, size intervals);
//! 4. assign ACLs;
//! 5. fetch the remote snapshot when the plan needs it;
//! 6. reconcile into an ordered action list;
//! 7. execute against the store, unless dry-running.

use std::path::Path;
use std::time::Duration;

use longshore_core::options::ConfigFile;
use longshore_core::plan::{self, SyncPlan};
use longshore_core::report::Reporter;
use longshore_store::ObjectStore;

use crate::classify::assign_acl;
use crate::engine::{reconcile, Action, RemoteSnapshot};
use crate::error::SyncError;
use crate::filter::{exclude_by_stat, exclude_extensions};
use crate::scan::scan_output_dir;

// ---------------------------------------------------------------------------
// Run outcome
// ---------------------------------------------------------------------------

/// How a run ended.
///
/// Configuration rejection and the empty candidate set are outcomes rather
/// than errors: the run reported them and stopped, nothing went wrong at the
/// I/O level. Store and filesystem failures surface as [`SyncError`] instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// The options could not be resolved into a plan. Nothing was scanned,
    /// nothing was executed.
    ConfigRejected { reason: String },
    /// No candidate survived filtering. Nothing was executed — with
    /// bijection enabled this also means no deletions (see DESIGN.md).
    NothingToUpload,
    /// Dry run: the action list was produced and reported, nothing executed.
    DryRun { actions: Vec<Action> },
    /// The action list was executed against the store.
    Completed {
        actions: Vec<Action>,
        elapsed: Duration,
    },
}

impl RunOutcome {
    /// The action list this run produced, empty for rejected/empty runs.
    pub fn actions(&self) -> &[Action] {
        match self {
            RunOutcome::DryRun { actions } | RunOutcome::Completed { actions, .. } => actions,
            _ => &[],
        }
    }
}

// ---------------------------------------------------------------------------
// Run
// ---------------------------------------------------------------------------

/// Run the full pipeline for a project rooted at `root`.
///
/// The output directory is `root` joined with `config.site.output_dir`.
/// Every user-facing line goes through `reporter`; the pipeline itself never
/// prints.
pub fn run(
    root: &Path,
    config: &ConfigFile,
    store: &dyn ObjectStore,
    reporter: &dyn Reporter,
    dry_run: bool,
) -> Result<RunOutcome, SyncError> {
    let plan = match plan::resolve(&config.sync, &config.site) {
        Ok(plan) => plan,
        Err(e) => {
            reporter.error(&e.to_string());
            return Ok(RunOutcome::ConfigRejected {
                reason: e.to_string(),
            });
        }
    };

    let output_dir = root.join(&config.site.output_dir);
    let candidates = scan_output_dir(&output_dir)?;
    let candidates = exclude_extensions(candidates, &plan.extensions);
    let candidates = exclude_by_stat(candidates, &plan.size_between)?;
    let candidates = assign_acl(candidates, &plan.acl);

    if candidates.is_empty() {
        // An empty build output is a successful run, not a failure.
        reporter.success("nothing to upload");
        return Ok(RunOutcome::NothingToUpload);
    }

    let remote = if plan.needs_remote() {
        let listing = store.list(&plan.prefix)?;
        RemoteSnapshot::from_listing(&plan.prefix, &listing)
    } else {
        RemoteSnapshot::default()
    };

    let actions = reconcile(candidates, &remote, plan.exists_in_remote, plan.bijection);
    report_actions(&plan, &actions, reporter);

    if dry_run {
        reporter.info("dry run, nothing executed");
        return Ok(RunOutcome::DryRun { actions });
    }

    let uploads: Vec<_> = actions.iter().filter_map(Action::as_upload).collect();
    let elapsed = store.upload(&plan.prefix, &uploads, reporter)?;

    let deletes: Vec<String> = actions
        .iter()
        .filter_map(|action| match action {
            Action::Delete { key } => Some(key.clone()),
            _ => None,
        })
        .collect();
    if !deletes.is_empty() {
        store.delete(&plan.prefix, &deletes)?;
        reporter.info(&format!("deleted {} orphaned key(s)", deletes.len()));
    }

    reporter.success(&format!(
        "uploaded {} file(s) in {:.2}s",
        uploads.len(),
        elapsed.as_secs_f64()
    ));
    Ok(RunOutcome::Completed { actions, elapsed })
}

/// One line per decision, plus the target header.
fn report_actions(plan: &SyncPlan, actions: &[Action], reporter: &dyn Reporter) {
    let uploads = actions
        .iter()
        .filter(|a| matches!(a, Action::Upload { .. }))
        .count();
    reporter.info(&format!(
        "syncing {uploads} file(s) to {}/{}",
        plan.target(),
        plan.prefix
    ));
    for action in actions {
        match action {
            Action::Upload { key, acl, .. } => reporter.info(&format!("{key}: {acl}")),
            Action::Skip { key } => reporter.debug(&format!("{key}: already in remote, skipped")),
            Action::Delete { key } => reporter.debug(&format!("{key}: orphaned, will delete")),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
