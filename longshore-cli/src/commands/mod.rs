//! Subcommand implementations and the shared console plumbing.

pub mod init;
pub mod plan;
pub mod sync;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use colored::Colorize;

use longshore_core::report::{ReportLevel, Reporter};
use longshore_core::ConfigFile;
use longshore_store::DirStore;

/// Default config file name inside a project directory.
pub const CONFIG_FILE: &str = "longshore.yaml";

/// Resolve the project root and load its config.
///
/// `config` overrides the default `<dir>/longshore.yaml` location.
pub(crate) fn load_project(dir: &Path, config: Option<PathBuf>) -> Result<(PathBuf, ConfigFile)> {
    let root = dir
        .canonicalize()
        .with_context(|| format!("cannot resolve path '{}'", dir.display()))?;
    let config_path = config.unwrap_or_else(|| root.join(CONFIG_FILE));
    let config = ConfigFile::load_at(&config_path)
        .with_context(|| format!("failed to load '{}'", config_path.display()))?;
    Ok((root, config))
}

/// The configured directory store, when `mirror.dir` is set.
pub(crate) fn open_mirror(root: &Path, config: &ConfigFile) -> Option<DirStore> {
    config
        .mirror
        .as_ref()
        .map(|mirror| DirStore::new(root.join(&mirror.dir)))
}

// ---------------------------------------------------------------------------
// Console reporter
// ---------------------------------------------------------------------------

/// Colored console sink for pipeline report lines.
pub(crate) struct ConsoleReporter {
    pub verbose: bool,
}

impl Reporter for ConsoleReporter {
    fn report(&self, level: ReportLevel, message: &str) {
        match level {
            ReportLevel::Success => println!("{} {message}", "✓".green().bold()),
            ReportLevel::Info => println!("  {message}"),
            ReportLevel::Debug => {
                if self.verbose {
                    println!("  {}", message.bright_black());
                }
            }
            ReportLevel::Error => eprintln!("{} {message}", "✗".red().bold()),
        }
    }
}
