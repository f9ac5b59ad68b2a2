//! Longshore — post-build asset synchronizer CLI.
//!
//! # Usage
//!
//! ```text
//! longshore init [dir]
//! longshore sync [dir] [--config <path>] [--dry-run] [--verbose]
//! longshore plan [dir] [--config <path>] [--json]
//! ```

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{init::InitArgs, plan::PlanArgs, sync::SyncArgs};

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "longshore",
    version,
    about = "Sync build output to an object store with per-file access control",
    long_about = None,
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Scaffold a starter longshore.yaml in a project directory.
    Init(InitArgs),

    /// Filter, classify, and push build output to the configured store.
    Sync(SyncArgs),

    /// Show the action list a sync would produce, without executing it.
    Plan(PlanArgs),
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    match cli.command {
        Commands::Init(args) => args.run(),
        Commands::Sync(args) => args.run(),
        Commands::Plan(args) => args.run(),
    }
}
