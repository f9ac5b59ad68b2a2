//! `longshore init [dir]` — scaffold a starter config.

use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;

use super::CONFIG_FILE;

const STARTER_CONFIG: &str = r#"# Longshore configuration.
site:
  # Public base URL the built assets are served from. With no explicit
  # bucket below, the storage endpoint is derived from its host and the
  # key prefix from its path.
  public_path: https://cdn.example.com/assets
  # Build output directory, relative to this file.
  output_dir: dist

sync:
  # Explicit target; uncomment to override virtual-host addressing.
  # bucket:
  #   name: my-bucket
  #   region: my-region
  # Uniform classification, or a rule mapping:
  #   acl:
  #     public_read: '\.js$'
  #     private: [vendor.js]
  acl: private
  # Delete remote keys with no local counterpart.
  bijection: false
  ignore:
    extensions: ['.html', '.htm']
    exists_in_remote: false
    # size_between: [[0, 1000]]

# Mirror objects into a local directory instead of a provider store.
# mirror:
#   dir: ./mirror
"#;

/// Arguments for `longshore init`.
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Project directory to scaffold into.
    #[arg(default_value = ".")]
    pub dir: PathBuf,
}

impl InitArgs {
    pub fn run(self) -> Result<()> {
        let root = self
            .dir
            .canonicalize()
            .with_context(|| format!("cannot resolve path '{}'", self.dir.display()))?;
        let path = root.join(CONFIG_FILE);
        if path.exists() {
            bail!("'{}' already exists; not overwriting", path.display());
        }
        fs::write(&path, STARTER_CONFIG)
            .with_context(|| format!("failed to write '{}'", path.display()))?;
        println!("✓ Wrote {}", path.display());
        println!("  Edit it, then run `longshore plan` to preview a sync.");
        Ok(())
    }
}
