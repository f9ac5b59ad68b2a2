//! Local directory mirror store.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use walkdir::WalkDir;

use longshore_core::report::Reporter;
use longshore_core::types::{Acl, Candidate};

use crate::error::{io_err, StoreError};
use crate::ObjectStore;

/// [`ObjectStore`] that mirrors objects into a directory tree.
///
/// Objects land at `<root>/<prefix><key>`; listing walks the tree and
/// returns forward-slash keys relative to the root. On Unix the
/// classification maps to the file mode:
///
/// - `private` → `0600`
/// - `public-read` → `0644`
/// - `public-read-write` → `0666`
#[derive(Debug, Clone)]
pub struct DirStore {
    root: PathBuf,
}

impl DirStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// `<root>/<full_key>`, ignoring empty segments so a stray leading or
    /// doubled slash cannot escape the root.
    fn object_path(&self, full_key: &str) -> PathBuf {
        full_key
            .split('/')
            .filter(|segment| !segment.is_empty())
            .fold(self.root.clone(), |path, segment| path.join(segment))
    }
}

impl ObjectStore for DirStore {
    fn name(&self) -> &str {
        "dir"
    }

    fn list(&self, prefix: &str) -> Result<Vec<String>, StoreError> {
        if !self.root.exists() {
            return Ok(vec![]);
        }
        let mut keys = Vec::new();
        for entry in WalkDir::new(&self.root) {
            let entry = entry.map_err(|e| io_err(&self.root, std::io::Error::from(e)))?;
            if !entry.file_type().is_file() {
                continue;
            }
            let rel = entry
                .path()
                .strip_prefix(&self.root)
                .unwrap_or(entry.path());
            let key = rel.to_string_lossy().replace('\\', "/");
            if key.starts_with(prefix) {
                keys.push(key);
            }
        }
        keys.sort();
        Ok(keys)
    }

    fn upload(
        &self,
        prefix: &str,
        batch: &[Candidate],
        reporter: &dyn Reporter,
    ) -> Result<Duration, StoreError> {
        let started = Instant::now();
        for candidate in batch {
            let bytes = std::fs::read(&candidate.path).map_err(|e| io_err(&candidate.path, e))?;
            let dest = self.object_path(&format!("{prefix}{}", candidate.key));
            if let Some(parent) = dest.parent() {
                std::fs::create_dir_all(parent).map_err(|e| io_err(parent, e))?;
            }
            std::fs::write(&dest, bytes).map_err(|e| io_err(&dest, e))?;
            set_acl_mode(&dest, candidate.acl)?;
            reporter.debug(&format!("stored {} ({})", dest.display(), candidate.acl));
        }
        Ok(started.elapsed())
    }

    fn delete(&self, prefix: &str, keys: &[String]) -> Result<(), StoreError> {
        for key in keys {
            let path = self.object_path(&format!("{prefix}{key}"));
            match std::fs::remove_file(&path) {
                Ok(()) => {}
                // Deleting a key that is already gone is a no-op.
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => return Err(io_err(&path, e)),
            }
        }
        Ok(())
    }
}

#[cfg(unix)]
fn set_acl_mode(path: &Path, acl: Acl) -> Result<(), StoreError> {
    use std::os::unix::fs::PermissionsExt;
    let mode = match acl {
        Acl::Private => 0o600,
        Acl::PublicRead => 0o644,
        Acl::PublicReadWrite => 0o666,
    };
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(mode))
        .map_err(|e| io_err(path, e))?;
    Ok(())
}
#[cfg(not(unix))]
fn set_acl_mode(_path: &Path, _acl: Acl) -> Result<(), StoreError> {
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
