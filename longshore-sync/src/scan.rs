//! Build-output enumeration.

use std::path::Path;

use longshore_core::types::{Acl, Candidate};

use crate::error::{io_err, SyncError};

/// Subdirectory of the build output whose entries keep a key prefix.
pub const STATIC_SUBDIR: &str = "static";

/// Enumerate upload candidates: the immediate entries of the output
/// directory plus the immediate entries of its `static/` subdirectory,
/// keyed under `static/`. A missing `static/` subdirectory contributes
/// nothing; a missing output directory is an error.
///
/// Enumeration is deliberately shallow and keeps directory entries — the
/// stat pass is the one place non-regular files are dropped. Candidates
/// come back sorted by key, every one classified `private`.
pub fn scan_output_dir(output_dir: &Path) -> Result<Vec<Candidate>, SyncError> {
    let mut candidates = scan_dir(output_dir, "")?;
    let static_dir = output_dir.join(STATIC_SUBDIR);
    if static_dir.is_dir() {
        let static_prefix = format!("{STATIC_SUBDIR}/");
        candidates.extend(scan_dir(&static_dir, &static_prefix)?);
    }
    candidates.sort_by(|a, b| a.key.cmp(&b.key));
    tracing::debug!(
        "scanned {}: {} candidate(s)",
        output_dir.display(),
        candidates.len()
    );
    Ok(candidates)
}

/// List the immediate entries of `dir`, keys prefixed with `key_prefix`.
fn scan_dir(dir: &Path, key_prefix: &str) -> Result<Vec<Candidate>, SyncError> {
    let mut out = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(|e| io_err(dir, e))? {
        let entry = entry.map_err(|e| io_err(dir, e))?;
        let name = entry.file_name().to_string_lossy().into_owned();
        out.push(Candidate {
            key: format!("{key_prefix}{name}"),
            path: entry.path(),
            size: 0,
            acl: Acl::Private,
        });
    }
    Ok(out)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn keys(candidates: &[Candidate]) -> Vec<&str> {
        candidates.iter().map(|c| c.key.as_str()).collect()
    }

    #[test]
    fn scans_immediate_files_sorted_by_key() {
        let out = TempDir::new().expect("tempdir");
        fs::write(out.path().join("umi.js"), b"x").expect("write");
        fs::write(out.path().join("app.css"), b"y").expect("write");

        let candidates = scan_output_dir(out.path()).expect("scan");
        assert_eq!(keys(&candidates), vec!["app.css", "umi.js"]);
        assert!(candidates.iter().all(|c| c.acl == Acl::Private));
    }

    #[test]
    fn static_entries_are_key_prefixed() {
        let out = TempDir::new().expect("tempdir");
        fs::write(out.path().join("umi.js"), b"x").expect("write");
        fs::create_dir(out.path().join("static")).expect("mkdir");
        fs::write(out.path().join("static").join("logo.png"), b"p").expect("write");

        let candidates = scan_output_dir(out.path()).expect("scan");
        // The `static` directory itself is enumerated too; the stat pass
        // drops it later.
        assert_eq!(keys(&candidates), vec!["static", "static/logo.png", "umi.js"]);
    }

    #[test]
    fn missing_static_dir_contributes_nothing() {
        let out = TempDir::new().expect("tempdir");
        fs::write(out.path().join("umi.js"), b"x").expect("write");

        let candidates = scan_output_dir(out.path()).expect("scan");
        assert_eq!(keys(&candidates), vec!["umi.js"]);
    }

    #[test]
    fn nested_dirs_other_than_static_are_not_descended() {
        let out = TempDir::new().expect("tempdir");
        fs::create_dir(out.path().join("chunks")).expect("mkdir");
        fs::write(out.path().join("chunks").join("a.js"), b"x").expect("write");

        let candidates = scan_output_dir(out.path()).expect("scan");
        // Only the directory entry itself shows up, never its contents.
        assert_eq!(keys(&candidates), vec!["chunks"]);
    }

    #[test]
    fn missing_output_dir_is_an_error() {
        let out = TempDir::new().expect("tempdir");
        let err = scan_output_dir(&out.path().join("dist")).unwrap_err();
        assert!(matches!(err, SyncError::Io { .. }), "got: {err}");
        assert!(err.to_string().contains("dist"));
    }
}
