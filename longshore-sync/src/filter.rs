//! Candidate exclusion stages.
//!
//! Two passes, in pipeline order:
//! 1. extension exclusion — works on keys alone, runs before any stat call;
//! 2. stat exclusion — drops non-regular files, applies size intervals, and
//!    records sizes on the survivors.
//!
//! Each stage consumes its input sequence and builds a new one.

use longshore_core::types::{Candidate, SizeRange};

use crate::error::{io_err, SyncError};

/// Drop candidates whose key extension is in `extensions` (dot-prefixed,
/// e.g. `".html"`). An empty list excludes nothing.
pub fn exclude_extensions(candidates: Vec<Candidate>, extensions: &[String]) -> Vec<Candidate> {
    if extensions.is_empty() {
        return candidates;
    }
    candidates
        .into_iter()
        .filter(|candidate| {
            let ext = key_extension(&candidate.key);
            !extensions.iter().any(|excluded| *excluded == ext)
        })
        .collect()
}

/// Stat every candidate: drop non-regular files, drop files whose size
/// falls inside any interval (bounds inclusive), record sizes on the rest.
pub fn exclude_by_stat(
    candidates: Vec<Candidate>,
    size_between: &[SizeRange],
) -> Result<Vec<Candidate>, SyncError> {
    let mut survivors = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        let meta = std::fs::metadata(&candidate.path).map_err(|e| io_err(&candidate.path, e))?;
        if !meta.is_file() {
            continue;
        }
        let size = meta.len();
        if size_between.iter().any(|range| range.contains(size)) {
            tracing::debug!("excluded by size ({size} bytes): {}", candidate.key);
            continue;
        }
        survivors.push(Candidate { size, ..candidate });
    }
    Ok(survivors)
}

/// The `.ext` of the final segment of `key`, `""` when there is none.
/// Dotfiles have no extension; a trailing dot is one.
fn key_extension(key: &str) -> String {
    let name = key.rsplit('/').next().unwrap_or(key);
    match name.rfind('.') {
        Some(idx) if idx > 0 => name[idx..].to_string(),
        _ => String::new(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
