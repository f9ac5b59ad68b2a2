//! Error types for longshore-sync.

use std::path::PathBuf;

use thiserror::Error;

use longshore_store::StoreError;

/// All errors that can arise from a sync run.
///
/// Configuration problems are deliberately *not* here: the pipeline reports
/// them and returns a rejected outcome instead of erroring.
#[derive(Debug, Error)]
pub enum SyncError {
    /// An error from the storage transport.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// An I/O error, with annotated path for context.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience constructor for [`SyncError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> SyncError {
    SyncError::Io {
        path: path.into(),
        source,
    }
}
