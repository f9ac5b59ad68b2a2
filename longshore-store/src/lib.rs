//! # longshore-store
//!
//! Storage seam for the sync pipeline: the [`ObjectStore`] trait plus two
//! local reference implementations.
//!
//! The reconciliation engine only decides *what* to tell a store; everything
//! provider-specific (networking, auth, retries) lives behind this trait.
//! [`DirStore`] mirrors objects into a directory, [`MemoryStore`] holds them
//! in a map for tests and embedding hosts.

pub mod dir;
pub mod error;
pub mod memory;

use std::time::Duration;

use longshore_core::report::Reporter;
use longshore_core::types::Candidate;

pub use dir::DirStore;
pub use error::StoreError;
pub use memory::{MemoryStore, StoredObject};

/// Transport boundary the reconciliation pipeline drives.
///
/// Keys in [`list`](ObjectStore::list) results are full keys (prefix
/// included); keys handed to [`delete`](ObjectStore::delete) are relative
/// to the prefix, matching candidate keys.
pub trait ObjectStore {
    /// Short name for report lines (`"dir"`, `"memory"`, ...).
    fn name(&self) -> &str;

    /// Full keys currently stored under `prefix`, sorted.
    fn list(&self, prefix: &str) -> Result<Vec<String>, StoreError>;

    /// Store every candidate under `prefix`, in order, reporting per-file
    /// progress at debug level. Returns wall-clock time spent.
    fn upload(
        &self,
        prefix: &str,
        batch: &[Candidate],
        reporter: &dyn Reporter,
    ) -> Result<Duration, StoreError>;

    /// Remove prefix-relative `keys`. Keys already absent are not an error.
    fn delete(&self, prefix: &str, keys: &[String]) -> Result<(), StoreError>;
}
