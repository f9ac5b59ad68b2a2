//! In-memory object store double.

use std::collections::BTreeMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use longshore_core::report::Reporter;
use longshore_core::types::{Acl, Candidate};

use crate::error::{io_err, StoreError};
use crate::ObjectStore;

/// An object held by [`MemoryStore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    pub bytes: Vec<u8>,
    pub acl: Acl,
}

/// [`ObjectStore`] backed by a map.
///
/// Backs tests and embedding hosts that want to inspect what a run stores
/// without touching a real backend. Can be pre-seeded to stand in for a
/// store with existing content.
#[derive(Debug, Default)]
pub struct MemoryStore {
    objects: Mutex<BTreeMap<String, StoredObject>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store already holding empty `private` objects at `keys` (full keys).
    pub fn seeded<I, K>(keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        let store = Self::new();
        for key in keys {
            store.put(key.into(), Vec::new(), Acl::Private);
        }
        store
    }

    /// Insert an object directly, bypassing the upload path.
    pub fn put(&self, key: String, bytes: Vec<u8>, acl: Acl) {
        self.lock().insert(key, StoredObject { bytes, acl });
    }

    /// The object at `key` (full key), if any.
    pub fn get(&self, key: &str) -> Option<StoredObject> {
        self.lock().get(key).cloned()
    }

    /// Every full key in the store, sorted.
    pub fn keys(&self) -> Vec<String> {
        self.lock().keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, BTreeMap<String, StoredObject>> {
        self.objects
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl ObjectStore for MemoryStore {
    fn name(&self) -> &str {
        "memory"
    }

    fn list(&self, prefix: &str) -> Result<Vec<String>, StoreError> {
        Ok(self
            .lock()
            .keys()
            .filter(|key| key.starts_with(prefix))
            .cloned()
            .collect())
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
            let key = format!("{prefix}{}", candidate.key);
            reporter.debug(&format!("stored {key} ({})", candidate.acl));
            self.lock().insert(
                key,
                StoredObject {
                    bytes,
                    acl: candidate.acl,
                },
            );
        }
        Ok(started.elapsed())
    }

    fn delete(&self, prefix: &str, keys: &[String]) -> Result<(), StoreError> {
        let mut objects = self.lock();
        for key in keys {
            objects.remove(&format!("{prefix}{key}"));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use longshore_core::report::MemoryReporter;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn candidate(dir: &TempDir, key: &str, contents: &[u8], acl: Acl) -> Candidate {
        let path: PathBuf = dir.path().join(key.replace('/', "_"));
        std::fs::write(&path, contents).expect("write");
        Candidate {
            key: key.to_string(),
            path,
            size: contents.len() as u64,
            acl,
        }
    }

    #[test]
    fn upload_records_bytes_and_acl_under_prefix() {
        let dir = TempDir::new().expect("tempdir");
        let store = MemoryStore::new();
        let reporter = MemoryReporter::new();
        let batch = vec![candidate(&dir, "umi.js", b"console.log(1)", Acl::PublicRead)];

        store.upload("assets/", &batch, &reporter).expect("upload");

        let object = store.get("assets/umi.js").expect("object");
        assert_eq!(object.bytes, b"console.log(1)");
        assert_eq!(object.acl, Acl::PublicRead);
        assert!(reporter.contains("assets/umi.js"));
    }

    #[test]
    fn upload_missing_file_is_an_io_error() {
        let store = MemoryStore::new();
        let reporter = MemoryReporter::new();
        let batch = vec![Candidate {
            key: "gone.js".to_string(),
            path: PathBuf::from("/nonexistent/gone.js"),
            size: 0,
            acl: Acl::Private,
        }];
        let err = store.upload("", &batch, &reporter).unwrap_err();
        assert!(matches!(err, StoreError::Io { .. }), "got: {err}");
    }

    #[test]
    fn list_filters_by_prefix() {
        let store = MemoryStore::seeded(["assets/a.js", "assets/b.js", "other/c.js"]);
        let keys = store.list("assets/").expect("list");
        assert_eq!(keys, vec!["assets/a.js".to_string(), "assets/b.js".to_string()]);

        let all = store.list("").expect("list all");
        assert_eq!(all.len(), 3);
    }

    #[test]
    fn delete_removes_and_ignores_missing() {
        let store = MemoryStore::seeded(["assets/a.js"]);
        store
            .delete("assets/", &["a.js".to_string(), "missing.js".to_string()])
            .expect("delete");
        assert!(store.is_empty());
    }
}
