//! Remote reconciliation: key snapshots, actions, and the diff.

use std::collections::BTreeSet;
use std::path::PathBuf;

use serde::Serialize;

use longshore_core::types::{Acl, Candidate};

// ---------------------------------------------------------------------------
// Actions
// ---------------------------------------------------------------------------

/// One reconciliation decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum Action {
    /// Push a local file to the store.
    Upload {
        key: String,
        path: PathBuf,
        size: u64,
        acl: Acl,
    },
    /// Leave a key alone; it already exists remotely.
    Skip { key: String },
    /// Remove a remote key with no surviving local counterpart.
    Delete { key: String },
}

impl Action {
    pub fn key(&self) -> &str {
        match self {
            Action::Upload { key, .. } | Action::Skip { key } | Action::Delete { key } => key,
        }
    }

    /// The candidate behind an upload decision.
    pub fn as_upload(&self) -> Option<Candidate> {
        match self {
            Action::Upload {
                key,
                path,
                size,
                acl,
            } => Some(Candidate {
                key: key.clone(),
                path: path.clone(),
                size: *size,
                acl: *acl,
            }),
            _ => None,
        }
    }

    fn rank(&self) -> u8 {
        match self {
            Action::Upload { .. } => 0,
            Action::Skip { .. } => 1,
            Action::Delete { .. } => 2,
        }
    }
}

// ---------------------------------------------------------------------------
// Remote snapshot
// ---------------------------------------------------------------------------

/// Keys already present in the store, relative to the resolved prefix.
///
/// Fetched at most once per run; only ever used as a lookup set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemoteSnapshot {
    keys: BTreeSet<String>,
}

impl RemoteSnapshot {
    /// Build from a store listing of full keys. Entries outside `prefix`
    /// are ignored; the prefix itself is stripped.
    pub fn from_listing(prefix: &str, full_keys: &[String]) -> Self {
        let keys = full_keys
            .iter()
            .filter_map(|key| key.strip_prefix(prefix))
            .filter(|key| !key.is_empty())
            .map(str::to_owned)
            .collect();
        Self { keys }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.keys.contains(key)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &String> {
        self.keys.iter()
    }
}

// ---------------------------------------------------------------------------
// Reconcile
// ---------------------------------------------------------------------------

/// Diff surviving candidates against the remote snapshot.
///
/// With `exists_in_remote`, candidates whose keys are already present
/// become skips instead of uploads. With `bijection`, remote keys absent
/// from the candidate set become deletes — but never when no candidate
/// survived, so an empty build can never empty the store.
///
/// The result is ordered: uploads, then skips, then deletes, each group
/// sorted by key.
pub fn reconcile(
    candidates: Vec<Candidate>,
    remote: &RemoteSnapshot,
    exists_in_remote: bool,
    bijection: bool,
) -> Vec<Action> {
    let mut actions = Vec::with_capacity(candidates.len());
    let mut local_keys = BTreeSet::new();
    for candidate in candidates {
        local_keys.insert(candidate.key.clone());
        if exists_in_remote && remote.contains(&candidate.key) {
            actions.push(Action::Skip { key: candidate.key });
        } else {
            actions.push(Action::Upload {
                key: candidate.key,
                path: candidate.path,
                size: candidate.size,
                acl: candidate.acl,
            });
        }
    }

    if bijection && !local_keys.is_empty() {
        for key in remote.iter() {
            if !local_keys.contains(key) {
                actions.push(Action::Delete { key: key.clone() });
            }
        }
    }

    actions.sort_by(|a, b| a.rank().cmp(&b.rank()).then_with(|| a.key().cmp(b.key())));
    actions
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
