//! Domain types for the longshore sync pipeline.
//!
//! All path fields use `PathBuf`; never `&str` or `String` for filesystem paths.
//! All types are serializable/deserializable via serde + serde_yaml.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Access classification an uploaded object carries at the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Acl {
    #[default]
    Private,
    PublicRead,
    PublicReadWrite,
}

impl fmt::Display for Acl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Acl::Private => write!(f, "private"),
            Acl::PublicRead => write!(f, "public-read"),
            Acl::PublicReadWrite => write!(f, "public-read-write"),
        }
    }
}

impl FromStr for Acl {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "private" => Ok(Acl::Private),
            "public-read" => Ok(Acl::PublicRead),
            "public-read-write" => Ok(Acl::PublicReadWrite),
            other => Err(format!(
                "unknown acl '{other}'; expected: private, public-read, public-read-write"
            )),
        }
    }
}

// ---------------------------------------------------------------------------
// Size intervals
// ---------------------------------------------------------------------------

/// Inclusive byte-size interval used by size-based exclusion.
///
/// Serialized as a two-element sequence, e.g. `[0, 1000]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeRange(pub u64, pub u64);

impl SizeRange {
    /// Whether `size` falls inside the interval. Both bounds are inclusive.
    pub fn contains(&self, size: u64) -> bool {
        size >= self.0 && size <= self.1
    }
}

impl fmt::Display for SizeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.0, self.1)
    }
}

// ---------------------------------------------------------------------------
// Candidates
// ---------------------------------------------------------------------------

/// A local build artifact selected for reconciliation.
///
/// Created by enumeration and rebuilt by each pipeline stage; no stage
/// mutates a sequence in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    /// Store key relative to the resolved prefix, forward slashes only.
    pub key: String,
    /// Absolute path of the file on disk.
    pub path: PathBuf,
    /// Byte size recorded by the stat pass (zero until statted).
    pub size: u64,
    pub acl: Acl,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
