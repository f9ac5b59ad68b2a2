//! Raw configuration surface, as written in `longshore.yaml`.
//!
//! # File layout
//!
//! ```text
//! site:
//!   public_path: https://cdn.example.com/assets
//!   output_dir: dist
//! sync:
//!   bucket: { name: my-bucket, region: my-region }
//!   acl: public-read            # or a rule mapping, see [`AclOption`]
//!   bijection: false
//!   ignore:
//!     extensions: ['.html', '.htm']
//!     exists_in_remote: false
//!     size_between: [[0, 1000]]
//! mirror:
//!   dir: ./mirror               # optional local directory store target
//! ```
//!
//! Everything here is the *raw* shape: partially specified, defaults not yet
//! applied. [`crate::plan::resolve`] turns it into a canonical [`crate::plan::SyncPlan`].

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::types::{Acl, SizeRange};

// ---------------------------------------------------------------------------
// Sync options
// ---------------------------------------------------------------------------

/// Storage target coordinates. All fields optional; which ones are present
/// decides the addressing mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct BucketOptions {
    pub name: Option<String>,
    pub region: Option<String>,
    pub endpoint: Option<String>,
}

/// How an ACL rule selects keys: a regex pattern or an exact key list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum KeyMatch {
    /// Regular expression tested against the whole key.
    Pattern(String),
    /// Exact key names.
    Keys(Vec<String>),
}

/// Per-classification key rules plus the fallback for unmatched keys.
///
/// Rules are evaluated `public_read_write`, then `public_read`, then
/// `private` — the last matching rule wins, so a `private` rule narrows
/// whatever the broader rules granted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AclRuleSet {
    pub public_read_write: Option<KeyMatch>,
    pub public_read: Option<KeyMatch>,
    pub private: Option<KeyMatch>,
    /// Classification for keys no rule matched. Defaults to `private`.
    pub fallback: Option<Acl>,
}

/// Either one classification for every file, or a rule set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AclOption {
    Uniform(Acl),
    Rules(AclRuleSet),
}

/// Candidate exclusion knobs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct IgnoreRules {
    /// Key extensions to drop before any stat call. An *omitted* list
    /// defaults to `['.html', '.htm']`; an explicitly empty list disables
    /// extension exclusion.
    pub extensions: Option<Vec<String>>,
    /// Skip candidates whose keys already exist in the store.
    pub exists_in_remote: bool,
    /// Drop files whose size falls inside any of these inclusive intervals.
    pub size_between: Option<Vec<SizeRange>>,
}

/// The `sync:` block, mirroring what the storage transport needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SyncOptions {
    /// Credentials ride through to the transport; the core never reads them.
    pub access_key_id: Option<String>,
    pub access_key_secret: Option<String>,
    pub bucket: BucketOptions,
    pub acl: Option<AclOption>,
    /// Mirror mode: delete remote keys with no local counterpart.
    pub bijection: bool,
    /// Extra headers for the transport. `x-oss-object-acl` doubles as a
    /// uniform ACL fallback when no `acl` option is given.
    pub headers: BTreeMap<String, String>,
    pub ignore: IgnoreRules,
}

// ---------------------------------------------------------------------------
// Site and mirror options
// ---------------------------------------------------------------------------

/// The `site:` block — build metadata the resolver consumes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteOptions {
    /// Public base URL (or bare path prefix) the built assets are served from.
    #[serde(default)]
    pub public_path: Option<String>,
    /// Build output directory, relative to the project root.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

impl Default for SiteOptions {
    fn default() -> Self {
        Self {
            public_path: None,
            output_dir: default_output_dir(),
        }
    }
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("dist")
}

/// The `mirror:` block — target for the local directory store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MirrorOptions {
    /// Root directory objects are mirrored into, relative to the project root.
    pub dir: PathBuf,
}

// ---------------------------------------------------------------------------
// Config file
// ---------------------------------------------------------------------------

/// Root of `longshore.yaml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ConfigFile {
    #[serde(default)]
    pub site: SiteOptions,
    #[serde(default)]
    pub sync: SyncOptions,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mirror: Option<MirrorOptions>,
}

impl ConfigFile {
    /// Load a config from `path`.
    ///
    /// Returns [`ConfigError::ConfigNotFound`] if absent,
    /// [`ConfigError::Parse`] (with path + line context) if malformed YAML.
    pub fn load_at(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::ConfigNotFound {
                path: path.to_path_buf(),
            });
        }
        let contents = std::fs::read_to_string(path)?;
        serde_yaml::from_str(&contents).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            source: e,
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
