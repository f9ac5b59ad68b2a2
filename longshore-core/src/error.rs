//! Error types for longshore-core.

use std::path::PathBuf;

use thiserror::Error;

/// All errors that can arise from loading and resolving configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Underlying I/O failure (file not found, permission denied, etc.).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parse error on load — includes file path and line context from serde_yaml.
    #[error("failed to parse config at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// The config file did not exist at the expected path.
    #[error("config not found at {path}")]
    ConfigNotFound { path: PathBuf },

    /// Neither a public path nor an explicit bucket name was configured.
    #[error("no valid bucket configuration was found")]
    NoTarget,

    /// Virtual-host addressing needs the host of `public_path`, and the
    /// configured value does not yield one.
    #[error("cannot derive a storage endpoint from public_path '{public_path}': {reason}")]
    Endpoint { public_path: String, reason: String },

    /// An ACL rule pattern failed to compile.
    #[error("invalid acl pattern '{pattern}': {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// The ACL override header carried an unknown classification.
    #[error("invalid acl '{value}' in header '{header}': expected private, public-read or public-read-write")]
    HeaderAcl { header: String, value: String },
}
