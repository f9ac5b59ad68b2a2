//! Longshore core library — domain types, configuration, plan resolution.
//!
//! Public API surface:
//! - [`types`] — [`Acl`], size intervals, upload candidates
//! - [`options`] — the raw `longshore.yaml` shape
//! - [`plan`] — the resolver: options in, canonical [`plan::SyncPlan`] out
//! - [`report`] — the injected [`report::Reporter`] seam
//! - [`error`] — [`ConfigError`]

pub mod error;
pub mod options;
pub mod plan;
pub mod report;
pub mod types;

pub use error::ConfigError;
pub use options::{ConfigFile, SiteOptions, SyncOptions};
pub use plan::{resolve, AclPolicy, SyncPlan};
pub use report::{MemoryReporter, Reporter};
pub use types::{Acl, Candidate, SizeRange};
