//! # longshore-sync
//!
//! The reconciliation engine: enumerate build output, filter candidates,
//! assign classifications, diff against the remote key set, and drive the
//! store.
//!
//! Call [`pipeline::run`] for a full run; the individual stages ([`scan`],
//! [`filter`], [`classify`], [`engine`]) are public for hosts that compose
//! them differently.

pub mod classify;
pub mod engine;
pub mod error;
pub mod filter;
pub mod pipeline;
pub mod scan;

pub use engine::{reconcile, Action, RemoteSnapshot};
pub use error::SyncError;
pub use pipeline::{run, RunOutcome};
