//! Leveled reporting for sync runs.
//!
//! The pipeline never prints; it hands every user-facing line to an injected
//! [`Reporter`]. Hosts pick the sink: the CLI colors lines on a console, a
//! build-tool host can forward them to its own logger, and tests collect
//! them with [`MemoryReporter`].

use std::fmt;
use std::sync::Mutex;

/// Severity of a report line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportLevel {
    Success,
    Info,
    Debug,
    Error,
}

impl fmt::Display for ReportLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportLevel::Success => write!(f, "success"),
            ReportLevel::Info => write!(f, "info"),
            ReportLevel::Debug => write!(f, "debug"),
            ReportLevel::Error => write!(f, "error"),
        }
    }
}

/// Sink for user-facing sync output.
pub trait Reporter {
    fn report(&self, level: ReportLevel, message: &str);

    fn success(&self, message: &str) {
        self.report(ReportLevel::Success, message);
    }
    fn info(&self, message: &str) {
        self.report(ReportLevel::Info, message);
    }
    fn debug(&self, message: &str) {
        self.report(ReportLevel::Debug, message);
    }
    fn error(&self, message: &str) {
        self.report(ReportLevel::Error, message);
    }
}

// ---------------------------------------------------------------------------
// Log facade reporter
// ---------------------------------------------------------------------------

/// Routes report lines to the `log` facade.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogReporter;

impl Reporter for LogReporter {
    fn report(&self, level: ReportLevel, message: &str) {
        match level {
            ReportLevel::Success | ReportLevel::Info => tracing::info!("{message}"),
            ReportLevel::Debug => tracing::debug!("{message}"),
            ReportLevel::Error => tracing::error!("{message}"),
        }
    }
}

// ---------------------------------------------------------------------------
// In-memory reporter
// ---------------------------------------------------------------------------

/// Collects report lines in memory, in order.
///
/// The seam for tests and embedding hosts that want to inspect what a run
/// said rather than stream it.
#[derive(Debug, Default)]
pub struct MemoryReporter {
    lines: Mutex<Vec<(ReportLevel, String)>>,
}

impl MemoryReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every line reported so far.
    pub fn lines(&self) -> Vec<(ReportLevel, String)> {
        self.lines
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Lines at one level only.
    pub fn lines_at(&self, level: ReportLevel) -> Vec<String> {
        self.lines()
            .into_iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, message)| message)
            .collect()
    }

    /// Whether any line contains `needle`.
    pub fn contains(&self, needle: &str) -> bool {
        self.lines().iter().any(|(_, message)| message.contains(needle))
    }

    pub fn is_empty(&self) -> bool {
        self.lines().is_empty()
    }
}

impl Reporter for MemoryReporter {
    fn report(&self, level: ReportLevel, message: &str) {
        self.lines
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push((level, message.to_string()));
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
