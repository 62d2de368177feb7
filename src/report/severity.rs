// src/report/severity.rs
use clap::ValueEnum;

/// Severity of a check result, and simultaneously the verbosity threshold.
///
/// Ordered from most to least critical: a result is emitted iff its
/// severity is <= the configured threshold, so `Error` shows only errors
/// and `Info` shows everything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
pub enum Severity {
    Error,
    Warning,
    Info,
}

/// One check outcome: a severity tag and a human-readable message.
///
/// Transient — it exists only on its way into `Reporter::publish`.
#[derive(Debug, Clone)]
pub struct CheckResult {
    pub severity: Severity,
    pub message: String,
}

impl CheckResult {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Info,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            message: message.into(),
        }
    }
}
