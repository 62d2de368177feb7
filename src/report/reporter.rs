// src/report/reporter.rs
use std::sync::atomic::{AtomicUsize, Ordering};

use super::{CheckResult, Severity};

/// Emits check results to stdout, filtered by a verbosity threshold.
///
/// The threshold is explicit per-instance state, never process-global.
/// Every published result is counted — including ones the threshold
/// suppresses — so a finished run can be summarized.
pub struct Reporter {
    threshold: Severity,
    errors: AtomicUsize,
    warnings: AtomicUsize,
    infos: AtomicUsize,
}

/// Per-severity counts of everything published during one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportSummary {
    pub errors: usize,
    pub warnings: usize,
    pub infos: usize,
}

impl Reporter {
    pub fn new(threshold: Severity) -> Self {
        Self {
            threshold,
            errors: AtomicUsize::new(0),
            warnings: AtomicUsize::new(0),
            infos: AtomicUsize::new(0),
        }
    }

    /// Whether a result at `severity` passes a `threshold`.
    pub fn should_emit(severity: Severity, threshold: Severity) -> bool {
        severity <= threshold
    }

    pub fn publish(&self, result: CheckResult) {
        let counter = match result.severity {
            Severity::Error => &self.errors,
            Severity::Warning => &self.warnings,
            Severity::Info => &self.infos,
        };
        counter.fetch_add(1, Ordering::Relaxed);

        if Self::should_emit(result.severity, self.threshold) {
            println!("{}", result.message);
        }
    }

    pub fn info(&self, message: impl Into<String>) {
        self.publish(CheckResult::info(message));
    }

    pub fn warning(&self, message: impl Into<String>) {
        self.publish(CheckResult::warning(message));
    }

    pub fn error(&self, message: impl Into<String>) {
        self.publish(CheckResult::error(message));
    }

    pub fn summary(&self) -> ReportSummary {
        ReportSummary {
            errors: self.errors.load(Ordering::Relaxed),
            warnings: self.warnings.load(Ordering::Relaxed),
            infos: self.infos.load(Ordering::Relaxed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emits_iff_severity_within_threshold() {
        let all = [Severity::Error, Severity::Warning, Severity::Info];
        let rank = |s: Severity| match s {
            Severity::Error => 0,
            Severity::Warning => 1,
            Severity::Info => 2,
        };

        // Full grid: emit exactly when rank(severity) <= rank(threshold)
        for severity in all {
            for threshold in all {
                assert_eq!(
                    Reporter::should_emit(severity, threshold),
                    rank(severity) <= rank(threshold),
                    "severity={severity:?} threshold={threshold:?}"
                );
            }
        }
    }

    #[test]
    fn warning_is_suppressed_by_error_threshold() {
        assert!(!Reporter::should_emit(Severity::Warning, Severity::Error));
    }

    #[test]
    fn error_passes_info_threshold() {
        assert!(Reporter::should_emit(Severity::Error, Severity::Info));
    }

    #[test]
    fn summary_counts_suppressed_results() {
        let reporter = Reporter::new(Severity::Error);
        reporter.error("e");
        reporter.warning("w");
        reporter.info("i");
        reporter.info("i2");

        let summary = reporter.summary();
        assert_eq!(summary.errors, 1);
        assert_eq!(summary.warnings, 1);
        assert_eq!(summary.infos, 2);
    }
}
