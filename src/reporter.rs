//! Test lifecycle observation
//!
//! Listeners see suite and test events but never influence outcomes. Hooks
//! are invoked through [`notify`], which swallows listener panics.

use crate::logging::{log_error, log_info, log_warn};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TestStatus {
    Passed,
    Failed,
    Skipped,
}

impl std::fmt::Display for TestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TestStatus::Passed => f.write_str("passed"),
            TestStatus::Failed => f.write_str("failed"),
            TestStatus::Skipped => f.write_str("skipped"),
        }
    }
}

/// Final result of one test case
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TestResult {
    pub name: String,
    pub status: TestStatus,
    /// Times the body ran, including retries
    pub executions: u32,
    pub duration: Duration,
    /// Failure or skip reason
    pub reason: Option<String>,
}

/// Totals of one suite run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SuiteSummary {
    pub suite: String,
    pub passed: usize,
    pub failed: usize,
    pub skipped: usize,
    pub duration: Duration,
    pub results: Vec<TestResult>,
}

impl SuiteSummary {
    pub fn from_results(suite: impl Into<String>, results: Vec<TestResult>, duration: Duration) -> Self {
        let count = |status| results.iter().filter(|r| r.status == status).count();
        Self {
            suite: suite.into(),
            passed: count(TestStatus::Passed),
            failed: count(TestStatus::Failed),
            skipped: count(TestStatus::Skipped),
            duration,
            results,
        }
    }

    pub fn total(&self) -> usize {
        self.results.len()
    }

    /// No test failed.
    pub fn is_success(&self) -> bool {
        self.failed == 0
    }

    pub fn result(&self, name: &str) -> Option<&TestResult> {
        self.results.iter().find(|result| result.name == name)
    }
}

/// Observer of suite and test events
#[cfg_attr(test, mockall::automock)]
pub trait LifecycleListener: Send + Sync {
    fn on_suite_start(&self, _suite: &str, _total: usize) {}

    fn on_suite_finish(&self, _summary: &SuiteSummary) {}

    fn on_test_start(&self, _test: &str) {}

    /// A failed execution is about to be re-run.
    fn on_test_retry(&self, _test: &str, _attempt: u32, _max_retries: u32, _reason: &str) {}

    fn on_test_finish(&self, _result: &TestResult) {}
}

/// Invoke `hook` on every listener; a panicking listener is logged and skipped.
pub fn notify<F>(listeners: &[Arc<dyn LifecycleListener>], hook: F)
where
    F: Fn(&dyn LifecycleListener),
{
    for listener in listeners {
        if catch_unwind(AssertUnwindSafe(|| hook(listener.as_ref()))).is_err() {
            log_error!("Lifecycle listener panicked; event ignored");
        }
    }
}

/// Pass/fail/skip counts observed by a [`TestLifecycleReporter`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReportCounts {
    pub passed: usize,
    pub failed: usize,
    pub skipped: usize,
}

/// Logs lifecycle events and keeps the totals of the current suite
#[derive(Debug, Default)]
pub struct TestLifecycleReporter {
    passed: AtomicUsize,
    failed: AtomicUsize,
    skipped: AtomicUsize,
    started: Mutex<Option<(Instant, DateTime<Utc>)>>,
}

impl TestLifecycleReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn counts(&self) -> ReportCounts {
        ReportCounts {
            passed: self.passed.load(Ordering::Relaxed),
            failed: self.failed.load(Ordering::Relaxed),
            skipped: self.skipped.load(Ordering::Relaxed),
        }
    }
}

impl LifecycleListener for TestLifecycleReporter {
    /// Counters restart with every suite.
    fn on_suite_start(&self, suite: &str, total: usize) {
        self.passed.store(0, Ordering::Relaxed);
        self.failed.store(0, Ordering::Relaxed);
        self.skipped.store(0, Ordering::Relaxed);
        let now = Utc::now();
        if let Ok(mut started) = self.started.lock() {
            *started = Some((Instant::now(), now));
        }
        log_info!(
            suite = %suite,
            tests = total,
            started_at = %now.to_rfc3339(),
            "Suite started"
        );
    }

    fn on_suite_finish(&self, summary: &SuiteSummary) {
        let started = self.started.lock().ok().and_then(|started| *started);
        let elapsed = started.map(|(instant, _)| instant.elapsed()).unwrap_or(summary.duration);
        let counts = self.counts();
        log_info!(
            suite = %summary.suite,
            duration_ms = elapsed.as_millis(),
            passed = counts.passed,
            failed = counts.failed,
            skipped = counts.skipped,
            "Suite finished"
        );
    }

    fn on_test_start(&self, test: &str) {
        log_info!(test = %test, "Test started");
    }

    fn on_test_retry(&self, test: &str, attempt: u32, max_retries: u32, reason: &str) {
        log_warn!(
            test = %test,
            attempt = attempt,
            max_retries = max_retries,
            reason = %reason,
            "Retrying test"
        );
    }

    fn on_test_finish(&self, result: &TestResult) {
        match result.status {
            TestStatus::Passed => {
                self.passed.fetch_add(1, Ordering::Relaxed);
                log_info!(
                    test = %result.name,
                    executions = result.executions,
                    duration_ms = result.duration.as_millis(),
                    "Test passed"
                );
            }
            TestStatus::Failed => {
                self.failed.fetch_add(1, Ordering::Relaxed);
                log_error!(
                    test = %result.name,
                    executions = result.executions,
                    reason = %result.reason.as_deref().unwrap_or("unknown"),
                    "Test failed"
                );
            }
            TestStatus::Skipped => {
                self.skipped.fetch_add(1, Ordering::Relaxed);
                log_warn!(
                    test = %result.name,
                    reason = %result.reason.as_deref().unwrap_or("unknown"),
                    "Test skipped"
                );
            }
        }
    }
}
