// Unit Tests for Lifecycle Reporting
//
// UNIT UNDER TEST: TestLifecycleReporter, SuiteSummary, notify
//
// BUSINESS RESPONSIBILITY:
//   - Counts passed, failed and skipped tests
//   - Logs suite and test events for operators
//   - Never lets a listener failure reach a test result
//
// TEST COVERAGE:
//   - Counter aggregation per outcome, reset at each suite start
//   - Summary totals built from results
//   - Panicking listeners are isolated

use crate::reporter::{
    notify, LifecycleListener, ReportCounts, SuiteSummary, TestLifecycleReporter, TestResult,
    TestStatus,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

fn result(name: &str, status: TestStatus) -> TestResult {
    TestResult {
        name: name.to_string(),
        status,
        executions: 1,
        duration: Duration::from_millis(5),
        reason: (status != TestStatus::Passed).then(|| "because".to_string()),
    }
}

struct PanickingListener;

impl LifecycleListener for PanickingListener {
    fn on_test_start(&self, _test: &str) {
        panic!("listener bug");
    }
}

#[derive(Default)]
struct CountingListener {
    starts: AtomicUsize,
}

impl LifecycleListener for CountingListener {
    fn on_test_start(&self, _test: &str) {
        self.starts.fetch_add(1, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod reporter_tests {
    use super::*;

    #[test]
    fn test_counts_each_outcome() {
        // Arrange
        let reporter = TestLifecycleReporter::new();
        reporter.on_suite_start("smoke", 4);

        // Act
        reporter.on_test_finish(&result("a", TestStatus::Passed));
        reporter.on_test_finish(&result("b", TestStatus::Passed));
        reporter.on_test_finish(&result("c", TestStatus::Failed));
        reporter.on_test_finish(&result("d", TestStatus::Skipped));

        // Assert
        assert_eq!(
            reporter.counts(),
            ReportCounts {
                passed: 2,
                failed: 1,
                skipped: 1
            }
        );
    }

    #[test]
    fn test_counts_restart_with_each_suite() {
        let reporter = TestLifecycleReporter::new();

        reporter.on_suite_start("first", 2);
        reporter.on_test_finish(&result("a", TestStatus::Passed));
        reporter.on_test_finish(&result("b", TestStatus::Failed));
        reporter.on_suite_start("second", 1);
        reporter.on_test_finish(&result("c", TestStatus::Passed));

        assert_eq!(
            reporter.counts(),
            ReportCounts {
                passed: 1,
                failed: 0,
                skipped: 0
            }
        );
    }

    #[test]
    fn test_finish_without_start_does_not_panic() {
        let reporter = TestLifecycleReporter::new();
        let summary = SuiteSummary::from_results("empty", Vec::new(), Duration::ZERO);

        reporter.on_suite_finish(&summary);
        reporter.on_test_retry("t", 1, 2, "status 500");

        assert_eq!(reporter.counts(), ReportCounts::default());
    }
}

#[cfg(test)]
mod summary_tests {
    use super::*;

    #[test]
    fn test_summary_totals() {
        let summary = SuiteSummary::from_results(
            "smoke",
            vec![
                result("a", TestStatus::Passed),
                result("b", TestStatus::Failed),
                result("c", TestStatus::Skipped),
            ],
            Duration::from_secs(1),
        );

        assert_eq!(summary.total(), 3);
        assert_eq!(summary.passed, 1);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.skipped, 1);
        assert!(!summary.is_success());
        assert_eq!(summary.result("b").map(|r| r.status), Some(TestStatus::Failed));
    }

    #[test]
    fn test_skips_alone_do_not_fail_suite() {
        let summary = SuiteSummary::from_results(
            "smoke",
            vec![result("a", TestStatus::Skipped)],
            Duration::ZERO,
        );

        assert!(summary.is_success());
    }
}

#[cfg(test)]
mod notify_tests {
    use super::*;

    #[test]
    fn test_panicking_listener_does_not_stop_others() {
        let counting = Arc::new(CountingListener::default());
        let listeners: Vec<Arc<dyn LifecycleListener>> = vec![
            Arc::new(PanickingListener) as Arc<dyn LifecycleListener>,
            counting.clone() as Arc<dyn LifecycleListener>,
        ];

        notify(&listeners, |l| l.on_test_start("t"));
        notify(&listeners, |l| l.on_test_start("t"));

        assert_eq!(counting.starts.load(Ordering::SeqCst), 2);
    }
}
