//! Bounded retry for flaky test cases
//!
//! A [`RetryPolicy`] decides whether a failed test case is executed again.
//! It moves from `Fresh` through `Retrying` to `Exhausted`; once exhausted it
//! refuses every further retry. One policy belongs to one test-case execution.

use crate::config::ApiConfig;
use crate::logging::{log_debug, log_warn};
use crate::reporter::TestStatus;
use std::future::Future;
use std::time::Duration;
use tokio::time::sleep;

/// Retry budget states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryState {
    /// No retry consumed yet
    Fresh,
    /// Some, but not all, retries consumed
    Retrying,
    /// Every retry consumed; sticky
    Exhausted,
}

#[derive(Debug, Clone)]
pub struct RetryPolicy {
    max_retries: u32,
    attempts: u32,
    state: RetryState,
}

impl RetryPolicy {
    pub fn new(max_retries: u32) -> Self {
        Self {
            max_retries,
            attempts: 0,
            state: RetryState::Fresh,
        }
    }

    /// Ceiling taken from `test.retry.count`, read once.
    pub fn from_config(config: &ApiConfig) -> Self {
        Self::new(config.retry_count)
    }

    /// Decide whether the test that just finished with `outcome` runs again.
    ///
    /// Only failures consume budget. Returns `false` for every call once the
    /// ceiling is reached.
    pub fn should_retry(&mut self, outcome: TestStatus) -> bool {
        if outcome != TestStatus::Failed {
            return false;
        }

        if self.attempts < self.max_retries {
            self.attempts += 1;
            self.state = if self.attempts == self.max_retries {
                RetryState::Exhausted
            } else {
                RetryState::Retrying
            };
            log_debug!(
                attempt = self.attempts,
                max_retries = self.max_retries,
                "Retrying failed test"
            );
            return true;
        }

        self.state = RetryState::Exhausted;
        false
    }

    /// Retries consumed so far.
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }

    pub fn state(&self) -> RetryState {
        self.state
    }
}

/// Result of [`run_with_retry`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryRun<T> {
    /// Outcome of the last execution
    pub result: T,
    /// How many times the body ran (1 + retries)
    pub executions: u32,
}

/// Run `body` until it passes or `policy` refuses another attempt.
///
/// `body` receives the 1-based execution number. `is_failure` marks results
/// that may be retried; `on_retry` sees the retry number and the failed
/// result before each re-run. Between executions the task sleeps `delay`
/// plus up to 10% jitter.
pub async fn run_with_retry<T, F, Fut, P, R>(
    policy: &mut RetryPolicy,
    delay: Duration,
    is_failure: P,
    mut on_retry: R,
    mut body: F,
) -> RetryRun<T>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = T>,
    P: Fn(&T) -> bool,
    R: FnMut(u32, &T),
{
    let mut executions = 0;
    loop {
        executions += 1;
        let result = body(executions).await;

        let status = if is_failure(&result) {
            TestStatus::Failed
        } else {
            TestStatus::Passed
        };
        if !policy.should_retry(status) {
            if status == TestStatus::Failed && executions > 1 {
                log_warn!(
                    executions = executions,
                    max_retries = policy.max_retries(),
                    "Test still failing after all retries"
                );
            }
            return RetryRun { result, executions };
        }

        log_warn!(
            attempt = policy.attempts(),
            max_retries = policy.max_retries(),
            "Test failed, retry {}/{}",
            policy.attempts(),
            policy.max_retries()
        );
        on_retry(policy.attempts(), &result);

        let pause = jittered(delay);
        if !pause.is_zero() {
            sleep(pause).await;
        }
    }
}

fn jittered(delay: Duration) -> Duration {
    if delay.is_zero() {
        return delay;
    }
    let jitter = fastrand::f64() * 0.1;
    Duration::from_secs_f64(delay.as_secs_f64() * (1.0 + jitter))
}
