//! Suite execution
//!
//! [`SuiteRunner`] runs test cases on a bounded number of parallel workers.
//! Each case gets its own [`RetryPolicy`], so no case inherits a budget
//! consumed by another. Errors returned by a test body, and panics inside
//! it, are classified as failures. A configuration error is never retried
//! and stops the suite from starting further cases.

use crate::config::ApiConfig;
use crate::error::HarnessError;
use crate::logging::{log_debug, log_error};
use crate::reporter::{notify, LifecycleListener, SuiteSummary, TestResult, TestStatus};
use crate::retry::{run_with_retry, RetryPolicy};
use async_trait::async_trait;
use futures_util::stream::{self, StreamExt};
use futures_util::FutureExt;
use once_cell::sync::OnceCell;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Async body of a test case
#[async_trait]
pub trait TestBody: Send + Sync {
    async fn run(&self) -> anyhow::Result<()>;
}

#[async_trait]
impl<F, Fut> TestBody for F
where
    F: Fn() -> Fut + Send + Sync,
    Fut: Future<Output = anyhow::Result<()>> + Send,
{
    async fn run(&self) -> anyhow::Result<()> {
        (self)().await
    }
}

/// A named test with an optional skip reason
#[derive(Clone)]
pub struct TestCase {
    name: String,
    body: Arc<dyn TestBody>,
    skip_reason: Option<String>,
}

impl TestCase {
    pub fn new<F, Fut>(name: impl Into<String>, body: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<()>> + Send,
    {
        Self {
            name: name.into(),
            body: Arc::new(body),
            skip_reason: None,
        }
    }

    /// Mark the case as skipped; its body never runs.
    pub fn skip(mut self, reason: impl Into<String>) -> Self {
        self.skip_reason = Some(reason.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl std::fmt::Debug for TestCase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TestCase")
            .field("name", &self.name)
            .field("skip_reason", &self.skip_reason)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunnerConfig {
    pub parallel_threads: usize,
    pub retry_count: u32,
    pub retry_delay: Duration,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            parallel_threads: 2,
            retry_count: 2,
            retry_delay: Duration::ZERO,
        }
    }
}

impl RunnerConfig {
    pub fn from_api_config(config: &ApiConfig) -> Self {
        Self {
            parallel_threads: config.parallel_threads.max(1),
            retry_count: config.retry_count,
            retry_delay: config.retry_delay,
        }
    }
}

#[derive(Clone)]
pub struct SuiteRunner {
    config: RunnerConfig,
    listeners: Vec<Arc<dyn LifecycleListener>>,
}

impl SuiteRunner {
    pub fn new(config: RunnerConfig) -> Self {
        Self {
            config,
            listeners: Vec::new(),
        }
    }

    pub fn with_listener(mut self, listener: Arc<dyn LifecycleListener>) -> Self {
        self.listeners.push(listener);
        self
    }

    pub fn config(&self) -> &RunnerConfig {
        &self.config
    }

    /// Run every case and return the totals. Results keep the input order.
    ///
    /// A configuration error aborts the suite: cases already started finish,
    /// and every case not yet started is reported as skipped.
    pub async fn run(&self, suite: &str, cases: Vec<TestCase>) -> SuiteSummary {
        let started = Instant::now();
        let total = cases.len();
        notify(&self.listeners, |l| l.on_suite_start(suite, total));

        log_debug!(
            suite = %suite,
            tests = total,
            parallel_threads = self.config.parallel_threads,
            retry_count = self.config.retry_count,
            "Running suite"
        );

        let abort: Arc<OnceCell<String>> = Arc::new(OnceCell::new());
        let results: Vec<TestResult> = stream::iter(cases)
            .map(|case| {
                let runner = self.clone();
                let abort = Arc::clone(&abort);
                let name = case.name.clone();
                async move {
                    if let Some(cause) = abort.get() {
                        return runner.abort_case(case, cause);
                    }
                    match tokio::spawn(async move { runner.execute_case(case).await }).await {
                        Ok((result, fatal)) => {
                            if fatal {
                                let cause = result.reason.clone().unwrap_or_default();
                                if abort.set(cause).is_ok() {
                                    log_error!(
                                        suite = %suite,
                                        test = %result.name,
                                        "Configuration error; aborting remaining tests"
                                    );
                                }
                            }
                            result
                        }
                        Err(join_error) => {
                            log_error!(test = %name, error = %join_error, "Test worker aborted");
                            TestResult {
                                name,
                                status: TestStatus::Failed,
                                executions: 1,
                                duration: Duration::ZERO,
                                reason: Some(format!("test worker aborted: {join_error}")),
                            }
                        }
                    }
                }
            })
            .buffered(self.config.parallel_threads.max(1))
            .collect()
            .await;

        let summary = SuiteSummary::from_results(suite, results, started.elapsed());
        notify(&self.listeners, |l| l.on_suite_finish(&summary));
        summary
    }

    /// Run one case with its own retry budget.
    pub async fn run_case(&self, case: TestCase) -> TestResult {
        self.execute_case(case).await.0
    }

    /// Run one case; the flag is set when it failed with a fatal error.
    async fn execute_case(&self, case: TestCase) -> (TestResult, bool) {
        notify(&self.listeners, |l| l.on_test_start(&case.name));
        let started = Instant::now();

        if let Some(reason) = case.skip_reason.clone() {
            let result = TestResult {
                name: case.name,
                status: TestStatus::Skipped,
                executions: 0,
                duration: started.elapsed(),
                reason: Some(reason),
            };
            notify(&self.listeners, |l| l.on_test_finish(&result));
            return (result, false);
        }

        let mut policy = RetryPolicy::new(self.config.retry_count);
        let max_retries = policy.max_retries();
        let name = case.name.as_str();
        let listeners = &self.listeners;

        let run = run_with_retry(
            &mut policy,
            self.config.retry_delay,
            |result: &anyhow::Result<()>| matches!(result, Err(error) if !is_fatal(error)),
            |attempt, result: &anyhow::Result<()>| {
                let reason = failure_reason(result);
                notify(listeners, |l| l.on_test_retry(name, attempt, max_retries, &reason));
            },
            |_execution| {
                let body = Arc::clone(&case.body);
                async move { execute_body(body).await }
            },
        )
        .await;

        let fatal = matches!(&run.result, Err(error) if is_fatal(error));
        let (status, reason) = match &run.result {
            Ok(()) => (TestStatus::Passed, None),
            Err(_) => (TestStatus::Failed, Some(failure_reason(&run.result))),
        };
        let result = TestResult {
            name: case.name.clone(),
            status,
            executions: run.executions,
            duration: started.elapsed(),
            reason,
        };
        notify(&self.listeners, |l| l.on_test_finish(&result));
        (result, fatal)
    }

    fn abort_case(&self, case: TestCase, cause: &str) -> TestResult {
        notify(&self.listeners, |l| l.on_test_start(&case.name));
        let result = TestResult {
            name: case.name,
            status: TestStatus::Skipped,
            executions: 0,
            duration: Duration::ZERO,
            reason: Some(format!("aborted: {cause}")),
        };
        notify(&self.listeners, |l| l.on_test_finish(&result));
        result
    }
}

async fn execute_body(body: Arc<dyn TestBody>) -> anyhow::Result<()> {
    match AssertUnwindSafe(body.run()).catch_unwind().await {
        Ok(result) => result,
        Err(panic) => {
            let message = panic
                .downcast_ref::<String>()
                .cloned()
                .or_else(|| panic.downcast_ref::<&str>().map(|s| s.to_string()))
                .unwrap_or_else(|| "unknown panic".to_string());
            Err(anyhow::anyhow!("test panicked: {message}"))
        }
    }
}

fn is_fatal(error: &anyhow::Error) -> bool {
    error
        .downcast_ref::<HarnessError>()
        .is_some_and(HarnessError::is_fatal)
}

fn failure_reason(result: &anyhow::Result<()>) -> String {
    match result {
        Ok(()) => String::new(),
        Err(error) => format!("{error:#}"),
    }
}
