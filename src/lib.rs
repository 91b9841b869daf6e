//! # api-harness
//!
//! Test harness for the Petstore, USPTO dataset search and Tic-Tac-Toe demo REST APIs.
//!
//! ## Key Features
//!
//! - **Configuration**: properties files with environment and explicit overrides
//! - **HTTP**: one shared client per API with timeout and body-logging policy
//! - **Operations**: typed clients returning raw responses for assertions
//! - **Verification**: status, JSON shape, content type and response time checks
//! - **Resilience**: bounded per-test retry for flaky cases
//! - **Reporting**: lifecycle listeners with pass/fail/skip totals
//!
//! ## Example
//!
//! ```rust,no_run
//! use api_harness::{
//!     ApiConfig, ApiProfile, ConfigurationStore, HttpClientFactory, PetstoreClient,
//!     RunnerConfig, SuiteRunner, TestLifecycleReporter,
//! };
//! use std::sync::Arc;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let store = ConfigurationStore::init("config/petstore.properties")?;
//! let config = ApiConfig::from_store(store, ApiProfile::Petstore)?;
//! let factory = Arc::new(HttpClientFactory::new(config.clone())?);
//!
//! let cases = api_harness::suites::petstore::smoke_suite(PetstoreClient::new(factory), &config);
//! let summary = SuiteRunner::new(RunnerConfig::from_api_config(&config))
//!     .with_listener(Arc::new(TestLifecycleReporter::new()))
//!     .run("petstore-smoke", cases)
//!     .await;
//! assert!(summary.is_success());
//! # Ok(())
//! # }
//! ```

// Allow missing errors documentation - errors are self-documenting via type signatures
#![allow(clippy::missing_errors_doc)]

// Logging utilities (re-exports tracing with log_* naming) - internal only
pub(crate) mod logging;

pub mod config;
pub mod error;
pub mod http;
pub mod models;
pub mod operations;
pub mod reporter;
pub mod retry;
pub mod runner;
pub mod suites;
pub mod verify;

#[cfg(test)]
pub mod tests;

// Re-export main types
pub use config::{ApiConfig, ApiProfile, ConfigurationStore};
pub use error::{HarnessError, HarnessResult};
pub use http::{ApiResponse, HttpClientFactory, RequestContext};
pub use models::{Mark, Pet, SearchCriteria};
pub use operations::{PetstoreClient, TicTacToeClient, UsptoClient};
pub use reporter::{LifecycleListener, SuiteSummary, TestLifecycleReporter, TestResult, TestStatus};
pub use retry::{run_with_retry, RetryPolicy, RetryState};
pub use runner::{RunnerConfig, SuiteRunner, TestBody, TestCase};
pub use verify::{json_path, ResponseVerifier};
