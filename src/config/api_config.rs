//! Resolved configuration snapshot handed to the client factory, the
//! operation clients and the suite runner.

use super::store::{ConfigurationStore, BASE_URL_KEY};
use crate::error::{HarnessError, HarnessResult};
use crate::logging::log_debug;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const CONNECT_TIMEOUT_KEY: &str = "api.connect.timeout";
pub const READ_TIMEOUT_KEY: &str = "api.read.timeout";
pub const WRITE_TIMEOUT_KEY: &str = "api.write.timeout";
pub const LOGGING_ENABLED_KEY: &str = "api.logging.enabled";
pub const RETRY_COUNT_KEY: &str = "test.retry.count";
pub const RETRY_DELAY_KEY: &str = "test.retry.delay.ms";
pub const PARALLEL_THREADS_KEY: &str = "test.parallel.threads";
pub const RESPONSE_TIME_CEILING_KEY: &str = "api.response.time.ceiling.ms";
pub const HEADER_PREFIX: &str = "api.header.";
pub const DEFAULT_DATASET_KEY: &str = "uspto.default.dataset";
pub const DEFAULT_VERSION_KEY: &str = "uspto.default.version";

/// Which API the configuration targets. Each profile carries its own
/// defaults; they are not reconciled with each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ApiProfile {
    Petstore,
    Uspto,
    TicTacToe,
}

/// Defaults applied when a key is absent from every source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileDefaults {
    pub connect_timeout: Duration,
    pub read_timeout: Duration,
    pub write_timeout: Duration,
    pub retry_count: u32,
    pub parallel_threads: usize,
    pub response_time_ceiling: Duration,
}

impl ApiProfile {
    pub fn defaults(self) -> ProfileDefaults {
        match self {
            ApiProfile::Petstore | ApiProfile::TicTacToe => ProfileDefaults {
                connect_timeout: Duration::from_secs(30),
                read_timeout: Duration::from_secs(30),
                write_timeout: Duration::from_secs(30),
                retry_count: 2,
                parallel_threads: 2,
                response_time_ceiling: Duration::from_millis(5_000),
            },
            ApiProfile::Uspto => ProfileDefaults {
                connect_timeout: Duration::from_secs(10),
                read_timeout: Duration::from_secs(30),
                write_timeout: Duration::from_secs(30),
                retry_count: 3,
                parallel_threads: 3,
                response_time_ceiling: Duration::from_millis(5_000),
            },
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ApiProfile::Petstore => "petstore",
            ApiProfile::Uspto => "uspto",
            ApiProfile::TicTacToe => "tictactoe",
        }
    }
}

impl std::fmt::Display for ApiProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Immutable snapshot of everything downstream components need
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    pub profile: ApiProfile,
    pub base_url: String,
    pub connect_timeout: Duration,
    pub read_timeout: Duration,
    pub write_timeout: Duration,
    /// Capture full request and response bodies in the log
    pub logging_enabled: bool,
    /// Re-executions allowed after a failed test case
    pub retry_count: u32,
    pub retry_delay: Duration,
    pub parallel_threads: usize,
    pub response_time_ceiling: Duration,
    pub default_headers: Vec<(String, String)>,
    pub default_dataset: String,
    pub default_version: String,
}

impl ApiConfig {
    /// Profile defaults with the given base URL.
    pub fn new(profile: ApiProfile, base_url: impl Into<String>) -> Self {
        let defaults = profile.defaults();
        Self {
            profile,
            base_url: base_url.into(),
            connect_timeout: defaults.connect_timeout,
            read_timeout: defaults.read_timeout,
            write_timeout: defaults.write_timeout,
            logging_enabled: false,
            retry_count: defaults.retry_count,
            retry_delay: Duration::ZERO,
            parallel_threads: defaults.parallel_threads,
            response_time_ceiling: defaults.response_time_ceiling,
            default_headers: Vec::new(),
            default_dataset: "oa_citations".to_string(),
            default_version: "v1".to_string(),
        }
    }

    /// Resolve a snapshot from a store.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::ConfigurationError`] if:
    /// - `api.base.url` is not set for the selected environment
    /// - a typed value cannot be parsed
    /// - the thread count is zero or the retry count is negative
    pub fn from_store(store: &ConfigurationStore, profile: ApiProfile) -> HarnessResult<Self> {
        let defaults = profile.defaults();

        let base_url = store
            .base_url()
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| {
                HarnessError::configuration_error(format!("required key '{BASE_URL_KEY}' is not set"))
            })?
            .trim_end_matches('/')
            .to_string();

        let retry_count = store.get_int(RETRY_COUNT_KEY, i64::from(defaults.retry_count))?;
        let retry_count = u32::try_from(retry_count).map_err(|_| {
            HarnessError::configuration_error(format!(
                "key '{RETRY_COUNT_KEY}' must be a non-negative integer, got {retry_count}"
            ))
        })?;

        let parallel_threads =
            store.get_int(PARALLEL_THREADS_KEY, defaults.parallel_threads as i64)?;
        let parallel_threads = usize::try_from(parallel_threads)
            .ok()
            .filter(|threads| *threads > 0)
            .ok_or_else(|| {
                HarnessError::configuration_error(format!(
                    "key '{PARALLEL_THREADS_KEY}' must be at least 1, got {parallel_threads}"
                ))
            })?;

        let mut base = Self::new(profile, base_url);
        base.connect_timeout = store.get_duration(CONNECT_TIMEOUT_KEY, defaults.connect_timeout)?;
        base.read_timeout = store.get_duration(READ_TIMEOUT_KEY, defaults.read_timeout)?;
        base.write_timeout = store.get_duration(WRITE_TIMEOUT_KEY, defaults.write_timeout)?;
        base.logging_enabled = store.get_bool(LOGGING_ENABLED_KEY, false)?;
        base.retry_count = retry_count;
        base.retry_delay = store.get_millis(RETRY_DELAY_KEY, Duration::ZERO)?;
        base.parallel_threads = parallel_threads;
        base.response_time_ceiling =
            store.get_millis(RESPONSE_TIME_CEILING_KEY, defaults.response_time_ceiling)?;
        base.default_headers = store.entries_with_prefix(HEADER_PREFIX);
        base.default_dataset = store.get_or(DEFAULT_DATASET_KEY, &base.default_dataset);
        base.default_version = store.get_or(DEFAULT_VERSION_KEY, &base.default_version);

        log_debug!(
            profile = %profile,
            base_url = %base.base_url,
            connect_timeout_ms = base.connect_timeout.as_millis(),
            read_timeout_ms = base.read_timeout.as_millis(),
            write_timeout_ms = base.write_timeout.as_millis(),
            logging_enabled = base.logging_enabled,
            retry_count = base.retry_count,
            parallel_threads = base.parallel_threads,
            "API configuration resolved"
        );

        Ok(base)
    }

    /// Resolve a snapshot from the process-wide store.
    pub fn from_global(profile: ApiProfile) -> HarnessResult<Self> {
        Self::from_store(ConfigurationStore::global()?, profile)
    }
}
