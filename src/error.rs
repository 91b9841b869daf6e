//! Error types for harness operations.
//!
//! This module provides structured error handling for api-harness, including
//! categorization and retry guidance.
//!
//! # Error Types
//!
//! The main error type is [`HarnessError`], which covers all failure modes:
//! - Configuration errors (missing source file, missing required key, bad value)
//! - Transport errors (connection refused, timeouts, unreadable bodies)
//! - Verification failures (an assertion on a response did not hold)
//! - Parse errors (malformed JSON where JSON was expected)
//!
//! # Error Handling Example
//!
//! ```rust,no_run
//! use api_harness::{HarnessError, error::ErrorCategory};
//!
//! fn handle_error(err: HarnessError) {
//!     if err.is_fatal() {
//!         panic!("cannot continue: {err}");
//!     }
//!
//!     match err.category() {
//!         ErrorCategory::External => println!("API or network issue: {err}"),
//!         ErrorCategory::Assertion => println!("Test assertion failed: {err}"),
//!         ErrorCategory::Client => println!("Fix the harness setup: {err}"),
//!     }
//! }
//! ```

use crate::logging::{log_debug, log_error, log_warn};
use thiserror::Error;

/// High-level categorization of errors for routing and handling decisions.
///
/// Use [`HarnessError::category()`] to get the category for any error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// The harness was set up incorrectly (configuration).
    ///
    /// Nothing downstream can work until this is fixed.
    Client,

    /// The API under test or the network misbehaved.
    External,

    /// A response did not satisfy an expectation.
    Assertion,
}

/// Convenient result type for harness operations.
///
/// Alias for `Result<T, HarnessError>`.
pub type HarnessResult<T> = std::result::Result<T, HarnessError>;

/// Errors that can occur while configuring the harness, calling an API or
/// verifying its responses.
///
/// | Variant | Category | Retryable | Fatal |
/// |---------|----------|-----------|-------|
/// | `ConfigurationError` | Client | No | Yes |
/// | `TransportError` | External | Yes | No |
/// | `VerificationFailure` | Assertion | Yes | No |
/// | `ParseError` | External | Yes | No |
///
/// Use the constructor methods, which log the error automatically:
///
/// ```rust
/// use api_harness::HarnessError;
///
/// let err = HarnessError::configuration_error("api.base.url is required");
/// let err = HarnessError::verification_failure("status code", "200", "404");
/// ```
#[derive(Error, Debug)]
pub enum HarnessError {
    /// Configuration is missing, unreadable or invalid.
    ///
    /// Always fatal: every other component depends on configuration.
    #[error("Configuration error: {message}")]
    ConfigurationError {
        /// Description of the configuration problem.
        message: String,
    },

    /// Issuing an HTTP request failed before a response was received.
    #[error("Transport error: {message}")]
    TransportError {
        /// Description of the failure.
        message: String,
        /// The underlying error, if available.
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A response did not satisfy an expectation.
    #[error("Verification failed [{check}]: expected {expected}, actual {actual}")]
    VerificationFailure {
        /// Which check failed (e.g. "status code").
        check: String,
        /// What the check expected.
        expected: String,
        /// What was observed.
        actual: String,
    },

    /// A body that should have been JSON could not be parsed.
    #[error("Parse error: {message}")]
    ParseError {
        /// Details about the parse failure.
        message: String,
    },
}

impl HarnessError {
    /// Get the error category for routing and handling decisions.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ConfigurationError { .. } => ErrorCategory::Client,
            Self::TransportError { .. } => ErrorCategory::External,
            Self::VerificationFailure { .. } => ErrorCategory::Assertion,
            Self::ParseError { .. } => ErrorCategory::External,
        }
    }

    /// Whether a test that failed with this error may be re-executed.
    ///
    /// Transport and verification problems fail only the current test and are
    /// offered to the retry policy. Configuration errors are never retried.
    pub fn is_retryable(&self) -> bool {
        !self.is_fatal()
    }

    /// Whether this error must abort the run instead of failing one test.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::ConfigurationError { .. })
    }

    // =========================================================================
    // Constructor methods with automatic logging
    // =========================================================================

    pub fn configuration_error(message: impl Into<String>) -> Self {
        let message = message.into();
        log_error!(
            error_type = "configuration_error",
            message = %message,
            "Harness configuration invalid"
        );
        Self::ConfigurationError { message }
    }

    pub fn transport_error(
        message: impl Into<String>,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        let message = message.into();
        log_error!(
            error_type = "transport_error",
            message = %message,
            has_source = source.is_some(),
            "HTTP request could not be completed"
        );
        Self::TransportError { message, source }
    }

    /// Create a verification failure (logs at WARN level).
    ///
    /// Both values end up in the error message so a failed test shows what
    /// was expected next to what the API returned.
    pub fn verification_failure(
        check: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        let check = check.into();
        let expected = expected.into();
        let actual = actual.into();
        log_warn!(
            error_type = "verification_failure",
            check = %check,
            expected = %expected,
            actual = %actual,
            "Response verification failed"
        );
        Self::VerificationFailure {
            check,
            expected,
            actual,
        }
    }

    pub fn parse_error(message: impl Into<String>) -> Self {
        let message = message.into();
        log_debug!(
            error_type = "parse_error",
            message = %message,
            "Response body is not valid JSON"
        );
        Self::ParseError { message }
    }
}

impl From<reqwest::Error> for HarnessError {
    fn from(error: reqwest::Error) -> Self {
        let message = if error.is_timeout() {
            format!("request timed out: {error}")
        } else if error.is_connect() {
            format!("connection failed: {error}")
        } else {
            error.to_string()
        };
        Self::transport_error(message, Some(Box::new(error)))
    }
}
