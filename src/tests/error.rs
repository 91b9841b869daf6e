// Unit Tests for Harness Error Types
//
// UNIT UNDER TEST: HarnessError
//
// BUSINESS RESPONSIBILITY:
//   - Classifies failures into configuration, transport, verification and parse errors
//   - Decides which failures abort the run and which may be retried
//   - Carries expected and actual values for failed assertions
//
// TEST COVERAGE:
//   - Category and fatality per variant
//   - Display output of verification failures
//   - Conversion from reqwest transport errors

use crate::error::{ErrorCategory, HarnessError};

#[cfg(test)]
mod classification_tests {
    use super::*;

    #[test]
    fn test_configuration_error_is_fatal_and_not_retryable() {
        let err = HarnessError::configuration_error("api.base.url is required");

        assert_eq!(err.category(), ErrorCategory::Client);
        assert!(err.is_fatal());
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_transport_error_is_retryable() {
        let err = HarnessError::transport_error("connection refused", None);

        assert_eq!(err.category(), ErrorCategory::External);
        assert!(!err.is_fatal());
        assert!(err.is_retryable());
    }

    #[test]
    fn test_verification_failure_is_retryable_assertion() {
        let err = HarnessError::verification_failure("status code", "200", "500");

        assert_eq!(err.category(), ErrorCategory::Assertion);
        assert!(err.is_retryable());
    }

    #[test]
    fn test_parse_error_category() {
        let err = HarnessError::parse_error("expected value at line 1 column 1");

        assert_eq!(err.category(), ErrorCategory::External);
        assert!(!err.is_fatal());
    }
}

#[cfg(test)]
mod display_tests {
    use super::*;

    #[test]
    fn test_verification_failure_message_contains_both_values() {
        // Test verifies failed tests report expected next to actual

        let err = HarnessError::verification_failure("status code", "200", "404");

        let message = err.to_string();
        assert!(message.contains("status code"));
        assert!(message.contains("expected 200"));
        assert!(message.contains("actual 404"));
    }

    #[test]
    fn test_configuration_error_message() {
        let err = HarnessError::configuration_error("missing key");

        assert_eq!(err.to_string(), "Configuration error: missing key");
    }
}

#[cfg(test)]
mod conversion_tests {
    use super::*;

    #[tokio::test]
    async fn test_connection_refused_becomes_transport_error() {
        // Port 9 (discard) on localhost is closed on test machines
        let error = reqwest::Client::new()
            .get("http://127.0.0.1:9/")
            .send()
            .await
            .expect_err("nothing listens on the discard port");

        let converted = HarnessError::from(error);

        match converted {
            HarnessError::TransportError { source, .. } => {
                assert!(source.is_some(), "reqwest error should be kept as source");
            }
            other => panic!("Expected TransportError, got: {:?}", other),
        }
    }
}
