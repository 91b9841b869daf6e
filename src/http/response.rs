//! Captured HTTP response

use crate::error::{HarnessError, HarnessResult};
use reqwest::header::{HeaderMap, CONTENT_TYPE};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// A fully read response. Nothing in the harness mutates it after capture.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: u16,
    pub headers: HeaderMap,
    pub body: String,
    pub elapsed: Duration,
}

impl ApiResponse {
    pub fn new(status: u16, headers: HeaderMap, body: impl Into<String>, elapsed: Duration) -> Self {
        Self {
            status,
            headers,
            body: body.into(),
            elapsed,
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Declared `Content-Type`, if present and valid UTF-8.
    pub fn content_type(&self) -> Option<&str> {
        self.header(CONTENT_TYPE.as_str())
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|value| value.to_str().ok())
    }

    pub fn elapsed_ms(&self) -> u64 {
        u64::try_from(self.elapsed.as_millis()).unwrap_or(u64::MAX)
    }

    /// Deserialize the body into a model.
    pub fn parse<T: DeserializeOwned>(&self) -> HarnessResult<T> {
        serde_json::from_str(&self.body).map_err(|e| {
            HarnessError::parse_error(format!(
                "cannot decode {} from body: {e}",
                std::any::type_name::<T>()
            ))
        })
    }
}
