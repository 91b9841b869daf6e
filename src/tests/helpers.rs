//! Test helper utilities for api-harness unit tests
//!
//! IMPORTANT: These helpers are test-only and should NEVER be used in production code.

#![allow(dead_code)]

use crate::config::{ApiConfig, ApiProfile, ConfigurationStore};
use crate::http::ApiResponse;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use std::io::Write;
use std::time::Duration;
use tempfile::NamedTempFile;

/// Store built from properties text with the process environment ignored.
pub fn create_test_store(properties: &str) -> ConfigurationStore {
    ConfigurationStore::parse(properties)
        .expect("test properties should parse")
        .without_environment()
}

/// Configuration pointing at a local address, with fast timeouts and no retry delay.
pub fn create_test_config(profile: ApiProfile) -> ApiConfig {
    let mut config = ApiConfig::new(profile, "http://localhost:8080");
    config.connect_timeout = Duration::from_secs(1);
    config.read_timeout = Duration::from_secs(2);
    config.write_timeout = Duration::from_secs(2);
    config
}

/// Response with a JSON body and content type.
pub fn create_json_response(status: u16, body: &str) -> ApiResponse {
    let mut headers = HeaderMap::new();
    headers.insert(
        CONTENT_TYPE,
        HeaderValue::from_static("application/json; charset=utf-8"),
    );
    ApiResponse::new(status, headers, body, Duration::from_millis(42))
}

/// Write `contents` to a temp file that is removed when dropped.
pub fn write_temp_properties(contents: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .prefix("api-harness-")
        .suffix(".properties")
        .tempfile()
        .expect("temp properties file should be creatable");
    file.write_all(contents.as_bytes())
        .expect("temp properties file should be writable");
    file
}
