//! Test helper utilities for api-harness integration tests
//!
//! Builds configurations and operation clients that point at a local
//! `wiremock` server.
//!
//! IMPORTANT: These helpers are test-only and should NEVER be used in production code.

// Allow dead code in test utilities - functions are used across different test files
#![allow(dead_code)]

use api_harness::{
    ApiConfig, ApiProfile, HttpClientFactory, PetstoreClient, RunnerConfig, TicTacToeClient,
    UsptoClient,
};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use wiremock::{MockServer, ResponseTemplate};

/// Configuration for `profile` pointing at `server`, with short timeouts.
pub fn create_test_config(profile: ApiProfile, server: &MockServer) -> ApiConfig {
    let mut config = ApiConfig::new(profile, server.uri());
    config.connect_timeout = Duration::from_secs(2);
    config.read_timeout = Duration::from_secs(5);
    config.write_timeout = Duration::from_secs(5);
    config.retry_delay = Duration::ZERO;
    config
}

pub fn create_factory(config: ApiConfig) -> Arc<HttpClientFactory> {
    Arc::new(HttpClientFactory::new(config).expect("mock server URI should be valid"))
}

pub fn petstore_client(server: &MockServer) -> PetstoreClient {
    PetstoreClient::new(create_factory(create_test_config(ApiProfile::Petstore, server)))
}

pub fn uspto_client(server: &MockServer) -> UsptoClient {
    UsptoClient::new(create_factory(create_test_config(ApiProfile::Uspto, server)))
}

pub fn tictactoe_client(server: &MockServer) -> TicTacToeClient {
    TicTacToeClient::new(create_factory(create_test_config(ApiProfile::TicTacToe, server)))
}

/// Runner settings without retry delay so failing tests finish quickly.
pub fn create_runner_config(retry_count: u32) -> RunnerConfig {
    RunnerConfig {
        parallel_threads: 2,
        retry_count,
        retry_delay: Duration::ZERO,
    }
}

pub fn json_response(status: u16, body: Value) -> ResponseTemplate {
    ResponseTemplate::new(status).set_body_json(body)
}

pub fn buddy() -> Value {
    json!({"id": 1, "name": "Buddy", "tag": "friendly"})
}

pub fn board_with(row: usize, column: usize, mark: &str) -> Value {
    let mut board = vec![vec![".".to_string(); 3]; 3];
    board[row - 1][column - 1] = mark.to_string();
    json!({"winner": ".", "board": board})
}

pub fn dataset_catalog() -> Value {
    json!({
        "total": 2,
        "apis": [
            {
                "apiKey": "oa_citations",
                "apiVersionNumber": "v1",
                "apiUrl": "https://developer.uspto.gov/ds-api/oa_citations/v1/fields",
                "apiDocumentationUrl": "https://developer.uspto.gov/ds-api-docs/index.html"
            },
            {
                "apiKey": "cancer_moonshot",
                "apiVersionNumber": "v1"
            }
        ]
    })
}

pub fn search_results(docs: usize) -> Value {
    let docs: Vec<Value> = (0..docs)
        .map(|i| json!({"patentApplicationNumber": format!("US{:08}", i)}))
        .collect();
    json!({"response": {"numFound": 1234, "start": 0, "docs": docs}})
}
