//! Integration Tests for the Tic-Tac-Toe Operations and Smoke Suite
//!
//! UNIT UNDER TEST: TicTacToeClient, tictactoe smoke suite
//!
//! BUSINESS RESPONSIBILITY:
//!   - Read the whole board or one square
//!   - Place a mark with a JSON body
//!   - Surface out-of-range squares as error statuses
//!
//! TEST COVERAGE:
//!   - Board and square paths
//!   - PUT body and updated board parsing
//!   - Full suite against a healthy mock, with listener totals

mod common;

use api_harness::models::Status;
use api_harness::suites::tictactoe::smoke_suite;
use api_harness::{
    ApiProfile, Mark, ResponseVerifier, SuiteRunner, TestLifecycleReporter, TicTacToeClient,
};
use common::*;
use serde_json::json;
use std::sync::Arc;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_get_board_parses_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/board"))
        .respond_with(json_response(200, board_with(3, 3, "O")))
        .expect(1)
        .mount(&server)
        .await;

    let response = tictactoe_client(&server).get_board().await.unwrap();

    ResponseVerifier::verify_json_path_equals(&response.body, "board[2][2]", &json!("O")).unwrap();
    let status: Status = response.parse().unwrap();
    assert_eq!(status.winner, Mark::Empty);
    assert_eq!(status.square(3, 3), Some(Mark::O));
    assert_eq!(status.square(1, 1), Some(Mark::Empty));
}

#[tokio::test]
async fn test_place_mark_puts_json_body() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/board/2/3"))
        .and(body_json(json!({"mark": "X"})))
        .respond_with(json_response(200, board_with(2, 3, "X")))
        .expect(1)
        .mount(&server)
        .await;

    let response = tictactoe_client(&server)
        .place_mark(2, 3, Mark::X)
        .await
        .unwrap();

    let status: Status = response.parse().unwrap();
    assert_eq!(status.square(2, 3), Some(Mark::X));
}

#[tokio::test]
async fn test_square_outside_board_returns_error_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/board/4/1"))
        .respond_with(ResponseTemplate::new(400).set_body_string("Illegal coordinates"))
        .mount(&server)
        .await;

    let response = tictactoe_client(&server).get_square(4, 1).await.unwrap();

    assert_eq!(response.status, 400);
    assert!(ResponseVerifier::verify_valid_json(&response.body).is_err());
}

#[tokio::test]
async fn test_smoke_suite_passes_against_healthy_api() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/board"))
        .respond_with(json_response(200, board_with(1, 1, ".")))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/board/1/1"))
        .respond_with(json_response(200, board_with(1, 1, "X")))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/board/1/1"))
        .respond_with(json_response(200, json!("X")))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/board/4/1"))
        .respond_with(ResponseTemplate::new(400))
        .mount(&server)
        .await;

    let config = create_test_config(ApiProfile::TicTacToe, &server);
    let client = TicTacToeClient::new(create_factory(config.clone()));
    let reporter = Arc::new(TestLifecycleReporter::new());

    let summary = SuiteRunner::new(create_runner_config(0))
        .with_listener(reporter.clone())
        .run("tictactoe-smoke", smoke_suite(client, &config))
        .await;

    assert!(summary.is_success(), "failures: {:?}", summary.results);
    let counts = reporter.counts();
    assert_eq!(counts.passed, 3);
    assert_eq!(counts.failed, 0);
}
