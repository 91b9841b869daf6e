//! Tic-Tac-Toe board operations

use super::execute;
use crate::error::HarnessResult;
use crate::http::{ApiResponse, HttpClientFactory, Method};
use crate::models::{Mark, MarkRequest};
use std::sync::Arc;

const API: &str = "tictactoe";

#[derive(Debug, Clone)]
pub struct TicTacToeClient {
    factory: Arc<HttpClientFactory>,
}

impl TicTacToeClient {
    pub fn new(factory: Arc<HttpClientFactory>) -> Self {
        Self { factory }
    }

    /// `GET /board`
    pub async fn get_board(&self) -> HarnessResult<ApiResponse> {
        let request = self.factory.request(Method::GET, "/board")?;
        execute(API, "get_board", request).await
    }

    /// `GET /board/{row}/{column}`
    pub async fn get_square(&self, row: u8, column: u8) -> HarnessResult<ApiResponse> {
        let request = self
            .factory
            .request(Method::GET, "/board/{row}/{column}")?
            .path_param("row", row)
            .path_param("column", column);
        execute(API, "get_square", request).await
    }

    /// `PUT /board/{row}/{column}` with `{"mark": ...}`
    pub async fn place_mark(&self, row: u8, column: u8, mark: Mark) -> HarnessResult<ApiResponse> {
        let request = self
            .factory
            .request(Method::PUT, "/board/{row}/{column}")?
            .path_param("row", row)
            .path_param("column", column)
            .json(&MarkRequest { mark })?;
        execute(API, "place_mark", request).await
    }
}
