//! Operation clients for each API under test
//!
//! Every method maps one logical operation to an HTTP call and returns the
//! raw [`ApiResponse`](crate::http::ApiResponse). Nothing here asserts on the
//! response and nothing here retries.

pub mod petstore;
pub mod tictactoe;
pub mod uspto;

pub use petstore::PetstoreClient;
pub use tictactoe::TicTacToeClient;
pub use uspto::UsptoClient;

use crate::error::HarnessResult;
use crate::http::{ApiResponse, RequestContext};
use crate::logging::{log_info, log_warn};

/// Send `request` and log the operation with its outcome.
pub(crate) async fn execute(
    api: &'static str,
    operation: &'static str,
    request: RequestContext,
) -> HarnessResult<ApiResponse> {
    let method = request.method().clone();
    match request.send().await {
        Ok(response) => {
            log_info!(
                api = api,
                operation = operation,
                method = %method,
                status = response.status,
                elapsed_ms = response.elapsed_ms(),
                "API operation completed"
            );
            Ok(response)
        }
        Err(error) => {
            log_warn!(
                api = api,
                operation = operation,
                method = %method,
                error = %error,
                "API operation failed"
            );
            Err(error)
        }
    }
}
