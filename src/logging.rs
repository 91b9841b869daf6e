//! Logging utilities for api-harness
//!
//! Re-exports tracing macros with log_* naming convention so every module
//! logs through the same structured-field style.

pub use tracing::{debug as log_debug, error as log_error, info as log_info, warn as log_warn};
