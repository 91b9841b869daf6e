//! Smoke suites for each API under test
//!
//! Each function returns test cases ready for
//! [`SuiteRunner::run`](crate::runner::SuiteRunner::run).

pub mod petstore;
pub mod tictactoe;
pub mod uspto;
