// Test modules for api-harness crate
//
// Each source module has a corresponding test file that focuses on
// behaviour verification.

// Test helper utilities
pub mod helpers;

pub mod error;
pub mod reporter;
