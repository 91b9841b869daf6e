//! Harness configuration
//!
//! [`ConfigurationStore`] holds raw key/value settings; [`ApiConfig`] is the
//! typed snapshot resolved from it for one [`ApiProfile`].

pub mod api_config;
pub mod store;

pub use api_config::{ApiConfig, ApiProfile, ProfileDefaults};
pub use store::{env_var_name, ConfigurationStore};
