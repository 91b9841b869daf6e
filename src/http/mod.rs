//! HTTP plumbing shared by the operation clients

pub mod client_factory;
pub mod request;
pub mod response;

pub use client_factory::HttpClientFactory;
pub use request::{expand_path, RequestContext};
pub use response::ApiResponse;
pub use reqwest::Method;
