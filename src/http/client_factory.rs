//! Shared HTTP client construction

use super::request::RequestContext;
use crate::config::ApiConfig;
use crate::error::{HarnessError, HarnessResult};
use crate::logging::log_debug;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT};
use reqwest::Method;

/// Builds one configured `reqwest::Client` and hands out per-call
/// [`RequestContext`]s that share it.
#[derive(Debug)]
pub struct HttpClientFactory {
    config: ApiConfig,
    client: reqwest::Client,
}

impl HttpClientFactory {
    /// Create a factory for `config` and build its client.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::ConfigurationError`] if the base URL is empty or
    /// not an absolute http(s) URL, or if a default header is not a valid
    /// header name or value.
    pub fn new(config: ApiConfig) -> HarnessResult<Self> {
        validate_base_url(&config.base_url)?;
        let client = build_client(&config)?;
        Ok(Self { config, client })
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// The shared client; every request context clones this handle.
    pub fn client(&self) -> &reqwest::Client {
        &self.client
    }

    /// Start a fresh request for `path_template` (e.g. `/pets/{petId}`).
    pub fn request(&self, method: Method, path_template: &str) -> HarnessResult<RequestContext> {
        Ok(RequestContext::new(
            self.client.clone(),
            self.config.base_url.trim_end_matches('/'),
            method,
            path_template,
            self.config.logging_enabled,
        ))
    }
}

fn build_client(config: &ApiConfig) -> HarnessResult<reqwest::Client> {
    log_debug!(
        profile = %config.profile,
        base_url = %config.base_url,
        connect_timeout_ms = config.connect_timeout.as_millis(),
        read_timeout_ms = config.read_timeout.as_millis(),
        write_timeout_ms = config.write_timeout.as_millis(),
        logging_enabled = config.logging_enabled,
        "Building HTTP client"
    );

    // reqwest has no write timeout; it is folded into the overall deadline
    reqwest::Client::builder()
        .connect_timeout(config.connect_timeout)
        .read_timeout(config.read_timeout)
        .timeout(config.read_timeout.saturating_add(config.write_timeout))
        .default_headers(default_headers(config)?)
        .build()
        .map_err(|e| HarnessError::configuration_error(format!("cannot build HTTP client: {e}")))
}

fn default_headers(config: &ApiConfig) -> HarnessResult<HeaderMap> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

    for (name, value) in &config.default_headers {
        let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| {
            HarnessError::configuration_error(format!("invalid header name '{name}': {e}"))
        })?;
        let header_value = HeaderValue::from_str(value).map_err(|e| {
            HarnessError::configuration_error(format!("invalid value for header '{name}': {e}"))
        })?;
        headers.insert(header_name, header_value);
    }

    Ok(headers)
}

fn validate_base_url(base_url: &str) -> HarnessResult<()> {
    if base_url.trim().is_empty() {
        return Err(HarnessError::configuration_error("base URL is required"));
    }
    let url = reqwest::Url::parse(base_url).map_err(|e| {
        HarnessError::configuration_error(format!("invalid base URL '{base_url}': {e}"))
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(HarnessError::configuration_error(format!(
            "base URL '{base_url}' must use http or https"
        )));
    }
    Ok(())
}
