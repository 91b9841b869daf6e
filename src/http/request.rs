//! Per-call request state
//!
//! A [`RequestContext`] is created for every call so concurrent tests never
//! share path parameters, query strings, headers or bodies.

use super::response::ApiResponse;
use crate::error::{HarnessError, HarnessResult};
use crate::logging::log_debug;
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Method;
use serde::Serialize;
use std::time::Instant;

static PATH_PARAM: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\{([A-Za-z_][A-Za-z0-9_]*)\}").unwrap_or_else(|e| panic!("path regex: {e}"))
});

#[derive(Debug, Clone)]
enum RequestBody {
    Empty,
    Json(serde_json::Value),
    Form(Vec<(String, String)>),
}

/// Builder for one HTTP call against the configured base URL
#[derive(Debug)]
pub struct RequestContext {
    client: reqwest::Client,
    base_url: String,
    method: Method,
    path_template: String,
    path_params: Vec<(String, String)>,
    query: Vec<(String, String)>,
    headers: HeaderMap,
    body: RequestBody,
    log_bodies: bool,
}

impl RequestContext {
    pub(crate) fn new(
        client: reqwest::Client,
        base_url: impl Into<String>,
        method: Method,
        path_template: impl Into<String>,
        log_bodies: bool,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            method,
            path_template: path_template.into(),
            path_params: Vec::new(),
            query: Vec::new(),
            headers: HeaderMap::new(),
            body: RequestBody::Empty,
            log_bodies,
        }
    }

    /// Bind a `{name}` placeholder of the path template.
    pub fn path_param(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.path_params.push((name.into(), value.to_string()));
        self
    }

    pub fn query(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((name.into(), value.to_string()));
        self
    }

    /// Add a query parameter only when a value is present.
    pub fn query_opt<T: ToString>(self, name: impl Into<String>, value: Option<T>) -> Self {
        match value {
            Some(value) => self.query(name, value),
            None => self,
        }
    }

    /// Add a header for this call only.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::ConfigurationError`] if the name or value is not
    /// a valid HTTP header.
    pub fn header(mut self, name: &str, value: &str) -> HarnessResult<Self> {
        let name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| {
            HarnessError::configuration_error(format!("invalid header name '{name}': {e}"))
        })?;
        let value = HeaderValue::from_str(value).map_err(|e| {
            HarnessError::configuration_error(format!("invalid value for header '{name}': {e}"))
        })?;
        self.headers.insert(name, value);
        Ok(self)
    }

    /// Serialize `body` as the JSON request body.
    pub fn json<T: Serialize + ?Sized>(mut self, body: &T) -> HarnessResult<Self> {
        let value = serde_json::to_value(body).map_err(|e| {
            HarnessError::parse_error(format!("cannot serialize request body: {e}"))
        })?;
        self.body = RequestBody::Json(value);
        Ok(self)
    }

    /// Send `fields` form-encoded.
    pub fn form(mut self, fields: Vec<(String, String)>) -> Self {
        self.body = RequestBody::Form(fields);
        self
    }

    /// Resolved request path, with every placeholder substituted.
    pub fn path(&self) -> HarnessResult<String> {
        expand_path(&self.path_template, &self.path_params)
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Issue the request and read the whole body.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::TransportError`] when the connection fails,
    /// times out or the body cannot be read, and
    /// [`HarnessError::ConfigurationError`] when a path placeholder is unbound.
    pub async fn send(self) -> HarnessResult<ApiResponse> {
        let url = format!("{}{}", self.base_url, self.path()?);

        let mut builder = self
            .client
            .request(self.method.clone(), &url)
            .headers(self.headers);
        if !self.query.is_empty() {
            builder = builder.query(&self.query);
        }
        builder = match &self.body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder.json(value),
            RequestBody::Form(fields) => builder.form(fields),
        };

        if self.log_bodies {
            log_debug!(
                method = %self.method,
                url = %url,
                query = ?self.query,
                body = %describe_body(&self.body),
                "HTTP request"
            );
        }

        let started = Instant::now();
        let response = builder.send().await?;
        let status = response.status().as_u16();
        let headers = response.headers().clone();
        let body = response.text().await?;
        let elapsed = started.elapsed();

        if self.log_bodies {
            log_debug!(
                method = %self.method,
                url = %url,
                status = status,
                elapsed_ms = elapsed.as_millis(),
                body = %body,
                "HTTP response"
            );
        }

        Ok(ApiResponse::new(status, headers, body, elapsed))
    }
}

/// Substitute `{name}` placeholders in `template`.
///
/// # Errors
///
/// Returns [`HarnessError::ConfigurationError`] naming the first placeholder
/// without a binding.
pub fn expand_path(template: &str, params: &[(String, String)]) -> HarnessResult<String> {
    let mut expanded = String::with_capacity(template.len());
    let mut last = 0;

    for captures in PATH_PARAM.captures_iter(template) {
        let (Some(whole), Some(name)) = (captures.get(0), captures.get(1)) else {
            continue;
        };
        let value = params
            .iter()
            .find(|(key, _)| key == name.as_str())
            .map(|(_, value)| value)
            .ok_or_else(|| {
                HarnessError::configuration_error(format!(
                    "path parameter '{}' is not bound for '{template}'",
                    name.as_str()
                ))
            })?;
        expanded.push_str(&template[last..whole.start()]);
        expanded.push_str(value);
        last = whole.end();
    }
    expanded.push_str(&template[last..]);

    Ok(expanded)
}

fn describe_body(body: &RequestBody) -> String {
    match body {
        RequestBody::Empty => String::new(),
        RequestBody::Json(value) => value.to_string(),
        RequestBody::Form(fields) => fields
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join("&"),
    }
}
