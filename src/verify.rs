//! Structural assertions over API responses
//!
//! Every check returns `Ok(())` or a
//! [`HarnessError::VerificationFailure`] carrying the expected and actual
//! values. Checks only read the response.

use crate::error::{HarnessError, HarnessResult};
use crate::http::ApiResponse;
use crate::logging::log_debug;
use serde_json::Value;
use std::time::Duration;

/// Stateless response assertions
#[derive(Debug, Clone, Copy, Default)]
pub struct ResponseVerifier;

impl ResponseVerifier {
    pub fn verify_status_code(actual: u16, expected: u16) -> HarnessResult<()> {
        if actual != expected {
            return Err(HarnessError::verification_failure(
                "status code",
                expected.to_string(),
                actual.to_string(),
            ));
        }
        log_debug!(status = actual, "Status code verified");
        Ok(())
    }

    /// Status check that reports the body on failure.
    pub fn verify_status(response: &ApiResponse, expected: u16) -> HarnessResult<()> {
        if response.status != expected {
            return Err(HarnessError::verification_failure(
                "status code",
                expected.to_string(),
                format!("{} (body: {})", response.status, truncate(&response.body, 200)),
            ));
        }
        Ok(())
    }

    pub fn verify_response_not_empty(body: Option<&str>) -> HarnessResult<()> {
        match body {
            Some(text) if !text.trim().is_empty() => Ok(()),
            Some(_) => Err(HarnessError::verification_failure(
                "response body",
                "non-empty body",
                "blank body",
            )),
            None => Err(HarnessError::verification_failure(
                "response body",
                "non-empty body",
                "no body",
            )),
        }
    }

    /// Parse `body` as JSON; the parse error becomes the actual value.
    pub fn verify_valid_json(body: &str) -> HarnessResult<Value> {
        serde_json::from_str(body).map_err(|e| {
            let parse = HarnessError::parse_error(e.to_string());
            HarnessError::verification_failure("valid JSON", "a JSON document", parse.to_string())
        })
    }

    pub fn verify_json_path_exists(body: &str, path: &str) -> HarnessResult<()> {
        let document = Self::verify_valid_json(body)?;
        if json_path(&document, path).is_none() {
            return Err(HarnessError::verification_failure(
                "JSON path",
                format!("'{path}' to exist"),
                format!("missing in {}", truncate(body, 200)),
            ));
        }
        Ok(())
    }

    pub fn verify_json_path_equals(body: &str, path: &str, expected: &Value) -> HarnessResult<()> {
        let document = Self::verify_valid_json(body)?;
        match json_path(&document, path) {
            Some(actual) if actual == expected => Ok(()),
            Some(actual) => Err(HarnessError::verification_failure(
                format!("JSON path '{path}'"),
                expected.to_string(),
                actual.to_string(),
            )),
            None => Err(HarnessError::verification_failure(
                format!("JSON path '{path}'"),
                expected.to_string(),
                "missing",
            )),
        }
    }

    /// The declared content type must start with `expected`; parameters such
    /// as `; charset=utf-8` are ignored.
    pub fn verify_content_type(response: &ApiResponse, expected: &str) -> HarnessResult<()> {
        let Some(declared) = response.content_type() else {
            return Err(HarnessError::verification_failure(
                "content type",
                expected,
                "no Content-Type header",
            ));
        };

        let media_type = declared.split(';').next().unwrap_or_default().trim();
        let expected_type = expected.split(';').next().unwrap_or_default().trim();
        let matches = media_type
            .to_ascii_lowercase()
            .starts_with(&expected_type.to_ascii_lowercase());

        if !matches {
            return Err(HarnessError::verification_failure(
                "content type",
                expected,
                declared,
            ));
        }
        Ok(())
    }

    /// Soft performance check; the call has already completed.
    pub fn verify_response_time(elapsed_ms: u64, ceiling_ms: u64) -> HarnessResult<()> {
        if elapsed_ms > ceiling_ms {
            return Err(HarnessError::verification_failure(
                "response time",
                format!("<= {ceiling_ms} ms"),
                format!("{elapsed_ms} ms"),
            ));
        }
        Ok(())
    }

    pub fn verify_elapsed(response: &ApiResponse, ceiling: Duration) -> HarnessResult<()> {
        let ceiling_ms = u64::try_from(ceiling.as_millis()).unwrap_or(u64::MAX);
        Self::verify_response_time(response.elapsed_ms(), ceiling_ms)
    }
}

/// Resolve a dotted path such as `apis[0].apiKey`, `apis.0.apiKey` or
/// `$.response.numFound`. The empty path (or `$`) is the document itself.
pub fn json_path<'a>(document: &'a Value, path: &str) -> Option<&'a Value> {
    let path = path.trim();
    let path = path.strip_prefix('$').unwrap_or(path);
    let path = path.strip_prefix('.').unwrap_or(path);

    let mut current = document;
    for segment in path.split('.').filter(|segment| !segment.is_empty()) {
        let (field, indices) = split_indices(segment)?;
        if !field.is_empty() {
            current = match current {
                Value::Object(map) => map.get(field)?,
                Value::Array(items) => items.get(field.parse::<usize>().ok()?)?,
                _ => return None,
            };
        }
        for index in indices {
            current = current.as_array()?.get(index)?;
        }
    }
    Some(current)
}

/// `name[1][2]` → `("name", [1, 2])`
fn split_indices(segment: &str) -> Option<(&str, Vec<usize>)> {
    let Some(open) = segment.find('[') else {
        return Some((segment, Vec::new()));
    };
    let (field, mut rest) = segment.split_at(open);
    let mut indices = Vec::new();
    while !rest.is_empty() {
        let inner = rest.strip_prefix('[')?;
        let close = inner.find(']')?;
        indices.push(inner[..close].trim().parse::<usize>().ok()?);
        rest = &inner[close + 1..];
    }
    Some((field, indices))
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut shortened: String = text.chars().take(max_chars).collect();
    shortened.push_str("...");
    shortened
}
