//! Properties-backed configuration store
//!
//! Settings are resolved in this order: explicit overrides, environment
//! variables, the properties source, and finally the caller's default.

use crate::error::{HarnessError, HarnessResult};
use crate::logging::{log_debug, log_info};
use once_cell::sync::OnceCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable naming the properties file used by [`ConfigurationStore::global`].
pub const CONFIG_PATH_ENV: &str = "API_HARNESS_CONFIG";

/// Properties file used when [`CONFIG_PATH_ENV`] is not set.
pub const DEFAULT_CONFIG_PATH: &str = "config/api.properties";

/// Key selecting the environment overlay for the base URL.
pub const ENVIRONMENT_KEY: &str = "test.environment";

/// Key of the base URL.
pub const BASE_URL_KEY: &str = "api.base.url";

static GLOBAL: OnceCell<ConfigurationStore> = OnceCell::new();

/// Read-only key/value configuration
#[derive(Debug, Clone)]
pub struct ConfigurationStore {
    source: Option<PathBuf>,
    values: HashMap<String, String>,
    overrides: HashMap<String, String>,
    environment: HashMap<String, String>,
}

impl ConfigurationStore {
    /// Load a properties file and snapshot the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::ConfigurationError`] if the file cannot be read
    /// or contains a line without a key.
    pub fn load(path: impl AsRef<Path>) -> HarnessResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            HarnessError::configuration_error(format!(
                "cannot read configuration file {}: {e}",
                path.display()
            ))
        })?;

        let mut store = Self::parse(&text)?;
        store.source = Some(path.to_path_buf());

        log_info!(
            source = %path.display(),
            entries = store.values.len(),
            "Configuration loaded"
        );

        Ok(store)
    }

    /// Build a store from properties text and snapshot the process environment.
    pub fn parse(text: &str) -> HarnessResult<Self> {
        Ok(Self {
            source: None,
            values: parse_properties(text)?,
            overrides: HashMap::new(),
            environment: std::env::vars().collect(),
        })
    }

    /// Add an explicit override; it wins over every other source.
    pub fn with_override(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.overrides.insert(key.into(), value.into());
        self
    }

    /// Drop the environment snapshot so only file values and explicit
    /// overrides are consulted.
    pub fn without_environment(mut self) -> Self {
        self.environment.clear();
        self
    }

    /// Initialize the process-wide store from `path`.
    ///
    /// Exactly one load happens even when several threads race here; later
    /// calls return the store created by the first one, whatever path they pass.
    pub fn init(path: impl AsRef<Path>) -> HarnessResult<&'static Self> {
        GLOBAL.get_or_try_init(|| Self::load(path))
    }

    /// The process-wide store, loading it from [`CONFIG_PATH_ENV`] or
    /// [`DEFAULT_CONFIG_PATH`] on first access.
    pub fn global() -> HarnessResult<&'static Self> {
        GLOBAL.get_or_try_init(|| {
            let path = std::env::var(CONFIG_PATH_ENV)
                .unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
            Self::load(path)
        })
    }

    /// Path of the properties file, if the store was loaded from one.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Look up a key; `None` when no source defines it.
    pub fn get(&self, key: &str) -> Option<&str> {
        if let Some(value) = self.overrides.get(key) {
            return Some(value);
        }
        if let Some(value) = self.environment.get(&env_var_name(key)) {
            return Some(value);
        }
        self.values.get(key).map(String::as_str)
    }

    pub fn get_or(&self, key: &str, default: &str) -> String {
        self.get(key).unwrap_or(default).to_string()
    }

    /// Look up a key that must be present.
    pub fn require(&self, key: &str) -> HarnessResult<&str> {
        self.get(key)
            .filter(|value| !value.is_empty())
            .ok_or_else(|| {
                HarnessError::configuration_error(format!("required key '{key}' is not set"))
            })
    }

    pub fn get_int(&self, key: &str, default: i64) -> HarnessResult<i64> {
        match self.get(key) {
            None => Ok(default),
            Some(raw) => raw.trim().parse::<i64>().map_err(|_| invalid_value(key, raw, "integer")),
        }
    }

    pub fn get_bool(&self, key: &str, default: bool) -> HarnessResult<bool> {
        match self.get(key) {
            None => Ok(default),
            Some(raw) => match raw.trim().to_ascii_lowercase().as_str() {
                "true" | "yes" | "on" | "1" => Ok(true),
                "false" | "no" | "off" | "0" => Ok(false),
                _ => Err(invalid_value(key, raw, "boolean")),
            },
        }
    }

    /// Read a duration. Bare numbers are seconds; `s` and `ms` suffixes are
    /// accepted.
    pub fn get_duration(&self, key: &str, default: Duration) -> HarnessResult<Duration> {
        match self.get(key) {
            None => Ok(default),
            Some(raw) => parse_duration(raw).ok_or_else(|| invalid_value(key, raw, "duration")),
        }
    }

    /// Duration read from a key whose bare numbers are milliseconds.
    pub fn get_millis(&self, key: &str, default: Duration) -> HarnessResult<Duration> {
        match self.get(key) {
            None => Ok(default),
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .map(Duration::from_millis)
                .map_err(|_| invalid_value(key, raw, "milliseconds")),
        }
    }

    /// Base URL, preferring `api.base.url.<env>` when `test.environment` is set.
    /// An explicit override of `api.base.url` beats the overlay.
    pub fn base_url(&self) -> Option<&str> {
        if let Some(url) = self.overrides.get(BASE_URL_KEY) {
            return Some(url);
        }
        if let Some(env) = self.get(ENVIRONMENT_KEY).filter(|env| !env.is_empty()) {
            if let Some(url) = self.get(&format!("{BASE_URL_KEY}.{env}")) {
                log_debug!(environment = %env, base_url = %url, "Using environment base URL");
                return Some(url);
            }
        }
        self.get(BASE_URL_KEY)
    }

    /// All `(suffix, value)` pairs whose key starts with `prefix`, from the
    /// file and explicit overrides. Sorted by suffix.
    pub fn entries_with_prefix(&self, prefix: &str) -> Vec<(String, String)> {
        let mut merged: HashMap<&str, &str> = HashMap::new();
        for (key, value) in self.values.iter().chain(self.overrides.iter()) {
            if let Some(suffix) = key.strip_prefix(prefix) {
                if !suffix.is_empty() {
                    merged.insert(suffix, value);
                }
            }
        }
        let mut entries: Vec<(String, String)> = merged
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        entries.sort();
        entries
    }
}

/// Environment variable consulted for `key`: `api.base.url` → `API_BASE_URL`.
pub fn env_var_name(key: &str) -> String {
    key.chars()
        .map(|c| match c {
            '.' | '-' => '_',
            other => other.to_ascii_uppercase(),
        })
        .collect()
}

fn invalid_value(key: &str, raw: &str, kind: &str) -> HarnessError {
    HarnessError::configuration_error(format!("key '{key}' has invalid {kind} value '{raw}'"))
}

pub(crate) fn parse_duration(raw: &str) -> Option<Duration> {
    let raw = raw.trim();
    if let Some(ms) = raw.strip_suffix("ms") {
        return ms.trim().parse::<u64>().ok().map(Duration::from_millis);
    }
    let secs = raw.strip_suffix('s').unwrap_or(raw);
    secs.trim().parse::<u64>().ok().map(Duration::from_secs)
}

/// Parse properties text: `key=value`, `key: value` or `key value` lines,
/// `#`/`!` comments and `\` line continuations.
pub(crate) fn parse_properties(text: &str) -> HarnessResult<HashMap<String, String>> {
    let mut values = HashMap::new();
    let mut pending = String::new();
    let mut start_line = 0;

    for (index, line) in text.lines().enumerate() {
        let trimmed = if pending.is_empty() {
            start_line = index + 1;
            line.trim()
        } else {
            line.trim_start()
        };

        if pending.is_empty() && (trimmed.is_empty() || trimmed.starts_with(['#', '!'])) {
            continue;
        }

        if let Some(continued) = trimmed.strip_suffix('\\') {
            pending.push_str(continued);
            continue;
        }
        pending.push_str(trimmed);

        let (key, value) = split_entry(&pending).ok_or_else(|| {
            HarnessError::configuration_error(format!(
                "line {start_line} has no key: '{pending}'"
            ))
        })?;
        values.insert(key, value);
        pending.clear();
    }

    if !pending.is_empty() {
        let (key, value) = split_entry(&pending).ok_or_else(|| {
            HarnessError::configuration_error(format!(
                "line {start_line} has no key: '{pending}'"
            ))
        })?;
        values.insert(key, value);
    }

    Ok(values)
}

fn split_entry(line: &str) -> Option<(String, String)> {
    let line = line.trim();
    let split_at = line.find(|c: char| c == '=' || c == ':' || c.is_whitespace());

    let (key, value) = match split_at {
        Some(pos) => {
            let (key, rest) = line.split_at(pos);
            let mut chars = rest.chars();
            chars.next();
            let value = chars.as_str().trim_start();
            let value = value.strip_prefix(['=', ':']).unwrap_or(value);
            (key.trim(), value.trim())
        }
        None => (line, ""),
    };

    if key.is_empty() {
        return None;
    }
    Some((key.to_string(), value.to_string()))
}
