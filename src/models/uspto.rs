//! USPTO dataset search models

use serde::{Deserialize, Serialize};

/// Response of `GET /`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataSetList {
    pub total: u32,
    pub apis: Vec<DataSetEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataSetEntry {
    pub api_key: String,
    pub api_version_number: String,
    #[serde(default)]
    pub api_url: Option<String>,
    #[serde(default)]
    pub api_documentation_url: Option<String>,
}

/// Form fields of `POST /{dataset}/{version}/records`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchCriteria {
    /// Lucene query syntax; `*:*` matches everything
    pub criteria: String,
    pub start: u32,
    pub rows: u32,
}

impl Default for SearchCriteria {
    fn default() -> Self {
        Self {
            criteria: "*:*".to_string(),
            start: 0,
            rows: 100,
        }
    }
}

impl SearchCriteria {
    pub fn new(criteria: impl Into<String>) -> Self {
        Self {
            criteria: criteria.into(),
            ..Self::default()
        }
    }

    pub fn page(mut self, start: u32, rows: u32) -> Self {
        self.start = start;
        self.rows = rows;
        self
    }

    pub fn form_fields(&self) -> Vec<(String, String)> {
        vec![
            ("criteria".to_string(), self.criteria.clone()),
            ("start".to_string(), self.start.to_string()),
            ("rows".to_string(), self.rows.to_string()),
        ]
    }
}

/// Response of a records search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    pub response: SearchResult,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    pub num_found: u64,
    pub start: u64,
    #[serde(default)]
    pub docs: Vec<serde_json::Value>,
}
