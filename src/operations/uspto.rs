//! USPTO dataset search operations

use super::execute;
use crate::error::HarnessResult;
use crate::http::{ApiResponse, HttpClientFactory, Method};
use crate::models::SearchCriteria;
use std::sync::Arc;

const API: &str = "uspto";

#[derive(Debug, Clone)]
pub struct UsptoClient {
    factory: Arc<HttpClientFactory>,
}

impl UsptoClient {
    pub fn new(factory: Arc<HttpClientFactory>) -> Self {
        Self { factory }
    }

    /// `GET /`
    pub async fn list_datasets(&self) -> HarnessResult<ApiResponse> {
        let request = self.factory.request(Method::GET, "/")?;
        execute(API, "list_datasets", request).await
    }

    /// `GET /{dataset}/{version}/fields`
    pub async fn list_fields(&self, dataset: &str, version: &str) -> HarnessResult<ApiResponse> {
        let request = self
            .factory
            .request(Method::GET, "/{dataset}/{version}/fields")?
            .path_param("dataset", dataset)
            .path_param("version", version);
        execute(API, "list_fields", request).await
    }

    /// `POST /{dataset}/{version}/records` with form-encoded criteria
    pub async fn search_records(
        &self,
        dataset: &str,
        version: &str,
        criteria: &SearchCriteria,
    ) -> HarnessResult<ApiResponse> {
        let request = self
            .factory
            .request(Method::POST, "/{dataset}/{version}/records")?
            .path_param("dataset", dataset)
            .path_param("version", version)
            .form(criteria.form_fields());
        execute(API, "search_records", request).await
    }

    /// Search the configured default dataset and version.
    pub async fn search_default(&self, criteria: &SearchCriteria) -> HarnessResult<ApiResponse> {
        let config = self.factory.config();
        self.search_records(&config.default_dataset, &config.default_version, criteria)
            .await
    }
}
