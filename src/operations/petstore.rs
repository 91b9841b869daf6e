//! Petstore operations: `/pets`

use super::execute;
use crate::error::HarnessResult;
use crate::http::{ApiResponse, HttpClientFactory, Method};
use crate::models::Pet;
use std::sync::Arc;

const API: &str = "petstore";

#[derive(Debug, Clone)]
pub struct PetstoreClient {
    factory: Arc<HttpClientFactory>,
}

impl PetstoreClient {
    pub fn new(factory: Arc<HttpClientFactory>) -> Self {
        Self { factory }
    }

    /// `GET /pets?limit=N`
    pub async fn list_pets(&self, limit: Option<u32>) -> HarnessResult<ApiResponse> {
        let request = self
            .factory
            .request(Method::GET, "/pets")?
            .query_opt("limit", limit);
        execute(API, "list_pets", request).await
    }

    /// `POST /pets` with the pet as JSON
    pub async fn create_pet(&self, pet: &Pet) -> HarnessResult<ApiResponse> {
        let request = self.factory.request(Method::POST, "/pets")?.json(pet)?;
        execute(API, "create_pet", request).await
    }

    /// `GET /pets/{petId}`
    pub async fn get_pet_by_id(&self, id: impl ToString) -> HarnessResult<ApiResponse> {
        let request = self
            .factory
            .request(Method::GET, "/pets/{petId}")?
            .path_param("petId", id);
        execute(API, "get_pet_by_id", request).await
    }
}
