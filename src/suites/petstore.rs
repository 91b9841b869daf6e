//! Petstore smoke tests

use crate::config::ApiConfig;
use crate::models::{Pet, PetstoreError};
use crate::operations::PetstoreClient;
use crate::runner::TestCase;
use crate::verify::ResponseVerifier;
use std::time::Duration;

/// Id that the API under test never assigns.
pub const UNKNOWN_PET_ID: i64 = 999_999_999;

pub fn smoke_suite(client: PetstoreClient, config: &ApiConfig) -> Vec<TestCase> {
    let ceiling = config.response_time_ceiling;
    vec![
        list_pets_returns_array(client.clone(), ceiling),
        create_pet_is_accepted(client.clone()),
        get_pet_by_id_returns_pet(client.clone()),
        get_unknown_pet_returns_not_found(client),
    ]
}

fn list_pets_returns_array(client: PetstoreClient, ceiling: Duration) -> TestCase {
    TestCase::new("list_pets_returns_array", move || {
        let client = client.clone();
        async move {
            let response = client.list_pets(Some(10)).await?;
            ResponseVerifier::verify_status(&response, 200)?;
            ResponseVerifier::verify_content_type(&response, "application/json")?;
            ResponseVerifier::verify_elapsed(&response, ceiling)?;
            let pets: Vec<Pet> = response.parse()?;
            anyhow::ensure!(pets.len() <= 10, "limit=10 returned {} pets", pets.len());
            Ok(())
        }
    })
}

fn create_pet_is_accepted(client: PetstoreClient) -> TestCase {
    TestCase::new("create_pet_is_accepted", move || {
        let client = client.clone();
        async move {
            let response = client.create_pet(&Pet::random()).await?;
            ResponseVerifier::verify_status(&response, 201)?;
            Ok(())
        }
    })
}

fn get_pet_by_id_returns_pet(client: PetstoreClient) -> TestCase {
    TestCase::new("get_pet_by_id_returns_pet", move || {
        let client = client.clone();
        async move {
            let response = client.get_pet_by_id(1).await?;
            ResponseVerifier::verify_status(&response, 200)?;
            ResponseVerifier::verify_response_not_empty(Some(&response.body))?;
            ResponseVerifier::verify_json_path_exists(&response.body, "name")?;
            ResponseVerifier::verify_json_path_equals(&response.body, "id", &serde_json::json!(1))?;
            Ok(())
        }
    })
}

fn get_unknown_pet_returns_not_found(client: PetstoreClient) -> TestCase {
    TestCase::new("get_unknown_pet_returns_not_found", move || {
        let client = client.clone();
        async move {
            let response = client.get_pet_by_id(UNKNOWN_PET_ID).await?;
            ResponseVerifier::verify_status(&response, 404)?;
            let error: PetstoreError = response.parse()?;
            anyhow::ensure!(error.code == 404, "error body carries code {}", error.code);
            Ok(())
        }
    })
}
