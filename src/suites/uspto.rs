//! USPTO dataset search smoke tests

use crate::config::ApiConfig;
use crate::models::{DataSetList, SearchCriteria, SearchResponse};
use crate::operations::UsptoClient;
use crate::runner::TestCase;
use crate::verify::ResponseVerifier;

pub fn smoke_suite(client: UsptoClient, config: &ApiConfig) -> Vec<TestCase> {
    vec![
        list_datasets_returns_catalog(client.clone()),
        list_fields_returns_fields(
            client.clone(),
            config.default_dataset.clone(),
            config.default_version.clone(),
        ),
        search_returns_documents(client),
    ]
}

fn list_datasets_returns_catalog(client: UsptoClient) -> TestCase {
    TestCase::new("list_datasets_returns_catalog", move || {
        let client = client.clone();
        async move {
            let response = client.list_datasets().await?;
            ResponseVerifier::verify_status(&response, 200)?;
            ResponseVerifier::verify_json_path_exists(&response.body, "total")?;
            ResponseVerifier::verify_json_path_exists(&response.body, "apis")?;
            let catalog: DataSetList = response.parse()?;
            anyhow::ensure!(
                catalog.total as usize == catalog.apis.len(),
                "catalog total {} does not match {} entries",
                catalog.total,
                catalog.apis.len()
            );
            Ok(())
        }
    })
}

fn list_fields_returns_fields(client: UsptoClient, dataset: String, version: String) -> TestCase {
    TestCase::new("list_fields_returns_fields", move || {
        let client = client.clone();
        let dataset = dataset.clone();
        let version = version.clone();
        async move {
            let response = client.list_fields(&dataset, &version).await?;
            ResponseVerifier::verify_status(&response, 200)?;
            ResponseVerifier::verify_response_not_empty(Some(&response.body))?;
            ResponseVerifier::verify_valid_json(&response.body)?;
            Ok(())
        }
    })
}

fn search_returns_documents(client: UsptoClient) -> TestCase {
    TestCase::new("search_returns_documents", move || {
        let client = client.clone();
        async move {
            let criteria = SearchCriteria::default().page(0, 10);
            let response = client.search_default(&criteria).await?;
            ResponseVerifier::verify_status(&response, 200)?;
            ResponseVerifier::verify_json_path_exists(&response.body, "response.numFound")?;
            let found: SearchResponse = response.parse()?;
            anyhow::ensure!(
                found.response.docs.len() <= criteria.rows as usize,
                "asked for {} rows, got {}",
                criteria.rows,
                found.response.docs.len()
            );
            Ok(())
        }
    })
}
