//! Shared helpers for unit tests across the crate
//!
//! Every test gets its own in-memory SQLite database, so tests can run in
//! parallel without stepping on each other.

use std::sync::Arc;

use crate::accountdb::{AccountStore, NewContact};
use crate::config::{DashboardConfig, StoreConfig};
use crate::dashboard::{DataFetcher, ExternalServiceError};
use crate::storage::connect;

/// Connect to a fresh in-memory store without creating any tables
pub(crate) async fn empty_test_store() -> AccountStore {
    let store = connect(&StoreConfig::sqlite_in_memory())
        .await
        .expect("Failed to open in-memory SQLite store");
    AccountStore::new(Arc::from(store))
}

/// Connect to a fresh in-memory store with the account tables created
pub(crate) async fn init_test_store() -> AccountStore {
    let store = empty_test_store().await;
    store
        .init()
        .await
        .expect("Failed to initialize AccountStore");
    store
}

pub(crate) fn sample_contact(user_id: i64, name: &str) -> NewContact {
    NewContact::new(user_id, name).with_email(format!(
        "{}@example.com",
        name.to_lowercase().replace(' ', ".")
    ))
}

/// Fetcher double answering by URL path, ignoring the query string
#[derive(Default)]
pub(crate) struct MockFetcher {
    responses: std::collections::HashMap<String, Result<serde_json::Value, ExternalServiceError>>,
    calls: std::sync::Mutex<Vec<url::Url>>,
}

impl MockFetcher {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn respond(
        mut self,
        path: &str,
        response: Result<serde_json::Value, ExternalServiceError>,
    ) -> Self {
        self.responses.insert(path.to_string(), response);
        self
    }

    /// Every URL requested so far, in call order
    pub(crate) fn calls(&self) -> Vec<url::Url> {
        self.calls.lock().unwrap().clone()
    }

    fn answer(&self, url: &url::Url) -> Result<serde_json::Value, ExternalServiceError> {
        self.calls.lock().unwrap().push(url.clone());
        self.responses
            .get(url.path())
            .cloned()
            .unwrap_or(Err(ExternalServiceError::Status(404)))
    }
}

#[async_trait::async_trait]
impl DataFetcher for MockFetcher {
    async fn get_json(
        &self,
        url: &url::Url,
    ) -> Result<serde_json::Value, ExternalServiceError> {
        self.answer(url)
    }

    async fn post_json(
        &self,
        url: &url::Url,
        _body: &serde_json::Value,
    ) -> Result<serde_json::Value, ExternalServiceError> {
        self.answer(url)
    }
}

/// Dashboard endpoints pointing at distinct paths of a fake host
pub(crate) fn test_dashboard_config() -> DashboardConfig {
    DashboardConfig {
        earthquake_url: "http://mock.test/earthquakes?limit=1".parse().unwrap(),
        weather_url: "http://mock.test/forecast".parse().unwrap(),
        air_quality_url: "http://mock.test/air-quality".parse().unwrap(),
        latitude: 10.675,
        longitude: 122.95,
    }
}
