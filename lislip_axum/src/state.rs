use std::sync::Arc;

use lislip::dashboard::{DataFetcher, ExternalServiceError, HttpFetcher};
use lislip::{AccountStore, AdvisorConfig, AppConfig, ContactDirectory, DashboardConfig};

/// Shared, read-only state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub directory: Arc<dyn ContactDirectory>,
    pub fetcher: Arc<dyn DataFetcher>,
    pub dashboard: Arc<DashboardConfig>,
    pub advisor: Arc<AdvisorConfig>,
}

impl AppState {
    pub fn new(
        directory: Arc<dyn ContactDirectory>,
        fetcher: Arc<dyn DataFetcher>,
        dashboard: DashboardConfig,
        advisor: AdvisorConfig,
    ) -> Self {
        Self {
            directory,
            fetcher,
            dashboard: Arc::new(dashboard),
            advisor: Arc::new(advisor),
        }
    }

    /// State backed by a SQL store and a real HTTP client
    pub fn from_config(
        store: AccountStore,
        config: &AppConfig,
    ) -> Result<Self, ExternalServiceError> {
        Ok(Self::new(
            Arc::new(store),
            Arc::new(HttpFetcher::new()?),
            config.dashboard.clone(),
            config.advisor.clone(),
        ))
    }
}
