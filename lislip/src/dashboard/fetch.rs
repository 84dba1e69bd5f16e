use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use url::Url;

use super::errors::ExternalServiceError;

const USER_AGENT: &str = concat!("lislip/", env!("CARGO_PKG_VERSION"));

/// Network access used by the dashboard and advisor
#[async_trait]
pub trait DataFetcher: Send + Sync {
    async fn get_json(&self, url: &Url) -> Result<Value, ExternalServiceError>;
    async fn post_json(&self, url: &Url, body: &Value) -> Result<Value, ExternalServiceError>;
}

/// [`DataFetcher`] backed by a shared `reqwest` client
#[derive(Clone, Debug)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self, ExternalServiceError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self { client })
    }

    async fn read_json(response: reqwest::Response) -> Result<Value, ExternalServiceError> {
        let status = response.status();
        if !status.is_success() {
            tracing::error!("External API responded with status: {}", status);
            return Err(ExternalServiceError::Status(status.as_u16()));
        }

        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[async_trait]
impl DataFetcher for HttpFetcher {
    async fn get_json(&self, url: &Url) -> Result<Value, ExternalServiceError> {
        // Query strings may carry API keys, so only host and path are logged
        tracing::debug!(host = url.host_str(), path = url.path(), "GET external API");
        let response = self.client.get(url.clone()).send().await?;
        Self::read_json(response).await
    }

    async fn post_json(&self, url: &Url, body: &Value) -> Result<Value, ExternalServiceError> {
        tracing::debug!(host = url.host_str(), path = url.path(), "POST external API");
        let response = self.client.post(url.clone()).json(body).send().await?;
        Self::read_json(response).await
    }
}
