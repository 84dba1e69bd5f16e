use thiserror::Error;

/// Failure talking to a third-party API
///
/// Never shown to users directly; callers render a fixed fallback instead.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExternalServiceError {
    #[error("HTTP request failed: {0}")]
    Http(String),

    #[error("HTTP status error: {0}")]
    Status(u16),

    #[error("Unexpected response shape: {0}")]
    Malformed(String),
}

impl From<reqwest::Error> for ExternalServiceError {
    fn from(err: reqwest::Error) -> Self {
        Self::Http(err.to_string())
    }
}

impl From<serde_json::Error> for ExternalServiceError {
    fn from(err: serde_json::Error) -> Self {
        Self::Malformed(err.to_string())
    }
}
