//! Error types for the coordination layer

use thiserror::Error;

use crate::accountdb::AccountError;
use crate::storage::StorageError;

/// Errors that can occur while coordinating a request or startup step
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoordinationError {
    /// Bad or missing input the caller can fix
    #[error("{0}")]
    Validation(String),

    /// Resource not found with context
    #[error("Resource not found: {resource_type} {resource_id}")]
    ResourceNotFound {
        resource_type: String,
        resource_id: String,
    },

    /// Database error
    #[error("Database error: {0}")]
    Database(String),

    /// Error from the account database operations
    #[error("Account error: {0}")]
    AccountError(AccountError),
}

impl CoordinationError {
    /// Log the error and return self
    ///
    /// This method logs the error with appropriate context and returns self,
    /// allowing for method chaining and explicit logging when needed.
    pub fn log(self) -> Self {
        match &self {
            Self::Validation(msg) => tracing::warn!("Validation error: {}", msg),
            Self::ResourceNotFound {
                resource_type,
                resource_id,
            } => tracing::info!("Resource not found: {} {}", resource_type, resource_id),
            Self::Database(msg) => tracing::error!("Database error: {}", msg),
            Self::AccountError(err) => tracing::error!("Account error: {}", err),
        }
        self
    }
}

impl From<AccountError> for CoordinationError {
    fn from(err: AccountError) -> Self {
        let error = Self::AccountError(err);
        error.log()
    }
}

impl From<StorageError> for CoordinationError {
    fn from(err: StorageError) -> Self {
        let error = Self::Database(err.to_string());
        error.log()
    }
}
