use thiserror::Error;

use crate::storage::StorageError;

#[derive(Clone, Error, Debug, PartialEq)]
pub enum AccountError {
    #[error("Account not found")]
    NotFound,

    #[error("Duplicate value: {0}")]
    Duplicate(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),
}

impl From<StorageError> for AccountError {
    fn from(err: StorageError) -> Self {
        AccountError::Storage(err.to_string())
    }
}

impl From<sqlx::Error> for AccountError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                AccountError::Duplicate(db.message().to_string())
            }
            sqlx::Error::Database(db) if db.is_foreign_key_violation() => AccountError::NotFound,
            _ => AccountError::Storage(err.to_string()),
        }
    }
}
