use axum::Json;
use http::StatusCode;
use lislip::{AccountError, CoordinationError};
use serde::Serialize;

pub(crate) const NOT_FOUND_MESSAGE: &str = "User or emergency contact not found.";
pub(crate) const SERVER_ERROR_MESSAGE: &str = "An error occurred on the server.";

#[derive(Debug, Serialize, PartialEq)]
pub struct MessageBody {
    pub message: String,
}

impl MessageBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

pub type ErrorResponse = (StatusCode, Json<MessageBody>);

/// Helper trait for converting errors to a `{"message": ...}` JSON response
pub trait IntoResponseError<T> {
    fn into_response_error(self) -> Result<T, ErrorResponse>;
}

/// Validation errors are echoed; everything else gets a fixed message so
/// internals never leak to the client
impl<T> IntoResponseError<T> for Result<T, CoordinationError> {
    fn into_response_error(self) -> Result<T, ErrorResponse> {
        self.map_err(|e| {
            let (status, message) = match e {
                CoordinationError::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
                CoordinationError::ResourceNotFound { .. }
                | CoordinationError::AccountError(AccountError::NotFound) => {
                    (StatusCode::NOT_FOUND, NOT_FOUND_MESSAGE.to_string())
                }
                CoordinationError::Database(_) | CoordinationError::AccountError(_) => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    SERVER_ERROR_MESSAGE.to_string(),
                ),
            };
            (status, Json(MessageBody::new(message)))
        })
    }
}
