//! `POST /api/safe`

use axum::{Json, extract::State, extract::rejection::JsonRejection};
use serde_json::Value;

use lislip::{notify_safe_core, parse_user_id};

use crate::error::{ErrorResponse, IntoResponseError, MessageBody};
use crate::state::AppState;

/// Handle an "I am safe" request
///
/// A body that is not JSON is treated the same as a body without `userId`.
pub(crate) async fn notify_safe(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<MessageBody>, ErrorResponse> {
    let body = match body {
        Ok(Json(body)) => Some(body),
        Err(rejection) => {
            tracing::debug!("Unreadable safety request body: {}", rejection);
            None
        }
    };

    let user_id = parse_user_id(body.as_ref().and_then(|b| b.get("userId"))).into_response_error()?;

    let notification = notify_safe_core(state.directory.as_ref(), user_id)
        .await
        .into_response_error()?;

    Ok(Json(MessageBody::new(notification.message)))
}
