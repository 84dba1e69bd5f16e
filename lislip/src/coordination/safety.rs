//! "I am safe" notification flow
//!
//! Delivery is simulated: the account holder's first emergency contact is
//! looked up and logged, no message actually leaves the process.

use serde::Serialize;
use serde_json::Value;

use crate::accountdb::{Account, ContactDirectory, EmergencyContact};

use super::errors::CoordinationError;

pub(crate) const USER_ID_REQUIRED: &str = "User ID is required.";
pub(crate) const USER_ID_NOT_INTEGER: &str = "User ID must be an integer.";

/// Outcome of a simulated safety notification
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SafetyNotification {
    pub account: Account,
    pub contact: EmergencyContact,
    pub message: String,
}

/// Interpret a loosely-typed `userId` from a request body
///
/// Missing, `null`, `false`, `0` and `""` all count as "not given". Integers
/// and strings holding an integer are accepted; anything else is rejected.
pub fn parse_user_id(value: Option<&Value>) -> Result<i64, CoordinationError> {
    let required = || CoordinationError::Validation(USER_ID_REQUIRED.to_string());
    let not_integer = || CoordinationError::Validation(USER_ID_NOT_INTEGER.to_string());

    match value {
        None | Some(Value::Null) | Some(Value::Bool(false)) => Err(required()),
        Some(Value::Number(n)) => {
            if let Some(id) = n.as_i64() {
                return if id == 0 { Err(required()) } else { Ok(id) };
            }
            match n.as_f64() {
                Some(f) if f == 0.0 || f.is_nan() => Err(required()),
                Some(f) if f.fract() == 0.0 && f.abs() < i64::MAX as f64 => Ok(f as i64),
                _ => Err(not_integer()),
            }
        }
        Some(Value::String(s)) if s.is_empty() => Err(required()),
        Some(Value::String(s)) => s.trim().parse::<i64>().map_err(|_| not_integer()),
        Some(_) => Err(not_integer()),
    }
}

/// Look up the account and its first contact, then report simulated delivery
#[tracing::instrument(skip(directory))]
pub async fn notify_safe_core(
    directory: &dyn ContactDirectory,
    user_id: i64,
) -> Result<SafetyNotification, CoordinationError> {
    tracing::info!("\"I Am Safe\" request received for user ID: {}", user_id);

    let not_found = || {
        CoordinationError::ResourceNotFound {
            resource_type: "Account or emergency contact".to_string(),
            resource_id: user_id.to_string(),
        }
        .log()
    };

    let Some(found) = directory.find_account_with_contacts(user_id).await? else {
        tracing::info!("No user found for user ID: {}", user_id);
        return Err(not_found());
    };

    // Load order decides which contact is "first"
    let Some(contact) = found.first_contact().cloned() else {
        tracing::info!("No emergency contact found for user ID: {}", user_id);
        return Err(not_found());
    };

    let account = found.account;
    tracing::info!("User found: {}", account.name);
    tracing::info!(
        "SIMULATING: Sending \"I Am Safe\" notification to {} at {}",
        contact.contact_name,
        contact
            .contact_email
            .as_deref()
            .or(contact.contact_phone.as_deref())
            .unwrap_or("<no address>")
    );

    let message = format!(
        "Notification for {} sent successfully (simulated).",
        account.name
    );

    Ok(SafetyNotification {
        account,
        contact,
        message,
    })
}
