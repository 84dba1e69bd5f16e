use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::errors::AccountError;

/// A registered user who can designate emergency contacts
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    /// Database-assigned identifier
    pub id: i64,
    /// Display name of the account holder
    pub name: String,
    /// Unique email address
    pub email: String,
    #[sqlx(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[sqlx(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

/// A person to be notified of an account holder's safety status
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EmergencyContact {
    pub id: i64,
    /// Owning account
    #[sqlx(rename = "userId")]
    pub user_id: i64,
    #[sqlx(rename = "contactName")]
    pub contact_name: String,
    #[sqlx(rename = "contactPhone")]
    pub contact_phone: Option<String>,
    #[sqlx(rename = "contactEmail")]
    pub contact_email: Option<String>,
    #[sqlx(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[sqlx(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

/// An account together with its contacts, in load order
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AccountWithContacts {
    pub account: Account,
    pub contacts: Vec<EmergencyContact>,
}

impl AccountWithContacts {
    pub fn first_contact(&self) -> Option<&EmergencyContact> {
        self.contacts.first()
    }
}

/// Data needed to create an account
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct NewAccount {
    pub name: String,
    pub email: String,
}

impl NewAccount {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }

    pub(crate) fn validate(&self) -> Result<(), AccountError> {
        if self.name.trim().is_empty() {
            return Err(AccountError::InvalidData("Name is required".to_string()));
        }
        if self.email.trim().is_empty() {
            return Err(AccountError::InvalidData("Email is required".to_string()));
        }
        Ok(())
    }
}

/// Data needed to create an emergency contact
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewContact {
    pub user_id: i64,
    pub contact_name: String,
    pub contact_phone: Option<String>,
    pub contact_email: Option<String>,
}

impl NewContact {
    pub fn new(user_id: i64, contact_name: impl Into<String>) -> Self {
        Self {
            user_id,
            contact_name: contact_name.into(),
            contact_phone: None,
            contact_email: None,
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.contact_email = Some(email.into());
        self
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.contact_phone = Some(phone.into());
        self
    }

    pub(crate) fn validate(&self) -> Result<(), AccountError> {
        if self.contact_name.trim().is_empty() {
            return Err(AccountError::InvalidData(
                "Contact name is required".to_string(),
            ));
        }
        Ok(())
    }
}

/// One row of the account/contact join; contact columns are NULL when the
/// account has no contacts
#[derive(Debug, FromRow)]
pub(super) struct AccountContactRow {
    pub(super) id: i64,
    pub(super) name: String,
    pub(super) email: String,
    pub(super) created_at: DateTime<Utc>,
    pub(super) updated_at: DateTime<Utc>,
    pub(super) contact_id: Option<i64>,
    pub(super) contact_name: Option<String>,
    pub(super) contact_phone: Option<String>,
    pub(super) contact_email: Option<String>,
    pub(super) contact_created_at: Option<DateTime<Utc>>,
    pub(super) contact_updated_at: Option<DateTime<Utc>>,
}

/// Fold join rows (all for the same account) into a single record
pub(super) fn collect_account_rows(rows: Vec<AccountContactRow>) -> Option<AccountWithContacts> {
    let first = rows.first()?;
    let account = Account {
        id: first.id,
        name: first.name.clone(),
        email: first.email.clone(),
        created_at: first.created_at,
        updated_at: first.updated_at,
    };

    let contacts = rows
        .into_iter()
        .filter_map(|row| {
            let id = row.contact_id?;
            Some(EmergencyContact {
                id,
                user_id: row.id,
                contact_name: row.contact_name?,
                contact_phone: row.contact_phone,
                contact_email: row.contact_email,
                created_at: row.contact_created_at?,
                updated_at: row.contact_updated_at?,
            })
        })
        .collect();

    Some(AccountWithContacts { account, contacts })
}
