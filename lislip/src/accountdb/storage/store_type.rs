use std::sync::Arc;

use crate::accountdb::{
    errors::AccountError,
    types::{Account, AccountWithContacts, EmergencyContact, NewAccount, NewContact},
};
use crate::storage::DataStore;

use super::postgres::*;
use super::sqlite::*;

/// Repository for accounts and their emergency contacts
#[derive(Clone)]
pub struct AccountStore {
    store: Arc<dyn DataStore>,
}

impl AccountStore {
    pub fn new(store: Arc<dyn DataStore>) -> Self {
        Self { store }
    }

    /// Check that the underlying store answers queries
    pub async fn ping(&self) -> Result<(), AccountError> {
        self.store.ping().await?;
        Ok(())
    }

    /// Create the tables if needed and reconcile their columns
    pub async fn init(&self) -> Result<(), AccountError> {
        if let Some(pool) = self.store.as_sqlite() {
            create_tables_sqlite(pool).await?;
            reconcile_tables_sqlite(pool).await
        } else if let Some(pool) = self.store.as_postgres() {
            create_tables_postgres(pool).await?;
            reconcile_tables_postgres(pool).await
        } else {
            Err(AccountError::Storage("Unsupported database type".to_string()))
        }
    }

    pub async fn count_accounts(&self) -> Result<i64, AccountError> {
        if let Some(pool) = self.store.as_sqlite() {
            count_accounts_sqlite(pool).await
        } else if let Some(pool) = self.store.as_postgres() {
            count_accounts_postgres(pool).await
        } else {
            Err(AccountError::Storage("Unsupported database type".to_string()))
        }
    }

    #[tracing::instrument(skip(self), fields(account_id = %id))]
    pub async fn get_account(&self, id: i64) -> Result<Option<Account>, AccountError> {
        if let Some(pool) = self.store.as_sqlite() {
            get_account_sqlite(pool, id).await
        } else if let Some(pool) = self.store.as_postgres() {
            get_account_postgres(pool, id).await
        } else {
            Err(AccountError::Storage("Unsupported database type".to_string()))
        }
    }

    #[tracing::instrument(skip(self, account))]
    pub async fn insert_account(&self, account: NewAccount) -> Result<Account, AccountError> {
        account.validate()?;
        tracing::debug!(email = %account.email, "Inserting account");

        let result = if let Some(pool) = self.store.as_sqlite() {
            insert_account_sqlite(pool, account).await
        } else if let Some(pool) = self.store.as_postgres() {
            insert_account_postgres(pool, account).await
        } else {
            Err(AccountError::Storage("Unsupported database type".to_string()))
        };

        match &result {
            Ok(account) => tracing::info!(account_id = account.id, "Account created"),
            Err(e) => tracing::error!(error = %e, "Account insert failed"),
        }

        result
    }

    /// Insert a contact for an existing account
    ///
    /// Fails with [`AccountError::NotFound`] when the owning account does not exist.
    #[tracing::instrument(skip(self, contact), fields(account_id = %contact.user_id))]
    pub async fn insert_contact(
        &self,
        contact: NewContact,
    ) -> Result<EmergencyContact, AccountError> {
        contact.validate()?;

        if self.get_account(contact.user_id).await?.is_none() {
            tracing::warn!("Refusing contact for unknown account");
            return Err(AccountError::NotFound);
        }

        let result = if let Some(pool) = self.store.as_sqlite() {
            insert_contact_sqlite(pool, contact).await
        } else if let Some(pool) = self.store.as_postgres() {
            insert_contact_postgres(pool, contact).await
        } else {
            Err(AccountError::Storage("Unsupported database type".to_string()))
        };

        match &result {
            Ok(contact) => tracing::info!(contact_id = contact.id, "Emergency contact created"),
            Err(e) => tracing::error!(error = %e, "Emergency contact insert failed"),
        }

        result
    }

    /// Load an account and its contacts with a single join
    #[tracing::instrument(skip(self), fields(account_id = %id))]
    pub async fn get_account_with_contacts(
        &self,
        id: i64,
    ) -> Result<Option<AccountWithContacts>, AccountError> {
        let result = if let Some(pool) = self.store.as_sqlite() {
            get_account_with_contacts_sqlite(pool, id).await
        } else if let Some(pool) = self.store.as_postgres() {
            get_account_with_contacts_postgres(pool, id).await
        } else {
            Err(AccountError::Storage("Unsupported database type".to_string()))
        };

        match &result {
            Ok(Some(found)) => {
                tracing::info!(
                    found = true,
                    contacts = found.contacts.len(),
                    "Account lookup completed"
                );
            }
            Ok(None) => {
                tracing::info!(found = false, "Account lookup completed - not found");
            }
            Err(e) => {
                tracing::error!(error = %e, "Account lookup failed");
            }
        }

        result
    }
}
