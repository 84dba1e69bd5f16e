use async_trait::async_trait;

use super::errors::AccountError;
use super::storage::AccountStore;
use super::types::AccountWithContacts;

/// Read access to accounts and their emergency contacts
///
/// The notification flow only depends on this trait, so it can run against
/// the SQL-backed [`AccountStore`] or an in-memory double.
#[async_trait]
pub trait ContactDirectory: Send + Sync {
    async fn find_account_with_contacts(
        &self,
        account_id: i64,
    ) -> Result<Option<AccountWithContacts>, AccountError>;
}

#[async_trait]
impl ContactDirectory for AccountStore {
    async fn find_account_with_contacts(
        &self,
        account_id: i64,
    ) -> Result<Option<AccountWithContacts>, AccountError> {
        self.get_account_with_contacts(account_id).await
    }
}
