//! Startup sequence: connectivity check, schema reconciliation and sample data

use crate::accountdb::{AccountError, AccountStore, NewAccount, NewContact};

use super::errors::CoordinationError;

pub const SAMPLE_ACCOUNT_NAME: &str = "John Doe";
pub const SAMPLE_ACCOUNT_EMAIL: &str = "john.doe@example.com";
pub const SAMPLE_CONTACT_NAME: &str = "JohnsEmergencyContact";
const SAMPLE_CONTACT_EMAIL: &str = "john-contact@example.com";

/// What the seed step did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    /// The account table was empty; a sample account and contact were inserted
    Created { account_id: i64, contact_id: i64 },
    /// Accounts already existed, nothing was inserted
    Skipped { existing_accounts: i64 },
}

/// Prepare the store before the server starts accepting requests
///
/// Verifies connectivity, reconciles the schema, then seeds sample data
/// when the account table is empty.
pub async fn bootstrap(store: &AccountStore) -> Result<SeedOutcome, CoordinationError> {
    store.ping().await?;
    tracing::info!("Database connection has been established successfully.");

    store.init().await?;
    tracing::info!("All tables were synchronized successfully.");

    seed_sample_data(store).await
}

/// Insert the sample account and its contact if there are no accounts yet
pub async fn seed_sample_data(store: &AccountStore) -> Result<SeedOutcome, CoordinationError> {
    let existing_accounts = store.count_accounts().await?;
    if existing_accounts > 0 {
        tracing::debug!(existing_accounts, "Accounts present, skipping sample data");
        return Ok(SeedOutcome::Skipped { existing_accounts });
    }

    tracing::info!("No users found. Creating sample data...");

    let account = match store
        .insert_account(NewAccount::new(SAMPLE_ACCOUNT_NAME, SAMPLE_ACCOUNT_EMAIL))
        .await
    {
        Ok(account) => account,
        // Another instance won the race to seed
        Err(AccountError::Duplicate(_)) => {
            let existing_accounts = store.count_accounts().await?;
            tracing::info!("Sample account already created elsewhere");
            return Ok(SeedOutcome::Skipped { existing_accounts });
        }
        Err(e) => return Err(e.into()),
    };

    let contact = store
        .insert_contact(
            NewContact::new(account.id, SAMPLE_CONTACT_NAME).with_email(SAMPLE_CONTACT_EMAIL),
        )
        .await?;

    tracing::info!("Sample data created.");

    Ok(SeedOutcome::Created {
        account_id: account.id,
        contact_id: contact.id,
    })
}
