//! lislip - core library for the LISLIP disaster-preparedness service
//!
//! This crate owns everything that is not HTTP plumbing: configuration,
//! the SQL-backed account/emergency-contact store, the "I am safe"
//! notification flow, startup bootstrap, and the headless dashboard clients
//! that talk to the public weather, earthquake, air-quality and AI APIs.

mod accountdb;
mod config;
mod coordination;
pub mod dashboard;
mod storage;

#[cfg(test)]
mod test_utils;

pub use accountdb::{
    Account, AccountError, AccountStore, AccountWithContacts, ContactDirectory,
    EmergencyContact, NewAccount, NewContact,
};

pub use config::{AdvisorConfig, AppConfig, ConfigError, DashboardConfig, StoreConfig, StoreKind};

pub use coordination::{
    CoordinationError, SAMPLE_ACCOUNT_EMAIL, SAMPLE_ACCOUNT_NAME, SAMPLE_CONTACT_NAME,
    SafetyNotification, SeedOutcome, bootstrap, notify_safe_core, parse_user_id,
    seed_sample_data,
};

pub use storage::{DataStore, StorageError, connect};
