//! Coordination module
//!
//! High-level operations that sit between the HTTP layer and the account
//! store:
//! - `bootstrap`: startup connectivity check, schema reconciliation, seeding
//! - `errors`: error type shared by all coordination operations
//! - `safety`: the simulated "I am safe" notification

mod bootstrap;
mod errors;
mod safety;

pub use bootstrap::{
    SAMPLE_ACCOUNT_EMAIL, SAMPLE_ACCOUNT_NAME, SAMPLE_CONTACT_NAME, SeedOutcome, bootstrap,
    seed_sample_data,
};
pub use errors::CoordinationError;
pub use safety::{SafetyNotification, notify_safe_core, parse_user_id};
