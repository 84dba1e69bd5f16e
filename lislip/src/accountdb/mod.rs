mod directory;
mod errors;
mod storage;
mod types;

pub use directory::ContactDirectory;
pub use errors::AccountError;
pub use storage::AccountStore;
pub use types::{Account, AccountWithContacts, EmergencyContact, NewAccount, NewContact};
