use std::{env, sync::LazyLock};

use crate::storage::DB_TABLE_PREFIX;

/// Accounts table name
pub(crate) static DB_TABLE_USERS: LazyLock<String> = LazyLock::new(|| {
    env::var("DB_TABLE_USERS").unwrap_or_else(|_| format!("{}{}", *DB_TABLE_PREFIX, "users"))
});

/// Emergency contacts table name
pub(crate) static DB_TABLE_EMERGENCY_CONTACTS: LazyLock<String> = LazyLock::new(|| {
    env::var("DB_TABLE_EMERGENCY_CONTACTS")
        .unwrap_or_else(|_| format!("{}{}", *DB_TABLE_PREFIX, "emergency_contacts"))
});
