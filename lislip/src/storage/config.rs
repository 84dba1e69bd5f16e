use std::{env, sync::LazyLock};

/// Table prefix from environment variable, empty by default
pub(crate) static DB_TABLE_PREFIX: LazyLock<String> =
    LazyLock::new(|| env::var("DB_TABLE_PREFIX").unwrap_or_default());
