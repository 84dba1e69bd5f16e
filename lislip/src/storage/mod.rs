mod config;
mod data_store;
mod errors;
mod schema;

pub use data_store::{DataStore, connect};
pub use errors::StorageError;

pub(crate) use config::DB_TABLE_PREFIX;
pub(crate) use schema::{
    ColumnSpec, check_foreign_key_sqlite, ensure_foreign_key_postgres, ensure_unique_postgres,
    ensure_unique_sqlite, reconcile_postgres_table, reconcile_sqlite_table,
};
