use std::str::FromStr;

use async_trait::async_trait;
use sqlx::{Pool, Postgres, Sqlite};

use crate::config::{StoreConfig, StoreKind};

use super::errors::StorageError;

#[derive(Clone, Debug)]
pub(crate) struct SqliteDataStore {
    pool: sqlx::SqlitePool,
}

#[derive(Clone, Debug)]
pub(crate) struct PostgresDataStore {
    pool: sqlx::PgPool,
}

/// A handle to the relational store backing the account database
///
/// Constructed once by [`connect`] and handed to whoever needs it.
#[async_trait]
pub trait DataStore: Send + Sync {
    fn as_sqlite(&self) -> Option<&Pool<Sqlite>>;
    fn as_postgres(&self) -> Option<&Pool<Postgres>>;

    /// Round-trip a trivial query to prove the store is reachable
    async fn ping(&self) -> Result<(), StorageError>;
}

#[async_trait]
impl DataStore for SqliteDataStore {
    fn as_sqlite(&self) -> Option<&Pool<Sqlite>> {
        Some(&self.pool)
    }

    fn as_postgres(&self) -> Option<&Pool<Postgres>> {
        None
    }

    async fn ping(&self) -> Result<(), StorageError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

#[async_trait]
impl DataStore for PostgresDataStore {
    fn as_sqlite(&self) -> Option<&Pool<Sqlite>> {
        None
    }

    fn as_postgres(&self) -> Option<&Pool<Postgres>> {
        Some(&self.pool)
    }

    async fn ping(&self) -> Result<(), StorageError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

/// Open a connection pool for the configured store
pub async fn connect(config: &StoreConfig) -> Result<Box<dyn DataStore>, StorageError> {
    tracing::info!("Initializing data store with type: {}", config.kind);

    let store = match config.kind {
        StoreKind::Sqlite => {
            let opts = sqlx::sqlite::SqliteConnectOptions::from_str(&config.url)?
                .create_if_missing(true)
                .foreign_keys(true);

            // An in-memory database lives only as long as one connection stays open
            let pool_options = if config.url.contains(":memory:") {
                sqlx::sqlite::SqlitePoolOptions::new()
                    .max_connections(1)
                    .min_connections(1)
                    .idle_timeout(None)
                    .max_lifetime(None)
            } else {
                sqlx::sqlite::SqlitePoolOptions::new().max_connections(5)
            };

            let pool = pool_options.connect_with(opts).await?;

            Box::new(SqliteDataStore { pool }) as Box<dyn DataStore>
        }
        StoreKind::Postgres => {
            let pool = sqlx::postgres::PgPoolOptions::new()
                .max_connections(5)
                .connect(&config.url)
                .await?;

            Box::new(PostgresDataStore { pool }) as Box<dyn DataStore>
        }
    };

    tracing::info!("Connected to database: type={}", config.kind);

    Ok(store)
}
