//! `SQLite` connection pool setup and migration runner.

use std::str::FromStr;
use std::time::Duration;

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};

use crate::error::StorageError;

/// Configuration for the `SQLite` storage adapter.
#[derive(Debug, Clone)]
pub struct Config {
    /// `SQLite` connection URL (e.g. `sqlite:ticketing.db` or `sqlite::memory:`).
    pub database_url: String,
    /// How long a transaction waits for the write lock before giving up.
    /// Also bounds how long a caller waits for a pooled connection.
    pub lock_timeout: Duration,
    /// Upper bound on open connections.
    pub max_connections: u32,
}

impl Config {
    /// Configuration with default lock timeout and pool size.
    #[must_use]
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            lock_timeout: Duration::from_secs(5),
            max_connections: 10,
        }
    }

    /// Build a [`Database`] from this configuration.
    ///
    /// Creates the connection pool, creates the database file if missing,
    /// and runs all pending migrations.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the connection or migrations fail.
    pub async fn build(self) -> Result<Database, StorageError> {
        Database::initialize(&self).await
    }
}

/// Holds the `SQLite` connection pools and provides access to them.
///
/// Writes and booking transactions go through the writer pool. Plain reads
/// go through a separate reader pool, so connections parked on the write
/// lock can never starve a read.
pub struct Database {
    writer: SqlitePool,
    reader: SqlitePool,
}

impl Database {
    /// Connect to the database and run migrations.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the connection or migrations fail.
    async fn initialize(config: &Config) -> Result<Self, StorageError> {
        let options = SqliteConnectOptions::from_str(&config.database_url)?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(config.lock_timeout);

        let writer = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(config.lock_timeout)
            .connect_with(options.clone())
            .await?;

        sqlx::migrate!("./migrations").run(&writer).await?;

        // same options, so an in-memory database resolves to the same shared cache
        let reader = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(config.lock_timeout)
            .connect_with(options)
            .await?;

        tracing::debug!(
            url = %config.database_url,
            max_connections = config.max_connections,
            lock_timeout = ?config.lock_timeout,
            "database ready"
        );

        Ok(Self { writer, reader })
    }

    /// Borrow the pool used for writes and booking transactions.
    #[must_use]
    pub fn pool(&self) -> &SqlitePool {
        &self.writer
    }

    /// Borrow the pool used for plain reads.
    #[must_use]
    pub fn reader(&self) -> &SqlitePool {
        &self.reader
    }
}
