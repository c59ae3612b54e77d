//! the process-wide handle to the quotes database.
//!
//! [`Store`] owns a `sqlx::SqlitePool` on a single file-backed database:
//! - the file is created on first open and the schema bootstrapped right after.
//! - WAL journal, so readers never wait on the single writer.
//! - every mutating operation is bounded by the configured write timeout.
//!
//! the handle is opened once at startup and shared by reference (or through an
//! `Arc`) between concurrent callers. [`Store::close`] consumes it.

use std::{future::Future, str::FromStr, time::Duration};

use sqlx::{
    sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions},
    Pool, Sqlite,
};

use crate::{config::Config, error::StoreError};

#[derive(Debug)]
pub struct Store {
    pub(crate) pool: Pool<Sqlite>,
    write_timeout: Duration,
}

impl Store {
    #[tracing::instrument(skip_all, fields(database_url = %config.database_url))]
    pub async fn open(config: &Config) -> Result<Self, StoreError> {
        tracing::info!("initializing database connection...");

        let opts = SqliteConnectOptions::from_str(&config.database_url)
            .inspect_err(|e| tracing::error!(err = ?e, "invalid database url"))?
            .create_if_missing(true)
            .foreign_keys(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(config.write_timeout);

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(config.write_timeout)
            .connect_with(opts)
            .await
            .inspect_err(
                |e| tracing::error!(err = ?e, "an error occurred when connecting to the database"),
            )?;

        let store = Self {
            pool,
            write_timeout: config.write_timeout,
        };

        tracing::info!("ensuring schema...");
        store.ensure_schema().await?;
        tracing::info!("database ready!");

        Ok(store)
    }

    /// closes every pooled connection. callers must be done with the store.
    #[tracing::instrument(skip_all)]
    pub async fn close(self) {
        self.pool.close().await;
        tracing::info!("database closed.");
    }

    pub fn write_timeout(&self) -> Duration {
        self.write_timeout
    }

    /// runs a mutating operation under the write timeout.
    pub(crate) async fn bounded<T, F>(&self, operation: &'static str, fut: F) -> Result<T, StoreError>
    where
        F: Future<Output = Result<T, StoreError>>,
    {
        match tokio::time::timeout(self.write_timeout, fut).await {
            Ok(result) => result,
            Err(_) => {
                tracing::error!(
                    operation,
                    after = ?self.write_timeout,
                    "storage operation timed out"
                );

                Err(StoreError::Timeout {
                    operation,
                    after: self.write_timeout,
                })
            }
        }
    }

    #[tracing::instrument(skip_all)]
    pub async fn count_active(&self) -> Result<i64, StoreError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM quotes WHERE is_active = 1;")
            .fetch_one(&self.pool)
            .await
            .inspect_err(
                |e| tracing::error!(err = ?e, "an error occurred when counting quotes"),
            )?;

        Ok(count)
    }
}
