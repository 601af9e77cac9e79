use log::info;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use std::future::Future;
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::{Builder, Runtime};

use crate::storage::errors::StorageError;

/// DbConnection is the explicit database session.
///
/// It is opened once at startup, shared by every repository, and closed at
/// shutdown. The sqlx pool is driven by a private current-thread runtime so
/// that callers on the UI thread can stay synchronous.
#[derive(Clone)]
pub struct DbConnection {
    pool: SqlitePool,
    runtime: Arc<Runtime>,
}

impl DbConnection {
    /// Open (and create if missing) the database file at `path`
    pub fn open(path: &Path) -> Result<Self, StorageError> {
        info!("Opening database at {}", path.display());
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal);
        Self::connect(options, 4)
    }

    /// Open a private in-memory database.
    ///
    /// The pool is pinned to a single connection that never expires, because
    /// every SQLite connection to `:memory:` sees its own database.
    pub fn open_in_memory() -> Result<Self, StorageError> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?;
        Self::connect(options, 1)
    }

    fn connect(options: SqliteConnectOptions, max_connections: u32) -> Result<Self, StorageError> {
        let runtime = Builder::new_current_thread().enable_all().build()?;
        let pool = runtime.block_on(
            SqlitePoolOptions::new()
                .max_connections(max_connections)
                .min_connections(1)
                .idle_timeout(None::<Duration>)
                .max_lifetime(None::<Duration>)
                .connect_with(options),
        )?;
        Ok(Self {
            pool,
            runtime: Arc::new(runtime),
        })
    }

    /// Get a reference to the connection pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Run a database future to completion on the connection's runtime
    pub fn block_on<F: Future>(&self, future: F) -> F::Output {
        self.runtime.block_on(future)
    }

    /// Close every pooled connection
    pub fn close(self) {
        info!("Closing database connection");
        self.runtime.block_on(self.pool.close());
    }
}
