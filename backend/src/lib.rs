//! # Bookkeeper Backend
//!
//! Storage, presenter and budget logic for the Bookkeeper expense tracker.
//! The egui front end talks to this crate only through `Presenter` and the
//! `BookkeeperView` trait.
//!
//! - `storage` - record descriptors, the generic repository and its SQLite and
//!   in-memory implementations
//! - `domain` - record types, budget aggregation, snapshot formatting and the
//!   presenter
//! - `config` - data directory and `config.yaml`

use anyhow::{Context, Result};
use log::info;

pub mod config;
pub mod domain;
pub mod storage;

pub use config::AppConfig;
pub use domain::{BookkeeperError, BookkeeperView, Presenter};
pub use storage::{DbConnection, Repositories};

/// Owns the database session for the lifetime of the application
pub struct Backend {
    pub config: AppConfig,
    connection: DbConnection,
}

impl Backend {
    /// Create the data directory if needed and open the database
    pub fn new(config: AppConfig) -> Result<Self> {
        config.ensure_data_directory()?;

        let path = config.database_path();
        let connection = DbConnection::open(&path)
            .with_context(|| format!("Failed to open database {:?}", path))?;
        info!("Backend ready with database {:?}", path);

        Ok(Self { config, connection })
    }

    /// SQLite repositories for every record type
    pub fn repositories(&self) -> Result<Repositories> {
        Repositories::sqlite(&self.connection).context("Failed to prepare database tables")
    }

    /// Build a presenter that drives `view` against this backend's database
    pub fn presenter<V: BookkeeperView>(&self, view: V) -> Result<Presenter<V>> {
        let repos = self.repositories()?;
        Presenter::new(view, repos, &self.config.default_categories)
            .context("Failed to load initial data")
    }

    pub fn shutdown(self) {
        info!("Shutting down backend");
        self.connection.close();
    }
}
