/// Test utilities for the SQLite store
///
/// The database lives inside a `TempDir`, so it is removed even if a test
/// panics.

use anyhow::Result;
use std::path::PathBuf;
use tempfile::TempDir;

use super::connection::DbConnection;
use crate::storage::Repositories;

/// Test environment that owns a temporary directory and an open connection
/// to a database file inside it
pub struct TestEnvironment {
    pub connection: DbConnection,
    /// Base directory path for manual inspection if needed
    pub base_path: PathBuf,
    _temp_dir: TempDir, // Keep alive to prevent cleanup
}

impl TestEnvironment {
    /// Create a new test environment with a fresh database file
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let connection = DbConnection::open(&temp_dir.path().join("test.db"))?;
        Ok(Self {
            connection,
            base_path: temp_dir.path().to_path_buf(),
            _temp_dir: temp_dir,
        })
    }

    pub fn database_path(&self) -> PathBuf {
        self.base_path.join("test.db")
    }

    /// SQLite-backed repositories sharing this environment's connection
    pub fn repositories(&self) -> Result<Repositories> {
        Ok(Repositories::sqlite(&self.connection)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_cleanup() -> Result<()> {
        let base_path;
        {
            let env = TestEnvironment::new()?;
            base_path = env.base_path.clone();
            assert!(env.database_path().exists());
            // Environment dropped here
        }
        assert!(!base_path.exists());
        Ok(())
    }
}
