//! # Application Configuration
//!
//! Resolves the data directory and reads `config.yaml` from it.
//!
//! ## Data directory
//!
//! 1. `BOOKKEEPER_DATA_DIR` when set
//! 2. the platform data directory + `bookkeeper`
//! 3. `./bookkeeper-data`
//!
//! ## File format
//!
//! ```yaml
//! database_file: bookkeeper.db
//! default_categories:
//!   - Dairy
//!   - Travel
//! ```
//!
//! Missing keys fall back to their defaults. A default file is written on
//! first start so users have something to edit.

use anyhow::{Context, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const DATA_DIR_ENV: &str = "BOOKKEEPER_DATA_DIR";
pub const CONFIG_FILE_NAME: &str = "config.yaml";

const DEFAULT_DATABASE_FILE: &str = "bookkeeper.db";

const DEFAULT_CATEGORIES: [&str; 14] = [
    "Ready meals",
    "Fruit and vegetables",
    "Dairy",
    "Sweets and desserts",
    "Meat and poultry",
    "Bread and bakery",
    "Fish and seafood",
    "Cheese",
    "Frozen food",
    "Drinks",
    "Cafes and restaurants",
    "Household chemicals",
    "Pharmacy and doctors",
    "Travel",
];

/// Settings stored in `config.yaml`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigFile {
    pub database_file: String,
    pub default_categories: Vec<String>,
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            database_file: DEFAULT_DATABASE_FILE.to_string(),
            default_categories: DEFAULT_CATEGORIES.iter().map(|c| c.to_string()).collect(),
        }
    }
}

/// Resolved application configuration
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub data_directory: PathBuf,
    pub database_file: String,
    pub default_categories: Vec<String>,
}

impl AppConfig {
    /// Resolve the data directory from the environment and load its config file
    pub fn load() -> Result<Self> {
        Self::load_from(Self::resolve_data_directory())
    }

    /// Load `config.yaml` from `data_directory`, writing a default one if absent
    pub fn load_from(data_directory: impl Into<PathBuf>) -> Result<Self> {
        let data_directory = data_directory.into();
        let config_path = data_directory.join(CONFIG_FILE_NAME);

        let file = if config_path.exists() {
            let yaml_content = fs::read_to_string(&config_path)
                .with_context(|| format!("Failed to read {:?}", config_path))?;
            let file: ConfigFile = serde_yaml::from_str(&yaml_content)
                .with_context(|| format!("Failed to parse {:?}", config_path))?;
            debug!("Loaded config from {:?}", config_path);
            file
        } else {
            let file = ConfigFile::default();
            Self::write_config_file(&data_directory, &file)?;
            info!("Created default config at {:?}", config_path);
            file
        };

        Ok(Self {
            data_directory,
            database_file: file.database_file,
            default_categories: file.default_categories,
        })
    }

    fn resolve_data_directory() -> PathBuf {
        if let Some(dir) = std::env::var_os(DATA_DIR_ENV).filter(|d| !d.is_empty()) {
            return PathBuf::from(dir);
        }
        dirs::data_dir()
            .map(|dir| dir.join("bookkeeper"))
            .unwrap_or_else(|| PathBuf::from("./bookkeeper-data"))
    }

    fn write_config_file(data_directory: &Path, file: &ConfigFile) -> Result<()> {
        fs::create_dir_all(data_directory)
            .with_context(|| format!("Failed to create data directory {:?}", data_directory))?;

        let yaml_content = serde_yaml::to_string(file)?;
        let config_path = data_directory.join(CONFIG_FILE_NAME);

        // Write to a temp file, then rename over the target
        let temp_path = config_path.with_extension("tmp");
        fs::write(&temp_path, yaml_content)?;
        fs::rename(&temp_path, &config_path)?;
        Ok(())
    }

    pub fn database_path(&self) -> PathBuf {
        self.data_directory.join(&self.database_file)
    }

    pub fn ensure_data_directory(&self) -> Result<()> {
        if !self.data_directory.exists() {
            fs::create_dir_all(&self.data_directory)
                .with_context(|| format!("Failed to create data directory {:?}", self.data_directory))?;
            info!("Created data directory: {:?}", self.data_directory);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_first_load_writes_defaults() {
        let temp_dir = tempdir().unwrap();
        let data_dir = temp_dir.path().join("nested");

        let config = AppConfig::load_from(&data_dir).unwrap();
        assert_eq!(config.database_file, "bookkeeper.db");
        assert_eq!(config.default_categories.len(), 14);
        assert_eq!(config.database_path(), data_dir.join("bookkeeper.db"));
        assert!(data_dir.join(CONFIG_FILE_NAME).exists());

        // Second load reads the file back unchanged
        assert_eq!(AppConfig::load_from(&data_dir).unwrap(), config);
    }

    #[test]
    fn test_partial_file_falls_back_to_defaults() {
        let temp_dir = tempdir().unwrap();
        fs::write(
            temp_dir.path().join(CONFIG_FILE_NAME),
            "default_categories:\n  - Rent\n  - Groceries\n",
        )
        .unwrap();

        let config = AppConfig::load_from(temp_dir.path()).unwrap();
        assert_eq!(config.default_categories, vec!["Rent", "Groceries"]);
        assert_eq!(config.database_file, "bookkeeper.db");
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let temp_dir = tempdir().unwrap();
        fs::write(temp_dir.path().join(CONFIG_FILE_NAME), "default_categories: 12\n").unwrap();
        assert!(AppConfig::load_from(temp_dir.path()).is_err());
    }

    // The only test that touches DATA_DIR_ENV, so parallel tests do not race on it
    #[test]
    fn test_data_directory_from_environment() {
        let temp_dir = tempdir().unwrap();
        let data_dir = temp_dir.path().join("from-env");

        std::env::set_var(DATA_DIR_ENV, &data_dir);
        let config = AppConfig::load();
        std::env::set_var(DATA_DIR_ENV, "");
        let fallback = AppConfig::resolve_data_directory();
        std::env::remove_var(DATA_DIR_ENV);

        let config = config.unwrap();
        assert_eq!(config.data_directory, data_dir);
        assert!(data_dir.join(CONFIG_FILE_NAME).exists());

        // An empty value is ignored
        assert_ne!(fallback, PathBuf::from(""));
        assert_eq!(fallback, AppConfig::resolve_data_directory());
    }

    #[test]
    fn test_ensure_data_directory() {
        let temp_dir = tempdir().unwrap();
        let config = AppConfig {
            data_directory: temp_dir.path().join("a").join("b"),
            database_file: "x.db".to_string(),
            default_categories: Vec::new(),
        };
        config.ensure_data_directory().unwrap();
        assert!(config.data_directory.is_dir());
    }
}
