//! Configuration management for qrlabel
//!
//! This module provides a layered configuration system that loads settings from:
//! 1. Default values (embedded in structs)
//! 2. TOML configuration file
//! 3. Environment variables (highest priority)
//!
//! # Usage
//!
//! ```no_run
//! use qrlabel::config::Config;
//!
//! let config = Config::load().expect("Failed to load configuration");
//! println!("Server listening on: {}", config.server.bind_addr);
//! ```
//!
//! # Environment Variables
//!
//! Configuration can be overridden using environment variables with the pattern:
//! `QRLABEL__<section>__<key>`
//!
//! Examples:
//! - `QRLABEL__SERVER__BIND_ADDR=0.0.0.0:9000`
//! - `QRLABEL__SERVER__PUBLIC_BASE_URL=https://labels.example.com`
//! - `QRLABEL__PRINT_JOBS__TTL_SECS=900`
//!
//! # Configuration File
//!
//! By default, the configuration is loaded from `config/qrlabel.toml`.
//! This can be overridden using the `QRLABEL_CONFIG` environment variable.

mod models;
mod sources;
mod validation;

pub use models::{Config, PrintJobsConfig, QrConfig, ServerConfig};
pub use validation::ValidationError;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Configuration validation failed: {0}")]
    ValidationError(#[from] ValidationError),
}

impl Config {
    /// Load configuration from all sources (file + environment)
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration file is malformed or a value
    /// fails validation.
    pub fn load() -> Result<Self, ConfigError> {
        let config = sources::load()?;
        validation::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a specific path
    pub fn load_from_path(path: std::path::PathBuf) -> Result<Self, ConfigError> {
        let config = sources::load_from_sources(path)?;
        validation::validate(&config)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_load_minimal_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("test.toml");

        fs::write(&config_path, "[server]\nbind_addr = \"127.0.0.1:3000\"\n").unwrap();

        let config = Config::load_from_path(config_path).unwrap();
        assert_eq!(config.server.bind_addr.port(), 3000);
        assert_eq!(config.qr.max_batch, 50);
    }

    #[test]
    fn test_validation_runs_on_load() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("test.toml");

        fs::write(&config_path, "[print_jobs]\nttl_secs = 0\n").unwrap();

        let result = Config::load_from_path(config_path);
        assert!(matches!(
            result,
            Err(ConfigError::ValidationError(ValidationError::ZeroTtl))
        ));
    }

    #[test]
    fn test_malformed_file_is_load_error() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("test.toml");

        fs::write(&config_path, "[qr]\nmax_batch = \"lots\"\n").unwrap();

        let result = Config::load_from_path(config_path);
        assert!(matches!(result, Err(ConfigError::LoadError(_))));
    }
}
