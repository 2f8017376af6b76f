//! Configuration module
//!
//! Loads configuration for the console binary from environment
//! variables.

use std::env;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Seed a few demo accounts at startup
    pub seed_demo_data: bool,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let seed_demo_data = env::var("BANK_SEED_DEMO_DATA")
            .unwrap_or_else(|_| "true".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidValue("BANK_SEED_DEMO_DATA"))?;

        Ok(Self { seed_demo_data })
    }
}

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable: {0}")]
    InvalidValue(&'static str),
}
