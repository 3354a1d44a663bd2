//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `FLASHNOTE` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use flashnote::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Idle timeout: {:?}", config.flash.idle_timeout());
//! ```

mod error;
mod filters;
mod flash;
mod logging;
mod note_service;

pub use error::{ConfigError, ValidationError};
pub use filters::FiltersConfig;
pub use flash::FlashConfig;
pub use logging::LoggingConfig;
pub use note_service::NoteServiceConfig;

use serde::Deserialize;

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Flash session behaviour (idle timeout, truncation, default tag)
    #[serde(default)]
    pub flash: FlashConfig,

    /// Message filters applied before a fragment reaches the store
    #[serde(default)]
    pub filters: FiltersConfig,

    /// Note service connection
    pub note_service: NoteServiceConfig,

    /// Logging output
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `FLASHNOTE` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `FLASHNOTE__FLASH__IDLE_TIMEOUT_SECS=30` -> `flash.idle_timeout_secs = 30`
    /// - `FLASHNOTE__NOTE_SERVICE__BASE_URL=...` -> `note_service.base_url = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - Required environment variables are missing
    /// - Values cannot be parsed into expected types
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("FLASHNOTE")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.flash.validate()?;
        self.note_service.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}
