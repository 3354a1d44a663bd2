//! Note service configuration

use secrecy::Secret;
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use crate::adapters::BlinkoConfig;

/// Note service (Blinko) configuration
#[derive(Debug, Clone, Deserialize)]
pub struct NoteServiceConfig {
    /// Base URL of the note service
    pub base_url: String,

    /// Bearer token used for every request
    pub api_token: Secret<String>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl NoteServiceConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Build the adapter configuration
    pub fn to_blinko_config(&self) -> BlinkoConfig {
        BlinkoConfig::new(self.base_url.clone(), self.api_token.clone()).with_timeout(self.timeout())
    }

    /// Validate note service configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.base_url.is_empty() {
            return Err(ValidationError::MissingRequired("NOTE_SERVICE__BASE_URL"));
        }
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ValidationError::InvalidNoteServiceUrl);
        }
        if self.timeout_secs == 0 || self.timeout_secs > 300 {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

fn default_timeout() -> u64 {
    30
}
