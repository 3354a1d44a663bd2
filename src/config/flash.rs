//! Flash session configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use crate::application::CommitSettings;

/// Flash session configuration
#[derive(Debug, Clone, Deserialize)]
pub struct FlashConfig {
    /// Quiet period after the last message before a session is committed
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_secs: u64,

    /// Maximum note length in characters (0 disables truncation)
    #[serde(default)]
    pub max_content_length: usize,

    /// Tag added to every committed note
    #[serde(default)]
    pub default_tag: Option<String>,
}

impl FlashConfig {
    /// Get idle timeout as Duration
    pub fn idle_timeout(&self) -> Duration {
        Duration::from_secs(self.idle_timeout_secs)
    }

    /// Settings handed to the timeout dispatcher
    pub fn commit_settings(&self) -> CommitSettings {
        CommitSettings {
            default_tag: self
                .default_tag
                .as_deref()
                .map(|t| t.trim().trim_start_matches('#').to_string())
                .filter(|t| !t.is_empty()),
            max_content_length: self.max_content_length,
        }
    }

    /// Validate flash configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.idle_timeout_secs == 0 || self.idle_timeout_secs > 3600 {
            return Err(ValidationError::InvalidIdleTimeout);
        }
        if let Some(tag) = self.default_tag.as_deref() {
            let tag = tag.trim().trim_start_matches('#');
            if tag.chars().any(|c| c.is_whitespace() || c == '#') {
                return Err(ValidationError::InvalidDefaultTag);
            }
        }
        Ok(())
    }
}

impl Default for FlashConfig {
    fn default() -> Self {
        Self {
            idle_timeout_secs: default_idle_timeout(),
            max_content_length: 0,
            default_tag: None,
        }
    }
}

fn default_idle_timeout() -> u64 {
    30
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flash_config_defaults() {
        let config = FlashConfig::default();
        assert_eq!(config.idle_timeout(), Duration::from_secs(30));
        assert_eq!(config.max_content_length, 0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_idle_timeout_bounds() {
        let mut config = FlashConfig::default();
        config.idle_timeout_secs = 0;
        assert_eq!(config.validate(), Err(ValidationError::InvalidIdleTimeout));
        config.idle_timeout_secs = 3601;
        assert_eq!(config.validate(), Err(ValidationError::InvalidIdleTimeout));
        config.idle_timeout_secs = 3600;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_default_tag_is_normalized() {
        let config = FlashConfig {
            default_tag: Some(" #flash ".to_string()),
            ..FlashConfig::default()
        };
        assert!(config.validate().is_ok());
        assert_eq!(config.commit_settings().default_tag.as_deref(), Some("flash"));
    }

    #[test]
    fn test_default_tag_rejects_spaces() {
        let config = FlashConfig {
            default_tag: Some("two words".to_string()),
            ..FlashConfig::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidDefaultTag));
    }

    #[test]
    fn test_blank_default_tag_is_dropped() {
        let config = FlashConfig {
            default_tag: Some("  ".to_string()),
            ..FlashConfig::default()
        };
        assert_eq!(config.commit_settings().default_tag, None);
    }
}
