//! Inbound message filter.
//!
//! Short chatter and messages addressed to other bots should not open or
//! extend a flash session. Only text fragments are filtered; attachments
//! always pass.

use std::fmt;

use super::Fragment;

/// Why a fragment was not recorded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterRejection {
    /// Trimmed text shorter than the configured minimum.
    TooShort { length: usize, min: usize },
    /// Text starts with an ignored prefix.
    IgnoredPrefix(String),
}

impl fmt::Display for FilterRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterRejection::TooShort { length, min } => {
                write!(f, "text too short ({} < {} chars)", length, min)
            }
            FilterRejection::IgnoredPrefix(prefix) => {
                write!(f, "text starts with ignored prefix '{}'", prefix)
            }
        }
    }
}

/// Minimum-length and ignored-prefix rules for inbound text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlashFilter {
    min_content_length: usize,
    ignore_prefixes: Vec<String>,
}

impl FlashFilter {
    pub fn new(min_content_length: usize, ignore_prefixes: Vec<String>) -> Self {
        Self {
            min_content_length,
            ignore_prefixes: ignore_prefixes
                .into_iter()
                .map(|p| p.trim().to_lowercase())
                .filter(|p| !p.is_empty())
                .collect(),
        }
    }

    /// Builds a filter from a comma-separated prefix list such as `"/t, !bot"`.
    pub fn from_prefix_list(min_content_length: usize, prefixes: &str) -> Self {
        Self::new(
            min_content_length,
            prefixes.split(',').map(str::to_string).collect(),
        )
    }

    pub fn ignore_prefixes(&self) -> &[String] {
        &self.ignore_prefixes
    }

    /// Checks a fragment against the rules.
    pub fn check(&self, fragment: &Fragment) -> Result<(), FilterRejection> {
        if !fragment.is_text() {
            return Ok(());
        }

        let trimmed = fragment.content().trim();
        let length = trimmed.chars().count();
        if length < self.min_content_length {
            return Err(FilterRejection::TooShort {
                length,
                min: self.min_content_length,
            });
        }

        let lowered = trimmed.to_lowercase();
        for prefix in &self.ignore_prefixes {
            // A prefix only matches as a whole word: "/t" skips "/t note"
            // but records "/today".
            if let Some(rest) = lowered.strip_prefix(prefix.as_str()) {
                if rest.is_empty() || rest.starts_with(' ') {
                    return Err(FilterRejection::IgnoredPrefix(prefix.clone()));
                }
            }
        }

        Ok(())
    }
}

impl Default for FlashFilter {
    fn default() -> Self {
        Self::from_prefix_list(5, "/t")
    }
}
