//! Message filter configuration

use serde::Deserialize;

use crate::domain::flash::FlashFilter;

/// Message filter configuration
#[derive(Debug, Clone, Deserialize)]
pub struct FiltersConfig {
    /// Text shorter than this many characters is not recorded
    #[serde(default = "default_min_content_length")]
    pub min_content_length: usize,

    /// Command prefixes to ignore (comma-separated, case-insensitive)
    #[serde(default = "default_ignore_prefixes")]
    pub ignore_prefixes: String,
}

impl FiltersConfig {
    /// Build the domain filter
    pub fn to_filter(&self) -> FlashFilter {
        FlashFilter::from_prefix_list(self.min_content_length, &self.ignore_prefixes)
    }
}

impl Default for FiltersConfig {
    fn default() -> Self {
        Self {
            min_content_length: default_min_content_length(),
            ignore_prefixes: default_ignore_prefixes(),
        }
    }
}

fn default_min_content_length() -> usize {
    5
}

fn default_ignore_prefixes() -> String {
    "/t".to_string()
}
