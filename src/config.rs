use std::path::PathBuf;

use crate::error::ReviewError;
use crate::history::HISTORY_LIMIT;
use crate::Result;

/// Reviews shorter than this (after trimming) are rejected before analysis.
pub const MIN_REVIEW_CHARS: usize = 10;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub history_path: PathBuf,
    pub history_limit: usize,
    pub min_review_chars: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            history_path: PathBuf::from("reviewsense_history.json"),
            history_limit: HISTORY_LIMIT,
            min_review_chars: MIN_REVIEW_CHARS,
        }
    }
}

impl Config {
    /// Load configuration from environment variables with fallback to defaults
    pub fn from_env_or_default() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(path) = lookup("REVIEWSENSE_HISTORY") {
            config.history_path = PathBuf::from(path);
        }

        if let Some(limit) = lookup("REVIEWSENSE_HISTORY_LIMIT").and_then(|s| s.parse().ok()) {
            config.history_limit = limit;
        }

        if let Some(min) = lookup("REVIEWSENSE_MIN_CHARS").and_then(|s| s.parse().ok()) {
            config.min_review_chars = min;
        }

        config
    }

    pub fn validate(&self) -> Result<()> {
        if self.history_path.as_os_str().is_empty() {
            return Err(ReviewError::Config(
                "History path cannot be empty".to_string(),
            ));
        }

        if self.history_limit == 0 {
            return Err(ReviewError::Config(
                "History limit must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }
}
