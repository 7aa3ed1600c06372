//! Configuration management for the to-do client.
//!
//! Loads configuration from environment variables with sensible defaults.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::env;

/// Default service root (the public JSONPlaceholder instance)
pub const DEFAULT_API_URL: &str = "https://jsonplaceholder.typicode.com";

/// Default number of records kept after a fetch
pub const DEFAULT_FETCH_LIMIT: usize = 4;

/// Default `tracing` filter when `RUST_LOG` is unset
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Service root, without the `/todos` collection path (`TODO_API_URL`)
    pub api_url: String,
    /// Fetch keeps only this many leading records (`TODO_FETCH_LIMIT`)
    pub fetch_limit: usize,
    /// `tracing` filter directive (`RUST_LOG`)
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            fetch_limit: DEFAULT_FETCH_LIMIT,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl Config {
    /// Load configuration from the process environment
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if a variable is set to an unusable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup
    ///
    /// Unset and empty variables fall back to their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if a variable is set to an unusable value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let defaults = Self::default();

        let api_url = match get("TODO_API_URL") {
            Some(url) if url.starts_with("http://") || url.starts_with("https://") => url,
            Some(url) => {
                return Err(ConfigError::Invalid {
                    key: "TODO_API_URL",
                    value: url,
                    reason: "expected an http:// or https:// URL".to_string(),
                });
            },
            None => defaults.api_url,
        };

        let fetch_limit = match get("TODO_FETCH_LIMIT") {
            Some(raw) => raw.trim().parse::<usize>().map_err(|e| ConfigError::Invalid {
                key: "TODO_FETCH_LIMIT",
                value: raw.clone(),
                reason: e.to_string(),
            })?,
            None => defaults.fetch_limit,
        };

        let log_filter = get("RUST_LOG").unwrap_or(defaults.log_filter);

        Ok(Self {
            api_url,
            fetch_limit,
            log_filter,
        })
    }
}
