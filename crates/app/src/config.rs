use std::path::PathBuf;
use std::time::Duration;

use cinemawala_catalog::api::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};
use cinemawala_catalog::CatalogConfig;
use cinemawala_core::pagination::DEFAULT_PAGE_SIZE;
use cinemawala_core::poster::DEFAULT_IMAGE_BASE_URL;
use cinemawala_core::search::DEFAULT_DEBOUNCE_MS;

/// Default location of the local session cache file.
pub const DEFAULT_SESSION_CACHE_PATH: &str = ".cinemawala/session.json";

/// A configuration value is missing or malformed.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{key} must be {expected}, got '{value}'")]
    Invalid {
        key: &'static str,
        expected: &'static str,
        value: String,
    },
}

/// Client configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub catalog: CatalogConfig,
    /// Base URL poster paths are appended to.
    pub image_base_url: String,
    /// Quiet interval before a typed query is sent.
    pub debounce: Duration,
    /// Movies per page on the browse screen.
    pub page_size: usize,
    /// Postgres URL of the document store; in-memory stores when unset.
    pub database_url: Option<String>,
    /// File the signed-in user's profile is cached in.
    pub session_cache_path: PathBuf,
}

impl AppConfig {
    /// Load configuration from the process environment.
    ///
    /// | Env Var                  | Default                          |
    /// |--------------------------|----------------------------------|
    /// | `CATALOG_API_KEY`        | required                         |
    /// | `CATALOG_BASE_URL`       | `https://api.themoviedb.org/3`   |
    /// | `CATALOG_IMAGE_BASE_URL` | `http://image.tmdb.org/t/p/w185` |
    /// | `CATALOG_TIMEOUT_SECS`   | `10`                             |
    /// | `SEARCH_DEBOUNCE_MS`     | `500`                            |
    /// | `PAGE_SIZE`              | `3`                              |
    /// | `DATABASE_URL`           | unset (in-memory stores)         |
    /// | `SESSION_CACHE_PATH`     | `.cinemawala/session.json`       |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let api_key = get("CATALOG_API_KEY").ok_or(ConfigError::Missing("CATALOG_API_KEY"))?;
        let base_url = get("CATALOG_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.into());
        let timeout_secs = parse_number(
            "CATALOG_TIMEOUT_SECS",
            get("CATALOG_TIMEOUT_SECS"),
            DEFAULT_TIMEOUT_SECS,
        )?;

        let image_base_url =
            get("CATALOG_IMAGE_BASE_URL").unwrap_or_else(|| DEFAULT_IMAGE_BASE_URL.into());
        let debounce_ms =
            parse_number("SEARCH_DEBOUNCE_MS", get("SEARCH_DEBOUNCE_MS"), DEFAULT_DEBOUNCE_MS)?;

        let page_size = parse_number("PAGE_SIZE", get("PAGE_SIZE"), DEFAULT_PAGE_SIZE as u64)?;
        if page_size == 0 {
            return Err(ConfigError::Invalid {
                key: "PAGE_SIZE",
                expected: "a positive integer",
                value: "0".into(),
            });
        }

        let session_cache_path = get("SESSION_CACHE_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SESSION_CACHE_PATH));

        Ok(Self {
            catalog: CatalogConfig {
                base_url,
                api_key,
                timeout: Duration::from_secs(timeout_secs),
            },
            image_base_url,
            debounce: Duration::from_millis(debounce_ms),
            page_size: page_size as usize,
            database_url: get("DATABASE_URL"),
            session_cache_path,
        })
    }
}

fn parse_number(key: &'static str, raw: Option<String>, default: u64) -> Result<u64, ConfigError> {
    match raw {
        None => Ok(default),
        Some(value) => value.parse().map_err(|_| ConfigError::Invalid {
            key,
            expected: "a non-negative integer",
            value,
        }),
    }
}
