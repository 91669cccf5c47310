//! HTTP client for the external movie catalog.
//!
//! Wraps the catalog's `GET /search/movie` and `GET /movie/popular`
//! endpoints using [`reqwest`]. [`CatalogApi::fetch_list`] reports
//! failures as [`CatalogApiError`]; the [`CatalogSource`] impl folds them
//! into a failed [`ListResult`] so the browse screen never sees an error.

use std::time::Duration;

use async_trait::async_trait;
use cinemawala_core::movie::CatalogItem;
use cinemawala_core::search::CatalogQuery;

use crate::schema::{parse_list_response, SchemaError};
use crate::source::{CatalogSource, ListResult};

/// Default catalog API base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3";

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Connection settings for the catalog API.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// Base URL without trailing slash, e.g. `https://api.themoviedb.org/3`.
    pub base_url: String,
    /// Key sent as the `api_key` query parameter.
    pub api_key: String,
    /// Whole-request timeout applied by the HTTP client.
    pub timeout: Duration,
}

impl CatalogConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: api_key.into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

/// Errors from the catalog HTTP layer.
#[derive(Debug, thiserror::Error)]
pub enum CatalogApiError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The catalog returned a non-2xx status code.
    #[error("Catalog API error ({status}): {body}")]
    ApiError {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The body did not match the expected list schema.
    #[error("Catalog response rejected: {0}")]
    Schema(#[from] SchemaError),
}

/// HTTP client for the movie catalog.
#[derive(Clone)]
pub struct CatalogApi {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl CatalogApi {
    /// Build a client with its own connection pool and the configured timeout.
    pub fn new(config: &CatalogConfig) -> Result<Self, CatalogApiError> {
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self::with_client(client, config))
    }

    /// Create an API client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, config: &CatalogConfig) -> Self {
        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Run one listing or search request. A single attempt; no retries.
    pub async fn fetch_list(&self, query: &CatalogQuery) -> Result<Vec<CatalogItem>, CatalogApiError> {
        let request = match query {
            CatalogQuery::Popular => self
                .client
                .get(format!("{}/movie/popular", self.base_url))
                .query(&[("api_key", self.api_key.as_str())]),
            CatalogQuery::Search(text) => self
                .client
                .get(format!("{}/search/movie", self.base_url))
                .query(&[("query", text.as_str()), ("api_key", self.api_key.as_str())]),
        };

        let response = Self::ensure_success(request.send().await?).await?;
        let body = response.bytes().await?;
        Ok(parse_list_response(&body)?)
    }

    // ---- private helpers ----

    /// Return the response unchanged on a 2xx status, otherwise an
    /// [`CatalogApiError::ApiError`] carrying the status and body text.
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, CatalogApiError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(CatalogApiError::ApiError {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    async fn fetch_soft(&self, query: &CatalogQuery) -> ListResult {
        match self.fetch_list(query).await {
            Ok(items) => {
                tracing::debug!(%query, count = items.len(), "Catalog query succeeded");
                ListResult::success(items)
            }
            Err(e) => {
                tracing::warn!(%query, error = %e, "Catalog query failed");
                ListResult::failed()
            }
        }
    }
}

#[async_trait]
impl CatalogSource for CatalogApi {
    async fn search(&self, text: &str) -> ListResult {
        self.fetch_soft(&CatalogQuery::Search(text.to_string())).await
    }

    async fn popular(&self) -> ListResult {
        self.fetch_soft(&CatalogQuery::Popular).await
    }
}
