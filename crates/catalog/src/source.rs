//! The catalog seam sessions query through.

use async_trait::async_trait;
use cinemawala_core::movie::CatalogItem;
use cinemawala_core::search::CatalogQuery;

/// Outcome of one listing or search call.
///
/// Failures never propagate as errors: a failed call yields `ok = false`
/// with no items and the caller shows its "no data" state.
#[derive(Debug, Clone, PartialEq)]
pub struct ListResult {
    pub items: Vec<CatalogItem>,
    pub ok: bool,
}

impl ListResult {
    pub fn success(items: Vec<CatalogItem>) -> Self {
        Self { items, ok: true }
    }

    pub fn failed() -> Self {
        Self {
            items: Vec::new(),
            ok: false,
        }
    }

    /// `true` when the call failed or returned nothing to show.
    pub fn is_empty_or_failed(&self) -> bool {
        !self.ok || self.items.is_empty()
    }
}

/// Anything that can answer popular-listing and title-search queries.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn search(&self, text: &str) -> ListResult;

    async fn popular(&self) -> ListResult;

    /// Dispatch a [`CatalogQuery`] to the matching call.
    async fn fetch(&self, query: &CatalogQuery) -> ListResult {
        match query {
            CatalogQuery::Popular => self.popular().await,
            CatalogQuery::Search(text) => self.search(text).await,
        }
    }
}
