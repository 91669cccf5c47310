//! Catalog items as returned by the external movie catalog.

use serde::{Deserialize, Serialize};

use crate::types::MovieId;

/// A single movie from a listing or search response.
///
/// Items are immutable once fetched and only live as long as the result
/// set of the query that produced them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub id: MovieId,
    pub title: String,
    pub release_date: Option<String>,
    pub language: Option<String>,
    pub popularity: f64,
    pub poster_path: Option<String>,
    pub overview: Option<String>,
}

impl CatalogItem {
    /// Minimal item with only the required fields set.
    pub fn new(id: MovieId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            release_date: None,
            language: None,
            popularity: 0.0,
            poster_path: None,
            overview: None,
        }
    }
}
