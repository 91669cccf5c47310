//! Catalog query selection and browse-screen query state.

use serde::Serialize;

/// Quiet interval after the last keystroke before a query is issued.
pub const DEFAULT_DEBOUNCE_MS: u64 = 500;

/// The outbound catalog request chosen for a piece of search text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "text", rename_all = "snake_case")]
pub enum CatalogQuery {
    /// Default listing of popular movies.
    Popular,
    /// Title search for the given (trimmed, non-empty) text.
    Search(String),
}

impl CatalogQuery {
    /// Empty or whitespace-only input falls back to the popular listing.
    ///
    /// ```
    /// use cinemawala_core::search::CatalogQuery;
    /// assert_eq!(CatalogQuery::from_input("  "), CatalogQuery::Popular);
    /// assert_eq!(CatalogQuery::from_input(" bat "), CatalogQuery::Search("bat".into()));
    /// ```
    pub fn from_input(text: &str) -> Self {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            CatalogQuery::Popular
        } else {
            CatalogQuery::Search(trimmed.to_string())
        }
    }
}

impl std::fmt::Display for CatalogQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogQuery::Popular => f.write_str("popular"),
            CatalogQuery::Search(text) => write!(f, "search \"{text}\""),
        }
    }
}

/// View state of the browse screen.
///
/// Page position lives in the paginator; this holds everything else the
/// screen renders around the list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct QueryState {
    /// Latest text typed by the user, recorded on every keystroke.
    pub search_text: String,
    /// Generation of the most recently scheduled query.
    pub last_issued: u64,
    /// A scheduled or in-flight query has not been answered yet.
    pub loading: bool,
    /// The last applied response carried no items (or failed).
    pub no_results: bool,
}
