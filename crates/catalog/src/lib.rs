//! Movie catalog access.
//!
//! - [`api`] wraps the catalog's HTTP listing and search endpoints.
//! - [`schema`] validates response bodies before they become
//!   [`CatalogItem`](cinemawala_core::movie::CatalogItem)s.
//! - [`source`] is the seam sessions query through.
//! - [`debounce`] coalesces keystrokes into one query per quiet period.

pub mod api;
pub mod debounce;
pub mod schema;
pub mod source;

pub use api::{CatalogApi, CatalogApiError, CatalogConfig};
pub use debounce::{DebouncedQueryController, QueryOutcome};
pub use source::{CatalogSource, ListResult};
