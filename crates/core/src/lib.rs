//! Domain types and pure logic for the Cinemawala client.
//!
//! Nothing in this crate performs I/O. The store, catalog and session
//! crates build on these types so that paging, vote transitions and
//! input validation can be tested without a network or a database.

pub mod error;
pub mod feedback;
pub mod movie;
pub mod pagination;
pub mod poster;
pub mod profile;
pub mod rating;
pub mod review;
pub mod search;
pub mod types;
