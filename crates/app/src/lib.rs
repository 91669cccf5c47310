//! `cinemawala-app` library crate.
//!
//! Screen sessions and their wiring. The binary entrypoint in `main.rs`
//! drives these from a terminal; everything here is also reachable from
//! the integration tests.

pub mod browse;
pub mod config;
pub mod context;
pub mod detail;
pub mod driver;
pub mod error;
pub mod ratings;
pub mod session_cache;

pub use browse::BrowseSession;
pub use config::AppConfig;
pub use context::{SessionContext, Stores};
pub use detail::MovieDetailSession;
pub use error::{NoticeKind, SessionError};
pub use ratings::AppRatingBoard;
pub use session_cache::SessionCache;
