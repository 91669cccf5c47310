//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod app_rating_repo;
pub mod movie_repo;
pub mod review_repo;

pub use app_rating_repo::AppRatingRepo;
pub use movie_repo::MovieRepo;
pub use review_repo::ReviewRepo;
