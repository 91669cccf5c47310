//! Community movie reviews (the `movie_reviews` table).

use cinemawala_core::types::{MovieId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `movie_reviews` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct ReviewEntry {
    pub id: String,
    pub movie_id: MovieId,
    pub author_name: String,
    pub text: String,
    pub created_at: Timestamp,
}

/// DTO for appending a review. Built by the session after validation.
#[derive(Debug, Clone)]
pub struct CreateReview {
    pub id: String,
    pub movie_id: MovieId,
    pub author_name: String,
    pub text: String,
    pub created_at: Timestamp,
}
