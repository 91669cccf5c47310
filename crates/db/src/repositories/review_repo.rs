//! Repository for the `movie_reviews` table.

use cinemawala_core::types::MovieId;
use sqlx::PgPool;

use crate::models::review::{CreateReview, ReviewEntry};

/// Column list for the `movie_reviews` table.
const COLUMNS: &str = "id, movie_id, author_name, text, created_at";

/// Append and list operations for movie reviews. Reviews are never
/// updated or deleted here.
pub struct ReviewRepo;

impl ReviewRepo {
    /// Insert a new review, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateReview) -> Result<ReviewEntry, sqlx::Error> {
        let query = format!(
            "INSERT INTO movie_reviews (id, movie_id, author_name, text, created_at) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ReviewEntry>(&query)
            .bind(&input.id)
            .bind(input.movie_id)
            .bind(&input.author_name)
            .bind(&input.text)
            .bind(input.created_at)
            .fetch_one(pool)
            .await
    }

    /// List all reviews for a movie, newest first.
    pub async fn list_for_movie(
        pool: &PgPool,
        movie_id: MovieId,
    ) -> Result<Vec<ReviewEntry>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM movie_reviews \
             WHERE movie_id = $1 \
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, ReviewEntry>(&query)
            .bind(movie_id)
            .fetch_all(pool)
            .await
    }
}
