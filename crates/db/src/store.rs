//! Store traits used by the client sessions.
//!
//! Sessions only ever talk to the document store through these traits.
//! [`PgStore`] backs them with the Postgres repositories;
//! [`InMemoryStore`](crate::memory::InMemoryStore) backs them with
//! process-local maps for offline use and tests.

use async_trait::async_trait;
use cinemawala_core::feedback::{CounterDelta, FeedbackCounts};
use cinemawala_core::types::MovieId;
use sqlx::PgPool;

use crate::models::app_rating::{AppRating, UpsertAppRating};
use crate::models::movie::MovieSeed;
use crate::models::review::{CreateReview, ReviewEntry};
use crate::repositories::{AppRatingRepo, MovieRepo, ReviewRepo};

/// Errors surfaced by a store implementation.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// The write collided with existing data (e.g. a duplicate review id).
    #[error("Conflict: {0}")]
    Conflict(String),

    /// The store rejected or could not accept the request.
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Per-movie like/dislike counters.
#[async_trait]
pub trait FeedbackStore: Send + Sync {
    /// Current counters, zero when the movie has no record yet.
    async fn load_counters(&self, movie_id: MovieId) -> Result<FeedbackCounts, StoreError>;

    /// Create the movie record from `seed` if absent and add `delta` to
    /// both counters, as one atomic operation. Returns the new counters.
    async fn upsert_counters(
        &self,
        seed: &MovieSeed,
        delta: CounterDelta,
    ) -> Result<FeedbackCounts, StoreError>;
}

/// Append-only movie reviews.
#[async_trait]
pub trait ReviewStore: Send + Sync {
    async fn append_review(&self, input: &CreateReview) -> Result<ReviewEntry, StoreError>;

    /// Snapshot of a movie's reviews, newest first.
    async fn list_reviews(&self, movie_id: MovieId) -> Result<Vec<ReviewEntry>, StoreError>;
}

/// Ratings of the app, one per user.
#[async_trait]
pub trait RatingStore: Send + Sync {
    async fn upsert_rating(&self, input: &UpsertAppRating) -> Result<AppRating, StoreError>;

    /// All ratings, most recently submitted first.
    async fn list_ratings(&self) -> Result<Vec<AppRating>, StoreError>;
}

// ---------------------------------------------------------------------------
// Postgres
// ---------------------------------------------------------------------------

/// Postgres-backed implementation of every store trait.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl FeedbackStore for PgStore {
    async fn load_counters(&self, movie_id: MovieId) -> Result<FeedbackCounts, StoreError> {
        let record = MovieRepo::find_by_id(&self.pool, movie_id).await?;
        Ok(record.map(|r| r.counts()).unwrap_or_default())
    }

    async fn upsert_counters(
        &self,
        seed: &MovieSeed,
        delta: CounterDelta,
    ) -> Result<FeedbackCounts, StoreError> {
        let record = MovieRepo::upsert_counters(&self.pool, seed, delta).await?;
        tracing::debug!(
            movie_id = record.id,
            likes = record.likes,
            dislikes = record.dislikes,
            "Movie counters upserted",
        );
        Ok(record.counts())
    }
}

#[async_trait]
impl ReviewStore for PgStore {
    async fn append_review(&self, input: &CreateReview) -> Result<ReviewEntry, StoreError> {
        ReviewRepo::create(&self.pool, input)
            .await
            .map_err(|err| match &err {
                sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some("23505") => {
                    StoreError::Conflict(format!("Review {} already exists", input.id))
                }
                _ => StoreError::Database(err),
            })
    }

    async fn list_reviews(&self, movie_id: MovieId) -> Result<Vec<ReviewEntry>, StoreError> {
        Ok(ReviewRepo::list_for_movie(&self.pool, movie_id).await?)
    }
}

#[async_trait]
impl RatingStore for PgStore {
    async fn upsert_rating(&self, input: &UpsertAppRating) -> Result<AppRating, StoreError> {
        Ok(AppRatingRepo::upsert(&self.pool, input).await?)
    }

    async fn list_ratings(&self) -> Result<Vec<AppRating>, StoreError> {
        Ok(AppRatingRepo::list(&self.pool).await?)
    }
}
