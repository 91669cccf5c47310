//! Process-local store backed by `tokio::sync::RwLock`-guarded maps.
//!
//! Used when no `DATABASE_URL` is configured and throughout the tests.
//! Each counter update happens under a single write lock, which gives the
//! same all-or-nothing visibility as the Postgres upsert.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use cinemawala_core::feedback::{CounterDelta, FeedbackCounts};
use cinemawala_core::types::{DbId, MovieId};
use tokio::sync::RwLock;

use crate::models::app_rating::{AppRating, UpsertAppRating};
use crate::models::movie::{MovieRecord, MovieSeed};
use crate::models::review::{CreateReview, ReviewEntry};
use crate::store::{FeedbackStore, RatingStore, ReviewStore, StoreError};

#[derive(Default)]
struct Tables {
    movies: HashMap<MovieId, MovieRecord>,
    reviews: Vec<ReviewEntry>,
    ratings: Vec<AppRating>,
    next_rating_id: DbId,
}

/// In-memory implementation of every store trait.
#[derive(Default)]
pub struct InMemoryStore {
    tables: RwLock<Tables>,
    fail_writes: AtomicBool,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent write fail with [`StoreError::Unavailable`]
    /// until reset. Reads are unaffected.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// The stored movie record, if one has been created.
    pub async fn movie(&self, movie_id: MovieId) -> Option<MovieRecord> {
        self.tables.read().await.movies.get(&movie_id).cloned()
    }

    fn check_writable(&self) -> Result<(), StoreError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            Err(StoreError::Unavailable("writes are disabled".to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl FeedbackStore for InMemoryStore {
    async fn load_counters(&self, movie_id: MovieId) -> Result<FeedbackCounts, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .movies
            .get(&movie_id)
            .map(MovieRecord::counts)
            .unwrap_or_default())
    }

    async fn upsert_counters(
        &self,
        seed: &MovieSeed,
        delta: CounterDelta,
    ) -> Result<FeedbackCounts, StoreError> {
        self.check_writable()?;
        let mut tables = self.tables.write().await;
        let now = Utc::now();
        let record = tables.movies.entry(seed.id).or_insert_with(|| MovieRecord {
            id: seed.id,
            title: seed.title.clone(),
            release_date: seed.release_date.clone(),
            overview: seed.overview.clone(),
            poster_path: seed.poster_path.clone(),
            likes: 0,
            dislikes: 0,
            created_at: now,
            updated_at: now,
        });
        let counts = record.counts().apply(delta);
        record.likes = counts.likes;
        record.dislikes = counts.dislikes;
        record.updated_at = now;
        Ok(counts)
    }
}

#[async_trait]
impl ReviewStore for InMemoryStore {
    async fn append_review(&self, input: &CreateReview) -> Result<ReviewEntry, StoreError> {
        self.check_writable()?;
        let mut tables = self.tables.write().await;
        if !tables.movies.contains_key(&input.movie_id) {
            return Err(StoreError::Unavailable(format!(
                "movie {} has no record",
                input.movie_id
            )));
        }
        if tables.reviews.iter().any(|r| r.id == input.id) {
            return Err(StoreError::Conflict(format!(
                "Review {} already exists",
                input.id
            )));
        }
        let entry = ReviewEntry {
            id: input.id.clone(),
            movie_id: input.movie_id,
            author_name: input.author_name.clone(),
            text: input.text.clone(),
            created_at: input.created_at,
        };
        tables.reviews.push(entry.clone());
        Ok(entry)
    }

    async fn list_reviews(&self, movie_id: MovieId) -> Result<Vec<ReviewEntry>, StoreError> {
        let tables = self.tables.read().await;
        let mut reviews: Vec<ReviewEntry> = tables
            .reviews
            .iter()
            .filter(|r| r.movie_id == movie_id)
            .cloned()
            .collect();
        reviews.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(reviews)
    }
}

#[async_trait]
impl RatingStore for InMemoryStore {
    async fn upsert_rating(&self, input: &UpsertAppRating) -> Result<AppRating, StoreError> {
        self.check_writable()?;
        let mut tables = self.tables.write().await;
        let now = Utc::now();

        if let Some(existing) = tables
            .ratings
            .iter_mut()
            .find(|r| r.user_ref == input.user_ref)
        {
            existing.user_name = input.user_name.clone();
            existing.rating = input.rating;
            existing.review_text = input.review_text.clone();
            existing.updated_at = now;
            return Ok(existing.clone());
        }

        tables.next_rating_id += 1;
        let rating = AppRating {
            id: tables.next_rating_id,
            user_ref: input.user_ref.clone(),
            user_name: input.user_name.clone(),
            rating: input.rating,
            review_text: input.review_text.clone(),
            created_at: now,
            updated_at: now,
        };
        tables.ratings.push(rating.clone());
        Ok(rating)
    }

    async fn list_ratings(&self) -> Result<Vec<AppRating>, StoreError> {
        let tables = self.tables.read().await;
        let mut ratings = tables.ratings.clone();
        ratings.sort_by(|a, b| b.updated_at.cmp(&a.updated_at).then_with(|| b.id.cmp(&a.id)));
        Ok(ratings)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use chrono::Duration;

    use super::*;

    fn seed(id: MovieId) -> MovieSeed {
        MovieSeed {
            id,
            title: format!("Movie {id}"),
            release_date: Some("1999-03-31".into()),
            overview: None,
            poster_path: Some("/p.jpg".into()),
        }
    }

    fn review(id: &str, movie_id: MovieId, minutes_ago: i64) -> CreateReview {
        CreateReview {
            id: id.to_string(),
            movie_id,
            author_name: "tester".into(),
            text: format!("review {id}"),
            created_at: Utc::now() - Duration::minutes(minutes_ago),
        }
    }

    // -- counters ------------------------------------------------------------

    #[tokio::test]
    async fn missing_movie_loads_as_zero() {
        let store = InMemoryStore::new();
        assert_eq!(store.load_counters(1).await.unwrap(), FeedbackCounts::default());
        assert!(store.movie(1).await.is_none());
    }

    #[tokio::test]
    async fn upsert_creates_then_updates() {
        let store = InMemoryStore::new();
        let delta = CounterDelta { likes: 1, dislikes: 0 };
        assert_eq!(
            store.upsert_counters(&seed(7), delta).await.unwrap(),
            FeedbackCounts::new(1, 0)
        );

        let swap = CounterDelta { likes: -1, dislikes: 1 };
        assert_eq!(
            store.upsert_counters(&seed(7), swap).await.unwrap(),
            FeedbackCounts::new(0, 1)
        );

        let record = store.movie(7).await.unwrap();
        assert_eq!(record.title, "Movie 7");
        assert_eq!(record.poster_path.as_deref(), Some("/p.jpg"));
    }

    #[tokio::test]
    async fn failed_write_leaves_counters_untouched() {
        let store = InMemoryStore::new();
        store
            .upsert_counters(&seed(3), CounterDelta { likes: 2, dislikes: 0 })
            .await
            .unwrap();

        store.set_fail_writes(true);
        let result = store
            .upsert_counters(&seed(3), CounterDelta { likes: -1, dislikes: 1 })
            .await;
        assert_matches!(result, Err(StoreError::Unavailable(_)));
        assert_eq!(store.load_counters(3).await.unwrap(), FeedbackCounts::new(2, 0));
    }

    // -- reviews -------------------------------------------------------------

    #[tokio::test]
    async fn reviews_list_newest_first_per_movie() {
        let store = InMemoryStore::new();
        store.upsert_counters(&seed(1), CounterDelta::ZERO).await.unwrap();
        store.upsert_counters(&seed(2), CounterDelta::ZERO).await.unwrap();

        store.append_review(&review("1_a", 1, 30)).await.unwrap();
        store.append_review(&review("1_b", 1, 5)).await.unwrap();
        store.append_review(&review("2_a", 2, 1)).await.unwrap();
        store.append_review(&review("1_c", 1, 10)).await.unwrap();

        let ids: Vec<String> = store
            .list_reviews(1)
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(ids, vec!["1_b", "1_c", "1_a"]);
    }

    #[tokio::test]
    async fn duplicate_review_id_conflicts() {
        let store = InMemoryStore::new();
        store.upsert_counters(&seed(1), CounterDelta::ZERO).await.unwrap();
        store.append_review(&review("1_x", 1, 0)).await.unwrap();
        assert_matches!(
            store.append_review(&review("1_x", 1, 0)).await,
            Err(StoreError::Conflict(_))
        );
    }

    #[tokio::test]
    async fn review_requires_movie_record() {
        let store = InMemoryStore::new();
        assert_matches!(
            store.append_review(&review("9_x", 9, 0)).await,
            Err(StoreError::Unavailable(_))
        );
    }

    // -- ratings -------------------------------------------------------------

    #[tokio::test]
    async fn second_rating_from_same_user_replaces_first() {
        let store = InMemoryStore::new();
        let mut input = UpsertAppRating {
            user_ref: "u1".into(),
            user_name: "Shanewaz".into(),
            rating: 3,
            review_text: "ok".into(),
        };
        let first = store.upsert_rating(&input).await.unwrap();

        input.rating = 5;
        input.review_text = "great".into();
        let second = store.upsert_rating(&input).await.unwrap();

        assert_eq!(first.id, second.id);
        let all = store.list_ratings().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].rating, 5);
        assert_eq!(all[0].review_text, "great");
    }
}
