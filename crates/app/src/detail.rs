//! Movie detail screen: community counters, this session's vote, reviews.
//!
//! Writes go through the shared [`SessionContext`], which serializes them
//! per movie. Local state only changes after the store confirms a write,
//! so a failed call leaves the screen exactly as it was.

use std::sync::Arc;

use chrono::Utc;
use cinemawala_core::feedback::{plan_vote, CounterDelta, FeedbackCounts, Vote, VotePlan};
use cinemawala_core::movie::CatalogItem;
use cinemawala_core::review::{review_id, validate_review_text};
use cinemawala_db::models::movie::MovieSeed;
use cinemawala_db::models::review::{CreateReview, ReviewEntry};
use cinemawala_events::{
    FeedbackEvent, EVENT_MOVIE_DISLIKED, EVENT_MOVIE_LIKED, EVENT_REVIEW_POSTED,
};
use serde_json::json;

use crate::context::SessionContext;
use crate::error::SessionError;

pub struct MovieDetailSession {
    ctx: Arc<SessionContext>,
    movie: CatalogItem,
    counts: FeedbackCounts,
    reviews: Vec<ReviewEntry>,
}

impl MovieDetailSession {
    /// Open the screen for `movie`, loading its counters and reviews.
    pub async fn open(ctx: Arc<SessionContext>, movie: CatalogItem) -> Result<Self, SessionError> {
        let mut session = Self {
            ctx,
            movie,
            counts: FeedbackCounts::default(),
            reviews: Vec::new(),
        };
        session.reload().await?;
        Ok(session)
    }

    /// Re-read counters and reviews from the store.
    pub async fn reload(&mut self) -> Result<(), SessionError> {
        let stores = self.ctx.stores();
        let (counts, reviews) = tokio::try_join!(
            stores.feedback.load_counters(self.movie.id),
            stores.reviews.list_reviews(self.movie.id),
        )?;
        self.counts = counts;
        self.reviews = reviews;
        Ok(())
    }

    pub async fn like(&mut self) -> Result<FeedbackCounts, SessionError> {
        self.cast(Vote::Like).await
    }

    pub async fn dislike(&mut self) -> Result<FeedbackCounts, SessionError> {
        self.cast(Vote::Dislike).await
    }

    /// Post a review under the profile's name ("Guest" when signed out).
    ///
    /// Text is trimmed and validated before anything is written. The movie
    /// record is created first if this is its first write.
    pub async fn post_review(&mut self, text: &str) -> Result<ReviewEntry, SessionError> {
        let text = validate_review_text(text)?.to_string();
        let movie_id = self.movie.id;
        let ctx = Arc::clone(&self.ctx);
        let _guard = ctx.begin_mutation(movie_id)?;

        ctx.stores()
            .feedback
            .upsert_counters(&MovieSeed::from(&self.movie), CounterDelta::ZERO)
            .await?;

        let now = Utc::now();
        let input = CreateReview {
            id: review_id(movie_id, now),
            movie_id,
            author_name: ctx.author_name().to_string(),
            text,
            created_at: now,
        };
        let entry = ctx.stores().reviews.append_review(&input).await.map_err(|e| {
            tracing::warn!(movie_id, error = %e, "Review write failed");
            e
        })?;

        match ctx.stores().reviews.list_reviews(movie_id).await {
            Ok(reviews) => self.reviews = reviews,
            Err(e) => {
                tracing::warn!(movie_id, error = %e, "Review list refresh failed after posting");
                self.reviews.insert(0, entry.clone());
            }
        }

        tracing::info!(movie_id, review_id = %entry.id, "Review posted");
        ctx.events().publish(
            FeedbackEvent::new(EVENT_REVIEW_POSTED)
                .with_movie(movie_id)
                .with_actor(entry.author_name.clone())
                .with_payload(json!({ "review_id": entry.id })),
        );
        Ok(entry)
    }

    pub fn movie(&self) -> &CatalogItem {
        &self.movie
    }

    pub fn counts(&self) -> FeedbackCounts {
        self.counts
    }

    /// Newest first.
    pub fn reviews(&self) -> &[ReviewEntry] {
        &self.reviews
    }

    /// Vote this session has cast for the movie.
    pub fn reaction(&self) -> Option<Vote> {
        self.ctx.vote(self.movie.id)
    }

    pub fn poster_url(&self) -> String {
        self.ctx.poster_url(self.movie.poster_path.as_deref())
    }

    async fn cast(&mut self, requested: Vote) -> Result<FeedbackCounts, SessionError> {
        let movie_id = self.movie.id;
        let ctx = Arc::clone(&self.ctx);
        let _guard = ctx.begin_mutation(movie_id)?;

        let previous = ctx.vote(movie_id);
        let (delta, next) = match plan_vote(previous, requested) {
            VotePlan::AlreadyCast(vote) => {
                return Err(SessionError::DuplicateVote { movie_id, vote });
            }
            VotePlan::Apply { delta, next } => (delta, next),
        };

        let counts = ctx
            .stores()
            .feedback
            .upsert_counters(&MovieSeed::from(&self.movie), delta)
            .await
            .map_err(|e| {
                tracing::warn!(movie_id, vote = %requested, error = %e, "Vote write failed");
                e
            })?;

        ctx.record_vote(movie_id, next);
        self.counts = counts;

        tracing::info!(
            movie_id,
            vote = %next,
            likes = counts.likes,
            dislikes = counts.dislikes,
            "Vote recorded"
        );
        let event_type = match next {
            Vote::Like => EVENT_MOVIE_LIKED,
            Vote::Dislike => EVENT_MOVIE_DISLIKED,
        };
        ctx.events().publish(
            FeedbackEvent::new(event_type)
                .with_movie(movie_id)
                .with_actor(ctx.author_name())
                .with_payload(json!({
                    "likes": counts.likes,
                    "dislikes": counts.dislikes,
                    "switched_from": previous.map(Vote::as_str),
                })),
        );
        Ok(counts)
    }
}
