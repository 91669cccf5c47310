//! App rating board: one 1-5 rating per signed-in user plus a summary.

use std::sync::Arc;

use cinemawala_core::error::CoreError;
use cinemawala_core::rating::{validate_rating, validate_rating_text, RatingSummary};
use cinemawala_db::models::app_rating::{AppRating, UpsertAppRating};
use cinemawala_events::{FeedbackEvent, EVENT_RATING_SUBMITTED};
use serde_json::json;

use crate::context::SessionContext;
use crate::error::SessionError;

pub struct AppRatingBoard {
    ctx: Arc<SessionContext>,
    ratings: Vec<AppRating>,
    summary: RatingSummary,
}

impl AppRatingBoard {
    pub async fn load(ctx: Arc<SessionContext>) -> Result<Self, SessionError> {
        let mut board = Self {
            ctx,
            ratings: Vec::new(),
            summary: RatingSummary::default(),
        };
        board.reload().await?;
        Ok(board)
    }

    pub async fn reload(&mut self) -> Result<(), SessionError> {
        let ratings = self.ctx.stores().ratings.list_ratings().await?;
        self.summary = RatingSummary::from_ratings(ratings.iter().map(|r| r.rating));
        self.ratings = ratings;
        Ok(())
    }

    /// Submit or replace the signed-in user's rating.
    pub async fn submit(&mut self, rating: i32, text: &str) -> Result<AppRating, SessionError> {
        validate_rating(rating)?;
        let text = text.trim();
        validate_rating_text(text)?;

        let profile = self
            .ctx
            .profile()
            .ok_or_else(|| CoreError::Validation("sign in to rate the app".into()))?;
        let input = UpsertAppRating {
            user_ref: profile.user_ref.clone(),
            user_name: profile.user_name.clone(),
            rating,
            review_text: text.to_string(),
        };

        let saved = self.ctx.stores().ratings.upsert_rating(&input).await?;
        tracing::info!(user_ref = %saved.user_ref, rating = saved.rating, "App rating submitted");
        self.ctx.events().publish(
            FeedbackEvent::new(EVENT_RATING_SUBMITTED)
                .with_actor(saved.user_name.clone())
                .with_payload(json!({ "rating": saved.rating })),
        );

        if let Err(e) = self.reload().await {
            tracing::warn!(error = %e, "Rating list refresh failed after submitting");
            self.ratings.retain(|r| r.user_ref != saved.user_ref);
            self.ratings.insert(0, saved.clone());
            self.summary = RatingSummary::from_ratings(self.ratings.iter().map(|r| r.rating));
        }
        Ok(saved)
    }

    /// Most recently submitted first.
    pub fn ratings(&self) -> &[AppRating] {
        &self.ratings
    }

    pub fn summary(&self) -> RatingSummary {
        self.summary
    }

    /// The signed-in user's rating, if they have submitted one.
    pub fn own_rating(&self) -> Option<&AppRating> {
        let user_ref = &self.ctx.profile()?.user_ref;
        self.ratings.iter().find(|r| &r.user_ref == user_ref)
    }
}
