//! App ratings: one star rating plus optional text per user.

use serde::Serialize;

use crate::error::CoreError;

pub const MIN_RATING: i32 = 1;
pub const MAX_RATING: i32 = 5;

/// Maximum length of the text accompanying a rating.
pub const MAX_RATING_TEXT_LENGTH: usize = 2_000;

pub fn validate_rating(rating: i32) -> Result<(), CoreError> {
    if (MIN_RATING..=MAX_RATING).contains(&rating) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Rating must be between {MIN_RATING} and {MAX_RATING}, got {rating}"
        )))
    }
}

pub fn validate_rating_text(text: &str) -> Result<(), CoreError> {
    if text.chars().count() > MAX_RATING_TEXT_LENGTH {
        return Err(CoreError::Validation(format!(
            "Rating text exceeds maximum length of {MAX_RATING_TEXT_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Aggregate over all submitted ratings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct RatingSummary {
    pub total_stars: i64,
    pub rater_count: i64,
    /// Mean rating, `0.0` when nobody has rated yet.
    pub average: f64,
}

impl RatingSummary {
    pub fn from_ratings<I>(ratings: I) -> Self
    where
        I: IntoIterator<Item = i32>,
    {
        let (total_stars, rater_count) = ratings
            .into_iter()
            .fold((0i64, 0i64), |(sum, n), r| (sum + i64::from(r), n + 1));
        let average = if rater_count > 0 {
            total_stars as f64 / rater_count as f64
        } else {
            0.0
        };
        Self {
            total_stars,
            rater_count,
            average,
        }
    }
}
