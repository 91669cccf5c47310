//! Review text validation and review id construction.

use uuid::Uuid;

use crate::error::CoreError;
use crate::types::{MovieId, Timestamp};

/// Maximum length (in characters) of a movie review.
pub const MAX_REVIEW_LENGTH: usize = 10_000;

/// Validate review text and return it trimmed.
///
/// Empty or whitespace-only text is rejected before anything is sent to
/// the store.
pub fn validate_review_text(text: &str) -> Result<&str, CoreError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation(
            "Please write a review before posting".to_string(),
        ));
    }
    if trimmed.chars().count() > MAX_REVIEW_LENGTH {
        return Err(CoreError::Validation(format!(
            "Review exceeds maximum length of {MAX_REVIEW_LENGTH} characters"
        )));
    }
    Ok(trimmed)
}

/// Client-assigned review id: `<movie_id>_<unix_millis>_<uuid v7>`.
///
/// The v7 suffix keeps ids unique when several reviews land in the same
/// millisecond, and ids built later in a process sort after earlier ones.
pub fn review_id(movie_id: MovieId, at: Timestamp) -> String {
    format!(
        "{movie_id}_{}_{}",
        at.timestamp_millis(),
        Uuid::now_v7().simple()
    )
}
