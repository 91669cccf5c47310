//! In-process notification of feedback activity.
//!
//! Sessions publish a [`FeedbackEvent`] after every successful write to
//! the document store; the terminal driver and tests subscribe to
//! observe them.

pub mod bus;

pub use bus::{EventBus, FeedbackEvent};

/// A movie received a like.
pub const EVENT_MOVIE_LIKED: &str = "movie.liked";

/// A movie received a dislike.
pub const EVENT_MOVIE_DISLIKED: &str = "movie.disliked";

/// A review was appended to a movie.
pub const EVENT_REVIEW_POSTED: &str = "review.posted";

/// A user submitted or replaced their app rating.
pub const EVENT_RATING_SUBMITTED: &str = "rating.submitted";
