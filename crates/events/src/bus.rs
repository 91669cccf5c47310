//! Fan-out of [`FeedbackEvent`]s to whoever is watching the client.
//!
//! Detail and rating sessions hold the same [`EventBus`] through their
//! session context. The terminal binary attaches a debug logger to it;
//! integration tests subscribe to check which writes went through.

use chrono::{DateTime, Utc};
use cinemawala_core::types::MovieId;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// A like, dislike, review or app rating that reached the document store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedbackEvent {
    /// One of the `EVENT_*` names, e.g. `"review.posted"`.
    pub event_type: String,
    pub movie_id: Option<MovieId>,
    /// Profile name of the viewer, or `Guest`.
    pub actor: Option<String>,
    /// Counters after a vote, or the id of a new review or rating.
    pub payload: serde_json::Value,
    pub timestamp: DateTime<Utc>,
}

impl FeedbackEvent {
    pub fn new(event_type: impl Into<String>) -> Self {
        Self {
            event_type: event_type.into(),
            movie_id: None,
            actor: None,
            payload: serde_json::json!({}),
            timestamp: Utc::now(),
        }
    }

    pub fn with_movie(mut self, movie_id: MovieId) -> Self {
        self.movie_id = Some(movie_id);
        self
    }

    pub fn with_actor(mut self, actor: impl Into<String>) -> Self {
        self.actor = Some(actor.into());
        self
    }

    pub fn with_payload(mut self, payload: serde_json::Value) -> Self {
        self.payload = payload;
        self
    }
}

/// Events a watcher may fall behind by before it starts missing some.
const DEFAULT_CAPACITY: usize = 64;

/// Feedback notifications for one running client.
///
/// ```rust
/// use cinemawala_events::{EventBus, FeedbackEvent, EVENT_MOVIE_LIKED};
///
/// let bus = EventBus::default();
/// let mut watcher = bus.subscribe();
/// bus.publish(FeedbackEvent::new(EVENT_MOVIE_LIKED).with_movie(603));
/// assert_eq!(watcher.try_recv().unwrap().movie_id, Some(603));
/// ```
pub struct EventBus {
    sender: broadcast::Sender<FeedbackEvent>,
}

impl EventBus {
    /// A watcher more than `capacity` events behind gets
    /// `RecvError::Lagged` and resumes from the oldest event still held.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Hand `event` to every current watcher. With nobody watching the
    /// event is dropped and the write that produced it still counts.
    pub fn publish(&self, event: FeedbackEvent) {
        tracing::trace!(event_type = %event.event_type, movie_id = ?event.movie_id, "Feedback event");
        let _ = self.sender.send(event);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<FeedbackEvent> {
        self.sender.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use tokio::sync::broadcast::error::RecvError;

    use super::*;
    use crate::{EVENT_MOVIE_LIKED, EVENT_REVIEW_POSTED};

    #[tokio::test]
    async fn vote_event_carries_movie_actor_and_counters() {
        let bus = EventBus::default();
        let mut rx = bus.subscribe();

        bus.publish(
            FeedbackEvent::new(EVENT_MOVIE_LIKED)
                .with_movie(603)
                .with_actor("Guest")
                .with_payload(serde_json::json!({"likes": 4, "dislikes": 1})),
        );

        let received = rx.recv().await.unwrap();
        assert_eq!(received.event_type, EVENT_MOVIE_LIKED);
        assert_eq!(received.movie_id, Some(603));
        assert_eq!(received.actor.as_deref(), Some("Guest"));
        assert_eq!(received.payload["likes"], 4);
    }

    #[tokio::test]
    async fn logger_and_test_watchers_both_see_a_review() {
        let bus = EventBus::default();
        let mut logger = bus.subscribe();
        let mut watcher = bus.subscribe();

        bus.publish(FeedbackEvent::new(EVENT_REVIEW_POSTED).with_movie(268));

        assert_eq!(logger.recv().await.unwrap().event_type, EVENT_REVIEW_POSTED);
        assert_eq!(watcher.recv().await.unwrap().movie_id, Some(268));
    }

    #[test]
    fn nobody_watching_is_not_an_error() {
        let bus = EventBus::default();
        bus.publish(FeedbackEvent::new(EVENT_MOVIE_LIKED));
    }

    #[tokio::test]
    async fn slow_watcher_skips_to_the_oldest_held_event() {
        let bus = EventBus::new(2);
        let mut rx = bus.subscribe();

        for movie_id in [1, 2, 3] {
            bus.publish(FeedbackEvent::new(EVENT_MOVIE_LIKED).with_movie(movie_id));
        }

        assert_matches!(rx.recv().await, Err(RecvError::Lagged(1)));
        assert_eq!(rx.recv().await.unwrap().movie_id, Some(2));
        assert_eq!(rx.recv().await.unwrap().movie_id, Some(3));
    }
}
