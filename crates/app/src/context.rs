//! State shared by every screen of one running client.
//!
//! [`SessionContext`] owns the cached profile, the per-movie votes cast in
//! this run and the set of movies with a write in flight. Screens hold it
//! behind an `Arc` and never keep their own copy of any of these.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use cinemawala_core::error::CoreError;
use cinemawala_core::feedback::Vote;
use cinemawala_core::poster::poster_url;
use cinemawala_core::profile::{author_name, UserProfile};
use cinemawala_core::types::MovieId;
use cinemawala_db::{FeedbackStore, InMemoryStore, RatingStore, ReviewStore};
use cinemawala_events::EventBus;

/// Trait-object handles to the document store.
#[derive(Clone)]
pub struct Stores {
    pub feedback: Arc<dyn FeedbackStore>,
    pub reviews: Arc<dyn ReviewStore>,
    pub ratings: Arc<dyn RatingStore>,
}

impl Stores {
    /// Use one store value for every concern.
    pub fn from_shared<S>(store: Arc<S>) -> Self
    where
        S: FeedbackStore + ReviewStore + RatingStore + 'static,
    {
        Self {
            feedback: store.clone(),
            reviews: store.clone(),
            ratings: store,
        }
    }

    /// Fresh process-local stores.
    pub fn in_memory() -> Self {
        Self::from_shared(Arc::new(InMemoryStore::new()))
    }
}

pub struct SessionContext {
    profile: Option<UserProfile>,
    stores: Stores,
    events: Arc<EventBus>,
    image_base_url: String,
    votes: Mutex<HashMap<MovieId, Vote>>,
    in_flight: Mutex<HashSet<MovieId>>,
}

impl SessionContext {
    pub fn new(
        profile: Option<UserProfile>,
        stores: Stores,
        events: Arc<EventBus>,
        image_base_url: impl Into<String>,
    ) -> Self {
        Self {
            profile,
            stores,
            events,
            image_base_url: image_base_url.into(),
            votes: Mutex::new(HashMap::new()),
            in_flight: Mutex::new(HashSet::new()),
        }
    }

    pub fn profile(&self) -> Option<&UserProfile> {
        self.profile.as_ref()
    }

    /// Name reviews are attributed to; "Guest" without a profile.
    pub fn author_name(&self) -> &str {
        author_name(self.profile.as_ref())
    }

    pub fn stores(&self) -> &Stores {
        &self.stores
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    pub fn poster_url(&self, poster_path: Option<&str>) -> String {
        poster_url(&self.image_base_url, poster_path)
    }

    /// Vote this session cast for `movie_id`, if any.
    pub fn vote(&self, movie_id: MovieId) -> Option<Vote> {
        lock(&self.votes).get(&movie_id).copied()
    }

    /// Record a vote after the store accepted it.
    pub fn record_vote(&self, movie_id: MovieId, vote: Vote) {
        lock(&self.votes).insert(movie_id, vote);
    }

    /// Claim the write slot for `movie_id`.
    ///
    /// Fails with [`CoreError::Conflict`] while another write for the same
    /// movie is unresolved. The slot is released when the guard drops.
    pub fn begin_mutation(&self, movie_id: MovieId) -> Result<MutationGuard<'_>, CoreError> {
        if !lock(&self.in_flight).insert(movie_id) {
            return Err(CoreError::Conflict(format!(
                "an update for movie {movie_id} is still in progress"
            )));
        }
        Ok(MutationGuard {
            ctx: self,
            movie_id,
        })
    }

    pub fn is_mutating(&self, movie_id: MovieId) -> bool {
        lock(&self.in_flight).contains(&movie_id)
    }
}

/// Holds a movie's write slot; see [`SessionContext::begin_mutation`].
pub struct MutationGuard<'a> {
    ctx: &'a SessionContext,
    movie_id: MovieId,
}

impl std::fmt::Debug for MutationGuard<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MutationGuard")
            .field("movie_id", &self.movie_id)
            .finish_non_exhaustive()
    }
}

impl Drop for MutationGuard<'_> {
    fn drop(&mut self) {
        lock(&self.ctx.in_flight).remove(&self.movie_id);
    }
}

// Critical sections never panic, so a poisoned lock still holds valid data.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
