//! Like/dislike counters and vote transitions.
//!
//! A session holds at most one [`Vote`] per movie. [`plan_vote`] turns the
//! current vote and the requested one into a single [`CounterDelta`] that
//! the store applies atomically, so a switch from like to dislike moves
//! both counters in one update.

use serde::{Deserialize, Serialize};

/// A user's reaction to a movie.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Vote {
    Like,
    Dislike,
}

impl Vote {
    pub fn as_str(self) -> &'static str {
        match self {
            Vote::Like => "like",
            Vote::Dislike => "dislike",
        }
    }

    pub fn opposite(self) -> Vote {
        match self {
            Vote::Like => Vote::Dislike,
            Vote::Dislike => Vote::Like,
        }
    }
}

impl std::fmt::Display for Vote {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Community like/dislike totals for one movie.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackCounts {
    pub likes: i64,
    pub dislikes: i64,
}

impl FeedbackCounts {
    pub fn new(likes: i64, dislikes: i64) -> Self {
        Self { likes, dislikes }
    }

    /// Apply a delta, flooring both counters at zero.
    pub fn apply(self, delta: CounterDelta) -> Self {
        Self {
            likes: (self.likes + delta.likes).max(0),
            dislikes: (self.dislikes + delta.dislikes).max(0),
        }
    }

    pub fn total(&self) -> i64 {
        self.likes + self.dislikes
    }
}

/// Signed change to both counters, applied by the store as one operation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CounterDelta {
    pub likes: i64,
    pub dislikes: i64,
}

impl CounterDelta {
    /// No change. Used to seed a movie record without voting.
    pub const ZERO: CounterDelta = CounterDelta {
        likes: 0,
        dislikes: 0,
    };

    pub fn is_zero(&self) -> bool {
        self.likes == 0 && self.dislikes == 0
    }
}

/// What a vote request should do given the session's current vote.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VotePlan {
    /// The same vote was already cast; nothing changes.
    AlreadyCast(Vote),
    /// Apply `delta` to the counters, then record `next` as the session vote.
    Apply { delta: CounterDelta, next: Vote },
}

/// Plan the counter change for `requested` when the session holds `current`.
pub fn plan_vote(current: Option<Vote>, requested: Vote) -> VotePlan {
    let unit = |vote: Vote| match vote {
        Vote::Like => CounterDelta {
            likes: 1,
            dislikes: 0,
        },
        Vote::Dislike => CounterDelta {
            likes: 0,
            dislikes: 1,
        },
    };

    match current {
        Some(existing) if existing == requested => VotePlan::AlreadyCast(existing),
        Some(existing) => {
            let add = unit(requested);
            let remove = unit(existing);
            VotePlan::Apply {
                delta: CounterDelta {
                    likes: add.likes - remove.likes,
                    dislikes: add.dislikes - remove.dislikes,
                },
                next: requested,
            }
        }
        None => VotePlan::Apply {
            delta: unit(requested),
            next: requested,
        },
    }
}
