use cinemawala_core::error::CoreError;
use cinemawala_core::feedback::Vote;
use cinemawala_core::types::MovieId;
use cinemawala_db::StoreError;

/// Error surfaced to a screen by a session operation.
///
/// Every variant leaves the session's local state unchanged; the screen
/// turns it into a notice via [`SessionError::notice_kind`].
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// Invalid input, or a mutation already in flight for the movie.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The session already cast this exact vote for the movie.
    #[error("You already {vote}d this movie")]
    DuplicateVote { movie_id: MovieId, vote: Vote },

    /// Reading from or writing to the document store failed.
    #[error("Store operation failed: {0}")]
    Store(#[from] StoreError),
}

/// How a screen should present a [`SessionError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    /// Informational; nothing to fix.
    Info,
    /// The user's input needs correcting.
    Validation,
    /// The operation can be tried again later.
    Retryable,
}

impl SessionError {
    pub fn notice_kind(&self) -> NoticeKind {
        match self {
            SessionError::Core(CoreError::Validation(_)) => NoticeKind::Validation,
            SessionError::Core(CoreError::Conflict(_)) => NoticeKind::Retryable,
            SessionError::DuplicateVote { .. } => NoticeKind::Info,
            SessionError::Store(_) => NoticeKind::Retryable,
        }
    }

    pub fn is_retryable(&self) -> bool {
        self.notice_kind() == NoticeKind::Retryable
    }
}
