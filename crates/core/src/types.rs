/// Movie identifiers are the numeric ids assigned by the external catalog.
pub type MovieId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Primary keys of rows the store assigns itself (BIGSERIAL).
pub type DbId = i64;
