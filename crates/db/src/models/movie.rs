//! Movie feedback record (the `movies` table).

use cinemawala_core::feedback::FeedbackCounts;
use cinemawala_core::movie::CatalogItem;
use cinemawala_core::types::{MovieId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `movies` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct MovieRecord {
    pub id: MovieId,
    pub title: String,
    pub release_date: Option<String>,
    pub overview: Option<String>,
    pub poster_path: Option<String>,
    pub likes: i64,
    pub dislikes: i64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl MovieRecord {
    pub fn counts(&self) -> FeedbackCounts {
        FeedbackCounts::new(self.likes, self.dislikes)
    }
}

/// Catalog fields copied onto the movie record when it is first created.
#[derive(Debug, Clone, PartialEq)]
pub struct MovieSeed {
    pub id: MovieId,
    pub title: String,
    pub release_date: Option<String>,
    pub overview: Option<String>,
    pub poster_path: Option<String>,
}

impl From<&CatalogItem> for MovieSeed {
    fn from(item: &CatalogItem) -> Self {
        Self {
            id: item.id,
            title: item.title.clone(),
            release_date: item.release_date.clone(),
            overview: item.overview.clone(),
            poster_path: item.poster_path.clone(),
        }
    }
}
