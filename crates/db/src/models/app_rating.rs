//! Ratings of the app itself (the `app_ratings` table).

use cinemawala_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `app_ratings` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct AppRating {
    pub id: DbId,
    pub user_ref: String,
    pub user_name: String,
    pub rating: i32,
    pub review_text: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating or replacing a user's rating.
#[derive(Debug, Clone)]
pub struct UpsertAppRating {
    pub user_ref: String,
    pub user_name: String,
    pub rating: i32,
    pub review_text: String,
}
