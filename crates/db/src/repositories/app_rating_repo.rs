//! Repository for the `app_ratings` table.

use sqlx::PgPool;

use crate::models::app_rating::{AppRating, UpsertAppRating};

/// Column list for the `app_ratings` table.
const COLUMNS: &str = "id, user_ref, user_name, rating, review_text, created_at, updated_at";

/// One rating per user; a second submission replaces the first.
pub struct AppRatingRepo;

impl AppRatingRepo {
    /// Insert the user's rating or update their existing one.
    pub async fn upsert(pool: &PgPool, input: &UpsertAppRating) -> Result<AppRating, sqlx::Error> {
        let query = format!(
            "INSERT INTO app_ratings (user_ref, user_name, rating, review_text) \
             VALUES ($1, $2, $3, $4) \
             ON CONFLICT (user_ref) DO UPDATE SET \
                user_name = EXCLUDED.user_name, \
                rating = EXCLUDED.rating, \
                review_text = EXCLUDED.review_text, \
                updated_at = NOW() \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AppRating>(&query)
            .bind(&input.user_ref)
            .bind(&input.user_name)
            .bind(input.rating)
            .bind(&input.review_text)
            .fetch_one(pool)
            .await
    }

    /// List all ratings, most recently submitted first.
    pub async fn list(pool: &PgPool) -> Result<Vec<AppRating>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM app_ratings ORDER BY updated_at DESC, id DESC");
        sqlx::query_as::<_, AppRating>(&query).fetch_all(pool).await
    }
}
