//! Repository for the `movies` table.

use cinemawala_core::feedback::CounterDelta;
use cinemawala_core::types::MovieId;
use sqlx::PgPool;

use crate::models::movie::{MovieRecord, MovieSeed};

/// Column list for the `movies` table.
const COLUMNS: &str = "id, title, release_date, overview, poster_path, \
    likes, dislikes, created_at, updated_at";

/// Provides counter reads and atomic counter updates for movies.
pub struct MovieRepo;

impl MovieRepo {
    /// Find a movie record by catalog id.
    pub async fn find_by_id(
        pool: &PgPool,
        id: MovieId,
    ) -> Result<Option<MovieRecord>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM movies WHERE id = $1");
        sqlx::query_as::<_, MovieRecord>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Create the record if absent, then add `delta` to both counters.
    ///
    /// Runs as a single statement, so concurrent writers never observe a
    /// state where only one of the two counters has moved. Counters are
    /// floored at zero.
    pub async fn upsert_counters(
        pool: &PgPool,
        seed: &MovieSeed,
        delta: CounterDelta,
    ) -> Result<MovieRecord, sqlx::Error> {
        let query = format!(
            "INSERT INTO movies (id, title, release_date, overview, poster_path, likes, dislikes) \
             VALUES ($1, $2, $3, $4, $5, GREATEST($6, 0), GREATEST($7, 0)) \
             ON CONFLICT (id) DO UPDATE SET \
                likes = GREATEST(movies.likes + $6, 0), \
                dislikes = GREATEST(movies.dislikes + $7, 0), \
                updated_at = NOW() \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, MovieRecord>(&query)
            .bind(seed.id)
            .bind(&seed.title)
            .bind(&seed.release_date)
            .bind(&seed.overview)
            .bind(&seed.poster_path)
            .bind(delta.likes)
            .bind(delta.dislikes)
            .fetch_one(pool)
            .await
    }
}
