//! `cinemawala` -- terminal movie browser.
//!
//! Searches the external catalog, and records likes, dislikes, reviews
//! and app ratings in the document store.
//!
//! # Environment variables
//!
//! See [`AppConfig::from_env`] for the full table. `CATALOG_API_KEY` is
//! required; without `DATABASE_URL` all writes stay in memory.

use std::sync::Arc;

use anyhow::Context;
use cinemawala_app::context::{SessionContext, Stores};
use cinemawala_app::driver::Driver;
use cinemawala_app::{AppConfig, BrowseSession, SessionCache};
use cinemawala_catalog::CatalogApi;
use cinemawala_db::PgStore;
use cinemawala_events::EventBus;
use tokio::sync::broadcast::error::RecvError;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cinemawala_app=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = AppConfig::from_env().context("invalid configuration")?;

    tracing::info!(
        catalog = %config.catalog.base_url,
        page_size = config.page_size,
        debounce_ms = config.debounce.as_millis() as u64,
        persistent = config.database_url.is_some(),
        "Starting cinemawala",
    );

    let stores = match &config.database_url {
        Some(url) => {
            let pool = cinemawala_db::create_pool(url)
                .await
                .context("failed to connect to the document store")?;
            cinemawala_db::health_check(&pool).await?;
            cinemawala_db::run_migrations(&pool)
                .await
                .context("failed to apply migrations")?;
            tracing::info!("Document store ready");
            Stores::from_shared(Arc::new(PgStore::new(pool)))
        }
        None => {
            tracing::warn!("DATABASE_URL not set; reactions and reviews are kept in memory");
            Stores::in_memory()
        }
    };

    let cache = SessionCache::new(&config.session_cache_path);
    let profile = cache.load_profile().await.unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Session cache unreadable; continuing as Guest");
        None
    });
    match &profile {
        Some(p) => tracing::info!(user = %p.user_name, "Loaded cached profile"),
        None => tracing::info!("No cached profile; reviews are posted as Guest"),
    }

    let events = Arc::new(EventBus::default());
    let mut event_rx = events.subscribe();
    tokio::spawn(async move {
        loop {
            match event_rx.recv().await {
                Ok(event) => tracing::debug!(
                    event_type = %event.event_type,
                    movie_id = ?event.movie_id,
                    actor = ?event.actor,
                    "Feedback event"
                ),
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "Event log fell behind");
                }
                Err(RecvError::Closed) => break,
            }
        }
    });

    let ctx = Arc::new(SessionContext::new(
        profile,
        stores,
        events,
        config.image_base_url.clone(),
    ));

    let catalog = Arc::new(CatalogApi::new(&config.catalog)?);
    let browse = BrowseSession::new(catalog, config.debounce, config.page_size)?;

    Driver::new(ctx, browse, cache).run().await?;
    Ok(())
}
