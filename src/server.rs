//! HTTP server initialization and runtime setup.
//!
//! Handles database connections, cache tier assembly, and Axum server lifecycle.

use crate::application::services::{ActivityMonitor, UrlService};
use crate::config::Config;
use crate::infrastructure::cache::{
    CacheBackend, FallbackCache, MemoryCache, RedisCache,
};
use crate::infrastructure::persistence::PgUrlRepository;
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::Result;
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - PostgreSQL connection pool
/// - Apply migrations
/// - Cache tier chain (Redis when configured, in-memory always)
/// - Axum HTTP server
///
/// # Errors
///
/// Returns an error if:
/// - Database connection fails
/// - Migrations fail
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime))
        .connect(&config.database_url)
        .await?;
    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations").run(&pool).await?;

    let cache = Arc::new(FallbackCache::new(build_cache_tiers(&config).await));

    let repository = Arc::new(PgUrlRepository::new(Arc::new(pool)));
    let url_service = Arc::new(UrlService::new(repository, cache.clone()));
    let activity = Arc::new(ActivityMonitor::new());

    let state = AppState::new(url_service, cache, activity, config.base_url.clone());

    let app = app_router(state);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    Ok(())
}

/// Assembles the cache tier chain, fastest-preferred first.
///
/// Redis leads when configured and reachable; the in-memory tier always
/// closes the chain so redirects keep their cache even with Redis down.
async fn build_cache_tiers(config: &Config) -> Vec<Arc<dyn CacheBackend>> {
    let mut tiers: Vec<Arc<dyn CacheBackend>> = Vec::new();

    if let Some(redis_url) = &config.redis_url {
        match RedisCache::connect(redis_url, config.cache_ttl_seconds).await {
            Ok(redis) => {
                tracing::info!("Cache tier enabled (Redis)");
                tiers.push(Arc::new(redis));
            }
            Err(e) => {
                tracing::warn!("Failed to connect to Redis: {}. Skipping Redis tier.", e);
            }
        }
    } else {
        tracing::info!("Redis tier disabled");
    }

    tiers.push(Arc::new(MemoryCache::new(
        config.memory_cache_entries,
        config.cache_ttl_seconds,
    )));
    tracing::info!("Cache tier enabled (in-memory)");

    tiers
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => tracing::error!("Failed to install SIGTERM handler: {}", e),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
