//! Redis-backed cache tier.

use super::backend::{CacheBackend, CacheError, CacheResult};
use async_trait::async_trait;
use redis::{AsyncCommands, Client, aio::ConnectionManager};
use tracing::{debug, info};

/// Redis cache tier.
///
/// Uses connection pooling via `ConnectionManager` for efficient connection
/// reuse. Operation failures are returned to the caller so the tier chain
/// can fall through to the next backend.
pub struct RedisCache {
    client: ConnectionManager,
    ttl_seconds: u64,
}

impl RedisCache {
    /// Connects to Redis, validates the connection with a PING, and
    /// configures the entry TTL.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::ConnectionError`] if the URL is invalid, the
    /// connection cannot be established, or the PING health check fails.
    pub async fn connect(redis_url: &str, ttl_seconds: u64) -> CacheResult<Self> {
        info!("Connecting to Redis at {}", redis_url);

        let client = Client::open(redis_url).map_err(|e| {
            CacheError::ConnectionError(format!("Failed to create Redis client: {}", e))
        })?;

        let manager = ConnectionManager::new(client).await.map_err(|e| {
            CacheError::ConnectionError(format!("Failed to connect to Redis: {}", e))
        })?;

        let mut test_conn = manager.clone();
        test_conn
            .ping::<()>()
            .await
            .map_err(|e| CacheError::ConnectionError(format!("Redis PING failed: {}", e)))?;

        info!("✓ Connected to Redis");

        Ok(Self {
            client: manager,
            ttl_seconds,
        })
    }
}

#[async_trait]
impl CacheBackend for RedisCache {
    fn name(&self) -> &'static str {
        "redis"
    }

    async fn get(&self, key: &str) -> CacheResult<Option<String>> {
        let mut conn = self.client.clone();

        match conn.get::<_, Option<String>>(key).await {
            Ok(Some(value)) => {
                debug!("Cache HIT ({}): {}", self.name(), key);
                Ok(Some(value))
            }
            Ok(None) => {
                debug!("Cache MISS ({}): {}", self.name(), key);
                Ok(None)
            }
            Err(e) => Err(CacheError::OperationError(format!(
                "Redis GET error for {}: {}",
                key, e
            ))),
        }
    }

    async fn put(&self, key: &str, value: &str) -> CacheResult<()> {
        let mut conn = self.client.clone();

        conn.set_ex::<_, _, ()>(key, value, self.ttl_seconds)
            .await
            .map_err(|e| {
                CacheError::OperationError(format!("Redis SET error for {}: {}", key, e))
            })?;

        debug!("Cache SET ({}): {} (TTL: {}s)", self.name(), key, self.ttl_seconds);
        Ok(())
    }

    async fn forget(&self, key: &str) -> CacheResult<()> {
        let mut conn = self.client.clone();

        let deleted: i32 = conn.del(key).await.map_err(|e| {
            CacheError::OperationError(format!("Redis DEL error for {}: {}", key, e))
        })?;

        if deleted > 0 {
            debug!("Cache INVALIDATE ({}): {}", self.name(), key);
        }
        Ok(())
    }

    async fn health_check(&self) -> bool {
        let mut conn = self.client.clone();
        conn.ping::<()>().await.is_ok()
    }
}
