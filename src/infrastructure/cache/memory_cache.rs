//! In-process cache tier backed by moka.

use super::backend::{CacheBackend, CacheResult};
use async_trait::async_trait;
use moka::future::Cache;
use std::time::Duration;

/// Bounded in-memory cache used as the secondary tier when Redis is down,
/// or as the only tier when Redis is not configured.
pub struct MemoryCache {
    cache: Cache<String, String>,
}

impl MemoryCache {
    /// Creates a cache holding at most `max_entries` values, each expiring
    /// `ttl_seconds` after insertion.
    pub fn new(max_entries: u64, ttl_seconds: u64) -> Self {
        let cache = Cache::builder()
            .max_capacity(max_entries)
            .time_to_live(Duration::from_secs(ttl_seconds))
            .build();

        Self { cache }
    }
}

#[async_trait]
impl CacheBackend for MemoryCache {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn get(&self, key: &str) -> CacheResult<Option<String>> {
        Ok(self.cache.get(key).await)
    }

    async fn put(&self, key: &str, value: &str) -> CacheResult<()> {
        self.cache.insert(key.to_string(), value.to_string()).await;
        Ok(())
    }

    async fn forget(&self, key: &str) -> CacheResult<()> {
        self.cache.invalidate(key).await;
        Ok(())
    }

    async fn health_check(&self) -> bool {
        true
    }
}
