//! No-op cache tier for testing or disabled caching.

use super::backend::{CacheBackend, CacheResult};
use async_trait::async_trait;
use tracing::debug;

/// A cache tier that does nothing.
///
/// All operations succeed immediately without storing or retrieving data,
/// so every read degrades to a repository lookup.
pub struct NullCache;

impl NullCache {
    pub fn new() -> Self {
        debug!("Using NullCache (caching disabled)");
        Self
    }
}

impl Default for NullCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CacheBackend for NullCache {
    fn name(&self) -> &'static str {
        "null"
    }

    async fn get(&self, _key: &str) -> CacheResult<Option<String>> {
        Ok(None)
    }

    async fn put(&self, _key: &str, _value: &str) -> CacheResult<()> {
        Ok(())
    }

    async fn forget(&self, _key: &str) -> CacheResult<()> {
        Ok(())
    }

    async fn health_check(&self) -> bool {
        true
    }
}
