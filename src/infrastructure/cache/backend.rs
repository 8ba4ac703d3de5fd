//! Cache backend trait and error types.

use async_trait::async_trait;
use std::fmt;

/// Errors that can occur during cache operations.
#[derive(Debug)]
pub enum CacheError {
    ConnectionError(String),
    OperationError(String),
}

impl fmt::Display for CacheError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::ConnectionError(e) => write!(f, "Cache connection error: {}", e),
            Self::OperationError(e) => write!(f, "Cache operation error: {}", e),
        }
    }
}

impl std::error::Error for CacheError {}

/// Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// One tier in the cache chain.
///
/// Backends surface their failures; degradation decisions belong to
/// [`crate::infrastructure::cache::FallbackCache`], which walks the tiers
/// in order and logs whatever goes wrong. Entry TTL is fixed per backend at
/// construction time.
///
/// # Implementations
///
/// - [`crate::infrastructure::cache::RedisCache`] - Redis-backed primary tier
/// - [`crate::infrastructure::cache::MemoryCache`] - in-process secondary tier
/// - [`crate::infrastructure::cache::NullCache`] - no-op for disabled caching
#[async_trait]
pub trait CacheBackend: Send + Sync {
    /// Short backend name for logs and health reports.
    fn name(&self) -> &'static str;

    /// Retrieves a value. `Ok(None)` is an authoritative miss; errors mean
    /// the tier itself is unavailable.
    async fn get(&self, key: &str) -> CacheResult<Option<String>>;

    /// Stores a value under the backend's configured TTL.
    async fn put(&self, key: &str, value: &str) -> CacheResult<()>;

    /// Removes a value. Removing an absent key is not an error.
    async fn forget(&self, key: &str) -> CacheResult<()>;

    /// Checks whether the backend is reachable.
    async fn health_check(&self) -> bool;
}
