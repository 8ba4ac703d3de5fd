//! Tiered caching for redirect lookups.

pub mod backend;
pub mod fallback;
pub mod memory_cache;
pub mod null_cache;
pub mod redis_cache;

pub use backend::{CacheBackend, CacheError, CacheResult};
pub use fallback::{FallbackCache, TierHealth, redirect_key};
pub use memory_cache::MemoryCache;
pub use null_cache::NullCache;
pub use redis_cache::RedisCache;
