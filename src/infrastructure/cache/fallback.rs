//! Ordered cache tier chain with graceful degradation.

use super::backend::CacheBackend;
use std::sync::Arc;
use tracing::warn;

/// Namespaced cache key for a short code.
pub fn redirect_key(code: &str) -> String {
    format!("url_{code}")
}

/// Health snapshot of a single tier.
#[derive(Debug, Clone)]
pub struct TierHealth {
    pub name: &'static str,
    pub healthy: bool,
}

/// Walks an ordered list of cache tiers, falling through on failure.
///
/// Reads return the answer of the first tier that responds; a tier error is
/// logged and the next tier is consulted. Writes land in the first tier
/// that accepts them. Invalidation is broadcast to every tier so a deleted
/// record cannot survive in a lower tier. When every tier fails, callers
/// simply proceed against the repository; cache trouble never reaches a
/// client.
pub struct FallbackCache {
    tiers: Vec<Arc<dyn CacheBackend>>,
}

impl FallbackCache {
    pub fn new(tiers: Vec<Arc<dyn CacheBackend>>) -> Self {
        Self { tiers }
    }

    /// Returns the first answer, hit or miss, from a responsive tier.
    pub async fn get(&self, key: &str) -> Option<String> {
        for tier in &self.tiers {
            match tier.get(key).await {
                Ok(value) => return value,
                Err(e) => {
                    warn!("Cache tier {} failed on get {}: {}", tier.name(), key, e);
                }
            }
        }
        None
    }

    /// Stores into the first tier that accepts the write.
    pub async fn put(&self, key: &str, value: &str) {
        for tier in &self.tiers {
            match tier.put(key, value).await {
                Ok(()) => return,
                Err(e) => {
                    warn!("Cache tier {} failed on put {}: {}", tier.name(), key, e);
                }
            }
        }
    }

    /// Removes the key from every tier.
    pub async fn forget(&self, key: &str) {
        for tier in &self.tiers {
            if let Err(e) = tier.forget(key).await {
                warn!("Cache tier {} failed on forget {}: {}", tier.name(), key, e);
            }
        }
    }

    /// Probes every tier for health reporting.
    pub async fn health(&self) -> Vec<TierHealth> {
        let mut report = Vec::with_capacity(self.tiers.len());
        for tier in &self.tiers {
            report.push(TierHealth {
                name: tier.name(),
                healthy: tier.health_check().await,
            });
        }
        report
    }
}
