//! No-op cache implementation for disabled caching.

use super::service::{CacheResult, CacheService};
use async_trait::async_trait;
use tracing::debug;

/// A cache that never stores anything.
///
/// Used when `REDIS_URL` is not configured, when Redis is unreachable at
/// startup, and in tests. Every lookup is a miss.
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
impl CacheService for NullCache {
    async fn get_recipe_id(&self, _token: &str) -> CacheResult<Option<i64>> {
        Ok(None)
    }

    async fn set_recipe_id(
        &self,
        _token: &str,
        _recipe_id: i64,
        _ttl_seconds: Option<u64>,
    ) -> CacheResult<()> {
        Ok(())
    }

    async fn invalidate(&self, _token: &str) -> CacheResult<()> {
        Ok(())
    }

    async fn health_check(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_null_cache_always_misses() {
        let cache = NullCache::new();

        cache.set_recipe_id("abc", 42, None).await.unwrap();

        assert_eq!(cache.get_recipe_id("abc").await.unwrap(), None);
        assert!(cache.health_check().await);
    }
}
