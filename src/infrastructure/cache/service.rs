//! Cache service trait and error types.

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

/// Cache of short link token to recipe id mappings.
///
/// Sits in front of the short link repository on the redirect path. Failures
/// must degrade to a storage lookup, never to a failed redirect.
///
/// # Implementations
///
/// - [`crate::infrastructure::cache::RedisCache`] - Redis-backed cache with TTL support
/// - [`crate::infrastructure::cache::NullCache`] - No-op implementation for disabled caching
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CacheService: Send + Sync {
    /// Looks up the recipe a token points to.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(recipe_id))` on cache hit
    /// - `Ok(None)` on cache miss or backend error (fail-open)
    async fn get_recipe_id(&self, token: &str) -> CacheResult<Option<i64>>;

    /// Stores a token mapping, with `ttl_seconds` overriding the default TTL.
    async fn set_recipe_id(
        &self,
        token: &str,
        recipe_id: i64,
        ttl_seconds: Option<u64>,
    ) -> CacheResult<()>;

    /// Removes a cached token, e.g. after its recipe was deleted.
    async fn invalidate(&self, token: &str) -> CacheResult<()>;

    /// Checks if the cache backend is reachable.
    async fn health_check(&self) -> bool;
}
