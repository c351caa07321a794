//! Redis-backed cache implementation.

use super::service::{CacheError, CacheResult, CacheService};
use async_trait::async_trait;
use redis::{AsyncCommands, Client, aio::ConnectionManager};
use tracing::{debug, error, info, warn};

const KEY_PREFIX: &str = "shortlink:";

/// Redis cache of token to recipe id mappings.
///
/// Uses a `ConnectionManager` for connection reuse. All operations are
/// fail-open: errors are logged and reported as misses.
pub struct RedisCache {
    client: ConnectionManager,
    default_ttl: u64,
}

impl RedisCache {
    /// Connects to Redis and validates the connection with a PING.
    ///
    /// `default_ttl_seconds` applies when [`CacheService::set_recipe_id`] is
    /// called without a TTL (`CACHE_TTL_SECONDS`).
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::ConnectionError`] if the URL is invalid, the connection cannot
    /// be established, or the PING fails.
    pub async fn connect(redis_url: &str, default_ttl_seconds: u64) -> CacheResult<Self> {
        info!("Connecting to Redis");

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
            default_ttl: default_ttl_seconds,
        })
    }
}

fn build_key(token: &str) -> String {
    format!("{KEY_PREFIX}{token}")
}

#[async_trait]
impl CacheService for RedisCache {
    async fn get_recipe_id(&self, token: &str) -> CacheResult<Option<i64>> {
        let mut conn = self.client.clone();

        match conn.get::<_, Option<i64>>(build_key(token)).await {
            Ok(Some(recipe_id)) => {
                debug!(token, recipe_id, "Cache HIT");
                Ok(Some(recipe_id))
            }
            Ok(None) => {
                debug!(token, "Cache MISS");
                Ok(None)
            }
            Err(e) => {
                error!(token, error = %e, "Redis GET failed");
                Ok(None)
            }
        }
    }

    async fn set_recipe_id(
        &self,
        token: &str,
        recipe_id: i64,
        ttl_seconds: Option<u64>,
    ) -> CacheResult<()> {
        let mut conn = self.client.clone();
        let ttl = ttl_seconds.unwrap_or(self.default_ttl);

        if let Err(e) = conn
            .set_ex::<_, _, ()>(build_key(token), recipe_id, ttl)
            .await
        {
            warn!(token, error = %e, "Redis SET failed");
        } else {
            debug!(token, recipe_id, ttl, "Cache SET");
        }
        Ok(())
    }

    async fn invalidate(&self, token: &str) -> CacheResult<()> {
        let mut conn = self.client.clone();

        match conn.del::<_, i32>(build_key(token)).await {
            Ok(deleted) if deleted > 0 => debug!(token, "Cache INVALIDATE"),
            Ok(_) => {}
            Err(e) => warn!(token, error = %e, "Redis DEL failed"),
        }
        Ok(())
    }

    async fn health_check(&self) -> bool {
        let mut conn = self.client.clone();
        conn.ping::<()>().await.is_ok()
    }
}
