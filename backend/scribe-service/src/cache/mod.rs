use redis::{aio::ConnectionManager, AsyncCommands};
use std::time::Duration;
use tracing::{debug, info};

use crate::error::Result;
use crate::metrics;

/// Namespace version counter. Bumping it orphans every cached page at
/// once; orphaned entries fall out via their TTL.
const VERSION_KEY: &str = "pages:version";

/// Read-through cache for rendered index pages.
///
/// Content mutations never touch this cache: a stale page inside the TTL
/// window is correct behavior, and the wholesale [`PageCache::clear`] is
/// the only invalidation primitive.
#[derive(Clone)]
pub struct PageCache {
    redis: ConnectionManager,
    default_ttl: Duration,
}

impl PageCache {
    pub fn new(redis: ConnectionManager, default_ttl_secs: u64) -> Self {
        Self {
            redis,
            default_ttl: Duration::from_secs(default_ttl_secs),
        }
    }

    fn index_key(version: u64, page: u32) -> String {
        format!("pages:v{}:index:{}", version, page)
    }

    async fn current_version(&self) -> Result<u64> {
        let mut conn = self.redis.clone();
        let version: Option<u64> = conn.get(VERSION_KEY).await?;
        Ok(version.unwrap_or(0))
    }

    /// Cached body for an index page, if fresh
    pub async fn read_index_page(&self, page: u32) -> Result<Option<String>> {
        let version = self.current_version().await?;
        let key = Self::index_key(version, page);
        let mut conn = self.redis.clone();

        match conn.get::<_, Option<String>>(&key).await? {
            Some(body) => {
                debug!("Page cache HIT for index page {}", page);
                metrics::PAGE_CACHE_EVENTS.with_label_values(&["hit"]).inc();
                Ok(Some(body))
            }
            None => {
                debug!("Page cache MISS for index page {}", page);
                metrics::PAGE_CACHE_EVENTS.with_label_values(&["miss"]).inc();
                Ok(None)
            }
        }
    }

    /// Store a rendered index page. The TTL gets a small jitter so pages
    /// do not expire in lockstep.
    pub async fn write_index_page(&self, page: u32, body: &str) -> Result<()> {
        let version = self.current_version().await?;
        let key = Self::index_key(version, page);

        let jitter = (rand::random::<u32>() % 10) as f64 / 100.0;
        let jitter_secs = (self.default_ttl.as_secs_f64() * jitter).round() as u64;
        let ttl = self.default_ttl + Duration::from_secs(jitter_secs);

        let mut conn = self.redis.clone();
        conn.set_ex::<_, _, ()>(&key, body, ttl.as_secs()).await?;

        debug!("Page cache WRITE for index page {} (ttl {:?})", page, ttl);

        Ok(())
    }

    /// Wholesale invalidation: bump the namespace version so every cached
    /// page misses on its next read
    pub async fn clear(&self) -> Result<u64> {
        let mut conn = self.redis.clone();
        let version: u64 = conn.incr(VERSION_KEY, 1).await?;

        info!("Page cache cleared (namespace version {})", version);
        metrics::PAGE_CACHE_EVENTS
            .with_label_values(&["clear"])
            .inc();

        Ok(version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_key_format() {
        assert_eq!(PageCache::index_key(0, 1), "pages:v0:index:1");
        assert_eq!(PageCache::index_key(3, 12), "pages:v3:index:12");
    }

    #[test]
    fn test_index_key_changes_with_version() {
        // A version bump must address a disjoint key space.
        assert_ne!(PageCache::index_key(1, 1), PageCache::index_key(2, 1));
    }
}
