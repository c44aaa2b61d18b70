//! Caching decorator for [`MediaResolver`]s.
//!
//! [`CachedResolver`] consults a [`MediaCache`] before going to the network.
//! Hits return immediately. Misses go through the cache's single-flight
//! path, so concurrent callers asking for the same uncached key share one
//! remote lookup. Only successes are stored: a failed lookup leaves the key
//! absent and the next call tries the remote again.

use std::sync::Arc;

use tracing::debug;

use super::traits::MediaResolver;
use crate::cache::{CacheConfig, MediaCache};
use crate::telemetry;
use crate::types::{CacheKey, MediaRecord, Namespace};
use crate::Result;

/// A [`MediaResolver`] fronted by a result cache.
///
/// ```rust,no_run
/// use anifetch::{AniZipClient, CacheConfig, CachedResolver, Namespace};
///
/// # async fn example() -> anifetch::Result<()> {
/// let resolver = CachedResolver::new(AniZipClient::new()?, &CacheConfig::default());
/// let media = resolver.resolve_cached(&Namespace::ANILIST, 1).await?;
/// println!("{} ({} episodes)", media.title(), media.episode_count);
/// # Ok(())
/// # }
/// ```
pub struct CachedResolver<R> {
    inner: R,
    cache: MediaCache,
}

impl<R: MediaResolver> CachedResolver<R> {
    /// Wrap `inner` with a fresh cache built from `config`.
    pub fn new(inner: R, config: &CacheConfig) -> Self {
        Self::with_cache(inner, MediaCache::new(config))
    }

    /// Wrap `inner` with an existing (possibly shared) cache.
    pub fn with_cache(inner: R, cache: MediaCache) -> Self {
        Self { inner, cache }
    }

    /// The underlying cache.
    pub fn cache(&self) -> &MediaCache {
        &self.cache
    }

    /// The wrapped resolver.
    pub fn inner(&self) -> &R {
        &self.inner
    }

    /// Resolve `(namespace, id)`, serving from cache when possible.
    pub async fn resolve_cached(&self, namespace: &Namespace, id: i64) -> Result<Arc<MediaRecord>> {
        let key = CacheKey::new(namespace.clone(), id);

        if let Some(media) = self.cache.get(&key).await {
            metrics::counter!(telemetry::CACHE_HITS_TOTAL, "service" => self.inner.name().to_owned())
                .increment(1);
            debug!(%key, "media cache hit");
            return Ok(media);
        }

        metrics::counter!(telemetry::CACHE_MISSES_TOTAL, "service" => self.inner.name().to_owned())
            .increment(1);
        debug!(%key, "media cache miss");

        self.cache
            .get_or_try_insert_with(key, async {
                self.inner.resolve(namespace, id).await.map(Arc::new)
            })
            .await
            .map_err(Arc::unwrap_or_clone)
    }
}
