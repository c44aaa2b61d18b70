//! Generic keyed result cache.
//!
//! [`ResultCache`] remembers successfully computed values so repeated
//! lookups for the same key skip the remote call. It is a thin layer over
//! moka's async cache, which provides the locking: any number of tasks may
//! `get` and `set` concurrently.
//!
//! # Bounds
//!
//! By default the cache is unbounded and entries live for the lifetime of
//! the process. [`CacheConfig::max_entries`] and [`CacheConfig::ttl`] opt
//! into capacity-based eviction and expiry respectively.
//!
//! # Single-flight
//!
//! [`ResultCache::get_or_try_insert_with`] coalesces concurrent misses for
//! the same key: one caller runs the initializer, the rest await its
//! outcome. A failed initializer stores nothing.

use std::hash::Hash;
use std::sync::Arc;
use std::time::{Duration, Instant};

use moka::future::Cache;

/// Configuration for a [`ResultCache`].
///
/// The default is unbounded with no expiry.
///
/// ```rust
/// # use anifetch::CacheConfig;
/// # use std::time::Duration;
/// let config = CacheConfig::new()
///     .max_entries(10_000)
///     .ttl(Duration::from_secs(6 * 3600));
/// assert_eq!(config.max_entries, Some(10_000));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheConfig {
    /// Maximum number of entries before least-valuable entries are evicted.
    /// Default: unbounded.
    pub max_entries: Option<u64>,
    /// Time-to-live measured from insertion. Default: never expires.
    pub ttl: Option<Duration>,
}

impl CacheConfig {
    /// Create an unbounded, non-expiring config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bound the cache to `n` entries.
    pub fn max_entries(mut self, n: u64) -> Self {
        self.max_entries = Some(n);
        self
    }

    /// Expire entries `ttl` after insertion.
    pub fn ttl(mut self, ttl: Duration) -> Self {
        self.ttl = Some(ttl);
        self
    }
}

/// A stored value together with the moment it was inserted.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    pub value: V,
    pub inserted_at: Instant,
}

impl<V> CacheEntry<V> {
    fn new(value: V) -> Self {
        Self {
            value,
            inserted_at: Instant::now(),
        }
    }
}

/// Thread-safe map from key to a previously computed value.
///
/// Cloning is cheap and yields a handle to the same underlying storage.
pub struct ResultCache<K, V> {
    entries: Cache<K, CacheEntry<V>>,
}

impl<K, V> Clone for ResultCache<K, V> {
    fn clone(&self) -> Self {
        Self {
            entries: self.entries.clone(),
        }
    }
}

impl<K, V> ResultCache<K, V>
where
    K: Hash + Eq + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    /// Create a cache with the given configuration.
    pub fn new(config: &CacheConfig) -> Self {
        let mut builder = Cache::builder();
        if let Some(max) = config.max_entries {
            builder = builder.max_capacity(max);
        }
        if let Some(ttl) = config.ttl {
            builder = builder.time_to_live(ttl);
        }
        Self {
            entries: builder.build(),
        }
    }

    /// Create an unbounded cache whose entries never expire.
    pub fn unbounded() -> Self {
        Self::new(&CacheConfig::default())
    }

    /// Look up a value. Never mutates the cache on a miss.
    pub async fn get(&self, key: &K) -> Option<V> {
        self.entries.get(key).await.map(|entry| entry.value)
    }

    /// Look up a value along with its insertion time.
    pub async fn entry(&self, key: &K) -> Option<CacheEntry<V>> {
        self.entries.get(key).await
    }

    /// Store `value` under `key`, replacing any previous value.
    pub async fn set(&self, key: K, value: V) {
        self.entries.insert(key, CacheEntry::new(value)).await;
    }

    /// Return the cached value for `key`, or run `init` to produce it.
    ///
    /// Concurrent calls for the same missing key share one `init` run. On
    /// success the value is stored and returned to every waiter. On failure
    /// nothing is stored and every waiter receives the same error.
    pub async fn get_or_try_insert_with<F, E>(&self, key: K, init: F) -> Result<V, Arc<E>>
    where
        F: Future<Output = Result<V, E>>,
        E: Send + Sync + 'static,
    {
        self.entries
            .try_get_with(key, async { init.await.map(CacheEntry::new) })
            .await
            .map(|entry| entry.value)
    }

    /// Whether a live entry exists for `key`.
    pub fn contains_key(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }

    /// Drop the entry for `key`, if any.
    pub async fn remove(&self, key: &K) {
        self.entries.invalidate(key).await;
    }

    /// Approximate number of entries.
    ///
    /// Eviction bookkeeping is batched; call [`sync`](Self::sync) first for
    /// an exact count.
    pub fn len(&self) -> u64 {
        self.entries.entry_count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Evict all entries.
    pub fn clear(&self) {
        self.entries.invalidate_all();
    }

    /// Flush pending eviction and expiry work.
    pub async fn sync(&self) {
        self.entries.run_pending_tasks().await;
    }
}

impl<K, V> Default for ResultCache<K, V>
where
    K: Hash + Eq + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::unbounded()
    }
}
