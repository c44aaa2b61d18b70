//! Tests for [`ResultCache`]: concurrent keyed storage of computed results.

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use anifetch::{AnifetchError, CacheConfig, CacheKey, MediaCache, MediaRecord, Namespace, ResultCache};

fn record(episodes: u32) -> Arc<MediaRecord> {
    Arc::new(MediaRecord {
        episode_count: episodes,
        ..Default::default()
    })
}

#[tokio::test]
async fn cache_miss_returns_none() {
    let cache: ResultCache<String, u32> = ResultCache::unbounded();
    assert!(cache.get(&"nonexistent".to_string()).await.is_none());
    // A miss never inserts anything
    assert!(!cache.contains_key(&"nonexistent".to_string()));
}

#[tokio::test]
async fn set_then_get_is_idempotent() {
    let cache = MediaCache::unbounded();
    let key = CacheKey::new(Namespace::ANILIST, 21);
    cache.set(key.clone(), record(1000)).await;

    for _ in 0..3 {
        let got = cache.get(&key).await.unwrap();
        assert_eq!(got.episode_count, 1000);
    }
}

#[tokio::test]
async fn overwrite_replaces_entry() {
    let cache = MediaCache::unbounded();
    let key = CacheKey::new(Namespace::MAL, 1);
    cache.set(key.clone(), record(12)).await;
    cache.set(key.clone(), record(13)).await;

    assert_eq!(cache.get(&key).await.unwrap().episode_count, 13);
}

#[tokio::test]
async fn keys_differing_only_in_namespace_are_independent() {
    let cache = MediaCache::unbounded();
    cache.set(CacheKey::new(Namespace::ANILIST, 5), record(1)).await;

    assert!(cache.get(&CacheKey::new(Namespace::MAL, 5)).await.is_none());
    assert!(cache.get(&CacheKey::new(Namespace::ANILIST, 5)).await.is_some());
}

#[tokio::test]
async fn entry_exposes_insertion_time() {
    let cache: ResultCache<u32, &'static str> = ResultCache::unbounded();
    let before = std::time::Instant::now();
    cache.set(1, "one").await;

    let entry = cache.entry(&1).await.unwrap();
    assert_eq!(entry.value, "one");
    assert!(entry.inserted_at >= before);
}

#[tokio::test]
async fn remove_and_clear() {
    let cache: ResultCache<u32, u32> = ResultCache::unbounded();
    cache.set(1, 10).await;
    cache.set(2, 20).await;

    cache.remove(&1).await;
    assert!(cache.get(&1).await.is_none());
    assert_eq!(cache.get(&2).await, Some(20));

    cache.clear();
    cache.sync().await;
    assert!(cache.get(&2).await.is_none());
    assert!(cache.is_empty());
}

#[tokio::test]
async fn clones_share_storage() {
    let cache: ResultCache<u32, u32> = ResultCache::unbounded();
    let other = cache.clone();
    cache.set(7, 49).await;
    assert_eq!(other.get(&7).await, Some(49));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_writers_and_readers() {
    let cache: ResultCache<u32, u32> = ResultCache::unbounded();
    let mut handles = Vec::new();

    for i in 0..16u32 {
        let cache = cache.clone();
        handles.push(tokio::spawn(async move {
            cache.set(i, i * 2).await;
            cache.get(&i).await
        }));
    }

    for (i, handle) in handles.into_iter().enumerate() {
        assert_eq!(handle.await.unwrap(), Some(i as u32 * 2));
    }
    cache.sync().await;
    assert_eq!(cache.len(), 16);
}

#[tokio::test]
async fn get_or_try_insert_with_stores_success() {
    let cache: ResultCache<u32, u32> = ResultCache::unbounded();
    let calls = AtomicU32::new(0);

    for _ in 0..3 {
        let value = cache
            .get_or_try_insert_with(1, async {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok::<_, AnifetchError>(42)
            })
            .await
            .unwrap();
        assert_eq!(value, 42);
    }
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn get_or_try_insert_with_does_not_store_failure() {
    let cache: ResultCache<u32, u32> = ResultCache::unbounded();

    let err = cache
        .get_or_try_insert_with(1, async { Err(AnifetchError::NotFound { status: 404 }) })
        .await
        .unwrap_err();
    assert!(err.is_not_found());
    assert!(cache.get(&1).await.is_none());

    // A later success fills the slot
    let value = cache
        .get_or_try_insert_with(1, async { Ok::<_, AnifetchError>(7) })
        .await
        .unwrap();
    assert_eq!(value, 7);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_misses_share_one_computation() {
    let cache: ResultCache<u32, u32> = ResultCache::unbounded();
    let calls = Arc::new(AtomicU32::new(0));

    let lookups = (0..8).map(|_| {
        let cache = cache.clone();
        let calls = Arc::clone(&calls);
        async move {
            cache
                .get_or_try_insert_with(9, async {
                    calls.fetch_add(1, Ordering::SeqCst);
                    tokio::time::sleep(Duration::from_millis(50)).await;
                    Ok::<_, AnifetchError>(81)
                })
                .await
        }
    });

    let results = futures_util::future::join_all(lookups).await;
    assert!(results.into_iter().all(|r| r.unwrap() == 81));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn bounded_cache_evicts_down_to_capacity() {
    let cache: ResultCache<u32, u32> = ResultCache::new(&CacheConfig::new().max_entries(4));
    for i in 0..32 {
        cache.set(i, i).await;
    }
    cache.sync().await;
    assert!(cache.len() <= 4, "len = {}", cache.len());
}

#[tokio::test]
async fn entries_expire_after_ttl() {
    let cache: ResultCache<u32, u32> =
        ResultCache::new(&CacheConfig::new().ttl(Duration::from_millis(50)));
    cache.set(1, 1).await;
    assert_eq!(cache.get(&1).await, Some(1));

    tokio::time::sleep(Duration::from_millis(200)).await;
    assert!(cache.get(&1).await.is_none());
}
