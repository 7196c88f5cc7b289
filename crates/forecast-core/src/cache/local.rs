//! Process-local TTL map with a background sweeper (C2).

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::RwLock;

struct Entry<V> {
    value: V,
    inserted_at: Instant,
}

/// Process-local cache of typed values with lazy TTL eviction on read and a
/// background sweep for entries nobody reads again.
///
/// Grounded on `storage::grid_cache::GridDataCache` (atomic hit/miss/
/// eviction counters, `Arc<RwLock<...>>`) and
/// `storage::tile_memory_cache::TileMemoryCache` (TTL-on-read,
/// `is_expired()`).
pub struct LocalStore<V: Clone + Send + Sync + 'static> {
    map: Arc<RwLock<HashMap<String, Entry<V>>>>,
    ttl: Duration,
    hits: AtomicU64,
    misses: AtomicU64,
    evictions: AtomicU64,
    stop: Arc<AtomicBool>,
}

impl<V: Clone + Send + Sync + 'static> LocalStore<V> {
    pub fn new(ttl: Duration) -> Arc<Self> {
        let store = Arc::new(Self {
            map: Arc::new(RwLock::new(HashMap::new())),
            ttl,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            evictions: AtomicU64::new(0),
            stop: Arc::new(AtomicBool::new(false)),
        });
        store.clone().spawn_sweeper();
        store
    }

    fn spawn_sweeper(self: Arc<Self>) {
        let map = self.map.clone();
        let ttl = self.ttl;
        let stop = self.stop.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(ttl);
            loop {
                interval.tick().await;
                if stop.load(Ordering::Relaxed) {
                    return;
                }
                let now = Instant::now();
                let mut guard = map.write().await;
                let before = guard.len();
                guard.retain(|_, entry| now.duration_since(entry.inserted_at) < ttl);
                let removed = before - guard.len();
                drop(guard);
                if removed > 0 {
                    tracing::debug!(removed, "local store sweep evicted expired entries");
                }
            }
        });
    }

    pub async fn get(&self, key: &str) -> Option<V> {
        {
            let guard = self.map.read().await;
            if let Some(entry) = guard.get(key) {
                if entry.inserted_at.elapsed() < self.ttl {
                    self.hits.fetch_add(1, Ordering::Relaxed);
                    return Some(entry.value.clone());
                }
            }
        }
        // Lazily evict an expired entry found on read.
        let mut guard = self.map.write().await;
        if let Some(entry) = guard.get(key) {
            if entry.inserted_at.elapsed() >= self.ttl {
                guard.remove(key);
                self.evictions.fetch_add(1, Ordering::Relaxed);
            }
        }
        self.misses.fetch_add(1, Ordering::Relaxed);
        None
    }

    pub async fn set(&self, key: String, value: V) {
        self.map.write().await.insert(
            key,
            Entry {
                value,
                inserted_at: Instant::now(),
            },
        );
    }

    pub async fn delete(&self, key: &str) {
        self.map.write().await.remove(key);
    }

    pub fn stats(&self) -> LocalStoreStats {
        LocalStoreStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            evictions: self.evictions.load(Ordering::Relaxed),
        }
    }

    /// Stop the background sweeper. Idempotent; safe to call on drop paths.
    pub fn shutdown(&self) {
        self.stop.store(true, Ordering::Relaxed);
    }
}

#[derive(Debug, Clone, Copy)]
pub struct LocalStoreStats {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn get_set_round_trip() {
        let store: Arc<LocalStore<i32>> = LocalStore::new(Duration::from_secs(60));
        store.set("a".to_string(), 42).await;
        assert_eq!(store.get("a").await, Some(42));
        assert_eq!(store.get("missing").await, None);
        store.shutdown();
    }

    #[tokio::test]
    async fn expired_entries_are_not_returned() {
        let store: Arc<LocalStore<i32>> = LocalStore::new(Duration::from_millis(10));
        store.set("a".to_string(), 1).await;
        tokio::time::sleep(Duration::from_millis(30)).await;
        assert_eq!(store.get("a").await, None);
        store.shutdown();
    }
}
