//! L1 (local, read/write-through) + L2 (shared, debounced write-behind)
//! cache (C3).

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use serde::{de::DeserializeOwned, Serialize};
use tokio::sync::Mutex;

use super::kv::KVCache;
use super::local::LocalStore;
use crate::error::ForecastResult;

/// Debounce window for L2 (shared-cache) write-behind: bursts of writes to
/// the same key within this window coalesce into a single shared-cache
/// write holding the last value set.
const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

struct PendingWrite {
    value: Vec<u8>,
    generation: u64,
}

pub struct TwoTierCache {
    local: Arc<LocalStore<Vec<u8>>>,
    shared: Arc<dyn KVCache>,
    l2_ttl: Duration,
    debounce: Duration,
    pending: Mutex<HashMap<String, PendingWrite>>,
}

impl TwoTierCache {
    pub fn new(shared: Arc<dyn KVCache>, l1_ttl: Duration, l2_ttl: Duration) -> Arc<Self> {
        Self::with_debounce(shared, l1_ttl, l2_ttl, DEFAULT_DEBOUNCE)
    }

    pub fn with_debounce(
        shared: Arc<dyn KVCache>,
        l1_ttl: Duration,
        l2_ttl: Duration,
        debounce: Duration,
    ) -> Arc<Self> {
        Arc::new(Self {
            local: LocalStore::new(l1_ttl),
            shared,
            l2_ttl,
            debounce,
            pending: Mutex::new(HashMap::new()),
        })
    }

    /// Raw-bytes read: L1, then L2 (populating L1 on hit). L2 failures are
    /// swallowed as a miss — callers recompute rather than fail.
    pub async fn get(&self, key: &str) -> ForecastResult<Option<Vec<u8>>> {
        if let Some(v) = self.local.get(key).await {
            return Ok(Some(v));
        }
        match self.shared.get(key).await {
            Ok(Some(v)) => {
                self.local.set(key.to_string(), v.clone()).await;
                Ok(Some(v))
            }
            Ok(None) => Ok(None),
            Err(e) if e.is_degradable() => {
                tracing::warn!(error = %e, key = %key, "L2 cache unavailable, treating as miss");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    /// Raw-bytes write: L1 synchronously, L2 debounced.
    pub async fn set(self: &Arc<Self>, key: &str, value: Vec<u8>) {
        self.local.set(key.to_string(), value.clone()).await;

        let my_generation = {
            let mut pending = self.pending.lock().await;
            let entry = pending.entry(key.to_string()).or_insert(PendingWrite {
                value: value.clone(),
                generation: 0,
            });
            entry.generation += 1;
            entry.value = value;
            entry.generation
        };

        let this = self.clone();
        let key_owned = key.to_string();
        let debounce = self.debounce;
        tokio::spawn(async move {
            tokio::time::sleep(debounce).await;
            let write = {
                let mut pending = this.pending.lock().await;
                match pending.get(&key_owned) {
                    Some(p) if p.generation == my_generation => {
                        let value = p.value.clone();
                        pending.remove(&key_owned);
                        Some(value)
                    }
                    _ => None,
                }
            };
            if let Some(value) = write {
                if let Err(e) = this.shared.set(&key_owned, &value, this.l2_ttl).await {
                    tracing::warn!(error = %e, key = %key_owned, "debounced L2 write failed");
                }
            }
        });
    }

    pub async fn delete(&self, key: &str) -> ForecastResult<()> {
        self.local.delete(key).await;
        self.pending.lock().await.remove(key);
        match self.shared.delete(key).await {
            Ok(()) => Ok(()),
            Err(e) if e.is_degradable() => {
                tracing::warn!(error = %e, key = %key, "L2 delete failed, ignoring");
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    pub async fn get_typed<T: DeserializeOwned>(&self, key: &str) -> ForecastResult<Option<T>> {
        match self.get(key).await? {
            Some(bytes) => Ok(Some(bincode::deserialize(&bytes)?)),
            None => Ok(None),
        }
    }

    pub async fn set_typed<T: Serialize>(self: &Arc<Self>, key: &str, value: &T) -> ForecastResult<()> {
        let bytes = bincode::serialize(value)?;
        self.set(key, bytes).await;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::kv::InMemoryKVCache;

    #[tokio::test]
    async fn read_through_populates_l1_from_l2() {
        let shared: Arc<dyn KVCache> = Arc::new(InMemoryKVCache::new());
        shared.set("k", b"v", Duration::from_secs(60)).await.unwrap();
        let cache = TwoTierCache::new(shared, Duration::from_secs(60), Duration::from_secs(60));
        assert_eq!(cache.get("k").await.unwrap(), Some(b"v".to_vec()));
    }

    #[tokio::test]
    async fn debounce_coalesces_bursts_to_latest_value() {
        let shared = Arc::new(InMemoryKVCache::new());
        let shared_dyn: Arc<dyn KVCache> = shared.clone();
        let cache = TwoTierCache::with_debounce(
            shared_dyn,
            Duration::from_secs(60),
            Duration::from_secs(60),
            Duration::from_millis(50),
        );

        for i in 0..50u32 {
            cache.set("k", i.to_le_bytes().to_vec()).await;
            tokio::time::sleep(Duration::from_millis(1)).await;
        }

        // L1 reflects the latest write immediately.
        assert_eq!(cache.get("k").await.unwrap(), Some(49u32.to_le_bytes().to_vec()));

        tokio::time::sleep(Duration::from_millis(150)).await;
        let l2_value = shared.get("k").await.unwrap();
        assert_eq!(l2_value, Some(49u32.to_le_bytes().to_vec()));
    }
}
