//! Shared key-value cache boundary (C1): opaque blob get/set/delete with
//! TTL, backed by Redis.

use std::time::Duration;

use async_trait::async_trait;
use redis::{aio::MultiplexedConnection, AsyncCommands, Client};
use tokio::sync::Mutex;

use crate::error::{ForecastError, ForecastResult};

/// Capability the rest of the core programs against. Implementations must
/// never interpret blob contents — serialization is the caller's concern.
#[async_trait]
pub trait KVCache: Send + Sync {
    async fn get(&self, key: &str) -> ForecastResult<Option<Vec<u8>>>;
    async fn set(&self, key: &str, value: &[u8], ttl: Duration) -> ForecastResult<()>;
    async fn delete(&self, key: &str) -> ForecastResult<()>;
}

/// Redis-backed [`KVCache`], mirroring `storage::cache::TileCache`'s
/// connection and error-wrapping pattern but generalized to arbitrary keys
/// rather than one fixed WMS cache-key shape.
pub struct RedisKVCache {
    conn: Mutex<MultiplexedConnection>,
}

impl RedisKVCache {
    pub async fn connect(redis_url: &str) -> ForecastResult<Self> {
        let client = Client::open(redis_url)
            .map_err(|e| ForecastError::CacheUnavailable(format!("redis connect: {e}")))?;
        let conn = client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| ForecastError::CacheUnavailable(format!("redis connect: {e}")))?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }
}

#[async_trait]
impl KVCache for RedisKVCache {
    async fn get(&self, key: &str) -> ForecastResult<Option<Vec<u8>>> {
        let mut conn = self.conn.lock().await;
        conn.get(key)
            .await
            .map_err(|e| ForecastError::CacheUnavailable(format!("redis get: {e}")))
    }

    async fn set(&self, key: &str, value: &[u8], ttl: Duration) -> ForecastResult<()> {
        let mut conn = self.conn.lock().await;
        conn.set_ex::<_, _, ()>(key, value, ttl.as_secs())
            .await
            .map_err(|e| ForecastError::CacheUnavailable(format!("redis set: {e}")))
    }

    async fn delete(&self, key: &str) -> ForecastResult<()> {
        let mut conn = self.conn.lock().await;
        conn.del::<_, ()>(key)
            .await
            .map_err(|e| ForecastError::CacheUnavailable(format!("redis del: {e}")))
    }
}

/// In-memory stand-in for [`KVCache`], used by tests and local development
/// so the rest of the core is exercised without a live Redis instance.
#[derive(Default)]
pub struct InMemoryKVCache {
    map: Mutex<std::collections::HashMap<String, Vec<u8>>>,
}

impl InMemoryKVCache {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KVCache for InMemoryKVCache {
    async fn get(&self, key: &str) -> ForecastResult<Option<Vec<u8>>> {
        Ok(self.map.lock().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &[u8], _ttl: Duration) -> ForecastResult<()> {
        self.map.lock().await.insert(key.to_string(), value.to_vec());
        Ok(())
    }

    async fn delete(&self, key: &str) -> ForecastResult<()> {
        self.map.lock().await.remove(key);
        Ok(())
    }
}
