//! Per-key "compute at most once while in flight" guard (C4).

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use tokio::sync::Mutex as AsyncMutex;

/// Coordinates concurrent callers of [`SingleFlight::run`] so at most one
/// of them actually executes `compute` for a given key; the rest wait on
/// that in-flight call's result.
///
/// Grounded on the reference implementation's `key_locks: Dict[str, Lock]`
/// pattern, translated to a `tokio::sync::Mutex` per key.
#[derive(Default)]
pub struct SingleFlight {
    locks: AsyncMutex<HashMap<String, Arc<AsyncMutex<()>>>>,
}

impl SingleFlight {
    pub fn new() -> Self {
        Self::default()
    }

    async fn key_lock(&self, key: &str) -> Arc<AsyncMutex<()>> {
        let mut locks = self.locks.lock().await;
        locks
            .entry(key.to_string())
            .or_insert_with(|| Arc::new(AsyncMutex::new(())))
            .clone()
    }

    /// Run `check` (a cheap cache lookup); if it returns `Some`, return that
    /// without taking the per-key lock. Otherwise acquire the per-key lock,
    /// re-run `check` (another caller may have populated the cache while we
    /// waited), and if still empty, run `compute`.
    pub async fn run<T, E, CheckFut, ComputeFut>(
        &self,
        key: &str,
        check: impl Fn() -> CheckFut,
        compute: impl FnOnce() -> ComputeFut,
    ) -> Result<T, E>
    where
        CheckFut: Future<Output = Result<Option<T>, E>>,
        ComputeFut: Future<Output = Result<T, E>>,
    {
        if let Some(v) = check().await? {
            return Ok(v);
        }

        let lock = self.key_lock(key).await;
        let _guard = lock.lock().await;

        if let Some(v) = check().await? {
            return Ok(v);
        }

        compute().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[tokio::test]
    async fn dedups_concurrent_compute_for_same_key() {
        let sf = Arc::new(SingleFlight::new());
        let compute_count = Arc::new(AtomicU32::new(0));
        let cached: Arc<AsyncMutex<Option<u32>>> = Arc::new(AsyncMutex::new(None));

        let mut handles = Vec::new();
        for _ in 0..10 {
            let sf = sf.clone();
            let compute_count = compute_count.clone();
            let cached = cached.clone();
            handles.push(tokio::spawn(async move {
                sf.run::<u32, String, _, _>(
                    "k",
                    || {
                        let cached = cached.clone();
                        async move { Ok(*cached.lock().await) }
                    },
                    || async move {
                        tokio::time::sleep(std::time::Duration::from_millis(20)).await;
                        compute_count.fetch_add(1, Ordering::SeqCst);
                        *cached.lock().await = Some(7);
                        Ok(7)
                    },
                )
                .await
            }));
        }

        for h in handles {
            assert_eq!(h.await.unwrap().unwrap(), 7);
        }
        assert_eq!(compute_count.load(Ordering::SeqCst), 1);
    }
}
