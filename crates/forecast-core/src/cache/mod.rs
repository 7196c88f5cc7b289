//! Cache layer: shared KV boundary (C1), process-local TTL map (C2),
//! two-tier composition with debounced write-behind (C3), and per-key
//! single-flight compute deduplication (C4).

pub mod kv;
pub mod local;
pub mod singleflight;
pub mod two_tier;

pub use kv::{InMemoryKVCache, KVCache, RedisKVCache};
pub use local::{LocalStore, LocalStoreStats};
pub use singleflight::SingleFlight;
pub use two_tier::TwoTierCache;
