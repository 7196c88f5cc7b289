//! Application state: one shared [`Orchestrator`] built from CLI/env config.

use std::sync::Arc;

use anyhow::Result;

use forecast_core::cache::{KVCache, RedisKVCache, TwoTierCache};
use forecast_core::config::Args;
use forecast_core::grib::{Grib2FileSource, GribSource};
use forecast_core::resolver::FileResolver;
use forecast_core::Orchestrator;

/// Fan-out factor for the triangulation point decimation applied to large
/// global grids before they're handed to the Delaunay builder.
const DECIMATION: usize = 4;

pub struct AppState {
    pub orchestrator: Arc<Orchestrator>,
}

impl AppState {
    pub async fn new(args: &Args) -> Result<Self> {
        let shared: Arc<dyn KVCache> = Arc::new(RedisKVCache::connect(&args.redis_url).await?);
        let blob_cache = TwoTierCache::with_debounce(shared, args.l1_ttl(), args.l2_ttl(), args.l2_debounce());

        let resolver = FileResolver::new(args.grib_base_dir.clone(), args.model_registry());
        let grib_source: Arc<dyn GribSource> = Arc::new(Grib2FileSource);

        let orchestrator = Arc::new(Orchestrator::new(resolver, grib_source, blob_cache, args.l1_ttl(), DECIMATION));

        Ok(Self { orchestrator })
    }
}
