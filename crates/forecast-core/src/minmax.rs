//! Monotone-merge protocol for the `(gmin, gmax)` color-range bounds shared
//! across every interpolator built for a given `(model, slug, level,
//! levelType, stepType)` key.
//!
//! The merge is commutative and idempotent: widening with the same
//! `(observed_min, observed_max)` twice, or in either order relative to a
//! concurrent widening, always converges to the same `(gmin, gmax)`. This
//! lets callers race on the shared-cache key with no lock — grounded on the
//! reference implementation's treatment of its global min/max dict, which
//! is updated by `min()`/`max()` with no synchronization either.

use serde::{Deserialize, Serialize};

use crate::cache::TwoTierCache;
use crate::error::ForecastResult;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub gmin: f64,
    pub gmax: f64,
}

impl Bounds {
    pub fn new(gmin: f64, gmax: f64) -> Self {
        Self { gmin, gmax }
    }

    /// Widen `self` with an observed `(min, max)`, never narrowing.
    pub fn widen(&self, observed_min: f64, observed_max: f64) -> Self {
        Self {
            gmin: self.gmin.min(observed_min),
            gmax: self.gmax.max(observed_max),
        }
    }
}

fn minmax_key(model: &str, slug: &str, level: f64, level_type: &str, step_type: &str) -> String {
    format!("minmax:{model}:{slug}:{level_type}:{level}:{step_type}")
}

/// Read the current `(gmin, gmax)` for this key, widen it by `(observed_min,
/// observed_max)`, and write the widened value back. Returns the widened
/// bounds that the caller should stamp into the interpolator it just built.
///
/// Safe to call concurrently for the same key: every caller's write is a
/// widening of whatever it last read, so the stored value only ever grows
/// to cover the union of all observed ranges, regardless of interleaving.
pub async fn widen_and_store(
    cache: &std::sync::Arc<TwoTierCache>,
    model: &str,
    slug: &str,
    level: f64,
    level_type: &str,
    step_type: &str,
    observed_min: f64,
    observed_max: f64,
) -> ForecastResult<Bounds> {
    let key = minmax_key(model, slug, level, level_type, step_type);
    let current = cache
        .get_typed::<Bounds>(&key)
        .await?
        .unwrap_or(Bounds::new(observed_min, observed_max));
    let widened = current.widen(observed_min, observed_max);
    cache.set_typed(&key, &widened).await?;
    Ok(widened)
}
