//! Wires the GRIB/selection/interpolation/cache layers into the three
//! operations the HTTP transport exposes: tile rendering, single-point
//! lookups, and multi-day timeseries.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::cache::{LocalStore, SingleFlight, TwoTierCache};
use crate::colorize;
use crate::error::{ForecastError, ForecastResult};
use crate::grib::selector::{self, SelectionRequest};
use crate::grib::GridMessage;
use crate::grib::{GribSource, LevelType, StepType};
use crate::interp::{builder, fasteval, Interpolator, InterpolatorSnapshot};
use crate::minmax;
use crate::model::time_key;
use crate::resolver::FileResolver;
use crate::tile;
use crate::valid_time;

fn opt_level_type_key(lt: Option<LevelType>) -> String {
    lt.map(|v| v.as_key_str()).unwrap_or_else(|| "surface".to_string())
}

fn opt_step_type_key(st: Option<StepType>) -> String {
    st.map(|v| v.as_str().to_string()).unwrap_or_else(|| "instant".to_string())
}

fn composite_key(slug: &str, req: &SelectionRequest) -> String {
    format!(
        "{slug}:{}:{}:{}",
        req.level.unwrap_or(0),
        opt_level_type_key(req.level_type),
        opt_step_type_key(req.step_type),
    )
}

fn interp_key(model: &str, slug: &str, ymd_hh: &str, req: &SelectionRequest) -> String {
    format!(
        "interp:{model}:{slug}:{ymd_hh}:{}:{}:{}",
        req.level.unwrap_or(0),
        opt_level_type_key(req.level_type),
        opt_step_type_key(req.step_type),
    )
}

fn tile_key(model: &str, slug: &str, ymd_hh: &str, z: i32, x: i64, y: i64, req: &SelectionRequest) -> String {
    format!(
        "tile:{model}:{slug}:{ymd_hh}:{z}:{x}:{y}:{}:{}:{}",
        req.level.unwrap_or(0),
        opt_level_type_key(req.level_type),
        opt_step_type_key(req.step_type),
    )
}

/// Per-offset cache of fully decoded grids, keyed by `(param, level,
/// levelType, stepType)`, populated incrementally as callers request new
/// parameters for an offset that's already partly cached.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct ValueDictionary {
    entries: HashMap<String, GridMessage>,
}

/// One point sample in a returned timeseries.
#[derive(Debug, Clone, Serialize)]
pub struct TimeseriesPoint {
    pub valid_time: DateTime<Utc>,
    pub value: f64,
}

/// Progress callback invoked as offsets in a timeseries request finish
/// evaluating across every requested parameter.
pub type ProgressCallback = Arc<dyn Fn(usize, usize) + Send + Sync>;

/// Integration point for the tile, point, and timeseries operations (C12).
pub struct Orchestrator {
    resolver: FileResolver,
    grib_source: Arc<dyn GribSource>,
    blob_cache: Arc<TwoTierCache>,
    interp_l1: Arc<LocalStore<Arc<Interpolator>>>,
    interp_singleflight: SingleFlight,
    value_singleflight: SingleFlight,
    decimation: usize,
}

impl Orchestrator {
    pub fn new(
        resolver: FileResolver,
        grib_source: Arc<dyn GribSource>,
        blob_cache: Arc<TwoTierCache>,
        interp_l1_ttl: Duration,
        decimation: usize,
    ) -> Self {
        Self {
            resolver,
            grib_source,
            blob_cache,
            interp_l1: LocalStore::new(interp_l1_ttl),
            interp_singleflight: SingleFlight::new(),
            value_singleflight: SingleFlight::new(),
            decimation: decimation.max(1),
        }
    }

    pub fn resolver(&self) -> &FileResolver {
        &self.resolver
    }

    /// All distinct parameter slugs present in the file resolved for
    /// `(model, offset)`.
    pub fn list_parameters(&self, model: &str, offset: i32, now: DateTime<Utc>) -> ForecastResult<Vec<String>> {
        let (path, _fhr) = self.resolver.resolve(model, offset, now)?;
        let handle = self.grib_source.open(&path)?;
        let mut seen = std::collections::HashSet::new();
        let mut out = Vec::new();
        for m in handle.messages() {
            if seen.insert(m.parameter_slug.clone()) {
                out.push(m.parameter_slug.clone());
            }
        }
        Ok(out)
    }

    /// Fetch (building if necessary) the interpolator for `(model, slug,
    /// offset, req)`, checking the process-local store, then the shared
    /// snapshot cache, then building from a freshly decoded grid — the last
    /// step guarded by [`SingleFlight`] so concurrent callers for the same
    /// key share one build.
    pub async fn get_or_build_interpolator(
        &self,
        model: &str,
        slug: &str,
        offset: i32,
        req: &SelectionRequest,
        now: DateTime<Utc>,
    ) -> ForecastResult<Arc<Interpolator>> {
        let ymd_hh = time_key(now + chrono::Duration::hours(offset as i64));
        let key = interp_key(model, slug, &ymd_hh, req);

        if let Some(interp) = self.interp_l1.get(&key).await {
            return Ok(interp);
        }

        self.interp_singleflight
            .run(
                &key,
                || async {
                    if let Some(interp) = self.interp_l1.get(&key).await {
                        return Ok(Some(interp));
                    }
                    match self.blob_cache.get_typed::<InterpolatorSnapshot>(&key).await? {
                        Some(snapshot) => {
                            let interp = Arc::new(Interpolator::from_snapshot(snapshot)?);
                            self.interp_l1.set(key.clone(), interp.clone()).await;
                            Ok(Some(interp))
                        }
                        None => Ok(None),
                    }
                },
                || async {
                    let (path, _fhr) = self.resolver.resolve(model, offset, now)?;
                    let handle = self.grib_source.open(&path)?;
                    let idx = selector::select(handle.messages(), slug, req).ok_or_else(|| {
                        ForecastError::NoMatchingMessage {
                            parameter: slug.to_string(),
                            level: req.level,
                            level_type: req.level_type.map(|lt| lt.as_key_str()),
                            step_type: req.step_type.map(|st| st.as_str().to_string()),
                        }
                    })?;
                    let grid = handle.decode(idx)?;

                    let lat_flip = !grid.j_scans_positively;
                    let built = builder::build(
                        &grid.values,
                        &grid.lats,
                        &grid.lons,
                        lat_flip,
                        self.decimation,
                        grid.missing_value as f64,
                    )?;

                    let level_type_key = opt_level_type_key(req.level_type);
                    let step_type_key = opt_step_type_key(req.step_type);
                    let widened = minmax::widen_and_store(
                        &self.blob_cache,
                        model,
                        slug,
                        req.level.unwrap_or(0) as f64,
                        &level_type_key,
                        &step_type_key,
                        built.gmin,
                        built.gmax,
                    )
                    .await?;

                    let interp = Arc::new(Interpolator {
                        gmin: widened.gmin,
                        gmax: widened.gmax,
                        ..built
                    });

                    self.interp_l1.set(key.clone(), interp.clone()).await;
                    self.blob_cache.set_typed(&key, &interp.to_snapshot()).await?;

                    Ok(interp)
                },
            )
            .await
    }

    /// Render the `(z, x, y)` tile for `(model, slug, offset, req)` as a PNG.
    pub async fn render_tile(
        &self,
        model: &str,
        slug: &str,
        offset: i32,
        z: i32,
        x: i64,
        y: i64,
        req: &SelectionRequest,
        now: DateTime<Utc>,
    ) -> ForecastResult<Vec<u8>> {
        tile::check_coords(z, x, y)?;

        let ymd_hh = time_key(now + chrono::Duration::hours(offset as i64));
        let key = tile_key(model, slug, &ymd_hh, z, x, y, req);

        if let Some(cached) = self.blob_cache.get(&key).await? {
            metrics::counter!("forecast_tile_cache_hit_total", "model" => model.to_string()).increment(1);
            return Ok(cached);
        }
        metrics::counter!("forecast_tile_cache_miss_total", "model" => model.to_string()).increment(1);

        let interp = self.get_or_build_interpolator(model, slug, offset, req, now).await?;

        let mesh = tile::tile_mesh(z, x, y);
        let interp_for_eval = interp.clone();
        let values = tokio::task::spawn_blocking(move || fasteval::evaluate(&interp_for_eval, &mesh))
            .await
            .map_err(|_| ForecastError::Cancelled)?;

        let missing_val = interp.missing_val;
        let masked: Vec<f64> = values
            .into_iter()
            .map(|v| if (v - missing_val).abs() <= 1.0 { f64::NAN } else { v })
            .collect();

        let png = if masked.iter().all(|v| v.is_nan()) {
            blank_tile_png()?
        } else {
            let cropped = tile::crop_to_output(&masked);
            let rgba = colorize::colorize_grid(
                &cropped,
                tile::OUTPUT_SIZE,
                tile::OUTPUT_SIZE,
                interp.gmin as f32,
                interp.gmax as f32,
                slug,
            );
            renderer::png::create_png_auto(&rgba, tile::OUTPUT_SIZE, tile::OUTPUT_SIZE)
                .map_err(ForecastError::SerializationError)?
        };

        self.blob_cache.set(&key, png.clone()).await;
        metrics::counter!("forecast_tile_render_total", "model" => model.to_string()).increment(1);
        Ok(png)
    }

    /// Ensure the per-offset value dictionary holds a decoded, scan-direction
    /// normalized grid for every `(slug, req)` in `requests`, opening the
    /// GRIB file and decoding only the missing ones. Guarded by a
    /// [`SingleFlight`] on the dictionary key so concurrent batch requests
    /// for the same offset don't duplicate the file open.
    async fn ensure_value_dict_entries(
        &self,
        model: &str,
        ymd_hh: &str,
        offset: i32,
        requests: &[(String, SelectionRequest)],
        now: DateTime<Utc>,
    ) -> ForecastResult<ValueDictionary> {
        let dict_key = format!("grib_dictionary_array:{model}:{ymd_hh}");

        self.value_singleflight
            .run(
                &dict_key,
                || async {
                    match self.blob_cache.get_typed::<ValueDictionary>(&dict_key).await? {
                        Some(dict)
                            if requests
                                .iter()
                                .all(|(slug, req)| dict.entries.contains_key(&composite_key(slug, req))) =>
                        {
                            Ok(Some(dict))
                        }
                        _ => Ok(None),
                    }
                },
                || async {
                    let mut dict = self
                        .blob_cache
                        .get_typed::<ValueDictionary>(&dict_key)
                        .await?
                        .unwrap_or_default();

                    let missing: Vec<&(String, SelectionRequest)> = requests
                        .iter()
                        .filter(|(slug, req)| !dict.entries.contains_key(&composite_key(slug, req)))
                        .collect();

                    if !missing.is_empty() {
                        let (path, _fhr) = self.resolver.resolve(model, offset, now)?;
                        let handle = self.grib_source.open(&path)?;
                        for (slug, req) in missing {
                            if let Some(idx) = selector::select(handle.messages(), slug, req) {
                                let grid = handle.decode(idx)?.with_scan_direction_normalized();
                                dict.entries.insert(composite_key(slug, req), grid);
                            }
                        }
                        self.blob_cache.set_typed(&dict_key, &dict).await?;
                    }

                    Ok(dict)
                },
            )
            .await
    }

    /// Evaluate a batch of `(slug, req)` parameters at `(lat, lon, offset)`.
    /// A parameter with no matching GRIB message yields `None` rather than
    /// failing the whole batch.
    pub async fn point_values(
        &self,
        model: &str,
        params: &[(String, SelectionRequest)],
        lat: f64,
        lon: f64,
        offset: i32,
        now: DateTime<Utc>,
    ) -> ForecastResult<Vec<Option<f64>>> {
        let target = now + chrono::Duration::hours(offset as i64);
        let ymd_hh = time_key(target);
        let dict = Arc::new(self.ensure_value_dict_entries(model, &ymd_hh, offset, params, now).await?);

        let params_owned = params.to_vec();
        let dict_for_blocking = dict.clone();
        let results = tokio::task::spawn_blocking(move || {
            use rayon::prelude::*;
            params_owned
                .par_iter()
                .map(|(slug, req)| {
                    let key = composite_key(slug, req);
                    dict_for_blocking
                        .entries
                        .get(&key)
                        .map(|grid| crate::point::interpolate_value(grid, lat, lon))
                })
                .collect::<Vec<_>>()
        })
        .await
        .map_err(|_| ForecastError::Cancelled)?;

        metrics::counter!("forecast_point_eval_total", "model" => model.to_string()).increment(results.len() as u64);
        Ok(results)
    }

    async fn single_point_value(
        &self,
        model: &str,
        slug: &str,
        req: &SelectionRequest,
        lat: f64,
        lon: f64,
        offset: i32,
        now: DateTime<Utc>,
    ) -> ForecastResult<Option<(f64, DateTime<Utc>)>> {
        let target = now + chrono::Duration::hours(offset as i64);
        let ymd_hh = time_key(target);
        let requests = [(slug.to_string(), req.clone())];
        let dict = self.ensure_value_dict_entries(model, &ymd_hh, offset, &requests, now).await?;
        let key = composite_key(slug, req);
        match dict.entries.get(&key) {
            Some(grid) => {
                let value = crate::point::interpolate_value(grid, lat, lon);
                let valid = valid_time::resolve(grid, now, offset);
                Ok(Some((value, valid)))
            }
            None => Ok(None),
        }
    }

    /// Evaluate `params` at `(lat, lon)` across every offset from
    /// `start_offset` to `start_offset + total_days * 24` in steps of
    /// `step_hours`, grouped by parameter and sorted by valid datetime.
    ///
    /// `progress`, if given, is invoked once per offset, after every
    /// parameter requested for that offset has finished (not necessarily in
    /// offset order, since offsets evaluate concurrently).
    pub async fn timeseries(
        self: &Arc<Self>,
        model: &str,
        params: &[(String, SelectionRequest)],
        lat: f64,
        lon: f64,
        start_offset: i32,
        total_days: i32,
        step_hours: i32,
        now: DateTime<Utc>,
        progress: Option<ProgressCallback>,
    ) -> ForecastResult<HashMap<String, Vec<TimeseriesPoint>>> {
        let end_offset = start_offset + total_days * 24;
        let mut offsets = Vec::new();
        let mut o = start_offset;
        while o <= end_offset {
            offsets.push(o);
            o += step_hours.max(1);
        }
        let total_offsets = offsets.len();

        let remaining_per_offset: Arc<Mutex<HashMap<i32, usize>>> =
            Arc::new(Mutex::new(offsets.iter().map(|&o| (o, params.len())).collect()));
        let completed_offsets = Arc::new(AtomicUsize::new(0));
        let collected: Arc<Mutex<HashMap<String, Vec<TimeseriesPoint>>>> = Arc::new(Mutex::new(HashMap::new()));

        let model = model.to_string();
        let mut handles = Vec::new();
        for &offset in &offsets {
            for (slug, req) in params {
                let this = self.clone();
                let slug = slug.clone();
                let req = req.clone();
                let model = model.clone();
                let remaining_per_offset = remaining_per_offset.clone();
                let completed_offsets = completed_offsets.clone();
                let collected = collected.clone();
                let progress = progress.clone();

                handles.push(tokio::spawn(async move {
                    let result = this.single_point_value(&model, &slug, &req, lat, lon, offset, now).await;

                    match result {
                        Ok(Some((value, valid_time))) => {
                            let mut guard = collected.lock().await;
                            guard
                                .entry(slug.clone())
                                .or_default()
                                .push(TimeseriesPoint { valid_time, value });
                        }
                        Ok(None) => {}
                        Err(e) => {
                            tracing::warn!(error = %e, slug = %slug, offset, "timeseries point lookup failed");
                        }
                    }

                    let mut remaining = remaining_per_offset.lock().await;
                    if let Some(count) = remaining.get_mut(&offset) {
                        *count -= 1;
                        if *count == 0 {
                            let completed = completed_offsets.fetch_add(1, Ordering::SeqCst) + 1;
                            if let Some(cb) = &progress {
                                cb(completed, total_offsets);
                            }
                        }
                    }
                }));
            }
        }

        for h in handles {
            let _ = h.await;
        }

        let mut series = {
            let mut guard = collected.lock().await;
            std::mem::take(&mut *guard)
        };

        for points in series.values_mut() {
            points.sort_by_key(|p| p.valid_time);
        }

        Ok(series)
    }
}

fn blank_tile_png() -> ForecastResult<Vec<u8>> {
    let rgba = vec![0u8; tile::OUTPUT_SIZE * tile::OUTPUT_SIZE * 4];
    renderer::png::create_png_auto(&rgba, tile::OUTPUT_SIZE, tile::OUTPUT_SIZE).map_err(ForecastError::SerializationError)
}
