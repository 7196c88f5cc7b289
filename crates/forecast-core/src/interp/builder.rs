//! Builds an [`Interpolator`] from a decoded grid: lat sign-flip, clipping,
//! decimation, antimeridian duplication, Web Mercator projection, and
//! triangulation.

use spade::DelaunayTriangulation;

use super::{InterpVertex, Interpolator};
use crate::error::{ForecastError, ForecastResult};

/// Web Mercator half-circumference in meters at the equator (EPSG:3857).
pub const WEB_MERCATOR_CONSTANT: f64 = 20037508.342789244;

const MAX_LAT: f64 = 85.05112878;

/// Source points whose longitude is within this many degrees of the
/// antimeridian get a mirrored duplicate at `lon ± 360` so triangles don't
/// stretch across the dateline.
const ANTIMERIDIAN_THRESHOLD: f64 = 179.0;

/// Project geographic coordinates to Web Mercator meters.
pub fn lonlat_to_web_mercator(lon: f64, lat: f64) -> (f64, f64) {
    let x = lon.to_radians() * WEB_MERCATOR_CONSTANT / std::f64::consts::PI;
    let lat_rad = lat.clamp(-MAX_LAT, MAX_LAT).to_radians();
    let y = ((std::f64::consts::FRAC_PI_4 + lat_rad / 2.0).tan()).ln() * WEB_MERCATOR_CONSTANT
        / std::f64::consts::PI;
    (x, y)
}

fn wrap_lon(lon: f64) -> f64 {
    let mut l = lon;
    while l > 180.0 {
        l -= 360.0;
    }
    while l <= -180.0 {
        l += 360.0;
    }
    l
}

/// Build an interpolator from a flattened grid.
///
/// `lat_flip` negates the latitude array before projection (a sign flip,
/// not an axis reversal) — this mirrors the vertical scan direction used by
/// the interpolator path specifically; the point-evaluator's native-grid
/// value cache uses a true axis reversal instead, since that is what the
/// implementation this was grounded on does for that code path. The two are
/// not interchangeable and should not be unified.
pub fn build(
    values: &[f32],
    lats: &[f64],
    lons: &[f64],
    lat_flip: bool,
    decimation: usize,
    missing_value: f64,
) -> ForecastResult<Interpolator> {
    let decimation = decimation.max(1);
    let n = values.len();
    if lats.len() != n || lons.len() != n {
        return Err(ForecastError::InsufficientData(
            "values/lats/lons length mismatch".to_string(),
        ));
    }

    let mut points: Vec<InterpVertex> = Vec::with_capacity(n / decimation + 1);
    let mut observed_min = f64::INFINITY;
    let mut observed_max = f64::NEG_INFINITY;

    let mut i = 0;
    while i < n {
        let lat = if lat_flip { -lats[i] } else { lats[i] };
        let lat = lat.clamp(-MAX_LAT, MAX_LAT);
        let lon = wrap_lon(lons[i]);
        let value = values[i] as f64;

        if value.is_finite() {
            let (x, y) = lonlat_to_web_mercator(lon, lat);
            if x.is_finite() && y.is_finite() {
                points.push(InterpVertex { x, y, value });
                observed_min = observed_min.min(value);
                observed_max = observed_max.max(value);

                if lon.abs() >= ANTIMERIDIAN_THRESHOLD {
                    let mirrored_lon = if lon > 0.0 { lon - 360.0 } else { lon + 360.0 };
                    let (mx, my) = lonlat_to_web_mercator(mirrored_lon, lat);
                    if mx.is_finite() && my.is_finite() {
                        points.push(InterpVertex {
                            x: mx,
                            y: my,
                            value,
                        });
                    }
                }
            }
        }

        i += decimation;
    }

    if points.len() < 3 {
        return Err(ForecastError::InsufficientData(format!(
            "only {} valid points after filtering, need at least 3",
            points.len()
        )));
    }

    let triangulation = DelaunayTriangulation::<InterpVertex>::bulk_load(points).map_err(|e| {
        ForecastError::InsufficientData(format!("triangulation failed: {e:?}"))
    })?;

    Ok(Interpolator {
        triangulation,
        gmin: observed_min,
        gmax: observed_max,
        missing_val: missing_value,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_too_few_points() {
        let values = [1.0f32, 2.0];
        let lats = [0.0, 1.0];
        let lons = [0.0, 1.0];
        let result = build(&values, &lats, &lons, false, 1, 9999.0);
        assert!(matches!(result, Err(ForecastError::InsufficientData(_))));
    }

    #[test]
    fn builds_uniform_field() {
        let mut values = Vec::new();
        let mut lats = Vec::new();
        let mut lons = Vec::new();
        for lat in [-40.0, 0.0, 40.0] {
            for lon in [-100.0, 0.0, 100.0] {
                values.push(300.0f32);
                lats.push(lat);
                lons.push(lon);
            }
        }
        let interp = build(&values, &lats, &lons, false, 1, 9999.0).unwrap();
        assert_eq!(interp.gmin, 300.0);
        assert_eq!(interp.gmax, 300.0);
        assert!(interp.vertex_count() >= 9);
    }

    #[test]
    fn mercator_projection_is_symmetric_at_equator() {
        let (x0, y0) = lonlat_to_web_mercator(0.0, 0.0);
        assert!((x0).abs() < 1e-6);
        assert!((y0).abs() < 1e-6);
        let (x1, _) = lonlat_to_web_mercator(180.0, 0.0);
        assert!((x1 - WEB_MERCATOR_CONSTANT).abs() < 1e-3);
    }
}
