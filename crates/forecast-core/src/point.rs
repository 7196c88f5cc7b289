//! Single-point inverse-distance-weighted lookup against a native grid (no
//! triangulation) — the cheap path used for point-forecast requests.

use crate::grib::GridMessage;

const EPSILON: f64 = 1e-9;
const MIN_WEIGHT_SUM: f64 = 1e-14;
const NEAREST_K: usize = 4;

fn wrap_lon_0_360(lon: f64) -> f64 {
    let mut l = lon % 360.0;
    if l < 0.0 {
        l += 360.0;
    }
    l
}

/// Evaluate `grid` at `(target_lat, target_lon)` via inverse-distance
/// weighting over its [`NEAREST_K`] nearest native cells.
///
/// Grid longitudes are matched in `[0, 360)` space, matching how the
/// reference implementation wraps target coordinates before distance
/// comparisons, since most global GRIB grids store longitude that way.
pub fn interpolate_value(grid: &GridMessage, target_lat: f64, target_lon: f64) -> f64 {
    let target_lon = wrap_lon_0_360(target_lon);

    let mut nearest: Vec<(f64, usize)> = Vec::with_capacity(grid.lats.len());
    for (i, (&lat, &lon)) in grid.lats.iter().zip(grid.lons.iter()).enumerate() {
        let grid_lon = wrap_lon_0_360(lon);
        let dlat = target_lat - lat;
        let dlon = target_lon - grid_lon;
        nearest.push((dlat * dlat + dlon * dlon, i));
    }

    nearest.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));
    let k = nearest.len().min(NEAREST_K);

    let mut weighted_sum = 0.0f64;
    let mut weight_sum = 0.0f64;
    for &(dist_sq, idx) in &nearest[..k] {
        let weight = 1.0 / (dist_sq.sqrt() + EPSILON);
        weighted_sum += weight * grid.values[idx] as f64;
        weight_sum += weight;
    }

    if weight_sum < MIN_WEIGHT_SUM {
        return nearest
            .first()
            .map(|&(_, idx)| grid.values[idx] as f64)
            .unwrap_or(f64::NAN);
    }

    weighted_sum / weight_sum
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn grid() -> GridMessage {
        GridMessage {
            values: vec![1.0, 2.0, 3.0, 4.0],
            lats: vec![0.0, 0.0, 1.0, 1.0],
            lons: vec![0.0, 1.0, 0.0, 1.0],
            height: 2,
            width: 2,
            j_scans_positively: true,
            minimum: 1.0,
            maximum: 4.0,
            missing_value: 9999.0,
            reference_time: Utc::now(),
            valid_time: Utc::now(),
        }
    }

    #[test]
    fn averages_four_corners_at_center() {
        let g = grid();
        let value = interpolate_value(&g, 0.5, 0.5);
        assert!((value - 2.5).abs() < 1e-9);
    }

    #[test]
    fn exact_grid_point_matches_that_cell() {
        let g = grid();
        let value = interpolate_value(&g, 0.0, 0.0);
        assert!((value - 1.0).abs() < 1e-6);
    }
}
