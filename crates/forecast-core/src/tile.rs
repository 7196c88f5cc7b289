//! Builds the Web-Mercator query mesh for a single slippy-map tile.

use crate::error::{ForecastError, ForecastResult};
use crate::interp::builder::WEB_MERCATOR_CONSTANT;

/// Mesh side length. One extra row/column beyond the 256x256 output avoids
/// seam artifacts at tile edges; the extra border is cropped after
/// colorizing.
pub const OVERSIZE: usize = 257;

pub const OUTPUT_SIZE: usize = 256;

/// Validate slippy-map tile coordinates.
pub fn valid_zxy(z: i32, x: i64, y: i64) -> bool {
    if z < 0 {
        return false;
    }
    let n = 1i64 << z;
    x >= 0 && x < n && y >= 0 && y < n
}

pub fn check_coords(z: i32, x: i64, y: i64) -> ForecastResult<()> {
    if valid_zxy(z, x, y) {
        Ok(())
    } else {
        Err(ForecastError::InvalidCoords { z, x, y })
    }
}

/// Row-major flattened `(x, y)` mesh in Web Mercator meters covering tile
/// `(z, x, y)`, oversized to [`OVERSIZE`] per side.
pub fn tile_mesh(z: i32, x: i64, y: i64) -> Vec<(f64, f64)> {
    let tile_count = (1i64 << z) as f64;
    let tile_width = (2.0 * WEB_MERCATOR_CONSTANT) / tile_count;

    let x0 = x as f64 * tile_width - WEB_MERCATOR_CONSTANT;
    let x1 = (x as f64 + 1.0) * tile_width - WEB_MERCATOR_CONSTANT;
    // Tile y grows downward (north to south); mercator y grows upward, so
    // the top of the tile is the larger mercator y.
    let y_top = WEB_MERCATOR_CONSTANT - y as f64 * tile_width;
    let y_bottom = WEB_MERCATOR_CONSTANT - (y as f64 + 1.0) * tile_width;

    let mut mesh = Vec::with_capacity(OVERSIZE * OVERSIZE);
    for row in 0..OVERSIZE {
        let t = row as f64 / (OVERSIZE - 1) as f64;
        let py = y_top + (y_bottom - y_top) * t;
        for col in 0..OVERSIZE {
            let s = col as f64 / (OVERSIZE - 1) as f64;
            let px = x0 + (x1 - x0) * s;
            mesh.push((px, py));
        }
    }
    mesh
}

/// Crop an `OVERSIZE x OVERSIZE` row-major grid to its top-left
/// `OUTPUT_SIZE x OUTPUT_SIZE` corner.
pub fn crop_to_output(grid: &[f64]) -> Vec<f32> {
    debug_assert_eq!(grid.len(), OVERSIZE * OVERSIZE);
    let mut out = Vec::with_capacity(OUTPUT_SIZE * OUTPUT_SIZE);
    for row in 0..OUTPUT_SIZE {
        for col in 0..OUTPUT_SIZE {
            out.push(grid[row * OVERSIZE + col] as f32);
        }
    }
    out
}
