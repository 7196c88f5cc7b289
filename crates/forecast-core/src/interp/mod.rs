//! Scattered-point linear interpolation over a Delaunay triangulation in
//! Web-Mercator space.

pub mod builder;
pub mod fasteval;

use serde::{Deserialize, Serialize};
use spade::{DelaunayTriangulation, HasPosition, Point2};

use crate::error::{ForecastError, ForecastResult};

/// One triangulation vertex: a projected `(x, y)` position plus the source
/// grid value it carries.
#[derive(Debug, Clone, Copy)]
pub struct InterpVertex {
    pub x: f64,
    pub y: f64,
    pub value: f64,
}

impl HasPosition for InterpVertex {
    type Scalar = f64;

    fn position(&self) -> Point2<f64> {
        Point2::new(self.x, self.y)
    }
}

/// A built interpolator: a triangulation over projected source points, plus
/// the observed value range used for tile colorization.
pub struct Interpolator {
    pub(crate) triangulation: DelaunayTriangulation<InterpVertex>,
    pub gmin: f64,
    pub gmax: f64,
    pub missing_val: f64,
}

impl Interpolator {
    pub fn vertex_count(&self) -> usize {
        self.triangulation.num_vertices()
    }

    /// Flatten to a serializable form for the L2 cache tier. `spade`'s
    /// triangulation type isn't `Serialize` here (no `serde` feature
    /// enabled), so the snapshot carries the raw projected points and lets
    /// `from_snapshot` rebuild the triangulation with `bulk_load` —
    /// equivalent, since `bulk_load` is deterministic given the same point
    /// set, and cheaper to ship than trying to serialize internal
    /// triangulation structure.
    pub fn to_snapshot(&self) -> InterpolatorSnapshot {
        let points = self
            .triangulation
            .vertices()
            .map(|v| {
                let p = v.position();
                (p.x, p.y, v.data().value)
            })
            .collect();
        InterpolatorSnapshot {
            points,
            gmin: self.gmin,
            gmax: self.gmax,
            missing_val: self.missing_val,
        }
    }

    pub fn from_snapshot(snapshot: InterpolatorSnapshot) -> ForecastResult<Self> {
        let vertices: Vec<InterpVertex> = snapshot
            .points
            .into_iter()
            .map(|(x, y, value)| InterpVertex { x, y, value })
            .collect();
        let triangulation = DelaunayTriangulation::<InterpVertex>::bulk_load(vertices)
            .map_err(|e| ForecastError::InsufficientData(format!("triangulation rebuild failed: {e:?}")))?;
        Ok(Self {
            triangulation,
            gmin: snapshot.gmin,
            gmax: snapshot.gmax,
            missing_val: snapshot.missing_val,
        })
    }
}

/// Serializable snapshot of an [`Interpolator`]'s projected points plus its
/// value-range state, used for the L2 (shared cache) tier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterpolatorSnapshot {
    pub points: Vec<(f64, f64, f64)>,
    pub gmin: f64,
    pub gmax: f64,
    pub missing_val: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interp::builder::build;

    #[test]
    fn snapshot_round_trips_to_identical_evaluation() {
        let mut values = Vec::new();
        let mut lats = Vec::new();
        let mut lons = Vec::new();
        for lat in [-30.0, -10.0, 10.0, 30.0] {
            for lon in [-60.0, -20.0, 20.0, 60.0] {
                values.push((2.0 * lon + 3.0 * lat + 1.0) as f32);
                lats.push(lat);
                lons.push(lon);
            }
        }
        let interp = build(&values, &lats, &lons, false, 1, 9999.0).unwrap();
        let snapshot = interp.to_snapshot();
        let restored = Interpolator::from_snapshot(snapshot).unwrap();

        let (x, y) = builder::lonlat_to_web_mercator(0.0, 0.0);
        let before = fasteval::evaluate(&interp, &[(x, y)]);
        let after = fasteval::evaluate(&restored, &[(x, y)]);
        assert_eq!(before, after);
        assert_eq!(interp.gmin, restored.gmin);
        assert_eq!(interp.gmax, restored.gmax);
    }
}
