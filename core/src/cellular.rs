use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::NoiseGenerator;
use crate::random::{Seed, SeededRandom};

// Spacing of the jittered feature-point grid
pub const CELL_SIZE: f64 = 1.0;
// Max displacement of a point from its grid node, as a fraction of CELL_SIZE
pub const JITTER: f64 = 0.4;
// Distances are divided by this and clamped, putting every mode on [0, 1]
pub const MAX_DISTANCE: f64 = 1.5 * CELL_SIZE;
pub const DEFAULT_POINTS: usize = 16;
// Upper bound on the point set; every sample scans all points
pub const MAX_POINTS: usize = 4096;

// Which ranked distance the cellular basis reports
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CellularMode {
    #[default]
    F1,
    F2,
    F2MinusF1,
}

/// Feature points laid on a `ceil(sqrt(n))`-wide grid, each nudged by up to
/// ±`JITTER · CELL_SIZE` per axis. The grid bounds how far any sample inside
/// the covered area can be from its nearest point.
#[derive(Clone, Debug, PartialEq)]
pub struct FeaturePoints {
    seed: Seed,
    grid_size: usize,
    points: Vec<[f64; 2]>,
}

impl FeaturePoints {
    pub fn new(seed: Seed, num_points: usize) -> Self {
        let num_points = num_points.clamp(1, MAX_POINTS);
        let grid_size = (num_points as f64).sqrt().ceil() as usize;
        let mut rng = SeededRandom::new(seed);

        let points = (0..num_points)
            .map(|i| {
                let gx = (i % grid_size) as f64;
                let gy = (i / grid_size) as f64;
                let jx = (rng.next_f64() - 0.5) * 2.0 * JITTER * CELL_SIZE;
                let jy = (rng.next_f64() - 0.5) * 2.0 * JITTER * CELL_SIZE;
                [gx * CELL_SIZE + jx, gy * CELL_SIZE + jy]
            })
            .collect();

        debug!(seed = seed.value(), num_points, grid_size, "built cellular feature points");
        Self {
            seed,
            grid_size,
            points,
        }
    }

    pub fn seed(&self) -> Seed {
        self.seed
    }

    pub fn grid_size(&self) -> usize {
        self.grid_size
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[[f64; 2]] {
        &self.points
    }

    // Grid node a point was jittered away from
    pub fn cell_of(&self, index: usize) -> (usize, usize) {
        (index % self.grid_size, index / self.grid_size)
    }
}

/// Voronoi (Worley) distance noise over a `FeaturePoints` set.
#[derive(Clone, Debug)]
pub struct CellularNoise {
    points: Arc<FeaturePoints>,
    mode: CellularMode,
}

impl CellularNoise {
    pub fn new(seed: Seed, num_points: usize, mode: CellularMode) -> Self {
        Self::from_points(Arc::new(FeaturePoints::new(seed, num_points)), mode)
    }

    pub fn from_points(points: Arc<FeaturePoints>, mode: CellularMode) -> Self {
        Self { points, mode }
    }

    pub fn mode(&self) -> CellularMode {
        self.mode
    }

    pub fn feature_points(&self) -> &Arc<FeaturePoints> {
        &self.points
    }

    /// Rebuilds the feature points unless both the seed and the point count
    /// already match. Returns whether a rebuild happened.
    pub fn reinit(&mut self, seed: Seed, num_points: usize) -> bool {
        let num_points = num_points.clamp(1, MAX_POINTS);
        if self.points.seed() == seed && self.points.len() == num_points {
            return false;
        }
        self.points = Arc::new(FeaturePoints::new(seed, num_points));
        true
    }

    /// Smallest and second-smallest Euclidean distance from (x, y) to the
    /// feature points. F2 is infinite when there is only one point.
    pub fn distances(&self, x: f64, y: f64) -> (f64, f64) {
        let mut f1 = f64::INFINITY;
        let mut f2 = f64::INFINITY;
        for p in self.points.points() {
            let dx = x - p[0];
            let dy = y - p[1];
            let d = (dx * dx + dy * dy).sqrt();
            if d < f1 {
                f2 = f1;
                f1 = d;
            } else if d < f2 {
                f2 = d;
            }
        }
        (f1, f2)
    }
}

impl NoiseGenerator for CellularNoise {
    fn get2(&self, x: f64, y: f64) -> f64 {
        let (f1, f2) = self.distances(x, y);
        let d = match self.mode {
            CellularMode::F1 => f1,
            CellularMode::F2 => f2,
            CellularMode::F2MinusF1 => f2 - f1,
        };
        (d / MAX_DISTANCE).clamp(0.0, 1.0)
    }

    // Feature points are planar; z is the slice axis and is ignored
    fn get3(&self, x: f64, y: f64, _z: f64) -> f64 {
        self.get2(x, y)
    }
}

#[cfg(test)]
mod tests {
    use crate::NoiseGenerator;
    use crate::random::Seed;

    use super::{CELL_SIZE, CellularMode, CellularNoise, FeaturePoints, JITTER, MAX_POINTS};

    #[test]
    fn cellular_grid_size() {
        assert_eq!(FeaturePoints::new(Seed(1), 9).grid_size(), 3);
        assert_eq!(FeaturePoints::new(Seed(1), 10).grid_size(), 4);
        assert_eq!(FeaturePoints::new(Seed(1), 1).grid_size(), 1);
    }

    #[test]
    fn cellular_zero_points_coerced() {
        let fp = FeaturePoints::new(Seed(3), 0);
        assert_eq!(fp.len(), 1);
        let c = CellularNoise::new(Seed(3), 0, CellularMode::F2);
        // A single point has no second neighbour: F2 saturates
        assert_eq!(c.get2(0.0, 0.0), 1.0);
    }

    #[test]
    fn cellular_points_stay_in_cell() {
        let fp = FeaturePoints::new(Seed(11), 25);
        let reach = JITTER * CELL_SIZE;
        for (i, p) in fp.points().iter().enumerate() {
            let (gx, gy) = fp.cell_of(i);
            assert!((p[0] - gx as f64 * CELL_SIZE).abs() <= reach);
            assert!((p[1] - gy as f64 * CELL_SIZE).abs() <= reach);
        }
    }

    #[test]
    fn cellular_f1_zero_on_feature_point() {
        let c = CellularNoise::new(Seed(5), 16, CellularMode::F1);
        let p = c.feature_points().points()[6];
        assert_eq!(c.get2(p[0], p[1]), 0.0);
    }

    #[test]
    fn cellular_point_count_capped() {
        let fp = FeaturePoints::new(Seed(3), usize::MAX);
        assert_eq!(fp.len(), MAX_POINTS);
        assert_eq!(fp.grid_size(), 64);

        let mut c = CellularNoise::new(Seed(3), MAX_POINTS, CellularMode::F1);
        assert!(!c.reinit(Seed(3), MAX_POINTS + 1));
    }

    #[test]
    fn cellular_mode_ordering() {
        let f1 = CellularNoise::new(Seed(8), 16, CellularMode::F1);
        let f2 = CellularNoise::new(Seed(8), 16, CellularMode::F2);
        let diff = CellularNoise::new(Seed(8), 16, CellularMode::F2MinusF1);
        for i in 0..200 {
            let x = i as f64 * 0.017;
            let y = 3.0 - i as f64 * 0.011;
            let (a, b) = f1.distances(x, y);
            assert!(a <= b);
            assert!(f1.get2(x, y) <= f2.get2(x, y));
            for v in [f1.get2(x, y), f2.get2(x, y), diff.get2(x, y)] {
                assert!((0.0..=1.0).contains(&v));
            }
        }
    }

    #[test]
    fn cellular_reinit_is_noop_for_same_params() {
        let mut c = CellularNoise::new(Seed(4), 9, CellularMode::F1);
        let before = c.feature_points().clone();
        assert!(!c.reinit(Seed(4), 9));
        assert!(std::sync::Arc::ptr_eq(&before, c.feature_points()));
        assert!(c.reinit(Seed(4), 16));
        assert!(c.reinit(Seed(5), 16));
        assert_eq!(c.feature_points().len(), 16);
    }

    #[test]
    fn cellular_determinism() {
        assert_eq!(FeaturePoints::new(Seed(21), 12), FeaturePoints::new(Seed(21), 12));
        assert_ne!(FeaturePoints::new(Seed(21), 12), FeaturePoints::new(Seed(22), 12));
    }

    #[test]
    fn cellular_3d_ignores_z() {
        let c = CellularNoise::new(Seed(2), 16, CellularMode::F2MinusF1);
        assert_eq!(c.get3(1.2, 0.4, 9.0), c.get2(1.2, 0.4));
    }
}
