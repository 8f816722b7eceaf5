use std::sync::Arc;

use crate::basis::NoiseBasis;
use crate::cache::NoiseCache;
use crate::config::{NoiseConfig, ResolvedConfig};
use crate::utils::HeightMap2D;

/// Regular sampling grid for full-field rasterization. Row `r`, column `c`
/// sits at `(origin_x + c · step, origin_z + r · step)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridSpec {
    pub origin_x: f64,
    pub origin_z: f64,
    pub step: f64,
    pub width: usize,
    pub depth: usize,
}

impl GridSpec {
    pub fn new(width: usize, depth: usize, step: f64) -> Self {
        Self {
            origin_x: 0.0,
            origin_z: 0.0,
            step,
            width,
            depth,
        }
    }

    pub fn with_origin(mut self, origin_x: f64, origin_z: f64) -> Self {
        self.origin_x = origin_x;
        self.origin_z = origin_z;
        self
    }
}

/// A basis bound to a resolved configuration: the handle a terrain builder,
/// placement pass or movement controller keeps between samples.
#[derive(Clone, Debug)]
pub struct HeightField {
    basis: NoiseBasis,
    config: ResolvedConfig,
}

impl HeightField {
    pub fn new(basis: NoiseBasis, config: ResolvedConfig) -> Self {
        Self { basis, config }
    }

    pub fn basis(&self) -> &NoiseBasis {
        &self.basis
    }

    pub fn config(&self) -> &ResolvedConfig {
        &self.config
    }

    /// Elevation at (x, z): the normalized fractal value times `amplitude`.
    ///
    /// Non-finite coordinates are not checked and propagate into the result.
    pub fn sample(&self, x: f64, z: f64) -> f64 {
        let c = self.config.compositor();
        let n = match &self.basis {
            NoiseBasis::Gradient(b) => c.sample2(b, x, z),
            NoiseBasis::Simplex(b) => c.sample2(b, x, z),
            NoiseBasis::Cellular(b) => c.sample2(b, x, z),
            // Warp layers already carry their own octave schedule
            NoiseBasis::DomainWarp(b) => b.fractal_warp2(x, z, self.config.octaves),
            NoiseBasis::Ridged(b) => c.sample2(b, x, z),
            NoiseBasis::Billow(b) => c.sample2(b, x, z),
        };
        n * self.config.amplitude
    }

    pub fn sample3(&self, x: f64, y: f64, z: f64) -> f64 {
        let c = self.config.compositor();
        let n = match &self.basis {
            NoiseBasis::Gradient(b) => c.sample3(b, x, y, z),
            NoiseBasis::Simplex(b) => c.sample3(b, x, y, z),
            NoiseBasis::Cellular(b) => c.sample3(b, x, y, z),
            NoiseBasis::DomainWarp(b) => b.fractal_warp3(x, y, z, self.config.octaves),
            NoiseBasis::Ridged(b) => c.sample3(b, x, y, z),
            NoiseBasis::Billow(b) => c.sample3(b, x, y, z),
        };
        n * self.config.amplitude
    }

    // Always a full recompute over the grid
    pub fn rasterize(&self, grid: &GridSpec) -> HeightMap2D {
        (0..grid.depth)
            .map(|row| {
                let z = grid.origin_z + row as f64 * grid.step;
                (0..grid.width)
                    .map(|col| self.sample(grid.origin_x + col as f64 * grid.step, z) as f32)
                    .collect()
            })
            .collect()
    }
}

/// Entry point mapping (coordinate, configuration) to an elevation.
///
/// Owns (or shares) a [`NoiseCache`], so repeated calls with the same seed reuse
/// one permutation table. Configurations are guarded on every call; no input
/// configuration makes it panic.
#[derive(Clone, Debug, Default)]
pub struct HeightSampler {
    cache: Arc<NoiseCache>,
}

impl HeightSampler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cache(cache: Arc<NoiseCache>) -> Self {
        Self { cache }
    }

    pub fn cache(&self) -> &Arc<NoiseCache> {
        &self.cache
    }

    pub fn prepare(&self, config: &NoiseConfig) -> HeightField {
        let resolved = config.resolve();
        HeightField::new(NoiseBasis::build(&resolved, &self.cache), resolved)
    }

    pub fn sample(&self, x: f64, z: f64, config: &NoiseConfig) -> f64 {
        self.prepare(config).sample(x, z)
    }

    pub fn sample3(&self, x: f64, y: f64, z: f64, config: &NoiseConfig) -> f64 {
        self.prepare(config).sample3(x, y, z)
    }

    pub fn rasterize(&self, grid: &GridSpec, config: &NoiseConfig) -> HeightMap2D {
        self.prepare(config).rasterize(grid)
    }
}
