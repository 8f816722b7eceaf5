// core holds the seeded noise bases, the fractal compositor and the height sampler
pub mod basis;
pub mod billow;
pub mod cache;
pub mod cellular;
pub mod config;
pub mod domain_warp;
pub mod error;
pub mod fractal;
pub mod gradient;
pub mod permutation;
pub mod random;
pub mod ridged;
pub mod sampler;
pub mod simplex;
pub mod utils;

pub use basis::NoiseBasis;
pub use billow::BillowNoise;
pub use cache::NoiseCache;
pub use cellular::{CellularMode, CellularNoise, FeaturePoints};
pub use config::{BasisType, NoiseConfig, ResolvedConfig};
pub use domain_warp::{DomainWarpedNoise, WarpParams};
pub use error::ConfigError;
pub use fractal::FractalCompositor;
pub use gradient::GradientNoise;
pub use permutation::PermutationTable;
pub use random::{Seed, SeededRandom};
pub use ridged::RidgedNoise;
pub use sampler::{GridSpec, HeightField, HeightSampler};
pub use simplex::SimplexNoise;
pub use utils::{HeightMap2D, flatten2, normalize2};

// Noise generator that can sample 2D or 3D points.
// Every basis answers both; planar bases treat z as the slice axis.
pub trait NoiseGenerator {
    // Sample 2D noise at (x, y).
    fn get2(&self, x: f64, y: f64) -> f64;

    // Sample 3D noise at (x, y, z).
    fn get3(&self, x: f64, y: f64, z: f64) -> f64;
}
