use crate::NoiseGenerator;
use crate::billow::BillowNoise;
use crate::cache::NoiseCache;
use crate::cellular::CellularNoise;
use crate::config::{BasisType, ResolvedConfig};
use crate::domain_warp::DomainWarpedNoise;
use crate::gradient::GradientNoise;
use crate::ridged::RidgedNoise;
use crate::simplex::SimplexNoise;

/// Every noise algorithm the engine knows, as one closed type.
///
/// Each variant owns its (shared, read-only) seeded tables, so a built basis
/// is a self-contained handle that can be kept by whichever subsystem needs it.
#[derive(Clone, Debug)]
pub enum NoiseBasis {
    Gradient(GradientNoise),
    Simplex(SimplexNoise),
    Cellular(CellularNoise),
    DomainWarp(DomainWarpedNoise),
    Ridged(RidgedNoise),
    Billow(BillowNoise),
}

impl NoiseBasis {
    // Tables come from the cache, so building the same seed twice is cheap
    pub fn build(config: &ResolvedConfig, cache: &NoiseCache) -> Self {
        let gradient = || GradientNoise::from_table(cache.permutation(config.seed));
        match config.basis_type {
            BasisType::Gradient => Self::Gradient(gradient()),
            BasisType::Simplex => Self::Simplex(
                SimplexNoise::from_table(cache.permutation(config.seed))
                    .with_z_offset(config.z_offset),
            ),
            BasisType::Cellular => Self::Cellular(CellularNoise::from_points(
                cache.feature_points(config.seed, config.num_points),
                config.mode,
            )),
            BasisType::DomainWarp => Self::DomainWarp(DomainWarpedNoise::new(
                gradient(),
                config.warp,
                config.base_scale(),
            )),
            BasisType::Ridged => {
                Self::Ridged(RidgedNoise::new(gradient(), config.offset, config.power))
            }
            BasisType::Billow => Self::Billow(BillowNoise::new(gradient())),
        }
    }

    pub fn basis_type(&self) -> BasisType {
        match self {
            Self::Gradient(_) => BasisType::Gradient,
            Self::Simplex(_) => BasisType::Simplex,
            Self::Cellular(_) => BasisType::Cellular,
            Self::DomainWarp(_) => BasisType::DomainWarp,
            Self::Ridged(_) => BasisType::Ridged,
            Self::Billow(_) => BasisType::Billow,
        }
    }
}

impl NoiseGenerator for NoiseBasis {
    fn get2(&self, x: f64, y: f64) -> f64 {
        match self {
            Self::Gradient(n) => n.get2(x, y),
            Self::Simplex(n) => n.get2(x, y),
            Self::Cellular(n) => n.get2(x, y),
            Self::DomainWarp(n) => n.get2(x, y),
            Self::Ridged(n) => n.get2(x, y),
            Self::Billow(n) => n.get2(x, y),
        }
    }

    fn get3(&self, x: f64, y: f64, z: f64) -> f64 {
        match self {
            Self::Gradient(n) => n.get3(x, y, z),
            Self::Simplex(n) => n.get3(x, y, z),
            Self::Cellular(n) => n.get3(x, y, z),
            Self::DomainWarp(n) => n.get3(x, y, z),
            Self::Ridged(n) => n.get3(x, y, z),
            Self::Billow(n) => n.get3(x, y, z),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::NoiseBasis;
    use crate::NoiseGenerator;
    use crate::cache::NoiseCache;
    use crate::config::{BasisType, NoiseConfig};

    const ALL: [BasisType; 6] = [
        BasisType::Gradient,
        BasisType::Simplex,
        BasisType::Cellular,
        BasisType::DomainWarp,
        BasisType::Ridged,
        BasisType::Billow,
    ];

    #[test]
    fn basis_build_matches_requested_type() {
        let cache = NoiseCache::new();
        for kind in ALL {
            let cfg = NoiseConfig::new(kind, 42).resolve();
            assert_eq!(NoiseBasis::build(&cfg, &cache).basis_type(), kind);
        }
        // One table for the seed, one point set for the cellular variant
        assert_eq!(cache.table_count(), 1);
        assert_eq!(cache.point_set_count(), 1);
    }

    #[test]
    fn basis_single_sample_in_unit_range() {
        let cache = NoiseCache::new();
        for kind in ALL {
            let basis = NoiseBasis::build(&NoiseConfig::new(kind, 9).resolve(), &cache);
            for i in 0..200 {
                let (x, y) = (i as f64 * 0.37 - 20.0, i as f64 * 0.19);
                let v = basis.get2(x, y);
                assert!((0.0..=1.0).contains(&v), "{:?} gave {}", kind, v);
                let w = basis.get3(x, y, 1.5);
                assert!((0.0..=1.0).contains(&w), "{:?} gave {} in 3D", kind, w);
            }
        }
    }
}
