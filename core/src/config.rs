use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::cellular::{CellularMode, DEFAULT_POINTS, MAX_POINTS};
use crate::domain_warp::{DEFAULT_WARP_SCALE, DEFAULT_WARP_STRENGTH, WarpParams};
use crate::error::ConfigError;
use crate::fractal::FractalCompositor;
use crate::random::Seed;
use crate::ridged::{DEFAULT_OFFSET, DEFAULT_POWER};

// Replacement values for out-of-range parameters
pub const MIN_SCALE: f64 = 1e-6;
pub const MIN_PERSISTENCE: f64 = 1e-6;
pub const MAX_OCTAVES: u32 = 32;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BasisType {
    #[default]
    Gradient,
    Simplex,
    Cellular,
    DomainWarp,
    Ridged,
    Billow,
}

/// Sampling parameters as handed over by the authoring layer.
///
/// Values are taken as-is; nothing here is validated. Call [`NoiseConfig::resolve`]
/// to get a [`ResolvedConfig`] with every guard applied. Fields not relevant to
/// `basis_type` are ignored.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NoiseConfig {
    pub basis_type: BasisType,
    pub seed: i64,
    pub scale: f64,
    pub octaves: i64,
    pub persistence: f64,
    pub frequency: f64,
    pub amplitude: f64,

    // cellular
    pub mode: CellularMode,
    pub num_points: usize,
    // domain warp
    pub warp_strength: f64,
    pub warp_scale: f64,
    // ridged
    pub offset: f64,
    pub power: f64,
    // simplex
    pub z_offset: f64,
}

impl Default for NoiseConfig {
    fn default() -> Self {
        Self {
            basis_type: BasisType::Gradient,
            seed: 0,
            scale: 0.05,
            octaves: 4,
            persistence: 0.5,
            frequency: 1.0,
            amplitude: 1.0,
            mode: CellularMode::F1,
            num_points: DEFAULT_POINTS,
            warp_strength: DEFAULT_WARP_STRENGTH,
            warp_scale: DEFAULT_WARP_SCALE,
            offset: DEFAULT_OFFSET,
            power: DEFAULT_POWER,
            z_offset: 0.0,
        }
    }
}

impl NoiseConfig {
    pub fn new(basis_type: BasisType, seed: i64) -> Self {
        Self {
            basis_type,
            seed,
            ..Default::default()
        }
    }

    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    // Format is picked from the file extension
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        match ext.as_str() {
            "json" => Self::from_json_str(&std::fs::read_to_string(path)?),
            "toml" => Self::from_toml_str(&std::fs::read_to_string(path)?),
            _ => Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        }
    }

    /// Applies the boundary guards. Never fails: invalid values are replaced,
    /// so an authoring tool can pass half-edited parameters straight through.
    pub fn resolve(&self) -> ResolvedConfig {
        let octaves = if (1..=MAX_OCTAVES as i64).contains(&self.octaves) {
            self.octaves as u32
        } else {
            let coerced = self.octaves.clamp(1, MAX_OCTAVES as i64) as u32;
            trace!(field = "octaves", value = self.octaves, replacement = coerced, "guard");
            coerced
        };

        let num_points = if (1..=MAX_POINTS).contains(&self.num_points) {
            self.num_points
        } else {
            let coerced = self.num_points.clamp(1, MAX_POINTS);
            trace!(field = "numPoints", value = self.num_points, replacement = coerced, "guard");
            coerced
        };

        ResolvedConfig {
            basis_type: self.basis_type,
            seed: Seed::from(self.seed),
            scale: positive_or("scale", self.scale, MIN_SCALE),
            octaves,
            persistence: positive_or("persistence", self.persistence, MIN_PERSISTENCE),
            frequency: finite_or("frequency", self.frequency, 1.0),
            amplitude: finite_or("amplitude", self.amplitude, 0.0),
            mode: self.mode,
            num_points,
            warp: WarpParams::new(
                finite_or("warpStrength", self.warp_strength, DEFAULT_WARP_STRENGTH),
                finite_or("warpScale", self.warp_scale, DEFAULT_WARP_SCALE),
            ),
            offset: finite_or("offset", self.offset, DEFAULT_OFFSET),
            // 0^-p is infinite at a crest, so the exponent must stay positive
            power: positive_or("power", self.power, DEFAULT_POWER),
            z_offset: finite_or("zOffset", self.z_offset, 0.0),
        }
    }
}

// NaN fails the `> 0` test too, so it is replaced like any non-positive value
fn positive_or(field: &'static str, value: f64, replacement: f64) -> f64 {
    if value > 0.0 && value.is_finite() {
        value
    } else {
        trace!(field, value, replacement, "guard");
        replacement
    }
}

fn finite_or(field: &'static str, value: f64, replacement: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        trace!(field, value, replacement, "guard");
        replacement
    }
}

/// A [`NoiseConfig`] with every guard applied. Safe to sample with.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResolvedConfig {
    pub basis_type: BasisType,
    pub seed: Seed,
    pub scale: f64,
    pub octaves: u32,
    pub persistence: f64,
    pub frequency: f64,
    pub amplitude: f64,
    pub mode: CellularMode,
    pub num_points: usize,
    pub warp: WarpParams,
    pub offset: f64,
    pub power: f64,
    pub z_offset: f64,
}

impl ResolvedConfig {
    pub fn compositor(&self) -> FractalCompositor {
        FractalCompositor::new(self.octaves, self.persistence, self.frequency, self.scale)
    }

    // Base-noise scale used by the domain-warp basis
    pub fn base_scale(&self) -> f64 {
        self.scale * self.frequency
    }
}
