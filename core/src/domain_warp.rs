use crate::NoiseGenerator;
use crate::gradient::GradientNoise;

// Shift between displacement channels; decorrelates them without a second seed
pub const CHANNEL_OFFSET: f64 = 100.0;
pub const DEFAULT_WARP_STRENGTH: f64 = 4.0;
pub const DEFAULT_WARP_SCALE: f64 = 0.05;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WarpParams {
    pub strength: f64,
    pub scale: f64,
}

impl WarpParams {
    pub fn new(strength: f64, scale: f64) -> Self {
        Self { strength, scale }
    }

    // Parameters of the next warp layer: half the displacement at twice the frequency
    pub fn next_octave(self) -> Self {
        Self {
            strength: self.strength * 0.5,
            scale: self.scale * 2.0,
        }
    }
}

impl Default for WarpParams {
    fn default() -> Self {
        Self::new(DEFAULT_WARP_STRENGTH, DEFAULT_WARP_SCALE)
    }
}

// Domain-warped gradient noise: displace the coordinate with gradient noise,
// then sample gradient noise at base_scale at the displaced point
#[derive(Clone, Debug)]
pub struct DomainWarpedNoise {
    noise: GradientNoise,
    warp: WarpParams,
    base_scale: f64,
}

impl DomainWarpedNoise {
    pub fn new(noise: GradientNoise, warp: WarpParams, base_scale: f64) -> Self {
        Self {
            noise,
            warp,
            base_scale,
        }
    }

    pub fn warp_params(&self) -> WarpParams {
        self.warp
    }

    pub fn base_scale(&self) -> f64 {
        self.base_scale
    }

    /// Displaced 2D coordinate for one warp layer.
    pub fn warp2(&self, x: f64, y: f64, warp: WarpParams) -> (f64, f64) {
        let wx = self.noise.get2(x * warp.scale, y * warp.scale) * warp.strength;
        let wy = self.noise.get2(
            (x + CHANNEL_OFFSET) * warp.scale,
            (y + CHANNEL_OFFSET) * warp.scale,
        ) * warp.strength;
        (x + wx, y + wy)
    }

    pub fn warp3(&self, x: f64, y: f64, z: f64, warp: WarpParams) -> (f64, f64, f64) {
        let o = CHANNEL_OFFSET;
        let s = warp.scale;
        let wx = self.noise.get3(x * s, y * s, z * s) * warp.strength;
        let wy = self.noise.get3((x + o) * s, (y + o) * s, (z + o) * s) * warp.strength;
        let wz = self
            .noise
            .get3((x + 2.0 * o) * s, (y + 2.0 * o) * s, (z + 2.0 * o) * s)
            * warp.strength;
        (x + wx, y + wy, z + wz)
    }

    /// Layered warp: each layer displaces the previous layer's output, with
    /// half the strength and double the frequency. The base noise is sampled
    /// once at the final coordinate.
    pub fn fractal_warp2(&self, x: f64, y: f64, octaves: u32) -> f64 {
        let mut warp = self.warp;
        let (mut wx, mut wy) = (x, y);
        for _ in 0..octaves.max(1) {
            (wx, wy) = self.warp2(wx, wy, warp);
            warp = warp.next_octave();
        }
        self.noise.get2(wx * self.base_scale, wy * self.base_scale)
    }

    pub fn fractal_warp3(&self, x: f64, y: f64, z: f64, octaves: u32) -> f64 {
        let mut warp = self.warp;
        let (mut wx, mut wy, mut wz) = (x, y, z);
        for _ in 0..octaves.max(1) {
            (wx, wy, wz) = self.warp3(wx, wy, wz, warp);
            warp = warp.next_octave();
        }
        let b = self.base_scale;
        self.noise.get3(wx * b, wy * b, wz * b)
    }
}

impl NoiseGenerator for DomainWarpedNoise {
    // Single warp layer
    fn get2(&self, x: f64, y: f64) -> f64 {
        let (wx, wy) = self.warp2(x, y, self.warp);
        self.noise.get2(wx * self.base_scale, wy * self.base_scale)
    }

    fn get3(&self, x: f64, y: f64, z: f64) -> f64 {
        let (wx, wy, wz) = self.warp3(x, y, z, self.warp);
        let b = self.base_scale;
        self.noise.get3(wx * b, wy * b, wz * b)
    }
}
