use crate::NoiseGenerator;
use crate::gradient::GradientNoise;

pub const DEFAULT_OFFSET: f64 = 0.0;
pub const DEFAULT_POWER: f64 = 1.0;

// Ridged noise: |1 - n - offset|^power over gradient noise n in [0, 1].
// Folding the signal puts sharp crests where n is near 1 - offset; power > 1
// narrows them further.
#[derive(Clone, Debug)]
pub struct RidgedNoise {
    base: GradientNoise,
    offset: f64,
    power: f64,
}

impl RidgedNoise {
    pub fn new(base: GradientNoise, offset: f64, power: f64) -> Self {
        Self {
            base,
            offset,
            power,
        }
    }

    pub fn offset(&self) -> f64 {
        self.offset
    }

    pub fn power(&self) -> f64 {
        self.power
    }

    #[inline]
    fn ridge(&self, n: f64) -> f64 {
        (1.0 - n - self.offset).abs().powf(self.power)
    }
}

impl NoiseGenerator for RidgedNoise {
    fn get2(&self, x: f64, y: f64) -> f64 {
        self.ridge(self.base.get2(x, y))
    }

    fn get3(&self, x: f64, y: f64, z: f64) -> f64 {
        self.ridge(self.base.get3(x, y, z))
    }
}
