use crate::NoiseGenerator;
use crate::gradient::GradientNoise;

// Billow noise: |n - 0.5| · 2 over gradient noise n in [0, 1].
// Rounded lobes with creases at the zero crossings, the inverse of ridged.
#[derive(Clone, Debug)]
pub struct BillowNoise {
    base: GradientNoise,
}

impl BillowNoise {
    pub fn new(base: GradientNoise) -> Self {
        Self { base }
    }

    #[inline]
    fn billow(n: f64) -> f64 {
        (n - 0.5).abs() * 2.0
    }
}

impl NoiseGenerator for BillowNoise {
    fn get2(&self, x: f64, y: f64) -> f64 {
        Self::billow(self.base.get2(x, y))
    }

    fn get3(&self, x: f64, y: f64, z: f64) -> f64 {
        Self::billow(self.base.get3(x, y, z))
    }
}
