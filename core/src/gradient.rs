use std::sync::Arc;

use crate::NoiseGenerator;
use crate::permutation::PermutationTable;
use crate::random::Seed;

// Gradient (Perlin) lattice noise in 2D and 3D.
// get2/get3 return [0, 1]; noise2/noise3 expose the raw signed lattice value.
#[derive(Clone, Debug)]
pub struct GradientNoise {
    perm: Arc<PermutationTable>,
}

impl GradientNoise {
    pub fn new(seed: Seed) -> Self {
        Self::from_table(Arc::new(PermutationTable::new(seed)))
    }

    pub fn from_table(perm: Arc<PermutationTable>) -> Self {
        Self { perm }
    }

    pub fn table(&self) -> &Arc<PermutationTable> {
        &self.perm
    }

    // Quintic fade 6t^5 − 15t^4 + 10t^3: zero first and second derivative at
    // both ends of the cell, so neighbouring cells join without creases
    #[inline]
    pub(crate) fn fade(t: f64) -> f64 {
        t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
    }

    #[inline]
    pub(crate) fn lerp(a: f64, b: f64, t: f64) -> f64 {
        a + t * (b - a)
    }

    // Four diagonal gradients picked by the low two bits of the hash
    #[inline]
    fn grad2(hash: u8, x: f64, y: f64) -> f64 {
        let h = hash & 3;
        let u = if (h & 1) == 0 { x } else { -x };
        let v = if (h & 2) == 0 { y } else { -y };
        u + v
    }

    // Twelve cube-edge gradients folded into 16 hash values
    #[inline]
    fn grad3(hash: u8, x: f64, y: f64, z: f64) -> f64 {
        let h = hash & 0xF;
        let u = if h < 8 { x } else { y };
        let v = if h < 4 {
            y
        } else if h == 12 || h == 14 {
            x
        } else {
            z
        };
        let sign_u = if (h & 1) == 0 { u } else { -u };
        let sign_v = if (h & 2) == 0 { v } else { -v };
        sign_u + sign_v
    }

    /// Raw single-octave 2D value, nominally in [-1, 1].
    pub fn noise2(&self, x: f64, y: f64) -> f64 {
        // Which cell?
        let xi = (x.floor() as i64 & 255) as usize;
        let yi = (y.floor() as i64 & 255) as usize;
        // Where inside it?
        let xf = x - x.floor();
        let yf = y - y.floor();
        let u = Self::fade(xf);
        let v = Self::fade(yf);

        let p = &self.perm;
        let a = p.get(xi) as usize + yi;
        let b = p.get(xi + 1) as usize + yi;
        let aa = p.get(a);
        let ab = p.get(a + 1);
        let ba = p.get(b);
        let bb = p.get(b + 1);

        let x1 = Self::lerp(Self::grad2(aa, xf, yf), Self::grad2(ba, xf - 1.0, yf), u);
        let x2 = Self::lerp(
            Self::grad2(ab, xf, yf - 1.0),
            Self::grad2(bb, xf - 1.0, yf - 1.0),
            u,
        );
        Self::lerp(x1, x2, v)
    }

    /// Raw single-octave 3D value, roughly in [-1, 1].
    pub fn noise3(&self, x: f64, y: f64, z: f64) -> f64 {
        let xi = (x.floor() as i64 & 255) as usize;
        let yi = (y.floor() as i64 & 255) as usize;
        let zi = (z.floor() as i64 & 255) as usize;
        let xf = x - x.floor();
        let yf = y - y.floor();
        let zf = z - z.floor();
        let u = Self::fade(xf);
        let v = Self::fade(yf);
        let w = Self::fade(zf);

        // Corner hashes, classic improved-noise layout over the doubled table
        let p = &self.perm;
        let a = p.get(xi) as usize + yi;
        let aa = p.get(a) as usize + zi;
        let ab = p.get(a + 1) as usize + zi;
        let b = p.get(xi + 1) as usize + yi;
        let ba = p.get(b) as usize + zi;
        let bb = p.get(b + 1) as usize + zi;

        let x1 = Self::lerp(
            Self::grad3(p.get(aa), xf, yf, zf),
            Self::grad3(p.get(ba), xf - 1.0, yf, zf),
            u,
        );
        let x2 = Self::lerp(
            Self::grad3(p.get(ab), xf, yf - 1.0, zf),
            Self::grad3(p.get(bb), xf - 1.0, yf - 1.0, zf),
            u,
        );
        let y1 = Self::lerp(x1, x2, v);

        let x3 = Self::lerp(
            Self::grad3(p.get(aa + 1), xf, yf, zf - 1.0),
            Self::grad3(p.get(ba + 1), xf - 1.0, yf, zf - 1.0),
            u,
        );
        let x4 = Self::lerp(
            Self::grad3(p.get(ab + 1), xf, yf - 1.0, zf - 1.0),
            Self::grad3(p.get(bb + 1), xf - 1.0, yf - 1.0, zf - 1.0),
            u,
        );
        let y2 = Self::lerp(x3, x4, v);

        Self::lerp(y1, y2, w)
    }
}

impl NoiseGenerator for GradientNoise {
    fn get2(&self, x: f64, y: f64) -> f64 {
        (self.noise2(x, y) + 1.0) / 2.0
    }

    // The 3D lattice can overshoot 1 by a hair, hence the clamp
    fn get3(&self, x: f64, y: f64, z: f64) -> f64 {
        ((self.noise3(x, y, z) + 1.0) / 2.0).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use crate::NoiseGenerator;
    use crate::random::Seed;

    use super::GradientNoise;

    #[test]
    fn gradient_determinism() {
        let g1 = GradientNoise::new(Seed(1234));
        let g2 = GradientNoise::new(Seed(1234));
        let a = g1.get2(10.5, -3.7);
        let b = g2.get2(10.5, -3.7);
        assert_eq!(a.to_bits(), b.to_bits());
    }

    #[test]
    fn gradient_lattice_points_are_midpoint() {
        // Every gradient dot product vanishes on a lattice corner
        let g = GradientNoise::new(Seed(5));
        for &(x, y) in &[(0.0, 0.0), (3.0, -7.0), (255.0, 256.0)] {
            assert_eq!(g.get2(x, y), 0.5);
        }
        assert_eq!(g.get3(1.0, 2.0, 3.0), 0.5);
    }

    #[test]
    fn gradient_range() {
        let g = GradientNoise::new(Seed(0));
        for i in 0..2000 {
            let x = i as f64 * 0.137 - 50.0;
            let y = i as f64 * 0.291 - 120.0;
            let v = g.get2(x, y);
            assert!((0.0..=1.0).contains(&v), "2D value {} out of range", v);
            let w = g.get3(x, y, x * 0.5);
            assert!((0.0..=1.0).contains(&w), "3D value {} out of range", w);
        }
    }

    #[test]
    fn gradient_continuity() {
        let g = GradientNoise::new(Seed(77));
        let a = g.get2(3.5, 4.25);
        let b = g.get2(3.5 + 1e-7, 4.25);
        assert!((a - b).abs() < 1e-5);
    }

    #[test]
    fn gradient_known_value() {
        let g = GradientNoise::new(Seed(42));
        assert!((g.get2(3.7, -1.2) - GRADIENT_42_AT_3_7_M1_2).abs() < 1e-12);
    }

    const GRADIENT_42_AT_3_7_M1_2: f64 = 0.20661991552000014;
}
