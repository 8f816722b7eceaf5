use std::sync::Arc;

use crate::NoiseGenerator;
use crate::permutation::PermutationTable;
use crate::random::Seed;

// Skewing / unskewing factors for the 3D simplex grid
const F3: f64 = 1.0 / 3.0;
const G3: f64 = 1.0 / 6.0;

// Edge midpoints of a cube, indexed by the permutation's mod-12 table
const GRAD3: [[f64; 3]; 12] = [
    [1.0, 1.0, 0.0],
    [-1.0, 1.0, 0.0],
    [1.0, -1.0, 0.0],
    [-1.0, -1.0, 0.0],
    [1.0, 0.0, 1.0],
    [-1.0, 0.0, 1.0],
    [1.0, 0.0, -1.0],
    [-1.0, 0.0, -1.0],
    [0.0, 1.0, 1.0],
    [0.0, -1.0, 1.0],
    [0.0, 1.0, -1.0],
    [0.0, -1.0, -1.0],
];

/// 3D simplex noise over a seeded permutation.
///
/// Simplex divides space into tetrahedra rather than cubes, so each sample
/// touches 4 corners instead of 8 and the result has fewer axis-aligned
/// artifacts. The planar view (`get2`) is the slice at `z = z_offset`.
///
/// `noise3` returns the raw, unnormalized value (about [-1, 1]); `get2` and
/// `get3` remap it with `(n + 1) / 2` so every octave is weighted on [0, 1].
#[derive(Clone, Debug)]
pub struct SimplexNoise {
    perm: Arc<PermutationTable>,
    z_offset: f64,
}

impl SimplexNoise {
    pub fn new(seed: Seed) -> Self {
        Self::from_table(Arc::new(PermutationTable::new(seed)))
    }

    pub fn from_table(perm: Arc<PermutationTable>) -> Self {
        Self {
            perm,
            z_offset: 0.0,
        }
    }

    pub fn with_z_offset(mut self, z_offset: f64) -> Self {
        self.z_offset = z_offset;
        self
    }

    pub fn z_offset(&self) -> f64 {
        self.z_offset
    }

    #[inline]
    fn dot(g: &[f64; 3], x: f64, y: f64, z: f64) -> f64 {
        g[0] * x + g[1] * y + g[2] * z
    }

    // Radial falloff kernel of one corner: max(0, 0.6 - d²)^4 · (g · d)
    #[inline]
    fn corner(gi: u8, x: f64, y: f64, z: f64) -> f64 {
        let t = 0.6 - x * x - y * y - z * z;
        if t < 0.0 {
            0.0
        } else {
            let t2 = t * t;
            t2 * t2 * Self::dot(&GRAD3[gi as usize], x, y, z)
        }
    }

    /// Raw 3D simplex value, roughly in [-1, 1].
    pub fn noise3(&self, xin: f64, yin: f64, zin: f64) -> f64 {
        // Skew the input space to find the simplex cell
        let s = (xin + yin + zin) * F3;
        let i = (xin + s).floor();
        let j = (yin + s).floor();
        let k = (zin + s).floor();

        // Unskew the cell origin back to (x, y, z) space. Stays in f64 so far
        // octaves cannot overflow an integer sum.
        let t = (i + j + k) * G3;
        let x0 = xin - (i - t);
        let y0 = yin - (j - t);
        let z0 = zin - (k - t);

        // Which of the six tetrahedra: order the offsets largest first
        let (i1, j1, k1, i2, j2, k2) = if x0 >= y0 {
            if y0 >= z0 {
                (1, 0, 0, 1, 1, 0)
            } else if x0 >= z0 {
                (1, 0, 0, 1, 0, 1)
            } else {
                (0, 0, 1, 1, 0, 1)
            }
        } else if y0 < z0 {
            (0, 0, 1, 0, 1, 1)
        } else if x0 < z0 {
            (0, 1, 0, 0, 1, 1)
        } else {
            (0, 1, 0, 1, 1, 0)
        };

        let x1 = x0 - i1 as f64 + G3;
        let y1 = y0 - j1 as f64 + G3;
        let z1 = z0 - k1 as f64 + G3;
        let x2 = x0 - i2 as f64 + 2.0 * G3;
        let y2 = y0 - j2 as f64 + 2.0 * G3;
        let z2 = z0 - k2 as f64 + 2.0 * G3;
        let x3 = x0 - 1.0 + 3.0 * G3;
        let y3 = y0 - 1.0 + 3.0 * G3;
        let z3 = z0 - 1.0 + 3.0 * G3;

        let ii = (i as i64 & 255) as usize;
        let jj = (j as i64 & 255) as usize;
        let kk = (k as i64 & 255) as usize;
        let p = &self.perm;
        let gi0 = p.mod12(ii + p.get(jj + p.get(kk) as usize) as usize);
        let gi1 = p.mod12(ii + i1 + p.get(jj + j1 + p.get(kk + k1) as usize) as usize);
        let gi2 = p.mod12(ii + i2 + p.get(jj + j2 + p.get(kk + k2) as usize) as usize);
        let gi3 = p.mod12(ii + 1 + p.get(jj + 1 + p.get(kk + 1) as usize) as usize);

        let n0 = Self::corner(gi0, x0, y0, z0);
        let n1 = Self::corner(gi1, x1, y1, z1);
        let n2 = Self::corner(gi2, x2, y2, z2);
        let n3 = Self::corner(gi3, x3, y3, z3);

        // Scaled so the sum lands near [-1, 1]
        32.0 * (n0 + n1 + n2 + n3)
    }

    #[inline]
    fn remap(n: f64) -> f64 {
        ((n + 1.0) / 2.0).clamp(0.0, 1.0)
    }
}

impl NoiseGenerator for SimplexNoise {
    fn get2(&self, x: f64, y: f64) -> f64 {
        Self::remap(self.noise3(x, y, self.z_offset))
    }

    fn get3(&self, x: f64, y: f64, z: f64) -> f64 {
        Self::remap(self.noise3(x, y, z))
    }
}
