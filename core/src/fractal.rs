use crate::NoiseGenerator;

// Per-octave frequency multiplier, fixed for the whole engine
pub const LACUNARITY: f64 = 2.0;

// Running sums of one fractal evaluation; lives only for the duration of a call
#[derive(Clone, Copy, Debug)]
struct FractalAccumulator {
    total: f64,
    max_amp: f64,
    freq: f64,
    amp: f64,
}

impl FractalAccumulator {
    fn new(frequency: f64) -> Self {
        Self {
            total: 0.0,
            max_amp: 0.0,
            freq: frequency,
            amp: 1.0,
        }
    }

    #[inline]
    fn push(&mut self, sample: f64, persistence: f64) {
        self.total += sample * self.amp;
        self.max_amp += self.amp;
        self.amp *= persistence;
        self.freq *= LACUNARITY;
    }

    // Weighted mean of the octaves. With no octaves there is nothing to divide by.
    fn finish(self) -> f64 {
        if self.max_amp == 0.0 {
            self.total
        } else {
            self.total / self.max_amp
        }
    }
}

/// Multi-octave (fBm) combinator over any basis.
///
/// Octave `o` samples the basis at `coord · scale · frequency · 2^o` with
/// weight `persistence^o`; the result is the weighted sum divided by the sum
/// of weights, so a basis on [0, 1] stays on [0, 1].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FractalCompositor {
    pub octaves: u32,
    pub persistence: f64,
    pub frequency: f64,
    pub scale: f64,
}

impl FractalCompositor {
    pub fn new(octaves: u32, persistence: f64, frequency: f64, scale: f64) -> Self {
        Self {
            octaves,
            persistence,
            frequency,
            scale,
        }
    }

    pub fn sample2<G: NoiseGenerator + ?Sized>(&self, basis: &G, x: f64, y: f64) -> f64 {
        let mut acc = FractalAccumulator::new(self.frequency);
        for _ in 0..self.octaves {
            let s = basis.get2(x * self.scale * acc.freq, y * self.scale * acc.freq);
            acc.push(s, self.persistence);
        }
        acc.finish()
    }

    pub fn sample3<G: NoiseGenerator + ?Sized>(&self, basis: &G, x: f64, y: f64, z: f64) -> f64 {
        let mut acc = FractalAccumulator::new(self.frequency);
        for _ in 0..self.octaves {
            let f = acc.freq;
            let s = basis.get3(x * self.scale * f, y * self.scale * f, z * self.scale * f);
            acc.push(s, self.persistence);
        }
        acc.finish()
    }

    // Sum of octave weights, the divisor used by sample2/sample3
    pub fn amplitude_sum(&self) -> f64 {
        let mut acc = FractalAccumulator::new(self.frequency);
        for _ in 0..self.octaves {
            acc.push(0.0, self.persistence);
        }
        acc.max_amp
    }
}

impl Default for FractalCompositor {
    fn default() -> Self {
        Self::new(4, 0.5, 1.0, 1.0)
    }
}
