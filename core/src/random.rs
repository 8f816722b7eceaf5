use serde::{Deserialize, Serialize};

// 32-bit seed, the identity key for every table and stream derived from it
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Seed(pub u32);

impl Seed {
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    pub const fn value(self) -> u32 {
        self.0
    }
}

impl From<u32> for Seed {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl From<i32> for Seed {
    fn from(value: i32) -> Self {
        Self(value as u32)
    }
}

// Wider integers keep only their low 32 bits, the same coercion an authoring
// layer applies when it hands over an integer seed
impl From<i64> for Seed {
    fn from(value: i64) -> Self {
        Self(value as u32)
    }
}

// Mulberry32 stream: uniform f64 in [0, 1) from a 32-bit state.
// Pure wrapping integer arithmetic, so the sequence is bit-identical on every platform.
#[derive(Clone, Debug)]
pub struct SeededRandom {
    state: u32,
}

impl SeededRandom {
    pub fn new(seed: Seed) -> Self {
        Self { state: seed.value() }
    }

    // One step of the generator as a pure function: (sample, next state)
    #[inline]
    pub fn step(state: u32) -> (f64, u32) {
        let state = state.wrapping_add(0x6D2B_79F5);
        let mut t = (state ^ (state >> 15)).wrapping_mul(1 | state);
        t = t.wrapping_add((t ^ (t >> 7)).wrapping_mul(61 | t)) ^ t;
        let sample = (t ^ (t >> 14)) as f64 / 4_294_967_296.0;
        (sample, state)
    }

    #[inline]
    pub fn next_f64(&mut self) -> f64 {
        let (sample, state) = Self::step(self.state);
        self.state = state;
        sample
    }

    pub fn state(&self) -> u32 {
        self.state
    }
}

impl Iterator for SeededRandom {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        Some(self.next_f64())
    }
}

#[cfg(test)]
mod tests {
    use super::{Seed, SeededRandom};

    #[test]
    fn random_determinism() {
        let a: Vec<f64> = SeededRandom::new(Seed(1234)).take(64).collect();
        let b: Vec<f64> = SeededRandom::new(Seed(1234)).take(64).collect();
        assert_eq!(a, b);
    }

    #[test]
    fn random_unit_interval() {
        for v in SeededRandom::new(Seed(7)).take(10_000) {
            assert!((0.0..1.0).contains(&v), "sample {} outside [0,1)", v);
        }
    }

    #[test]
    fn random_step_matches_stream() {
        let mut rng = SeededRandom::new(Seed(99));
        let (first, state) = SeededRandom::step(99);
        assert_eq!(rng.next_f64(), first);
        assert_eq!(rng.state(), state);
    }

    #[test]
    fn random_known_sequence() {
        // Reference values of the Mulberry32 stream for seed 0
        let mut rng = SeededRandom::new(Seed(0));
        assert!((rng.next_f64() - 0.26642920868471265).abs() < 1e-15);
        assert!((rng.next_f64() - 0.0003297457005828619).abs() < 1e-15);
    }

    #[test]
    fn seed_truncates_to_low_bits() {
        assert_eq!(Seed::from(-1i32), Seed(u32::MAX));
        assert_eq!(Seed::from(0x1_0000_0005i64), Seed(5));
        assert_eq!(Seed::from(-2i64), Seed(u32::MAX - 1));
    }
}
