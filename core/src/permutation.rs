use tracing::debug;

use crate::random::{Seed, SeededRandom};

pub const PERM_SIZE: usize = 256;

/// Seeded lattice hash: a shuffled 0..=255, doubled to 512 entries so that
/// `perm[a + perm[b]]` never needs a wrap for `a, b <= 255`.
///
/// Also carries `perm % 12`, the gradient index table of the simplex basis.
///
/// Built once per seed and read-only afterwards. Building twice with the same
/// seed yields the same table, so concurrent builders never disagree.
#[derive(Clone, PartialEq, Eq)]
pub struct PermutationTable {
    seed: Seed,
    perm: [u8; PERM_SIZE * 2],
    perm_mod12: [u8; PERM_SIZE * 2],
}

impl PermutationTable {
    pub fn new(seed: Seed) -> Self {
        let mut p = [0u8; PERM_SIZE];
        for (i, slot) in p.iter_mut().enumerate() {
            *slot = i as u8;
        }

        // Fisher–Yates, walking down from the top index
        let mut rng = SeededRandom::new(seed);
        for i in (1..PERM_SIZE).rev() {
            let j = (rng.next_f64() * (i + 1) as f64).floor() as usize;
            p.swap(i, j);
        }

        let mut perm = [0u8; PERM_SIZE * 2];
        let mut perm_mod12 = [0u8; PERM_SIZE * 2];
        for i in 0..PERM_SIZE * 2 {
            perm[i] = p[i & 255];
            perm_mod12[i] = perm[i] % 12;
        }

        debug!(seed = seed.value(), "built permutation table");
        Self {
            seed,
            perm,
            perm_mod12,
        }
    }

    pub fn seed(&self) -> Seed {
        self.seed
    }

    #[inline]
    pub fn get(&self, index: usize) -> u8 {
        self.perm[index]
    }

    #[inline]
    pub fn mod12(&self, index: usize) -> u8 {
        self.perm_mod12[index]
    }

    // Hash of a 2D lattice point; both coordinates already masked to 0..=255
    #[inline]
    pub fn hash2(&self, xi: usize, yi: usize) -> u8 {
        self.perm[self.perm[xi] as usize + yi]
    }

    #[inline]
    pub fn hash3(&self, xi: usize, yi: usize, zi: usize) -> u8 {
        self.perm[self.perm[self.perm[xi] as usize + yi] as usize + zi]
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.perm
    }
}

impl std::fmt::Debug for PermutationTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PermutationTable")
            .field("seed", &self.seed)
            .field("head", &&self.perm[..8])
            .finish()
    }
}
