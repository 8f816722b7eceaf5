use std::hash::Hash;
use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use tracing::debug;

use crate::cellular::{FeaturePoints, MAX_POINTS};
use crate::permutation::PermutationTable;
use crate::random::Seed;

/// Memoizing factory for the seeded tables behind every basis.
///
/// Tables are built outside any lock and published with insert-if-absent, so
/// two threads asking for the same new seed may both build, but both end up
/// holding the one table that was stored first. Stored tables are immutable;
/// a different seed always means a different entry.
///
/// Entries are never evicted on their own. A session that walks through many
/// seeds (an editor scrubbing a seed slider) keeps one table per seed visited,
/// about 1 KiB each, until [`NoiseCache::clear`] or [`NoiseCache::evict`].
#[derive(Default)]
pub struct NoiseCache {
    tables: RwLock<FxHashMap<Seed, Arc<PermutationTable>>>,
    points: RwLock<FxHashMap<(Seed, usize), Arc<FeaturePoints>>>,
}

impl NoiseCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn permutation(&self, seed: Seed) -> Arc<PermutationTable> {
        memoize(&self.tables, seed, || PermutationTable::new(seed))
    }

    pub fn feature_points(&self, seed: Seed, num_points: usize) -> Arc<FeaturePoints> {
        let num_points = num_points.clamp(1, MAX_POINTS);
        memoize(&self.points, (seed, num_points), || {
            FeaturePoints::new(seed, num_points)
        })
    }

    pub fn table_count(&self) -> usize {
        self.tables.read().len()
    }

    pub fn point_set_count(&self) -> usize {
        self.points.read().len()
    }

    // Forgets one seed's table and point sets; returns how many entries went
    pub fn evict(&self, seed: Seed) -> usize {
        let mut removed = usize::from(self.tables.write().remove(&seed).is_some());
        let mut points = self.points.write();
        let before = points.len();
        points.retain(|(s, _), _| *s != seed);
        removed += before - points.len();
        removed
    }

    // Drops the cache's references; handles already given out stay valid
    pub fn clear(&self) {
        self.tables.write().clear();
        self.points.write().clear();
    }
}

fn memoize<K, V, F>(map: &RwLock<FxHashMap<K, Arc<V>>>, key: K, build: F) -> Arc<V>
where
    K: Eq + Hash + Copy + std::fmt::Debug,
    F: FnOnce() -> V,
{
    if let Some(found) = map.read().get(&key) {
        return Arc::clone(found);
    }

    debug!(?key, "noise cache miss");
    let built = Arc::new(build());

    let mut guard = map.write();
    let stored = guard.entry(key).or_insert_with(|| Arc::clone(&built));
    if !Arc::ptr_eq(stored, &built) {
        debug!(?key, "discarding duplicate build");
    }
    Arc::clone(stored)
}

impl std::fmt::Debug for NoiseCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NoiseCache")
            .field("tables", &self.table_count())
            .field("point_sets", &self.point_set_count())
            .finish()
    }
}
