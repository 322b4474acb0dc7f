use fnv::FnvHashMap;
use log::trace;
use parking_lot::RwLock;
use std::fmt::{self, Debug};

/// Something that can produce the value for a lattice cell on demand. This is
/// implemented for any `Fn(i64, i64) -> T`, but implementing it on a named
/// type keeps the cache's type nameable (and `Debug`).
pub trait CellFactory<T> {
    fn create(&self, x: i64, y: i64) -> T;
}

impl<T, F: Fn(i64, i64) -> T> CellFactory<T> for F {
    fn create(&self, x: i64, y: i64) -> T {
        self(x, y)
    }
}

/// An infinite, sparse 2D table. Each cell is computed by the factory the
/// first time it's requested, then kept forever. Nothing is ever evicted, so
/// memory grows with the area that's been sampled. That's fine as long as
/// lookups stay spatially local, which they do for terrain around a player.
///
/// The cache is safe to share between threads. Two threads missing on the
/// same cell at the same time may both run the factory, but only the first
/// result is stored. The factory is expected to be pure, so that's a bit of
/// wasted work and nothing more.
pub struct LatticeCache<T, F> {
    cells: RwLock<FnvHashMap<(i64, i64), T>>,
    factory: F,
}

impl<T: Copy, F: CellFactory<T>> LatticeCache<T, F> {
    pub fn new(factory: F) -> Self {
        Self {
            cells: RwLock::new(FnvHashMap::default()),
            factory,
        }
    }

    /// Get the value of a cell, creating it if this is the first access
    pub fn get(&self, x: i64, y: i64) -> T {
        if let Some(value) = self.cells.read().get(&(x, y)) {
            return *value;
        }

        // Computed outside the write lock, so a slow factory doesn't block
        // readers of other cells
        let value = self.factory.create(x, y);
        trace!("Lattice cache miss at ({}, {})", x, y);
        *self.cells.write().entry((x, y)).or_insert(value)
    }
}

impl<T, F> LatticeCache<T, F> {
    /// Number of cells that have been computed so far
    pub fn len(&self) -> usize {
        self.cells.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn factory(&self) -> &F {
        &self.factory
    }
}

impl<T, F: Debug> Debug for LatticeCache<T, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LatticeCache")
            .field("len", &self.len())
            .field("factory", &self.factory)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_factory_called_once_per_cell() {
        let calls = AtomicUsize::new(0);
        let cache: LatticeCache<i64, _> =
            LatticeCache::new(|x: i64, y: i64| {
                calls.fetch_add(1, Ordering::SeqCst);
                x * 100 + y
            });
        assert!(cache.is_empty());

        assert_eq!(cache.get(3, 4), 304);
        assert_eq!(cache.get(3, 4), 304);
        assert_eq!(cache.get(-2, 7), -193);
        assert_eq!(cache.get(3, 4), 304);

        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_negative_keys_are_distinct() {
        let cache: LatticeCache<(i64, i64), _> =
            LatticeCache::new(|x: i64, y: i64| (x, y));
        assert_eq!(cache.get(-1, 1), (-1, 1));
        assert_eq!(cache.get(1, -1), (1, -1));
        assert_eq!(cache.get(-1, -1), (-1, -1));
        assert_eq!(cache.len(), 3);
    }

    #[test]
    fn test_shared_between_threads() {
        let cache: LatticeCache<f64, _> =
            LatticeCache::new(|x: i64, y: i64| (x - y) as f64);
        std::thread::scope(|scope| {
            for _ in 0..4 {
                scope.spawn(|| {
                    for x in 0..16 {
                        assert_eq!(cache.get(x, 1), (x - 1) as f64);
                    }
                });
            }
        });
        assert_eq!(cache.len(), 16);
    }
}
