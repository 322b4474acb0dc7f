use crate::{
    config::Interpolation,
    noise::lattice::{CellFactory, LatticeCache},
};
use fnv::FnvHasher;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64;
use std::hash::Hasher;

/// Hash a lattice point and seed into the state for its RNG. Every integer
/// is fed to the hasher as little-endian bytes, so the result doesn't depend
/// on the target's byte order.
fn lattice_hash(x: i64, y: i64, seed: u64) -> u64 {
    let mut hasher = FnvHasher::default();
    hasher.write(&x.to_le_bytes());
    hasher.write(&y.to_le_bytes());
    hasher.write(&seed.to_le_bytes());
    hasher.finish()
}

/// Get the raw value of a noise lattice point, in `[0, 1)`. This is a pure
/// function: the same point and seed always give the same value, on any
/// machine, so lattice caches can be thrown away and rebuilt at will.
pub fn lattice_value(x: i64, y: i64, seed: u64) -> f64 {
    // FNV alone is a poor mixer for small neighboring inputs, so the hash
    // just seeds a proper RNG
    Pcg64::seed_from_u64(lattice_hash(x, y, seed)).gen()
}

/// [CellFactory] that fills a lattice cache via [lattice_value]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct LatticeHash {
    pub seed: u64,
}

impl CellFactory<f64> for LatticeHash {
    fn create(&self, x: i64, y: i64) -> f64 {
        lattice_value(x, y, self.seed)
    }
}

/// One octave of value noise. Lattice points are spaced `zoom` apart, and
/// each sample is interpolated from the four lattice points around it.
/// Lattice values are memoized in a cache owned by the layer.
#[derive(Debug)]
pub struct NoiseLayer {
    zoom: f64,
    amplitude: f64,
    interpolation: Interpolation,
    cache: LatticeCache<f64, LatticeHash>,
}

impl NoiseLayer {
    /// Create a layer. `zoom` and `amplitude` should both be positive, which
    /// [NoiseConfig](crate::NoiseConfig) validation enforces.
    pub fn new(
        seed: u64,
        zoom: f64,
        amplitude: f64,
        interpolation: Interpolation,
    ) -> Self {
        Self {
            zoom,
            amplitude,
            interpolation,
            cache: LatticeCache::new(LatticeHash { seed }),
        }
    }

    pub fn seed(&self) -> u64 {
        self.cache.factory().seed
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn amplitude(&self) -> f64 {
        self.amplitude
    }

    /// Number of lattice points this layer has computed so far
    pub fn cached_points(&self) -> usize {
        self.cache.len()
    }

    /// Sample the layer at a point. Output is in `[0, amplitude)`.
    ///
    /// Lattice coordinates are 64-bit, so the field doesn't repeat or flatten
    /// out anywhere an `f64` can still tell neighboring lattice points apart.
    pub fn sample(&self, x: f64, y: f64) -> f64 {
        // Scale into lattice space
        let zx = x / self.zoom;
        let zy = y / self.zoom;
        let flx = zx.floor();
        let fly = zy.floor();
        let p = zx - flx;
        let q = zy - fly;

        // Casts saturate past the i64 range, where f64 has no fraction left
        // and all four corners may as well be the same point
        let lx = flx as i64;
        let ly = fly as i64;
        let (nx, ny) = (lx.saturating_add(1), ly.saturating_add(1));
        let aa = self.cache.get(lx, ly);
        let ba = self.cache.get(nx, ly);
        let ab = self.cache.get(lx, ny);
        let bb = self.cache.get(nx, ny);

        let mix = |a, b, t| self.interpolation.mix(a, b, t);
        self.amplitude * mix(mix(aa, ba, p), mix(ab, bb, p), q)
    }
}
