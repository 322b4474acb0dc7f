//! Hexmap is the coordinate and terrain math behind a hex-tiled, infinitely
//! scrolling map. It has two halves:
//!
//! - **Noise**: deterministic layered value noise, used to generate height
//!   fields of any size. See [NoiseGenerator].
//! - **Hex grid**: addressing of hex cells stored on a rectangular lattice
//!   (neighbors, rings, chunk decomposition) and projection of map points onto
//!   the screen, including the inverse "what cell is under the cursor?". See
//!   [HexPoint], [ChunkDims] and [Projection].
//!
//! ```
//! use hexmap::{HexPoint, NoiseConfig, NoiseGenerator};
//!
//! let noise = NoiseGenerator::from_config(&NoiseConfig::default()).unwrap();
//! let height = noise.sample(3.5, -2.25);
//! assert!((0.0..=1.0).contains(&height));
//!
//! let ring = HexPoint::new(4, 7).hex_ring(2);
//! assert_eq!(ring.len(), 12);
//! ```
//!
//! Everything here is a pure function of its inputs (the noise lattice cache
//! is just memoization), so chunk loading, meshing and rendering live
//! elsewhere and call in.

mod config;
mod hex;
mod noise;
mod projection;
mod util;

pub use crate::{
    config::{seed::Seed, Interpolation, LayerConfig, NoiseConfig},
    hex::{ChunkDims, ChunkPoint, HexDirection, HexPoint, HexVec, LocalPoint},
    noise::{
        lattice::{CellFactory, LatticeCache},
        layer::{lattice_value, LatticeHash, NoiseLayer},
        NoiseGenerator,
    },
    projection::{
        pick::{FlatTerrain, HeightSource, ScaledNoise},
        sun_direction, Camera, MapPoint, Projection, ScreenPoint, Viewport,
        WorldPoint,
    },
};
