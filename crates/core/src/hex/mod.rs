//! This module holds the types and math for addressing hexagon cells.
//!
//! ## Coordinate Systems
//!
//! ### Hex Coordinates
//!
//! Cells are stored on a plain rectangular lattice: each [HexPoint] is a
//! `(column, row)` pair of integers. To turn that lattice into hexagons, every
//! **odd** row is pushed half a cell to the right:
//!
//! ```text
//!  row 0:  (0,0) (1,0) (2,0)
//!  row 1:     (0,1) (1,1) (2,1)
//!  row 2:  (0,2) (1,2) (2,2)
//! ```
//!
//! Left and right neighbors are just `x ± 1`, but which columns touch a cell
//! diagonally depends on the parity of its row. From an even row, the cells
//! above are `x - 1` and `x`. From an odd row they're `x` and `x + 1`. That
//! parity dependence is encoded in one lookup table in [HexDirection], so
//! there's only one place it can go wrong.
//!
//! ### Chunk Coordinates
//!
//! The infinite grid is cut into fixed size rectangular chunks (32×64 cells by
//! default, see [ChunkDims]). Any hex point can be split into the chunk that
//! holds it ([ChunkPoint]) and its offset within that chunk ([LocalPoint]),
//! and put back together again. Negative coordinates work the same as
//! positive ones: `(-1, -1)` is in chunk `(-1, -1)`, at the bottom-right
//! corner of it.
//!
//! Since chunk height is even, every chunk starts on an even row, so local
//! row parity always matches global row parity.

mod chunk;
mod point;

pub use self::{chunk::*, point::*};
