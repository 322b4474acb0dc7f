use crate::hex::HexPoint;
use derive_more::Display;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Position of a chunk in the grid of chunks. Chunk `(0, 0)` holds hex points
/// `[0, width) × [0, height)`.
#[derive(
    Copy,
    Clone,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    Display,
    Serialize,
    Deserialize,
)]
#[display(fmt = "chunk ({}, {})", x, y)]
pub struct ChunkPoint {
    pub x: i32,
    pub y: i32,
}

/// Position of a hex point relative to the corner of its chunk. Components are
/// always in `[0, width) × [0, height)` when produced by [ChunkDims].
#[derive(
    Copy,
    Clone,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    Display,
    Serialize,
    Deserialize,
)]
#[display(fmt = "local ({}, {})", x, y)]
pub struct LocalPoint {
    pub x: i32,
    pub y: i32,
}

/// Size of a chunk, in cells. Chunk meshes are built over the **vertex**
/// grid, which has one more column and one more row than the cell grid.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct ChunkDims {
    #[validate(range(min = 1))]
    pub width: i32,
    /// Should be even, so that every chunk starts on an even row
    #[validate(range(min = 1))]
    pub height: i32,
}

impl ChunkDims {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Which chunk holds a point. Rounds towards negative infinity, so
    /// `(-1, -1)` is in chunk `(-1, -1)`, not `(0, 0)`.
    pub fn chunk_point(&self, point: HexPoint) -> ChunkPoint {
        ChunkPoint {
            x: point.x().div_euclid(self.width),
            y: point.y().div_euclid(self.height),
        }
    }

    /// Where a point is within its chunk. This is a true modulo, so the
    /// result is never negative.
    pub fn local_point(&self, point: HexPoint) -> LocalPoint {
        LocalPoint {
            x: point.x().rem_euclid(self.width),
            y: point.y().rem_euclid(self.height),
        }
    }

    /// Put a chunk position and a local position back together. This is the
    /// inverse of [Self::chunk_point] + [Self::local_point].
    pub fn global_point(
        &self,
        chunk: ChunkPoint,
        local: LocalPoint,
    ) -> HexPoint {
        HexPoint::new(
            chunk.x * self.width + local.x,
            chunk.y * self.height + local.y,
        )
    }

    /// Split a point into chunk and local positions in one go
    pub fn split(&self, point: HexPoint) -> (ChunkPoint, LocalPoint) {
        (self.chunk_point(point), self.local_point(point))
    }

    /// Index of a local **vertex** in a row-major vertex buffer. Rows are
    /// [Self::vertex_row_len] long, one longer than the chunk is wide.
    pub fn linear_local(&self, local: LocalPoint) -> usize {
        (local.x + local.y * self.vertex_row_len()) as usize
    }

    /// Vertices per row. `width` cells are bounded by `width + 1` vertices.
    pub fn vertex_row_len(&self) -> i32 {
        self.width + 1
    }

    /// Rows of vertices, `height + 1`
    pub fn vertex_rows(&self) -> i32 {
        self.height + 1
    }

    pub fn vertex_count(&self) -> usize {
        (self.vertex_row_len() * self.vertex_rows()) as usize
    }

    /// Each cell-row of the vertex grid holds two triangles per column
    pub fn triangles_per_row(&self) -> i32 {
        self.width * 2
    }

    pub fn triangle_rows(&self) -> i32 {
        self.height
    }

    pub fn triangle_count(&self) -> usize {
        (self.triangles_per_row() * self.triangle_rows()) as usize
    }

    /// Number of indices needed to draw the chunk as one triangle strip.
    /// Every row gets two extra indices on each end for the degenerate
    /// triangles that stitch rows together, minus the two not needed after
    /// the last row.
    pub fn strip_index_count(&self) -> usize {
        ((self.triangles_per_row() + 4) * self.triangle_rows() - 2) as usize
    }
}

impl Default for ChunkDims {
    fn default() -> Self {
        Self::new(32, 64)
    }
}
