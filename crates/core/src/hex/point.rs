use derive_more::{Add, AddAssign, Display};
use serde::{Deserialize, Serialize};
use std::ops;
use strum::{EnumIter, IntoEnumIterator};

/// A cell in the hex grid, addressed by column (`x`) and row (`y`). See the
/// module-level docs for how rows are offset.
#[derive(
    Copy,
    Clone,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Display,
    Serialize,
    Deserialize,
)]
#[display(fmt = "({}, {})", x, y)]
pub struct HexPoint {
    x: i32,
    y: i32,
}

impl HexPoint {
    pub const ORIGIN: Self = Self::new(0, 0);

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Column
    pub fn x(&self) -> i32 {
        self.x
    }

    /// Row
    pub fn y(&self) -> i32 {
        self.y
    }

    /// 0 for even rows, 1 for odd rows (including negative ones)
    pub fn row_parity(&self) -> usize {
        self.y.rem_euclid(2) as usize
    }

    /// Get the neighboring cell in the given direction
    pub fn adjacent(self, direction: HexDirection) -> Self {
        self + direction.offset(self.row_parity())
    }

    pub fn left(self) -> Self {
        self.adjacent(HexDirection::Left)
    }

    pub fn right(self) -> Self {
        self.adjacent(HexDirection::Right)
    }

    pub fn left_up(self) -> Self {
        self.adjacent(HexDirection::LeftUp)
    }

    pub fn right_up(self) -> Self {
        self.adjacent(HexDirection::RightUp)
    }

    pub fn left_down(self) -> Self {
        self.adjacent(HexDirection::LeftDown)
    }

    pub fn right_down(self) -> Self {
        self.adjacent(HexDirection::RightDown)
    }

    /// One row up on the underlying **lattice**, with no parity correction.
    /// This is not a hex neighbor! It's for addressing the vertex grid, where
    /// columns line up vertically.
    pub fn up(self) -> Self {
        Self::new(self.x, self.y - 1)
    }

    /// One row down on the lattice. See [Self::up].
    pub fn down(self) -> Self {
        Self::new(self.x, self.y + 1)
    }

    /// Get an iterator of all the cells directly adjacent to this one, in
    /// [HexDirection] order. The iterator will always contain exactly 6
    /// values.
    pub fn adjacents(self) -> impl Iterator<Item = HexPoint> {
        HexDirection::iter().map(move |dir| self.adjacent(dir))
    }

    /// All six neighbors in [HexDirection] order: left, right, left-up,
    /// right-up, left-down, right-down. Mesh winding relies on this order.
    pub fn all_adjacent(self) -> [HexPoint; 6] {
        HexDirection::ALL.map(|dir| self.adjacent(dir))
    }

    /// Number of steps between two cells, moving only between neighbors
    pub fn distance_to(self, other: HexPoint) -> u32 {
        let (q1, r1) = self.axial();
        let (q2, r2) = other.axial();
        let dq = q1 - q2;
        let dr = r1 - r2;
        ((dq.abs() + dr.abs() + (dq + dr).abs()) / 2) as u32
    }

    /// Convert offset coordinates to axial coordinates, where the hex
    /// distance formula is simple.
    fn axial(self) -> (i32, i32) {
        let parity = self.y.rem_euclid(2);
        (self.x - (self.y - parity) / 2, self.y)
    }

    /// Get every cell that is exactly `size` steps away from this one. For
    /// size 0 that's just this cell, otherwise it's `6 * size` cells.
    ///
    /// Cells are emitted in a fixed spiral order: walk `size` steps out along
    /// each of the six directions to find the ring's corners, then walk all
    /// six sides at once, one cell per side per step. Every cell appears
    /// exactly once.
    pub fn hex_ring(self, size: u32) -> Vec<HexPoint> {
        if size == 0 {
            return vec![self];
        }

        let mut corners = RING_SIDES.map(|(spoke, _)| {
            (0..size).fold(self, |point, _| point.adjacent(spoke))
        });

        let mut ring = Vec::with_capacity(6 * size as usize);
        for _ in 0..size {
            for (corner, (_, side)) in corners.iter_mut().zip(RING_SIDES.iter())
            {
                ring.push(*corner);
                *corner = corner.adjacent(*side);
            }
        }
        ring
    }

    /// Get every cell within `radius` steps of this one, ordered ring by ring
    /// from the inside out. This is the order areas should be loaded in when
    /// expanding outward from a point. Always contains `3r² + 3r + 1` cells.
    pub fn hex_area(self, radius: u32) -> Vec<HexPoint> {
        (0..=radius).flat_map(|size| self.hex_ring(size)).collect()
    }
}

impl ops::Add<HexVec> for HexPoint {
    type Output = HexPoint;

    fn add(self, rhs: HexVec) -> Self::Output {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

/// An offset between two [HexPoint]s. Only meaningful for a known row parity,
/// since the same offset can lead to different hex neighbors from even and
/// odd rows.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Display, Add, AddAssign)]
#[display(fmt = "({}, {})", x, y)]
pub struct HexVec {
    x: i32,
    y: i32,
}

impl HexVec {
    pub const ZERO: Self = Self::new(0, 0);

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn x(&self) -> i32 {
        self.x
    }

    pub fn y(&self) -> i32 {
        self.y
    }
}

/// The six directions to a neighboring cell. **Variant order matters**: it is
/// the canonical neighbor order used by [HexPoint::all_adjacent].
#[derive(
    Copy, Clone, Debug, PartialEq, Eq, Hash, EnumIter, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum HexDirection {
    Left,
    Right,
    LeftUp,
    RightUp,
    LeftDown,
    RightDown,
}

/// Neighbor offsets, indexed by row parity then by direction
const OFFSETS: [[HexVec; 6]; 2] = [
    // Even rows
    [
        HexVec::new(-1, 0),
        HexVec::new(1, 0),
        HexVec::new(-1, -1),
        HexVec::new(0, -1),
        HexVec::new(-1, 1),
        HexVec::new(0, 1),
    ],
    // Odd rows
    [
        HexVec::new(-1, 0),
        HexVec::new(1, 0),
        HexVec::new(0, -1),
        HexVec::new(1, -1),
        HexVec::new(0, 1),
        HexVec::new(1, 1),
    ],
];

/// For each side of a hex ring: the direction walked from the center to find
/// that side's starting corner, and the direction walked along the side.
/// Sides are listed in the order their cells get emitted.
const RING_SIDES: [(HexDirection, HexDirection); 6] = [
    (HexDirection::Left, HexDirection::RightUp),
    (HexDirection::LeftUp, HexDirection::Right),
    (HexDirection::RightUp, HexDirection::RightDown),
    (HexDirection::Right, HexDirection::LeftDown),
    (HexDirection::RightDown, HexDirection::Left),
    (HexDirection::LeftDown, HexDirection::LeftUp),
];

impl HexDirection {
    /// Every direction, in canonical order
    pub const ALL: [Self; 6] = [
        Self::Left,
        Self::Right,
        Self::LeftUp,
        Self::RightUp,
        Self::LeftDown,
        Self::RightDown,
    ];

    /// The lattice offset to step in this direction from a row with the
    /// given parity (0 = even, 1 = odd)
    pub fn offset(self, row_parity: usize) -> HexVec {
        OFFSETS[row_parity & 1][self as usize]
    }

    /// The direction pointing back the way this one came
    pub fn opposite(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
            Self::LeftUp => Self::RightDown,
            Self::RightUp => Self::LeftDown,
            Self::LeftDown => Self::RightUp,
            Self::RightDown => Self::LeftUp,
        }
    }
}
