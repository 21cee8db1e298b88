//! Board coordinates and tile footprints.
//!
//! A tile sits on an integer lattice of `(col, layer, row)` cells. Most tiles
//! cover exactly one cell, but "split" tiles are drawn offset by half a cell
//! and therefore cover a small rectangle of cells. [`Footprint`] describes
//! that rectangle so that occlusion and side-neighbor checks can treat every
//! tile uniformly.

use std::fmt::{self, Display};

/// Integer board coordinate of a cell.
///
/// `layer` is the height index; layer 0 is the bottom (widest) layer.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct GridPosition {
    /// Column, growing to the right.
    pub col: i32,
    /// Height index.
    pub layer: i32,
    /// Row, growing towards the player.
    pub row: i32,
}

impl GridPosition {
    /// Creates a position from its column, layer and row.
    #[must_use]
    pub const fn new(col: i32, layer: i32, row: i32) -> Self {
        Self { col, layer, row }
    }

    /// Returns the position shifted by the given column and row deltas in the same layer.
    #[must_use]
    pub const fn offset(self, dcol: i32, drow: i32) -> Self {
        Self::new(self.col + dcol, self.layer, self.row + drow)
    }

    /// Returns the position directly above this one.
    #[must_use]
    pub const fn above(self) -> Self {
        Self::new(self.col, self.layer + 1, self.row)
    }
}

impl Display for GridPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.col, self.layer, self.row)
    }
}

/// Continuous scene coordinate of a tile.
///
/// Derived from the grid position and the tile shape; the rules never read it.
#[derive(Debug, Clone, Copy, PartialEq, Default, serde::Serialize, serde::Deserialize)]
pub struct WorldPosition {
    /// Horizontal axis.
    pub x: f32,
    /// Vertical axis (stack height).
    pub y: f32,
    /// Depth axis.
    pub z: f32,
}

impl WorldPosition {
    /// Distance between adjacent cells along each axis.
    pub const SPACING: Self = Self {
        x: 1.1,
        y: 0.52,
        z: 1.6,
    };

    /// Translation applied so that the classic board is centered on the origin.
    pub const CENTER_OFFSET: Self = Self {
        x: -8.4,
        y: 0.0,
        z: -5.6,
    };

    /// Computes the scene coordinate of a tile with the given shape at `pos`.
    #[must_use]
    #[expect(clippy::cast_precision_loss)]
    pub fn of(pos: GridPosition, shape: TileShape) -> Self {
        let (dx, dz) = shape.visual_offset();
        Self {
            x: (pos.col as f32 + dx) * Self::SPACING.x + Self::CENTER_OFFSET.x,
            y: pos.layer as f32 * Self::SPACING.y + Self::CENTER_OFFSET.y,
            z: (pos.row as f32 + dz) * Self::SPACING.z + Self::CENTER_OFFSET.z,
        }
    }
}

/// Geometric kind of a tile, matching the template cell codes 1-3.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    serde::Serialize,
    serde::Deserialize,
    derive_more::IsVariant,
)]
#[serde(rename_all = "camelCase")]
pub enum TileShape {
    /// A regular tile covering its own cell (code `1`).
    #[default]
    Full,
    /// A tile drawn half a row lower, covering its cell and the one below (code `2`).
    SplitDown,
    /// A tile drawn half a cell lower and to the right, covering a 2×2 block (code `3`).
    SplitDownRight,
}

impl TileShape {
    /// Returns `true` for shapes drawn off the cell lattice.
    #[must_use]
    pub fn is_split(self) -> bool {
        !self.is_full()
    }

    /// Returns the number of columns and rows covered.
    #[must_use]
    pub fn size(self) -> (u8, u8) {
        match self {
            Self::Full => (1, 1),
            Self::SplitDown => (1, 2),
            Self::SplitDownRight => (2, 2),
        }
    }

    fn visual_offset(self) -> (f32, f32) {
        match self {
            Self::Full => (0.0, 0.0),
            Self::SplitDown => (0.0, 0.5),
            Self::SplitDownRight => (0.5, 0.5),
        }
    }
}

/// The rectangle of cells occupied by one tile inside its layer.
///
/// # Examples
///
/// ```
/// use mahjongg_core::{Footprint, GridPosition, TileShape};
///
/// let fp = Footprint::new(GridPosition::new(7, 4, 3), TileShape::SplitDownRight);
/// assert_eq!(fp.cells().count(), 4);
/// assert!(fp.contains(GridPosition::new(8, 4, 4)));
/// assert!(!fp.contains(GridPosition::new(9, 4, 3)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Footprint {
    origin: GridPosition,
    width: i32,
    depth: i32,
}

impl Footprint {
    /// Creates the footprint of a tile with the given shape anchored at `origin`.
    #[must_use]
    pub fn new(origin: GridPosition, shape: TileShape) -> Self {
        let (width, depth) = shape.size();
        Self {
            origin,
            width: i32::from(width),
            depth: i32::from(depth),
        }
    }

    /// Returns the anchor (top-left) cell.
    #[must_use]
    pub fn origin(&self) -> GridPosition {
        self.origin
    }

    /// Returns the layer of the footprint.
    #[must_use]
    pub fn layer(&self) -> i32 {
        self.origin.layer
    }

    /// Iterates over every covered cell, row by row.
    pub fn cells(&self) -> impl Iterator<Item = GridPosition> + use<> {
        let Self {
            origin,
            width,
            depth,
        } = *self;
        (0..depth).flat_map(move |dr| (0..width).map(move |dc| origin.offset(dc, dr)))
    }

    /// Iterates over the cells of the layer above that rest on this footprint.
    pub fn cells_above(&self) -> impl Iterator<Item = GridPosition> + use<> {
        self.cells().map(GridPosition::above)
    }

    /// Iterates over the cells touching the left edge, one per covered row.
    pub fn left_edge(&self) -> impl Iterator<Item = GridPosition> + use<> {
        let origin = self.origin;
        (0..self.depth).map(move |dr| origin.offset(-1, dr))
    }

    /// Iterates over the cells touching the right edge, one per covered row.
    pub fn right_edge(&self) -> impl Iterator<Item = GridPosition> + use<> {
        let origin = self.origin;
        let width = self.width;
        (0..self.depth).map(move |dr| origin.offset(width, dr))
    }

    /// Returns `true` if `pos` is one of the covered cells.
    #[must_use]
    pub fn contains(&self, pos: GridPosition) -> bool {
        pos.layer == self.origin.layer
            && (self.origin.col..self.origin.col + self.width).contains(&pos.col)
            && (self.origin.row..self.origin.row + self.depth).contains(&pos.row)
    }

    /// Returns `true` if both footprints are in the same layer and share a cell.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.origin.layer == other.origin.layer
            && self.origin.col < other.origin.col + other.width
            && other.origin.col < self.origin.col + self.width
            && self.origin.row < other.origin.row + other.depth
            && other.origin.row < self.origin.row + self.depth
    }

    /// Returns `true` if `upper` lies in the next layer and covers any cell above this footprint.
    #[must_use]
    pub fn is_covered_by(&self, upper: &Self) -> bool {
        let mut lifted = *self;
        lifted.origin = self.origin.above();
        lifted.overlaps(upper)
    }
}
