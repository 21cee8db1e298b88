use crate::{Footprint, GridPosition, Symbol, TileShape, WorldPosition};

/// Stable identifier of a tile, unique within a board.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    serde::Serialize,
    serde::Deserialize,
    derive_more::Display,
)]
#[serde(transparent)]
pub struct TileId(String);

impl TileId {
    /// Creates the identifier of the `serial`-th tile placed on a board, on `layer`.
    #[must_use]
    pub fn new(serial: usize, layer: i32) -> Self {
        Self(format!("tile-{serial}-L{layer}"))
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TileId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

/// A tile on the board: immutable identity plus mutable play state.
///
/// Removal is permanent: there is no way to bring a removed tile back other
/// than replacing the whole tile set (as an undo does).
///
/// The serialized form uses camelCase field names (`gridPosition`,
/// `isRemoved`, ...) so that session snapshots keep one stable shape.
///
/// # Examples
///
/// ```
/// use mahjongg_core::{GridPosition, Symbol, Tile, TileId, TileShape, Wind};
///
/// let mut tile = Tile::new(
///     TileId::new(0, 1),
///     Symbol::wind(Wind::East),
///     GridPosition::new(5, 1, 2),
///     TileShape::Full,
/// );
/// assert_eq!(tile.layer(), 1);
/// assert!(!tile.is_removed());
///
/// tile.mark_removed();
/// assert!(tile.is_removed());
/// ```
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase", try_from = "TileRecord")]
pub struct Tile {
    id: TileId,
    symbol: Symbol,
    grid_position: GridPosition,
    #[serde(default)]
    shape: TileShape,
    world_position: WorldPosition,
    layer: i32,
    is_selected: bool,
    is_removed: bool,
    is_accessible: bool,
}

impl Tile {
    /// Creates a fresh tile: not selected, not removed, accessibility not yet computed.
    #[must_use]
    pub fn new(id: TileId, symbol: Symbol, grid_position: GridPosition, shape: TileShape) -> Self {
        Self {
            id,
            symbol,
            grid_position,
            shape,
            world_position: WorldPosition::of(grid_position, shape),
            layer: grid_position.layer,
            is_selected: false,
            is_removed: false,
            is_accessible: false,
        }
    }

    /// Returns the tile identifier.
    #[must_use]
    pub fn id(&self) -> &TileId {
        &self.id
    }

    /// Returns the tile face.
    #[must_use]
    pub fn symbol(&self) -> Symbol {
        self.symbol
    }

    /// Returns the anchor cell of the tile.
    #[must_use]
    pub fn grid_position(&self) -> GridPosition {
        self.grid_position
    }

    /// Returns the tile shape.
    #[must_use]
    pub fn shape(&self) -> TileShape {
        self.shape
    }

    /// Returns the cells occupied by the tile.
    #[must_use]
    pub fn footprint(&self) -> Footprint {
        Footprint::new(self.grid_position, self.shape)
    }

    /// Returns the scene coordinate of the tile.
    #[must_use]
    pub fn world_position(&self) -> WorldPosition {
        self.world_position
    }

    /// Returns the height index of the tile.
    #[must_use]
    pub fn layer(&self) -> i32 {
        self.layer
    }

    /// Returns `true` if the tile is the current selection.
    #[must_use]
    pub fn is_selected(&self) -> bool {
        self.is_selected
    }

    /// Returns `true` once the tile has been matched and cleared.
    #[must_use]
    pub fn is_removed(&self) -> bool {
        self.is_removed
    }

    /// Returns the last computed accessibility.
    ///
    /// This is a cache written by [`refresh_accessibility`](crate::refresh_accessibility);
    /// [`neighbor_flags`](crate::neighbor_flags) is the source of truth.
    #[must_use]
    pub fn is_accessible(&self) -> bool {
        self.is_accessible
    }

    /// Marks the tile as removed. Removal also drops the selection.
    pub fn mark_removed(&mut self) {
        self.is_removed = true;
        self.is_selected = false;
        self.is_accessible = false;
    }

    /// Sets or clears the selection flag.
    pub fn set_selected(&mut self, selected: bool) {
        self.is_selected = selected;
    }

    /// Stores a freshly computed accessibility flag.
    pub fn set_accessible(&mut self, accessible: bool) {
        self.is_accessible = accessible;
    }
}

/// Error raised when a serialized tile contradicts itself.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum TileRecordError {
    /// The stored layer differs from the layer of the grid position.
    #[display("tile {id} is stored on layer {layer} but positioned on layer {grid_layer}")]
    LayerMismatch {
        /// The tile.
        id: TileId,
        /// The stored `layer` field.
        layer: i32,
        /// The layer of `gridPosition`.
        grid_layer: i32,
    },
}

/// Serialized shape of a [`Tile`]; `layer` may be omitted.
#[derive(serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct TileRecord {
    id: TileId,
    symbol: Symbol,
    grid_position: GridPosition,
    #[serde(default)]
    shape: TileShape,
    world_position: WorldPosition,
    #[serde(default)]
    layer: Option<i32>,
    is_selected: bool,
    is_removed: bool,
    is_accessible: bool,
}

impl TryFrom<TileRecord> for Tile {
    type Error = TileRecordError;

    fn try_from(record: TileRecord) -> Result<Self, Self::Error> {
        let grid_layer = record.grid_position.layer;
        let layer = record.layer.unwrap_or(grid_layer);
        if layer != grid_layer {
            return Err(TileRecordError::LayerMismatch {
                id: record.id,
                layer,
                grid_layer,
            });
        }
        Ok(Self {
            id: record.id,
            symbol: record.symbol,
            grid_position: record.grid_position,
            shape: record.shape,
            world_position: record.world_position,
            layer,
            is_selected: record.is_selected,
            is_removed: record.is_removed,
            is_accessible: record.is_accessible,
        })
    }
}
