use mahjongg_core::TileId;

/// Errors that can occur while creating or driving a [`Game`](crate::Game).
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum GameError {
    /// No tile on the board has this id.
    #[display("unknown tile {id}")]
    UnknownTile {
        /// The requested id.
        id: TileId,
    },
    /// Two tiles share an id.
    #[display("duplicate tile id {id}")]
    DuplicateTileId {
        /// The repeated id.
        id: TileId,
    },
    /// More than one live tile is marked selected.
    #[display("tiles {first} and {second} are both selected")]
    MultipleSelected {
        /// The first selected tile.
        first: TileId,
        /// Another selected tile.
        second: TileId,
    },
}
