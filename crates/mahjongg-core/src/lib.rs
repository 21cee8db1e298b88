//! Core data structures and rules for layered tile-matching solitaire.
//!
//! This crate models the board and answers the two questions every other
//! component asks: *which tiles can be picked up?* and *do these two tiles
//! form a pair?*
//!
//! # Overview
//!
//! 1. **Faces** - [`symbol`]: the 42-symbol universe and its matching groups.
//! 2. **Geometry** - [`position`]: grid cells, tile shapes and footprints,
//!    plus the derived scene coordinate of a tile.
//! 3. **Tiles and layouts** - [`tile`] and [`template`]: board templates
//!    and the tiles placed into them.
//! 4. **Rules** - [`grid`] and [`matching`]: the occupancy index,
//!    accessibility and pairing.
//!
//! # Examples
//!
//! ```
//! use mahjongg_core::{BoardTemplate, GridIndex, Symbol, can_match};
//!
//! let template: BoardTemplate = "
//!     111
//!     ---
//!     .1.
//! "
//! .parse()
//! .unwrap();
//! let tiles = template
//!     .instantiate([
//!         Symbol::season(1),
//!         Symbol::flower(1),
//!         Symbol::season(2),
//!         Symbol::flower(2),
//!     ])
//!     .unwrap();
//! let grid = GridIndex::new(&tiles);
//!
//! // The two seasons sit at the open ends of the bottom row.
//! assert!(can_match(&tiles[0], &tiles[2], &grid));
//! // The bottom flower is buried under the top one.
//! assert!(!can_match(&tiles[1], &tiles[3], &grid));
//! ```

pub mod grid;
pub mod matching;
pub mod position;
pub mod symbol;
pub mod template;
pub mod tile;

pub use self::{
    grid::{
        GridIndex, NeighborFlags, is_accessible, is_tile_accessible, neighbor_flags,
        refresh_accessibility,
    },
    matching::{can_match, symbols_match},
    position::{Footprint, GridPosition, TileShape, WorldPosition},
    symbol::{Category, Dragon, MatchGroup, ParseSymbolError, Suit, Symbol, Wind},
    template::{BoardTemplate, CellCode, Slot, TemplateError},
    tile::{Tile, TileId, TileRecordError},
};
