//! Cell occupancy index and the accessibility rules built on it.
//!
//! [`GridIndex`] maps every cell covered by a live (non-removed) tile to the
//! index of that tile in the caller's tile slice. It is a derived structure:
//! after tiles are removed it must be rebuilt with [`GridIndex::new`] or
//! updated with [`GridIndex::remove`] before the next accessibility or move
//! query, otherwise removed tiles keep blocking their neighbors.
//!
//! A tile is *accessible* when nothing rests on it and at least one of its
//! horizontal sides is free. Both checks go through the tile's
//! [`Footprint`](crate::Footprint), so split tiles block (and are blocked
//! through) every cell they cover.

use std::collections::HashMap;

use tinyvec::TinyVec;

use crate::{GridPosition, Tile};

/// Occupancy of the board cells by live tiles.
///
/// # Examples
///
/// ```
/// use mahjongg_core::{BoardTemplate, GridIndex, GridPosition, Symbol};
///
/// let template: BoardTemplate = "11".parse().unwrap();
/// let mut tiles = template
///     .instantiate([Symbol::season(1), Symbol::season(2)])
///     .unwrap();
///
/// let grid = GridIndex::new(&tiles);
/// assert_eq!(grid.lookup(GridPosition::new(1, 0, 0)), Some(1));
///
/// tiles[1].mark_removed();
/// let grid = GridIndex::new(&tiles);
/// assert_eq!(grid.lookup(GridPosition::new(1, 0, 0)), None);
/// assert_eq!(grid.len(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GridIndex {
    cells: HashMap<GridPosition, TinyVec<[usize; 2]>>,
    len: usize,
}

impl GridIndex {
    /// Builds the index over the non-removed tiles of `tiles`.
    #[must_use]
    pub fn new(tiles: &[Tile]) -> Self {
        let mut index = Self {
            cells: HashMap::with_capacity(tiles.len()),
            len: 0,
        };
        for (i, tile) in tiles.iter().enumerate() {
            if tile.is_removed() {
                continue;
            }
            for cell in tile.footprint().cells() {
                index.cells.entry(cell).or_default().push(i);
            }
            index.len += 1;
        }
        index
    }

    /// Returns the number of indexed tiles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if no tile is indexed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the indices of all tiles covering `pos`.
    #[must_use]
    pub fn tiles_at(&self, pos: GridPosition) -> &[usize] {
        self.cells.get(&pos).map_or(&[], |tiles| tiles.as_slice())
    }

    /// Returns the index of a tile covering `pos`, if any.
    #[must_use]
    pub fn lookup(&self, pos: GridPosition) -> Option<usize> {
        self.tiles_at(pos).first().copied()
    }

    /// Returns `true` if a live tile covers `pos`.
    #[must_use]
    pub fn is_occupied(&self, pos: GridPosition) -> bool {
        !self.tiles_at(pos).is_empty()
    }

    /// Drops the tile at `index` (whose data is `tile`) from the index.
    ///
    /// Equivalent to rebuilding the index after marking that tile removed.
    /// Removing a tile that is not indexed does nothing.
    pub fn remove(&mut self, index: usize, tile: &Tile) {
        let mut found = false;
        for cell in tile.footprint().cells() {
            let Some(occupants) = self.cells.get_mut(&cell) else {
                continue;
            };
            if let Some(i) = occupants.iter().position(|&occupant| occupant == index) {
                occupants.remove(i);
                found = true;
            }
            if occupants.is_empty() {
                self.cells.remove(&cell);
            }
        }
        if found {
            self.len -= 1;
        }
    }
}

bitflags::bitflags! {
    /// Occupied surroundings of a tile.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct NeighborFlags: u8 {
        /// A live tile in the next layer covers part of the footprint.
        const TOP = 1;
        /// A live tile touches the left edge.
        const LEFT = 1 << 1;
        /// A live tile touches the right edge.
        const RIGHT = 1 << 2;
    }
}

impl NeighborFlags {
    /// Returns `true` if the flags describe a selectable tile.
    ///
    /// The tile must be uncovered and free on at least one horizontal side.
    #[must_use]
    pub fn is_accessible(self) -> bool {
        !self.contains(Self::TOP) && !self.contains(Self::LEFT | Self::RIGHT)
    }
}

/// Computes the occupied surroundings of `tile` from `grid`.
///
/// `TOP` is set when any cell above the footprint is occupied; `LEFT` and
/// `RIGHT` when any cell just past the left or right edge of the footprint
/// (in any covered row) is occupied.
#[must_use]
pub fn neighbor_flags(tile: &Tile, grid: &GridIndex) -> NeighborFlags {
    let footprint = tile.footprint();
    let mut flags = NeighborFlags::empty();
    if footprint.cells_above().any(|pos| grid.is_occupied(pos)) {
        flags |= NeighborFlags::TOP;
    }
    if footprint.left_edge().any(|pos| grid.is_occupied(pos)) {
        flags |= NeighborFlags::LEFT;
    }
    if footprint.right_edge().any(|pos| grid.is_occupied(pos)) {
        flags |= NeighborFlags::RIGHT;
    }
    flags
}

/// Returns `true` if `flags` describe a selectable tile.
#[must_use]
pub fn is_accessible(flags: NeighborFlags) -> bool {
    flags.is_accessible()
}

/// Returns `true` if `tile` is live and selectable under `grid`.
#[must_use]
pub fn is_tile_accessible(tile: &Tile, grid: &GridIndex) -> bool {
    !tile.is_removed() && neighbor_flags(tile, grid).is_accessible()
}

/// Recomputes the cached accessibility flag of every tile.
pub fn refresh_accessibility(tiles: &mut [Tile], grid: &GridIndex) {
    for tile in tiles {
        let accessible = is_tile_accessible(tile, grid);
        tile.set_accessible(accessible);
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::{BoardTemplate, Symbol, TileId, TileShape};

    fn tiles_of(template: &str) -> Vec<Tile> {
        let template: BoardTemplate = template.parse().unwrap();
        let symbols = vec![Symbol::season(1); template.slot_count()];
        template.instantiate(symbols).unwrap()
    }

    fn flags_at(tiles: &[Tile], grid: &GridIndex, pos: GridPosition) -> NeighborFlags {
        let tile = tiles
            .iter()
            .find(|tile| tile.grid_position() == pos)
            .unwrap();
        neighbor_flags(tile, grid)
    }

    #[test]
    fn test_accessibility_truth_table() {
        assert!(is_accessible(NeighborFlags::empty()));
        assert!(is_accessible(NeighborFlags::LEFT));
        assert!(is_accessible(NeighborFlags::RIGHT));
        assert!(!is_accessible(NeighborFlags::LEFT | NeighborFlags::RIGHT));
        assert!(!is_accessible(NeighborFlags::TOP));
        assert!(!is_accessible(NeighborFlags::TOP | NeighborFlags::LEFT));
        assert!(!is_accessible(NeighborFlags::all()));
    }

    #[test]
    fn test_row_of_three_pinches_middle() {
        let tiles = tiles_of("111");
        let grid = GridIndex::new(&tiles);
        let origin = GridPosition::new(0, 0, 0);

        assert_eq!(flags_at(&tiles, &grid, origin), NeighborFlags::RIGHT);
        assert_eq!(
            flags_at(&tiles, &grid, origin.offset(1, 0)),
            NeighborFlags::LEFT | NeighborFlags::RIGHT
        );
        assert_eq!(
            flags_at(&tiles, &grid, origin.offset(2, 0)),
            NeighborFlags::LEFT
        );
    }

    #[test]
    fn test_tile_above_blocks() {
        let tiles = tiles_of("11\n---\n1.");
        let grid = GridIndex::new(&tiles);
        let flags = flags_at(&tiles, &grid, GridPosition::new(0, 0, 0));
        assert!(flags.contains(NeighborFlags::TOP));
        assert!(!flags.is_accessible());
        let flags = flags_at(&tiles, &grid, GridPosition::new(1, 0, 0));
        assert!(!flags.contains(NeighborFlags::TOP));
        assert!(flags.is_accessible());
    }

    #[test]
    fn test_split_tile_above_blocks_every_covered_cell() {
        let tiles = tiles_of("111\n111\n111\n---\n3..\n...");
        let grid = GridIndex::new(&tiles);
        for (col, row) in [(0, 0), (1, 0), (0, 1), (1, 1)] {
            let flags = flags_at(&tiles, &grid, GridPosition::new(col, 0, row));
            assert!(flags.contains(NeighborFlags::TOP), "({col}, {row})");
        }
        for (col, row) in [(2, 0), (2, 1), (0, 2), (2, 2)] {
            let flags = flags_at(&tiles, &grid, GridPosition::new(col, 0, row));
            assert!(!flags.contains(NeighborFlags::TOP), "({col}, {row})");
        }
    }

    #[test]
    fn test_split_tile_touches_both_rows_beside_it() {
        let tiles = tiles_of("21\n.1");
        let grid = GridIndex::new(&tiles);
        let lower = flags_at(&tiles, &grid, GridPosition::new(1, 0, 1));
        assert_eq!(lower, NeighborFlags::LEFT);
        let split = flags_at(&tiles, &grid, GridPosition::new(0, 0, 0));
        assert_eq!(split, NeighborFlags::RIGHT);
    }

    #[test]
    fn test_stale_index_keeps_blocking_until_rebuilt() {
        let mut tiles = tiles_of("1\n---\n1");
        let stale = GridIndex::new(&tiles);
        tiles[1].mark_removed();

        assert!(!is_tile_accessible(&tiles[0], &stale));
        let fresh = GridIndex::new(&tiles);
        assert!(is_tile_accessible(&tiles[0], &fresh));
        assert!(!is_tile_accessible(&tiles[1], &fresh));
    }

    #[test]
    fn test_incremental_remove_matches_rebuild() {
        let mut tiles = tiles_of("2111\n.111\n---\n.3\n..");
        let mut grid = GridIndex::new(&tiles);
        for i in [0, 7, 3] {
            tiles[i].mark_removed();
            grid.remove(i, &tiles[i]);
            assert_eq!(grid, GridIndex::new(&tiles));
        }
        grid.remove(0, &tiles[0]);
        assert_eq!(grid, GridIndex::new(&tiles));
    }

    #[test]
    fn test_crowded_cell_spills_and_shrinks() {
        let pos = GridPosition::new(3, 0, 2);
        let mut tiles = (0..3)
            .map(|serial| {
                Tile::new(
                    TileId::new(serial, 0),
                    Symbol::season(1),
                    pos,
                    TileShape::Full,
                )
            })
            .collect::<Vec<_>>();
        let mut grid = GridIndex::new(&tiles);
        assert_eq!(grid.tiles_at(pos), [0, 1, 2]);
        assert_eq!(grid.len(), 3);

        tiles[1].mark_removed();
        grid.remove(1, &tiles[1]);
        assert_eq!(grid.tiles_at(pos), [0, 2]);
        assert_eq!(grid, GridIndex::new(&tiles));
    }

    #[test]
    fn test_refresh_accessibility_writes_cache() {
        let mut tiles = tiles_of("111");
        let grid = GridIndex::new(&tiles);
        refresh_accessibility(&mut tiles, &grid);
        let cached = tiles.iter().map(Tile::is_accessible).collect::<Vec<_>>();
        assert_eq!(cached, [true, false, true]);
    }

    proptest! {
        #[test]
        fn prop_covered_tiles_are_inaccessible(
            cells in proptest::collection::vec(0u8..=1, 12),
            upper in proptest::collection::vec(0u8..=1, 12),
        ) {
            let layer0 = cells.chunks(4).map(<[u8]>::to_vec).collect::<Vec<_>>();
            let layer1 = upper.chunks(4).map(<[u8]>::to_vec).collect::<Vec<_>>();
            let layer0 = layer0.iter().map(Vec::as_slice).collect::<Vec<_>>();
            let layer1 = layer1.iter().map(Vec::as_slice).collect::<Vec<_>>();
            let template = BoardTemplate::from_codes(&[layer0.as_slice(), layer1.as_slice()]).unwrap();
            let tiles = template
                .instantiate(vec![Symbol::season(1); template.slot_count()])
                .unwrap();
            let grid = GridIndex::new(&tiles);

            for tile in tiles.iter().filter(|tile| tile.layer() == 0) {
                let covered = tiles
                    .iter()
                    .filter(|upper| upper.layer() == 1)
                    .any(|upper| tile.footprint().is_covered_by(&upper.footprint()));
                if covered {
                    prop_assert!(!is_tile_accessible(tile, &grid));
                }
                prop_assert_eq!(
                    covered,
                    neighbor_flags(tile, &grid).contains(NeighborFlags::TOP)
                );
            }
        }
    }
}
