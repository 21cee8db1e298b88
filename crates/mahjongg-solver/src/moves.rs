use std::collections::HashMap;

use mahjongg_core::{GridIndex, MatchGroup, Tile, is_tile_accessible};

/// A legal pair removal, as two indices into the tile slice.
///
/// `first` is always smaller than `second`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
#[display("({first}, {second})")]
pub struct Move {
    /// Index of the first tile.
    pub first: usize,
    /// Index of the second tile.
    pub second: usize,
}

impl Move {
    /// Creates a move from two distinct tile indices, in either order.
    ///
    /// # Panics
    ///
    /// Panics if `a == b`.
    #[must_use]
    pub fn new(a: usize, b: usize) -> Self {
        assert_ne!(a, b, "a move needs two distinct tiles");
        Self {
            first: a.min(b),
            second: a.max(b),
        }
    }
}

/// Enumerates every pair of tiles that can currently be removed together.
///
/// Live tiles are grouped by [`MatchGroup`] in the order the groups first
/// appear in `tiles`. Within a group every pair of accessible tiles is
/// emitted once, ordered by index. `grid` must describe the current removal
/// state of `tiles`.
///
/// # Examples
///
/// ```
/// use mahjongg_core::{BoardTemplate, GridIndex, Symbol};
/// use mahjongg_solver::{Move, find_available_moves};
///
/// let template: BoardTemplate = "1111".parse().unwrap();
/// let tiles = template
///     .instantiate([
///         Symbol::season(1),
///         Symbol::flower(1),
///         Symbol::flower(2),
///         Symbol::season(4),
///     ])
///     .unwrap();
/// let grid = GridIndex::new(&tiles);
///
/// // Only the two ends are free; the flowers are pinched in the middle.
/// assert_eq!(find_available_moves(&tiles, &grid), [Move::new(0, 3)]);
/// ```
#[must_use]
pub fn find_available_moves(tiles: &[Tile], grid: &GridIndex) -> Vec<Move> {
    let mut slots = HashMap::<MatchGroup, usize>::new();
    let mut groups = Vec::<(usize, Vec<usize>)>::new();
    for (i, tile) in tiles.iter().enumerate() {
        if tile.is_removed() {
            continue;
        }
        let slot = *slots
            .entry(tile.symbol().match_group())
            .or_insert_with(|| {
                groups.push((0, vec![]));
                groups.len() - 1
            });
        let (live, accessible) = &mut groups[slot];
        *live += 1;
        if is_tile_accessible(tile, grid) {
            accessible.push(i);
        }
    }

    let mut moves = vec![];
    for (live, accessible) in &groups {
        if *live < 2 {
            continue;
        }
        for (n, &a) in accessible.iter().enumerate() {
            for &b in &accessible[n + 1..] {
                moves.push(Move { first: a, second: b });
            }
        }
    }
    moves
}

/// Returns the number of pairs [`find_available_moves`] would report.
#[must_use]
pub fn count_available_moves(tiles: &[Tile], grid: &GridIndex) -> usize {
    find_available_moves(tiles, grid).len()
}
