use std::cmp::Reverse;

use mahjongg_core::{GridIndex, Tile};

use crate::{Move, find_available_moves};

/// Statistics collected while simulating a play-through.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SolverStats {
    pairs_removed: usize,
    remaining_tiles: usize,
}

impl SolverStats {
    /// Creates statistics for a board with `remaining_tiles` live tiles.
    #[must_use]
    pub fn new(remaining_tiles: usize) -> Self {
        Self {
            pairs_removed: 0,
            remaining_tiles,
        }
    }

    /// Returns the number of pairs removed so far.
    #[must_use]
    pub fn pairs_removed(&self) -> usize {
        self.pairs_removed
    }

    /// Returns the number of live tiles left on the board.
    #[must_use]
    pub fn remaining_tiles(&self) -> usize {
        self.remaining_tiles
    }

    /// Returns `true` if at least one pair was removed.
    #[must_use]
    pub fn has_progress(&self) -> bool {
        self.pairs_removed > 0
    }
}

/// A single-path play-through simulator used to vet generated layouts.
///
/// At every step the solver removes one pair chosen by a fixed priority:
///
/// 1. the pair whose lower tile sits on the highest layer,
/// 2. then the pair whose upper tile sits on the highest layer,
/// 3. then the pair whose first tile has the lowest row, then column,
/// 4. then the pair whose second tile has the lowest row, then column.
///
/// Every key is a board position, so the choice never depends on the order
/// in which [`find_available_moves`] lists the pairs.
///
/// Clearing the top of the pile first mirrors how people play and keeps the
/// choice deterministic. The solver never backtracks, so it may report a
/// layout as unsolvable when a different removal order would have cleared
/// it. Layout generation compensates by retrying with a fresh deck.
///
/// # Examples
///
/// ```
/// use mahjongg_core::{BoardTemplate, Symbol};
/// use mahjongg_solver::GreedySolver;
///
/// let template: BoardTemplate = "
///     11
///     ---
///     11
/// "
/// .parse()
/// .unwrap();
/// let tiles = template
///     .instantiate([
///         Symbol::flower(1),
///         Symbol::flower(2),
///         Symbol::season(1),
///         Symbol::season(2),
///     ])
///     .unwrap();
///
/// let (solved, stats) = GreedySolver::new().solve(&tiles);
/// assert!(solved);
/// assert_eq!(stats.pairs_removed(), 2);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct GreedySolver;

impl GreedySolver {
    /// Creates a new solver.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Creates statistics for the live tiles indexed by `grid`.
    #[must_use]
    pub fn new_stats(&self, grid: &GridIndex) -> SolverStats {
        SolverStats::new(grid.len())
    }

    /// Returns the move the solver would play next, without changing anything.
    ///
    /// Returns `None` when no pair can be removed.
    #[must_use]
    pub fn find_step(&self, tiles: &[Tile], grid: &GridIndex) -> Option<Move> {
        find_available_moves(tiles, grid)
            .into_iter()
            .min_by_key(|mv| {
                let a = tiles[mv.first].grid_position();
                let b = tiles[mv.second].grid_position();
                (
                    Reverse(a.layer.min(b.layer)),
                    Reverse(a.layer.max(b.layer)),
                    (a.row, a.col),
                    (b.row, b.col),
                )
            })
    }

    /// Plays one step: removes the priority pair and updates `grid` in place.
    ///
    /// Returns the move played, or `None` if the solver is stuck.
    pub fn step(
        &self,
        tiles: &mut [Tile],
        grid: &mut GridIndex,
        stats: &mut SolverStats,
    ) -> Option<Move> {
        let mv = self.find_step(tiles, grid)?;
        for index in [mv.first, mv.second] {
            tiles[index].mark_removed();
            grid.remove(index, &tiles[index]);
        }
        stats.pairs_removed += 1;
        stats.remaining_tiles = grid.len();
        Some(mv)
    }

    /// Plays a private copy of `tiles` until no move remains.
    ///
    /// Returns `(solved, stats)` where `solved` is `true` only if every tile
    /// was removed. Running out of moves with tiles left is a failure.
    #[must_use]
    pub fn solve(&self, tiles: &[Tile]) -> (bool, SolverStats) {
        let mut tiles = tiles.to_vec();
        let mut grid = GridIndex::new(&tiles);
        let mut stats = self.new_stats(&grid);
        let solved = self.solve_with_stats(&mut tiles, &mut grid, &mut stats);
        (solved, stats)
    }

    /// Steps until the board is cleared or stuck, accumulating into `stats`.
    ///
    /// Unlike [`solve`](Self::solve) this plays on the caller's tiles.
    pub fn solve_with_stats(
        &self,
        tiles: &mut [Tile],
        grid: &mut GridIndex,
        stats: &mut SolverStats,
    ) -> bool {
        while self.step(tiles, grid, stats).is_some() {}
        grid.is_empty()
    }
}

/// Returns `true` if the greedy simulation clears every tile.
///
/// The tiles themselves are left untouched.
#[must_use]
pub fn is_layout_solvable(tiles: &[Tile]) -> bool {
    GreedySolver::new().solve(tiles).0
}
