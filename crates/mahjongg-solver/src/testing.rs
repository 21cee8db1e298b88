//! Test utilities for board-level rules.
//!
//! This module provides [`BoardTester`], a harness that builds a small board
//! from a text template and a list of symbol names, then checks the
//! accessibility, move and solver behavior on it.
//!
//! # Example
//!
//! ```ignore
//! BoardTester::new("111", "Chun Haku Chun")
//!     .assert_accessible((0, 0, 0))
//!     .assert_blocked((1, 0, 0))
//!     .assert_move_count(1)
//!     .step()
//!     .assert_removed((0, 0, 0))
//!     .assert_stuck();
//! ```

use mahjongg_core::{BoardTemplate, GridIndex, GridPosition, Symbol, Tile, is_tile_accessible};

use crate::{GreedySolver, Move, SolverStats, find_available_moves};

/// A test harness for board fixtures.
///
/// Positions are `(col, layer, row)` triples naming a tile by its anchor
/// cell. All methods return `self`, enabling fluent method chaining.
///
/// # Panics
///
/// All assertion methods panic with detailed messages on failure, using
/// `#[track_caller]` to report the correct source location.
#[derive(Debug)]
pub struct BoardTester {
    initial: Vec<Tile>,
    tiles: Vec<Tile>,
    grid: GridIndex,
    stats: SolverStats,
    solver: GreedySolver,
}

impl BoardTester {
    /// Creates a tester from a text template and whitespace-separated symbol
    /// names given in slot order.
    ///
    /// # Panics
    ///
    /// Panics if the template or a symbol name does not parse, or if the
    /// symbol count does not fit the template.
    #[track_caller]
    pub fn new(template: &str, symbols: &str) -> Self {
        let template = template.parse::<BoardTemplate>().unwrap();
        let symbols = symbols
            .split_whitespace()
            .map(|name| name.parse::<Symbol>().unwrap())
            .collect::<Vec<_>>();
        let tiles = template.instantiate(symbols).unwrap();
        let grid = GridIndex::new(&tiles);
        let solver = GreedySolver::new();
        let stats = solver.new_stats(&grid);
        Self {
            initial: tiles.clone(),
            tiles,
            grid,
            stats,
            solver,
        }
    }

    #[track_caller]
    fn index_of(&self, (col, layer, row): (i32, i32, i32)) -> usize {
        let pos = GridPosition::new(col, layer, row);
        self.tiles
            .iter()
            .position(|tile| tile.grid_position() == pos)
            .unwrap_or_else(|| panic!("No tile anchored at {pos}"))
    }

    /// Removes the two tiles at `a` and `b` without checking that they match.
    #[track_caller]
    pub fn remove_pair(mut self, a: (i32, i32, i32), b: (i32, i32, i32)) -> Self {
        for pos in [a, b] {
            let index = self.index_of(pos);
            self.tiles[index].mark_removed();
        }
        self.grid = GridIndex::new(&self.tiles);
        self
    }

    /// Plays one greedy solver step.
    ///
    /// # Panics
    ///
    /// Panics if the solver has no move.
    #[track_caller]
    pub fn step(mut self) -> Self {
        let mv = self
            .solver
            .step(&mut self.tiles, &mut self.grid, &mut self.stats);
        assert!(mv.is_some(), "Expected the solver to find a move");
        assert_eq!(
            self.grid,
            GridIndex::new(&self.tiles),
            "Expected the incrementally updated grid to match a rebuild"
        );
        self
    }

    /// Asserts that the tile at `pos` can be selected.
    #[track_caller]
    pub fn assert_accessible(self, pos: (i32, i32, i32)) -> Self {
        let tile = &self.tiles[self.index_of(pos)];
        assert!(
            is_tile_accessible(tile, &self.grid),
            "Expected tile {} at {} to be accessible",
            tile.id(),
            tile.grid_position()
        );
        self
    }

    /// Asserts that the tile at `pos` cannot be selected.
    #[track_caller]
    pub fn assert_blocked(self, pos: (i32, i32, i32)) -> Self {
        let tile = &self.tiles[self.index_of(pos)];
        assert!(
            !is_tile_accessible(tile, &self.grid),
            "Expected tile {} at {} to be blocked",
            tile.id(),
            tile.grid_position()
        );
        self
    }

    /// Asserts that the tile at `pos` has been removed.
    #[track_caller]
    pub fn assert_removed(self, pos: (i32, i32, i32)) -> Self {
        let index = self.index_of(pos);
        assert!(
            !self.initial[index].is_removed(),
            "Expected tile at {pos:?} to start on the board"
        );
        assert!(
            self.tiles[index].is_removed(),
            "Expected tile at {pos:?} to be removed"
        );
        self
    }

    /// Asserts the number of currently available moves.
    #[track_caller]
    pub fn assert_move_count(self, expected: usize) -> Self {
        let moves = find_available_moves(&self.tiles, &self.grid);
        assert_eq!(
            moves.len(),
            expected,
            "Expected {expected} available moves, found {moves:?}"
        );
        self
    }

    /// Asserts the move the solver would play next.
    #[track_caller]
    pub fn assert_next_step(self, a: (i32, i32, i32), b: (i32, i32, i32)) -> Self {
        let expected = Move::new(self.index_of(a), self.index_of(b));
        let actual = self.solver.find_step(&self.tiles, &self.grid);
        assert_eq!(actual, Some(expected), "Unexpected solver priority");
        self
    }

    /// Asserts that no move is available.
    #[track_caller]
    pub fn assert_stuck(self) -> Self {
        self.assert_move_count(0)
    }

    /// Asserts that the greedy solver clears the current board.
    #[track_caller]
    pub fn assert_solvable(self) -> Self {
        let (solved, stats) = self.solver.solve(&self.tiles);
        assert!(
            solved,
            "Expected the board to be solvable, {} tiles left",
            stats.remaining_tiles()
        );
        self
    }

    /// Asserts that the greedy solver gets stuck on the current board.
    #[track_caller]
    pub fn assert_unsolvable(self) -> Self {
        let (solved, _) = self.solver.solve(&self.tiles);
        assert!(!solved, "Expected the board to be unsolvable");
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_with_pinched_middle() {
        BoardTester::new("111", "Chun Haku Chun")
            .assert_accessible((0, 0, 0))
            .assert_blocked((1, 0, 0))
            .assert_accessible((2, 0, 0))
            .assert_move_count(1)
            .step()
            .assert_removed((0, 0, 0))
            .assert_removed((2, 0, 0))
            .assert_accessible((1, 0, 0))
            .assert_stuck();
    }

    #[test]
    fn test_split_tile_centered_over_pair() {
        BoardTester::new(
            "
            11
            ---
            3.
            ",
            "Chun Chun Season1",
        )
        .assert_blocked((0, 0, 0))
        .assert_blocked((1, 0, 0))
        .assert_accessible((0, 1, 0))
        .assert_stuck()
        .assert_unsolvable();
    }

    #[test]
    fn test_clearing_top_frees_lower_layer() {
        BoardTester::new(
            "
            111
            ---
            .1.
            ---
            .1.
            ",
            "Sou1 Pin5 Sou1 Season2 Season4",
        )
        .assert_blocked((1, 0, 0))
        .assert_blocked((1, 1, 0))
        .assert_next_step((0, 0, 0), (2, 0, 0))
        .remove_pair((1, 2, 0), (1, 1, 0))
        .assert_blocked((1, 0, 0))
        .assert_move_count(1)
        .step()
        .assert_accessible((1, 0, 0));
    }

    #[test]
    fn test_split_down_tile_is_held_by_either_row() {
        BoardTester::new(
            "
            121
            1.1
            ",
            "Man2 Man3 Man2 Season1 Season3",
        )
        .assert_blocked((1, 0, 0))
        .assert_accessible((0, 0, 1))
        .assert_accessible((2, 0, 1))
        .assert_next_step((0, 0, 0), (2, 0, 0))
        .step()
        .assert_blocked((1, 0, 0))
        .step()
        .assert_accessible((1, 0, 0))
        .assert_stuck();
    }

    #[test]
    fn test_wide_flat_board_is_solvable() {
        BoardTester::new(
            "
            1111
            1111
            ",
            "North East East North Pin1 Pin2 Pin2 Pin1",
        )
        .assert_move_count(2)
        .assert_solvable();
    }
}
