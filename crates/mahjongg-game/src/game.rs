use std::{collections::HashSet, time::Duration};

use mahjongg_core::{GridIndex, Tile, TileId, can_match, is_tile_accessible, refresh_accessibility};
use mahjongg_generator::{GeneratedLayout, LayoutSeed};
use mahjongg_solver::{GreedySolver, Move, find_available_moves};

use crate::GameError;

/// Overall state of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display, derive_more::IsVariant)]
pub enum GameStatus {
    /// Tiles remain and at least one pair can be removed.
    #[display("playing")]
    Playing,
    /// Every tile has been removed.
    #[display("won")]
    Won,
    /// Tiles remain but no pair can be removed.
    #[display("stuck")]
    Stuck,
}

/// Why a selection had no effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum IgnoreReason {
    /// The tile was already removed.
    #[display("tile already removed")]
    Removed,
    /// The tile is covered or hemmed in on both sides.
    #[display("tile is blocked")]
    Blocked,
}

/// Result of [`Game::select`].
#[derive(Debug, Clone, PartialEq, Eq, derive_more::IsVariant)]
pub enum SelectOutcome {
    /// Nothing changed.
    Ignored(IgnoreReason),
    /// The tile became the current selection.
    Selected,
    /// The tile was the current selection and was deselected.
    Deselected,
    /// The tile matched the current selection and both were removed.
    Matched {
        /// The previously selected tile.
        first: TileId,
        /// The tile just selected.
        second: TileId,
    },
}

/// A single play session on one board.
///
/// The session owns the tiles and keeps the derived state (occupancy index,
/// cached accessibility, status) in sync after every change. The player
/// picks tiles with [`select`](Self::select): picking two accessible,
/// matching tiles removes them. The last removal can be taken back with
/// [`undo`](Self::undo).
///
/// # Example
///
/// ```
/// use mahjongg_game::{Game, GameStatus};
/// use mahjongg_generator::{LayoutSeed, generate_initial_layout};
///
/// let layout = generate_initial_layout(Some(LayoutSeed::from(7_u64)));
/// let mut game = Game::new(layout);
/// assert_eq!(game.status(), GameStatus::Playing);
///
/// // Follow the hints until the board is cleared or stuck.
/// while let Some((first, second)) = game.hint() {
///     game.select(&first)?;
///     assert!(game.select(&second)?.is_matched());
/// }
/// assert_ne!(game.status(), GameStatus::Playing);
/// # Ok::<(), mahjongg_game::GameError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Game {
    tiles: Vec<Tile>,
    grid: GridIndex,
    selected: Option<usize>,
    previous: Option<Vec<Tile>>,
    status: GameStatus,
    elapsed: Duration,
    seed: Option<LayoutSeed>,
}

impl Game {
    /// Starts a session on a generated layout.
    #[must_use]
    pub fn new(layout: GeneratedLayout) -> Self {
        let GeneratedLayout {
            tiles,
            seed,
            attempts: _,
            outcome: _,
        } = layout;
        let mut game = Self::with_tiles(tiles, None);
        game.seed = Some(seed);
        game
    }

    /// Resumes a session from a tile set, such as a saved snapshot.
    ///
    /// Removed and selected flags are taken as they are; the elapsed time
    /// starts at zero and there is nothing to undo.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::DuplicateTileId`] if two tiles share an id and
    /// [`GameError::MultipleSelected`] if more than one live tile is selected.
    pub fn from_tiles(mut tiles: Vec<Tile>) -> Result<Self, GameError> {
        let mut ids = HashSet::with_capacity(tiles.len());
        for tile in &tiles {
            if !ids.insert(tile.id()) {
                return Err(GameError::DuplicateTileId {
                    id: tile.id().clone(),
                });
            }
        }

        let mut selected = None;
        for (i, tile) in tiles.iter().enumerate() {
            if tile.is_removed() || !tile.is_selected() {
                continue;
            }
            if let Some(first) = selected {
                let first: &Tile = &tiles[first];
                return Err(GameError::MultipleSelected {
                    first: first.id().clone(),
                    second: tile.id().clone(),
                });
            }
            selected = Some(i);
        }
        for tile in tiles.iter_mut().filter(|tile| tile.is_removed()) {
            tile.set_selected(false);
        }
        Ok(Self::with_tiles(tiles, selected))
    }

    fn with_tiles(tiles: Vec<Tile>, selected: Option<usize>) -> Self {
        let mut game = Self {
            grid: GridIndex::default(),
            tiles,
            selected,
            previous: None,
            status: GameStatus::Playing,
            elapsed: Duration::ZERO,
            seed: None,
        };
        game.refresh();
        game
    }

    /// Replaces the board with a new layout, discarding all progress.
    pub fn reset(&mut self, layout: GeneratedLayout) {
        *self = Self::new(layout);
    }

    /// Returns all tiles, removed ones included.
    #[must_use]
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Returns the tile with the given id.
    #[must_use]
    pub fn tile(&self, id: &TileId) -> Option<&Tile> {
        self.tiles.iter().find(|tile| tile.id() == id)
    }

    /// Returns the currently selected tile.
    #[must_use]
    pub fn selected(&self) -> Option<&Tile> {
        self.selected.map(|i| &self.tiles[i])
    }

    /// Returns the session status.
    #[must_use]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Returns the play time accumulated through [`tick`](Self::tick).
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Returns the seed of the layout, if the session started from one.
    #[must_use]
    pub fn seed(&self) -> Option<LayoutSeed> {
        self.seed
    }

    /// Returns the number of tiles still on the board.
    #[must_use]
    pub fn remaining_tiles(&self) -> usize {
        self.grid.len()
    }

    /// Returns `true` if a removal can be undone.
    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.previous.is_some()
    }

    /// Handles a click on the tile `id`.
    ///
    /// - Removed or blocked tiles are ignored.
    /// - Clicking the selected tile deselects it.
    /// - Clicking a tile that matches the selection removes both.
    /// - Otherwise the clicked tile becomes the selection.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::UnknownTile`] if no tile has this id.
    pub fn select(&mut self, id: &TileId) -> Result<SelectOutcome, GameError> {
        let index = self
            .tiles
            .iter()
            .position(|tile| tile.id() == id)
            .ok_or_else(|| GameError::UnknownTile { id: id.clone() })?;
        if self.tiles[index].is_removed() {
            return Ok(SelectOutcome::Ignored(IgnoreReason::Removed));
        }
        if !is_tile_accessible(&self.tiles[index], &self.grid) {
            return Ok(SelectOutcome::Ignored(IgnoreReason::Blocked));
        }

        match self.selected {
            Some(current) if current == index => {
                self.tiles[index].set_selected(false);
                self.selected = None;
                Ok(SelectOutcome::Deselected)
            }
            Some(current) if can_match(&self.tiles[current], &self.tiles[index], &self.grid) => {
                Ok(self.remove_pair(current, index))
            }
            Some(current) => {
                self.tiles[current].set_selected(false);
                self.tiles[index].set_selected(true);
                self.selected = Some(index);
                Ok(SelectOutcome::Selected)
            }
            None => {
                self.tiles[index].set_selected(true);
                self.selected = Some(index);
                Ok(SelectOutcome::Selected)
            }
        }
    }

    fn remove_pair(&mut self, first: usize, second: usize) -> SelectOutcome {
        let mut snapshot = self.tiles.clone();
        for tile in &mut snapshot {
            tile.set_selected(false);
        }
        self.previous = Some(snapshot);

        for index in [first, second] {
            self.tiles[index].mark_removed();
        }
        self.selected = None;
        self.refresh();

        let first = self.tiles[first].id().clone();
        let second = self.tiles[second].id().clone();
        log::debug!(
            "Matched {first} and {second}, {} tiles left ({})",
            self.grid.len(),
            self.status
        );
        SelectOutcome::Matched { first, second }
    }

    /// Restores the board as it was before the last removal.
    ///
    /// Only one removal is remembered: undoing twice in a row does nothing
    /// the second time. Returns `true` if something was undone.
    pub fn undo(&mut self) -> bool {
        let Some(previous) = self.previous.take() else {
            return false;
        };
        self.tiles = previous;
        self.selected = None;
        self.refresh();
        log::debug!("Undid last match, {} tiles left", self.grid.len());
        true
    }

    /// Advances the play clock by `delta` while the game is in progress.
    pub fn tick(&mut self, delta: Duration) {
        if self.status.is_playing() {
            self.elapsed += delta;
        }
    }

    /// Returns every pair that can be removed right now.
    #[must_use]
    pub fn available_moves(&self) -> Vec<Move> {
        find_available_moves(&self.tiles, &self.grid)
    }

    /// Returns the number of pairs that can be removed right now.
    #[must_use]
    pub fn possible_move_count(&self) -> usize {
        self.available_moves().len()
    }

    /// Suggests a pair to remove, using the solver's priority.
    #[must_use]
    pub fn hint(&self) -> Option<(TileId, TileId)> {
        let mv = GreedySolver::new().find_step(&self.tiles, &self.grid)?;
        Some((
            self.tiles[mv.first].id().clone(),
            self.tiles[mv.second].id().clone(),
        ))
    }

    fn refresh(&mut self) {
        self.grid = GridIndex::new(&self.tiles);
        refresh_accessibility(&mut self.tiles, &self.grid);
        self.status = if self.grid.is_empty() {
            GameStatus::Won
        } else if find_available_moves(&self.tiles, &self.grid).is_empty() {
            GameStatus::Stuck
        } else {
            GameStatus::Playing
        };
    }
}
