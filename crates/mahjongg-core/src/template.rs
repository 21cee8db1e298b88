//! Static board layouts.
//!
//! A [`BoardTemplate`] lists, layer by layer, which cells hold a tile and of
//! which [`TileShape`]. Templates are data: the generator only counts their
//! slots and fills them with symbols.

use std::{collections::HashSet, str::FromStr};

use crate::{Footprint, GridPosition, Symbol, Tile, TileId, TileShape};

/// Cell codes of the classic five-layer pyramid (144 slots).
const CLASSIC: [[[u8; 15]; 8]; 5] = [
    [
        [0, 0, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 0],
        [0, 0, 0, 0, 1, 1, 1, 1, 1, 1, 1, 1, 0, 0, 0],
        [0, 0, 0, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 0, 0],
        [2, 2, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 2],
        [0, 0, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 0],
        [0, 0, 0, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 0, 0],
        [0, 0, 0, 0, 1, 1, 1, 1, 1, 1, 1, 1, 0, 0, 0],
        [0, 0, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 0],
    ],
    [
        [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
        [0, 0, 0, 0, 0, 1, 1, 1, 1, 1, 1, 0, 0, 0, 0],
        [0, 0, 0, 0, 0, 1, 1, 1, 1, 1, 1, 0, 0, 0, 0],
        [0, 0, 0, 0, 0, 1, 1, 1, 1, 1, 1, 0, 0, 0, 0],
        [0, 0, 0, 0, 0, 1, 1, 1, 1, 1, 1, 0, 0, 0, 0],
        [0, 0, 0, 0, 0, 1, 1, 1, 1, 1, 1, 0, 0, 0, 0],
        [0, 0, 0, 0, 0, 1, 1, 1, 1, 1, 1, 0, 0, 0, 0],
        [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
    ],
    [
        [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
        [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
        [0, 0, 0, 0, 0, 0, 1, 1, 1, 1, 0, 0, 0, 0, 0],
        [0, 0, 0, 0, 0, 0, 1, 1, 1, 1, 0, 0, 0, 0, 0],
        [0, 0, 0, 0, 0, 0, 1, 1, 1, 1, 0, 0, 0, 0, 0],
        [0, 0, 0, 0, 0, 0, 1, 1, 1, 1, 0, 0, 0, 0, 0],
        [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
        [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
    ],
    [
        [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
        [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
        [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
        [0, 0, 0, 0, 0, 0, 0, 1, 1, 0, 0, 0, 0, 0, 0],
        [0, 0, 0, 0, 0, 0, 0, 1, 1, 0, 0, 0, 0, 0, 0],
        [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
        [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
        [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
    ],
    [
        [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
        [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
        [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
        [0, 0, 0, 0, 0, 0, 0, 3, 0, 0, 0, 0, 0, 0, 0],
        [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
        [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
        [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
        [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
    ],
];

/// Errors produced while building or filling a [`BoardTemplate`].
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum TemplateError {
    /// A numeric cell code outside `0..=3`.
    #[display("invalid cell code {code} at layer {layer}, row {row}")]
    InvalidCellCode {
        /// The offending code.
        code: u8,
        /// Layer index.
        layer: usize,
        /// Row index within the layer.
        row: usize,
    },
    /// A character that is not a cell code in the text form.
    #[display("invalid cell character {ch:?} at layer {layer}, row {row}")]
    InvalidCellChar {
        /// The offending character.
        ch: char,
        /// Layer index.
        layer: usize,
        /// Row index within the layer.
        row: usize,
    },
    /// Two tiles of the same layer cover the same cell.
    #[display("overlapping tiles at {position}")]
    OverlappingCells {
        /// A cell covered twice.
        position: GridPosition,
    },
    /// The number of symbols does not equal the number of slots.
    #[display("template has {expected} slots but {actual} symbols were supplied")]
    SymbolCountMismatch {
        /// Slot count of the template.
        expected: usize,
        /// Number of symbols supplied.
        actual: usize,
    },
}

/// The content of one template cell.
///
/// Numeric codes are `0` (empty), `1` ([`TileShape::Full`]),
/// `2` ([`TileShape::SplitDown`]) and `3` ([`TileShape::SplitDownRight`]).
/// The text form also accepts `.` and `_` for empty cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CellCode {
    /// No tile.
    #[default]
    Empty,
    /// A tile of the given shape.
    Tile(TileShape),
}

impl CellCode {
    /// Converts a numeric cell code, returning `None` for codes above `3`.
    #[must_use]
    pub fn from_code(code: u8) -> Option<Self> {
        let cell = match code {
            0 => Self::Empty,
            1 => Self::Tile(TileShape::Full),
            2 => Self::Tile(TileShape::SplitDown),
            3 => Self::Tile(TileShape::SplitDownRight),
            _ => return None,
        };
        Some(cell)
    }

    /// Converts a character of the text form.
    #[must_use]
    pub fn from_char(ch: char) -> Option<Self> {
        match ch {
            '.' | '_' => Some(Self::Empty),
            _ => ch
                .to_digit(10)
                .and_then(|digit| u8::try_from(digit).ok())
                .and_then(Self::from_code),
        }
    }

    /// Returns the numeric cell code.
    #[must_use]
    pub fn code(self) -> u8 {
        match self {
            Self::Empty => 0,
            Self::Tile(TileShape::Full) => 1,
            Self::Tile(TileShape::SplitDown) => 2,
            Self::Tile(TileShape::SplitDownRight) => 3,
        }
    }

    /// Returns the shape of the tile placed here, if any.
    #[must_use]
    pub fn shape(self) -> Option<TileShape> {
        match self {
            Self::Empty => None,
            Self::Tile(shape) => Some(shape),
        }
    }
}

/// One occupiable cell of a template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Slot {
    /// Anchor cell of the tile placed here.
    pub position: GridPosition,
    /// Shape of the tile placed here.
    pub shape: TileShape,
}

impl Slot {
    /// Returns the cells a tile in this slot covers.
    #[must_use]
    pub fn footprint(&self) -> Footprint {
        Footprint::new(self.position, self.shape)
    }
}

/// A layered board layout.
///
/// # Text form
///
/// [`FromStr`] reads one row per line. `1`, `2` and `3` are the full,
/// split-down and split-down-right cell codes; `0`, `.` and `_` are empty
/// cells; other whitespace is ignored. A line made of dashes starts the next
/// layer (layer 0 comes first).
///
/// # Examples
///
/// ```
/// use mahjongg_core::BoardTemplate;
///
/// let template: BoardTemplate = "
///     11
///     11
///     ---
///     3.
/// "
/// .parse()
/// .unwrap();
/// assert_eq!(template.slot_count(), 5);
/// assert_eq!(template.layer_slot_counts(), [4, 1]);
///
/// assert_eq!(BoardTemplate::classic().slot_count(), 144);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardTemplate {
    layers: Vec<Vec<Slot>>,
}

impl BoardTemplate {
    /// Returns the built-in five-layer pyramid.
    #[must_use]
    #[expect(clippy::missing_panics_doc)]
    pub fn classic() -> Self {
        let layers = CLASSIC
            .iter()
            .map(|layer| layer.iter().map(<[u8; 15]>::as_slice).collect::<Vec<_>>())
            .collect::<Vec<_>>();
        let layers = layers.iter().map(Vec::as_slice).collect::<Vec<_>>();
        Self::from_codes(&layers).expect("classic template is valid")
    }

    /// Builds a template from numeric cell codes indexed `[layer][row][col]`.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError::InvalidCellCode`] for codes above `3` and
    /// [`TemplateError::OverlappingCells`] if split tiles collide with other
    /// tiles of their layer.
    pub fn from_codes(layers: &[&[&[u8]]]) -> Result<Self, TemplateError> {
        let mut slots = Vec::with_capacity(layers.len());
        for (layer_index, rows) in layers.iter().enumerate() {
            let mut layer = vec![];
            for (row_index, row) in rows.iter().enumerate() {
                for (col_index, &code) in row.iter().enumerate() {
                    let cell = CellCode::from_code(code).ok_or(TemplateError::InvalidCellCode {
                        code,
                        layer: layer_index,
                        row: row_index,
                    })?;
                    if let Some(shape) = cell.shape() {
                        layer.push(Slot {
                            position: grid_position(col_index, layer_index, row_index),
                            shape,
                        });
                    }
                }
            }
            slots.push(layer);
        }
        Self::from_slots(slots)
    }

    fn from_slots(layers: Vec<Vec<Slot>>) -> Result<Self, TemplateError> {
        for layer in &layers {
            let mut covered = HashSet::new();
            for slot in layer {
                for cell in slot.footprint().cells() {
                    if !covered.insert(cell) {
                        return Err(TemplateError::OverlappingCells { position: cell });
                    }
                }
            }
        }
        Ok(Self { layers })
    }

    /// Returns the number of layers.
    #[must_use]
    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    /// Returns the total number of occupiable cells.
    #[must_use]
    pub fn slot_count(&self) -> usize {
        self.layers.iter().map(Vec::len).sum()
    }

    /// Returns the number of occupiable cells of each layer, bottom first.
    #[must_use]
    pub fn layer_slot_counts(&self) -> Vec<usize> {
        self.layers.iter().map(Vec::len).collect()
    }

    /// Iterates over all slots in layer, row, column order.
    pub fn slots(&self) -> impl Iterator<Item = &Slot> {
        self.layers.iter().flatten()
    }

    /// Places one tile per slot, taking symbols in slot order.
    ///
    /// Tile ids are `tile-{n}-L{layer}` with `n` counting from zero, and all
    /// play flags start cleared.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError::SymbolCountMismatch`] unless exactly
    /// [`slot_count`](Self::slot_count) symbols are supplied.
    pub fn instantiate<I>(&self, symbols: I) -> Result<Vec<Tile>, TemplateError>
    where
        I: IntoIterator<Item = Symbol>,
    {
        let symbols = symbols.into_iter().collect::<Vec<_>>();
        let expected = self.slot_count();
        if symbols.len() != expected {
            return Err(TemplateError::SymbolCountMismatch {
                expected,
                actual: symbols.len(),
            });
        }
        let tiles = self
            .slots()
            .zip(symbols)
            .enumerate()
            .map(|(serial, (slot, symbol))| {
                Tile::new(
                    TileId::new(serial, slot.position.layer),
                    symbol,
                    slot.position,
                    slot.shape,
                )
            })
            .collect();
        Ok(tiles)
    }
}

impl FromStr for BoardTemplate {
    type Err = TemplateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut layers = vec![vec![]];
        let mut row_index = 0;
        for line in s.lines().map(str::trim).filter(|line| !line.is_empty()) {
            if line.chars().all(|ch| ch == '-') {
                layers.push(vec![]);
                row_index = 0;
                continue;
            }
            let layer_index = layers.len() - 1;
            let cells = line.chars().filter(|ch| !ch.is_whitespace());
            for (col_index, ch) in cells.enumerate() {
                let cell = CellCode::from_char(ch).ok_or(TemplateError::InvalidCellChar {
                    ch,
                    layer: layer_index,
                    row: row_index,
                })?;
                let Some(shape) = cell.shape() else {
                    continue;
                };
                layers[layer_index].push(Slot {
                    position: grid_position(col_index, layer_index, row_index),
                    shape,
                });
            }
            row_index += 1;
        }
        Self::from_slots(layers)
    }
}

#[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
fn grid_position(col: usize, layer: usize, row: usize) -> GridPosition {
    GridPosition::new(col as i32, layer as i32, row as i32)
}
