//! Pairing rules between two tiles.

use crate::{GridIndex, Symbol, Tile, is_tile_accessible};

/// Returns `true` if two symbols form a legal pair.
///
/// Identical symbols always match. Any season matches any other season and
/// any flower matches any other flower; seasons never match flowers.
///
/// # Examples
///
/// ```
/// use mahjongg_core::{Dragon, Symbol, symbols_match};
///
/// assert!(symbols_match(Symbol::season(1), Symbol::season(3)));
/// assert!(!symbols_match(Symbol::season(1), Symbol::flower(1)));
/// assert!(!symbols_match(Symbol::dragon(Dragon::Chun), Symbol::dragon(Dragon::Haku)));
/// ```
#[must_use]
pub fn symbols_match(a: Symbol, b: Symbol) -> bool {
    a.match_group() == b.match_group()
}

/// Returns `true` if the two tiles may be removed together under `grid`.
///
/// The tiles must be distinct, both live, both accessible and carry
/// matching symbols.
#[must_use]
pub fn can_match(a: &Tile, b: &Tile, grid: &GridIndex) -> bool {
    a.id() != b.id()
        && symbols_match(a.symbol(), b.symbol())
        && is_tile_accessible(a, grid)
        && is_tile_accessible(b, grid)
}
