//! Move enumeration and play-through simulation for layered tile-matching boards.
//!
//! - [`find_available_moves`] lists every pair that can be removed right now.
//! - [`GreedySolver`] plays a board to the end along a single deterministic
//!   path; layout generation uses it to reject decks that would leave the
//!   player stuck.
//! - [`validate_pairing`] checks that a tile set can be paired off at all.
//!
//! # Examples
//!
//! ```
//! use mahjongg_core::{BoardTemplate, GridIndex, Symbol};
//! use mahjongg_solver::{find_available_moves, is_layout_solvable};
//!
//! let template: BoardTemplate = "11".parse().unwrap();
//! let tiles = template
//!     .instantiate([Symbol::season(1), Symbol::season(2)])
//!     .unwrap();
//!
//! assert_eq!(find_available_moves(&tiles, &GridIndex::new(&tiles)).len(), 1);
//! assert!(is_layout_solvable(&tiles));
//! ```

pub use self::{moves::*, solver::*, validate::*};

mod moves;
mod solver;
mod validate;

#[cfg(test)]
mod testing;
