//! Play sessions on a Mahjongg board.
//!
//! [`Game`] owns a board and applies the player's clicks to it: selecting,
//! deselecting and removing matching pairs. It tracks the elapsed play time,
//! keeps a single level of undo and reports whether the board was cleared
//! or can no longer be played.
//!
//! # Examples
//!
//! ```
//! use mahjongg_game::{Game, SelectOutcome};
//! use mahjongg_generator::{LayoutSeed, generate_initial_layout};
//!
//! let mut game = Game::new(generate_initial_layout(Some(LayoutSeed::from(1_u64))));
//! let (first, second) = game.hint().expect("a fresh layout has a move");
//! assert_eq!(game.select(&first)?, SelectOutcome::Selected);
//! assert!(game.select(&second)?.is_matched());
//! assert_eq!(game.remaining_tiles(), 142);
//! assert!(game.undo());
//! # Ok::<(), mahjongg_game::GameError>(())
//! ```

pub use self::{error::*, game::*};

mod error;
mod game;
