//! Reproducible generation of solvable layouts.
//!
//! A layout is produced in three steps: a [`DeckBuilder`] deals a shuffled,
//! fully paired deck; the deck is placed into a
//! [`BoardTemplate`](mahjongg_core::BoardTemplate); and a
//! [`GreedySolver`](mahjongg_solver::GreedySolver) plays the result through.
//! [`LayoutGenerator`] repeats this until the solver clears the board or the
//! attempt cap is reached.
//!
//! Every random choice comes from one stream seeded by a [`LayoutSeed`].
//! Random play draws the seed; daily play derives it from a [`PuzzleDate`].
//!
//! # Examples
//!
//! ```
//! use mahjongg_generator::{PuzzleDate, generate_initial_layout};
//!
//! let date: PuzzleDate = "2024-06-01".parse().unwrap();
//! let today = generate_initial_layout(Some(date.seed()));
//! let again = generate_initial_layout(Some(date.seed()));
//! assert_eq!(today.tiles, again.tiles);
//! ```

pub use self::{deck::*, generator::*, seed::*};

mod deck;
mod generator;
mod seed;
