//! Command-line driver for the Mahjongg engine.
//!
//! Generates a layout on the classic template, prints a summary of it and
//! optionally plays it through with the built-in hints.
//!
//! ```sh
//! mahjongg                          # random layout
//! mahjongg --daily 2024-03-15       # layout of the day
//! mahjongg --seed <HEX> --autoplay  # replay a seed and play it out
//! ```
//!
//! Set `RUST_LOG=debug` to see every generation attempt and every match.

use std::{num::NonZero, process::ExitCode};

use clap::Parser;
use mahjongg_core::BoardTemplate;
use mahjongg_game::{Game, GameError, GameStatus};
use mahjongg_generator::{GeneratedLayout, LayoutGenerator, LayoutSeed, PuzzleDate};
use mahjongg_solver::GreedySolver;

#[derive(Debug, Parser)]
#[command(name = "mahjongg", author, version, about)]
struct Args {
    /// Seed of the layout to reproduce (64 hex digits).
    #[arg(long, value_name = "HEX", conflicts_with = "daily")]
    seed: Option<LayoutSeed>,

    /// Play the daily layout of this date (YYYY-MM-DD).
    #[arg(long, value_name = "DATE")]
    daily: Option<PuzzleDate>,

    /// Attempts before falling back to an unverified layout.
    #[arg(long, value_name = "COUNT", default_value_t = LayoutGenerator::DEFAULT_MAX_ATTEMPTS)]
    max_attempts: NonZero<usize>,

    /// Play the layout through by following hints.
    #[arg(long)]
    autoplay: bool,
}

fn main() -> ExitCode {
    better_panic::install();
    env_logger::init();

    let args = Args::parse();
    let template = BoardTemplate::classic();
    let solver = GreedySolver::new();
    let generator = LayoutGenerator::new(&template, &solver).with_max_attempts(args.max_attempts);

    let seed = match (args.seed, args.daily) {
        (Some(seed), _) => seed,
        (None, Some(date)) => {
            println!("Daily puzzle #{} ({date})", date.puzzle_number());
            println!();
            date.seed()
        }
        (None, None) => LayoutSeed::random(),
    };
    let layout = generator.generate_with_seed(seed);
    print_summary(&template, &layout);

    if !args.autoplay {
        return ExitCode::SUCCESS;
    }
    match autoplay(Game::new(layout)) {
        Ok(GameStatus::Won) => ExitCode::SUCCESS,
        Ok(_) => ExitCode::from(2),
        Err(err) => {
            log::error!("Autoplay failed: {err}");
            ExitCode::FAILURE
        }
    }
}

fn print_summary(template: &BoardTemplate, layout: &GeneratedLayout) {
    println!("Seed: {}", layout.seed);
    println!("Outcome: {}", layout.outcome);
    println!("Attempts: {}", layout.attempts);
    println!();

    println!("Layers:");
    for (layer, count) in template.layer_slot_counts().iter().enumerate() {
        println!("  {layer}: {count} tiles");
    }
    println!();

    let game = Game::new(layout.clone());
    println!("Opening moves: {}", game.possible_move_count());
}

fn autoplay(mut game: Game) -> Result<GameStatus, GameError> {
    let total = game.remaining_tiles();
    let mut pairs = 0;
    while let Some((first, second)) = game.hint() {
        game.select(&first)?;
        game.select(&second)?;
        pairs += 1;
    }

    println!();
    println!("Autoplay:");
    println!("  Pairs removed: {pairs}");
    println!("  Tiles left: {} of {total}", game.remaining_tiles());
    match game.status() {
        GameStatus::Won => println!("  Result: board cleared"),
        status => println!("  Result: {status}, no moves left"),
    }
    Ok(game.status())
}
